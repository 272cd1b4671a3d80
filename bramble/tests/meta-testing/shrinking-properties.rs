//! Shrinking correctness properties
//!
//! The shrink search must only ever accept candidates that still fail, stay
//! within its budgets, and reach the minimal counterexample for simple
//! monotone properties.

use crate::{arbitrary_seed, assert_holds, int, nat, quick};
use bramble::*;

fn failure_of<Trees>(result: CheckResult<Trees>) -> Trees
where
    Trees: Arguments + std::fmt::Debug,
{
    match result {
        CheckResult::Failure { args, .. } => args,
        other => panic!("Expected a failure, got: {other:?}"),
    }
}

/// "Two naturals are always equal" shrinks to a pair differing by one
pub fn test_distinct_pair_shrinks_to_neighbours() {
    let property = |(a, b): (i64, i64)| a == b;
    let args = failure_of(
        given((nat(), nat()))
            .with_options(CheckOverrides::new().seed(Seed::from_key("distinct")))
            .unwrap()
            .check(property),
    );

    let result = shrink(property, args, ShrinkOptions::default());
    println!("{result}");
    assert!(
        result.smallest_failing_args == (0, 1) || result.smallest_failing_args == (1, 0),
        "unexpected minimum {:?}",
        result.smallest_failing_args
    );
    assert!(result.shrinks <= 200);
}

/// Property: for x < threshold the minimum found is exactly the threshold
pub fn test_threshold_shrinks_exactly() {
    let result = given((int(100), arbitrary_seed()))
        .with_options(quick("threshold"))
        .unwrap()
        .check(|(threshold, seed)| {
            let tree = int(100).run(Size(0), seed, 0);
            if tree.value < threshold {
                return true;
            }
            let shrunk = shrink(|x: i64| x < threshold, tree, ShrinkOptions::default());
            shrunk.smallest_failing_args == threshold
        });

    assert_holds(result);
}

/// Property: shrinking never spends more evaluations than it is allowed
pub fn test_budgets_are_respected() {
    let result = given((int(20), int(20), arbitrary_seed()))
        .with_options(quick("budgets"))
        .unwrap()
        .check(|(total, per_argument, seed)| {
            let trees = (
                int(1_000_000).run(Size(0), seed, 0),
                int(1_000_000).run(Size(0), seed.jump(), 0),
            );
            let options = ShrinkOptions::default()
                .with_max_shrinks(total as usize)
                .with_max_shrinks_per_argument(per_argument as usize);
            let shrunk = shrink(|(a, b): (i64, i64)| a + b < 10, trees, options);
            shrunk.shrinks <= total as usize && shrunk.shrinks <= 2 * per_argument as usize
        });

    assert_holds(result);
}

/// Property: whatever the budget, the reported arguments still fail
pub fn test_shrunk_values_still_fail() {
    let result = given((int(50), arbitrary_seed()))
        .with_options(quick("still-fails"))
        .unwrap()
        .check(|(budget, seed)| {
            let tree = int(1_000_000).run(Size(0), seed, 0);
            let property = |x: i64| x % 2 == 0 || x < 100;
            if property(tree.value) {
                return true;
            }
            let options = ShrinkOptions::default().with_max_shrinks(budget as usize);
            let shrunk = shrink(property, tree, options);
            !property(shrunk.smallest_failing_args)
        });

    assert_holds(result);
}
