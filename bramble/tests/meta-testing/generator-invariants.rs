//! Generator invariants
//!
//! Generators are pure: the same size, seed and iteration always give the
//! same tree, and the values respect the bounds the size implies.

use crate::{arbitrary_seed, arbitrary_size, assert_holds, int, nat, quick};
use bramble::*;

/// Property: running a generator twice with the same inputs agrees everywhere
pub fn test_generation_is_deterministic() {
    let result = given((arbitrary_size(), arbitrary_seed()))
        .with_options(quick("deterministic"))
        .unwrap()
        .named("generation is deterministic")
        .check(|(size, seed)| {
            let gen = nat();
            let first: Vec<_> = gen.run(size, seed, 3).iter_depth_first().take(50).collect();
            let second: Vec<_> = gen.run(size, seed, 3).iter_depth_first().take(50).collect();
            first == second
        });

    assert_holds(result);
}

/// Property: nat never exceeds the size it is run at
pub fn test_nat_stays_within_size() {
    let result = given(arbitrary_seed())
        .with_options(quick("bounds"))
        .unwrap()
        .check(|seed| {
            (0..=40).all(|n| {
                let tree = nat().run(Size(n), seed, 0);
                (0..=n as i64).contains(&tree.value)
                    && tree.children().all(|child| child.value < tree.value)
            })
        });

    assert_holds(result);
}

/// Property: resize pins the size, scale transforms it
pub fn test_resize_and_scale() {
    let observe = Gen::from_fn(|size: Size, _seed| size.get());
    let result = given((arbitrary_size(), arbitrary_seed()))
        .with_options(quick("resize"))
        .unwrap()
        .check(move |(size, seed)| {
            let pinned = observe.clone().resize(Size(7)).generate(size, seed).value;
            let doubled = observe
                .clone()
                .scale(|size| Size(size.get() * 2))
                .generate(size, seed)
                .value;
            pinned == 7 && doubled == size.get() * 2
        });

    assert_holds(result);
}

/// Property: sequence runs each generator once, then sticks with the last
pub fn test_sequence_saturates_on_last() {
    let gen = Gen::sequence(vec![
        Gen::constant("first"),
        Gen::constant("second"),
        Gen::constant("rest"),
    ])
    .unwrap();

    let seen = std::cell::RefCell::new(Vec::new());
    let result = given(gen)
        .with_options(CheckOverrides::new().iterations(6))
        .unwrap()
        .check(|label| seen.borrow_mut().push(label));

    assert!(result.is_pass());
    assert_eq!(
        *seen.borrow(),
        vec!["first", "second", "rest", "rest", "rest", "rest"]
    );
}

pub fn test_empty_sequence_is_rejected() {
    assert!(matches!(
        Gen::<i64>::sequence(Vec::new()),
        Err(Error::InvalidGenerator { .. })
    ));
}

/// Property: repeat yields exactly `count` values and no shrinks
pub fn test_repeat_has_count_and_no_shrinks() {
    let result = given((int(12), arbitrary_seed()))
        .with_options(quick("repeat"))
        .unwrap()
        .check(|(count, seed)| {
            let tree = int(1000).repeat(count as usize).generate(Size(10), seed);
            tree.value.len() == count as usize
                && tree.value.iter().all(|x| (0..=1000).contains(x))
                && !tree.has_shrinks()
        });

    assert_holds(result);
}
