//! Shrink tree laws
//!
//! Trees are lazy and re-evaluated on every traversal, so these compare
//! bounded prefixes of their traversals rather than whole trees.

use crate::{arbitrary_seed, assert_holds, nat, quick};
use bramble::*;

const PREFIX: usize = 64;

fn prefix<T: Clone + 'static>(tree: &Tree<T>) -> Vec<T> {
    tree.iter_breadth_first().take(PREFIX).collect()
}

/// Property: mapping the identity changes nothing
pub fn test_map_identity() {
    let result = given(arbitrary_seed())
        .with_options(quick("map-identity"))
        .unwrap()
        .check(|seed| {
            let tree = nat().run(Size(50), seed, 0);
            prefix(&tree.clone().map(|x| x)) == prefix(&tree)
        });

    assert_holds(result);
}

/// Property: map f . map g == map (f . g), at every node
pub fn test_map_composition() {
    let result = given(arbitrary_seed())
        .with_options(quick("map-composition"))
        .unwrap()
        .check(|seed| {
            let tree = nat().run(Size(50), seed, 0);
            let twice = tree.clone().map(|x| x + 1).map(|x| x * 3);
            let once = tree.map(|x| (x + 1) * 3);
            prefix(&twice) == prefix(&once)
        });

    assert_holds(result);
}

/// Property: every node of a nat tree is smaller than its parent
pub fn test_shrinks_move_towards_zero() {
    fn descending(tree: &Tree<i64>, depth: usize) -> bool {
        depth == 0
            || tree
                .children()
                .all(|child| (0..tree.value).contains(&child.value) && descending(&child, depth - 1))
    }

    let result = given(arbitrary_seed())
        .with_options(quick("descending"))
        .unwrap()
        .check(|seed| descending(&nat().run(Size(100), seed, 0), 3));

    assert_holds(result);
}

/// Property: expand adds shrinks after the ones a tree already has
pub fn test_expand_keeps_existing_children() {
    let result = given(nat())
        .with_options(quick("expand"))
        .unwrap()
        .check(|x| {
            let base = Tree::with_children(x, vec![Tree::singleton(-1)]);
            let expanded = base.expand(|&v| towards_integral(0, v));
            let children: Vec<_> = expanded.children().map(|child| child.value).collect();

            let mut expected = vec![-1];
            expected.extend(towards_integral(0, x));
            children == expected
        });

    assert_holds(result);
}

pub fn test_render_shows_root_first() {
    let tree = Tree::unfold(4_i64, |&x| towards_integral(0, x));
    let rendered = tree.render(1);
    let mut lines = rendered.lines();

    assert_eq!(lines.next(), Some("└── 4"));
    assert_eq!(lines.count(), 3);
    assert!(tree.render_compact(1).starts_with("4["));
}
