//! Lazy rose trees holding a generated value and its shrinks.
//!
//! A [`Tree`] has a strict root value and a lazily produced, possibly
//! infinite, ordered sequence of children. Each child is a simpler candidate
//! for the root, and its own children are simpler still.
//!
//! # Children are recomputed on every traversal
//!
//! The children of a node are **not memoized**. Every call to
//! [`Tree::children`] (and therefore every iteration, render or shrink pass)
//! re-runs the closure that derives them. If a generator's derivation has an
//! observable side effect, that side effect happens again on each traversal.
//! This keeps trees cheap to build and lets them be infinite, and it is part
//! of the contract: do not rely on a child sequence being produced only once.

use std::collections::VecDeque;
use std::fmt;
use std::iter;
use std::rc::Rc;

pub mod render;

/// A lazily produced sequence of child trees.
pub type Children<T> = Box<dyn Iterator<Item = Tree<T>>>;

type Forest<T> = Rc<dyn Fn() -> Children<T>>;
type Unfolder<T> = Rc<dyn Fn(&T) -> Box<dyn Iterator<Item = T>>>;

/// A rose tree containing a value and its shrink possibilities.
///
/// Trees are used to represent generated values along with their
/// possible shrinks, enabling automatic shrinking of failing test cases.
/// Cloning a tree is cheap: the child forest is shared, not copied.
pub struct Tree<T> {
    pub value: T,
    forest: Forest<T>,
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Tree {
            value: self.value.clone(),
            forest: Rc::clone(&self.forest),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Tree<T> {
    /// Create a new tree with the given value and no children.
    pub fn singleton(value: T) -> Self {
        Tree {
            value,
            forest: Rc::new(|| -> Children<T> { Box::new(iter::empty()) }),
        }
    }

    /// Create a tree whose children are produced by `forest` on each traversal.
    pub fn from_forest<F, I>(value: T, forest: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = Tree<T>>,
        I::IntoIter: 'static,
    {
        Tree {
            value,
            forest: Rc::new(move || -> Children<T> { Box::new(forest().into_iter()) }),
        }
    }

    /// Create a new tree with the given value and a finite list of children.
    pub fn with_children(value: T, children: Vec<Tree<T>>) -> Self
    where
        T: Clone,
    {
        Tree::from_forest(value, move || children.clone())
    }

    /// Build a tree by repeatedly applying `f` to produce each node's children.
    ///
    /// If `f` never returns an empty sequence the tree is infinite; it is
    /// still only expanded as far as it is traversed.
    pub fn unfold<F, I>(value: T, f: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Tree::unfold_with(value, unfolder(f))
    }

    /// The children an [`unfold`](Tree::unfold) of `value` would have.
    pub fn unfold_forest<F, I>(value: &T, f: F) -> Children<T>
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Tree::unfold_forest_with(value, unfolder(f))
    }

    fn unfold_with(value: T, f: Unfolder<T>) -> Self
    where
        T: Clone,
    {
        let root = value.clone();
        Tree {
            value,
            forest: Rc::new(move || Tree::unfold_forest_with(&root, Rc::clone(&f))),
        }
    }

    fn unfold_forest_with(value: &T, f: Unfolder<T>) -> Children<T>
    where
        T: Clone,
    {
        let next = Rc::clone(&f);
        Box::new(f(value).map(move |child| Tree::unfold_with(child, Rc::clone(&next))))
    }

    /// Produce this node's children. Re-evaluated on every call.
    pub fn children(&self) -> Children<T> {
        (self.forest)()
    }

    /// Check if the tree has any children (shrinks).
    ///
    /// Forces the first child, if any.
    pub fn has_shrinks(&self) -> bool {
        self.children().next().is_some()
    }

    /// Discard all children, keeping only the root.
    pub fn prune(self) -> Self {
        Tree::singleton(self.value)
    }

    /// Map a function over the tree values.
    ///
    /// Strict at the root, lazy over the children.
    pub fn map<U, F>(self, f: F) -> Tree<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_with(Rc::new(f))
    }

    fn map_with<U, F>(self, f: Rc<F>) -> Tree<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let Tree { value, forest } = self;
        Tree {
            value: f(value),
            forest: Rc::new(move || -> Children<U> {
                let f = Rc::clone(&f);
                Box::new(forest().map(move |child| child.map_with(Rc::clone(&f))))
            }),
        }
    }

    /// Monadic bind.
    ///
    /// The root becomes `f(root)`'s root. The children are this tree's
    /// children, each bound through `f` again, followed by `f(root)`'s own
    /// children. This is how two generators' shrinks are combined in sequence:
    /// the outer value shrinks first, then the inner one.
    pub fn concat_map<U, F>(self, f: F) -> Tree<U>
    where
        U: 'static,
        F: Fn(T) -> Tree<U> + 'static,
    {
        self.concat_map_with(Rc::new(f))
    }

    fn concat_map_with<U, F>(self, f: Rc<F>) -> Tree<U>
    where
        U: 'static,
        F: Fn(T) -> Tree<U> + 'static,
    {
        let Tree { value, forest } = self;
        let Tree {
            value: bound,
            forest: bound_forest,
        } = f(value);

        Tree {
            value: bound,
            forest: Rc::new(move || -> Children<U> {
                let f = Rc::clone(&f);
                Box::new(
                    forest()
                        .map(move |child| child.concat_map_with(Rc::clone(&f)))
                        .chain(bound_forest()),
                )
            }),
        }
    }

    /// Apply `f` at every depth.
    ///
    /// Each existing child is expanded recursively, then the forest unfolded
    /// from the current node's value is appended after them.
    pub fn expand<F, I>(self, f: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        self.expand_with(unfolder(f))
    }

    fn expand_with(self, f: Unfolder<T>) -> Self
    where
        T: Clone,
    {
        let Tree { value, forest } = self;
        let root = value.clone();
        Tree {
            value,
            forest: Rc::new(move || -> Children<T> {
                let inner = Rc::clone(&f);
                Box::new(
                    forest()
                        .map(move |child| child.expand_with(Rc::clone(&inner)))
                        .chain(Tree::unfold_forest_with(&root, Rc::clone(&f))),
                )
            }),
        }
    }

    /// Keep the tree only if its root satisfies the predicate, dropping
    /// every child (and its subtree) that does not.
    pub fn filter<F>(self, predicate: F) -> Option<Tree<T>>
    where
        F: Fn(&T) -> bool + 'static,
    {
        if !predicate(&self.value) {
            return None;
        }
        Some(self.filter_with(Rc::new(predicate)))
    }

    fn filter_with<F>(self, predicate: Rc<F>) -> Tree<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let Tree { value, forest } = self;
        Tree {
            value,
            forest: Rc::new(move || -> Children<T> {
                let keep = Rc::clone(&predicate);
                let descend = Rc::clone(&predicate);
                Box::new(
                    forest()
                        .filter(move |child| keep(&child.value))
                        .map(move |child| child.filter_with(Rc::clone(&descend))),
                )
            }),
        }
    }

    /// Values in depth-first order: the root, then each child's full
    /// depth-first sequence in turn.
    pub fn iter_depth_first(&self) -> DepthFirst<T>
    where
        T: Clone,
    {
        DepthFirst {
            root: Some(self.value.clone()),
            stack: vec![self.children()],
        }
    }

    /// Values in level order.
    ///
    /// Only one child is pulled at a time, so this makes progress even when
    /// a node has infinitely many children.
    pub fn iter_breadth_first(&self) -> BreadthFirst<T>
    where
        T: Clone,
    {
        BreadthFirst {
            root: Some(self.value.clone()),
            queue: VecDeque::from([self.children()]),
        }
    }
}

impl<T: 'static> From<T> for Tree<T> {
    fn from(value: T) -> Self {
        Tree::singleton(value)
    }
}

fn unfolder<T, F, I>(f: F) -> Unfolder<T>
where
    T: 'static,
    F: Fn(&T) -> I + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'static,
{
    Rc::new(move |value: &T| Box::new(f(value).into_iter()) as Box<dyn Iterator<Item = T>>)
}

/// Depth-first iterator over a tree's values. See [`Tree::iter_depth_first`].
pub struct DepthFirst<T> {
    root: Option<T>,
    stack: Vec<Children<T>>,
}

impl<T: 'static> Iterator for DepthFirst<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(root) = self.root.take() {
            return Some(root);
        }
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(child) => {
                    self.stack.push(child.children());
                    return Some(child.value);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Breadth-first iterator over a tree's values. See [`Tree::iter_breadth_first`].
pub struct BreadthFirst<T> {
    root: Option<T>,
    queue: VecDeque<Children<T>>,
}

impl<T: 'static> Iterator for BreadthFirst<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(root) = self.root.take() {
            return Some(root);
        }
        loop {
            let front = self.queue.front_mut()?;
            match front.next() {
                Some(child) => {
                    self.queue.push_back(child.children());
                    return Some(child.value);
                }
                None => {
                    self.queue.pop_front();
                }
            }
        }
    }
}
