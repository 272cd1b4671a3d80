//! Generator combinators for property-based testing.

use crate::{data::*, error::*, seed::Seed, tree::*};
use std::rc::Rc;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values that can be composed
/// using combinator functions. A generator is nothing more than a pure
/// mapping from a size hint, a seed and a 0-based iteration counter to a
/// shrink [`Tree`]; combinators never change an existing generator, they
/// return a new one.
pub struct Gen<T> {
    generator: Rc<dyn Fn(Size, Seed, usize) -> Tree<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            generator: Rc::clone(&self.generator),
        }
    }
}

impl<T: 'static> Gen<T> {
    /// Create a new generator from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Size, Seed, usize) -> Tree<T> + 'static,
    {
        Gen {
            generator: Rc::new(f),
        }
    }

    /// Produce a shrink tree for the given size, seed and iteration.
    pub fn run(&self, size: Size, seed: Seed, iteration: usize) -> Tree<T> {
        (self.generator)(size, seed, iteration)
    }

    /// Generate a value at iteration 0.
    pub fn generate(&self, size: Size, seed: Seed) -> Tree<T> {
        self.run(size, seed, 0)
    }

    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Gen::new(move |_size, _seed, _iteration| Tree::singleton(value.clone()))
    }

    /// A generator computing one value from the size and seed, with no shrinks.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Size, Seed) -> T + 'static,
    {
        Gen::new(move |size, seed, _iteration| Tree::singleton(f(size, seed)))
    }

    /// Choose the generator to run based on the size.
    pub fn sized<F>(f: F) -> Self
    where
        F: Fn(Size) -> Gen<T> + 'static,
    {
        Gen::new(move |size, seed, iteration| f(size).run(size, seed, iteration))
    }

    /// Run the generator at the position of the iteration counter, sticking
    /// with the last one once the counter runs past the end.
    ///
    /// Putting fixed cases first guarantees they are each generated exactly
    /// once at the start of a run.
    pub fn sequence(generators: Vec<Gen<T>>) -> Result<Self> {
        if generators.is_empty() {
            return Err(Error::generator("sequence needs at least one generator"));
        }
        let last = generators.len() - 1;
        Ok(Gen::new(move |size, seed, iteration| {
            generators[iteration.min(last)].run(size, seed, iteration)
        }))
    }

    /// Map a function over the generated values.
    ///
    /// Shrinks are mapped along with the value.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + 'static,
        U: 'static,
    {
        let f = Rc::new(f);
        Gen::new(move |size, seed, iteration| {
            let f = Rc::clone(&f);
            self.run(size, seed, iteration).map(move |value| f(value))
        })
    }

    /// Dependent generation.
    ///
    /// The seed is split so that this generator and the one chosen by `f`
    /// draw from independent streams. Shrinks of this generator's value come
    /// first, each re-running `f`, followed by the shrinks of `f`'s value.
    pub fn and_then<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> Gen<U> + 'static,
        U: 'static,
    {
        let f = Rc::new(f);
        Gen::new(move |size, seed, iteration| {
            let (outer, inner) = seed.split();
            let f = Rc::clone(&f);
            self.run(size, outer, iteration)
                .concat_map(move |value| f(value).run(size, inner, iteration))
        })
    }

    /// Generate `count` independently seeded values.
    ///
    /// Only the root values are kept: the resulting tree has no shrinks.
    pub fn repeat(self, count: usize) -> Gen<Vec<T>> {
        Gen::new(move |size, seed, iteration| {
            let mut seed = seed;
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                let (here, rest) = seed.split();
                values.push(self.run(size, here, iteration).value);
                seed = rest;
            }
            Tree::singleton(values)
        })
    }

    /// Ignore the incoming size and use `size` instead.
    pub fn resize(self, size: Size) -> Self {
        Gen::new(move |_size, seed, iteration| self.run(size, seed, iteration))
    }

    /// Recompute the size passed further down.
    pub fn scale<F>(self, f: F) -> Self
    where
        F: Fn(Size) -> Size + 'static,
    {
        Gen::new(move |size, seed, iteration| self.run(f(size), seed, iteration))
    }

    /// Drop every shrink candidate.
    pub fn prune_shrink_tree(self) -> Self {
        Gen::new(move |size, seed, iteration| self.run(size, seed, iteration).prune())
    }

    /// Append `f(value)` to the root's children, as leaves.
    ///
    /// Existing children and their shrinks are left alone, and the new
    /// candidates are not shrunk further. See [`Gen::shrink_recursively`].
    pub fn shrink<F, I>(self, f: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let f = Rc::new(f);
        Gen::new(move |size, seed, iteration| {
            let tree = self.run(size, seed, iteration);
            let f = Rc::clone(&f);
            let root = tree.value.clone();
            Tree::from_forest(root.clone(), move || {
                tree.children()
                    .chain(f(&root).into_iter().map(Tree::singleton))
            })
        })
    }

    /// Apply `f` at every node of the tree, so each shrink candidate is
    /// itself shrunk with `f`.
    pub fn shrink_recursively<F, I>(self, f: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let f = Rc::new(f);
        Gen::new(move |size, seed, iteration| {
            let f = Rc::clone(&f);
            self.run(size, seed, iteration).expand(move |value| f(value))
        })
    }

    /// Look for a value satisfying `predicate`, trying every size from the
    /// current one up to twice it with a fresh seed each time. Yields `None`
    /// when none of them produce one.
    ///
    /// Shrinks of a found value are filtered by the predicate too.
    pub fn such_that_maybe<F>(self, predicate: F) -> Gen<Option<T>>
    where
        T: Clone,
        F: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        Gen::new(move |size, seed, iteration| {
            match search(&self, &predicate, size, seed, iteration) {
                Ok(found) => found.map(Some),
                Err(_) => {
                    log::trace!("such_that_maybe found nothing between {size} and double it");
                    Tree::singleton(None)
                }
            }
        })
    }

    /// Like [`Gen::such_that_maybe`] but keeps searching at ever larger sizes
    /// instead of giving up.
    ///
    /// Never returns if the predicate cannot be satisfied.
    pub fn such_that<F>(self, predicate: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        Gen::new(move |size, seed, iteration| {
            let mut size = size;
            let mut seed = seed;
            loop {
                match search(&self, &predicate, size, seed, iteration) {
                    Ok(found) => return found,
                    Err(rest) => {
                        size = Size(size.get().saturating_add(1));
                        seed = rest;
                    }
                }
            }
        })
    }
}

/// Try sizes `size..=2 * size`; on failure hand back the unused seed.
fn search<T, F>(
    gen: &Gen<T>,
    predicate: &Rc<F>,
    size: Size,
    seed: Seed,
    iteration: usize,
) -> std::result::Result<Tree<T>, Seed>
where
    T: 'static,
    F: Fn(&T) -> bool + 'static,
{
    let mut seed = seed;
    for attempt in size.get()..=size.get().saturating_mul(2) {
        let (here, rest) = seed.split();
        seed = rest;
        let keep = Rc::clone(predicate);
        if let Some(found) = gen
            .run(Size(attempt), here, iteration)
            .filter(move |value| keep(value))
        {
            return Ok(found);
        }
    }
    Err(seed)
}
