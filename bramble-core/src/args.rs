//! Property arguments: generators and shrink trees, one per argument.
//!
//! A property with several arguments is checked against a tuple of
//! generators, which produces a tuple of trees. The runner evaluates the
//! property on the tuple of root values and shrinks one position at a time.
//! A lone [`Gen`] works as a single argument without wrapping it in a tuple.

use crate::{data::Size, gen::Gen, seed::Seed, tree::Tree};
use std::iter;

/// The generators for a property's arguments.
pub trait Generators: 'static {
    /// One tree per argument.
    type Trees: Arguments;

    /// Run every generator, splitting `seed` once per argument so each gets
    /// its own stream. Returns the trees and the seed left over.
    fn run(&self, size: Size, seed: Seed, iteration: usize) -> (Self::Trees, Seed);
}

/// The shrink trees of a property's arguments.
pub trait Arguments: Clone + 'static {
    /// The root values handed to the property.
    type Values: Clone;

    /// Number of arguments.
    const ARITY: usize;

    /// The current root values.
    fn values(&self) -> Self::Values;

    /// Copies of these arguments with the tree at `index` replaced by each of
    /// its children in turn, every other argument unchanged.
    fn candidates(&self, index: usize) -> Box<dyn Iterator<Item = Self>>;
}

impl<T: Clone + 'static> Generators for Gen<T> {
    type Trees = Tree<T>;

    fn run(&self, size: Size, seed: Seed, iteration: usize) -> (Self::Trees, Seed) {
        let (here, rest) = seed.split();
        (Gen::run(self, size, here, iteration), rest)
    }
}

impl<T: Clone + 'static> Arguments for Tree<T> {
    type Values = T;

    const ARITY: usize = 1;

    fn values(&self) -> T {
        self.value.clone()
    }

    fn candidates(&self, index: usize) -> Box<dyn Iterator<Item = Self>> {
        match index {
            0 => self.children(),
            _ => Box::new(iter::empty()),
        }
    }
}

macro_rules! tuples {
    ($m:ident) => {
        $m!(1; T0 0);
        $m!(2; T0 0, T1 1);
        $m!(3; T0 0, T1 1, T2 2);
        $m!(4; T0 0, T1 1, T2 2, T3 3);
        $m!(5; T0 0, T1 1, T2 2, T3 3, T4 4);
        $m!(6; T0 0, T1 1, T2 2, T3 3, T4 4, T5 5);
        $m!(7; T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6);
        $m!(8; T0 0, T1 1, T2 2, T3 3, T4 4, T5 5, T6 6, T7 7);
    };
}

macro_rules! arguments {
    ($arity:expr; $($t:ident $i:tt),+) => {
        impl<$($t: Clone + 'static),+> Generators for ($(Gen<$t>,)+) {
            type Trees = ($(Tree<$t>,)+);

            fn run(&self, size: Size, seed: Seed, iteration: usize) -> (Self::Trees, Seed) {
                let mut seed = seed;
                let trees = ($({
                    let (here, rest) = seed.split();
                    seed = rest;
                    self.$i.run(size, here, iteration)
                },)+);
                (trees, seed)
            }
        }

        impl<$($t: Clone + 'static),+> Arguments for ($(Tree<$t>,)+) {
            type Values = ($($t,)+);

            const ARITY: usize = $arity;

            fn values(&self) -> Self::Values {
                ($(self.$i.value.clone(),)+)
            }

            fn candidates(&self, index: usize) -> Box<dyn Iterator<Item = Self>> {
                match index {
                    $($i => {
                        let current = self.clone();
                        Box::new(self.$i.children().map(move |child| {
                            let mut next = current.clone();
                            next.$i = child;
                            next
                        }))
                    })+
                    _ => Box::new(iter::empty()),
                }
            }
        }
    };
}

tuples!(arguments);
