//! Core data types: the size hint and the runner's configuration.

use crate::error::{Error, Result};
use crate::seed::Seed;
use std::fmt;

/// Size parameter for controlling test data generation.
///
/// Size is a hint threaded through generators; what "large" means is up to
/// each generator. The runner ramps it from `start_size` to `max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Size(pub usize);

impl Size {
    /// Create a new size value.
    pub fn new(value: usize) -> Self {
        Size(value)
    }

    /// Get the inner size value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl From<usize> for Size {
    fn from(value: usize) -> Self {
        Size(value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// Configuration for a property check.
///
/// Built through [`Default`] and the `with_*` methods, or by merging a
/// [`CheckOverrides`] onto an existing value. [`CheckOptions::validate`] is
/// run by every entry point that accepts options.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOptions {
    /// Last iteration to run (inclusive). Defaults to 100.
    pub iterations: usize,

    /// First iteration to run, counted from 1. Defaults to 1.
    pub start_iteration: usize,

    /// Size used for the first iteration. Defaults to 0.
    pub start_size: usize,

    /// Size reached by the penultimate iteration. Defaults to 100.
    pub max_size: usize,

    /// Seed for the first iteration. Defaults to a random seed.
    pub seed: Seed,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            iterations: 100,
            start_iteration: 1,
            start_size: 0,
            max_size: 100,
            seed: Seed::random(),
        }
    }
}

impl CheckOptions {
    /// Run up to the given iteration.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Start counting from the given iteration.
    pub fn with_start_iteration(mut self, start_iteration: usize) -> Self {
        self.start_iteration = start_iteration;
        self
    }

    /// Size of the first iteration.
    pub fn with_start_size(mut self, start_size: usize) -> Self {
        self.start_size = start_size;
        self
    }

    /// Size reached by the end of the run.
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Use a fixed seed.
    pub fn with_seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Reject option combinations the runner cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::config("iterations must be positive"));
        }
        if self.start_iteration == 0 {
            return Err(Error::config("start_iteration must be at least 1"));
        }
        if self.max_size < self.start_size {
            return Err(Error::config(format!(
                "max_size ({}) must not be less than start_size ({})",
                self.max_size, self.start_size
            )));
        }
        Ok(())
    }

    /// The size handed to generators at `iteration`.
    ///
    /// Grows linearly from `start_size` at `start_iteration` and reaches
    /// `max_size` on the penultimate iteration, staying there for the last.
    pub fn size_at(&self, iteration: usize) -> Size {
        let span = self.max_size.saturating_sub(self.start_size) as u128;
        let steps = self
            .iterations
            .saturating_sub(1)
            .saturating_sub(self.start_iteration) as u128;
        let elapsed = iteration.saturating_sub(self.start_iteration) as u128;

        let grown = match (steps, elapsed) {
            (_, 0) => 0,
            (0, _) => span,
            _ => (span * elapsed / steps).min(span),
        };
        // grown <= span, which came from a usize.
        Size(self.start_size + grown as usize)
    }

    /// Apply `overrides` on top of these options and validate the result.
    pub fn merge(&self, overrides: &CheckOverrides) -> Result<CheckOptions> {
        let merged = CheckOptions {
            iterations: overrides.iterations.unwrap_or(self.iterations),
            start_iteration: overrides.start_iteration.unwrap_or(self.start_iteration),
            start_size: overrides.start_size.unwrap_or(self.start_size),
            max_size: overrides.max_size.unwrap_or(self.max_size),
            seed: overrides.seed.unwrap_or(self.seed),
        };
        merged.validate()?;
        Ok(merged)
    }
}

/// A partial set of [`CheckOptions`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckOverrides {
    pub iterations: Option<usize>,
    pub start_iteration: Option<usize>,
    pub start_size: Option<usize>,
    pub max_size: Option<usize>,
    pub seed: Option<Seed>,
}

impl CheckOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    pub fn start_iteration(mut self, start_iteration: usize) -> Self {
        self.start_iteration = Some(start_iteration);
        self
    }

    pub fn start_size(mut self, start_size: usize) -> Self {
        self.start_size = Some(start_size);
        self
    }

    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Budgets for the shrink search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkOptions {
    /// Total property evaluations allowed. `None` means unlimited, the default.
    pub max_shrinks: Option<usize>,

    /// Property evaluations allowed for each argument. Defaults to 100.
    pub max_shrinks_per_argument: usize,
}

impl Default for ShrinkOptions {
    fn default() -> Self {
        ShrinkOptions {
            max_shrinks: None,
            max_shrinks_per_argument: 100,
        }
    }
}

impl ShrinkOptions {
    /// Cap the total number of evaluations.
    pub fn with_max_shrinks(mut self, max_shrinks: usize) -> Self {
        self.max_shrinks = Some(max_shrinks);
        self
    }

    /// Cap the number of evaluations spent on each argument.
    pub fn with_max_shrinks_per_argument(mut self, max_shrinks: usize) -> Self {
        self.max_shrinks_per_argument = max_shrinks;
        self
    }
}
