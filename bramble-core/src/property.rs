//! Checking properties and shrinking their counterexamples.
//!
//! [`given`] pairs generators with options; [`Runner::check`] runs a property
//! over many generated argument tuples and stops at the first failure, and
//! [`shrink`] searches a failure's shrink trees for a smaller failing tuple.

use crate::args::{Arguments, Generators};
use crate::{data::*, error::*, seed::Seed};
use std::any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// The outcome of evaluating a property once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The property held.
    Pass,
    /// The property returned a failing value.
    Fail,
    /// The property panicked or returned an error.
    Error(PropertyError),
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn is_failure(&self) -> bool {
        !self.is_pass()
    }
}

/// Values a property may return.
///
/// `()` always passes, so properties written with `assert!` only fail by
/// panicking. `bool` fails on `false`, `Result` fails on `Err`, and
/// `Option<bool>` treats `None` as "nothing to say" and passes.
pub trait Testable {
    fn outcome(self) -> Outcome;
}

impl Testable for Outcome {
    fn outcome(self) -> Outcome {
        self
    }
}

impl Testable for () {
    fn outcome(self) -> Outcome {
        Outcome::Pass
    }
}

impl Testable for bool {
    fn outcome(self) -> Outcome {
        if self {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }
}

impl Testable for Option<bool> {
    fn outcome(self) -> Outcome {
        self.map_or(Outcome::Pass, Testable::outcome)
    }
}

impl<T, E: fmt::Display> Testable for std::result::Result<T, E> {
    fn outcome(self) -> Outcome {
        match self {
            Ok(_) => Outcome::Pass,
            Err(error) => Outcome::Error(PropertyError::Returned(error.to_string())),
        }
    }
}

/// Evaluate a property once, catching panics as failures.
///
/// The panic hook is muted on this thread while the property runs, so
/// expected failures do not print a panic report each time.
pub fn evaluate<A, P, R>(property: &P, args: A) -> Outcome
where
    P: Fn(A) -> R,
    R: Testable,
{
    let caught =
        hook::silent(|| panic::catch_unwind(AssertUnwindSafe(|| property(args).outcome())));
    match caught {
        Ok(outcome) => outcome,
        Err(payload) => Outcome::Error(PropertyError::from_panic(payload)),
    }
}

mod hook {
    use std::cell::Cell;
    use std::panic;
    use std::sync::Once;

    thread_local! {
        static SILENT: Cell<bool> = const { Cell::new(false) };
    }

    static INSTALL: Once = Once::new();

    /// Wrap the current panic hook, once per process, in one that stays
    /// quiet on threads inside [`silent`].
    fn install() {
        INSTALL.call_once(|| {
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if !silenced() {
                    previous(info);
                }
            }));
        });
    }

    pub(super) fn silenced() -> bool {
        SILENT.with(Cell::get)
    }

    /// Run `function` with panic reports muted on this thread.
    ///
    /// `function` must not unwind; callers pass a `catch_unwind`.
    pub(super) fn silent<O>(function: impl FnOnce() -> O) -> O {
        install();
        let outer = SILENT.with(|cell| cell.replace(true));
        let output = function();
        SILENT.with(|cell| cell.set(outer));
        output
    }
}

/// The result of [`Runner::check`].
#[derive(Debug, Clone)]
pub enum CheckResult<Trees> {
    /// Every iteration passed.
    Pass {
        name: String,
        /// Last iteration reached.
        iteration: usize,
        /// Size of the last iteration.
        size: Size,
    },

    /// An iteration failed; the run stopped there.
    Failure {
        name: String,
        /// Every argument's shrink tree, ready for [`shrink`].
        args: Trees,
        /// The seed the failing iteration started from.
        seed: Seed,
        iteration: usize,
        size: Size,
        /// The panic or returned error, if the property did not just return `false`.
        error: Option<PropertyError>,
    },
}

impl<Trees> CheckResult<Trees> {
    pub fn is_pass(&self) -> bool {
        matches!(self, CheckResult::Pass { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CheckResult::Failure { .. })
    }

    pub fn name(&self) -> &str {
        match self {
            CheckResult::Pass { name, .. } | CheckResult::Failure { name, .. } => name,
        }
    }

    /// The failing arguments' trees, if the check failed.
    pub fn failing_args(&self) -> Option<&Trees> {
        match self {
            CheckResult::Pass { .. } => None,
            CheckResult::Failure { args, .. } => Some(args),
        }
    }

    /// Overrides that replay exactly the failing iteration.
    pub fn reproduction(&self) -> Option<CheckOverrides> {
        match self {
            CheckResult::Pass { .. } => None,
            CheckResult::Failure {
                seed,
                iteration,
                size,
                ..
            } => Some(
                CheckOverrides::new()
                    .seed(*seed)
                    .start_iteration(*iteration)
                    .iterations(*iteration)
                    .start_size(size.get())
                    .max_size(size.get()),
            ),
        }
    }
}

impl<Trees> fmt::Display for CheckResult<Trees>
where
    Trees: Arguments,
    Trees::Values: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckResult::Pass {
                name, iteration, ..
            } => write!(f, "  ✓ {name} passed {iteration} iterations."),
            CheckResult::Failure {
                name,
                args,
                seed,
                iteration,
                size,
                error,
            } => {
                writeln!(f, "  ✗ {name} failed at iteration {iteration}.")?;
                writeln!(f, "    {seed}, {size}")?;
                if let Some(error) = error {
                    writeln!(f, "    === {error} ===")?;
                }
                write!(f, "    Counterexample: {:?}", args.values())
            }
        }
    }
}

/// The result of [`shrink`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShrinkResult<Values> {
    /// Property evaluations performed.
    pub shrinks: usize,
    /// The smallest argument tuple found that still fails.
    pub smallest_failing_args: Values,
}

impl<Values: fmt::Debug> fmt::Display for ShrinkResult<Values> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "    Minimal counterexample: {:?} ({} shrinks)",
            self.smallest_failing_args, self.shrinks
        )
    }
}

/// Generators plus the options to check a property with.
pub struct Runner<G> {
    generators: G,
    options: CheckOptions,
    name: Option<String>,
}

/// Start checking a property over the given generators.
///
/// Pass a single [`Gen`](crate::Gen) for a one-argument property, or a tuple
/// of generators for several arguments.
pub fn given<G: Generators>(generators: G) -> Runner<G> {
    Runner {
        generators,
        options: CheckOptions::default(),
        name: None,
    }
}

impl<G: Generators> Runner<G> {
    /// Override some of the options, keeping the rest.
    pub fn with_options(self, overrides: CheckOverrides) -> Result<Self> {
        let options = self.options.merge(&overrides)?;
        Ok(Runner { options, ..self })
    }

    /// Label the property in results. Defaults to the property's type name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Run the property from `start_iteration` to `iterations`, stopping at
    /// the first failure.
    pub fn check<P, R>(&self, property: P) -> CheckResult<G::Trees>
    where
        P: Fn(<G::Trees as Arguments>::Values) -> R,
        R: Testable,
    {
        let options = &self.options;
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| any::type_name::<P>().to_string());

        log::debug!(
            "checking {name}: iterations {}..={}, sizes {}..={}, {}",
            options.start_iteration,
            options.iterations,
            options.start_size,
            options.max_size,
            options.seed
        );

        let mut seed = options.seed;
        let mut last_size = options.size_at(options.start_iteration);

        for iteration in options.start_iteration..=options.iterations {
            let size = options.size_at(iteration);
            let snapshot = seed;
            let (args, rest) = self.generators.run(size, seed, iteration - 1);
            seed = rest;
            last_size = size;

            log::trace!("{name}: iteration {iteration} at {size}");

            let error = match evaluate(&property, args.values()) {
                Outcome::Pass => continue,
                Outcome::Fail => None,
                Outcome::Error(error) => Some(error),
            };

            log::debug!("{name} failed at iteration {iteration} ({snapshot}, {size})");
            return CheckResult::Failure {
                name,
                args,
                seed: snapshot,
                iteration,
                size,
                error,
            };
        }

        log::debug!("{name} passed");
        CheckResult::Pass {
            name,
            iteration: options.iterations,
            size: last_size,
        }
    }
}

/// Search for a smaller argument tuple that still fails `property`.
///
/// Arguments are shrunk left to right. For each one the children of its
/// tree are tried in order with every other argument held at its current
/// value; the first that still fails is accepted and its own children are
/// searched next, while a passing candidate moves on to its next sibling.
/// The search for an argument ends when no candidate fails any more or its
/// budget runs out, and the whole search ends when `max_shrinks` does. The
/// result holds the best tuple found and the exact number of evaluations.
pub fn shrink<A, P, R>(property: P, args: A, options: ShrinkOptions) -> ShrinkResult<A::Values>
where
    A: Arguments,
    P: Fn(A::Values) -> R,
    R: Testable,
{
    let mut current = args;
    let mut shrinks = 0;

    'arguments: for index in 0..A::ARITY {
        let mut spent = 0;
        let mut candidates = current.candidates(index);

        while let Some(candidate) = candidates.next() {
            if options.max_shrinks.is_some_and(|max| shrinks >= max) {
                log::debug!("shrink budget of {shrinks} evaluations exhausted");
                break 'arguments;
            }
            if spent >= options.max_shrinks_per_argument {
                log::trace!("argument {index} budget exhausted");
                break;
            }

            shrinks += 1;
            spent += 1;

            if evaluate(&property, candidate.values()).is_failure() {
                log::trace!("argument {index}: accepted a smaller failure after {shrinks} evaluations");
                candidates = candidate.candidates(index);
                current = candidate;
            }
        }
    }

    log::debug!("shrinking finished after {shrinks} evaluations");
    ShrinkResult {
        shrinks,
        smallest_failing_args: current.values(),
    }
}
