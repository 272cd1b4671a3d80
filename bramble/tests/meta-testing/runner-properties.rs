//! Runner properties
//!
//! End-to-end behaviour of `given(..).check(..)`: outcomes, captured panics
//! and errors, reproducing a failure, and the size ramp.

use crate::{int, nat};
use bramble::*;
use std::cell::RefCell;

fn seeded(key: &str) -> CheckOverrides {
    CheckOverrides::new().seed(Seed::from_key(key))
}

pub fn test_passing_property() {
    let result = given((nat(), nat()))
        .with_options(seeded("commutes"))
        .unwrap()
        .named("addition commutes")
        .check(|(a, b)| a + b == b + a);

    match &result {
        CheckResult::Pass { iteration, size, .. } => {
            assert_eq!(*iteration, 100);
            assert_eq!(*size, Size(100));
        }
        other => panic!("Expected pass, got: {other:?}"),
    }
    assert_eq!(result.name(), "addition commutes");
    assert!(result.to_string().contains("✓ addition commutes"));
}

pub fn test_panics_are_failures() {
    let result = given(nat())
        .with_options(seeded("panics"))
        .unwrap()
        .check(|x| assert!(x < 20, "{x} is not below 20"));

    match result {
        CheckResult::Failure {
            args,
            error: Some(PropertyError::Panicked(message)),
            ..
        } => assert_eq!(message, format!("{} is not below 20", args.value)),
        other => panic!("Expected a captured panic, got: {other:?}"),
    }
}

pub fn test_errors_are_failures() {
    let result = given(int(100))
        .with_options(seeded("errors"))
        .unwrap()
        .check(|x| if x > 50 { Err("too large") } else { Ok(x) });

    match result {
        CheckResult::Failure {
            args,
            error: Some(PropertyError::Returned(message)),
            ..
        } => {
            assert!(args.value > 50);
            assert_eq!(message, "too large");
        }
        other => panic!("Expected a returned error, got: {other:?}"),
    }
}

/// Re-running with a failure's reproduction overrides runs exactly that
/// iteration again and fails with the same arguments.
pub fn test_failure_reproduces() {
    let runner = given((nat(), nat())).with_options(seeded("repro")).unwrap();
    let failure = runner.check(|(a, b)| a + b < 60);
    let (first, second) = match failure.failing_args() {
        Some((a, b)) => (a.value, b.value),
        None => panic!("Expected a failure, got: {failure:?}"),
    };

    let overrides = failure.reproduction().unwrap();
    let calls = RefCell::new(0);
    let replay = given((nat(), nat()))
        .with_options(overrides)
        .unwrap()
        .check(|(a, b)| {
            *calls.borrow_mut() += 1;
            a + b < 60
        });

    assert_eq!(*calls.borrow(), 1);
    match (&failure, &replay) {
        (
            CheckResult::Failure {
                seed, iteration, size, ..
            },
            CheckResult::Failure {
                args: (a, b),
                seed: replay_seed,
                iteration: replay_iteration,
                size: replay_size,
                ..
            },
        ) => {
            assert_eq!((a.value, b.value), (first, second));
            assert_eq!(seed, replay_seed);
            assert_eq!(iteration, replay_iteration);
            assert_eq!(size, replay_size);
        }
        other => panic!("Expected the replay to fail too, got: {other:?}"),
    }
}

pub fn test_runs_are_deterministic() {
    let run = || {
        given(nat())
            .with_options(seeded("same").iterations(40))
            .unwrap()
            .check(|x| x % 7 != 6)
    };

    match (run(), run()) {
        (
            CheckResult::Failure { args: a, iteration: i, .. },
            CheckResult::Failure { args: b, iteration: j, .. },
        ) => {
            assert_eq!(a.value, b.value);
            assert_eq!(i, j);
        }
        (CheckResult::Pass { .. }, CheckResult::Pass { .. }) => {}
        other => panic!("Runs disagree: {other:?}"),
    }
}

/// Sizes grow from start_size and reach max_size on the penultimate iteration
pub fn test_size_ramp_is_observed() {
    let sizes = RefCell::new(Vec::new());
    let observe = Gen::from_fn(|size: Size, _seed| size);
    let result = given(observe)
        .with_options(
            seeded("ramp")
                .iterations(11)
                .start_size(10)
                .max_size(19),
        )
        .unwrap()
        .check(|size| sizes.borrow_mut().push(size.get()));

    assert!(result.is_pass());
    assert_eq!(
        *sizes.borrow(),
        vec![10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 19]
    );
}
