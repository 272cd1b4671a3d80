//! bramble property-based testing library.
//!
//! This is the main entry point for bramble, re-exporting the engine from
//! `bramble-core`.
//!
//! ```
//! use bramble::*;
//!
//! let small = Gen::from_fn(|size, seed| {
//!     seed.next_int(IntRange::new(0, size.get() as i64).unwrap())
//! })
//! .shrink_recursively(|&x| towards_integral(0, x));
//!
//! let result = given(small)
//!     .with_options(CheckOverrides::new().seed(Seed::from_key("docs")))
//!     .unwrap()
//!     .check(|x| x < 1_000);
//! assert!(result.is_pass());
//! ```

pub use bramble_core::*;
