//! Shrink sequences for numbers.
//!
//! These produce the candidates a number generator attaches with
//! [`Gen::shrink`](crate::Gen::shrink) or
//! [`Gen::shrink_recursively`](crate::Gen::shrink_recursively): the
//! destination first, then values closing in on the original by halving the
//! remaining distance.

use std::iter;

/// Shrink an integer towards `destination`.
///
/// Yields nothing when `x == destination`.
///
/// ```
/// use bramble_core::towards_integral;
///
/// assert_eq!(towards_integral(0, 10).collect::<Vec<_>>(), vec![0, 5, 8, 9]);
/// ```
pub fn towards_integral(destination: i64, x: i64) -> impl Iterator<Item = i64> {
    let origin = i128::from(x);
    let distance = origin - i128::from(destination);

    iter::successors(Some(distance), |half| Some(half / 2))
        .take_while(|half| *half != 0)
        // Always between destination and x, so it fits back into an i64.
        .map(move |half| (origin - half) as i64)
}

/// Shrink a floating point number towards `destination`.
///
/// Yields the destination, then keeps halving the distance for as long as the
/// step is at least one. Yields nothing when `x == destination` or the
/// distance is not finite.
pub fn towards_num(destination: f64, x: f64) -> impl Iterator<Item = f64> {
    let distance = x - destination;
    let first = (distance != 0.0 && distance.is_finite()).then_some(distance);

    iter::successors(first, |half| Some(half / 2.0))
        .enumerate()
        .take_while(|(index, half)| *index == 0 || half.abs() >= 1.0)
        .map(move |(_, half)| x - half)
}
