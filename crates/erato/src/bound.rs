//! Validation of the user-supplied sieve bound.
//!
//! The engine assumes a valid bound; everything typed by a user passes
//! through [`parse_bound`] before a grid is built.

use thiserror::Error;

/// Smallest accepted bound.
pub const MIN_BOUND: u32 = 2;

/// Largest accepted bound.
pub const MAX_BOUND: u32 = 5000;

/// Reasons a bound is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundError {
    #[error("Please enter a number!")]
    Empty,

    #[error("`{0}` is not a number. Please enter a whole number!")]
    NotANumber(String),

    #[error("Please enter a number greater than 1!")]
    TooSmall(f64),

    #[error("Please enter a number less than 5000!")]
    TooLarge(f64),

    #[error("Please enter a whole number!")]
    NotWhole(f64),
}

/// Parse and validate a bound typed by a user.
///
/// Checks run in a fixed order: empty, numeric, lower limit, upper limit,
/// then wholeness. So `1.5` is reported as too small, not as fractional.
///
/// # Examples
///
/// ```
/// # use erato::bound::{BoundError, parse_bound};
/// assert_eq!(parse_bound(" 100 "), Ok(100));
/// assert_eq!(parse_bound("5000"), Ok(5000));
/// assert_eq!(parse_bound(""), Err(BoundError::Empty));
/// assert_eq!(parse_bound("3.5"), Err(BoundError::NotWhole(3.5)));
/// ```
pub fn parse_bound(input: &str) -> Result<u32, BoundError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(BoundError::Empty);
    }

    let value: f64 = trimmed
        .parse()
        .ok()
        .filter(|value: &f64| value.is_finite())
        .ok_or_else(|| BoundError::NotANumber(trimmed.to_string()))?;

    if value < f64::from(MIN_BOUND) {
        return Err(BoundError::TooSmall(value));
    }
    if value > f64::from(MAX_BOUND) {
        return Err(BoundError::TooLarge(value));
    }
    if value.fract() != 0.0 {
        return Err(BoundError::NotWhole(value));
    }

    Ok(value as u32)
}
