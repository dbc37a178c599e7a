//! Trial-division primality classification.

/// Outcome of classifying a single grid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Prime,
    Composite,
}

impl Classification {
    pub fn is_prime(self) -> bool {
        matches!(self, Self::Prime)
    }
}

/// Classify `n` by trial division.
///
/// Values below 2 are composite. Otherwise `n` is prime when no `i` in
/// `2..=floor(sqrt(n))` divides it.
///
/// # Examples
///
/// ```
/// # use erato_core::primality::{Classification, classify};
/// assert_eq!(classify(2), Classification::Prime);
/// assert_eq!(classify(4), Classification::Composite);
/// assert_eq!(classify(17), Classification::Prime);
/// assert_eq!(classify(1), Classification::Composite);
/// ```
pub fn classify(n: u32) -> Classification {
    if n < 2 {
        return Classification::Composite;
    }

    let n = u64::from(n);
    let mut divisor = 2u64;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return Classification::Composite;
        }
        divisor += 1;
    }

    Classification::Prime
}
