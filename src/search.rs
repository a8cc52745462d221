//! Inversion of monotone integer predicates.
//!
//! Many of the functions we need to invert (binomial growth in particular)
//! are strictly increasing but have no closed-form inverse. Given a predicate
//! that holds up to some unknown threshold $n^*$ and fails beyond it, we find
//! $n^*$ in two phases:
//!
//! 1. **Galloping**: double the probe distance from `start` until the
//!    predicate first fails. This brackets $n^*$ in $O(\log n^*)$ probes.
//! 2. **Bisection**: binary search inside the bracket.
//!
//! The probe distance is an arbitrary-precision integer; there is no ceiling.

use num_bigint::BigInt;
use num_traits::One;

use crate::error::{Error, Result};

/// Return the largest integer `n >= start` for which `predicate(n)` holds.
///
/// `predicate` must be non-increasing in truth: once it fails, it fails for
/// every larger argument. `predicate(start)` must hold, otherwise
/// [`Error::InvalidPrecondition`] is returned.
///
/// ```
/// use bagrank::search::search_max_satisfying;
/// use num_bigint::BigInt;
///
/// let n = search_max_satisfying(&BigInt::from(0), |n| n * n <= BigInt::from(50)).unwrap();
/// assert_eq!(n, BigInt::from(7));
/// ```
pub fn search_max_satisfying<F>(start: &BigInt, mut predicate: F) -> Result<BigInt>
where
    F: FnMut(&BigInt) -> bool,
{
    if !predicate(start) {
        return Err(Error::InvalidPrecondition);
    }

    // 1. Galloping: [low, high) with predicate(low) true and predicate(high) false.
    let mut low = start.clone();
    let mut distance = BigInt::one();
    let mut high = start + &distance;
    while predicate(&high) {
        low = high;
        distance <<= 1;
        high = start + &distance;
    }

    // 2. Bisection.
    loop {
        let gap: BigInt = &high - &low;
        if gap <= BigInt::one() {
            break;
        }
        let mid = &low + (gap >> 1);
        if predicate(&mid) {
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_square_root() {
        let limit = BigInt::from(50);
        let n = search_max_satisfying(&BigInt::from(0), |n| n * n <= limit).unwrap();
        assert_eq!(n, BigInt::from(7));
    }

    #[test]
    fn test_search_start_is_answer() {
        let n = search_max_satisfying(&BigInt::from(3), |n| *n <= BigInt::from(3)).unwrap();
        assert_eq!(n, BigInt::from(3));
    }

    #[test]
    fn test_search_negative_start() {
        let n = search_max_satisfying(&BigInt::from(-100), |n| *n < BigInt::from(-17)).unwrap();
        assert_eq!(n, BigInt::from(-18));
    }

    #[test]
    fn test_search_rejects_false_start() {
        let err = search_max_satisfying(&BigInt::from(10), |n| *n < BigInt::from(5)).unwrap_err();
        assert_eq!(err, Error::InvalidPrecondition);
    }

    #[test]
    fn test_search_beyond_u64() {
        // Threshold far past any fixed-width integer.
        let threshold: BigInt = BigInt::one() << 200usize;
        let n = search_max_satisfying(&BigInt::from(0), |n| *n <= threshold).unwrap();
        assert_eq!(n, threshold);
    }
}
