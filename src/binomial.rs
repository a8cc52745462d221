//! Arbitrary-precision binomial and multiset coefficients.
//!
//! $\binom{n}{k}$ counts the $k$-subsets of an $n$-set, and the multiset
//! coefficient $\left(\!\binom{n}{k}\!\right) = \binom{n+k-1}{k}$ counts the
//! $k$-element multisets drawn from it. Both grow combinatorially, so every
//! value here is a [`BigUint`].

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// $\binom{n}{k}$, or 0 when $k > n$.
///
/// Computed multiplicatively over $\min(k, n-k)$ factors; each partial
/// product is itself a binomial coefficient, so every division is exact.
pub fn binomial(n: &BigUint, k: &BigUint) -> BigUint {
    if k > n {
        return BigUint::zero();
    }
    let complement = n - k;
    let k = if complement < *k { complement } else { k.clone() };

    let mut result = BigUint::one();
    let mut i = BigUint::zero();
    while i < k {
        result *= n - &i;
        i += 1u32;
        result /= &i;
    }
    result
}

/// Number of `k`-element multisets over an `n`-element universe.
///
/// Equals 1 when `k == 0` for every `n`, including `n == 0`.
pub fn multiset_coefficient(n: &BigUint, k: &BigUint) -> BigUint {
    if k.is_zero() {
        return BigUint::one();
    }
    if n.is_zero() {
        return BigUint::zero();
    }
    binomial(&(n + k - 1u32), k)
}

/// [`binomial`] over signed arguments.
///
/// Returns 0 for `k < 0` or `k > n`, and [`Error::ArithmeticDomain`] for `n < 0`.
pub fn checked_binomial(n: &BigInt, k: &BigInt) -> Result<BigUint> {
    let n = natural(n, "n")?;
    match k.sign() {
        Sign::Minus => Ok(BigUint::zero()),
        _ => Ok(binomial(&n, k.magnitude())),
    }
}

/// [`multiset_coefficient`] over signed arguments.
///
/// Both `n` and `k` must be non-negative.
pub fn checked_multiset_coefficient(n: &BigInt, k: &BigInt) -> Result<BigUint> {
    let n = natural(n, "n")?;
    let k = natural(k, "k")?;
    Ok(multiset_coefficient(&n, &k))
}

fn natural(x: &BigInt, name: &str) -> Result<BigUint> {
    x.to_biguint()
        .ok_or_else(|| Error::ArithmeticDomain(format!("{name} must be non-negative, got {x}")))
}
