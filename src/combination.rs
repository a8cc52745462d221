//! The combinatorial number system.
//!
//! Every natural $x$ has exactly one representation as
//!
//! ```text
//! x = C(c_{k-1}, k) + ... + C(c_1, 2) + C(c_0, 1),   c_0 < c_1 < ... < c_{k-1}
//! ```
//!
//! for each fixed $k \ge 1$. Ranking a combination is a direct sum; unranking
//! is greedy from the top: the largest element is the greatest $c$ with
//! $\binom{c}{k} \le x$, found by [`search_max_satisfying`] since
//! $\binom{c}{k}$ has no closed-form inverse.

use std::ops::Deref;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::binomial::binomial;
use crate::error::{Error, Result};
use crate::search::search_max_satisfying;

/// A strictly increasing sequence of naturals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Combination(Vec<BigUint>);

impl Combination {
    /// Sort `elements` into a combination.
    ///
    /// Fails with [`Error::InvalidCombination`] if any element repeats.
    pub fn new<I: IntoIterator<Item = BigUint>>(elements: I) -> Result<Self> {
        let mut elements: Vec<BigUint> = elements.into_iter().collect();
        elements.sort_unstable();
        if let Some(pair) = elements.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::InvalidCombination(pair[0].clone()));
        }
        Ok(Self(elements))
    }

    /// Number of elements.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Elements in ascending order.
    pub fn into_inner(self) -> Vec<BigUint> {
        self.0
    }
}

impl Deref for Combination {
    type Target = [BigUint];

    fn deref(&self) -> &[BigUint] {
        &self.0
    }
}

/// The unique `k`-combination whose rank is `x`.
///
/// Fails with [`Error::InvalidRank`] when `k == 0` and `x > 0`: the only
/// 0-combination is the empty one, of rank 0.
pub fn rank_to_combination(x: &BigUint, k: usize) -> Result<Combination> {
    if k == 0 {
        if x.is_zero() {
            return Ok(Combination::default());
        }
        return Err(Error::InvalidRank {
            rank: x.clone(),
            size: k,
        });
    }

    let mut remaining = x.clone();
    let mut elements = vec![BigUint::zero(); k];
    for i in (0..k).rev() {
        let arity = BigUint::from(i + 1);
        let elem = search_max_satisfying(&BigInt::zero(), |c| {
            binomial(c.magnitude(), &arity) <= remaining
        })?
        .into_parts()
        .1;
        remaining -= binomial(&elem, &arity);
        elements[i] = elem;
    }
    Ok(Combination(elements))
}

/// Rank of a combination: $\sum_i \binom{c_i}{i+1}$ over ascending elements.
pub fn combination_to_rank(combination: &Combination) -> BigUint {
    combination
        .iter()
        .enumerate()
        .map(|(i, elem)| binomial(elem, &BigUint::from(i + 1)))
        .sum()
}
