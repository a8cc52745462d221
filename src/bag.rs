//! Naturals to bags (multisets) over a universe of size $n$, and back.
//!
//! Bags are enumerated by size first, then by combinatorial rank within a
//! size:
//!
//! ```text
//! rank 0                      the empty bag
//! ranks [1, 1 + n)            bags of size 1
//! ranks [1 + n, 1 + n + mc(n,2))  bags of size 2
//! ...
//! ```
//!
//! The start of size `k` is [`size_offset`]`(n, k)` $= \sum_{j<k} mc(n, j)$,
//! with $mc(n, 0) = 1$. Both directions go through that one function.
//!
//! Within a size, a bag $b_0 \le b_1 \le \dots \le b_{k-1}$ maps to the
//! combination $\{b_i + i\}$ over $n + k - 1$ values (stars and bars), which is
//! ranked with the combinatorial number system.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::binomial::multiset_coefficient;
use crate::combination::{combination_to_rank, rank_to_combination, Combination};
use crate::error::{Error, Result};
use crate::multiset::Multiset;

/// Rank of the first bag of size `k`: the number of bags of size `< k`.
pub fn size_offset(n: &BigUint, k: usize) -> BigUint {
    (0..k)
        .map(|j| multiset_coefficient(n, &BigUint::from(j)))
        .sum()
}

/// Number of bags of size at most `k`.
pub fn bag_count_up_to(n: &BigUint, k: usize) -> BigUint {
    size_offset(n, k + 1)
}

/// The bag of universe ranks at position `x`.
///
/// Fails with [`Error::InvalidRank`] when `x > 0` and `n == 0`: the empty
/// universe only has the empty bag.
pub fn nat_to_bag(x: &BigUint, n: &BigUint) -> Result<Multiset<BigUint>> {
    if x.is_zero() {
        return Ok(Multiset::new());
    }
    if n.is_zero() {
        return Err(Error::InvalidRank {
            rank: x.clone(),
            size: 0,
        });
    }

    // 1. Size: the smallest k >= 1 with x < offset(k + 1).
    let mut k = 1usize;
    let mut offset = BigUint::one();
    loop {
        let span = multiset_coefficient(n, &BigUint::from(k));
        if *x < &offset + &span {
            break;
        }
        offset += span;
        k += 1;
    }
    debug_assert_eq!(offset, size_offset(n, k));

    // 2. Rank within size -> combination over n + k - 1 values.
    let combination = rank_to_combination(&(x - &offset), k)?;

    // 3. Combination -> bag.
    Ok(combination
        .iter()
        .enumerate()
        .map(|(i, elem)| elem - BigUint::from(i))
        .collect())
}

/// Position of a bag of universe ranks.
///
/// Elements are taken in ascending rank order. Fails with
/// [`Error::RankOutOfRange`] if any element is `>= n`.
pub fn bag_to_nat(bag: &Multiset<BigUint>, n: &BigUint) -> Result<BigUint> {
    let mut ranks: Vec<&BigUint> = bag.iter().collect();
    ranks.sort_unstable();
    if let Some(&last) = ranks.last() {
        if last >= n {
            return Err(Error::RankOutOfRange {
                rank: last.clone(),
                order: n.clone(),
            });
        }
    }

    // Strictly increasing by construction, so this cannot repeat.
    let combination =
        Combination::new(ranks.iter().enumerate().map(|(i, &r)| r + BigUint::from(i)))?;
    Ok(combination_to_rank(&combination) + size_offset(n, ranks.len()))
}
