//! The indexed universe a bag is drawn from.
//!
//! The codec needs only three operations from a universe: its order, the
//! element at a rank, and the rank of an element. How that bijection is
//! computed (a lookup table, a Lehmer code, coset enumeration of a puzzle
//! group) is the implementor's business.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{Error, Result};
use crate::key::CanonicalKey;

/// A finite indexed set with a total bijection between `[0, order)` and its elements.
///
/// `element_at` and `rank_of` must be exact inverses, and element equality
/// must agree with `rank_of`.
pub trait Universe {
    /// The element type.
    type Element: CanonicalKey + Eq;

    /// Number of elements, $N \ge 1$.
    fn order(&self) -> BigUint;

    /// The element at `rank`, or `None` if `rank >= order`.
    fn element_at(&self, rank: &BigUint) -> Option<Self::Element>;

    /// The rank of `element`, or `None` if it is not a member.
    fn rank_of(&self, element: &Self::Element) -> Option<BigUint>;
}

/// The universe `[0, order)` whose elements are their own ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeUniverse {
    order: BigUint,
}

impl RangeUniverse {
    /// Create a universe of `order` naturals.
    pub fn new(order: impl Into<BigUint>) -> Self {
        Self {
            order: order.into(),
        }
    }
}

impl Universe for RangeUniverse {
    type Element = BigUint;

    fn order(&self) -> BigUint {
        self.order.clone()
    }

    fn element_at(&self, rank: &BigUint) -> Option<BigUint> {
        (*rank < self.order).then(|| rank.clone())
    }

    fn rank_of(&self, element: &BigUint) -> Option<BigUint> {
        (*element < self.order).then(|| element.clone())
    }
}

/// A universe backed by an explicit table of distinct elements.
#[derive(Debug, Clone)]
pub struct TableUniverse<T> {
    elements: Vec<T>,
}

impl<T: CanonicalKey + Eq + Clone> TableUniverse<T> {
    /// Create a universe from `elements`; rank is table position.
    ///
    /// Fails with [`Error::DuplicateElement`] if any element repeats.
    pub fn new(elements: Vec<T>) -> Result<Self> {
        for (repeat, elem) in elements.iter().enumerate() {
            if let Some(first) = elements[..repeat].iter().position(|e| e == elem) {
                return Err(Error::DuplicateElement { first, repeat });
            }
        }
        Ok(Self { elements })
    }

    /// The backing table.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }
}

impl<T: CanonicalKey + Eq + Clone> Universe for TableUniverse<T> {
    type Element = T;

    fn order(&self) -> BigUint {
        BigUint::from(self.elements.len())
    }

    fn element_at(&self, rank: &BigUint) -> Option<T> {
        self.elements.get(rank.to_usize()?).cloned()
    }

    fn rank_of(&self, element: &T) -> Option<BigUint> {
        self.elements
            .iter()
            .position(|e| e == element)
            .map(BigUint::from)
    }
}

/// Permutations of `0..degree`, ranked by Lehmer code.
///
/// The order is `degree!`; degree 21 already exceeds $5 \cdot 10^{19}$.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermutationUniverse {
    degree: usize,
}

impl PermutationUniverse {
    /// Create the universe of permutations of `degree` items.
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    /// Number of permuted items.
    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl Universe for PermutationUniverse {
    type Element = Vec<usize>;

    fn order(&self) -> BigUint {
        (1..=self.degree).fold(BigUint::one(), |acc, i| acc * i)
    }

    fn element_at(&self, rank: &BigUint) -> Option<Vec<usize>> {
        if *rank >= self.order() {
            return None;
        }
        // Factorial-base digits, least significant first.
        let mut digits = vec![0usize; self.degree];
        let mut rest = rank.clone();
        for radix in 1..=self.degree {
            let (quotient, digit) = rest.div_rem(&BigUint::from(radix));
            digits[self.degree - radix] = digit.to_usize()?;
            rest = quotient;
        }

        let mut pool: Vec<usize> = (0..self.degree).collect();
        Some(digits.into_iter().map(|d| pool.remove(d)).collect())
    }

    fn rank_of(&self, element: &Vec<usize>) -> Option<BigUint> {
        if element.len() != self.degree {
            return None;
        }
        let mut seen = vec![false; self.degree];
        let mut rank = BigUint::zero();
        for (i, &item) in element.iter().enumerate() {
            if item >= self.degree || seen[item] {
                return None;
            }
            seen[item] = true;
            let smaller_unused = seen[..item].iter().filter(|&&used| !used).count();
            rank = rank * (self.degree - i) + smaller_unused;
        }
        Some(rank)
    }
}
