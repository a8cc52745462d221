//! # Bag Ranking
//!
//! *Lossless, reversible mapping between payloads and multisets of universe elements.*
//!
//! ## Intuition First
//!
//! Imagine a drawer of puzzle cubes, each scrambled into one of $4.3 \cdot 10^{19}$
//! states. Hand someone a handful of cubes and the only information is *which*
//! states are in the handful and how many times each appears; the order you
//! picked them up in is lost. That handful is a bag.
//!
//! This crate numbers every possible bag, then numbers every possible message,
//! and matches the two lists up one to one. Any byte string becomes exactly
//! one bag, and every bag decodes to exactly one byte string.
//!
//! ## The Problem
//!
//! Two ambiguities have to be removed:
//! - **Leading zeros**: in base 256, `[0x00, 0x41]` and `[0x41]` are the same
//!   number. A *bijective* numeral (digits $1..=k$) keeps them apart.
//! - **Order**: a bag has no order, so the encoding must depend only on the
//!   multiplicities. The combinatorial number system ranks unordered
//!   selections directly.
//!
//! ## Historical Context
//!
//! ```text
//! 1887  Pascal         Combinatorial number system
//! 1950  Feller         Stars and bars: multisets as combinations
//! 1960  Lehmer         Ranking permutations and combinations by machine
//! 1961  Smullyan       Bijective (k-adic) numeration
//! 1975  Nijenhuis-Wilf "Combinatorial Algorithms": rank/unrank as a discipline
//! ```
//!
//! ## Mathematical Formulation
//!
//! For a universe of size $n$, bags are enumerated by size, then by rank
//! within a size. A bag of size $k$ with sorted ranks $b_0 \le \dots \le b_{k-1}$
//! has position
//!
//! ```text
//! pos(b) = Σ_{j<k} mc(n, j)  +  Σ_i C(b_i + i, i + 1)
//! ```
//!
//! where $mc(n, j) = \binom{n+j-1}{j}$ counts bags of size $j$.
//!
//! ## Complexity Analysis
//!
//! - **Bag size**: $k$ grows like $\log x / \log n$ for large universes.
//! - **Time**: $O(k^2 \log n)$ big-integer operations per bag (one galloping
//!   search per element, each probe a $k$-term binomial).
//!
//! ## What Could Go Wrong
//!
//! 1. **Off-by-one offsets**: the empty bag occupies position 0, so size 1
//!    starts at 1. [`bag::size_offset`] is the single source of that table.
//! 2. **Small universes**: with $n = 6$ a short message already needs a bag
//!    of dozens of elements; keep payloads short or universes large.
//! 3. **Fixed-width arithmetic**: every stage uses [`num_bigint::BigUint`].
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **`search`**: inversion of monotone predicates by galloping + bisection.
//! - **`binomial`**: binomial and multiset coefficients.
//! - **`Multiset`**: multiplicity-counting container with canonical order.
//! - **`numeral`**: bijective numerals over bytes and text alphabets.
//! - **`combination`** / **`bag`**: combinatorial-number-system ranking.
//! - **`Codec`**: the full payload ⇄ bag-of-elements pipeline.
//!
//! ```
//! use bagrank::{Codec, RangeUniverse};
//!
//! let universe = RangeUniverse::new(43_252_003_274_489_856_000u128);
//! let codec = Codec::new(&universe);
//!
//! let bag = codec.encode_bytes(b"hello").unwrap();
//! assert_eq!(codec.decode_bytes(&bag).unwrap(), b"hello");
//! ```
//!
//! ## References
//!
//! - Knuth, D. E. (2011). "The Art of Computer Programming, Vol. 4A: Combinatorial Algorithms."
//! - Nijenhuis, A., & Wilf, H. S. (1975). "Combinatorial Algorithms."
//! - Feller, W. (1950). "An Introduction to Probability Theory and Its Applications."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bag;
pub mod binomial;
pub mod codec;
pub mod combination;
pub mod error;
pub mod key;
pub mod multiset;
pub mod numeral;
pub mod search;
pub mod universe;

pub use codec::{decode, encode, Codec};
pub use combination::Combination;
pub use error::{Error, Result};
pub use key::{CanonicalKey, SortKey};
pub use multiset::Multiset;
pub use numeral::{NumeralSystem, Octets, TextAlphabet};
pub use universe::{PermutationUniverse, RangeUniverse, TableUniverse, Universe};
