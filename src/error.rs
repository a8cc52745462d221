//! Error types for ranking and unranking.

use num_bigint::BigUint;
use thiserror::Error;

/// Error variants for bag ranking, numeral conversion and multiset mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A monotone search was started at a value that does not satisfy its predicate.
    #[error("invalid precondition: start value does not satisfy predicate")]
    InvalidPrecondition,

    /// A rank cannot be represented as a combination (or bag) of the requested size.
    #[error("invalid rank: {rank} is not representable with size {size}")]
    InvalidRank {
        /// The offending rank.
        rank: BigUint,
        /// The combination size it was requested for.
        size: usize,
    },

    /// A combination contained the same element more than once.
    #[error("invalid combination: element {0} repeated")]
    InvalidCombination(BigUint),

    /// A character outside the configured alphabet.
    #[error("unsupported character: {0:?}")]
    UnsupportedCharacter(char),

    /// An alphabet listed the same symbol twice.
    #[error("duplicate alphabet symbol: {0:?}")]
    DuplicateSymbol(char),

    /// A paragraph separator that is a visible character.
    #[error("paragraph separator must be a control character, got {0:?}")]
    PrintableSeparator(char),

    /// A digit index at or beyond its numeral base.
    #[error("digit {digit} out of range for base {base}")]
    DigitOutOfRange {
        /// The offending digit index.
        digit: usize,
        /// The numeral base.
        base: usize,
    },

    /// An alphabet with no symbols.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,

    /// A multiset removal asked for more copies than are held.
    #[error("missing element: requested {requested} copies, {held} held")]
    MissingElement {
        /// Multiplicity currently held.
        held: usize,
        /// Multiplicity requested for removal.
        requested: usize,
    },

    /// A universe table listed the same element twice.
    #[error("duplicate universe element at positions {first} and {repeat}")]
    DuplicateElement {
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeat.
        repeat: usize,
    },

    /// The universe cannot rank an element handed to the decoder.
    #[error("unknown element: not recognized by the universe")]
    UnknownElement,

    /// A rank at or beyond the universe order.
    #[error("rank out of range: {rank} >= universe order {order}")]
    RankOutOfRange {
        /// The offending rank.
        rank: BigUint,
        /// The universe order.
        order: BigUint,
    },

    /// A single-element payload whose rank does not fit the universe.
    #[error("payload too large: rank {rank} >= universe order {order}")]
    PayloadTooLarge {
        /// Rank of the payload.
        rank: BigUint,
        /// The universe order.
        order: BigUint,
    },

    /// Negative or otherwise invalid arguments to a combinatorial function.
    #[error("arithmetic domain error: {0}")]
    ArithmeticDomain(String),
}

/// A specialized Result type for ranking operations.
pub type Result<T> = std::result::Result<T, Error>;
