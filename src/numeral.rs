//! Bijective base-$k$ numerals: symbol sequences to naturals and back.
//!
//! Standard positional notation is not injective on sequences: `[0, 5]` and
//! `[5]` are the same number. A bijective numeral system uses digit values
//! $1..=k$ instead of $0..k$:
//!
//! ```text
//! value(d_0 .. d_{L-1}) = Σ (d_i + 1) · k^(L-1-i)
//! ```
//!
//! so every finite sequence, including the empty one (value 0) and those
//! with leading zero-index symbols, maps to a distinct natural number, and
//! every natural number maps back to exactly one sequence.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Rank a sequence of digit indices, each in `0..base`.
///
/// Fails with [`Error::ArithmeticDomain`] for base 0 and with
/// [`Error::DigitOutOfRange`] for a digit `>= base`.
pub fn rank_digits<I>(digits: I, base: usize) -> Result<BigUint>
where
    I: IntoIterator<Item = usize>,
{
    let base = nonzero_base(base)?.get();
    let mut result = BigUint::zero();
    for digit in digits {
        if digit >= base {
            return Err(Error::DigitOutOfRange { digit, base });
        }
        result *= base;
        result += digit + 1;
    }
    Ok(result)
}

/// Inverse of [`rank_digits`].
///
/// Fails with [`Error::ArithmeticDomain`] for base 0.
pub fn unrank_digits(value: &BigUint, base: usize) -> Result<Vec<usize>> {
    Ok(digits_of(value, nonzero_base(base)?))
}

fn nonzero_base(base: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(base)
        .ok_or_else(|| Error::ArithmeticDomain("numeral base must be at least 1".to_string()))
}

fn digits_of(value: &BigUint, base: NonZeroUsize) -> Vec<usize> {
    let base_big = BigUint::from(base.get());
    let mut digits = Vec::new();
    let mut rest = value.clone();
    while !rest.is_zero() {
        rest -= 1u32;
        let (quotient, digit) = rest.div_rem(&base_big);
        // digit < base, which is itself a usize.
        digits.push(digit.to_usize().unwrap_or_default());
        rest = quotient;
    }
    digits.reverse();
    digits
}

/// A payload type with a bijective numeral encoding.
pub trait NumeralSystem {
    /// The payload being ranked (bytes, text, ...).
    type Payload;

    /// Alphabet size $k$.
    fn base(&self) -> usize;

    /// Map a payload to its natural number.
    fn rank(&self, payload: &Self::Payload) -> Result<BigUint>;

    /// Map a natural number back to its payload.
    fn unrank(&self, value: &BigUint) -> Self::Payload;
}

/// Raw octets: any binary payload, $k = 256$.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Octets;

impl Octets {
    /// Alphabet size.
    pub const BASE: usize = 256;
}

impl NumeralSystem for Octets {
    type Payload = Vec<u8>;

    fn base(&self) -> usize {
        Self::BASE
    }

    fn rank(&self, payload: &Vec<u8>) -> Result<BigUint> {
        rank_digits(payload.iter().map(|&b| b as usize), Self::BASE)
    }

    fn unrank(&self, value: &BigUint) -> Vec<u8> {
        digits_of(value, NonZeroUsize::MIN.saturating_add(Self::BASE - 1))
            .into_iter()
            .map(|digit| digit as u8)
            .collect()
    }
}

/// A constrained text alphabet.
///
/// Symbols are unique; their order fixes digit values. One symbol may be
/// designated as the paragraph separator, a non-printable character used to
/// carry multi-paragraph text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAlphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
    separator: Option<char>,
}

impl TextAlphabet {
    /// The built-in alphabet's symbols, in digit order.
    pub const STANDARD_SYMBOLS: &'static str =
        " ABCDEFGHIJKLMNOPQRSTUVWXYZ\u{1E}\u{1B}\t0123456789";

    /// The built-in alphabet's paragraph separator (RECORD SEPARATOR).
    pub const STANDARD_SEPARATOR: char = '\u{1E}';

    /// Build an alphabet from symbols in digit order.
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &symbol) in symbols.iter().enumerate() {
            if index.insert(symbol, i).is_some() {
                return Err(Error::DuplicateSymbol(symbol));
            }
        }
        Ok(Self {
            symbols,
            index,
            separator: None,
        })
    }

    /// Designate `separator` as the paragraph separator, appending it to the
    /// alphabet if it is not already a symbol.
    ///
    /// The separator must be a control character so it can never collide
    /// with visible text; anything else fails with
    /// [`Error::PrintableSeparator`].
    pub fn with_paragraph_separator(mut self, separator: char) -> Result<Self> {
        if !separator.is_control() {
            return Err(Error::PrintableSeparator(separator));
        }
        if !self.index.contains_key(&separator) {
            self.index.insert(separator, self.symbols.len());
            self.symbols.push(separator);
        }
        self.separator = Some(separator);
        Ok(self)
    }

    /// Upper-case letters, digits, space, tab and escape, with U+001E as the
    /// paragraph separator. 40 symbols.
    pub fn standard() -> Self {
        let mut index = HashMap::new();
        let symbols: Vec<char> = Self::STANDARD_SYMBOLS.chars().collect();
        for (i, &symbol) in symbols.iter().enumerate() {
            index.insert(symbol, i);
        }
        Self {
            symbols,
            index,
            separator: Some(Self::STANDARD_SEPARATOR),
        }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: alphabets hold at least one symbol.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol with digit value `index`.
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// Digit value of `symbol`.
    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// The paragraph separator, if one is configured.
    pub fn paragraph_separator(&self) -> Option<char> {
        self.separator
    }

    /// Join paragraphs with the paragraph separator.
    ///
    /// Without a configured separator the paragraphs are concatenated.
    pub fn join_paragraphs<S: AsRef<str>>(&self, paragraphs: &[S]) -> String {
        let mut out = String::new();
        for (i, paragraph) in paragraphs.iter().enumerate() {
            if i > 0 {
                if let Some(sep) = self.separator {
                    out.push(sep);
                }
            }
            out.push_str(paragraph.as_ref());
        }
        out
    }

    /// Split text on the paragraph separator.
    pub fn split_paragraphs<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self.separator {
            Some(sep) => text.split(sep).collect(),
            None => vec![text],
        }
    }

    /// Rank a string; every character must be in the alphabet.
    pub fn rank_str(&self, text: &str) -> Result<BigUint> {
        let digits = text
            .chars()
            .map(|c| self.index_of(c).ok_or(Error::UnsupportedCharacter(c)))
            .collect::<Result<Vec<usize>>>()?;
        rank_digits(digits, self.len())
    }

    /// Inverse of [`TextAlphabet::rank_str`].
    pub fn unrank_str(&self, value: &BigUint) -> String {
        let Some(base) = NonZeroUsize::new(self.len()) else {
            return String::new();
        };
        digits_of(value, base)
            .into_iter()
            .filter_map(|digit| self.symbol(digit))
            .collect()
    }
}

impl Default for TextAlphabet {
    fn default() -> Self {
        Self::standard()
    }
}

impl NumeralSystem for TextAlphabet {
    type Payload = String;

    fn base(&self) -> usize {
        self.len()
    }

    fn rank(&self, payload: &String) -> Result<BigUint> {
        self.rank_str(payload)
    }

    fn unrank(&self, value: &BigUint) -> String {
        self.unrank_str(value)
    }
}
