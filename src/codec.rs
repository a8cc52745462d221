//! Payloads to bags of universe elements, and back.
//!
//! ```text
//! payload --(bijective numeral)--> x --(nat_to_bag)--> bag of ranks --(element_at)--> bag of elements
//! ```
//!
//! Decoding runs the same pipeline backwards through `rank_of`,
//! [`bag_to_nat`] and the numeral system's `unrank`. Every stage is a
//! bijection, so `decode(encode(p)) == p` for every payload and every
//! universe of order at least 1.

use std::num::NonZeroUsize;

use num_bigint::BigUint;

use crate::bag::{bag_to_nat, nat_to_bag};
use crate::error::{Error, Result};
use crate::multiset::Multiset;
use crate::numeral::{rank_digits, NumeralSystem, Octets, TextAlphabet};
use crate::universe::Universe;

/// Encoder/decoder bound to one universe.
#[derive(Debug)]
pub struct Codec<'u, U> {
    universe: &'u U,
}

impl<'u, U> Clone for Codec<'u, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'u, U> Copy for Codec<'u, U> {}

impl<'u, U: Universe> Codec<'u, U> {
    /// Bind a codec to `universe`.
    pub fn new(universe: &'u U) -> Self {
        Self { universe }
    }

    /// The bound universe.
    pub fn universe(&self) -> &'u U {
        self.universe
    }

    /// Encode a payload under any numeral system.
    pub fn encode<S: NumeralSystem>(
        &self,
        system: &S,
        payload: &S::Payload,
    ) -> Result<Multiset<U::Element>> {
        self.encode_rank(&system.rank(payload)?)
    }

    /// Decode a bag back into a payload under any numeral system.
    pub fn decode<S: NumeralSystem>(
        &self,
        system: &S,
        bag: &Multiset<U::Element>,
    ) -> Result<S::Payload> {
        Ok(system.unrank(&self.decode_rank(bag)?))
    }

    /// Encode raw bytes.
    pub fn encode_bytes(&self, bytes: &[u8]) -> Result<Multiset<U::Element>> {
        self.encode_rank(&rank_digits(bytes.iter().map(|&b| b as usize), Octets::BASE)?)
    }

    /// Decode a bag into raw bytes.
    pub fn decode_bytes(&self, bag: &Multiset<U::Element>) -> Result<Vec<u8>> {
        self.decode(&Octets, bag)
    }

    /// Encode text in `alphabet`.
    pub fn encode_text(
        &self,
        alphabet: &TextAlphabet,
        text: &str,
    ) -> Result<Multiset<U::Element>> {
        self.encode_rank(&alphabet.rank_str(text)?)
    }

    /// Decode a bag into text in `alphabet`.
    pub fn decode_text(
        &self,
        alphabet: &TextAlphabet,
        bag: &Multiset<U::Element>,
    ) -> Result<String> {
        self.decode(alphabet, bag)
    }

    /// Map a natural number to its bag of universe elements.
    #[tracing::instrument(skip_all)]
    pub fn encode_rank(&self, x: &BigUint) -> Result<Multiset<U::Element>> {
        let order = self.universe.order();
        let ranks = nat_to_bag(x, &order)?;

        let mut bag = Multiset::new();
        for (rank, count) in ranks.iter_counts() {
            let elem = self.element_at(rank, &order)?;
            if let Some(count) = NonZeroUsize::new(count) {
                bag.add_count(elem, count);
            }
        }

        tracing::debug!(
            rank_bits = x.bits(),
            size = bag.len(),
            support = bag.support_len(),
            "encoded payload rank"
        );
        Ok(bag)
    }

    /// Map a bag of universe elements back to its natural number.
    #[tracing::instrument(skip_all)]
    pub fn decode_rank(&self, bag: &Multiset<U::Element>) -> Result<BigUint> {
        let ranks = bag
            .iter_counts()
            .map(|(elem, count)| {
                self.universe
                    .rank_of(elem)
                    .map(|rank| (rank, count))
                    .ok_or(Error::UnknownElement)
            })
            .collect::<Result<Vec<_>>>()?;

        let x = bag_to_nat(&Multiset::from_counts(ranks), &self.universe.order())?;
        tracing::debug!(
            rank_bits = x.bits(),
            size = bag.len(),
            support = bag.support_len(),
            "decoded payload rank"
        );
        Ok(x)
    }

    /// Encode a payload as exactly one universe element.
    ///
    /// Fails with [`Error::PayloadTooLarge`] when the payload's rank is not
    /// below the universe order.
    pub fn encode_single<S: NumeralSystem>(
        &self,
        system: &S,
        payload: &S::Payload,
    ) -> Result<U::Element> {
        let rank = system.rank(payload)?;
        let order = self.universe.order();
        if rank >= order {
            return Err(Error::PayloadTooLarge { rank, order });
        }
        self.element_at(&rank, &order)
    }

    /// Inverse of [`Codec::encode_single`].
    pub fn decode_single<S: NumeralSystem>(
        &self,
        system: &S,
        element: &U::Element,
    ) -> Result<S::Payload> {
        let rank = self.universe.rank_of(element).ok_or(Error::UnknownElement)?;
        Ok(system.unrank(&rank))
    }

    fn element_at(&self, rank: &BigUint, order: &BigUint) -> Result<U::Element> {
        self.universe
            .element_at(rank)
            .ok_or_else(|| Error::RankOutOfRange {
                rank: rank.clone(),
                order: order.clone(),
            })
    }
}

/// Encode `payload` into a bag of `universe` elements.
pub fn encode<S, U>(
    system: &S,
    payload: &S::Payload,
    universe: &U,
) -> Result<Multiset<U::Element>>
where
    S: NumeralSystem,
    U: Universe,
{
    Codec::new(universe).encode(system, payload)
}

/// Decode a bag of `universe` elements into a payload.
pub fn decode<S, U>(system: &S, bag: &Multiset<U::Element>, universe: &U) -> Result<S::Payload>
where
    S: NumeralSystem,
    U: Universe,
{
    Codec::new(universe).decode(system, bag)
}
