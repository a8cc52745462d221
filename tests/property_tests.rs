use std::num::NonZeroUsize;

use bagrank::bag::{bag_to_nat, nat_to_bag, size_offset};
use bagrank::binomial::{binomial, multiset_coefficient};
use bagrank::combination::{combination_to_rank, rank_to_combination, Combination};
use bagrank::numeral::{rank_digits, unrank_digits, NumeralSystem, Octets, TextAlphabet};
use bagrank::{Codec, Multiset, PermutationUniverse, RangeUniverse};
use num_bigint::BigUint;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_octets_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let rank = Octets.rank(&bytes).unwrap();
        prop_assert_eq!(Octets.unrank(&rank), bytes);
    }

    #[test]
    fn test_digits_roundtrip_any_base(
        base in 1usize..300,
        raw in prop::collection::vec(any::<usize>(), 0..32),
    ) {
        let digits: Vec<usize> = raw.into_iter().map(|d| d % base).collect();
        let rank = rank_digits(digits.iter().copied(), base).unwrap();
        prop_assert_eq!(unrank_digits(&rank, base).unwrap(), digits);
    }

    #[test]
    fn test_text_roundtrip(text in "[ A-Z0-9\t\u{1E}\u{1B}]{0,40}") {
        let alphabet = TextAlphabet::standard();
        let rank = alphabet.rank_str(&text).unwrap();
        prop_assert_eq!(alphabet.unrank_str(&rank), text);
    }

    #[test]
    fn test_combination_rank_roundtrip(x in any::<u64>(), k in 1usize..8) {
        let x = BigUint::from(x);
        let combination = rank_to_combination(&x, k).unwrap();
        prop_assert_eq!(combination.size(), k);
        prop_assert!(combination.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(combination_to_rank(&combination), x);
    }

    #[test]
    fn test_combination_unrank_roundtrip(
        elems in prop::collection::btree_set(0u32..5000, 1..10),
    ) {
        let combination = Combination::new(elems.iter().map(|&e| BigUint::from(e))).unwrap();
        let rank = combination_to_rank(&combination);
        prop_assert_eq!(rank_to_combination(&rank, elems.len()).unwrap(), combination);
    }

    #[test]
    fn test_bag_roundtrip(
        n in 1u32..30,
        raw in prop::collection::vec(any::<u32>(), 0..12),
    ) {
        let bag: Multiset<BigUint> = raw.iter().map(|&r| BigUint::from(r % n)).collect();
        let n = BigUint::from(n);
        let x = bag_to_nat(&bag, &n).unwrap();
        prop_assert!(x >= size_offset(&n, bag.len()));
        prop_assert!(x < size_offset(&n, bag.len() + 1));
        prop_assert_eq!(nat_to_bag(&x, &n).unwrap(), bag);
    }

    #[test]
    fn test_nat_roundtrip(x in any::<u64>(), n in 16u64..1000) {
        let x = BigUint::from(x);
        let n = BigUint::from(n);
        let bag = nat_to_bag(&x, &n).unwrap();
        prop_assert!(bag.iter().all(|r| *r < n));
        prop_assert_eq!(bag_to_nat(&bag, &n).unwrap(), x);
    }

    #[test]
    fn test_nat_roundtrip_large_universe(x in any::<u128>(), n in any::<u64>()) {
        let x = BigUint::from(x);
        let n = BigUint::from(n) + (1u64 << 40);
        let bag = nat_to_bag(&x, &n).unwrap();
        prop_assert_eq!(bag_to_nat(&bag, &n).unwrap(), x);
    }

    #[test]
    fn test_binomial_monotone_in_n(n in 0u32..200, k in 0u32..20) {
        let k = BigUint::from(k);
        prop_assert!(binomial(&BigUint::from(n), &k) <= binomial(&BigUint::from(n + 1), &k));
        prop_assert_eq!(
            multiset_coefficient(&BigUint::from(n), &BigUint::from(0u32)),
            BigUint::from(1u32)
        );
    }

    #[test]
    fn test_codec_roundtrip_permutations(bytes in prop::collection::vec(any::<u8>(), 0..48)) {
        let universe = PermutationUniverse::new(21);
        let codec = Codec::new(&universe);
        let bag = codec.encode_bytes(&bytes).unwrap();
        prop_assert!(bag.iter().all(|p| p.len() == 21));
        prop_assert_eq!(codec.decode_bytes(&bag).unwrap(), bytes);
    }

    #[test]
    fn test_codec_roundtrip_range(
        bytes in prop::collection::vec(any::<u8>(), 0..32),
        order in (1u64 << 16)..u64::MAX,
    ) {
        let universe = RangeUniverse::new(order);
        let codec = Codec::new(&universe);
        let bag = codec.encode_bytes(&bytes).unwrap();
        prop_assert_eq!(codec.decode_bytes(&bag).unwrap(), bytes);
    }

    #[test]
    fn test_multiset_failed_remove_is_noop(
        items in prop::collection::vec(0u8..8, 0..20),
        target in 0u8..8,
        extra in 1usize..4,
    ) {
        let mut ms: Multiset<u8> = items.iter().copied().collect();
        let before = ms.clone();
        let held = ms.count(&target);
        let request = NonZeroUsize::new(held + extra).unwrap();
        prop_assert!(ms.remove_count(&target, request).is_err());
        prop_assert_eq!(ms, before);
    }

    #[test]
    fn test_multiset_order_independent(items in prop::collection::vec(any::<i16>(), 0..30)) {
        let forward: Multiset<i16> = items.iter().copied().collect();
        let backward: Multiset<i16> = items.iter().rev().copied().collect();
        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(forward.len(), items.len());

        let mut sorted = items.clone();
        sorted.sort_unstable();
        prop_assert_eq!(forward.iter().copied().collect::<Vec<_>>(), sorted);
    }
}
