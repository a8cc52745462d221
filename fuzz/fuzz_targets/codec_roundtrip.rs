#![no_main]
use bagrank::{Codec, Multiset, RangeUniverse, TableUniverse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, u64)| {
    let (payload, order_raw) = data;
    if payload.len() > 64 {
        return;
    }

    // Keep bags small: tiny universes need one element per few bits.
    let order = order_raw | (1 << 20);
    let universe = RangeUniverse::new(order);
    let codec = Codec::new(&universe);

    let bag = codec.encode_bytes(&payload).unwrap();
    assert_eq!(codec.decode_bytes(&bag).unwrap(), payload);

    // Re-collecting the elements in any order must decode identically.
    let mut elements: Vec<_> = bag.iter().cloned().collect();
    elements.reverse();
    let shuffled: Multiset<_> = elements.into_iter().collect();
    assert_eq!(shuffled, bag);
    assert_eq!(codec.decode_bytes(&shuffled).unwrap(), payload);

    // A short prefix through a six-element table universe.
    let colors = TableUniverse::new(vec!['w', 'g', 'r', 'b', 'o', 'y']).unwrap();
    let prefix = &payload[..payload.len().min(2)];
    let small = Codec::new(&colors);
    let bag = small.encode_bytes(prefix).unwrap();
    assert_eq!(small.decode_bytes(&bag).unwrap(), prefix);
});
