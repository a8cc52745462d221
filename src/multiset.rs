//! Multiplicity-counting container with a canonical iteration order.
//!
//! # Layout
//!
//! Elements are bucketed by their [`SortKey`] in a `BTreeMap`. Each bucket is
//! a short vector of `(element, multiplicity)` pairs; it holds more than one
//! entry only when distinct elements share a key. That is a true collision
//! (two equal 64-bit hashes, or a type that reuses one `Identity` id), and
//! only then does first-insertion order break the tie, so canonical order
//! is guaranteed only for element types whose keys are injective.
//!
//! Lookups therefore need `T: CanonicalKey + Eq` but not `Hash` or `Ord`,
//! which lets opaque universe elements live in a multiset directly.
//!
//! Two sizes are tracked separately:
//! - [`Multiset::len`]: total size, the sum of multiplicities.
//! - [`Multiset::support_len`]: number of distinct elements.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Flatten;
use std::num::NonZeroUsize;
use std::ops::{AddAssign, BitAndAssign, BitOrAssign, BitXorAssign, SubAssign};

use num_integer::Roots;

use crate::error::{Error, Result};
use crate::key::{CanonicalKey, SortKey};

/// A finite unordered collection permitting repeated elements.
///
/// Iteration yields every element repeated by its multiplicity, in
/// ascending [`SortKey`] order.
#[derive(Clone)]
pub struct Multiset<T> {
    buckets: BTreeMap<SortKey, Vec<(T, usize)>>,
    len: usize,
    support_len: usize,
}

impl<T> Default for Multiset<T> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            len: 0,
            support_len: 0,
        }
    }
}

impl<T> Multiset<T> {
    /// Create an empty multiset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total size: the sum of all multiplicities.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of distinct elements.
    pub fn support_len(&self) -> usize {
        self.support_len
    }

    /// Return true if the multiset holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
        self.support_len = 0;
    }

    /// Iterate over elements, each repeated by its multiplicity, in canonical order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            entries: self.buckets.values().flatten(),
            current: None,
        }
    }

    /// Iterate over `(element, multiplicity)` pairs in canonical order.
    pub fn iter_counts(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.buckets.values().flatten().map(|(elem, count)| (elem, *count))
    }

    /// Iterate over the distinct elements in canonical order.
    pub fn support(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.values().flatten().map(|(elem, _)| elem)
    }
}

impl<T: CanonicalKey + Eq> Multiset<T> {
    /// Build a multiset holding one copy per item yielded.
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut result = Self::new();
        result.extend(items);
        result
    }

    /// Build a multiset from `(element, multiplicity)` pairs.
    ///
    /// Pairs with a zero multiplicity contribute nothing; repeated elements
    /// accumulate.
    pub fn from_counts<I: IntoIterator<Item = (T, usize)>>(counts: I) -> Self {
        let mut result = Self::new();
        for (elem, count) in counts {
            if let Some(count) = NonZeroUsize::new(count) {
                result.add_count(elem, count);
            }
        }
        result
    }

    /// Multiplicity of `elem`, 0 if absent.
    pub fn count(&self, elem: &T) -> usize {
        self.buckets
            .get(&elem.sort_key())
            .and_then(|bucket| bucket.iter().find(|(e, _)| e == elem))
            .map_or(0, |(_, count)| *count)
    }

    /// Return true if `elem` has a non-zero multiplicity.
    pub fn contains(&self, elem: &T) -> bool {
        self.count(elem) > 0
    }

    /// Add one copy of `elem`.
    pub fn add(&mut self, elem: T) {
        self.add_count(elem, NonZeroUsize::MIN);
    }

    /// Add `count` copies of `elem`.
    pub fn add_count(&mut self, elem: T, count: NonZeroUsize) {
        let count = count.get();
        let bucket = self.buckets.entry(elem.sort_key()).or_default();
        match bucket.iter_mut().find(|(e, _)| *e == elem) {
            Some((_, held)) => *held += count,
            None => {
                bucket.push((elem, count));
                self.support_len += 1;
            }
        }
        self.len += count;
    }

    /// Remove one copy of `elem`.
    pub fn remove(&mut self, elem: &T) -> Result<()> {
        self.remove_count(elem, NonZeroUsize::MIN)
    }

    /// Remove `count` copies of `elem`.
    ///
    /// Fails with [`Error::MissingElement`] when fewer than `count` copies are
    /// held; the multiset is left unchanged in that case.
    pub fn remove_count(&mut self, elem: &T, count: NonZeroUsize) -> Result<()> {
        let requested = count.get();
        let key = elem.sort_key();
        let missing = Error::MissingElement { held: 0, requested };

        let btree_map::Entry::Occupied(mut slot) = self.buckets.entry(key) else {
            return Err(missing);
        };
        let bucket = slot.get_mut();
        let Some(pos) = bucket.iter().position(|(e, _)| e == elem) else {
            return Err(missing);
        };

        let held = bucket[pos].1;
        if requested > held {
            return Err(Error::MissingElement { held, requested });
        }
        if requested == held {
            bucket.remove(pos);
            self.support_len -= 1;
            if bucket.is_empty() {
                slot.remove();
            }
        } else {
            bucket[pos].1 = held - requested;
        }
        self.len -= requested;
        Ok(())
    }

    /// Remove every copy of `elem`, returning how many were held.
    pub fn discard(&mut self, elem: &T) -> usize {
        let btree_map::Entry::Occupied(mut slot) = self.buckets.entry(elem.sort_key()) else {
            return 0;
        };
        let bucket = slot.get_mut();
        let Some(pos) = bucket.iter().position(|(e, _)| e == elem) else {
            return 0;
        };

        let (_, held) = bucket.remove(pos);
        if bucket.is_empty() {
            slot.remove();
        }
        self.support_len -= 1;
        self.len -= held;
        held
    }

    /// Return true if every multiplicity in `self` is at most the one in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.support_len <= other.support_len
            && self.iter_counts().all(|(elem, count)| count <= other.count(elem))
    }

    /// Return true if `other` is a subset of `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Return true if `self` is a subset of `other` and the two differ.
    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.len < other.len && self.is_subset(other)
    }

    /// Return true if `other` is a proper subset of `self`.
    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    /// Return true if the two supports share no element.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.support().all(|elem| !other.contains(elem))
    }
}

impl<T: CanonicalKey + Eq + Clone> Multiset<T> {
    /// Remove and return one copy of the greatest element.
    pub fn pop(&mut self) -> Option<T> {
        let mut slot = self.buckets.last_entry()?;
        let bucket = slot.get_mut();
        let last = bucket.len() - 1;
        let elem = if bucket[last].1 > 1 {
            bucket[last].1 -= 1;
            bucket[last].0.clone()
        } else {
            let (elem, _) = bucket.remove(last);
            self.support_len -= 1;
            if bucket.is_empty() {
                slot.remove();
            }
            elem
        };
        self.len -= 1;
        Some(elem)
    }

    /// Multiplicity-wise maximum.
    pub fn union(&self, other: &Self) -> Self {
        self.combine(other, usize::max)
    }

    /// Multiplicity-wise minimum.
    pub fn intersection(&self, other: &Self) -> Self {
        self.combine(other, usize::min)
    }

    /// Multiplicity-wise saturating difference.
    pub fn difference(&self, other: &Self) -> Self {
        self.combine(other, usize::saturating_sub)
    }

    /// Multiplicity-wise absolute difference.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.combine(other, usize::abs_diff)
    }

    /// Multiplicity-wise sum.
    pub fn sum(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a + b)
    }

    fn combine<F>(&self, other: &Self, op: F) -> Self
    where
        F: Fn(usize, usize) -> usize,
    {
        let mine = self.iter_counts().map(|(elem, count)| (elem, op(count, other.count(elem))));
        let theirs = other
            .iter_counts()
            .filter(|(elem, _)| !self.contains(elem))
            .map(|(elem, count)| (elem, op(0, count)));
        Self::from_counts(mine.chain(theirs).map(|(elem, count)| (elem.clone(), count)))
    }
}

macro_rules! assign_op {
    ($trait:ident, $method:ident, $combine:ident) => {
        impl<T: CanonicalKey + Eq + Clone> $trait<&Multiset<T>> for Multiset<T> {
            fn $method(&mut self, other: &Multiset<T>) {
                *self = self.$combine(other);
            }
        }
    };
}

assign_op!(BitOrAssign, bitor_assign, union);
assign_op!(BitAndAssign, bitand_assign, intersection);
assign_op!(SubAssign, sub_assign, difference);
assign_op!(BitXorAssign, bitxor_assign, symmetric_difference);
assign_op!(AddAssign, add_assign, sum);

impl<T: CanonicalKey + Eq> PartialEq for Multiset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.support_len == other.support_len
            && self.iter_counts().all(|(elem, count)| other.count(elem) == count)
    }
}

impl<T: CanonicalKey + Eq> Eq for Multiset<T> {}

impl<T: CanonicalKey + Eq> Hash for Multiset<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Entries with equal keys may sit in different bucket positions in
        // equal multisets, so combine per-entry hashes commutatively.
        let mut combined = 0u64;
        for (key, bucket) in &self.buckets {
            for (_, count) in bucket {
                let mut hasher = std::collections::hash_map::DefaultHasher::new();
                (key, count).hash(&mut hasher);
                combined = combined.wrapping_add(hasher.finish());
            }
        }
        self.len.hash(state);
        combined.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for Multiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Multiset()");
        }
        if self.len.sqrt() > self.support_len {
            f.write_str("Multiset::from_counts(")?;
            f.debug_map().entries(self.iter_counts()).finish()?;
        } else {
            f.write_str("Multiset(")?;
            f.debug_list().entries(self.iter()).finish()?;
        }
        f.write_str(")")
    }
}

impl<T: CanonicalKey + Eq> FromIterator<T> for Multiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<T: CanonicalKey + Eq> Extend<T> for Multiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.add(elem);
        }
    }
}

impl<'a, T> IntoIterator for &'a Multiset<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`Multiset`], repeating each element by its multiplicity.
pub struct Iter<'a, T> {
    entries: Flatten<btree_map::Values<'a, SortKey, Vec<(T, usize)>>>,
    current: Option<(&'a T, usize)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((elem, remaining)) = self.current.as_mut() {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Some(*elem);
                }
            }
            let (elem, count) = self.entries.next()?;
            self.current = Some((elem, *count));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_multiset_counts_and_sizes() {
        let ms = Multiset::from_items([3u32, 1, 3, 2, 3]);
        assert_eq!(ms.len(), 5);
        assert_eq!(ms.support_len(), 3);
        assert_eq!(ms.count(&3), 3);
        assert_eq!(ms.count(&9), 0);
        assert!(ms.contains(&1));
    }

    #[test]
    fn test_multiset_iterates_in_key_order() {
        let ms = Multiset::from_items([5u32, 1, 5, 3]);
        let items: Vec<u32> = ms.iter().copied().collect();
        assert_eq!(items, vec![1, 3, 5, 5]);
        let support: Vec<u32> = ms.support().copied().collect();
        assert_eq!(support, vec![1, 3, 5]);
    }

    #[test]
    fn test_multiset_remove_too_many_leaves_unchanged() {
        let mut ms = Multiset::from_items(["elem"]);
        let err = ms.remove_count(&"elem", nz(2)).unwrap_err();
        assert_eq!(err, Error::MissingElement { held: 1, requested: 2 });
        assert_eq!(ms.count(&"elem"), 1);
        assert_eq!(ms.len(), 1);
    }

    #[test]
    fn test_multiset_remove_absent() {
        let mut ms: Multiset<u8> = Multiset::new();
        assert_eq!(
            ms.remove(&4).unwrap_err(),
            Error::MissingElement { held: 0, requested: 1 }
        );
    }

    #[test]
    fn test_multiset_remove_and_discard() {
        let mut ms = Multiset::from_counts([(7u8, 4), (2u8, 1)]);
        ms.remove_count(&7, nz(3)).unwrap();
        assert_eq!(ms.count(&7), 1);
        ms.remove(&7).unwrap();
        assert!(!ms.contains(&7));
        assert_eq!(ms.support_len(), 1);

        assert_eq!(ms.discard(&2), 1);
        assert_eq!(ms.discard(&2), 0);
        assert!(ms.is_empty());
    }

    #[test]
    fn test_multiset_discard_drops_every_copy() {
        let mut ms = Multiset::from_counts([(5u8, 3), (6u8, 2)]);
        assert_eq!(ms.discard(&5), 3);
        assert_eq!(ms.len(), 2);
        assert_eq!(ms.support_len(), 1);
        assert_eq!(ms.discard(&9), 0);
        assert_eq!(ms, Multiset::from_counts([(6u8, 2)]));
    }

    #[test]
    fn test_multiset_from_counts_skips_zero() {
        let ms = Multiset::from_counts([(1u8, 0), (2u8, 2), (2u8, 1)]);
        assert_eq!(ms.support_len(), 1);
        assert_eq!(ms.count(&2), 3);
    }

    #[test]
    fn test_multiset_equality_ignores_insertion_order() {
        let a = Multiset::from_items(["x", "y", "x"]);
        let b = Multiset::from_items(["y", "x", "x"]);
        let c = Multiset::from_items(["y", "x"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Opaque {
        name: &'static str,
        key: SortKey,
    }

    impl Opaque {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                key: SortKey::fresh_identity(),
            }
        }
    }

    impl CanonicalKey for Opaque {
        fn sort_key(&self) -> SortKey {
            self.key.clone()
        }
    }

    #[test]
    fn test_multiset_identity_tier_is_canonical() {
        let a = Opaque::new("a");
        let b = Opaque::new("b");

        let mut forward = Multiset::from_items([a.clone(), b.clone(), b.clone()]);
        let mut backward = Multiset::from_items([b.clone(), a.clone(), b.clone()]);
        assert_eq!(forward, backward);

        let names = |ms: &Multiset<Opaque>| ms.iter().map(|o| o.name).collect::<Vec<_>>();
        assert_eq!(names(&forward), names(&backward));
        assert_eq!(names(&forward), vec!["a", "b", "b"]);

        while let Some(top) = forward.pop() {
            assert_eq!(Some(top), backward.pop());
        }
        assert!(backward.is_empty());
    }

    #[test]
    fn test_multiset_key_collision_falls_back_to_insertion_order() {
        let shared = SortKey::fresh_identity();
        let x = Opaque { name: "x", key: shared.clone() };
        let y = Opaque { name: "y", key: shared };

        let ms = Multiset::from_items([y.clone(), x.clone()]);
        assert_eq!(ms.support_len(), 2);
        assert_eq!(ms.count(&x), 1);
        let names: Vec<&str> = ms.iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["y", "x"]);
    }

    #[test]
    fn test_multiset_pop_takes_greatest() {
        let mut ms = Multiset::from_items([1u32, 9, 9]);
        assert_eq!(ms.pop(), Some(9));
        assert_eq!(ms.pop(), Some(9));
        assert_eq!(ms.pop(), Some(1));
        assert_eq!(ms.pop(), None);
        assert_eq!(ms.support_len(), 0);
    }

    #[test]
    fn test_multiset_algebra() {
        let a = Multiset::from_counts([(1u32, 3), (2, 1)]);
        let b = Multiset::from_counts([(1u32, 1), (3, 2)]);

        assert_eq!(a.union(&b), Multiset::from_counts([(1, 3), (2, 1), (3, 2)]));
        assert_eq!(a.intersection(&b), Multiset::from_counts([(1, 1)]));
        assert_eq!(a.difference(&b), Multiset::from_counts([(1, 2), (2, 1)]));
        assert_eq!(a.sum(&b), Multiset::from_counts([(1, 4), (2, 1), (3, 2)]));
        assert_eq!(
            a.symmetric_difference(&b),
            Multiset::from_counts([(1, 2), (2, 1), (3, 2)])
        );

        assert!(a.intersection(&b).is_subset(&a));
        assert!(a.sum(&b).is_superset(&b));
        assert!(!a.is_subset(&b));
        assert!(a.is_disjoint(&Multiset::from_items([4u32])));
        assert!(!a.is_disjoint(&b));
    }

    #[test]
    fn test_multiset_algebra_in_place() {
        let a = Multiset::from_counts([(1u32, 3), (2, 1)]);
        let b = Multiset::from_counts([(1u32, 1), (3, 2)]);

        let mut ms = a.clone();
        ms |= &b;
        assert_eq!(ms, a.union(&b));

        let mut ms = a.clone();
        ms &= &b;
        assert_eq!(ms, a.intersection(&b));

        let mut ms = a.clone();
        ms -= &b;
        assert_eq!(ms, a.difference(&b));

        let mut ms = a.clone();
        ms ^= &b;
        assert_eq!(ms, a.symmetric_difference(&b));

        let mut ms = a.clone();
        ms += &b;
        assert_eq!(ms, a.sum(&b));
        assert_eq!(ms.len(), a.len() + b.len());
    }

    #[test]
    fn test_multiset_proper_subset() {
        let small = Multiset::from_counts([(1u32, 1)]);
        let big = Multiset::from_counts([(1u32, 2)]);
        assert!(small.is_proper_subset(&big));
        assert!(big.is_proper_superset(&small));
        assert!(!big.is_proper_subset(&big));
        assert!(big.is_subset(&big));
        assert!(!small.is_proper_subset(&Multiset::from_items([2u32, 3])));
    }

    #[test]
    fn test_multiset_hash_matches_equality() {
        use std::collections::hash_map::DefaultHasher;

        let digest = |ms: &Multiset<&str>| {
            let mut h = DefaultHasher::new();
            ms.hash(&mut h);
            h.finish()
        };
        let a = Multiset::from_items(["p", "q", "q"]);
        let b = Multiset::from_items(["q", "p", "q"]);
        assert_eq!(digest(&a), digest(&b));
    }

    #[test]
    fn test_multiset_debug() {
        assert_eq!(format!("{:?}", Multiset::<u8>::new()), "Multiset()");
        assert_eq!(format!("{:?}", Multiset::from_items([2u8, 1])), "Multiset([1, 2])");
        assert_eq!(
            format!("{:?}", Multiset::from_counts([(4u8, 100)])),
            "Multiset::from_counts({4: 100})"
        );
    }
}
