//! Canonical ordering keys for multiset elements.
//!
//! A [`Multiset`](crate::Multiset) iterates its elements in ascending key
//! order even when the element type has no natural order. Each element is
//! classified into a tier, and keys compare by tier first:
//!
//! | Tier       | Source                                   |
//! |------------|------------------------------------------|
//! | `Numeric`  | integer value                            |
//! | `Sequence` | tuple / array / vector, compared element-wise by key |
//! | `Hashed`   | 64-bit hash of the value                 |
//! | `Identity` | process-wide id issued by [`SortKey::fresh_identity`] |
//!
//! Opaque element types draw an `Identity` id once, when the element is
//! created, and report it from `sort_key`; clones share the id. Distinct
//! elements therefore get distinct keys, and two equal multisets iterate in
//! the same order.
//!
//! Only a true key collision (two distinct elements with equal keys, e.g. a
//! 64-bit hash collision) falls back to the order in which the container
//! first saw each element. Cross-tier ordering is arbitrary but total, and
//! stable for the lifetime of the process.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use num_bigint::{BigInt, BigUint};

/// A totally ordered key derived from an element.
///
/// Variant order is tier order: every `Numeric` key sorts before every
/// `Sequence` key, and so on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    /// Integer value.
    Numeric(BigInt),
    /// Element-wise keys of a nested sequence, compared lexicographically.
    Sequence(Vec<SortKey>),
    /// Hash-derived key.
    Hashed(u64),
    /// Process-wide identity of an element with no intrinsic key.
    Identity(u64),
}

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(0);

impl SortKey {
    /// Build a `Hashed` key from any hashable value.
    pub fn hashed<H: Hash + ?Sized>(value: &H) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        SortKey::Hashed(hasher.finish())
    }

    /// Issue an `Identity` key never handed out before in this process.
    pub fn fresh_identity() -> Self {
        SortKey::Identity(NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed))
    }

    /// Build a `Sequence` key from the keys of each item.
    pub fn sequence<'a, T, I>(items: I) -> Self
    where
        T: CanonicalKey + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        SortKey::Sequence(items.into_iter().map(CanonicalKey::sort_key).collect())
    }
}

/// Types that can produce a [`SortKey`].
///
/// Implement this for universe element types. Types with an integer
/// meaning return `Numeric`; composite types return `Sequence`; everything
/// else can fall back to [`SortKey::hashed`] or store a key from
/// [`SortKey::fresh_identity`] at construction.
pub trait CanonicalKey {
    /// The key used to place `self` in canonical multiset order.
    fn sort_key(&self) -> SortKey;
}

macro_rules! numeric_key {
    ($($t:ty),*) => {
        $(
            impl CanonicalKey for $t {
                fn sort_key(&self) -> SortKey {
                    SortKey::Numeric(BigInt::from(*self))
                }
            }
        )*
    };
}

numeric_key!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl CanonicalKey for BigUint {
    fn sort_key(&self) -> SortKey {
        SortKey::Numeric(BigInt::from(self.clone()))
    }
}

impl CanonicalKey for BigInt {
    fn sort_key(&self) -> SortKey {
        SortKey::Numeric(self.clone())
    }
}

impl CanonicalKey for bool {
    fn sort_key(&self) -> SortKey {
        SortKey::Numeric(BigInt::from(u8::from(*self)))
    }
}

impl CanonicalKey for char {
    fn sort_key(&self) -> SortKey {
        SortKey::Numeric(BigInt::from(u32::from(*self)))
    }
}

impl CanonicalKey for str {
    fn sort_key(&self) -> SortKey {
        SortKey::hashed(self)
    }
}

impl CanonicalKey for String {
    fn sort_key(&self) -> SortKey {
        SortKey::hashed(self.as_str())
    }
}

impl<T: CanonicalKey + ?Sized> CanonicalKey for &T {
    fn sort_key(&self) -> SortKey {
        (**self).sort_key()
    }
}

impl<T: CanonicalKey> CanonicalKey for [T] {
    fn sort_key(&self) -> SortKey {
        SortKey::sequence(self)
    }
}

impl<T: CanonicalKey, const N: usize> CanonicalKey for [T; N] {
    fn sort_key(&self) -> SortKey {
        SortKey::sequence(self)
    }
}

impl<T: CanonicalKey> CanonicalKey for Vec<T> {
    fn sort_key(&self) -> SortKey {
        SortKey::sequence(self)
    }
}

impl<T: CanonicalKey> CanonicalKey for Option<T> {
    fn sort_key(&self) -> SortKey {
        match self {
            None => SortKey::Sequence(Vec::new()),
            Some(value) => SortKey::Sequence(vec![value.sort_key()]),
        }
    }
}

macro_rules! tuple_key {
    ($($name:ident),+) => {
        impl<$($name: CanonicalKey),+> CanonicalKey for ($($name,)+) {
            #[allow(non_snake_case)]
            fn sort_key(&self) -> SortKey {
                let ($($name,)+) = self;
                SortKey::Sequence(vec![$($name.sort_key()),+])
            }
        }
    };
}

tuple_key!(A);
tuple_key!(A, B);
tuple_key!(A, B, C);
tuple_key!(A, B, C, D);
