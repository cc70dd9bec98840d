//! Bucket-index strategies.
//!
//! A `HashStrategy` maps a key and a table size to a bucket index in
//! `[0, size)`. The table only relies on that range and on determinism for a
//! fixed `(key, size)` pair. The built-in `GoldenRatio` strategy uses
//! multiplicative hashing; any `Fn(&K, usize) -> usize` works as well.

use core::hash::{Hash, Hasher};

/// Maps a key to a bucket index.
pub trait HashStrategy<K: ?Sized> {
    /// Returns an index in `[0, size)`. `size` is always a power of two ≥ 8
    /// when called by `HashTable`.
    fn index(&self, key: &K, size: usize) -> usize;
}

impl<K: ?Sized, F> HashStrategy<K> for F
where
    F: Fn(&K, usize) -> usize,
{
    #[inline]
    fn index(&self, key: &K, size: usize) -> usize {
        self(key, size)
    }
}

/// Fractional part of the golden ratio, `0.6180339887...`, as a 64-bit
/// fixed-point fraction.
pub const GOLDEN_RATIO_FRACTION: u64 = 0x9E37_79B9_7F4A_7C15;

/// Multiplicative hashing: `floor(frac(h * φ) * size)`.
///
/// `h` is the key's `Digest`. The product is taken modulo 2^64, which keeps
/// exactly the fractional part of `h * φ`; scaling by `size` is done in 128
/// bits so the result is always below `size`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GoldenRatio;

impl GoldenRatio {
    #[inline]
    pub fn index_of_digest(h: u64, size: usize) -> usize {
        let frac = h.wrapping_mul(GOLDEN_RATIO_FRACTION);
        ((u128::from(frac) * size as u128) >> 64) as usize
    }
}

impl<K: ?Sized + Hash> HashStrategy<K> for GoldenRatio {
    #[inline]
    fn index(&self, key: &K, size: usize) -> usize {
        Self::index_of_digest(Digest::of(key), size)
    }
}

const FOLD_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Deterministic, unseeded `Hasher` turning a key into a non-negative integer.
///
/// A key hashed as a single integer digests to that integer (signed values
/// through their two's complement bits). Bytes are folded FNV-1a style and
/// successive writes are chained, so strings, tuples and derived `Hash`
/// impls get a stable digest.
#[derive(Clone, Copy, Debug, Default)]
pub struct Digest {
    state: u64,
}

impl Digest {
    pub fn of<K: ?Sized + Hash>(key: &K) -> u64 {
        let mut d = Digest::default();
        key.hash(&mut d);
        d.finish()
    }

    #[inline]
    fn mix(&mut self, word: u64) {
        self.state = self.state.wrapping_mul(FOLD_PRIME) ^ word;
    }
}

impl Hasher for Digest {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = (self.state ^ u64::from(b)).wrapping_mul(FOLD_PRIME);
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.mix(u64::from(i));
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.mix(u64::from(i));
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.mix(u64::from(i));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.mix(i);
    }

    #[inline]
    fn write_u128(&mut self, i: u128) {
        self.mix(i as u64 ^ (i >> 64) as u64);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.mix(i as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: integer keys digest to themselves.
    #[test]
    fn integer_digest_is_identity() {
        assert_eq!(Digest::of(&0u64), 0);
        assert_eq!(Digest::of(&42u32), 42);
        assert_eq!(Digest::of(&7usize), 7);
        assert_eq!(Digest::of(&200u8), 200);
        assert_eq!(Digest::of(&-1i64), u64::MAX);
        assert_eq!(Digest::of(&-1i32), u64::from(u32::MAX));
    }

    /// Invariant: composite digests are deterministic and order-sensitive.
    #[test]
    fn composite_digest_is_deterministic() {
        assert_eq!(Digest::of("hello"), Digest::of(&"hello".to_string()));
        assert_eq!(Digest::of(&(1u8, "x")), Digest::of(&(1u8, "x")));
        assert_ne!(Digest::of("ab"), Digest::of("ba"));
        assert_ne!(Digest::of(&(1u32, 2u32)), Digest::of(&(2u32, 1u32)));
    }

    /// Invariant: sequential integers land where `floor(frac(k * φ) * 8)` puts them.
    #[test]
    fn golden_ratio_matches_reference_values() {
        let got: Vec<usize> = (0u64..8).map(|k| GoldenRatio.index(&k, 8)).collect();
        assert_eq!(got, vec![0, 4, 1, 6, 3, 0, 5, 2]);
    }

    /// Invariant: the index is always in `[0, size)` and stable across calls.
    #[test]
    fn golden_ratio_in_range_and_deterministic() {
        for shift in 3..20 {
            let size = 1usize << shift;
            for k in (0u64..2_000).chain([u64::MAX, u64::MAX / 3, 1 << 63]) {
                let i = GoldenRatio.index(&k, size);
                assert!(i < size, "index {} out of range for size {}", i, size);
                assert_eq!(i, GoldenRatio.index(&k, size));
            }
        }
        for s in ["", "a", "hello", "a much longer key than the others"] {
            assert!(GoldenRatio.index(s, 8) < 8);
        }
    }

    /// Invariant: closures and fn items are strategies.
    #[test]
    fn closures_are_strategies() {
        fn modulo(k: &u64, size: usize) -> usize {
            (*k as usize) % size
        }
        assert_eq!(modulo.index(&13, 8), 5);

        let offset = 3usize;
        let shifted = move |k: &u64, size: usize| (*k as usize + offset) % size;
        assert_eq!(shifted.index(&13, 8), 0);
    }
}
