//! Bucket array capacity: a power of two no smaller than `MIN_CAPACITY`.

use crate::error::CapacityError;

/// Smallest capacity a table ever has; shrinking stops here.
pub const MIN_CAPACITY: usize = 8;

/// Capacity used by `HashTable::new`.
pub const DEFAULT_CAPACITY: usize = MIN_CAPACITY;

/// A validated bucket count.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Capacity(usize);

impl Capacity {
    pub const MIN: Capacity = Capacity(MIN_CAPACITY);

    /// Validates `n`: at least `MIN_CAPACITY`, and a power of two.
    pub fn new(n: usize) -> Result<Self, CapacityError> {
        if n < MIN_CAPACITY {
            return Err(CapacityError::BelowMinimum {
                requested: n,
                minimum: MIN_CAPACITY,
            });
        }
        if !n.is_power_of_two() {
            return Err(CapacityError::NotPowerOfTwo(n));
        }
        Ok(Capacity(n))
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Twice this capacity, or `None` if that overflows `usize`.
    pub fn doubled(self) -> Option<Self> {
        self.0.checked_mul(2).map(Capacity)
    }

    /// Half this capacity, floored at `MIN_CAPACITY`.
    pub fn halved(self) -> Self {
        Capacity((self.0 / 2).max(MIN_CAPACITY))
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity::MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: only powers of two at or above the minimum are accepted.
    #[test]
    fn validation() {
        assert_eq!(Capacity::new(8).map(Capacity::get), Ok(8));
        assert_eq!(Capacity::new(1024).map(Capacity::get), Ok(1024));
        assert_eq!(
            Capacity::new(0),
            Err(CapacityError::BelowMinimum {
                requested: 0,
                minimum: 8
            })
        );
        assert_eq!(
            Capacity::new(4),
            Err(CapacityError::BelowMinimum {
                requested: 4,
                minimum: 8
            })
        );
        assert_eq!(Capacity::new(12), Err(CapacityError::NotPowerOfTwo(12)));
        assert_eq!(Capacity::new(100), Err(CapacityError::NotPowerOfTwo(100)));
    }

    /// Invariant: halving never drops below the floor; doubling reports overflow.
    #[test]
    fn grow_and_shrink_steps() {
        let c = Capacity::new(32).unwrap();
        assert_eq!(c.doubled().map(Capacity::get), Some(64));
        assert_eq!(c.halved().get(), 16);
        assert_eq!(Capacity::MIN.halved(), Capacity::MIN);
        assert_eq!(Capacity::new(16).unwrap().halved(), Capacity::MIN);

        let top = Capacity::new(1usize << (usize::BITS - 1)).unwrap();
        assert_eq!(top.doubled(), None);
    }
}
