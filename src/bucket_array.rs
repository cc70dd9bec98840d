//! BucketArray: a fixed-length, bounds-checked block of chains.
//!
//! The slots are allocated once at their final length and never grow or
//! shrink in place. Resizing a table means building a new array and draining
//! the old one into it.

use crate::capacity::Capacity;
use crate::chain::Chain;
use crate::error::IndexOutOfRange;

pub struct BucketArray<K, V> {
    slots: Box<[Chain<K, V>]>,
    sizing: Capacity,
}

impl<K, V> BucketArray<K, V> {
    /// Allocates `capacity` empty chains.
    pub fn new(capacity: Capacity) -> Self {
        let slots = (0..capacity.get()).map(|_| Chain::new()).collect();
        Self {
            slots,
            sizing: capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The validated capacity this array was built with.
    #[inline]
    pub fn sizing(&self) -> Capacity {
        self.sizing
    }

    /// Confirms `index` addresses a slot.
    #[inline]
    pub fn check(&self, index: usize) -> Result<usize, IndexOutOfRange> {
        if index < self.slots.len() {
            Ok(index)
        } else {
            Err(IndexOutOfRange {
                index,
                capacity: self.slots.len(),
            })
        }
    }

    pub fn get(&self, index: usize) -> Result<&Chain<K, V>, IndexOutOfRange> {
        let index = self.check(index)?;
        Ok(&self.slots[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Chain<K, V>, IndexOutOfRange> {
        let index = self.check(index)?;
        Ok(&mut self.slots[index])
    }

    /// Puts `chain` in slot `index` and returns the chain it displaced.
    pub fn replace(
        &mut self,
        index: usize,
        chain: Chain<K, V>,
    ) -> Result<Chain<K, V>, IndexOutOfRange> {
        let slot = self.get_mut(index)?;
        Ok(core::mem::replace(slot, chain))
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Chain<K, V>> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Chain<K, V>> {
        self.slots.iter_mut()
    }

    /// Consumes the array, yielding every entry in slot order, each chain
    /// head-to-tail.
    pub fn into_entries(self) -> impl Iterator<Item = (K, V)> {
        self.slots.into_vec().into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Entry;

    /// Invariant: the array has exactly the requested number of empty chains.
    #[test]
    fn allocates_every_slot() {
        let a: BucketArray<u32, u32> = BucketArray::new(Capacity::new(16).unwrap());
        assert_eq!(a.capacity(), 16);
        assert_eq!(a.sizing().get(), 16);
        assert_eq!(a.iter().count(), 16);
        assert!(a.iter().all(Chain::is_empty));
    }

    /// Invariant: access outside `[0, capacity)` is rejected, never clamped.
    #[test]
    fn out_of_range_rejected() {
        let mut a: BucketArray<u32, u32> = BucketArray::new(Capacity::MIN);
        assert!(a.get(7).is_ok());
        assert_eq!(
            a.get(8).err(),
            Some(IndexOutOfRange {
                index: 8,
                capacity: 8
            })
        );
        assert!(a.get_mut(usize::MAX).is_err());
        assert!(a.replace(8, Chain::new()).is_err());
        assert_eq!(a.check(3), Ok(3));
    }

    /// Invariant: replace swaps exactly one slot and hands back the old chain.
    #[test]
    fn replace_swaps_slot() {
        let mut a: BucketArray<u32, u32> = BucketArray::new(Capacity::MIN);
        a.get_mut(2).unwrap().append(Entry::new(1, 10));

        let mut fresh = Chain::new();
        fresh.append(Entry::new(2, 20));
        let old = a.replace(2, fresh).unwrap();

        assert_eq!(old.iter().collect::<Vec<_>>(), vec![(&1, &10)]);
        assert!(a.get(2).unwrap().find(&2).is_some());
        assert!(a.get(2).unwrap().find(&1).is_none());
    }

    /// Invariant: draining visits slots in index order, chains head-to-tail.
    #[test]
    fn into_entries_order() {
        let mut a: BucketArray<u32, u32> = BucketArray::new(Capacity::MIN);
        a.get_mut(5).unwrap().append(Entry::new(50, 0));
        a.get_mut(1).unwrap().append(Entry::new(10, 0));
        a.get_mut(1).unwrap().append(Entry::new(11, 0));
        a.get_mut(7).unwrap().append(Entry::new(70, 0));

        let keys: Vec<u32> = a.into_entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![10, 11, 50, 70]);
    }
}
