//! HashTable: separate chaining over a `BucketArray`, indexed by a `HashStrategy`.
//!
//! Every operation asks the strategy for a bucket index against the current
//! capacity and delegates to that bucket's chain. `insert` and `remove`
//! evaluate the resize policy once, after updating the count:
//!
//! - grow: the table is full (`len == capacity`) → double and rehash;
//! - shrink: `len <= capacity / 4` and `capacity > MIN_CAPACITY` → halve
//!   (never below the minimum) and rehash.
//!
//! A strategy returning an index outside `[0, capacity)` breaks its
//! contract; the table panics with the `IndexOutOfRange` message before
//! mutating anything.

use crate::bucket_array::BucketArray;
use crate::capacity::{Capacity, MIN_CAPACITY};
use crate::chain::{Chain, Entry};
use crate::error::{CapacityError, IndexOutOfRange};
use crate::strategy::{GoldenRatio, HashStrategy};
use core::borrow::Borrow;
use core::fmt;

pub struct HashTable<K, V, S = GoldenRatio> {
    buckets: BucketArray<K, V>,
    count: usize,
    strategy: S,
}

#[cold]
#[inline(never)]
fn contract_violation(err: IndexOutOfRange) -> ! {
    panic!("hash strategy broke its contract: {err}")
}

impl<K, V> HashTable<K, V> {
    /// Empty table with `DEFAULT_CAPACITY` buckets and the golden-ratio strategy.
    pub fn new() -> Self {
        Self::with_strategy(GoldenRatio)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        Self::with_capacity_and_strategy(capacity, GoldenRatio)
    }
}

impl<K, V, S: Default> Default for HashTable<K, V, S> {
    fn default() -> Self {
        Self::with_strategy(S::default())
    }
}

impl<K, V, S> HashTable<K, V, S> {
    pub fn with_strategy(strategy: S) -> Self {
        Self::from_parts(Capacity::MIN, strategy)
    }

    /// Fails if `capacity` is not a power of two of at least `MIN_CAPACITY`.
    /// Nothing is allocated on failure.
    pub fn with_capacity_and_strategy(capacity: usize, strategy: S) -> Result<Self, CapacityError> {
        let capacity = Capacity::new(capacity)?;
        Ok(Self::from_parts(capacity, strategy))
    }

    fn from_parts(capacity: Capacity, strategy: S) -> Self {
        Self {
            buckets: BucketArray::new(capacity),
            count: 0,
            strategy,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.capacity() as f64
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Chain length of every bucket, in bucket order.
    pub fn bucket_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.iter().map(Chain::len)
    }

    /// Drops every entry. The capacity is left as is.
    pub fn clear(&mut self) {
        for chain in self.buckets.iter_mut() {
            chain.clear();
        }
        self.count = 0;
    }

    /// Entries in bucket order, each bucket head-to-tail. The order changes
    /// whenever the table resizes.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.buckets.iter().flatten(),
            remaining: self.count,
        }
    }

    fn chain<Q>(&self, key: &Q) -> &Chain<K, V>
    where
        Q: ?Sized,
        S: HashStrategy<Q>,
    {
        let index = self.strategy.index(key, self.buckets.capacity());
        self.buckets
            .get(index)
            .unwrap_or_else(|err| contract_violation(err))
    }

    fn chain_mut<Q>(&mut self, key: &Q) -> &mut Chain<K, V>
    where
        Q: ?Sized,
        S: HashStrategy<Q>,
    {
        let index = self.strategy.index(key, self.buckets.capacity());
        self.buckets
            .get_mut(index)
            .unwrap_or_else(|err| contract_violation(err))
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        S: HashStrategy<Q>,
    {
        self.chain(key).find(key).map(Entry::value)
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        S: HashStrategy<Q>,
    {
        self.chain(key).find(key).map(|e| (e.key(), e.value()))
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        S: HashStrategy<Q>,
    {
        self.chain_mut(key).find_mut(key).map(Entry::value_mut)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        S: HashStrategy<Q>,
    {
        self.chain(key).find(key).is_some()
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq,
    S: HashStrategy<K>,
{
    /// Inserts or overwrites. Returns the displaced value when `key` was
    /// already present; in that case the count and capacity are unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let chain = self.chain_mut(&key);
        if let Some(entry) = chain.find_mut(&key) {
            return Some(core::mem::replace(entry.value_mut(), value));
        }
        chain.append(Entry::new(key, value));
        self.count += 1;
        tracing::trace!(len = self.count, "appended new entry");

        if self.count >= self.buckets.capacity() {
            let target = self
                .buckets
                .sizing()
                .doubled()
                .expect("bucket array capacity overflow");
            self.resize(target, "grow");
        }
        None
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        S: HashStrategy<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        S: HashStrategy<Q>,
    {
        let removed = self.chain_mut(key).remove(key)?;
        self.count -= 1;
        tracing::trace!(len = self.count, "removed entry");

        let capacity = self.buckets.capacity();
        if self.count <= capacity / 4 && capacity > MIN_CAPACITY {
            self.resize(self.buckets.sizing().halved(), "shrink");
        }
        Some(removed)
    }

    /// Rehashes every entry into a new array of `target` buckets.
    ///
    /// Destinations are computed and bounds-checked against the new array
    /// while the old one is still in place. If the strategy panics or
    /// returns an out-of-range index, the table keeps its previous array
    /// untouched.
    fn resize(&mut self, target: Capacity, reason: &'static str) {
        let fresh = BucketArray::new(target);
        let size = fresh.capacity();
        let plan = self
            .buckets
            .iter()
            .flat_map(Chain::iter)
            .map(|(key, _)| fresh.check(self.strategy.index(key, size)))
            .collect::<Result<Vec<usize>, IndexOutOfRange>>()
            .unwrap_or_else(|err| contract_violation(err));

        tracing::debug!(
            from = self.buckets.capacity(),
            to = size,
            len = self.count,
            reason,
            "resizing bucket array"
        );

        let old = core::mem::replace(&mut self.buckets, fresh);
        for ((key, value), index) in old.into_entries().zip(plan) {
            self.buckets
                .get_mut(index)
                .expect("rehash destinations are validated before the swap")
                .append(Entry::new(key, value));
        }
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Eq,
    S: HashStrategy<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Eq,
    S: HashStrategy<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_strategy(S::default());
        table.extend(iter);
        table
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over `(&K, &V)` in bucket order.
pub struct Iter<'a, K, V> {
    inner: core::iter::Flatten<core::slice::Iter<'a, Chain<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<K, V, S> HashTable<K, V, S>
where
    K: Eq,
    S: HashStrategy<K>,
{
    /// Checks every structural invariant; panics with a description on failure.
    pub(crate) fn assert_invariants(&self) {
        let capacity = self.buckets.capacity();
        assert!(capacity >= MIN_CAPACITY, "capacity below floor");
        assert!(capacity.is_power_of_two(), "capacity not a power of two");
        assert!(self.count < capacity, "full table was not grown");

        let mut total = 0;
        for (index, chain) in self.buckets.iter().enumerate() {
            total += chain.len();

            let forward: Vec<*const K> = chain.iter().map(|(k, _)| k as *const K).collect();
            let mut backward: Vec<*const K> =
                chain.iter().rev().map(|(k, _)| k as *const K).collect();
            backward.reverse();
            assert_eq!(forward, backward, "prev links disagree with next links");

            let keys: Vec<&K> = chain.iter().map(|(k, _)| k).collect();
            for (i, k) in keys.iter().enumerate() {
                assert_eq!(
                    self.strategy.index(*k, capacity),
                    index,
                    "entry stored in the wrong bucket"
                );
                assert!(
                    keys[i + 1..].iter().all(|other| other != k),
                    "duplicate key in chain"
                );
            }
        }
        assert_eq!(total, self.count, "count disagrees with chain lengths");
    }
}
