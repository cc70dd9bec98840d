//! Chain: the doubly linked list stored in each bucket.
//!
//! Nodes live in a per-chain `SlotMap`; `prev`/`next`/`head`/`tail` are
//! generational `Link` keys into it. The chain's length is the number of live
//! nodes in that arena, so it cannot disagree with the linked structure.

use core::borrow::Borrow;
use core::fmt;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Link to a node inside one chain's arena.
    pub struct Link;
}

/// A key/value pair threaded into a chain.
#[derive(Debug)]
pub struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<Link>,
    next: Option<Link>,
}

impl<K, V> Entry<K, V> {
    /// A detached entry; links are filled in by `Chain::append`.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

pub struct Chain<K, V> {
    nodes: SlotMap<Link, Entry<K, V>>,
    head: Option<Link>,
    tail: Option<Link>,
}

impl<K, V> Chain<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Links `entry` after the current tail. O(1).
    pub fn append(&mut self, mut entry: Entry<K, V>) {
        entry.prev = self.tail;
        entry.next = None;
        let link = self.nodes.insert(entry);
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(link),
            None => self.head = Some(link),
        }
        self.tail = Some(link);
    }

    pub fn front(&self) -> Option<&Entry<K, V>> {
        self.head.map(|link| &self.nodes[link])
    }

    pub fn back(&self) -> Option<&Entry<K, V>> {
        self.tail.map(|link| &self.nodes[link])
    }

    /// Unlinks and returns the head entry.
    pub fn pop_front(&mut self) -> Option<Entry<K, V>> {
        let head = self.head?;
        Some(self.unlink(head))
    }

    /// Drops every entry. Idempotent.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Head-to-tail iterator; `.rev()` walks tail-to-head over `prev` links.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.nodes.len(),
        }
    }

    fn unlink(&mut self, link: Link) -> Entry<K, V> {
        let entry = self
            .nodes
            .remove(link)
            .expect("chain link must refer to a live node");
        match entry.prev {
            Some(prev) => self.nodes[prev].next = entry.next,
            None => self.head = entry.next,
        }
        match entry.next {
            Some(next) => self.nodes[next].prev = entry.prev,
            None => self.tail = entry.prev,
        }
        entry
    }

    fn position<Q>(&self, key: &Q) -> Option<Link>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cursor = self.head;
        while let Some(link) = cursor {
            let entry = &self.nodes[link];
            if entry.key.borrow() == key {
                return Some(link);
            }
            cursor = entry.next;
        }
        None
    }

    /// Linear scan from the head.
    pub fn find<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.position(key).map(|link| &self.nodes[link])
    }

    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let link = self.position(key)?;
        self.nodes.get_mut(link)
    }

    /// Unlinks the entry for `key`, repairing `head`/`tail` when it is an endpoint.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let link = self.position(key)?;
        Some(self.unlink(link).into_parts())
    }
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Chain<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a chain, in link order.
pub struct Iter<'a, K, V> {
    nodes: &'a SlotMap<Link, Entry<K, V>>,
    front: Option<Link>,
    back: Option<Link>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let entry = &nodes[self.front?];
        self.front = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let entry = &nodes[self.back?];
        self.back = entry.prev;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> IntoIterator for &'a Chain<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Draining iterator: yields owned pairs head-to-tail.
pub struct IntoIter<K, V> {
    chain: Chain<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.chain.pop_front().map(Entry::into_parts)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chain.len(), Some(self.chain.len()))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for Chain<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}
