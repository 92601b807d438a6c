//! OrderedSet: a set that remembers insertion order.
//!
//! Membership goes through a [`HashTable`] keyed by the item whose value is
//! the item's [`Link`] into a [`ChainList`]; `remove` looks the link up and
//! unlinks the node directly, so it never scans the order chain.

use crate::chain::{self, ChainList, Link};
use crate::error::{Error, Result};
use crate::hash_table::HashTable;
use core::borrow::Borrow;
use core::hash::Hash;

pub struct OrderedSet<T> {
    index: HashTable<T, Link>,
    order: ChainList<T>,
}

impl<T> Default for OrderedSet<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedSet<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            index: HashTable::new(),
            order: ChainList::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn add_first(&mut self, item: T) -> bool {
        if self.index.contains(&item) {
            return false;
        }
        let link = self.order.push_front(item.clone());
        self.index.set(item, link)
    }

    pub fn add_last(&mut self, item: T) -> bool {
        if self.index.contains(&item) {
            return false;
        }
        let link = self.order.push_back(item.clone());
        self.index.set(item, link)
    }

    pub fn remove<Q>(&mut self, item: &Q) -> Result<()>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let link = self
            .index
            .delete(item)
            .map_err(|_| Error::NotFound("item not present in ordered set".to_string()))?;
        let removed = self.order.remove(link);
        debug_assert!(removed.is_some(), "index and order chain out of sync");
        Ok(())
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains(item)
    }

    pub fn first(&self) -> Option<&T> {
        self.order.front()
    }

    pub fn last(&self) -> Option<&T> {
        self.order.back()
    }

    /// Front-to-back: oldest first for `add_last`, newest first for `add_first`.
    pub fn iter(&self) -> chain::Iter<'_, T> {
        self.order.iter()
    }
}

impl<T> core::fmt::Debug for OrderedSet<T>
where
    T: Eq + Hash + Clone + core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
