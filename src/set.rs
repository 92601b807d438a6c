//! Set: presence-only wrapper over [`HashTable`].

use crate::error::{Error, Result};
use crate::hash_table::{HashTable, LoadParams};
use crate::hashing::PolyState;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

pub struct Set<T, S = PolyState> {
    table: HashTable<T, (), S>,
}

impl<T> Set<T>
where
    T: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            table: HashTable::new(),
        }
    }

    pub fn with_params(capacity: usize, params: LoadParams) -> Result<Self> {
        Ok(Self {
            table: HashTable::with_params(capacity, params)?,
        })
    }
}

impl<T> Default for Set<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> Set<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns `false` if `item` is present; the stored item is kept.
    pub fn add(&mut self, item: T) -> bool {
        self.table.set(item, ())
    }

    pub fn remove<Q>(&mut self, item: &Q) -> Result<()>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table
            .delete(item)
            .map_err(|_| Error::NotFound("item not present in set".to_string()))
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.contains(item)
    }

    /// Unspecified order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.table.keys()
    }
}

impl<T, S> core::fmt::Debug for Set<T, S>
where
    T: Eq + Hash + core::fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
