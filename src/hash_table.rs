//! HashTable: separate-chaining map with load-factor-driven resizing.
//!
//! Buckets are a fixed [`BucketArray`] of unordered chains. Each entry caches
//! the `u64` hash computed when its key was inserted; rehashing during a resize
//! only uses the cached hash, so `K: Hash` is never invoked after insertion and
//! a resize cannot call back into user code.
//!
//! Load factor (`len / capacity`) bounds are enforced on the way out of every
//! mutating call:
//! - `set` of a new key grows while `len / capacity >= max_load_factor`; each
//!   step moves to `ceil(capacity * (1 + growth_factor))` buckets, clamped so
//!   the result never falls to `min_load_factor`.
//! - `delete` shrinks while `len / capacity <= min_load_factor` and
//!   `capacity > 1`; each step moves to `floor(capacity * (1 - shrink_factor))`
//!   buckets, clamped so the result never reaches `max_load_factor` and never
//!   drops below 1.

use crate::bucket::BucketArray;
use crate::error::{Error, Result};
use crate::hashing::PolyState;
use crate::reentrancy::{BusyMarker, Phase};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use tracing::trace;

/// Resize policy of a [`HashTable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadParams {
    pub min_load_factor: f64,
    pub max_load_factor: f64,
    pub growth_factor: f64,
    pub shrink_factor: f64,
}

impl Default for LoadParams {
    fn default() -> Self {
        Self {
            min_load_factor: 0.5,
            max_load_factor: 5.0,
            growth_factor: 0.5,
            shrink_factor: 0.25,
        }
    }
}

impl LoadParams {
    /// All factors must be finite and positive, `shrink_factor < 1` so a
    /// shrink keeps at least one bucket, and `max > 2 * min` so some
    /// capacity always puts the load strictly between the two after a resize.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidArgument(format!("{name} must be > 0, got {v}")))
            }
        };
        positive("min_load_factor", self.min_load_factor)?;
        positive("max_load_factor", self.max_load_factor)?;
        positive("growth_factor", self.growth_factor)?;
        positive("shrink_factor", self.shrink_factor)?;
        if self.max_load_factor <= 2.0 * self.min_load_factor {
            return Err(Error::InvalidArgument(format!(
                "min_load_factor ({}) must be below half of max_load_factor ({})",
                self.min_load_factor, self.max_load_factor
            )));
        }
        if self.shrink_factor >= 1.0 {
            return Err(Error::InvalidArgument(format!(
                "shrink_factor must be < 1, got {}",
                self.shrink_factor
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

type Chain<K, V> = Vec<Entry<K, V>>;

pub struct HashTable<K, V, S = PolyState> {
    hasher: S,
    buckets: BucketArray<Chain<K, V>>,
    len: usize,
    params: LoadParams,
    busy: BusyMarker,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Empty table with a single bucket and default [`LoadParams`].
    pub fn new() -> Self {
        Self::build(1, LoadParams::default(), PolyState)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_params(capacity, LoadParams::default())
    }

    pub fn with_params(capacity: usize, params: LoadParams) -> Result<Self> {
        Self::with_params_and_hasher(capacity, params, PolyState)
    }
}

impl<K, V> Default for HashTable<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(key, value)` pairs in bucket order.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain<K, V>>,
    chain: core::slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.next() {
                self.remaining -= 1;
                return Some((&e.key, &e.value));
            }
            self.chain = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_params_and_hasher(capacity: usize, params: LoadParams, hasher: S) -> Result<Self> {
        if capacity < 1 {
            return Err(Error::InvalidArgument(format!(
                "capacity must be >= 1, got {capacity}"
            )));
        }
        params.validate()?;
        Ok(Self::build(capacity, params, hasher))
    }

    fn build(capacity: usize, params: LoadParams, hasher: S) -> Self {
        Self {
            hasher,
            buckets: BucketArray::new(capacity),
            len: 0,
            params,
            busy: BusyMarker::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    pub fn params(&self) -> LoadParams {
        self.params
    }

    /// Insert or overwrite. Returns `true` iff `key` was not present; on
    /// overwrite the stored key is kept and only the value is replaced.
    pub fn set(&mut self, key: K, value: V) -> bool {
        let section = self.busy.enter(Phase::Insert);
        let hash = self.make_hash(&key);
        let chain = self.buckets.bucket_mut(hash);
        if let Some(e) = chain.iter_mut().find(|e| e.hash == hash && e.key == key) {
            e.value = value;
            return false;
        }
        chain.push(Entry { key, value, hash });
        self.len += 1;
        if let Some(capacity) = self.grown_capacity() {
            section.switch(Phase::Resize);
            rehash(&mut self.buckets, capacity, self.len);
        }
        true
    }

    pub fn get<Q>(&self, q: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _section = self.busy.enter(Phase::Lookup);
        let hash = self.make_hash(q);
        self.buckets
            .bucket(hash)
            .iter()
            .find(|e| e.hash == hash && e.key.borrow() == q)
            .map(|e| &e.value)
            .ok_or_else(missing_key)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _section = self.busy.enter(Phase::Lookup);
        let hash = self.make_hash(q);
        self.buckets
            .bucket_mut(hash)
            .iter_mut()
            .find(|e| e.hash == hash && e.key.borrow() == q)
            .map(|e| &mut e.value)
            .ok_or_else(missing_key)
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _section = self.busy.enter(Phase::Lookup);
        let hash = self.make_hash(q);
        self.buckets
            .bucket(hash)
            .iter()
            .any(|e| e.hash == hash && e.key.borrow() == q)
    }

    /// Remove `q` and return its value.
    pub fn delete<Q>(&mut self, q: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let section = self.busy.enter(Phase::Delete);
        let hash = self.make_hash(q);
        let chain = self.buckets.bucket_mut(hash);
        let pos = chain
            .iter()
            .position(|e| e.hash == hash && e.key.borrow() == q)
            .ok_or_else(missing_key)?;
        // Chains are unordered.
        let entry = chain.swap_remove(pos);
        self.len -= 1;
        if let Some(capacity) = self.shrunk_capacity() {
            section.switch(Phase::Resize);
            rehash(&mut self.buckets, capacity, self.len);
        }
        Ok(entry.value)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: (&[]).iter(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Capacity needed after an insert, if it differs from the current one.
    fn grown_capacity(&self) -> Option<usize> {
        let mut capacity = self.capacity();
        while self.len as f64 / capacity as f64 >= self.params.max_load_factor {
            let next = (capacity as f64 * (1.0 + self.params.growth_factor)).ceil() as usize;
            capacity = next.max(capacity + 1);
        }
        if capacity == self.capacity() {
            return None;
        }
        // A large growth factor can overshoot below min; pull back to the
        // largest capacity that keeps the load above it.
        let ceiling = (self.len as f64 / self.params.min_load_factor).ceil() as usize - 1;
        capacity = capacity.min(ceiling).max(self.max_floor());
        (capacity != self.capacity()).then_some(capacity)
    }

    /// Smallest capacity that keeps the load factor strictly below max.
    fn max_floor(&self) -> usize {
        (self.len as f64 / self.params.max_load_factor).floor() as usize + 1
    }

    /// Capacity needed after a delete, if it differs from the current one.
    fn shrunk_capacity(&self) -> Option<usize> {
        let floor = self.max_floor();
        let mut capacity = self.capacity();
        while capacity > floor && self.len as f64 / capacity as f64 <= self.params.min_load_factor {
            let next = (capacity as f64 * (1.0 - self.params.shrink_factor)).floor() as usize;
            capacity = next.max(floor);
        }
        (capacity != self.capacity()).then_some(capacity)
    }
}

fn rehash<K, V>(buckets: &mut BucketArray<Chain<K, V>>, capacity: usize, len: usize) {
    trace!(from = buckets.capacity(), to = capacity, len, "hash table resize");
    let old = core::mem::replace(buckets, BucketArray::new(capacity));
    for entry in old.into_buckets().flatten() {
        buckets.bucket_mut(entry.hash).push(entry);
    }
}

fn missing_key() -> Error {
    Error::NotFound("key not present in hash table".to_string())
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, S> core::fmt::Debug for HashTable<K, V, S>
where
    K: Eq + Hash + core::fmt::Debug,
    V: core::fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
