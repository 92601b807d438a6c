//! Fixed-capacity bucket array addressed by a precomputed hash.

/// A boxed slice of `T` whose length never changes after construction.
/// Resizing a table means building a new array and moving entries across.
#[derive(Debug)]
pub(crate) struct BucketArray<T> {
    slots: Box<[T]>,
}

impl<T: Default> BucketArray<T> {
    /// `capacity` must be at least 1.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 1);
        let slots = core::iter::repeat_with(T::default).take(capacity).collect();
        Self { slots }
    }
}

impl<T> BucketArray<T> {
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn index_of(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    #[inline]
    pub(crate) fn bucket(&self, hash: u64) -> &T {
        &self.slots[self.index_of(hash)]
    }

    #[inline]
    pub(crate) fn bucket_mut(&mut self, hash: u64) -> &mut T {
        let i = self.index_of(hash);
        &mut self.slots[i]
    }

    pub(crate) fn iter(&self) -> core::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub(crate) fn into_buckets(self) -> std::vec::IntoIter<T> {
        self.slots.into_vec().into_iter()
    }
}
