//! Debug-only busy marker for a hash table.
//!
//! A table calls into user code only through `K: Eq` (chain scans) and
//! `K: Hash` (hashing a query or a new key). Every public entry point opens a
//! [`Section`] naming the [`Phase`] it is in; an insert or delete that ends
//! up resizing switches its section to [`Phase::Resize`] before the bucket
//! array is swapped out. Opening a second section while one is open means
//! user code reached back into the table, and panics naming the phase that
//! was interrupted. Release builds keep only the types.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    Lookup,
    Insert,
    Delete,
    Resize,
}

#[derive(Debug)]
pub(crate) struct BusyMarker {
    #[cfg(debug_assertions)]
    active: Cell<Option<Phase>>,
    // Tables are single-writer; keep the marker !Send + !Sync.
    _single_thread: PhantomData<*mut ()>,
}

impl BusyMarker {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _single_thread: PhantomData,
        }
    }

    /// Open a section. Panics in debug builds if one is already open.
    #[inline]
    pub(crate) fn enter(&self, phase: Phase) -> Section<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(busy) = self.active.replace(Some(phase)) {
                self.active.set(Some(busy));
                panic!("hash table re-entered during {busy:?} (attempted {phase:?})");
            }
        }
        #[cfg(not(debug_assertions))]
        let _ = phase;
        Section { owner: self }
    }

    #[cfg(all(test, debug_assertions))]
    pub(crate) fn current(&self) -> Option<Phase> {
        self.active.get()
    }
}

/// Open section of a [`BusyMarker`]; closes on drop.
pub(crate) struct Section<'a> {
    owner: &'a BusyMarker,
}

impl Section<'_> {
    /// Move the open section to another phase, e.g. an insert that resizes.
    #[inline]
    pub(crate) fn switch(&self, phase: Phase) {
        #[cfg(debug_assertions)]
        self.owner.active.set(Some(phase));
        #[cfg(not(debug_assertions))]
        let _ = (self.owner, phase);
    }
}

impl Drop for Section<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.active.set(None);
    }
}
