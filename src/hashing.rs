//! Polynomial rolling hash used as the default `BuildHasher` for tables.
//!
//! Every unit written to the hasher is folded as `h = h * 33 + unit`. For
//! string keys the units are the UTF-8 bytes of the string (identical to its
//! code points for ASCII) followed by the `0xff` terminator that `str`'s
//! `Hash` impl appends. Any other `K: Hash` is hashed structurally by feeding
//! its derived `Hash` stream through the same fold, so a table works for
//! mixed key types without a hand-written hash per type.
//!
//! Not collision resistant; tables must only hold trusted keys.

use core::hash::{BuildHasher, Hasher};

const MULTIPLIER: u64 = 33;

/// Stateless builder for [`PolyHasher`]. Deterministic across runs, so
/// iteration order of a table depends only on its insert/delete history.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PolyState;

impl BuildHasher for PolyState {
    type Hasher = PolyHasher;

    #[inline]
    fn build_hasher(&self) -> PolyHasher {
        PolyHasher::default()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PolyHasher {
    h: u64,
}

impl Hasher for PolyHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.h = self.h.wrapping_mul(MULTIPLIER).wrapping_add(u64::from(b));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.h
    }
}
