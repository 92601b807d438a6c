//! socialsim: a chained, load-factor-driven hash table and the social
//! graph simulation built on top of it.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one storage primitive (`HashTable`) backing every collection,
//!   and a social graph whose probabilistic evolution can tell, without
//!   trial and error, when it has nothing left to do.
//! - Layers:
//!   - HashTable<K, V, S>: separate chaining over a `BucketArray`; grows
//!     and shrinks by configurable factors to keep the load factor between
//!     a minimum and a maximum.
//!   - Set<T> and OrderedSet<T>: presence-only wrappers; OrderedSet also
//!     threads its items through a `ChainList` so removal is O(1).
//!   - SocialNetwork: arenas of `Person` and `Post` addressed by
//!     generational handles, plus a name index; every relation is stored
//!     on both ends and only the network edits them.
//!   - evolve: one timestep, collect-then-apply.
//!   - reachability: one traversal per person computing the likes and
//!     follows evolution can ever produce; saturation compares against it.
//!   - Simulation: seeded runner tying the two together.
//!
//! Constraints
//! - Single-threaded; no internal locking.
//! - Load factor stays strictly between the bounds after every insert or
//!   delete, except that capacity never drops below 1.
//! - A timestep's outcome does not depend on the order people are visited
//!   in; no person sees another's change from the same timestep.
//!
//! Hasher and rehashing invariants
//! - The default hasher folds bytes as `h * 33 + byte` (`PolyState`).
//! - Each entry stores its hash; resizing redistributes by the stored hash
//!   and never calls `K: Hash` again.
//! - A debug-only reentrancy guard rejects nested table access from inside
//!   `K: Eq/Hash` while a table method is running.
//!
//! Handles
//! - `PersonId`/`PostId` are generational: a handle to a deleted entity
//!   never resolves again, so dangling relations are detected as
//!   `NotFound` instead of aliasing a new entity.

mod bucket;
pub mod chain;
pub mod entity;
pub mod error;
pub mod evolve;
pub mod hash_table;
mod hash_table_proptest;
pub mod hashing;
pub mod network;
pub mod ordered_set;
pub mod ranking;
pub mod reachability;
mod reentrancy;
pub mod set;
pub mod simulation;

// Public surface
pub use entity::{Person, PersonId, Post, PostId};
pub use error::{Error, Result};
pub use evolve::{evolve, Interactions};
pub use hash_table::{HashTable, LoadParams};
pub use hashing::{PolyHasher, PolyState};
pub use network::SocialNetwork;
pub use ordered_set::OrderedSet;
pub use ranking::{people_by_popularity, posts_by_popularity};
pub use reachability::{completion, is_saturated, precompute_reachability, reach_of, Completion, Reach};
pub use set::Set;
pub use simulation::{RunSummary, Simulation, SimulationConfig, TimestepReport};
