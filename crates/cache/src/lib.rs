//! In-memory caching for envdoctor
//!
//! [`BoundedCache`] is a fixed-capacity key/value store with strict
//! least-recently-used eviction. Lookups, inserts, deletes and evictions are
//! all O(1).

pub mod lru;

pub use lru::BoundedCache;
