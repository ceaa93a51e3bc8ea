//! Read-through/write-through cache client for an external key/value service.
//!
//! The cache is a performance optimization, never a source of truth: every
//! transport failure is logged and then collapsed into a miss, so the
//! execution wrapper always has the backend to fall back on. Consistency
//! with the backend relies on invalidate-on-write ordering alone; a reader
//! racing between a backend write and the following invalidation may see
//! one stale hit, which is an accepted, bounded staleness window.

pub mod client;
pub mod codec;
pub mod memcached;
pub mod transport;

pub use client::{CacheClient, CacheLookup};
pub use codec::{decode_value, encode_key, encode_value};
pub use memcached::MemcachedTransport;
pub use transport::{CacheTransport, CacheTransportError, InMemoryTransport};
