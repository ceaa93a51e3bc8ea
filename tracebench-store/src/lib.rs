//! TRACEBENCH Store - Backends, Cache, and Instrumented Execution
//!
//! The data-access core of the TRACEBENCH harness: a pluggable backend
//! registry, the backend capability contract, a read-through cache client
//! for an external key/value service, and the instrumented wrapper that
//! gives single-operation and transactional requests a uniform execution
//! and measurement path.
//!
//! A workload driver asks the [`registry`] to construct a backend by name,
//! wraps it in an [`InstrumentedDb`] together with a measurement sink and an
//! optional [`CacheClient`], and issues every subsequent operation through
//! the wrapper.

pub mod backend;
pub mod cache;
pub mod instrumented;
pub mod memory;
pub mod registry;

pub use backend::{BackendCtor, DbBackend};
pub use cache::{
    CacheClient, CacheLookup, CacheTransport, CacheTransportError, InMemoryTransport,
    MemcachedTransport,
};
pub use instrumented::InstrumentedDb;
pub use memory::MemoryBackend;
