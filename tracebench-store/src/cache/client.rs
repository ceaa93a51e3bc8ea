//! Cache client: the adapter between DB operations and the cache transport.
//!
//! Lookup outcomes are a tri-state internally (hit, miss, transport error),
//! but the error leg collapses into a miss here so callers only ever see
//! [`CacheLookup::Hit`] or [`CacheLookup::Miss`] and always fall back to the
//! backend when in doubt.

use super::codec::{decode_value, encode_key, encode_value};
use super::transport::CacheTransport;
use std::time::Duration;
use tracebench_core::{DbOperation, OperationKind, TimestampedValue};
use tracing::warn;

/// Outcome of a cache lookup, as seen by the execution wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(TimestampedValue),
    Miss,
}

/// Read-through/write-through adapter over a [`CacheTransport`].
///
/// Stateless beyond the transport handle; never mutates the backend.
pub struct CacheClient {
    transport: Box<dyn CacheTransport>,
    entry_ttl: Option<Duration>,
}

impl CacheClient {
    pub fn new(transport: Box<dyn CacheTransport>) -> Self {
        Self {
            transport,
            entry_ttl: None,
        }
    }

    /// Expire cached entries after `ttl` (transport permitting).
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.entry_ttl = Some(ttl);
        self
    }

    /// Look up the cached value for a point read.
    ///
    /// # Panics
    ///
    /// Panics if `operation` is not READ-kind; cache lookup is only defined
    /// for point reads.
    pub fn get(&self, operation: &DbOperation) -> CacheLookup {
        assert!(
            operation.kind == OperationKind::Read,
            "cache get is only defined for READ operations"
        );
        let key = encode_key(&operation.key);
        match self.transport.fetch(&key) {
            Ok(Some(raw)) => match decode_value(&raw) {
                Some(value) => CacheLookup::Hit(value),
                None => {
                    warn!(key = %key, "undecodable cache entry, treating as miss");
                    CacheLookup::Miss
                }
            },
            Ok(None) => CacheLookup::Miss,
            Err(err) => {
                warn!(key = %key, error = %err, "cache fetch failed, treating as miss");
                CacheLookup::Miss
            }
        }
    }

    /// Populate the cache after a backend read. Best-effort.
    ///
    /// # Panics
    ///
    /// Panics if `operation` is not READ-kind.
    pub fn put(&self, operation: &DbOperation, value: &TimestampedValue) -> bool {
        assert!(
            operation.kind == OperationKind::Read,
            "cache put is only defined for READ operations"
        );
        let key = encode_key(&operation.key);
        match self.transport.store(&key, &encode_value(value), self.entry_ttl) {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %key, error = %err, "cache put failed");
                false
            }
        }
    }

    /// Evict the cached entry for the operation's key. Best-effort; called
    /// after a successful backend write.
    pub fn invalidate(&self, operation: &DbOperation) -> bool {
        let key = encode_key(&operation.key);
        match self.transport.remove(&key) {
            Ok(_) => true,
            Err(err) => {
                warn!(key = %key, error = %err, "cache invalidate failed");
                false
            }
        }
    }

    /// Release the transport. Best-effort.
    pub fn close(&self) -> bool {
        match self.transport.close() {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "cache transport close failed");
                false
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
