//! Cache service transport abstraction.
//!
//! The wire protocol of the cache service is not this crate's concern: a
//! transport is anything that can fetch, store, and remove opaque string
//! values by string key. [`MemcachedTransport`](super::MemcachedTransport)
//! talks to a real cache fleet; [`InMemoryTransport`] is the process-local
//! tier used by tests and by deployments without a cache service.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use thiserror::Error;

/// Transport-level cache failures.
///
/// These never escape the cache client: the client logs them and reports a
/// miss (or a failed best-effort write) to its caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheTransportError {
    #[error("Cache service unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("Cache protocol error: {reason}")]
    Protocol { reason: String },

    #[error("Cache store lock poisoned")]
    LockPoisoned,
}

/// Key/value capability of an external cache service.
pub trait CacheTransport: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    fn fetch(&self, key: &str) -> Result<Option<String>, CacheTransportError>;

    /// Store `value` under `key`, with an optional expiration.
    fn store(&self, key: &str, value: &str, expiry: Option<Duration>)
        -> Result<(), CacheTransportError>;

    /// Remove the entry under `key`; returns whether an entry existed.
    fn remove(&self, key: &str) -> Result<bool, CacheTransportError>;

    /// Release the transport. Default is a no-op for connectionless
    /// transports.
    fn close(&self) -> Result<(), CacheTransportError> {
        Ok(())
    }
}

/// Process-local transport backed by a map; ignores expirations.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub fn entry_count(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }
}

impl CacheTransport for InMemoryTransport {
    fn fetch(&self, key: &str) -> Result<Option<String>, CacheTransportError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| CacheTransportError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn store(
        &self,
        key: &str,
        value: &str,
        _expiry: Option<Duration>,
    ) -> Result<(), CacheTransportError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheTransportError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, CacheTransportError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CacheTransportError::LockPoisoned)?;
        Ok(entries.remove(key).is_some())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_absent_key_is_none() {
        let transport = InMemoryTransport::new();
        assert_eq!(transport.fetch("k1"), Ok(None));
    }

    #[test]
    fn test_store_fetch_roundtrip() {
        let transport = InMemoryTransport::new();
        transport.store("k1", "v1", None).unwrap();
        assert_eq!(transport.fetch("k1"), Ok(Some("v1".to_string())));
        assert_eq!(transport.entry_count(), 1);
    }

    #[test]
    fn test_store_overwrites() {
        let transport = InMemoryTransport::new();
        transport.store("k1", "v1", None).unwrap();
        transport.store("k1", "v2", Some(Duration::from_secs(60))).unwrap();
        assert_eq!(transport.fetch("k1"), Ok(Some("v2".to_string())));
    }

    #[test]
    fn test_remove_reports_presence() {
        let transport = InMemoryTransport::new();
        transport.store("k1", "v1", None).unwrap();
        assert_eq!(transport.remove("k1"), Ok(true));
        assert_eq!(transport.remove("k1"), Ok(false));
        assert_eq!(transport.fetch("k1"), Ok(None));
    }
}
