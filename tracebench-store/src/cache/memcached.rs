//! Memcached transport.
//!
//! Thin adapter from [`CacheTransport`] to the `memcache` client, connected
//! to a list of `(host, port)` endpoints supplied at construction time.

use super::transport::{CacheTransport, CacheTransportError};
use std::time::Duration;

/// Transport backed by a memcached fleet.
pub struct MemcachedTransport {
    client: memcache::Client,
}

impl MemcachedTransport {
    /// Connect to the given endpoints.
    pub fn connect(endpoints: &[(String, u16)]) -> Result<Self, CacheTransportError> {
        let urls: Vec<String> = endpoints
            .iter()
            .map(|(host, port)| format!("memcache://{}:{}", host, port))
            .collect();
        let client = memcache::Client::connect(urls).map_err(|err| {
            CacheTransportError::Unreachable {
                reason: err.to_string(),
            }
        })?;
        Ok(Self { client })
    }
}

impl CacheTransport for MemcachedTransport {
    fn fetch(&self, key: &str) -> Result<Option<String>, CacheTransportError> {
        self.client
            .get::<String>(key)
            .map_err(|err| CacheTransportError::Protocol {
                reason: err.to_string(),
            })
    }

    fn store(
        &self,
        key: &str,
        value: &str,
        expiry: Option<Duration>,
    ) -> Result<(), CacheTransportError> {
        // memcached expiration is in seconds; 0 means "never expire".
        let expiration = expiry.map_or(0, |d| d.as_secs() as u32);
        self.client
            .set(key, value, expiration)
            .map_err(|err| CacheTransportError::Protocol {
                reason: err.to_string(),
            })
    }

    fn remove(&self, key: &str) -> Result<bool, CacheTransportError> {
        self.client
            .delete(key)
            .map_err(|err| CacheTransportError::Protocol {
                reason: err.to_string(),
            })
    }
}
