//! Backend capability contract.
//!
//! Every storage engine integrated with the harness implements [`DbBackend`].
//! Operation methods return [`Status`] values and fill caller-supplied
//! buffers; lifecycle methods return `BenchResult` because a backend that
//! failed to initialize must never be handed to a workload driver.

use tracebench_core::{BenchResult, Field, Properties, Status, TimestampedValue};

/// Zero-argument constructor registered with the backend registry.
pub type BackendCtor = fn() -> Box<dyn DbBackend>;

/// Operation surface every storage backend must satisfy.
///
/// Implementations must be safe for concurrent use: operation methods take
/// `&self` and are called from many worker threads at once.
pub trait DbBackend: Send + Sync {
    /// Inject the opaque configuration map before `init` runs.
    ///
    /// Backends pull out the keys they understand and ignore the rest.
    fn set_properties(&mut self, _props: &Properties) -> BenchResult<()> {
        Ok(())
    }

    /// Idempotent setup; called once by the registry before the backend is
    /// returned to a caller.
    fn init(&mut self) -> BenchResult<()>;

    /// Idempotent teardown; safe to call even if `init` partially failed.
    fn cleanup(&mut self) -> BenchResult<()>;

    /// Read the value of `key`, appending it to `buffer` on success.
    fn read(&self, table: &str, key: &[Field], buffer: &mut Vec<TimestampedValue>) -> Status;

    /// Append at most `limit` values in key order starting at `key`.
    fn scan(
        &self,
        table: &str,
        key: &[Field],
        limit: usize,
        buffer: &mut Vec<TimestampedValue>,
    ) -> Status;

    /// Overwrite the current value for an existing key; the status for an
    /// absent key is backend-defined.
    fn update(&self, table: &str, key: &[Field], value: &TimestampedValue) -> Status;

    /// Create a new key/value association.
    fn insert(&self, table: &str, key: &[Field], value: &TimestampedValue) -> Status;

    /// Remove a key/value association.
    fn delete(&self, table: &str, key: &[Field], value: &TimestampedValue) -> Status;

    /// Bulk insert of parallel `keys`/`values` sequences. Partial success
    /// must be reported through the returned status, never by silently
    /// dropping entries.
    fn batch_insert(&self, table: &str, keys: &[Vec<Field>], values: &[TimestampedValue])
        -> Status;

    /// Range query over keys in `[floor, ceil)`, appending at most `limit`
    /// keys to `key_buffer`.
    fn batch_read(
        &self,
        table: &str,
        floor: &[Field],
        ceil: &[Field],
        limit: usize,
        key_buffer: &mut Vec<Vec<Field>>,
    ) -> Status;
}
