//! Instrumented execution wrapper.
//!
//! The single call surface workload drivers use. Composes an owned backend,
//! an optional cache client, and a measurement sink; decides cache-vs-backend
//! routing, times each request on a monotonic clock, and reports samples only
//! for requests that complete with an OK status, so the reported latency
//! distribution reflects completed work rather than failed attempts.

use crate::backend::DbBackend;
use crate::cache::{CacheClient, CacheLookup};
use std::sync::Arc;
use std::time::Instant;
use tracebench_core::{
    BatchRequest, BatchResult, BenchResult, DbOperation, Field, MeasurementSink, OperationKind,
    Status, TimestampedValue,
};
use tracing::warn;

/// Measured, cache-aware front to a storage backend.
///
/// Owns its backend exclusively; the cache client and measurement sink are
/// shared with the surrounding harness and must outlive the wrapper. A
/// wrapper holds no per-call state, so one instance serves any number of
/// worker threads.
///
/// Cache consistency relies on invalidate-on-write ordering only: the
/// backend write completes, then the cached entry is evicted. A reader
/// racing between those two steps may observe one stale hit.
pub struct InstrumentedDb {
    backend: Box<dyn DbBackend>,
    measurements: Arc<dyn MeasurementSink>,
    cache: Option<Arc<CacheClient>>,
}

impl InstrumentedDb {
    /// Wrap `backend`. A `None` cache means no caching layer: reads fall
    /// straight through to the backend and only timing is reported.
    pub fn new(
        backend: Box<dyn DbBackend>,
        measurements: Arc<dyn MeasurementSink>,
        cache: Option<Arc<CacheClient>>,
    ) -> Self {
        Self {
            backend,
            measurements,
            cache,
        }
    }

    /// Delegates to the backend's (idempotent) setup.
    pub fn init(&mut self) -> BenchResult<()> {
        self.backend.init()
    }

    /// Tear down the backend and the cache client. Both releases are
    /// attempted regardless of individual failure; the backend's outcome is
    /// returned and a cache teardown failure is only logged.
    pub fn cleanup(&mut self) -> BenchResult<()> {
        let backend_result = self.backend.cleanup();
        if let Some(cache) = &self.cache {
            if !cache.close() {
                warn!("cache client teardown failed");
            }
        }
        backend_result
    }

    /// Execute and measure a single operation.
    ///
    /// The operation is wrapped into a one-element batch (`read_only` iff it
    /// is a point read) and routed through the shared batch path. On an OK
    /// outcome one latency sample is reported under the operation's kind,
    /// plus a hit/attempt sample when the operation was a READ and caching
    /// is enabled. Transaction-kind operations and operations violating the
    /// value-presence invariant return [`Status::BadRequest`].
    pub fn execute(
        &self,
        operation: &DbOperation,
        result_buffer: &mut Vec<TimestampedValue>,
        within_transaction: bool,
    ) -> Status {
        let read_only = operation.kind == OperationKind::Read;
        let timer = Instant::now();
        let request =
            match BatchRequest::new(vec![operation.clone()], within_transaction, read_only) {
                Ok(request) => request,
                Err(_) => return Status::BadRequest,
            };
        let outcome = self.run_batch(&request);
        result_buffer.extend(outcome.values);
        let elapsed = timer.elapsed();

        if outcome.status.is_ok() {
            self.measurements.report(operation.kind, elapsed);
            if read_only && self.cache.is_some() {
                self.measurements
                    .report_read(outcome.hit_count, outcome.total_count);
            }
        }
        outcome.status
    }

    /// Execute and measure a caller-declared all-or-nothing batch.
    ///
    /// A `read_only` batch containing a write kind is rejected with
    /// [`Status::BadRequest`]. On success exactly one sample is reported,
    /// labeled `READ_TRANSACTION` or `WRITE_TRANSACTION`; read-only batches
    /// with caching enabled also report aggregate hit counts. A failed
    /// transaction reports nothing: it is not a completed unit of work.
    pub fn execute_transaction(
        &self,
        operations: &[DbOperation],
        result_buffer: &mut Vec<TimestampedValue>,
        read_only: bool,
    ) -> Status {
        let timer = Instant::now();
        let request = match BatchRequest::new(operations.to_vec(), true, read_only) {
            Ok(request) => request,
            Err(_) => return Status::BadRequest,
        };
        let outcome = self.run_batch(&request);
        result_buffer.extend(outcome.values);
        let elapsed = timer.elapsed();

        if !outcome.status.is_ok() {
            return outcome.status;
        }
        if read_only {
            self.measurements
                .report(OperationKind::ReadTransaction, elapsed);
            if self.cache.is_some() {
                self.measurements
                    .report_read(outcome.hit_count, outcome.total_count);
            }
        } else {
            self.measurements
                .report(OperationKind::WriteTransaction, elapsed);
        }
        Status::Ok
    }

    /// Bulk load pass-through: no caching, no timing.
    pub fn batch_insert(
        &self,
        table: &str,
        keys: &[Vec<Field>],
        values: &[TimestampedValue],
    ) -> Status {
        self.backend.batch_insert(table, keys, values)
    }

    /// Bulk key-range pass-through: no caching, no timing.
    pub fn batch_read(
        &self,
        table: &str,
        floor: &[Field],
        ceil: &[Field],
        limit: usize,
        key_buffer: &mut Vec<Vec<Field>>,
    ) -> Status {
        self.backend.batch_read(table, floor, ceil, limit, key_buffer)
    }

    /// Run every member operation, stopping at the first non-OK status.
    fn run_batch(&self, request: &BatchRequest) -> BatchResult {
        let mut result = BatchResult::new(Status::Ok);
        for operation in &request.operations {
            let status = match operation.kind {
                OperationKind::Read => {
                    result.total_count += 1;
                    self.run_read(operation, &mut result)
                }
                OperationKind::Scan => self.backend.scan(
                    &operation.table,
                    &operation.key,
                    operation.scan_limit,
                    &mut result.values,
                ),
                OperationKind::Update | OperationKind::Insert | OperationKind::Delete => {
                    self.run_write(operation)
                }
                // Batch construction already rejects these.
                OperationKind::ReadTransaction | OperationKind::WriteTransaction => {
                    Status::BadRequest
                }
            };
            if !status.is_ok() {
                result.status = status;
                return result;
            }
        }
        result
    }

    /// Point read: cache lookup first, backend on miss, populate on the way
    /// back.
    fn run_read(&self, operation: &DbOperation, result: &mut BatchResult) -> Status {
        let Some(cache) = &self.cache else {
            return self
                .backend
                .read(&operation.table, &operation.key, &mut result.values);
        };
        match cache.get(operation) {
            CacheLookup::Hit(value) => {
                result.hit_count += 1;
                result.values.push(value);
                Status::Ok
            }
            CacheLookup::Miss => {
                let status =
                    self.backend
                        .read(&operation.table, &operation.key, &mut result.values);
                if status.is_ok() {
                    if let Some(value) = result.values.last() {
                        cache.put(operation, value);
                    }
                }
                status
            }
        }
    }

    /// Write: backend first, then cache eviction on success. Entries are
    /// never updated in place.
    fn run_write(&self, operation: &DbOperation) -> Status {
        let Some(value) = operation.value.as_ref() else {
            return Status::BadRequest;
        };
        let status = match operation.kind {
            OperationKind::Update => {
                self.backend.update(&operation.table, &operation.key, value)
            }
            OperationKind::Insert => {
                self.backend.insert(&operation.table, &operation.key, value)
            }
            OperationKind::Delete => {
                self.backend.delete(&operation.table, &operation.key, value)
            }
            _ => Status::BadRequest,
        };
        if status.is_ok() {
            if let Some(cache) = &self.cache {
                cache.invalidate(operation);
            }
        }
        status
    }
}

// ============================================================================
// TESTS
// ============================================================================
