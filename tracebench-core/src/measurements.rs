//! Measurement-sink contract.
//!
//! The statistics aggregator is an external collaborator; this crate only
//! defines the surface the execution wrapper reports into. Both methods are
//! fire-and-forget: implementations must be non-blocking and infallible from
//! the caller's point of view.

use crate::operation::OperationKind;
use std::time::Duration;

/// Receiver for per-operation latency samples and cache hit accounting.
pub trait MeasurementSink: Send + Sync {
    /// Record one completed operation of `kind` taking `elapsed`.
    fn report(&self, kind: OperationKind, elapsed: Duration);

    /// Record that `hit_count` of `total_count` attempted point reads were
    /// satisfied from cache.
    fn report_read(&self, hit_count: u64, total_count: u64);
}
