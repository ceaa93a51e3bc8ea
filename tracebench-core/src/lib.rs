//! TRACEBENCH Core - Value Types and Contracts
//!
//! Pure data types shared between the workload driver and the data-access
//! layer: operations, batches, status codes, the measurement-sink contract,
//! and the error taxonomy. No business logic lives here.

pub mod batch;
pub mod error;
pub mod measurements;
pub mod operation;
pub mod properties;

pub use batch::{BatchRequest, BatchResult};
pub use error::{BackendError, BenchError, BenchResult, ConfigError};
pub use measurements::MeasurementSink;
pub use operation::{DbOperation, Field, OperationKind, Status, TimestampedValue};
pub use properties::Properties;
