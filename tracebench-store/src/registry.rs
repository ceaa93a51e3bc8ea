//! Process-wide backend registry.
//!
//! Decouples backend selection (the `dbname` property) from construction.
//! The registry is populated at process start, before any workload thread
//! calls [`create`]; entries are never removed at runtime, and re-registering
//! a name overwrites the prior constructor so tests can substitute doubles.

use crate::backend::{BackendCtor, DbBackend};
use crate::cache::CacheClient;
use crate::instrumented::InstrumentedDb;
use crate::memory::MemoryBackend;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracebench_core::{BackendError, BenchResult, MeasurementSink, Properties};
use tracing::debug;

/// Property key naming the backend to construct.
pub const DBNAME_PROPERTY: &str = "dbname";

/// Backend assumed when the property map does not name one.
const DEFAULT_DBNAME: &str = "test";

static REGISTRY: Lazy<RwLock<HashMap<String, BackendCtor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Associate `name` with a backend constructor. Last registration wins.
pub fn register(name: impl Into<String>, ctor: BackendCtor) {
    let name = name.into();
    debug!(backend = %name, "registering backend");
    REGISTRY.write().unwrap().insert(name, ctor);
}

/// Register the built-in backends. Called once at process start.
pub fn register_builtins() {
    register(MemoryBackend::NAME, || Box::new(MemoryBackend::new()));
}

/// Construct, configure, and initialize the backend named by the `dbname`
/// property.
///
/// Failures at any step (unknown name, property rejection, init) propagate
/// and no partially-constructed instance escapes.
pub fn create(props: &Properties) -> BenchResult<Box<dyn DbBackend>> {
    let name = props.get_or(DBNAME_PROPERTY, DEFAULT_DBNAME);
    let ctor = REGISTRY
        .read()
        .unwrap()
        .get(name)
        .copied()
        .ok_or_else(|| BackendError::Unknown {
            name: name.to_string(),
        })?;
    let mut backend = ctor();
    backend.set_properties(props)?;
    backend.init()?;
    debug!(backend = %name, "backend ready");
    Ok(backend)
}

/// Construct a backend and wrap it for measured execution.
pub fn create_instrumented(
    props: &Properties,
    measurements: Arc<dyn MeasurementSink>,
    cache: Option<Arc<CacheClient>>,
) -> BenchResult<InstrumentedDb> {
    Ok(InstrumentedDb::new(create(props)?, measurements, cache))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tracebench_core::{BenchError, Field, Status, TimestampedValue};

    fn props(name: &str) -> Properties {
        Properties::new().with(DBNAME_PROPERTY, name)
    }

    #[test]
    fn test_create_unknown_backend_fails() {
        let result = create(&props("no-such-backend"));
        assert!(matches!(
            result,
            Err(BenchError::Backend(BackendError::Unknown { .. }))
        ));
    }

    #[test]
    fn test_create_without_dbname_uses_default() {
        // "test" is deliberately never registered here.
        let result = create(&Properties::new());
        match result {
            Err(BenchError::Backend(BackendError::Unknown { name })) => {
                assert_eq!(name, "test");
            }
            other => panic!("expected unknown-backend error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_register_builtins_creates_working_memory_backend() {
        register_builtins();
        let backend = create(&props(MemoryBackend::NAME)).unwrap();

        let key = vec![Field::new("id", "k1")];
        let value = TimestampedValue::new(100, "v1");
        assert_eq!(backend.insert("objects", &key, &value), Status::Ok);

        let mut buffer = Vec::new();
        assert_eq!(backend.read("objects", &key, &mut buffer), Status::Ok);
        assert_eq!(buffer, vec![value]);
    }

    /// Backend stub whose reads are distinguishable from the memory backend.
    struct UnavailableBackend;

    impl DbBackend for UnavailableBackend {
        fn init(&mut self) -> BenchResult<()> {
            Ok(())
        }

        fn cleanup(&mut self) -> BenchResult<()> {
            Ok(())
        }

        fn read(&self, _: &str, _: &[Field], _: &mut Vec<TimestampedValue>) -> Status {
            Status::ServiceUnavailable
        }

        fn scan(&self, _: &str, _: &[Field], _: usize, _: &mut Vec<TimestampedValue>) -> Status {
            Status::ServiceUnavailable
        }

        fn update(&self, _: &str, _: &[Field], _: &TimestampedValue) -> Status {
            Status::ServiceUnavailable
        }

        fn insert(&self, _: &str, _: &[Field], _: &TimestampedValue) -> Status {
            Status::ServiceUnavailable
        }

        fn delete(&self, _: &str, _: &[Field], _: &TimestampedValue) -> Status {
            Status::ServiceUnavailable
        }

        fn batch_insert(&self, _: &str, _: &[Vec<Field>], _: &[TimestampedValue]) -> Status {
            Status::ServiceUnavailable
        }

        fn batch_read(
            &self,
            _: &str,
            _: &[Field],
            _: &[Field],
            _: usize,
            _: &mut Vec<Vec<Field>>,
        ) -> Status {
            Status::ServiceUnavailable
        }
    }

    #[test]
    fn test_last_registration_wins() {
        register("registry-dup", || Box::new(MemoryBackend::new()));
        register("registry-dup", || Box::new(UnavailableBackend));

        let backend = create(&props("registry-dup")).unwrap();
        let mut buffer = Vec::new();
        assert_eq!(
            backend.read("objects", &[Field::new("id", "k1")], &mut buffer),
            Status::ServiceUnavailable
        );
    }

    /// Backend whose init always fails, to prove no instance escapes.
    struct FailingInitBackend;

    impl DbBackend for FailingInitBackend {
        fn init(&mut self) -> BenchResult<()> {
            Err(BackendError::InitFailed {
                reason: "connection refused".to_string(),
            }
            .into())
        }

        fn cleanup(&mut self) -> BenchResult<()> {
            Ok(())
        }

        fn read(&self, _: &str, _: &[Field], _: &mut Vec<TimestampedValue>) -> Status {
            Status::Error
        }

        fn scan(&self, _: &str, _: &[Field], _: usize, _: &mut Vec<TimestampedValue>) -> Status {
            Status::Error
        }

        fn update(&self, _: &str, _: &[Field], _: &TimestampedValue) -> Status {
            Status::Error
        }

        fn insert(&self, _: &str, _: &[Field], _: &TimestampedValue) -> Status {
            Status::Error
        }

        fn delete(&self, _: &str, _: &[Field], _: &TimestampedValue) -> Status {
            Status::Error
        }

        fn batch_insert(&self, _: &str, _: &[Vec<Field>], _: &[TimestampedValue]) -> Status {
            Status::Error
        }

        fn batch_read(
            &self,
            _: &str,
            _: &[Field],
            _: &[Field],
            _: usize,
            _: &mut Vec<Vec<Field>>,
        ) -> Status {
            Status::Error
        }
    }

    #[test]
    fn test_init_failure_propagates_from_create() {
        register("registry-failing-init", || Box::new(FailingInitBackend));
        let result = create(&props("registry-failing-init"));
        assert!(matches!(
            result,
            Err(BenchError::Backend(BackendError::InitFailed { .. }))
        ));
    }
}
