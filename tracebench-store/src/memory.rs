//! In-memory reference backend.
//!
//! Keeps one ordered map per table so `scan` and `batch_read` are real range
//! queries. Registered under `"mem"`; used by tests and as a baseline for
//! harness smoke runs.

use crate::backend::DbBackend;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::RwLock;
use tracebench_core::{BenchResult, Field, Status, TimestampedValue};

type TableMap = BTreeMap<Vec<Field>, TimestampedValue>;

/// Map-backed storage backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: RwLock<HashMap<String, TableMap>>,
}

impl MemoryBackend {
    /// Registry name for this backend.
    pub const NAME: &'static str = "mem";

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored in `table`.
    pub fn key_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .unwrap()
            .get(table)
            .map_or(0, |t| t.len())
    }
}

impl DbBackend for MemoryBackend {
    fn init(&mut self) -> BenchResult<()> {
        Ok(())
    }

    fn cleanup(&mut self) -> BenchResult<()> {
        self.tables.write().unwrap().clear();
        Ok(())
    }

    fn read(&self, table: &str, key: &[Field], buffer: &mut Vec<TimestampedValue>) -> Status {
        let tables = self.tables.read().unwrap();
        match tables.get(table).and_then(|t| t.get(key)) {
            Some(value) => {
                buffer.push(value.clone());
                Status::Ok
            }
            None => Status::NotFound,
        }
    }

    fn scan(
        &self,
        table: &str,
        key: &[Field],
        limit: usize,
        buffer: &mut Vec<TimestampedValue>,
    ) -> Status {
        let tables = self.tables.read().unwrap();
        let Some(table) = tables.get(table) else {
            return Status::NotFound;
        };
        for (_, value) in table
            .range::<[Field], _>((Bound::Included(key), Bound::Unbounded))
            .take(limit)
        {
            buffer.push(value.clone());
        }
        Status::Ok
    }

    fn update(&self, table: &str, key: &[Field], value: &TimestampedValue) -> Status {
        let mut tables = self.tables.write().unwrap();
        match tables.get_mut(table).and_then(|t| t.get_mut(key)) {
            Some(slot) => {
                *slot = value.clone();
                Status::Ok
            }
            None => Status::NotFound,
        }
    }

    fn insert(&self, table: &str, key: &[Field], value: &TimestampedValue) -> Status {
        let mut tables = self.tables.write().unwrap();
        tables
            .entry(table.to_string())
            .or_default()
            .insert(key.to_vec(), value.clone());
        Status::Ok
    }

    fn delete(&self, table: &str, key: &[Field], _value: &TimestampedValue) -> Status {
        let mut tables = self.tables.write().unwrap();
        match tables.get_mut(table).and_then(|t| t.remove(key)) {
            Some(_) => Status::Ok,
            None => Status::NotFound,
        }
    }

    fn batch_insert(
        &self,
        table: &str,
        keys: &[Vec<Field>],
        values: &[TimestampedValue],
    ) -> Status {
        if keys.len() != values.len() {
            return Status::BadRequest;
        }
        let mut tables = self.tables.write().unwrap();
        let table = tables.entry(table.to_string()).or_default();
        for (key, value) in keys.iter().zip(values) {
            table.insert(key.clone(), value.clone());
        }
        Status::Ok
    }

    fn batch_read(
        &self,
        table: &str,
        floor: &[Field],
        ceil: &[Field],
        limit: usize,
        key_buffer: &mut Vec<Vec<Field>>,
    ) -> Status {
        if floor >= ceil {
            return Status::BadRequest;
        }
        let tables = self.tables.read().unwrap();
        let Some(table) = tables.get(table) else {
            return Status::NotFound;
        };
        for (key, _) in table
            .range::<[Field], _>((Bound::Included(floor), Bound::Excluded(ceil)))
            .take(limit)
        {
            key_buffer.push(key.clone());
        }
        Status::Ok
    }
}

// ============================================================================
// TESTS
// ============================================================================
