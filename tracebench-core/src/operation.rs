//! Operation and payload types.
//!
//! A [`DbOperation`] describes one unit of work submitted to the execution
//! wrapper. Operations are built through kind-specific constructors so the
//! value-presence invariant (writes carry a value, reads do not) holds by
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// OPERATION KIND
// ============================================================================

/// Kind discriminator for operations, also used to label measurement samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Read,
    Scan,
    Update,
    Insert,
    Delete,
    /// Label for a completed read-only transaction; never a member operation.
    ReadTransaction,
    /// Label for a completed mutating transaction; never a member operation.
    WriteTransaction,
}

impl OperationKind {
    /// Whether this kind mutates backend state.
    pub fn is_write(self) -> bool {
        matches!(self, Self::Update | Self::Insert | Self::Delete)
    }

    /// Whether this kind only observes backend state (point read or scan).
    pub fn is_read(self) -> bool {
        matches!(self, Self::Read | Self::Scan)
    }

    /// Whether this kind is a transaction label rather than an operation.
    pub fn is_transaction(self) -> bool {
        matches!(self, Self::ReadTransaction | Self::WriteTransaction)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Read => "READ",
            Self::Scan => "SCAN",
            Self::Update => "UPDATE",
            Self::Insert => "INSERT",
            Self::Delete => "DELETE",
            Self::ReadTransaction => "READ_TRANSACTION",
            Self::WriteTransaction => "WRITE_TRANSACTION",
        };
        f.write_str(label)
    }
}

// ============================================================================
// STATUS
// ============================================================================

/// Result code returned by every backend and wrapper operation.
///
/// A `Status` is a value, never an `Err`: operation-level failures flow back
/// to the caller as ordinary return values so a failed request costs nothing
/// beyond the call itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Ok,
    Error,
    NotFound,
    /// Caller contract violation (malformed operation or batch).
    BadRequest,
    NotImplemented,
    ServiceUnavailable,
}

impl Status {
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ok => "OK",
            Self::Error => "ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::NotImplemented => "NOT_IMPLEMENTED",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        };
        f.write_str(label)
    }
}

// ============================================================================
// PAYLOAD TYPES
// ============================================================================

/// A named scalar; an ordered sequence of fields forms a composite key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The payload stored and retrieved by backends; immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimestampedValue {
    pub timestamp: i64,
    pub value: String,
}

impl TimestampedValue {
    pub fn new(timestamp: i64, value: impl Into<String>) -> Self {
        Self {
            timestamp,
            value: value.into(),
        }
    }
}

// ============================================================================
// DB OPERATION
// ============================================================================

/// One unit of work submitted to the execution wrapper.
///
/// `value` is present if and only if the kind is a write kind; `scan_limit`
/// is meaningful only for [`OperationKind::Scan`]. Use the kind-specific
/// constructors rather than building the struct by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbOperation {
    pub kind: OperationKind,
    pub table: String,
    pub key: Vec<Field>,
    pub value: Option<TimestampedValue>,
    pub scan_limit: usize,
}

impl DbOperation {
    /// Point read of a single key.
    pub fn read(table: impl Into<String>, key: Vec<Field>) -> Self {
        Self {
            kind: OperationKind::Read,
            table: table.into(),
            key,
            value: None,
            scan_limit: 0,
        }
    }

    /// Ordered scan of at most `limit` values starting at `key`.
    pub fn scan(table: impl Into<String>, key: Vec<Field>, limit: usize) -> Self {
        Self {
            kind: OperationKind::Scan,
            table: table.into(),
            key,
            value: None,
            scan_limit: limit,
        }
    }

    /// Overwrite the value of an existing key.
    pub fn update(table: impl Into<String>, key: Vec<Field>, value: TimestampedValue) -> Self {
        Self::write(OperationKind::Update, table, key, value)
    }

    /// Create a new key/value association.
    pub fn insert(table: impl Into<String>, key: Vec<Field>, value: TimestampedValue) -> Self {
        Self::write(OperationKind::Insert, table, key, value)
    }

    /// Remove a key/value association.
    pub fn delete(table: impl Into<String>, key: Vec<Field>, value: TimestampedValue) -> Self {
        Self::write(OperationKind::Delete, table, key, value)
    }

    fn write(
        kind: OperationKind,
        table: impl Into<String>,
        key: Vec<Field>,
        value: TimestampedValue,
    ) -> Self {
        Self {
            kind,
            table: table.into(),
            key,
            value: Some(value),
            scan_limit: 0,
        }
    }

    /// Whether the value-presence invariant holds for this operation.
    ///
    /// Transaction labels are never well-formed as standalone operations.
    pub fn is_well_formed(&self) -> bool {
        match self.kind {
            OperationKind::Read | OperationKind::Scan => self.value.is_none(),
            OperationKind::Update | OperationKind::Insert | OperationKind::Delete => {
                self.value.is_some()
            }
            OperationKind::ReadTransaction | OperationKind::WriteTransaction => false,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(v: &str) -> Vec<Field> {
        vec![Field::new("id", v)]
    }

    #[test]
    fn test_read_constructor_has_no_value() {
        let op = DbOperation::read("objects", key("k1"));
        assert_eq!(op.kind, OperationKind::Read);
        assert!(op.value.is_none());
        assert!(op.is_well_formed());
    }

    #[test]
    fn test_scan_constructor_carries_limit() {
        let op = DbOperation::scan("objects", key("k1"), 25);
        assert_eq!(op.kind, OperationKind::Scan);
        assert_eq!(op.scan_limit, 25);
        assert!(op.is_well_formed());
    }

    #[test]
    fn test_write_constructors_carry_value() {
        let value = TimestampedValue::new(100, "v1");
        for op in [
            DbOperation::update("objects", key("k1"), value.clone()),
            DbOperation::insert("objects", key("k1"), value.clone()),
            DbOperation::delete("objects", key("k1"), value.clone()),
        ] {
            assert!(op.kind.is_write());
            assert_eq!(op.value.as_ref(), Some(&value));
            assert!(op.is_well_formed());
        }
    }

    #[test]
    fn test_transaction_kinds_are_not_well_formed_operations() {
        let mut op = DbOperation::read("objects", key("k1"));
        op.kind = OperationKind::ReadTransaction;
        assert!(!op.is_well_formed());
        op.kind = OperationKind::WriteTransaction;
        assert!(!op.is_well_formed());
    }

    #[test]
    fn test_read_with_value_is_malformed() {
        let mut op = DbOperation::read("objects", key("k1"));
        op.value = Some(TimestampedValue::new(1, "x"));
        assert!(!op.is_well_formed());
    }

    #[test]
    fn test_kind_predicates() {
        assert!(OperationKind::Update.is_write());
        assert!(!OperationKind::Read.is_write());
        assert!(OperationKind::Read.is_read());
        assert!(OperationKind::Scan.is_read());
        assert!(!OperationKind::Insert.is_read());
        assert!(OperationKind::ReadTransaction.is_transaction());
        assert!(!OperationKind::Delete.is_transaction());
    }

    #[test]
    fn test_kind_display_labels() {
        assert_eq!(OperationKind::Read.to_string(), "READ");
        assert_eq!(OperationKind::ReadTransaction.to_string(), "READ_TRANSACTION");
        assert_eq!(OperationKind::WriteTransaction.to_string(), "WRITE_TRANSACTION");
    }

    #[test]
    fn test_status_is_ok() {
        assert!(Status::Ok.is_ok());
        assert!(!Status::Error.is_ok());
        assert!(!Status::NotFound.is_ok());
    }

    #[test]
    fn test_field_ordering_is_lexicographic() {
        let a = vec![Field::new("id", "a")];
        let b = vec![Field::new("id", "b")];
        assert!(a < b);
    }
}
