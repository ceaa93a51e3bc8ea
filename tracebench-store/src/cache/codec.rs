//! Cache key and value codec.
//!
//! Keys must encode identically for identical field sequences and must never
//! collide for different ones, so each field value is length-prefixed before
//! joining: `["a,b"]` encodes as `3:a,b` while `["a", "b"]` encodes as
//! `1:a,1:b`. Values round-trip as `timestamp,value`; the value part may
//! itself contain the separator because decoding splits at the first comma
//! only.

use tracebench_core::{Field, TimestampedValue};

const SEPARATOR: char = ',';

/// Deterministic, order-preserving, injective encoding of a composite key.
pub fn encode_key(fields: &[Field]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(&field.value.len().to_string());
        out.push(':');
        out.push_str(&field.value);
    }
    out
}

/// Encode a payload for cache storage.
pub fn encode_value(value: &TimestampedValue) -> String {
    format!("{}{}{}", value.timestamp, SEPARATOR, value.value)
}

/// Decode a payload previously produced by [`encode_value`].
///
/// Returns `None` for malformed input (missing separator or non-numeric
/// timestamp); the caller treats that as a miss.
pub fn decode_value(raw: &str) -> Option<TimestampedValue> {
    let (timestamp, value) = raw.split_once(SEPARATOR)?;
    let timestamp = timestamp.parse::<i64>().ok()?;
    Some(TimestampedValue::new(timestamp, value))
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    fn fields_strategy() -> impl Strategy<Value = Vec<Field>> {
        prop::collection::vec(".{0,12}", 0..5).prop_map(|values| {
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| Field::new(format!("f{}", i), v))
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Property: value encoding round-trips for any timestamp and payload.
        #[test]
        fn prop_value_round_trip(timestamp in any::<i64>(), payload in ".{0,40}") {
            let value = TimestampedValue::new(timestamp, payload);
            prop_assert_eq!(decode_value(&encode_value(&value)), Some(value));
        }

        /// Property: key encoding is injective over field-value sequences.
        ///
        /// Field names do not participate in the encoding, so two sequences
        /// are compared by their ordered values.
        #[test]
        fn prop_key_encoding_is_injective(a in fields_strategy(), b in fields_strategy()) {
            let values_a: Vec<&str> = a.iter().map(|f| f.value.as_str()).collect();
            let values_b: Vec<&str> = b.iter().map(|f| f.value.as_str()).collect();
            if values_a == values_b {
                prop_assert_eq!(encode_key(&a), encode_key(&b));
            } else {
                prop_assert_ne!(encode_key(&a), encode_key(&b));
            }
        }
    }
}
