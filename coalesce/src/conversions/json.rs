use tracing::warn;

use crate::error::{CoalesceResult, ErrorKind};
use crate::types::{Record, Value};
use crate::{bail, coalesce_error};

/// Converts a JSON value into a [`Value`].
///
/// The conversion is total: every JSON value has a tagged representation. Numbers map
/// to [`Value::Int`] when representable as `i64` and to [`Value::Float`] otherwise.
pub fn value_from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(value) => Value::Bool(value),
        serde_json::Value::Number(number) => number_to_value(&number),
        serde_json::Value::String(value) => Value::String(value),
        serde_json::Value::Array(values) => {
            Value::Array(values.into_iter().map(value_from_json).collect())
        }
        serde_json::Value::Object(entries) => {
            let record = entries
                .into_iter()
                .map(|(key, value)| (key, value_from_json(value)))
                .collect::<Record>();

            Value::Record(record)
        }
    }
}

/// Converts a [`Value`] into a JSON value.
///
/// [`Value::Opaque`] placeholders have no external representation and serialize as JSON
/// null; a warning is emitted when that happens so lossy egress is visible in logs.
pub fn value_into_json(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(value) => serde_json::Value::Bool(value),
        Value::Int(value) => serde_json::Value::Number(value.into()),
        Value::Float(value) => match serde_json::Number::from_f64(value) {
            Some(number) => serde_json::Value::Number(number),
            None => {
                warn!(value, "non-finite float has no JSON representation, emitting null");

                serde_json::Value::Null
            }
        },
        Value::String(value) => serde_json::Value::String(value),
        Value::Array(values) => {
            serde_json::Value::Array(values.into_iter().map(value_into_json).collect())
        }
        Value::Record(record) => record_into_json(record),
        Value::Opaque => {
            warn!("opaque placeholder has no JSON representation, emitting null");

            serde_json::Value::Null
        }
    }
}

/// Converts a top-level JSON document into a [`Record`].
///
/// Returns [`ErrorKind::InvalidData`] if the document is not a JSON object, since item
/// payloads and templates are records by definition.
pub fn record_from_json(value: serde_json::Value) -> CoalesceResult<Record> {
    if !value.is_object() {
        bail!(
            ErrorKind::InvalidData,
            "Document is not a record",
            detail = format!("expected a JSON object, got {value}")
        );
    }

    match value_from_json(value) {
        Value::Record(record) => Ok(record),
        // value_from_json maps objects to records, so this arm is unreachable.
        _ => Err(coalesce_error!(
            ErrorKind::ConversionError,
            "JSON object did not convert to a record"
        )),
    }
}

/// Converts a [`Record`] into a JSON object value.
pub fn record_into_json(record: Record) -> serde_json::Value {
    let entries = record
        .into_iter()
        .map(|(key, value)| (key, value_into_json(value)))
        .collect::<serde_json::Map<String, serde_json::Value>>();

    serde_json::Value::Object(entries)
}

/// Converts a JSON number into the narrowest [`Value`] variant that holds it.
fn number_to_value(number: &serde_json::Number) -> Value {
    if let Some(int) = number.as_i64() {
        Value::Int(int)
    } else if let Some(float) = number.as_f64() {
        Value::Float(float)
    } else {
        // Only reachable with arbitrary-precision numbers, which this crate does not enable.
        Value::Null
    }
}
