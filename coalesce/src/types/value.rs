use std::collections::BTreeMap;

/// A field record mapping field names to [`Value`]s.
///
/// Records are the unit the merge engine works on: item payloads, templates and merged
/// results are all [`Record`]s. Nested records form the tree that dot-delimited field
/// paths resolve against.
pub type Record = BTreeMap<String, Value>;

/// A dynamically typed field value.
///
/// [`Value`] is the tagged representation of everything a source record or a template
/// can hold. Merging replaces whole [`Value`]s only; the engine never merges inside an
/// [`Value::Array`] or [`Value::Record`].
///
/// [`Value::Opaque`] stands for a caller-defined placeholder meaning "unset" (the kind
/// of sentinel a template uses for fields with no meaningful default). It is carried
/// through merges verbatim and is never introspected.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent or null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// UTF-8 string value.
    String(String),
    /// Ordered list of values.
    Array(Vec<Value>),
    /// Nested record.
    Record(Record),
    /// Caller-defined placeholder standing for "unset".
    Opaque,
}

impl Value {
    /// Returns the string slice if this value is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the elements if this value is a [`Value::Array`].
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the nested record if this value is a [`Value::Record`].
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns true if this value is the [`Value::Opaque`] placeholder.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Value::Opaque)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}
