use crate::types::{Record, Value};

/// A tagged partial record feeding a merge.
///
/// [`Item`] wraps one source's partial view of an entity together with the identifier
/// of the strategy that produced it. The identifier selects the precedence rule the
/// merge engine applies to every field this item contends for; it is metadata and is
/// never copied into the merged record.
///
/// Items are immutable once created and cheap to clone, so a single item can feed any
/// number of merge calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: String,
    payload: Record,
}

impl Item {
    /// Creates an item carrying `payload` under the given strategy identifier.
    pub fn new(id: impl Into<String>, payload: Record) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }

    /// Returns the strategy identifier this item is tagged with.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the partial record this item contributes.
    pub fn payload(&self) -> &Record {
        &self.payload
    }

    /// Looks up a top-level field of the payload.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }
}
