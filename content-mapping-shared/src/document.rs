//! Indexed document representation.
//!
//! An `IndexDocument` is a flat field-value mapping. It owns its fields and
//! holds no reference to the client or request that will eventually send it,
//! so a released batch is freed by ordinary drop.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the composite document key (`{objectclass}:{objectid}`).
pub const ID_FIELD: &str = "id";

/// Field holding the domain object's numeric identity.
pub const OBJECT_ID_FIELD: &str = "objectid";

/// Field holding the normalized object class.
pub const OBJECT_CLASS_FIELD: &str = "objectclass";

/// Field conventionally used by mapping functions for change detection.
pub const HASH_FIELD: &str = "hash";

/// Identifier of a document in the search index.
///
/// Keys produced by this crate are always strings, but documents written by
/// older tooling may carry a plain integer id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Int(i64),
    Str(String),
}

impl DocumentId {
    /// Read an identifier out of a JSON field value.
    ///
    /// Returns `None` for anything that is neither a string nor an integer.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(Self::Int),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<i64> for DocumentId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

/// Capability required of any object handed to the destination adapter.
///
/// An indexed object exposes its fields as an enumerable mapping; the
/// identity fields are looked up by name.
pub trait IndexedObject {
    /// All field values of the object.
    fn fields(&self) -> &Map<String, Value>;

    /// A single field value, if present.
    fn field(&self, name: &str) -> Option<&Value> {
        self.fields().get(name)
    }

    /// The composite document key stored in the `id` field.
    fn document_key(&self) -> Option<DocumentId> {
        self.field(ID_FIELD).and_then(DocumentId::from_value)
    }
}

/// A key-value record representing one object's indexed form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexDocument {
    fields: Map<String, Value>,
}

impl IndexDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document seeded with the given fields.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Set a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

}

impl IndexedObject for IndexDocument {
    fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for IndexDocument {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_fields(fields)
    }
}
