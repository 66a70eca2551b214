//! Collection responses and single-or-batch payloads.

use serde_json::Value;

use brush_client::{Error, ErrorKind, Result};

use crate::object::{Attributes, Record, RemoteObject};

/// Key holding the hydrated entries in a collection response.
pub const ENTRIES_KEY: &str = "entries";

/// A collection response: hydrated entries plus whatever else the server sent
/// (counts, page info and so on).
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    pub entries: Vec<T>,
    pub metadata: Attributes,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            metadata: Attributes::new(),
        }
    }
}

impl<T> Collection<T> {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry, if any.
    pub fn first(&self) -> Option<&T> {
        self.entries.first()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Drop the metadata and keep the entries.
    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }
}

impl<T: Record> Collection<T> {
    /// Hydrate a decoded response body.
    ///
    /// Accepts `{"entries": [...], ...}` and bare arrays. Every entry must be
    /// a JSON object.
    pub(crate) fn from_response(status: u16, value: Value) -> Result<Self> {
        let (entries, metadata) = match value {
            Value::Object(mut map) => match map.remove(ENTRIES_KEY) {
                Some(Value::Array(entries)) => (entries, map),
                _ => return Err(malformed(status, "missing `entries` array")),
            },
            Value::Array(entries) => (entries, Attributes::new()),
            _ => return Err(malformed(status, "expected a collection")),
        };

        let entries = entries
            .into_iter()
            .map(|entry| match entry {
                Value::Object(attributes) => {
                    Ok(T::from_remote(RemoteObject::from_attributes(attributes)))
                }
                _ => Err(malformed(status, "collection entry is not an object")),
            })
            .collect::<Result<Vec<T>>>()?;

        Ok(Self { entries, metadata })
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

pub(crate) fn malformed(status: u16, message: &str) -> Error {
    Error::new(ErrorKind::Remote {
        status,
        message: format!("malformed response body: {message}"),
    })
}

/// Write input that is either one mapping or a list of mappings.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    One(Attributes),
    Many(Vec<Attributes>),
}

impl TryFrom<Value> for Payload {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Payload::One(map)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Ok(map),
                    _ => Err(Error::invalid_argument("batch entries must be mappings")),
                })
                .collect::<Result<Vec<_>>>()
                .map(Payload::Many),
            _ => Err(Error::invalid_argument(
                "pass attributes as a mapping or a list of mappings",
            )),
        }
    }
}

impl From<Attributes> for Payload {
    fn from(map: Attributes) -> Self {
        Payload::One(map)
    }
}

impl From<Vec<Attributes>> for Payload {
    fn from(items: Vec<Attributes>) -> Self {
        Payload::Many(items)
    }
}

/// Result of a write dispatched on [`Payload`].
#[derive(Debug, Clone, PartialEq)]
pub enum Hydrated<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Hydrated<T> {
    /// The single object, if this was a single write.
    pub fn into_one(self) -> Option<T> {
        match self {
            Hydrated::One(record) => Some(record),
            Hydrated::Many(_) => None,
        }
    }

    /// All objects, in response order.
    pub fn into_many(self) -> Vec<T> {
        match self {
            Hydrated::One(record) => vec![record],
            Hydrated::Many(records) => records,
        }
    }
}
