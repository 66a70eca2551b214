//! In-memory representation of remote objects.
//!
//! A [`RemoteObject`] is a schema-less property bag plus an optional id.
//! Fields are read and written through [`get`](RemoteObject::get) and
//! [`set`](RemoteObject::set); the only reserved name is `id`, which is kept
//! in sync with the object's identity.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use brush_client::{Error, ErrorKind, Result};

/// Attribute mapping, in server order.
pub type Attributes = serde_json::Map<String, Value>;

/// Attribute holding the object's identity.
pub const ID_KEY: &str = "id";

/// Identifier of a remote object.
///
/// Remote APIs hand out both numeric and string ids; both are kept in their
/// textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    /// Borrow the id as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read an id out of a JSON value. Strings and numbers qualify; empty
    /// strings and everything else do not.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(ResourceId(s.clone())),
            Value::Number(n) => Some(ResourceId(n.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId(id)
    }
}

impl From<&ResourceId> for ResourceId {
    fn from(id: &ResourceId) -> Self {
        id.clone()
    }
}

macro_rules! impl_numeric_id {
    ($($ty:ty),*) => {
        $(impl From<$ty> for ResourceId {
            fn from(id: $ty) -> Self {
                ResourceId(id.to_string())
            }
        })*
    };
}

impl_numeric_id!(u32, u64, i32, i64, usize);

impl From<ResourceId> for Value {
    fn from(id: ResourceId) -> Self {
        Value::String(id.0)
    }
}

/// A hydrated remote object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteObject {
    id: Option<ResourceId>,
    attributes: Attributes,
    destroyed: bool,
}

impl RemoteObject {
    /// A new object with no id and no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an object from attributes without contacting the remote side.
    /// The id, if any, is taken from the `id` attribute.
    pub fn from_attributes(attributes: Attributes) -> Self {
        let id = attributes.get(ID_KEY).and_then(ResourceId::from_value);
        Self {
            id,
            attributes,
            destroyed: false,
        }
    }

    /// Remote identity, if the object has been persisted.
    pub fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }

    /// Returns true if the object has not been persisted yet.
    pub fn is_new(&self) -> bool {
        self.id.is_none() && !self.destroyed
    }

    /// Returns true once the object has been destroyed remotely.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// All attributes.
    pub fn attributes(&self) -> Result<&Attributes> {
        self.ensure_alive()?;
        Ok(&self.attributes)
    }

    /// Consume the object and return its attributes.
    pub fn into_attributes(self) -> Result<Attributes> {
        self.ensure_alive()?;
        Ok(self.attributes)
    }

    /// Read one attribute. `Ok(None)` means the attribute is missing.
    pub fn get(&self, key: &str) -> Result<Option<&Value>> {
        Ok(self.attributes()?.get(key))
    }

    /// Read one attribute and deserialize it.
    pub fn get_as<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| {
                    Error::with_source(
                        ErrorKind::InvalidArgument(format!("attribute `{key}` has another type")),
                        e,
                    )
                }),
            None => Ok(None),
        }
    }

    /// Write one attribute locally, returning the previous value.
    ///
    /// Writing `id` also changes the object's identity.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        self.ensure_alive()?;

        let key = key.into();
        let value = value.into();
        if key == ID_KEY {
            self.id = ResourceId::from_value(&value);
        }
        Ok(self.attributes.insert(key, value))
    }

    /// Returns true if the attribute is present. Always false once destroyed.
    pub fn has_attribute(&self, key: &str) -> bool {
        !self.destroyed && self.attributes.contains_key(key)
    }

    /// Merge `attributes` over the local ones.
    pub fn merge(&mut self, attributes: Attributes) -> Result<()> {
        for (key, value) in attributes {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Replace attributes and id with a decoded response.
    pub(crate) fn hydrate(&mut self, attributes: Attributes) {
        self.id = attributes.get(ID_KEY).and_then(ResourceId::from_value);
        self.attributes = attributes;
        self.destroyed = false;
    }

    /// Clear everything after a successful remote delete.
    pub(crate) fn mark_destroyed(&mut self) {
        self.id = None;
        self.attributes.clear();
        self.destroyed = true;
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            Err(Error::new(ErrorKind::Destroyed))
        } else {
            Ok(())
        }
    }
}

/// A type whose instances are backed by a [`RemoteObject`].
///
/// Bindings are generic over `Record`, so every object a binding hands out is
/// of the binding's own type.
///
/// ```rust,ignore
/// struct Lead(RemoteObject);
///
/// impl Record for Lead {
///     fn from_remote(object: RemoteObject) -> Self { Lead(object) }
///     fn remote(&self) -> &RemoteObject { &self.0 }
///     fn remote_mut(&mut self) -> &mut RemoteObject { &mut self.0 }
/// }
/// ```
pub trait Record: Sized + Send {
    /// Wrap a hydrated object.
    fn from_remote(object: RemoteObject) -> Self;

    /// Borrow the backing object.
    fn remote(&self) -> &RemoteObject;

    /// Mutably borrow the backing object.
    fn remote_mut(&mut self) -> &mut RemoteObject;
}

impl Record for RemoteObject {
    fn from_remote(object: RemoteObject) -> Self {
        object
    }

    fn remote(&self) -> &RemoteObject {
        self
    }

    fn remote_mut(&mut self) -> &mut RemoteObject {
        self
    }
}
