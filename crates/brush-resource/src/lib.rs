//! # brush-resource
//!
//! Typed bindings between a local record type and one remote JSON collection.
//!
//! A [`ResourceBinding`] turns finder, filter and write calls into requests
//! against a base URL such as `https://my.api/v1/leads`:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `find(id)` | `GET <base>/<id>[?include=...]` |
//! | `all(params)` / `filter(condition, params)` | `GET <base>?per_page=-1[&q=...][&...][&include=...]` |
//! | `create(attrs)` / `save` on a new object | `POST <base>` |
//! | `batch_create(items)` | `POST <parent>/batch_create` |
//! | `save` / `update_record` on a persisted object | `PATCH <base>/<id>` |
//! | `batch_update(items)` | `PATCH <parent>/batch_update` |
//! | `destroy` / `delete` | `DELETE <base>/<id>` |
//!
//! Write bodies are wrapped in `{"<singular resource name>": ...}` and every
//! request carries `Authorization: Token token=<token>`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use brush_resource::{BindingConfig, Condition, Params, ResourceBinding};
//!
//! let config = BindingConfig::from_env("LEADS")?;
//! let leads: ResourceBinding = ResourceBinding::from_config(config)?;
//!
//! let open = leads
//!     .filter(Condition::fields([("status", "open")]), Params::new())
//!     .await?;
//!
//! for lead in &open {
//!     println!("{:?}", lead.get("email")?);
//! }
//! ```

mod binding;
mod collection;
mod config;
mod object;
mod query_builder;

#[cfg(test)]
mod testing;

pub use binding::ResourceBinding;
pub use collection::{Collection, Hydrated, Payload, ENTRIES_KEY};
pub use config::BindingConfig;
pub use object::{Attributes, Record, RemoteObject, ResourceId, ID_KEY};
pub use query_builder::{include_query, Condition, Params, QueryBuilder, UNPAGINATED};

// Re-export client types that appear in this crate's signatures
pub use brush_client::{Error, ErrorKind, HttpTransport, Result, Transport, TransportConfig};
