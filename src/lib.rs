//! # brush
//!
//! Bind Rust types to remote JSON resource collections over HTTP.
//!
//! Each binding targets one collection URL, authenticates with a static
//! token and speaks a small REST dialect: ransack-style `q=` filters,
//! `per_page=-1` listings, `{"<singular>": ...}` write envelopes and sibling
//! `batch_create`/`batch_update` endpoints.
//!
//! ## Security
//!
//! - Tokens are redacted in every `Debug` implementation
//! - Tracing spans skip request bodies and credentials
//!
//! ## Crates
//!
//! - **brush-client** - Requests, the transport contract, status interpretation
//! - **brush-resource** - Resource bindings, query building, hydration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use brush::{json, Condition, Params, ResourceBinding};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let leads: ResourceBinding =
//!         ResourceBinding::new("https://my.api/v1/leads", "5e1o5ba77ca7f0d4")?;
//!
//!     let mut lead = leads
//!         .find_or_create_by(json!({"email": "ada@example.com"}))
//!         .await?;
//!     lead.set("name", "Ada Lovelace")?;
//!     leads.save(&mut lead).await?;
//!
//!     let open = leads
//!         .filter(Condition::fields([("status", "open")]), Params::new())
//!         .await?;
//!     println!("{} open leads", open.len());
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "client")]
pub use brush_client as client;
#[cfg(feature = "resource")]
pub use brush_resource as resource;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use brush_client::{Error, ErrorKind, HttpTransport, Result, Transport, TransportConfig};
#[cfg(feature = "resource")]
pub use brush_resource::{
    Attributes, BindingConfig, Collection, Condition, Hydrated, Params, Record, RemoteObject,
    ResourceBinding, ResourceId,
};

pub use serde_json::{json, Value};
