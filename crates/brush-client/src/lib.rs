//! # brush-client
//!
//! HTTP plumbing shared by every brush resource binding.
//!
//! This crate provides:
//! - Request descriptors stamped with the `Authorization: Token token=...`
//!   header and the `{"<singular>": ...}` write envelope
//! - The [`Transport`] contract and a reqwest-backed [`HttpTransport`]
//! - Status interpretation into a typed [`Error`]
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    brush-resource                           │
//! │  (ResourceBinding, QueryBuilder, RemoteObject)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  RequestFactory -> Request -> Transport -> RawResponse      │
//! │                                   │                         │
//! │                        ResponseInterpreter -> JSON / Error  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use brush_client::{HttpTransport, RequestFactory, ResponseInterpreter, Transport};
//!
//! let transport = HttpTransport::default_transport()?;
//! let factory = RequestFactory::new("5e1o5ba77ca7f0d4", "leads");
//!
//! let request = factory.get("https://my.api/v1/leads?per_page=-1");
//! let response = transport.execute(&request).await?;
//! let json = ResponseInterpreter::retrieve(&request, response)?;
//! ```

mod config;
mod error;
mod request;
mod response;
mod transport;

pub use config::{TransportConfig, TransportConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{
    singular_name, Request, RequestFactory, RequestMethod, AUTHORIZATION, CONTENT_TYPE,
};
pub use response::{RawResponse, ResponseInterpreter};
pub use transport::{HttpTransport, Transport};

/// User-Agent string for the transport
pub const USER_AGENT: &str = concat!("brush/", env!("CARGO_PKG_VERSION"));
