//! Resource bindings.
//!
//! A [`ResourceBinding`] attaches a [`Record`] type to one remote collection
//! and provides finders, filters, batch writes and per-object persistence on
//! top of `brush-client`.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use brush_client::{
    Error, HttpTransport, Request, RequestFactory, ResponseInterpreter, Result, Transport,
    TransportConfig,
};

use crate::collection::{malformed, Collection};
use crate::config::BindingConfig;
use crate::object::{Attributes, Record, RemoteObject};

mod finders;
mod instance;
mod writes;

/// Client for one remote collection, producing objects of type `T`.
///
/// The configuration is immutable after attachment and shared through an
/// `Arc`, so clones are cheap and can be used from several tasks.
///
/// # Example
///
/// ```rust,ignore
/// use brush_resource::{Condition, Params, RemoteObject, ResourceBinding};
///
/// let leads: ResourceBinding = ResourceBinding::new("https://my.api/v1/leads", "5e1o5ba77ca7f0d4")?;
///
/// let lead = leads.find(42).await?;
/// let open = leads.filter(Condition::fields([("status", "open")]), Params::new()).await?;
///
/// let mut lead = leads.find_or_create_by(serde_json::json!({"email": "ada@example.com"})).await?;
/// lead.set("name", "Ada")?;
/// leads.save(&mut lead).await?;
/// ```
pub struct ResourceBinding<T = RemoteObject, X = HttpTransport> {
    config: Arc<BindingConfig>,
    requests: RequestFactory,
    transport: X,
    _record: PhantomData<fn() -> T>,
}

impl<T, X: Clone> Clone for ResourceBinding<T, X> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            requests: self.requests.clone(),
            transport: self.transport.clone(),
            _record: PhantomData,
        }
    }
}

impl<T, X> std::fmt::Debug for ResourceBinding<T, X> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceBinding")
            .field("config", &self.config)
            .field("record", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: Record> ResourceBinding<T, HttpTransport> {
    /// Bind to `base_url` with the default HTTP transport.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::from_config(BindingConfig::new(base_url, token)?)
    }

    /// Bind with the default HTTP transport.
    pub fn from_config(config: BindingConfig) -> Result<Self> {
        Self::with_transport_config(config, TransportConfig::default())
    }

    /// Bind with an HTTP transport built from `transport_config`.
    pub fn with_transport_config(
        config: BindingConfig,
        transport_config: TransportConfig,
    ) -> Result<Self> {
        Self::attach(config, HttpTransport::new(transport_config)?)
    }
}

impl<T: Record, X: Transport> ResourceBinding<T, X> {
    /// Attach `T` to the collection described by `config`, using `transport`
    /// for every round trip.
    ///
    /// Fails with a configuration error, before any request, when no resource
    /// name can be derived for the write envelope.
    pub fn attach(config: BindingConfig, transport: X) -> Result<Self> {
        let envelope = config.envelope().ok_or_else(|| {
            Error::config(format!(
                "cannot derive a resource name from {}; set one with with_resource_name",
                config.base_url()
            ))
        })?;
        let requests = RequestFactory::new(config.token(), &envelope);

        debug!(base_url = config.base_url(), envelope = %envelope, "Resource binding attached");

        Ok(Self {
            config: Arc::new(config),
            requests,
            transport,
            _record: PhantomData,
        })
    }

    /// The binding configuration.
    pub fn config(&self) -> &BindingConfig {
        &self.config
    }

    /// The transport.
    pub fn transport(&self) -> &X {
        &self.transport
    }

    /// Request factory carrying this binding's token and envelope.
    pub fn requests(&self) -> &RequestFactory {
        &self.requests
    }

    /// Execute `request`, interpret the status and decode the body.
    /// Returns the status alongside the decoded JSON.
    async fn exchange(&self, request: Request) -> Result<(u16, Value)> {
        let response = self.transport.execute(&request).await?;
        let status = response.status;
        let value = ResponseInterpreter::retrieve(&request, response)?;
        Ok((status, value))
    }

    /// Execute `request` and interpret the status only. The body is ignored.
    async fn exchange_status(&self, request: Request) -> Result<u16> {
        let response = self.transport.execute(&request).await?;
        let response = ResponseInterpreter::check(&request, response)?;
        Ok(response.status)
    }

    /// Exchange and require a single object in the response.
    async fn fetch_attributes(&self, request: Request) -> Result<Attributes> {
        let (status, value) = self.exchange(request).await?;
        match value {
            Value::Object(attributes) => Ok(attributes),
            _ => Err(malformed(status, "expected an object")),
        }
    }

    /// Exchange and hydrate a single object.
    async fn fetch_one(&self, request: Request) -> Result<T> {
        let attributes = self.fetch_attributes(request).await?;
        Ok(T::from_remote(RemoteObject::from_attributes(attributes)))
    }

    /// Exchange and hydrate a collection.
    async fn fetch_many(&self, request: Request) -> Result<Collection<T>> {
        let (status, value) = self.exchange(request).await?;
        Collection::from_response(status, value)
    }
}
