//! The transport boundary and its reqwest-backed implementation.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::TransportConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::Request;
use crate::response::RawResponse;

/// Executes a [`Request`] and reports the raw status and body.
///
/// Implementations must not interpret the status: a 404 is a successful
/// transport call. Only network-level failures are errors here.
pub trait Transport: Send + Sync {
    /// Perform one HTTP round trip.
    fn execute(&self, request: &Request) -> impl Future<Output = Result<RawResponse>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(&self, request: &Request) -> impl Future<Output = Result<RawResponse>> + Send {
        (**self).execute(request)
    }
}

/// HTTP transport built on reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a transport with the given configuration.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a transport with default configuration.
    pub fn default_transport() -> Result<Self> {
        Self::new(TransportConfig::default())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: &Request) -> Result<RawResponse> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = req.body(body.clone());
        }

        if self.config.enable_tracing {
            debug!(method = %request.method, url = %request.url, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        if self.config.enable_tracing {
            let content_length = response.content_length();
            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
