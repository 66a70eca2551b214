//! Binding configuration: where the collection lives and how to authenticate.

use url::Url;

use brush_client::{singular_name, Error, Result};

use crate::object::ResourceId;
use crate::query_builder::include_query;

/// Per-type binding configuration.
///
/// Built once and shared read-only by every operation of the binding.
#[derive(Clone)]
pub struct BindingConfig {
    base_url: String,
    parsed: Url,
    token: String,
    includes: Vec<String>,
    resource_name: Option<String>,
}

impl std::fmt::Debug for BindingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("includes", &self.includes)
            .field("resource_name", &self.resource_name)
            .finish()
    }
}

impl BindingConfig {
    /// Create a configuration for the collection at `base_url`.
    ///
    /// Fails with a configuration error when either value is blank or the
    /// URL cannot be parsed.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim().to_string();
        let token = token.into().trim().to_string();

        if base_url.is_empty() {
            return Err(Error::config(
                "a base URL for the resource is required, e.g. https://my.api/v1/leads",
            ));
        }
        if token.is_empty() {
            return Err(Error::config("a token is required to authenticate"));
        }

        let parsed = Url::parse(&base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base URL {base_url} cannot hold resource paths"
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(Error::config(format!(
                "base URL {base_url} must not carry a query string or fragment"
            )));
        }

        Ok(Self {
            base_url,
            parsed,
            token,
            includes: Vec::new(),
            resource_name: None,
        })
    }

    /// Load configuration from `<PREFIX>_BASE_URL`, `<PREFIX>_TOKEN` and the
    /// optional `<PREFIX>_INCLUDE` (comma separated) and
    /// `<PREFIX>_RESOURCE_NAME`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let var = |name: &str| std::env::var(format!("{prefix}_{name}"));

        let base_url = var("BASE_URL")
            .map_err(|_| Error::config(format!("{prefix}_BASE_URL is not set")))?;
        let token =
            var("TOKEN").map_err(|_| Error::config(format!("{prefix}_TOKEN is not set")))?;

        let mut config = Self::new(base_url, token)?;

        if let Ok(includes) = var("INCLUDE") {
            config = config.with_includes(
                includes
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty()),
            );
        }
        if let Ok(name) = var("RESOURCE_NAME") {
            config = config.with_resource_name(name);
        }

        Ok(config)
    }

    /// Relations to include on every fetch, in order.
    pub fn with_includes<S: Into<String>>(mut self, includes: impl IntoIterator<Item = S>) -> Self {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    /// Override the name used for the write envelope. By default it is the
    /// last path segment of the base URL.
    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.resource_name = if name.trim().is_empty() { None } else { Some(name) };
        self
    }

    /// The configured base URL, as given.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Relations included on every fetch.
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Collection name: the override, or the last path segment of the base URL.
    pub fn resource_name(&self) -> Option<&str> {
        self.resource_name.as_deref().or_else(|| {
            self.parsed
                .path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        })
    }

    /// Key wrapping write bodies.
    pub fn envelope(&self) -> Option<String> {
        self.resource_name().map(singular_name)
    }

    /// URL for collection queries and single creates.
    pub fn collection_url(&self) -> &str {
        &self.base_url
    }

    /// URL of one object: `<base>/<id>[?include=...]`.
    pub fn object_url(&self, id: &ResourceId) -> String {
        format!(
            "{}/{}{}",
            self.base_url.trim_end_matches('/'),
            id,
            include_query(&self.includes)
        )
    }

    /// Sibling endpoint of the collection: the base URL with its last path
    /// segment replaced by `action`.
    pub fn batch_url(&self, action: &str) -> String {
        let mut url = self.parsed.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().pop().push(action);
        }
        url.to_string()
    }
}
