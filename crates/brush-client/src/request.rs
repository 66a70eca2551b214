//! Request descriptors and the factory that stamps them with the
//! resource's wire conventions.

use serde::Serialize;

use crate::error::Result;

/// Header carrying the resource token.
pub const AUTHORIZATION: &str = "Authorization";

/// Header announcing a JSON body.
pub const CONTENT_TYPE: &str = "Content-Type";

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
        }
    }

    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by [`RequestFactory`]; executed by a [`Transport`](crate::Transport).
/// Nothing here performs I/O.
#[derive(Clone, PartialEq, Eq)]
pub struct Request {
    pub method: RequestMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(AUTHORIZATION) {
                    (name.as_str(), "[REDACTED]")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("Request")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

impl Request {
    /// Create a bare request without headers or body.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Add a header, replacing any existing header with the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Set a JSON body and the matching content type.
    pub fn with_json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        let encoded = serde_json::to_string(body)?;
        let mut request = self.with_header(CONTENT_TYPE, "application/json");
        request.body = Some(encoded);
        Ok(request)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Builds method-specific requests carrying the resource token and the
/// `{"<singular>": ...}` write envelope.
#[derive(Clone)]
pub struct RequestFactory {
    token: String,
    envelope: String,
}

impl std::fmt::Debug for RequestFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestFactory")
            .field("token", &"[REDACTED]")
            .field("envelope", &self.envelope)
            .finish()
    }
}

impl RequestFactory {
    /// Create a factory for the named resource. The envelope key is the
    /// lower-cased, singular form of `resource_name`.
    pub fn new(token: impl Into<String>, resource_name: &str) -> Self {
        Self {
            token: token.into(),
            envelope: singular_name(resource_name),
        }
    }

    /// Key that wraps every write body.
    pub fn envelope(&self) -> &str {
        &self.envelope
    }

    /// GET request.
    pub fn get(&self, url: impl Into<String>) -> Request {
        self.authorized(RequestMethod::Get, url)
    }

    /// POST request with an enveloped JSON body.
    pub fn post<B: Serialize + ?Sized>(&self, url: impl Into<String>, body: &B) -> Result<Request> {
        self.authorized(RequestMethod::Post, url)
            .with_json(&Envelope::new(&self.envelope, body))
    }

    /// PATCH request with an enveloped JSON body.
    pub fn patch<B: Serialize + ?Sized>(
        &self,
        url: impl Into<String>,
        body: &B,
    ) -> Result<Request> {
        self.authorized(RequestMethod::Patch, url)
            .with_json(&Envelope::new(&self.envelope, body))
    }

    /// DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> Request {
        self.authorized(RequestMethod::Delete, url)
    }

    fn authorized(&self, method: RequestMethod, url: impl Into<String>) -> Request {
        Request::new(method, url).with_header(AUTHORIZATION, format!("Token token={}", self.token))
    }
}

/// Single-key object `{ name: body }`.
struct Envelope<'a, B: ?Sized> {
    name: &'a str,
    body: &'a B,
}

impl<'a, B: ?Sized> Envelope<'a, B> {
    fn new(name: &'a str, body: &'a B) -> Self {
        Self { name, body }
    }
}

impl<B: Serialize + ?Sized> Serialize for Envelope<'_, B> {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.name, self.body)?;
        map.end()
    }
}

/// Lower-case singular form of a collection name (`"Leads"` -> `"lead"`).
///
/// Covers regular English plurals plus a few irregular ones; names that do
/// not look plural are returned lower-cased.
pub fn singular_name(name: &str) -> String {
    const IRREGULAR: &[(&str, &str)] = &[
        ("people", "person"),
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("data", "datum"),
    ];

    let name = name.trim().to_lowercase();

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == name) {
        return (*singular).to_string();
    }

    if let Some(stem) = name.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }

    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if name.ends_with(suffix) {
            return name[..name.len() - 2].to_string();
        }
    }

    if name.ends_with("ss") || name.ends_with("us") || name.ends_with("is") {
        return name;
    }

    match name.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => name,
    }
}
