//! Query-string construction for collection endpoints.
//!
//! Every collection query disables pagination (`per_page=-1`), then appends,
//! in order: the filter condition, generic parameters, and the include list.
//!
//! Values are stringified but not percent-encoded. The remote API expects
//! the literal forms, e.g. `q={"status_eq":"open"}`.
//!
//! # Example
//!
//! ```rust,ignore
//! use brush_resource::{Condition, Params, QueryBuilder};
//!
//! let query = QueryBuilder::new()
//!     .condition(Condition::fields([("status", "open")]))
//!     .params(Params::new().with("sort", "name"))
//!     .includes(["owner"])
//!     .build();
//!
//! assert_eq!(query, r#"?per_page=-1&q={"status_eq":"open"}&sort=name&include=owner"#);
//! ```

use std::fmt::Display;

use serde_json::Value;

use crate::object::Attributes;

/// Page-size directive meaning "return everything".
pub const UNPAGINATED: &str = "per_page=-1";

/// Filter applied to a collection query.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Condition {
    /// No filter.
    #[default]
    None,
    /// Filter-language fragment appended verbatim.
    Raw(String),
    /// Equality terms, encoded as one `q={"<field>_eq":"<value>",...}`.
    Fields(Vec<(String, Value)>),
}

impl Condition {
    /// Build an equality condition from field/value pairs.
    pub fn fields<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::Fields(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Raw filter fragment.
    pub fn raw(fragment: impl Into<String>) -> Self {
        Condition::Raw(fragment.into())
    }

    /// Returns true if this condition contributes nothing to the query.
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::None => true,
            Condition::Raw(fragment) => fragment.is_empty(),
            Condition::Fields(pairs) => pairs.is_empty(),
        }
    }

    fn term(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        match self {
            Condition::None => None,
            Condition::Raw(fragment) => Some(fragment.clone()),
            Condition::Fields(pairs) => {
                let terms: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("\"{}_eq\":\"{}\"", key, stringify(value)))
                    .collect();
                Some(format!("q={{{}}}", terms.join(",")))
            }
        }
    }
}

impl From<&str> for Condition {
    fn from(fragment: &str) -> Self {
        Condition::Raw(fragment.to_string())
    }
}

impl From<String> for Condition {
    fn from(fragment: String) -> Self {
        Condition::Raw(fragment)
    }
}

impl From<Attributes> for Condition {
    fn from(map: Attributes) -> Self {
        Condition::Fields(map.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<Vec<(K, V)>> for Condition {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Condition::fields(pairs)
    }
}

/// Ordered `key=value` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Display> From<Vec<(K, V)>> for Params {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Display> From<Option<Vec<(K, V)>>> for Params {
    fn from(pairs: Option<Vec<(K, V)>>) -> Self {
        pairs.map(Params::from).unwrap_or_default()
    }
}

/// Builder for collection query strings.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    condition: Condition,
    params: Params,
    includes: Vec<String>,
}

impl QueryBuilder {
    /// Create a builder with no condition, params or includes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter condition.
    pub fn condition(mut self, condition: impl Into<Condition>) -> Self {
        self.condition = condition.into();
        self
    }

    /// Set the generic parameters.
    pub fn params(mut self, params: impl Into<Params>) -> Self {
        self.params = params.into();
        self
    }

    /// Set the relations to include.
    pub fn includes<S: Into<String>>(mut self, includes: impl IntoIterator<Item = S>) -> Self {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    /// Build the query string, starting with `?`.
    pub fn build(&self) -> String {
        let mut query = format!("?{}", UNPAGINATED);

        if let Some(term) = self.condition.term() {
            query.push('&');
            query.push_str(&term);
        }

        for (key, value) in self.params.iter() {
            query.push('&');
            query.push_str(key);
            query.push('=');
            query.push_str(value);
        }

        if let Some(list) = include_list(&self.includes) {
            query.push_str("&include=");
            query.push_str(&list);
        }

        query
    }
}

/// Query string for a single-object fetch: `?include=a,b` or empty.
pub fn include_query(includes: &[String]) -> String {
    include_list(includes)
        .map(|list| format!("?include={}", list))
        .unwrap_or_default()
}

fn include_list(includes: &[String]) -> Option<String> {
    if includes.is_empty() {
        None
    } else {
        Some(includes.join(","))
    }
}

/// Text form used in query strings: strings unquoted, everything else as JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
