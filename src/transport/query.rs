use std::collections::BTreeMap;

use serde::Serialize;
use url::form_urlencoded;

use super::path::UrlError;

/// Query string parameters.
///
/// Keys are unique and kept sorted, so the encoded form does not depend on the order
/// values were added. Empty values are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a flat serializable struct. `None` fields and empty strings are omitted.
    pub fn from_serialize<T: Serialize + ?Sized>(params: &T) -> Result<Self, UrlError> {
        let encoded =
            serde_urlencoded::to_string(params).map_err(|err| UrlError::Query(err.to_string()))?;
        let mut query = Self::new();
        for (key, value) in form_urlencoded::parse(encoded.as_bytes()) {
            query.insert(key, value);
        }
        Ok(query)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.0.insert(key.into(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `application/x-www-form-urlencoded` pairs joined by `&`; empty when no params.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.0)
            .finish()
    }
}
