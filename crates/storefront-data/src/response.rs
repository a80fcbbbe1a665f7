//! Decoded GraphQL response payloads.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::GraphqlError;

/// A decoded GraphQL response: data, errors, or both.
///
/// The commerce API can return partial data next to an `errors` array; the
/// caller decides whether the partial data is usable. An absent `data` field
/// decodes to `None` and must be treated as "no results", never as a fault.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct GraphqlPayload<T> {
    /// Decoded operation data, when present.
    #[serde(default)]
    pub data: Option<T>,
    /// GraphQL-level errors, when present.
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl<T: DeserializeOwned> GraphqlPayload<T> {
    /// Decode a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl<T> GraphqlPayload<T> {
    /// Whether the response carried no GraphQL errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the payload, keeping only the data.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
