//! Fetcher trait for retrieving remote release descriptions

#[cfg(test)]
use mockall::automock;

use crate::release::error::FetchError;
use crate::release::types::RemoteReleaseData;

/// Trait for fetching a release description from a remote source
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseFetcher: Send + Sync {
    /// Performs a single GET on `url` and decodes the body.
    ///
    /// # Returns
    /// * `Ok(RemoteReleaseData)` - The decoded JSON object
    /// * `Err(FetchError)` - Transport failure, non-200 status, empty body or
    ///   a body that is not a JSON object
    async fn fetch(&self, url: &str) -> Result<RemoteReleaseData, FetchError>;
}

/// Decodes a response body into release data.
///
/// Only a JSON object is accepted; scalars, arrays and `null` are rejected.
pub fn decode_release(body: &str) -> Result<RemoteReleaseData, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(FetchError::InvalidJson(format!(
            "expected an object, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(FetchError::InvalidJson(e.to_string())),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
