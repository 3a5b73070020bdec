// src/checker/registry.rs
// =============================================================================
// Special handling for module-registry provider pages.
//
// The registry doesn't reliably signal a missing provider through the HTTP
// status code. Instead it answers with a JSON error envelope:
//
//   {"errors": [{"code": "NAME_UNKNOWN", "message": "..."}]}
//
// So for these URLs we read the whole body and look for NAME_UNKNOWN. The
// status code is reported for diagnosis but never decides the outcome.
// =============================================================================

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::VerifyError;

/// Any URL containing this is verified through its error payload.
pub const REGISTRY_PROVIDER_MARKER: &str = "registry.terraform.io/providers/";

/// Error code meaning the provider or module does not exist.
pub const NAME_UNKNOWN: &str = "NAME_UNKNOWN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryErrorPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<RegistryErrorDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryErrorDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

// A JSON null reads the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl RegistryErrorPayload {
    /// Decodes a response body. A bare `null` body is an empty envelope.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default)
    }

    /// The first NAME_UNKNOWN entry, if the registry reported one.
    pub fn unknown_name(&self) -> Option<&RegistryErrorDetail> {
        self.errors.iter().find(|detail| detail.code == NAME_UNKNOWN)
    }
}

pub fn is_registry_provider_url(url: &str) -> bool {
    url.contains(REGISTRY_PROVIDER_MARKER)
}

/// GETs a registry URL and decodes its body as an error envelope.
///
/// Returns the HTTP status alongside the payload. An undecodable body is an
/// error, not a pass.
pub async fn fetch_registry_payload(
    client: &Client,
    url: &str,
) -> Result<(u16, RegistryErrorPayload), VerifyError> {
    let response = client.get(url).send().await.map_err(VerifyError::Request)?;
    let status = response.status().as_u16();

    let body = response.bytes().await.map_err(VerifyError::Body)?;
    let payload = RegistryErrorPayload::decode(&body)
        .map_err(|source| VerifyError::Decode { status, source })?;

    Ok((status, payload))
}
