// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - extract: Finds URLs in raw README text
// - http: Makes HTTP requests to check if links are alive
// - registry: Decodes the module registry's JSON error envelope
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of the crate can use.
// =============================================================================

mod extract;
mod http;
mod registry;

pub use extract::extract_links;
pub use http::{LinkCheckResult, LinkChecker, LinkStatus};
pub use registry::{
    fetch_registry_payload, is_registry_provider_url, RegistryErrorDetail, RegistryErrorPayload,
    NAME_UNKNOWN, REGISTRY_PROVIDER_MARKER,
};
