// src/error.rs
// =============================================================================
// Typed errors for the validation library.
//
// Two kinds of things can go wrong below the report level:
// - SetupError: the README could not be read at all
// - VerifyError: a single link could not be verified
//
// Neither ever escapes a check. The runner turns each one into a failed
// assertion so the rest of the run keeps going.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// The README could not be loaded, so no rule can be evaluated against it.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot read README at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single URL could not be verified.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("could not read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The registry answered with something that is not an error envelope
    #[error("malformed registry response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}
