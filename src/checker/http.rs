// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes an HTTP GET per URL; only a final 200 counts as working
// - Registry provider pages are judged by their JSON error payload instead
//   (see registry.rs)
// - Detects various failure modes (timeout, DNS, SSL, redirect loops, etc.)
// - Runs checks concurrently, with an upper bound on requests in flight
// - Every pending check resolves at once when the run is cancelled
// =============================================================================

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffered()
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::registry::{fetch_registry_payload, is_registry_provider_url};
use crate::cancel::Cancellation;
use crate::config::RunConfig;
use crate::error::VerifyError;

/// Same hop limit a browser-like client would use.
const MAX_REDIRECTS: usize = 10;

// Represents the status of a link after checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    /// Link is working (200 OK, or a registry page without NAME_UNKNOWN)
    Ok,
    /// Server answered with something other than 200
    HttpStatus,
    /// Registry says the provider does not exist
    UnknownProvider,
    /// Registry body wasn't a JSON error envelope
    MalformedRegistryResponse,
    /// Request timed out
    Timeout,
    /// Could not resolve hostname
    DnsError,
    /// SSL/TLS certificate error
    SslError,
    /// Too many redirects (redirect loop)
    TooManyRedirects,
    /// The run was cancelled before this link finished
    Cancelled,
    /// Other error
    Error,
}

// Represents the result of checking a single link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkCheckResult {
    /// The URL that was checked
    pub url: String,
    #[serde(flatten)]
    pub status: LinkStatus,
    /// Final HTTP status code, when the server answered at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// Human-readable detail for the report
    pub message: String,
}

impl LinkCheckResult {
    pub fn is_ok(&self) -> bool {
        matches!(self.status, LinkStatus::Ok)
    }

    fn cancelled(url: String) -> Self {
        LinkCheckResult {
            url,
            status: LinkStatus::Cancelled,
            http_status: None,
            message: "Check cancelled before completion".to_string(),
        }
    }
}

/// Verifies links with one shared HTTP client (connection pooling).
#[derive(Debug, Clone)]
pub struct LinkChecker {
    client: Client,
    concurrency: usize,
    cancel: Cancellation,
}

impl LinkChecker {
    pub fn new(config: &RunConfig, cancel: Cancellation) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("readme-guardian/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            concurrency: config.concurrency.max(1),
            cancel,
        })
    }

    /// Checks every URL and returns one result per URL, in input order.
    ///
    /// All URLs are attempted even if some fail; this only returns once every
    /// check has finished (or been cancelled).
    pub async fn check_links(&self, urls: Vec<String>) -> Vec<LinkCheckResult> {
        // .buffered(n) runs up to n checks at once but yields results in the
        // order the URLs appeared, which keeps the report stable
        stream::iter(urls)
            .map(|url| self.check_single_link(url))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn check_single_link(&self, url: String) -> LinkCheckResult {
        // biased: a cancelled run never reports a late success
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => LinkCheckResult::cancelled(url),
            result = self.verify(url.clone()) => result,
        }
    }

    async fn verify(&self, url: String) -> LinkCheckResult {
        tracing::debug!(url = %url, "checking link");

        if is_registry_provider_url(&url) {
            return self.verify_registry(url).await;
        }

        match self.client.get(&url).send().await {
            Ok(response) => analyze_response(url, response.status()),
            Err(e) => categorize_error(url, e),
        }
    }

    async fn verify_registry(&self, url: String) -> LinkCheckResult {
        match fetch_registry_payload(&self.client, &url).await {
            Ok((status, payload)) => match payload.unknown_name() {
                Some(detail) => LinkCheckResult {
                    message: format!("Invalid registry URL: {} ({})", detail.code, detail.message),
                    url,
                    status: LinkStatus::UnknownProvider,
                    http_status: Some(status),
                },
                None => LinkCheckResult {
                    url,
                    status: LinkStatus::Ok,
                    http_status: Some(status),
                    message: format!("Registry entry exists (HTTP {})", status),
                },
            },
            Err(VerifyError::Request(e)) => categorize_error(url, e),
            Err(e) => {
                let (status, http_status) = match &e {
                    VerifyError::Decode { status, .. } => {
                        (LinkStatus::MalformedRegistryResponse, Some(*status))
                    }
                    _ => (LinkStatus::Error, None),
                };
                LinkCheckResult {
                    url,
                    status,
                    http_status,
                    message: e.to_string(),
                }
            }
        }
    }
}

// Only an exact 200 counts. Redirects were already followed by the client,
// so anything else here is the final answer.
fn analyze_response(url: String, status_code: StatusCode) -> LinkCheckResult {
    if status_code == StatusCode::OK {
        LinkCheckResult {
            url,
            status: LinkStatus::Ok,
            http_status: Some(status_code.as_u16()),
            message: format!("HTTP {}", status_code.as_u16()),
        }
    } else {
        LinkCheckResult {
            url,
            status: LinkStatus::HttpStatus,
            http_status: Some(status_code.as_u16()),
            message: format!("Status code: {}", status_code.as_u16()),
        }
    }
}

// Categorizes different error types from reqwest
//
// The category drives the report's status column; the message always carries
// the full underlying error chain so the author can see what went wrong.
fn categorize_error(url: String, error: reqwest::Error) -> LinkCheckResult {
    let detail = error_chain(&error);
    let lowered = detail.to_lowercase();

    let status = if error.is_timeout() {
        LinkStatus::Timeout
    } else if error.is_redirect() {
        LinkStatus::TooManyRedirects
    } else if error.is_connect() && lowered.contains("dns") {
        LinkStatus::DnsError
    } else if lowered.contains("certificate") || lowered.contains("ssl") || lowered.contains("tls") {
        LinkStatus::SslError
    } else {
        LinkStatus::Error
    };

    LinkCheckResult {
        url,
        status,
        http_status: error.status().map(|s| s.as_u16()),
        message: format!("Error: {}", detail),
    }
}

// reqwest's Display stops at the outermost layer ("error sending request");
// walk the sources so the DNS/connect/TLS cause is visible too
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_result_is_ok() {
        let ok_result = LinkCheckResult {
            url: "https://example.com".to_string(),
            status: LinkStatus::Ok,
            http_status: Some(200),
            message: String::new(),
        };
        assert!(ok_result.is_ok());

        let broken_result = LinkCheckResult {
            url: "https://example.com".to_string(),
            status: LinkStatus::HttpStatus,
            http_status: Some(404),
            message: String::new(),
        };
        assert!(!broken_result.is_ok());
    }

    #[test]
    fn test_only_200_is_ok() {
        let result = analyze_response("https://example.com".into(), StatusCode::OK);
        assert!(result.is_ok());

        for code in [StatusCode::NO_CONTENT, StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
            let result = analyze_response("https://example.com".into(), code);
            assert_eq!(result.status, LinkStatus::HttpStatus);
            assert_eq!(result.http_status, Some(code.as_u16()));
            assert!(result.message.contains(&code.as_u16().to_string()));
        }
    }

    #[test]
    fn test_result_serializes_flat() {
        let result = analyze_response("https://example.com/gone".into(), StatusCode::GONE);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["url"], "https://example.com/gone");
        assert_eq!(json["status"], "http_status");
        assert_eq!(json["http_status"], 410);
    }

    #[tokio::test]
    async fn test_cancelled_run_resolves_every_link() {
        let cancel = Cancellation::new();
        let checker = LinkChecker::new(&RunConfig::default(), cancel.clone()).unwrap();
        cancel.cancel();

        // 192.0.2.0/24 is reserved for documentation; nothing answers there
        let urls = vec![
            "http://192.0.2.1/a".to_string(),
            "http://192.0.2.1/b".to_string(),
        ];
        let results = checker.check_links(urls).await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.status == LinkStatus::Cancelled));
        assert_eq!(results[0].url, "http://192.0.2.1/a");
    }
}
