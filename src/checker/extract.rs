// src/checker/extract.rs
// =============================================================================
// This module finds URLs in raw README text.
//
// We deliberately do NOT parse the markdown. Links can hide in tables, HTML
// snippets, code spans and bare text, and every one of them must work, so we
// scan the text itself with a strict URL grammar:
//
// 1. A regex finds candidates: a known scheme, "://", then everything up to
//    whitespace or a character that can't appear unescaped in a URL
// 2. The candidate is cut at the first unbalanced ")" or "]" so markdown
//    syntax like [text](https://example.com) doesn't leak into the URL
// 3. Trailing sentence punctuation is trimmed ("see https://x.io.")
// 4. The `url` crate must parse it, and the host must look real: a dotted
//    domain with an alphabetic top-level label, localhost, or an IP address
//
// The result keeps document order and keeps duplicates.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;
use url::{Host, Url};

static URL_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:https?|ftps?|wss?)://[^\s<>"'`|\\^{}]+"#)
        .expect("URL candidate pattern is valid")
});

/// Extracts every URL from the document, in order, duplicates included.
///
/// Example input:
///   "See [docs](https://example.com/docs) and https://example.com/docs."
///
/// Example output:
///   vec!["https://example.com/docs", "https://example.com/docs"]
pub fn extract_links(document: &str) -> Vec<String> {
    let mut links = Vec::new();
    let mut pos = 0;

    while let Some(found) = URL_CANDIDATE.find_at(document, pos) {
        let raw = cut_at_unbalanced_close(found.as_str());

        // Resume right after what we kept, so a second URL glued on by
        // markdown syntax ("](https://...") is still found
        pos = found.start() + raw.len().max(1);

        let candidate = trim_trailing_punctuation(raw);
        if is_strict_url(candidate) {
            tracing::debug!(url = candidate, "extracted link");
            links.push(candidate.to_string());
        }
    }

    links
}

fn cut_at_unbalanced_close(raw: &str) -> &str {
    let (mut parens, mut brackets) = (0usize, 0usize);

    for (i, c) in raw.char_indices() {
        match c {
            '(' => parens += 1,
            ')' if parens == 0 => return &raw[..i],
            ')' => parens -= 1,
            '[' => brackets += 1,
            ']' if brackets == 0 => return &raw[..i],
            ']' => brackets -= 1,
            _ => {}
        }
    }

    raw
}

fn trim_trailing_punctuation(candidate: &str) -> &str {
    candidate.trim_end_matches(['.', ',', ':', ';', '!', '?', '*', '_', '~'])
}

fn is_strict_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => has_valid_host(&url),
        Err(_) => false,
    }
}

fn has_valid_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

// A domain needs at least two labels and a top-level label made of letters
// (or an IDN "xn--" label). This is what rejects free-text false positives
// like "http://foo" or "https://1.2".
fn is_valid_domain(domain: &str) -> bool {
    if domain.eq_ignore_ascii_case("localhost") {
        return true;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld = labels[labels.len() - 1];
    let tld_ok = tld.starts_with("xn--")
        || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}
