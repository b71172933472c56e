//! Client-side validation of create requests.
//!
//! These checks run before any request is issued so obvious mistakes get a
//! precise message instead of a round trip to the backend.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{NewsdeskError, Result};
use crate::types::{Category, CreateNews, CreatePublisher};

// ============================================================================
// Constants
// ============================================================================

/// Longest article URL the backend accepts.
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum length for publisher names.
pub const MAX_PUBLISHER_NAME_LENGTH: usize = 120;

/// Maximum length for publisher descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// `host.tld`: dot-separated labels of alphanumerics and inner hyphens,
/// ending in an alphabetic TLD of at least two letters.
const DOMAIN_PATTERN: &str =
    r"^(?i)([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$";

static DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DOMAIN_PATTERN).expect("domain regex should be valid"));

// ============================================================================
// News
// ============================================================================

/// Validate an article URL: absolute http(s), with a host, within length.
pub fn validate_news_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(NewsdeskError::Validation("URL cannot be empty".to_string()));
    }
    if raw.len() > MAX_URL_LENGTH {
        return Err(NewsdeskError::Validation(format!(
            "URL is too long ({} characters, max {MAX_URL_LENGTH})",
            raw.len()
        )));
    }

    let url = Url::parse(raw)
        .map_err(|e| NewsdeskError::Validation(format!("invalid URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(NewsdeskError::Validation(format!(
            "URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(NewsdeskError::Validation(format!("URL '{raw}' has no host")));
    }

    Ok(raw.to_string())
}

/// Build a validated `POST /news` body
pub fn news_request(url: &str, category: Category) -> Result<CreateNews> {
    Ok(CreateNews {
        url: validate_news_url(url)?,
        category,
    })
}

// ============================================================================
// Publishers
// ============================================================================

/// Validate a publisher domain such as `example.com` (no scheme, no path).
pub fn validate_domain(raw: &str) -> Result<String> {
    let domain = raw.trim().trim_end_matches('.').to_lowercase();
    if domain.is_empty() {
        return Err(NewsdeskError::Validation(
            "domain cannot be empty".to_string(),
        ));
    }
    if domain.len() > 253 || !DOMAIN_REGEX.is_match(&domain) {
        return Err(NewsdeskError::Validation(format!(
            "'{raw}' is not a valid domain (expected something like example.com)"
        )));
    }
    Ok(domain)
}

/// Build a validated `POST /publishers` body
pub fn publisher_request(
    name: &str,
    domain: &str,
    description: Option<&str>,
) -> Result<CreatePublisher> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NewsdeskError::Validation(
            "publisher name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_PUBLISHER_NAME_LENGTH {
        return Err(NewsdeskError::Validation(format!(
            "publisher name exceeds {MAX_PUBLISHER_NAME_LENGTH} characters"
        )));
    }

    let description = description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            if d.chars().count() > MAX_DESCRIPTION_LENGTH {
                Err(NewsdeskError::Validation(format!(
                    "description exceeds {MAX_DESCRIPTION_LENGTH} characters"
                )))
            } else {
                Ok(d.to_string())
            }
        })
        .transpose()?;

    Ok(CreatePublisher {
        name: name.to_string(),
        domain: validate_domain(domain)?,
        description,
    })
}
