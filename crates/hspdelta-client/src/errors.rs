//! Error helpers for the HTTP client
//!
//! Maps transport-level failures onto the core `HspError` taxonomy.

use hspdelta_core::errors::HspError;

/// Non-success status from one of the services
pub fn bad_status(status: u16, url: &str) -> HspError {
    HspError::Service {
        status,
        url: url.to_string(),
    }
}

/// The request never produced a usable response
pub fn transport(url: &str, err: reqwest::Error) -> HspError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    HspError::Transport {
        message: format!("{kind} for {url}: {err}"),
    }
}

/// Response body was not the JSON shape we expect
pub fn unexpected_body(url: &str, err: impl std::fmt::Display) -> HspError {
    HspError::Serialization {
        message: format!("unexpected response body from {url}: {err}"),
    }
}

/// A URL could not be assembled from the configured base
pub fn invalid_url(url: &str, err: impl std::fmt::Display) -> HspError {
    HspError::InvalidInput {
        reason: format!("invalid service URL {url}: {err}"),
    }
}
