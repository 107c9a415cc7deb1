//! Connection settings for the profile services.

use hspdelta_core::errors::{HspError, Result};
use hspdelta_core_types::Sensitive;

/// Hostname used when none is configured.
pub const DEFAULT_API_HOSTNAME: &str = "cloud.redhat.com";

/// Everything the HTTP client needs to reach the services.
///
/// Built once by the caller and passed by reference; the password stays
/// wrapped so that `Debug` output never carries it.
#[derive(Debug)]
pub struct ClientConfig {
    /// Scheme and authority, no trailing slash, e.g. `https://cloud.redhat.com`
    pub base_url: String,
    pub username: String,
    pub password: Sensitive<String>,
    pub verify_tls: bool,
}

impl ClientConfig {
    /// Assemble a config from an API hostname.
    ///
    /// A bare hostname gets an `https://` scheme; a value that already names
    /// a scheme is kept as given.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the hostname or username is empty.
    pub fn new(
        api_hostname: &str,
        username: impl Into<String>,
        password: Sensitive<String>,
        verify_tls: bool,
    ) -> Result<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(HspError::InvalidInput {
                reason: "API username must not be empty".to_string(),
            });
        }
        Ok(Self {
            base_url: base_url_for(api_hostname)?,
            username,
            password,
            verify_tls,
        })
    }
}

/// `cloud.redhat.com` → `https://cloud.redhat.com`
///
/// # Errors
///
/// `InvalidInput` for an empty hostname.
pub fn base_url_for(api_hostname: &str) -> Result<String> {
    let host = api_hostname.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(HspError::InvalidInput {
            reason: "API hostname must not be empty".to_string(),
        });
    }
    if host.contains("://") {
        Ok(host.to_string())
    } else {
        Ok(format!("https://{host}"))
    }
}
