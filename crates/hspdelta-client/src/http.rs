//! Blocking HTTP implementation of [`ProfileService`].

use crate::config::ClientConfig;
use crate::errors::{bad_status, invalid_url, transport, unexpected_body};
use crate::service::{HostRecord, ProfileDescriptor, ProfileService};
use hspdelta_core::errors::Result;
use hspdelta_core::snapshot::RawSnapshot;
use hspdelta_core_types::Sensitive;
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const INVENTORY_HOSTS_PATH: &str = "/api/inventory/v1/hosts";
const PROFILES_PATH: &str = "/api/historical-system-profiles/v1/profiles";
const SYSTEMS_PATH: &str = "/api/historical-system-profiles/v1/systems";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct InventoryPage {
    #[serde(default)]
    results: Vec<HostRecord>,
}

#[derive(Deserialize)]
struct ProfilePage {
    #[serde(default)]
    data: Vec<ProfileEnvelope>,
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    system_profile: RawSnapshot,
}

#[derive(Deserialize)]
struct HistoryPage {
    #[serde(default)]
    data: Vec<HistoryEnvelope>,
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    #[serde(default)]
    profiles: Vec<ProfileDescriptor>,
}

/// Talks to the inventory and historical-profile REST APIs with HTTP basic
/// auth. One call per lookup, no retries.
pub struct HttpProfileService {
    client: Client,
    base_url: String,
    username: String,
    password: Sensitive<String>,
}

impl HttpProfileService {
    /// Build the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// `Transport` if the TLS backend cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|err| transport(&config.base_url, err))?;
        if !config.verify_tls {
            tracing::warn!(base_url = %config.base_url, "TLS certificate verification disabled");
        }
        Ok(Self {
            client,
            base_url: config.base_url,
            username: config.username,
            password: config.password,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{path}", self.base_url);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|err| invalid_url(&raw, err))
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let shown = url.to_string();
        tracing::debug!(url = %shown, "GET");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose()))
            .send()
            .map_err(|err| transport(&shown, err))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(bad_status(status.as_u16(), &shown));
        }

        let body = response.text().map_err(|err| transport(&shown, err))?;
        serde_json::from_str(&body).map_err(|err| unexpected_body(&shown, err))
    }
}

impl ProfileService for HttpProfileService {
    fn find_hosts_by_display_name(&self, display_name: &str) -> Result<Vec<HostRecord>> {
        let url = self.url(INVENTORY_HOSTS_PATH, &[("display_name", display_name)])?;
        let page: InventoryPage = self.get_json(url)?;
        Ok(page.results)
    }

    fn get_host(&self, host_id: &str) -> Result<Vec<HostRecord>> {
        let url = self.url(&format!("{INVENTORY_HOSTS_PATH}/{host_id}"), &[])?;
        let page: InventoryPage = self.get_json(url)?;
        Ok(page.results)
    }

    fn list_profiles(&self, host_id: &str) -> Result<Vec<ProfileDescriptor>> {
        let url = self.url(&format!("{SYSTEMS_PATH}/{host_id}"), &[])?;
        let page: HistoryPage = self.get_json(url)?;
        Ok(page
            .data
            .into_iter()
            .next()
            .map(|entry| entry.profiles)
            .unwrap_or_default())
    }

    fn get_profile(&self, profile_id: &str) -> Result<Vec<RawSnapshot>> {
        let url = self.url(&format!("{PROFILES_PATH}/{profile_id}"), &[])?;
        let page: ProfilePage = self.get_json(url)?;
        Ok(page
            .data
            .into_iter()
            .map(|entry| entry.system_profile)
            .collect())
    }
}
