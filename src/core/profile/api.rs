use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::core::config::ApiSettings;
use crate::core::error::PackResult;
use crate::core::http::{classify_status, classify_transport};

use super::model::{IdentityResponse, SessionProfile};

/// The two lookups of the remote profile service.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn lookup_identity(&self, name: &str) -> PackResult<IdentityResponse>;
    async fn lookup_profile(&self, uuid: &str) -> PackResult<SessionProfile>;
}

/// reqwest-backed client for the public Mojang endpoints.
pub struct MojangApi {
    client: Client,
    profiles_base_url: String,
    session_base_url: String,
    timeout: Duration,
}

impl MojangApi {
    pub fn new(client: Client, settings: &ApiSettings) -> Self {
        Self {
            client,
            profiles_base_url: settings.profiles_base_url.trim_end_matches('/').to_string(),
            session_base_url: settings.session_base_url.trim_end_matches('/').to_string(),
            timeout: settings.lookup_timeout(),
        }
    }

    /// Single attempt GET. `204` and empty bodies decode as `T::default()`,
    /// which leaves the caller's presence checks to report what is missing.
    async fn get_json<T>(&self, url: &str, subject: &str) -> PackResult<T>
    where
        T: DeserializeOwned + Default,
    {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify_transport(url, e))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(T::default());
        }
        if !status.is_success() {
            return Err(classify_status(url, status, subject));
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_transport(url, e))?;
        if body.trim().is_empty() {
            return Ok(T::default());
        }

        match serde_json::from_str(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                warn!("Unexpected response body from {}: {}", url, e);
                Ok(T::default())
            }
        }
    }
}

#[async_trait]
impl ProfileApi for MojangApi {
    async fn lookup_identity(&self, name: &str) -> PackResult<IdentityResponse> {
        let url = format!("{}/users/profiles/minecraft/{}", self.profiles_base_url, name);
        info!("Looking up UUID for '{}'", name);
        self.get_json(&url, name).await
    }

    async fn lookup_profile(&self, uuid: &str) -> PackResult<SessionProfile> {
        let url = format!("{}/session/minecraft/profile/{}", self.session_base_url, uuid);
        info!("Fetching session profile {}", uuid);
        self.get_json(&url, uuid).await
    }
}
