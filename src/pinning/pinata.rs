// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 PaperVault

//! Pinata-compatible pinning service client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{BlobStore, PinError};
use crate::models::EncryptedBundle;

const DEFAULT_API_BASE_URL: &str = "https://api.pinata.cloud";
const DEFAULT_GATEWAY_BASE_URL: &str = "https://gateway.pinata.cloud";
const PIN_JSON_PATH: &str = "/pinning/pinJSONToIPFS";

/// HTTP client for a Pinata-compatible pinning API and IPFS gateway.
#[derive(Debug, Clone)]
pub struct PinataClient {
    api_base_url: String,
    gateway_base_url: String,
    jwt: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

impl PinataClient {
    /// Construct from environment variables.
    ///
    /// `PINATA_JWT` is required; API and gateway base URLs default to the
    /// public Pinata endpoints.
    pub fn from_env() -> Result<Self, PinError> {
        let api_base_url = env_or_default("PINATA_API_BASE_URL", DEFAULT_API_BASE_URL);
        let gateway_base_url = env_or_default("PINATA_GATEWAY_BASE_URL", DEFAULT_GATEWAY_BASE_URL);
        let jwt = env_required("PINATA_JWT")?;

        Self::new(api_base_url, gateway_base_url, jwt)
    }

    pub fn new(
        api_base_url: String,
        gateway_base_url: String,
        jwt: String,
    ) -> Result<Self, PinError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| PinError::Publish(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            gateway_base_url: gateway_base_url.trim_end_matches('/').to_string(),
            jwt,
            http,
        })
    }
}

/// Build the pinJSONToIPFS envelope for a bundle.
pub(crate) fn pin_payload(name: &str, bundle: &EncryptedBundle) -> Value {
    json!({
        "pinataMetadata": { "name": name },
        "pinataContent": bundle,
    })
}

#[async_trait]
impl BlobStore for PinataClient {
    async fn publish(&self, name: &str, bundle: &EncryptedBundle) -> Result<String, PinError> {
        let url = format!("{}{}", self.api_base_url, PIN_JSON_PATH);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.jwt)
            .json(&pin_payload(name, bundle))
            .send()
            .await
            .map_err(|e| PinError::Publish(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PinError::Publish(format!(
                "pinning API returned {status}"
            )));
        }

        let pinned: PinResponse = response
            .json()
            .await
            .map_err(|e| PinError::InvalidResponse(format!("missing IpfsHash: {e}")))?;

        info!(locator = %pinned.ipfs_hash, pin = %name, "bundle pinned");
        Ok(pinned.ipfs_hash)
    }

    async fn fetch(&self, locator: &str) -> Result<EncryptedBundle, PinError> {
        let url = format!("{}/ipfs/{}", self.gateway_base_url, locator);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| PinError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PinError::Fetch(format!("gateway returned {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| PinError::InvalidResponse(format!("bundle did not parse: {e}")))
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_required(name: &str) -> Result<String, PinError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| PinError::MissingConfig(name.to_string()))
}
