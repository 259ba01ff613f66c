use serde_json::json;
use tracing::info;

use crate::models::{AddWalletResponse, WalletListResponse};

/// Client for the wallet-address registry collaborator, the source of
/// the airdrop recipient list.
pub struct WalletRegistryClient {
    base_url: String,
    http: reqwest::Client,
}

impl WalletRegistryClient {
    pub fn new(base_url: String, http: reqwest::Client) -> Self {
        WalletRegistryClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub async fn list_wallets(&self) -> Result<WalletListResponse, String> {
        let url = format!("{}/wallets", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("wallet registry request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("wallet registry returned {}", response.status()));
        }

        let body = response
            .json::<WalletListResponse>()
            .await
            .map_err(|e| format!("wallet registry response parse failed: {}", e))?;
        info!("fetched {} wallet addresses", body.count);
        Ok(body)
    }

    pub async fn add_wallet(&self, address: &str) -> Result<AddWalletResponse, String> {
        let url = format!("{}/wallets", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&json!({ "address": address }))
            .send()
            .await
            .map_err(|e| format!("wallet registry request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("wallet registry returned {}", response.status()));
        }

        response
            .json::<AddWalletResponse>()
            .await
            .map_err(|e| format!("wallet registry response parse failed: {}", e))
    }
}

// Bare address list for airdrop selection.
pub fn extract_addresses(response: &WalletListResponse) -> Vec<String> {
    response.wallets.iter().map(|w| w.address.clone()).collect()
}
