use serde::Deserialize;

use crate::models::{ProfileRecord, TokenRecord};

/// Read access to the ledger collaborator. Injected into the registry
/// reader and the aggregator so tests can substitute a fake ledger.
pub trait LedgerReader {
    async fn total_minted_tokens(&self) -> Result<u64, String>;
    async fn get_token_info(&self, token_id: u64) -> Result<TokenRecord, String>;
    async fn get_profile_by_wallet(&self, address: &str) -> Result<ProfileRecord, String>;
}

/// HTTP client for the ledger collaborator's read interface.
pub struct LedgerClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct TotalMintedResponse {
    total: u64,
}

impl LedgerClient {
    pub fn new(base_url: String, http: reqwest::Client) -> Self {
        LedgerClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| format!("ledger request failed ({}): {}", url, e))?;

        if !response.status().is_success() {
            return Err(format!("ledger returned {} for {}", response.status(), url));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| format!("ledger response parse failed ({}): {}", url, e))
    }
}

impl LedgerReader for LedgerClient {
    async fn total_minted_tokens(&self) -> Result<u64, String> {
        let body: TotalMintedResponse = self.get_json("/totalMintedTokens").await?;
        Ok(body.total)
    }

    async fn get_token_info(&self, token_id: u64) -> Result<TokenRecord, String> {
        self.get_json(&format!("/tokenInfo/{}", token_id)).await
    }

    async fn get_profile_by_wallet(&self, address: &str) -> Result<ProfileRecord, String> {
        self.get_json(&format!("/profile/{}", address)).await
    }
}
