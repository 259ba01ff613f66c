use serde::{Deserialize, Serialize};

/// One minted profile-card token as reported by the ledger.
/// Token ids are assigned sequentially starting at 1 with no gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub token_id: u64,
    pub owner: String,
    pub metadata_uri: String,
    pub minted_at: u64,
    pub token_type: u32,
}

/// Per-account business-card data stored by the ledger. At most one
/// active profile per address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub wallet_address: String,
    pub name: String,
    pub role: String,
    pub introduction: String,
    pub skills: String,
    pub contact: String,
    pub portfolio_link: String,
    pub file_urls: Vec<String>,
    pub timestamp: u64,
}

/// Off-chain JSON document referenced by a token's metadata URI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub properties: Option<MetadataProperties>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataProperties {
    pub role: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub contact: Option<String>,
    pub portfolio_link: Option<String>,
    pub profile_image_url: Option<String>,
    pub resume_file_url: Option<String>,
    pub ai_summary: Option<String>,
    pub created_at: Option<String>,
    pub creator: Option<String>,
}

/// Flat projection of every recognized metadata field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub ai_summary: Option<String>,
    pub bio: Option<String>,
    pub role: Option<String>,
    pub skills: Option<Vec<String>>,
    pub contact: Option<String>,
    pub portfolio_link: Option<String>,
    pub profile_image_url: Option<String>,
    pub resume_file_url: Option<String>,
    pub created_at: Option<String>,
    pub creator: Option<String>,
}

/// Profile fields of an aggregated view, present only when the owner's
/// profile read succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub name: String,
    pub role: String,
    pub introduction: String,
    pub skills: String,
    pub contact: String,
    pub portfolio_link: String,
    pub file_urls: Vec<String>,
    pub profile_image_url: Option<String>,
    pub ai_summary: Option<String>,
}

/// Display-ready merge of token, profile and metadata data. Rebuilt
/// whole on every refresh, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedProfileView {
    pub token_id: u64,
    pub owner: String,
    pub metadata_uri: String,
    pub minted_at: u64,
    pub token_type: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletAddress {
    pub id: i64,
    pub address: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletListResponse {
    pub wallets: Vec<WalletAddress>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddWalletResponse {
    pub id: i64,
    pub address: String,
    pub message: String,
}
