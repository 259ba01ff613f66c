use serde::Serialize;
use tracing::{error, info, warn};

use crate::client::LedgerReader;
use crate::metadata::{extract_ai_summary, fetch_metadata, MetadataResolution};
use crate::models::{AggregatedProfileView, ProfileView, TokenRecord};
use crate::registry::read_minted_tokens;
use crate::utils::find_first_image_url;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationState {
    Idle,
    Loading,
    Success,
    Error(String),
}

/// Builds the display-ready view-model collection from ledger state.
///
/// Each refresh fully replaces the collection. Overlapping refreshes are
/// not cancelled or versioned, the last write wins.
pub struct ProfileAggregator {
    http: reqwest::Client,
    state: AggregationState,
    profiles: Vec<AggregatedProfileView>,
}

impl ProfileAggregator {
    pub fn new(http: reqwest::Client) -> Self {
        ProfileAggregator {
            http,
            state: AggregationState::Idle,
            profiles: Vec::new(),
        }
    }

    pub fn state(&self) -> &AggregationState {
        &self.state
    }

    pub fn profiles(&self) -> &[AggregatedProfileView] {
        &self.profiles
    }

    /// Rebuild the collection from scratch. Only a failure before token
    /// iteration begins reaches the error state; per-token failures leave
    /// partial entries or skip the token.
    pub async fn refresh<R: LedgerReader>(&mut self, ledger: &R) {
        self.state = AggregationState::Loading;

        let total = match ledger.total_minted_tokens().await {
            Ok(total) => total,
            Err(e) => {
                error!("ledger unreachable, aggregation aborted: {}", e);
                self.profiles = Vec::new();
                self.state = AggregationState::Error(e);
                return;
            }
        };

        if total == 0 {
            self.profiles = Vec::new();
            self.state = AggregationState::Success;
            return;
        }

        info!("loading {} minted profiles", total);

        let tokens = read_minted_tokens(ledger, total).await;
        let mut views = Vec::with_capacity(tokens.len());
        for token in tokens {
            views.push(self.build_view(ledger, token).await);
        }

        info!("loaded {} minted profiles", views.len());
        self.profiles = views;
        self.state = AggregationState::Success;
    }

    async fn build_view<R: LedgerReader>(
        &self,
        ledger: &R,
        token: TokenRecord,
    ) -> AggregatedProfileView {
        let profile = match ledger.get_profile_by_wallet(&token.owner).await {
            Ok(record) => {
                let profile_image_url = find_first_image_url(&record.file_urls);

                let ai_summary = match fetch_metadata(&self.http, &token.metadata_uri).await {
                    Ok(MetadataResolution::Document(document)) => extract_ai_summary(&document),
                    Ok(MetadataResolution::Unsupported) => None,
                    Err(e) => {
                        warn!("metadata fetch failed for token {}: {}", token.token_id, e);
                        None
                    }
                };

                Some(ProfileView {
                    name: record.name,
                    role: record.role,
                    introduction: record.introduction,
                    skills: record.skills,
                    contact: record.contact,
                    portfolio_link: record.portfolio_link,
                    file_urls: record.file_urls,
                    profile_image_url,
                    ai_summary,
                })
            }
            Err(e) => {
                warn!(
                    "profile read failed for token {} owner {}: {}",
                    token.token_id, token.owner, e
                );
                None
            }
        };

        AggregatedProfileView {
            token_id: token.token_id,
            owner: token.owner,
            metadata_uri: token.metadata_uri,
            minted_at: token.minted_at,
            token_type: token.token_type,
            profile,
        }
    }
}
