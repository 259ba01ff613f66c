use tracing::warn;

use crate::client::LedgerReader;
use crate::models::TokenRecord;

/// Enumerate token records for ids `1..=total` in ascending order, one
/// ledger read per id. A failed read skips that id without aborting the
/// remaining ones.
pub async fn read_minted_tokens<R: LedgerReader>(ledger: &R, total: u64) -> Vec<TokenRecord> {
    let mut tokens = Vec::with_capacity(total as usize);
    if total == 0 {
        return tokens;
    }

    for token_id in 1..=total {
        match ledger.get_token_info(token_id).await {
            Ok(record) => tokens.push(record),
            Err(e) => warn!("token {} read failed, skipped: {}", token_id, e),
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileRecord;
    use std::collections::HashSet;

    struct FakeLedger {
        total: u64,
        failing_ids: HashSet<u64>,
    }

    impl LedgerReader for FakeLedger {
        async fn total_minted_tokens(&self) -> Result<u64, String> {
            Ok(self.total)
        }

        async fn get_token_info(&self, token_id: u64) -> Result<TokenRecord, String> {
            if self.failing_ids.contains(&token_id) {
                return Err(format!("read failed for token {}", token_id));
            }
            Ok(TokenRecord {
                token_id,
                owner: format!("0x{:040x}", token_id),
                metadata_uri: String::new(),
                minted_at: 1_700_000_000 + token_id,
                token_type: 1,
            })
        }

        async fn get_profile_by_wallet(&self, address: &str) -> Result<ProfileRecord, String> {
            Err(format!("no profile for {}", address))
        }
    }

    #[tokio::test]
    async fn test_reads_all_tokens_in_ascending_order() {
        let ledger = FakeLedger {
            total: 5,
            failing_ids: HashSet::new(),
        };
        let tokens = read_minted_tokens(&ledger, 5).await;
        let ids: Vec<u64> = tokens.iter().map(|t| t.token_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_failed_id_is_skipped() {
        let ledger = FakeLedger {
            total: 4,
            failing_ids: [3].into_iter().collect(),
        };
        let tokens = read_minted_tokens(&ledger, 4).await;
        let ids: Vec<u64> = tokens.iter().map(|t| t.token_id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn test_zero_total_is_empty() {
        let ledger = FakeLedger {
            total: 0,
            failing_ids: HashSet::new(),
        };
        assert!(read_minted_tokens(&ledger, 0).await.is_empty());
    }
}
