use tracing::warn;
use url::Url;

use crate::models::{MetadataDocument, MetadataInfo};

const JSON_DATA_PREFIX: &str = "data:application/json;base64,";
const IPFS_SCHEME: &str = "ipfs://";
const IPFS_GATEWAY: &str = "https://ipfs.io/ipfs/";

/// Outcome of a metadata resolution. An unrecognized URI scheme is a
/// normal outcome, not a fetch failure.
#[derive(Debug)]
pub enum MetadataResolution {
    Document(MetadataDocument),
    Unsupported,
}

// ipfs:// references are served through a public HTTP gateway.
pub fn resolve_fetch_url(metadata_uri: &str) -> String {
    match metadata_uri.strip_prefix(IPFS_SCHEME) {
        Some(path) => format!("{}{}", IPFS_GATEWAY, path),
        None => metadata_uri.to_string(),
    }
}

/// Resolve a metadata reference into a parsed document.
///
/// Inline `data:application/json;base64,` payloads are decoded locally;
/// `http(s)` and `ipfs://` references are fetched over the network. Any
/// decode, network or parse failure surfaces as `Err` and callers treat
/// it as "no metadata available".
pub async fn fetch_metadata(
    http: &reqwest::Client,
    metadata_uri: &str,
) -> Result<MetadataResolution, String> {
    if metadata_uri.is_empty() {
        return Ok(MetadataResolution::Unsupported);
    }

    if let Some(encoded) = metadata_uri.strip_prefix(JSON_DATA_PREFIX) {
        let raw = base64::decode(encoded).map_err(|e| format!("invalid base64 payload: {}", e))?;
        let document = serde_json::from_slice::<MetadataDocument>(&raw)
            .map_err(|e| format!("invalid metadata json: {}", e))?;
        return Ok(MetadataResolution::Document(document));
    }

    if metadata_uri.starts_with("http") || metadata_uri.starts_with(IPFS_SCHEME) {
        let fetch_url = Url::parse(&resolve_fetch_url(metadata_uri))
            .map_err(|e| format!("invalid metadata url {}: {}", metadata_uri, e))?;

        let response = http
            .get(fetch_url.clone())
            .send()
            .await
            .map_err(|e| format!("metadata fetch failed ({}): {}", fetch_url, e))?;

        if !response.status().is_success() {
            return Err(format!(
                "metadata fetch returned {} for {}",
                response.status(),
                fetch_url
            ));
        }

        let document = response
            .json::<MetadataDocument>()
            .await
            .map_err(|e| format!("metadata parse failed ({}): {}", fetch_url, e))?;
        return Ok(MetadataResolution::Document(document));
    }

    warn!("unsupported metadata uri scheme: {}", metadata_uri);
    Ok(MetadataResolution::Unsupported)
}

/// AI summary of a document: `properties.aiSummary` first, else the
/// top-level description, but only when no bio is present (the
/// description duplicates the bio in that case).
pub fn extract_ai_summary(document: &MetadataDocument) -> Option<String> {
    if let Some(summary) = document
        .properties
        .as_ref()
        .and_then(|p| p.ai_summary.as_ref())
    {
        if !summary.is_empty() {
            return Some(summary.clone());
        }
    }

    let has_bio = document
        .properties
        .as_ref()
        .and_then(|p| p.bio.as_ref())
        .map_or(false, |bio| !bio.is_empty());

    match &document.description {
        Some(description) if !description.is_empty() && !has_bio => Some(description.clone()),
        _ => None,
    }
}

/// Project every recognized field into a flat record. Missing fields
/// stay `None`.
pub fn extract_metadata_info(document: &MetadataDocument) -> MetadataInfo {
    let properties = document.properties.clone().unwrap_or_default();

    MetadataInfo {
        name: document.name.clone(),
        description: document.description.clone(),
        image: document.image.clone(),
        ai_summary: extract_ai_summary(document),
        bio: properties.bio,
        role: properties.role,
        skills: properties.skills,
        contact: properties.contact,
        portfolio_link: properties.portfolio_link,
        profile_image_url: properties.profile_image_url,
        resume_file_url: properties.resume_file_url,
        created_at: properties.created_at,
        creator: properties.creator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetadataProperties;

    fn doc(description: Option<&str>, bio: Option<&str>, ai_summary: Option<&str>) -> MetadataDocument {
        MetadataDocument {
            description: description.map(|s| s.to_string()),
            properties: Some(MetadataProperties {
                bio: bio.map(|s| s.to_string()),
                ai_summary: ai_summary.map(|s| s.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_fetch_url() {
        assert_eq!(
            resolve_fetch_url("ipfs://bafybeigdyrzt/file.json"),
            "https://ipfs.io/ipfs/bafybeigdyrzt/file.json"
        );
        assert_eq!(
            resolve_fetch_url("https://example.com/meta.json"),
            "https://example.com/meta.json"
        );
    }

    #[test]
    fn test_extract_ai_summary_prefers_properties() {
        let document = doc(Some("Y"), None, Some("X"));
        assert_eq!(extract_ai_summary(&document), Some("X".to_string()));
    }

    #[test]
    fn test_extract_ai_summary_description_fallback() {
        let document = MetadataDocument {
            description: Some("Y".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_ai_summary(&document), Some("Y".to_string()));
    }

    #[test]
    fn test_extract_ai_summary_suppressed_by_bio() {
        let document = doc(Some("Y"), Some("Z"), None);
        assert_eq!(extract_ai_summary(&document), None);
    }

    #[test]
    fn test_extract_ai_summary_ignores_empty_fields() {
        // empty aiSummary falls through to description, empty bio does not suppress
        let document = doc(Some("Y"), Some(""), Some(""));
        assert_eq!(extract_ai_summary(&document), Some("Y".to_string()));

        let document = doc(None, None, None);
        assert_eq!(extract_ai_summary(&document), None);
    }

    #[test]
    fn test_extract_metadata_info() {
        let document = MetadataDocument {
            name: Some("Card #1".to_string()),
            description: Some("summary".to_string()),
            image: Some("https://example.com/a.png".to_string()),
            properties: Some(MetadataProperties {
                role: Some("Engineer".to_string()),
                skills: Some(vec!["rust".to_string(), "solidity".to_string()]),
                creator: Some("0xabc".to_string()),
                ..Default::default()
            }),
        };

        let info = extract_metadata_info(&document);
        assert_eq!(info.name, Some("Card #1".to_string()));
        assert_eq!(info.ai_summary, Some("summary".to_string()));
        assert_eq!(info.role, Some("Engineer".to_string()));
        assert_eq!(info.skills.as_ref().map(|s| s.len()), Some(2));
        assert_eq!(info.bio, None);
        assert_eq!(info.resume_file_url, None);
    }

    #[test]
    fn test_extract_metadata_info_empty_document() {
        let info = extract_metadata_info(&MetadataDocument::default());
        assert_eq!(info.name, None);
        assert_eq!(info.ai_summary, None);
        assert_eq!(info.created_at, None);
    }

    #[tokio::test]
    async fn test_fetch_metadata_data_uri() {
        let http = reqwest::Client::new();
        let json = r#"{"name":"Card","description":"D","properties":{"aiSummary":"S"}}"#;
        let uri = format!("data:application/json;base64,{}", base64::encode(json));

        match fetch_metadata(&http, &uri).await {
            Ok(MetadataResolution::Document(document)) => {
                assert_eq!(document.name, Some("Card".to_string()));
                assert_eq!(extract_ai_summary(&document), Some("S".to_string()));
            }
            other => panic!("expected document, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_metadata_corrupt_base64() {
        let http = reqwest::Client::new();
        let uri = "data:application/json;base64,!!!not-base64!!!";
        assert!(fetch_metadata(&http, uri).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_metadata_non_json_payload() {
        let http = reqwest::Client::new();
        let uri = format!(
            "data:application/json;base64,{}",
            base64::encode("plain text")
        );
        assert!(fetch_metadata(&http, &uri).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_metadata_unsupported_scheme() {
        let http = reqwest::Client::new();
        match fetch_metadata(&http, "ar://some-arweave-id").await {
            Ok(MetadataResolution::Unsupported) => {}
            other => panic!("expected unsupported, got {:?}", other),
        }
        match fetch_metadata(&http, "").await {
            Ok(MetadataResolution::Unsupported) => {}
            other => panic!("expected unsupported, got {:?}", other),
        }
    }
}
