/// Video resolution against the external catalog
use crate::config::CatalogSettings;
use crate::error::{Result, ServerError};
use async_trait::async_trait;
use serde::Deserialize;
use watchbox_core::types::CreateVideo;
use watchbox_core::WatchboxError;

/// Resolves a video link to its catalog metadata.
///
/// Implementations must be idempotent by link: resolving the same link
/// twice yields the same metadata. Connectivity failures are transient and
/// eligible for retry; an unknown link is a terminal not-found.
#[async_trait]
pub trait VideoResolver: Send + Sync {
    async fn resolve(&self, link: &str) -> Result<CreateVideo>;
}

/// The YouTube data API v3 resolver
pub struct YoutubeCatalog {
    api_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    items: Vec<CatalogItem>,
}

#[derive(Debug, Deserialize)]
struct CatalogItem {
    snippet: CatalogSnippet,
    #[serde(rename = "contentDetails")]
    content_details: CatalogContentDetails,
}

#[derive(Debug, Deserialize)]
struct CatalogSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct CatalogContentDetails {
    duration: String,
}

impl YoutubeCatalog {
    pub fn new(settings: &CatalogSettings) -> Self {
        Self {
            api_url: settings.url.clone(),
            api_key: settings.key.clone(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VideoResolver for YoutubeCatalog {
    async fn resolve(&self, link: &str) -> Result<CreateVideo> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("part", "snippet,contentDetails"),
                ("id", link),
                ("key", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| ServerError::Catalog(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServerError::Catalog(format!(
                "catalog answered {} for {link}",
                response.status()
            )));
        }

        let body: CatalogResponse = response
            .json()
            .await
            .map_err(|e| ServerError::Catalog(e.to_string()))?;

        // An empty item list means the link does not exist; that will not
        // change on retry.
        let item = body
            .items
            .into_iter()
            .next()
            .ok_or_else(|| WatchboxError::VideoNotFound(link.to_string()))?;

        Ok(CreateVideo {
            link: link.to_string(),
            name: item.snippet.title,
            duration: item.content_details.duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_payload() {
        let raw = r#"{
            "items": [{
                "snippet": { "title": "Some Video" },
                "contentDetails": { "duration": "PT3M33S" }
            }]
        }"#;

        let parsed: CatalogResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].snippet.title, "Some Video");
        assert_eq!(parsed.items[0].content_details.duration, "PT3M33S");
    }

    #[test]
    fn missing_items_field_is_empty() {
        let parsed: CatalogResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.items.is_empty());
    }
}
