use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::error::TransportError;
use super::types::{ArchiveItem, ArchiveSearchWire};
use crate::config::ArchiveConfig;

const SEARCH_PATH: &str = "/advancedsearch.php";

/// Client for an Internet Archive compatible advanced-search endpoint.
pub struct ArchiveClient {
    client: Client,
    base_url: String,
    rows: u32,
}

impl ArchiveClient {
    pub fn new(client: Client, config: &ArchiveConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rows: config.rows.max(1),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search archived movies whose title matches `title`.
    ///
    /// Results are returned unfiltered, in provider order.
    pub async fn search(&self, title: &str) -> Result<Vec<ArchiveItem>, TransportError> {
        let raw = format!("{}{}", self.base_url, SEARCH_PATH);
        let url = Url::parse_with_params(
            &raw,
            &[
                ("q", search_expression(title)),
                ("fl[]", "identifier".to_string()),
                ("fl[]", "title".to_string()),
                ("fl[]", "format".to_string()),
                ("rows", self.rows.to_string()),
                ("page", "1".to_string()),
                ("output", "json".to_string()),
            ],
        )
        .map_err(|e| TransportError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;

        debug!(title = %title, "Archive search");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                endpoint: SEARCH_PATH.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Archive provider error status");
            return Err(TransportError::Status {
                endpoint: SEARCH_PATH.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                endpoint: SEARCH_PATH.to_string(),
                source,
            })?;

        let wire: ArchiveSearchWire =
            serde_json::from_slice(&body).map_err(|e| TransportError::Decode {
                endpoint: SEARCH_PATH.to_string(),
                message: e.to_string(),
            })?;

        Ok(wire.response.docs.into_iter().map(ArchiveItem::from).collect())
    }
}

/// `title:("Night of the Living Dead") AND mediatype:(movies)`
fn search_expression(title: &str) -> String {
    let cleaned: String = title.chars().filter(|c| *c != '"').collect();
    format!("title:(\"{}\") AND mediatype:(movies)", cleaned.trim())
}
