use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::TransportError;
use super::types::{DetailsWire, MovieDetails, MoviePageWire, ResultPage, Trailer, VideoListWire};
use super::Fetcher;
use crate::config::{AuthType, Listing, MetadataConfig, SecureString};

/// Client for a TMDB-compatible metadata API.
pub struct MetadataClient {
    client: Client,
    base_url: String,
    auth_type: AuthType,
    api_key: SecureString,
    listing: Listing,
    max_pages: u32,
}

impl MetadataClient {
    pub fn new(
        client: Client,
        config: &MetadataConfig,
        listing: Listing,
        api_key: SecureString,
    ) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_type: config.auth_type(),
            api_key,
            listing,
            max_pages: config.max_pages.max(1),
        }
    }

    fn listing_path(&self) -> &'static str {
        match self.listing {
            Listing::Popular => "/movie/popular",
            Listing::Trending => "/trending/movie/week",
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<T, TransportError> {
        if self.auth_type == AuthType::ApiKey {
            params.push(("api_key", self.api_key.expose().to_string()));
        }

        let raw = format!("{}{}", self.base_url, path);
        let url = Url::parse_with_params(&raw, &params).map_err(|e| TransportError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;

        debug!(endpoint = %path, "Metadata request");

        let mut request = self.client.get(url);
        if self.auth_type == AuthType::Bearer {
            request = request.bearer_auth(self.api_key.expose());
        }

        let response = request
            .send()
            .await
            .map_err(|source| TransportError::Request {
                endpoint: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %path, status = status.as_u16(), "Metadata provider error status");
            return Err(TransportError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                endpoint: path.to_string(),
                source,
            })?;

        serde_json::from_slice(&body).map_err(|e| TransportError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Fetcher for MetadataClient {
    fn name(&self) -> &'static str {
        "metadata"
    }

    async fn fetch(&self, page: u32, query: &str) -> Result<ResultPage, TransportError> {
        let query = query.trim();
        let page_param = ("page", page.max(1).to_string());

        let wire: MoviePageWire = if query.is_empty() {
            self.get_json(self.listing_path(), vec![page_param]).await?
        } else {
            self.get_json(
                "/search/movie",
                vec![
                    ("query", query.to_string()),
                    page_param,
                    ("include_adult", "false".to_string()),
                ],
            )
            .await?
        };

        let mut page = ResultPage::from(wire);
        if page.total_pages > self.max_pages {
            debug!(reported = page.total_pages, cap = self.max_pages, "Capping page count");
            page.total_pages = self.max_pages;
        }
        Ok(page)
    }

    async fn trailer(&self, id: u64) -> Result<Option<Trailer>, TransportError> {
        let videos: VideoListWire = self
            .get_json(&format!("/movie/{}/videos", id), Vec::new())
            .await?;
        Ok(videos.into_trailer())
    }

    async fn details(&self, id: u64) -> Result<Option<MovieDetails>, TransportError> {
        let details: DetailsWire = self.get_json(&format!("/movie/{}", id), Vec::new()).await?;
        Ok(Some(details.into()))
    }
}
