use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Default settings for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Which listing to show when no query is active.
    #[serde(default)]
    pub listing: Listing,
}

/// The query-less listing shown on startup and after `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Listing {
    #[default]
    Popular,
    Trending,
}

impl Listing {
    pub fn label(&self) -> &'static str {
        match self {
            Listing::Popular => "Popular",
            Listing::Trending => "Trending",
        }
    }
}

/// Metadata provider (TMDB-compatible API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Base URL for the API (e.g., "https://api.themoviedb.org/3").
    #[serde(default = "default_metadata_base_url")]
    pub base_url: String,
    /// Prefix joined with a poster path to build an image URL.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Authentication type: "api_key" (query parameter) or "bearer".
    #[serde(rename = "auth_type", default = "default_auth_type")]
    pub auth_type_str: String,
    /// Direct API key. Takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Highest page the provider will serve. TMDB reports larger page
    /// counts than it answers, so `total_pages` is capped here.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

/// Archive provider (Internet Archive compatible search).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_archive_base_url")]
    pub base_url: String,
    /// Maximum number of archive matches per lookup.
    #[serde(default = "default_archive_rows")]
    pub rows: u32,
}

/// Offline catalog used when no API key can be resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file with an array of movies.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Items per page when paginating the local catalog.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_metadata_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_auth_type() -> String {
    "api_key".to_string()
}

fn default_api_key_env() -> String {
    "TMDB_API_KEY".to_string()
}

fn default_max_pages() -> u32 {
    500
}

fn default_archive_base_url() -> String {
    "https://archive.org".to_string()
}

fn default_archive_rows() -> u32 {
    10
}

fn default_page_size() -> u32 {
    20
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: default_connect_timeout(),
            listing: Listing::default(),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            base_url: default_metadata_base_url(),
            image_base_url: default_image_base_url(),
            auth_type_str: default_auth_type(),
            api_key: None,
            api_key_env: default_api_key_env(),
            max_pages: default_max_pages(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: default_archive_base_url(),
            rows: default_archive_rows(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            page_size: default_page_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            metadata: MetadataConfig::default(),
            archive: ArchiveConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}
