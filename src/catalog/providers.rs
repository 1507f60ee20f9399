use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{ArchiveClient, Fetcher, LocalCatalog, MetadataClient};
use crate::config::{Config, ConfigError, CredentialStatus};

/// The fetchers one session talks to.
pub struct Providers {
    pub fetcher: Arc<dyn Fetcher>,
    pub archive: ArchiveClient,
}

impl Providers {
    /// Pick the listing source.
    ///
    /// Priority: explicit `catalog_override`, then the metadata API when a
    /// key resolves, then `catalog.path` from the config.
    pub fn from_config(
        config: &Config,
        catalog_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(
                config.defaults.connect_timeout_seconds as u64,
            ))
            .build()
            .map_err(ConfigError::HttpClient)?;

        let archive = ArchiveClient::new(client.clone(), &config.archive);
        let page_size = config.catalog.page_size;

        let fetcher: Arc<dyn Fetcher> = if let Some(path) = catalog_override {
            info!(path = %path.display(), "Using local catalog from command line");
            Arc::new(LocalCatalog::new(path, page_size))
        } else {
            match config.metadata.resolve_credential() {
                CredentialStatus::Configured(key) => Arc::new(MetadataClient::new(
                    client,
                    &config.metadata,
                    config.defaults.listing,
                    key,
                )),
                CredentialStatus::Unconfigured { reason } => match &config.catalog.path {
                    Some(path) => {
                        info!(%reason, path = %path.display(), "No API key, using local catalog");
                        Arc::new(LocalCatalog::new(path.clone(), page_size))
                    }
                    None => {
                        return Err(ConfigError::ValidationError {
                            message: format!(
                                "No metadata API key ({}). Set {} or configure catalog.path",
                                reason, config.metadata.api_key_env
                            ),
                        })
                    }
                },
            }
        };

        Ok(Self { fetcher, archive })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyless_config() -> Config {
        let mut config = Config::default();
        config.metadata.api_key = None;
        config.metadata.api_key_env = "MOVIEDECK_TEST_PROVIDERS_NO_KEY".to_string();
        config
    }

    #[test]
    fn keyless_without_catalog_is_rejected() {
        let err = Providers::from_config(&keyless_config(), None)
            .err()
            .expect("expected missing key error");
        assert!(err.to_string().contains("MOVIEDECK_TEST_PROVIDERS_NO_KEY"));
    }

    #[test]
    fn keyless_with_catalog_path_uses_local() {
        let mut config = keyless_config();
        config.catalog.path = Some(PathBuf::from("movies.json"));
        let providers = Providers::from_config(&config, None).unwrap();
        assert_eq!(providers.fetcher.name(), "local");
    }

    #[test]
    fn configured_key_uses_metadata() {
        let mut config = keyless_config();
        config.metadata.api_key = Some("k".to_string());
        let providers = Providers::from_config(&config, None).unwrap();
        assert_eq!(providers.fetcher.name(), "metadata");
    }

    #[test]
    fn override_beats_configured_key() {
        let mut config = keyless_config();
        config.metadata.api_key = Some("k".to_string());
        let providers =
            Providers::from_config(&config, Some(PathBuf::from("offline.json"))).unwrap();
        assert_eq!(providers.fetcher.name(), "local");
    }
}
