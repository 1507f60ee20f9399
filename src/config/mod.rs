mod credentials;
mod loader;
mod types;

pub use credentials::{AuthType, CredentialStatus, SecureString};
pub use loader::ConfigError;
pub use types::{ArchiveConfig, CatalogConfig, Config, Defaults, Listing, MetadataConfig};
