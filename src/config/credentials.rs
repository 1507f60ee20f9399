//! Credential resolution from configuration.
//!
//! The metadata API key comes from the config file or, failing that,
//! from the environment variable named by `metadata.api_key_env`.

use super::types::MetadataConfig;

/// How the API key is presented to the metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// `api_key=...` query parameter (TMDB v3 keys).
    ApiKey,
    /// `Authorization: Bearer` header (TMDB read access tokens).
    Bearer,
}

impl AuthType {
    /// Parse auth type from string.
    /// Defaults to `ApiKey` for unknown values.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "bearer" => AuthType::Bearer,
            _ => AuthType::ApiKey,
        }
    }
}

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Status of credential resolution for the metadata provider.
#[derive(Debug, Clone)]
pub enum CredentialStatus {
    /// API key resolved successfully.
    Configured(SecureString),
    /// API key is missing or empty.
    Unconfigured {
        /// Reason for missing configuration.
        reason: String,
    },
}

impl MetadataConfig {
    pub fn auth_type(&self) -> AuthType {
        AuthType::parse(&self.auth_type_str)
    }

    /// Resolve the API key, config value first, then environment.
    ///
    /// Not cached: the environment is read on every call.
    pub fn resolve_credential(&self) -> CredentialStatus {
        if let Some(key) = self.api_key.as_deref().map(str::trim) {
            if !key.is_empty() {
                return CredentialStatus::Configured(SecureString::new(key.to_string()));
            }
        }

        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                CredentialStatus::Configured(SecureString::new(key.trim().to_string()))
            }
            _ => CredentialStatus::Unconfigured {
                reason: format!(
                    "metadata.api_key is not set and {} is empty",
                    self.api_key_env
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_type_parsing() {
        assert_eq!(AuthType::parse("api_key"), AuthType::ApiKey);
        assert_eq!(AuthType::parse("bearer"), AuthType::Bearer);
        assert_eq!(AuthType::parse("Bearer"), AuthType::Bearer);
        assert_eq!(AuthType::parse("unknown"), AuthType::ApiKey);
        assert_eq!(AuthType::parse(""), AuthType::ApiKey);
    }

    #[test]
    fn test_secure_string_does_not_leak() {
        let secret = SecureString::new("my-secret-key".to_string());

        let debug_output = format!("{:?}", secret);
        assert!(!debug_output.contains("my-secret-key"));
        assert!(debug_output.contains("••••••••"));

        let display_output = format!("{}", secret);
        assert!(!display_output.contains("my-secret-key"));

        assert_eq!(secret.expose(), "my-secret-key");
    }

    #[test]
    fn test_config_key_wins_over_env() {
        let config = MetadataConfig {
            api_key: Some("  from-config  ".to_string()),
            api_key_env: "MOVIEDECK_TEST_KEY_PRECEDENCE".to_string(),
            ..MetadataConfig::default()
        };
        std::env::set_var("MOVIEDECK_TEST_KEY_PRECEDENCE", "from-env");

        match config.resolve_credential() {
            CredentialStatus::Configured(key) => assert_eq!(key.expose(), "from-config"),
            other => panic!("expected configured key, got {:?}", other),
        }
    }

    #[test]
    fn test_env_key_used_when_config_empty() {
        let config = MetadataConfig {
            api_key: Some(String::new()),
            api_key_env: "MOVIEDECK_TEST_KEY_ENV_ONLY".to_string(),
            ..MetadataConfig::default()
        };
        std::env::set_var("MOVIEDECK_TEST_KEY_ENV_ONLY", "from-env");

        match config.resolve_credential() {
            CredentialStatus::Configured(key) => assert_eq!(key.expose(), "from-env"),
            other => panic!("expected configured key, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_key_is_unconfigured() {
        let config = MetadataConfig {
            api_key: None,
            api_key_env: "MOVIEDECK_TEST_KEY_NEVER_SET".to_string(),
            ..MetadataConfig::default()
        };

        match config.resolve_credential() {
            CredentialStatus::Unconfigured { reason } => {
                assert!(reason.contains("MOVIEDECK_TEST_KEY_NEVER_SET"));
            }
            other => panic!("expected unconfigured, got {:?}", other),
        }
    }
}
