//! Configuration for society service module

use serde::Deserialize;

/// Longest accepted session lifetime (30 days)
pub const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Society service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maximum utility workers attached to one society
    #[serde(default = "default_max_workers")]
    pub max_workers_per_society: usize,

    /// Maximum notice body length in characters
    #[serde(default = "default_max_notice_length")]
    pub max_notice_length: usize,

    /// Maximum document size in bytes
    #[serde(default = "default_max_document_size")]
    pub max_document_size: usize,

    /// Landing page for admins when sign-in carries no redirect target
    #[serde(default = "default_admin_landing")]
    pub admin_landing_page: String,

    /// Landing page for tenants when sign-in carries no redirect target
    #[serde(default = "default_tenant_landing")]
    pub tenant_landing_page: String,

    /// Session token settings
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Session token configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// HMAC secret for session tokens (required, no default)
    #[serde(default)]
    pub jwt_secret: String,

    /// Token issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_workers_per_society: default_max_workers(),
            max_notice_length: default_max_notice_length(),
            max_document_size: default_max_document_size(),
            admin_landing_page: default_admin_landing(),
            tenant_landing_page: default_tenant_landing(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            issuer: default_issuer(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

impl Config {
    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth.jwt_secret.len() < 16 {
            anyhow::bail!("society_service.auth.jwt_secret must be at least 16 bytes");
        }
        if self.auth.token_ttl_secs == 0 || self.auth.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            anyhow::bail!(
                "society_service.auth.token_ttl_secs must be between 1 and {MAX_TOKEN_TTL_SECS}"
            );
        }
        if self.max_document_size == 0 {
            anyhow::bail!("society_service.max_document_size must be positive");
        }
        Ok(())
    }
}

fn default_max_workers() -> usize {
    50
}

fn default_max_notice_length() -> usize {
    5_000
}

fn default_max_document_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

fn default_admin_landing() -> String {
    "/admin/dashboard".to_string()
}

fn default_tenant_landing() -> String {
    "/tenant/dashboard".to_string()
}

fn default_issuer() -> String {
    "society-hub".to_string()
}

fn default_token_ttl_secs() -> u64 {
    12 * 60 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_need_a_secret() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.auth.jwt_secret = "0123456789abcdef".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_token_ttl_is_bounded() {
        let mut config = Config::default();
        config.auth.jwt_secret = "0123456789abcdef".to_string();

        config.auth.token_ttl_secs = 0;
        assert!(config.validate().is_err());

        config.auth.token_ttl_secs = MAX_TOKEN_TTL_SECS;
        assert!(config.validate().is_ok());

        config.auth.token_ttl_secs = u64::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("token_ttl_secs"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "max_workers_per_society": 3,
            "auth": { "jwt_secret": "0123456789abcdef" }
        }))
        .unwrap();

        assert_eq!(config.max_workers_per_society, 3);
        assert_eq!(config.max_notice_length, 5_000);
        assert_eq!(config.auth.issuer, "society-hub");
        assert_eq!(config.auth.token_ttl_secs, 43_200);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<Config, _> =
            serde_json::from_value(serde_json::json!({ "max_worker": 3 }));
        assert!(result.is_err());
    }
}
