//! Domain API configuration (GRC and service-health APIs)

use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

use super::ai::is_http_url;
use super::error::ValidationError;

pub(super) const GRC_PLACEHOLDER_URL: &str = "https://your-grc-api.com/api";
pub(super) const SERVICE_PLACEHOLDER_URL: &str = "https://your-service-api.com/api";

/// Connection settings for one domain API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DomainApiConfig {
    /// Base URL; sub-endpoint names are appended as path segments
    pub base_url: String,

    /// Sent as `Authorization: Bearer <token>`
    pub bearer_token: String,

    /// Sent as `X-API-Key`
    pub api_key: String,

    /// Extra static headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl DomainApiConfig {
    /// Placeholder settings for the GRC API
    pub fn grc_default() -> Self {
        Self {
            base_url: GRC_PLACEHOLDER_URL.to_string(),
            bearer_token: "your-grc-api-token".to_string(),
            api_key: "your-grc-api-key".to_string(),
            headers: BTreeMap::new(),
            timeout_secs: default_timeout(),
        }
    }

    /// Placeholder settings for the service-health API
    pub fn service_default() -> Self {
        Self {
            base_url: SERVICE_PLACEHOLDER_URL.to_string(),
            bearer_token: "your-service-api-token".to_string(),
            api_key: "your-service-api-key".to_string(),
            headers: BTreeMap::new(),
            timeout_secs: default_timeout(),
        }
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// True once the base URL has been changed from its placeholder
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
            && self.base_url != GRC_PLACEHOLDER_URL
            && self.base_url != SERVICE_PLACEHOLDER_URL
    }

    /// Validate domain API configuration
    pub fn validate(&self, section: &'static str) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl(section));
        }
        if !(1..=300).contains(&self.timeout_secs) {
            return Err(ValidationError::InvalidTimeout(section));
        }
        for name in self.headers.keys() {
            if http::HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(ValidationError::InvalidHeader(name.clone()));
            }
        }
        Ok(())
    }
}

pub(super) fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_placeholders() {
        let grc = DomainApiConfig::grc_default();
        let service = DomainApiConfig::service_default();

        assert_eq!(grc.base_url, "https://your-grc-api.com/api");
        assert_eq!(service.base_url, "https://your-service-api.com/api");
        assert_eq!(grc.timeout(), Duration::from_secs(10));
        assert!(!grc.is_configured());
        assert!(!service.is_configured());
    }

    #[test]
    fn test_changed_base_url_is_configured() {
        let config = DomainApiConfig {
            base_url: "https://grc.internal/api".to_string(),
            ..DomainApiConfig::grc_default()
        };
        assert!(config.is_configured());
    }

    #[test]
    fn test_validation() {
        assert!(DomainApiConfig::grc_default().validate("GRC").is_ok());

        let bad_url = DomainApiConfig {
            base_url: "ftp://grc".to_string(),
            ..DomainApiConfig::grc_default()
        };
        assert_eq!(bad_url.validate("GRC"), Err(ValidationError::InvalidUrl("GRC")));

        let mut bad_header = DomainApiConfig::service_default();
        bad_header
            .headers
            .insert("bad header".to_string(), "x".to_string());
        assert!(matches!(
            bad_header.validate("SERVICE"),
            Err(ValidationError::InvalidHeader(_))
        ));
    }
}
