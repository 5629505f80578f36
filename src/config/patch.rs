//! Partial runtime updates to integration configuration

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use super::ai::AzureConfig;
use super::domain_api::DomainApiConfig;

/// Reasons a patch request cannot be turned into a [`ConfigPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Patch body must be a JSON object")]
    NotAnObject,

    #[error("Malformed patch: {0}")]
    Malformed(String),
}

/// Fields that may be overridden on the language-model integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AzurePatch {
    pub endpoint: Option<String>,
    #[serde(alias = "apiKey")]
    pub api_key: Option<String>,
    #[serde(alias = "deploymentName")]
    pub deployment_name: Option<String>,
    #[serde(alias = "apiVersion")]
    pub api_version: Option<String>,
    #[serde(alias = "timeoutSecs")]
    pub timeout_secs: Option<u64>,
}

impl AzurePatch {
    pub fn apply(self, config: &mut AzureConfig) {
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }
        if let Some(deployment_name) = self.deployment_name {
            config.deployment_name = deployment_name;
        }
        if let Some(api_version) = self.api_version {
            config.api_version = api_version;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
    }
}

/// Fields that may be overridden on a domain API integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DomainApiPatch {
    #[serde(alias = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(alias = "bearerToken")]
    pub bearer_token: Option<String>,
    #[serde(alias = "apiKey")]
    pub api_key: Option<String>,
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(alias = "timeoutSecs")]
    pub timeout_secs: Option<u64>,
}

impl DomainApiPatch {
    /// Headers are merged key by key; every other field replaces.
    pub fn apply(self, config: &mut DomainApiConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(bearer_token) = self.bearer_token {
            config.bearer_token = bearer_token;
        }
        if let Some(api_key) = self.api_key {
            config.api_key = api_key;
        }
        if let Some(headers) = self.headers {
            config.headers.extend(headers);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
    }
}

/// A runtime update targeting exactly one integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPatch {
    Azure(AzurePatch),
    Grc(DomainApiPatch),
    Service(DomainApiPatch),
}

impl ConfigPatch {
    /// Parses the `{ service, config }` pair accepted by the update endpoint.
    pub fn parse(service: &str, config: Value) -> Result<Self, PatchError> {
        if !config.is_object() {
            return Err(PatchError::NotAnObject);
        }
        let malformed = |e: serde_json::Error| PatchError::Malformed(e.to_string());
        match service {
            "azure" => Ok(Self::Azure(
                serde_json::from_value(config).map_err(malformed)?,
            )),
            "grc" => Ok(Self::Grc(serde_json::from_value(config).map_err(malformed)?)),
            "service" => Ok(Self::Service(
                serde_json::from_value(config).map_err(malformed)?,
            )),
            other => Err(PatchError::UnknownService(other.to_string())),
        }
    }

    /// Name of the integration this patch targets.
    pub fn target(&self) -> &'static str {
        match self {
            Self::Azure(_) => "azure",
            Self::Grc(_) => "grc",
            Self::Service(_) => "service",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_accepts_camel_case_aliases() {
        let patch = ConfigPatch::parse(
            "azure",
            json!({ "apiKey": "k", "deploymentName": "gpt-4o" }),
        )
        .unwrap();

        assert_eq!(
            patch,
            ConfigPatch::Azure(AzurePatch {
                api_key: Some("k".to_string()),
                deployment_name: Some("gpt-4o".to_string()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let patch = ConfigPatch::parse("grc", json!({ "baseUrl": "http://x", "extra": 1 }));
        assert!(matches!(patch, Ok(ConfigPatch::Grc(_))));
    }

    #[test]
    fn parse_rejects_unknown_service() {
        assert_eq!(
            ConfigPatch::parse("billing", json!({})),
            Err(PatchError::UnknownService("billing".to_string()))
        );
    }

    #[test]
    fn parse_rejects_non_object_config() {
        assert_eq!(
            ConfigPatch::parse("grc", json!("http://x")),
            Err(PatchError::NotAnObject)
        );
        assert_eq!(
            ConfigPatch::parse("grc", Value::Null),
            Err(PatchError::NotAnObject)
        );
    }

    #[test]
    fn parse_rejects_wrongly_typed_fields() {
        let result = ConfigPatch::parse("service", json!({ "timeout_secs": "soon" }));
        assert!(matches!(result, Err(PatchError::Malformed(_))));
    }

    #[test]
    fn domain_patch_merges_headers() {
        let mut config = DomainApiConfig::grc_default();
        config.headers.insert("X-Tenant".to_string(), "a".to_string());

        DomainApiPatch {
            base_url: Some("https://grc.internal/api".to_string()),
            headers: Some(BTreeMap::from([("X-Region".to_string(), "eu".to_string())])),
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.base_url, "https://grc.internal/api");
        assert_eq!(config.headers.len(), 2);
        assert_eq!(config.bearer_token, "your-grc-api-token");
        assert!(config.is_configured());
    }

    #[test]
    fn azure_patch_leaves_unset_fields() {
        let mut config = AzureConfig::default();
        AzurePatch {
            api_key: Some("real".to_string()),
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.api_key, "real");
        assert_eq!(config.deployment_name, "gpt-4");
    }
}
