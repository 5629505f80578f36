//! Sub-endpoint selection.
//!
//! Each domain API exposes a fixed set of sub-endpoints. Which one a message
//! hits is decided by an ordered rule table per domain: the first rule with a
//! keyword contained in the lower-cased message wins, otherwise the domain's
//! default endpoint is used.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the two external data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiDomain {
    /// Governance, risk and compliance API.
    Grc,
    /// Operational / service-health API.
    Service,
}

impl ApiDomain {
    /// Name reported in `ApiCallResult::service`.
    pub fn service_name(&self) -> &'static str {
        match self {
            ApiDomain::Grc => "GRC",
            ApiDomain::Service => "Service",
        }
    }

    /// Label used in failure messages ("Failed to fetch <label> data").
    pub fn data_label(&self) -> &'static str {
        match self {
            ApiDomain::Grc => "GRC",
            ApiDomain::Service => "service",
        }
    }

    /// The ordered selection rules and default endpoint for this domain.
    pub fn selector(&self) -> EndpointSelector {
        match self {
            ApiDomain::Grc => EndpointSelector::new(*self, GRC_ENDPOINT_RULES, GRC_DEFAULT_ENDPOINT),
            ApiDomain::Service => {
                EndpointSelector::new(*self, SERVICE_ENDPOINT_RULES, SERVICE_DEFAULT_ENDPOINT)
            }
        }
    }
}

impl fmt::Display for ApiDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name())
    }
}

/// A concrete call against one domain API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEndpointCall {
    pub domain: ApiDomain,
    pub endpoint_name: String,
    /// Query parameters sent with the request.
    pub parameters: BTreeMap<String, String>,
}

impl DomainEndpointCall {
    pub fn new(domain: ApiDomain, endpoint_name: impl Into<String>) -> Self {
        Self {
            domain,
            endpoint_name: endpoint_name.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Keyword set mapped to a sub-endpoint.
#[derive(Debug, Clone, Copy)]
pub struct EndpointRule {
    pub keywords: &'static [&'static str],
    pub endpoint: &'static str,
}

impl EndpointRule {
    pub fn matches(&self, lowercase: &str) -> bool {
        self.keywords.iter().any(|keyword| lowercase.contains(keyword))
    }
}

pub const GRC_DEFAULT_ENDPOINT: &str = "overview";
pub const SERVICE_DEFAULT_ENDPOINT: &str = "status";

pub const GRC_ENDPOINT_RULES: &[EndpointRule] = &[
    EndpointRule {
        keywords: &["policy", "policies"],
        endpoint: "policies",
    },
    EndpointRule {
        keywords: &["risk", "risks"],
        endpoint: "risks",
    },
    EndpointRule {
        keywords: &["audit", "audits"],
        endpoint: "audits",
    },
    EndpointRule {
        keywords: &["compliance"],
        endpoint: "compliance-status",
    },
    EndpointRule {
        keywords: &["incident", "breach"],
        endpoint: "incidents",
    },
    EndpointRule {
        keywords: &["control", "controls"],
        endpoint: "controls",
    },
    EndpointRule {
        keywords: &["assessment"],
        endpoint: "assessments",
    },
];

pub const SERVICE_ENDPOINT_RULES: &[EndpointRule] = &[
    EndpointRule {
        keywords: &["status", "health"],
        endpoint: "health-check",
    },
    EndpointRule {
        keywords: &["performance", "metrics"],
        endpoint: "metrics",
    },
    EndpointRule {
        keywords: &["alert", "alerts"],
        endpoint: "alerts",
    },
    EndpointRule {
        keywords: &["log", "logs"],
        endpoint: "logs",
    },
    EndpointRule {
        keywords: &["uptime", "availability"],
        endpoint: "uptime",
    },
    EndpointRule {
        keywords: &["deployment", "deploy"],
        endpoint: "deployments",
    },
    EndpointRule {
        keywords: &["error", "errors"],
        endpoint: "errors",
    },
];

/// Ordered rule table for one domain.
#[derive(Debug, Clone, Copy)]
pub struct EndpointSelector {
    domain: ApiDomain,
    rules: &'static [EndpointRule],
    default_endpoint: &'static str,
}

impl EndpointSelector {
    pub fn new(
        domain: ApiDomain,
        rules: &'static [EndpointRule],
        default_endpoint: &'static str,
    ) -> Self {
        Self {
            domain,
            rules,
            default_endpoint,
        }
    }

    /// Picks the sub-endpoint for `message`; first matching rule wins.
    pub fn select(&self, message: &str) -> DomainEndpointCall {
        let lowercase = message.to_lowercase();

        let endpoint = self
            .rules
            .iter()
            .find(|rule| rule.matches(&lowercase))
            .map(|rule| rule.endpoint)
            .unwrap_or(self.default_endpoint);

        DomainEndpointCall::new(self.domain, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grc(message: &str) -> String {
        ApiDomain::Grc.selector().select(message).endpoint_name
    }

    fn service(message: &str) -> String {
        ApiDomain::Service.selector().select(message).endpoint_name
    }

    #[test]
    fn grc_rules_select_each_endpoint() {
        assert_eq!(grc("list our policies"), "policies");
        assert_eq!(grc("top risks this quarter"), "risks");
        assert_eq!(grc("upcoming audits"), "audits");
        assert_eq!(grc("What is our compliance status?"), "compliance-status");
        assert_eq!(grc("any breach reported?"), "incidents");
        assert_eq!(grc("which controls failed"), "controls");
        assert_eq!(grc("latest assessment"), "assessments");
    }

    #[test]
    fn grc_falls_back_to_overview() {
        assert_eq!(grc("governance summary"), "overview");
    }

    #[test]
    fn grc_first_rule_wins() {
        // both "policy" and "risk" present; policy rule is listed first
        assert_eq!(grc("risk policy review"), "policies");
    }

    #[test]
    fn service_rules_select_each_endpoint() {
        assert_eq!(service("api health"), "health-check");
        assert_eq!(service("performance last week"), "metrics");
        assert_eq!(service("open alerts"), "alerts");
        assert_eq!(service("show the logs"), "logs");
        assert_eq!(service("check server uptime"), "uptime");
        assert_eq!(service("last deploy"), "deployments");
        assert_eq!(service("error rate"), "errors");
    }

    #[test]
    fn service_falls_back_to_status() {
        assert_eq!(service("database latency"), "status");
    }

    #[test]
    fn service_status_keyword_routes_to_health_check() {
        assert_eq!(service("What is our compliance status?"), "health-check");
    }

    #[test]
    fn selection_is_case_insensitive() {
        assert_eq!(grc("AUDIT trail"), "audits");
        assert_eq!(service("UPTIME"), "uptime");
    }

    #[test]
    fn selected_call_carries_domain_and_no_parameters() {
        let call = ApiDomain::Grc.selector().select("risk");
        assert_eq!(call.domain, ApiDomain::Grc);
        assert!(call.parameters.is_empty());
    }

    #[test]
    fn domain_names_and_labels() {
        assert_eq!(ApiDomain::Grc.service_name(), "GRC");
        assert_eq!(ApiDomain::Service.service_name(), "Service");
        assert_eq!(ApiDomain::Grc.data_label(), "GRC");
        assert_eq!(ApiDomain::Service.data_label(), "service");
    }
}
