//! Intent classification.
//!
//! Maps a raw chat message to the domains it concerns by keyword membership.
//! Matching is a substring test on the lower-cased message, so a keyword also
//! matches inside a longer word ("log" matches "catalog").

use serde::{Deserialize, Serialize};

use super::endpoint::ApiDomain;

/// Domain a message concerns.
///
/// Declaration order is the precedence order of a classification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Governance, risk and compliance data.
    Grc,
    /// Operational and service-health data.
    Service,
    /// Nothing domain specific; no API call is made.
    General,
}

impl Intent {
    /// The domain API this intent routes to, if any.
    pub fn domain(&self) -> Option<ApiDomain> {
        match self {
            Intent::Grc => Some(ApiDomain::Grc),
            Intent::Service => Some(ApiDomain::Service),
            Intent::General => None,
        }
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: &'static [&'static str],
}

impl IntentRule {
    /// True if any keyword occurs in the already lower-cased message.
    pub fn matches(&self, lowercase: &str) -> bool {
        self.keywords.iter().any(|keyword| lowercase.contains(keyword))
    }
}

pub const GRC_KEYWORDS: &[&str] = &[
    "compliance",
    "risk",
    "governance",
    "policy",
    "audit",
    "regulation",
    "control",
    "framework",
    "assessment",
    "security",
    "privacy",
    "gdpr",
    "sox",
    "iso",
    "nist",
    "regulatory",
    "violation",
    "incident",
    "threat",
    "vulnerability",
    "breach",
    "data protection",
    "access control",
];

pub const SERVICE_KEYWORDS: &[&str] = &[
    "service",
    "api",
    "status",
    "health",
    "uptime",
    "performance",
    "monitor",
    "alert",
    "metric",
    "log",
    "trace",
    "endpoint",
    "availability",
    "latency",
    "error",
    "deployment",
    "infrastructure",
    "server",
    "database",
    "network",
    "application",
];

/// Default classification table, in precedence order.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Grc,
        keywords: GRC_KEYWORDS,
    },
    IntentRule {
        intent: Intent::Service,
        keywords: SERVICE_KEYWORDS,
    },
];

/// Classifies user intent from message content
pub trait IntentClassifier: Send + Sync {
    /// Classify a message into a non-empty, duplicate-free list of intents
    /// ordered by precedence. A message matching no rule yields `[General]`.
    fn classify(&self, message: &str) -> Vec<Intent>;
}

/// Table-driven keyword classifier (default implementation)
#[derive(Debug, Clone)]
pub struct KeywordIntentClassifier {
    rules: &'static [IntentRule],
}

impl KeywordIntentClassifier {
    pub fn new() -> Self {
        Self {
            rules: INTENT_RULES,
        }
    }

    /// Builds a classifier over a custom rule table.
    pub fn with_rules(rules: &'static [IntentRule]) -> Self {
        Self { rules }
    }
}

impl Default for KeywordIntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier for KeywordIntentClassifier {
    fn classify(&self, message: &str) -> Vec<Intent> {
        let lowercase = message.to_lowercase();

        let mut intents: Vec<Intent> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(&lowercase))
            .map(|rule| rule.intent)
            .collect();
        intents.sort();
        intents.dedup();

        if intents.is_empty() {
            intents.push(Intent::General);
        }

        intents
    }
}
