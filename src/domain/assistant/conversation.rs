//! Conversation value objects.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
    System,
}

/// One turn of caller-supplied history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}

/// Chronological history; passed to the model as-is.
pub type ConversationHistory = Vec<ConversationTurn>;

/// Validated text of the current user message. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage(String);

impl UserMessage {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        Ok(Self(text))
    }

    /// Validates an untyped request field: it must be present and a string.
    pub fn from_value(value: Option<&Value>) -> Result<Self, ValidationError> {
        match value {
            None | Some(Value::Null) => Err(ValidationError::missing_field("message")),
            Some(Value::String(text)) => Self::new(text.as_str()),
            Some(_) => Err(ValidationError::invalid_format(
                "message",
                "expected a string",
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_message_accepts_text() {
        let msg = UserMessage::from_value(Some(&json!("check server uptime"))).unwrap();
        assert_eq!(msg.as_str(), "check server uptime");
    }

    #[test]
    fn user_message_rejects_missing_null_and_non_string() {
        assert_eq!(
            UserMessage::from_value(None),
            Err(ValidationError::missing_field("message"))
        );
        assert_eq!(
            UserMessage::from_value(Some(&Value::Null)),
            Err(ValidationError::missing_field("message"))
        );
        assert!(matches!(
            UserMessage::from_value(Some(&json!(42))),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            UserMessage::from_value(Some(&json!({"text": "hi"}))),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn user_message_rejects_blank() {
        assert_eq!(
            UserMessage::new(""),
            Err(ValidationError::empty_field("message"))
        );
        assert_eq!(
            UserMessage::new("   \n"),
            Err(ValidationError::empty_field("message"))
        );
    }

    #[test]
    fn turn_roles_use_lowercase_wire_names() {
        let turn: ConversationTurn =
            serde_json::from_str(r#"{"role":"assistant","content":"Hi"}"#).unwrap();
        assert_eq!(turn, ConversationTurn::assistant("Hi"));

        let json = serde_json::to_string(&ConversationTurn::user("Hello")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Hello"}"#);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result: Result<ConversationTurn, _> =
            serde_json::from_str(r#"{"role":"tool","content":"x"}"#);
        assert!(result.is_err());
    }
}
