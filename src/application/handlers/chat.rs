//! ChatHandler - the single entry point of the chat pipeline.
//!
//! Validates the inbound message, then runs classify → route → complete and
//! assembles the response envelope. Failures below this handler are already
//! turned into data; anything that still escapes (a panic) is caught here
//! once and reported as `ChatError::Internal`.

use futures::FutureExt;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::application::{ApiOrchestrator, CompletionGateway};
use crate::domain::assistant::{
    ApiCallResult, ConversationHistory, Intent, IntentClassifier, UserMessage,
};
use crate::domain::foundation::{Timestamp, ValidationError};

/// Command to answer one chat message.
#[derive(Debug, Clone, Default)]
pub struct ChatCommand {
    /// Raw `message` field; validated by the handler.
    pub message: Option<Value>,
    /// Prior turns, oldest first.
    pub conversation_history: ConversationHistory,
}

impl ChatCommand {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(Value::String(message.into())),
            conversation_history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: ConversationHistory) -> Self {
        self.conversation_history = history;
        self
    }
}

/// Result of a handled chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResult {
    pub response: String,
    pub api_calls: Vec<ApiCallResult>,
    pub intents: Vec<Intent>,
    pub timestamp: Timestamp,
}

/// Errors that can reach the caller of the chat pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Message absent, not a string, or blank.
    #[error("Invalid message: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Unexpected fault inside the pipeline.
    #[error("{0}")]
    Internal(String),
}

/// Handler for chat messages.
#[derive(Clone)]
pub struct ChatHandler {
    classifier: Arc<dyn IntentClassifier>,
    orchestrator: ApiOrchestrator,
    gateway: CompletionGateway,
}

impl ChatHandler {
    pub fn new(
        classifier: Arc<dyn IntentClassifier>,
        orchestrator: ApiOrchestrator,
        gateway: CompletionGateway,
    ) -> Self {
        Self {
            classifier,
            orchestrator,
            gateway,
        }
    }

    pub async fn handle(&self, cmd: ChatCommand) -> Result<ChatResult, ChatError> {
        let message = UserMessage::from_value(cmd.message.as_ref())?;
        let trace_id = Uuid::new_v4().to_string();

        tracing::info!(
            trace_id = %trace_id,
            message_len = message.as_str().len(),
            "Received chat message"
        );
        tracing::debug!(trace_id = %trace_id, user_message = %message, "Chat message text");

        AssertUnwindSafe(self.run(message, cmd.conversation_history, &trace_id))
            .catch_unwind()
            .await
            .map_err(|payload| {
                let reason = panic_message(payload.as_ref());
                tracing::error!(trace_id = %trace_id, "Chat pipeline failed: {}", reason);
                ChatError::Internal(reason)
            })
    }

    async fn run(
        &self,
        message: UserMessage,
        history: ConversationHistory,
        trace_id: &str,
    ) -> ChatResult {
        let intents = self.classifier.classify(message.as_str());
        tracing::debug!(trace_id = %trace_id, ?intents, "Detected intents");

        let api_calls = self.orchestrator.route(&intents, message.as_str()).await;

        let response = self
            .gateway
            .complete(&history, &message, &api_calls, trace_id)
            .await;

        ChatResult {
            response,
            api_calls,
            intents,
            timestamp: Timestamp::now(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown internal error".to_string()
    }
}
