//! Application handlers.
//!
//! Command handlers that drive the chat pipeline.

mod chat;

pub use chat::{ChatCommand, ChatError, ChatHandler, ChatResult};
