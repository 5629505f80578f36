//! Assistant Domain Module
//!
//! Request-scoped value objects and pure rules of the chat pipeline:
//! which domains a message concerns, which sub-endpoint to call, how API
//! results are enveloped, and what the model is told.
//!
//! # Example
//!
//! ```
//! use agentic_gateway::domain::assistant::{ApiDomain, Intent, IntentClassifier, KeywordIntentClassifier};
//!
//! let intents = KeywordIntentClassifier::new().classify("check server uptime");
//! assert_eq!(intents, vec![Intent::Service]);
//!
//! let call = ApiDomain::Service.selector().select("check server uptime");
//! assert_eq!(call.endpoint_name, "uptime");
//! ```

pub mod api_result;
pub mod conversation;
pub mod endpoint;
pub mod intent;
pub mod prompt;

pub use api_result::*;
pub use conversation::*;
pub use endpoint::*;
pub use intent::*;
pub use prompt::*;
