//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary
//! shared by the assistant domain and the adapters.

mod errors;
mod timestamp;

pub use errors::ValidationError;
pub use timestamp::Timestamp;
