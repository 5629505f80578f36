//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, validation errors)
//! - `assistant` - Intent classification, endpoint selection, result envelopes and prompts

pub mod assistant;
pub mod foundation;
