//! Agentic Gateway - conversational middleware for GRC and service-health APIs
//!
//! A chat message is classified into domain intents, routed to the matching
//! domain APIs, and answered by a language model that sees the API results.
//! Every upstream failure degrades into data; the caller always receives a
//! complete response envelope or a well-formed error body.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
