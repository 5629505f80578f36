//! Domain API Adapters.
//!
//! - `HttpDomainApiClient` - reqwest client for the GRC and service-health APIs
//! - `MockDomainApiClient` - Scripted client for testing

mod http_client;
mod mock_client;

pub use http_client::HttpDomainApiClient;
pub use mock_client::MockDomainApiClient;
