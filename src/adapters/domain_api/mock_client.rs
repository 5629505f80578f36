//! Mock Domain API Client for testing.
//!
//! Answers per endpoint name with a scripted body or error and records
//! every call it receives.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::assistant::{ApiDomain, DomainEndpointCall};
use crate::ports::{DomainApiClient, DomainApiError};

/// Mock domain API client.
#[derive(Debug, Clone)]
pub struct MockDomainApiClient {
    domain: ApiDomain,
    replies: Arc<Mutex<HashMap<String, Result<Value, DomainApiError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<DomainEndpointCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockDomainApiClient {
    /// Creates a mock that echoes `{ "endpoint": name }` for unscripted endpoints.
    pub fn new(domain: ApiDomain) -> Self {
        Self {
            domain,
            replies: Arc::new(Mutex::new(HashMap::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Scripts a successful body for an endpoint.
    pub fn with_response(self, endpoint: impl Into<String>, body: Value) -> Self {
        lock(&self.replies).insert(endpoint.into(), Ok(body));
        self
    }

    /// Scripts a failure for an endpoint.
    pub fn with_error(self, endpoint: impl Into<String>, error: DomainApiError) -> Self {
        lock(&self.replies).insert(endpoint.into(), Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this client.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<DomainEndpointCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl DomainApiClient for MockDomainApiClient {
    fn domain(&self) -> ApiDomain {
        self.domain
    }

    async fn fetch(&self, call: &DomainEndpointCall) -> Result<Value, DomainApiError> {
        lock(&self.calls).push(call.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        lock(&self.replies)
            .get(&call.endpoint_name)
            .cloned()
            .unwrap_or_else(|| Ok(json!({ "endpoint": call.endpoint_name })))
    }
}
