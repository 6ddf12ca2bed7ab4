//! Scripted [`ProviderClient`] for tests. Routes by URL prefix and
//! records every request it sees.

use super::client::{CallError, ProviderClient, ProviderRequest};
use serde_json::Value;
use std::sync::Mutex;

pub(crate) struct StubClient {
    routes: Vec<(String, Result<Value, CallError>)>,
    calls: Mutex<Vec<ProviderRequest>>,
}

impl StubClient {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, url_prefix: &str, body: Value) -> Self {
        self.routes.push((url_prefix.to_string(), Ok(body)));
        self
    }

    pub fn fail(mut self, url_prefix: &str, err: CallError) -> Self {
        self.routes.push((url_prefix.to_string(), Err(err)));
        self
    }

    pub fn calls(&self) -> Vec<ProviderRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, url_prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.starts_with(url_prefix))
            .count()
    }
}

impl ProviderClient for StubClient {
    fn call(&self, request: &ProviderRequest) -> Result<Value, CallError> {
        self.calls.lock().unwrap().push(request.clone());
        self.routes
            .iter()
            .find(|(prefix, _)| request.url.starts_with(prefix.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| Err(CallError::Connection(format!("no stub route for {}", request.url))))
    }
}
