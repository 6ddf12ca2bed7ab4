//! Outbound JSON-over-HTTP calls with a bounded timeout.
//!
//! Every remote provider (place search, both translators) goes through
//! [`ProviderClient`], so tests can swap the network for a stub.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Why a provider call produced no usable body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("request timed out")]
    Timeout,
    #[error("provider answered HTTP {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outbound call: endpoint, payload, and time budget.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl ProviderRequest {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
            body: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            query: Vec::new(),
            body: Some(body),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Look up a query parameter by name.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }
}

/// Capability to perform a single remote JSON call.
pub trait ProviderClient: Send + Sync {
    fn call(&self, request: &ProviderRequest) -> Result<Value, CallError>;
}

/// [`ProviderClient`] backed by a shared blocking `ureq` agent.
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(user_agent).build();
        Self { agent }
    }
}

impl ProviderClient for HttpClient {
    fn call(&self, request: &ProviderRequest) -> Result<Value, CallError> {
        let mut req = match request.method {
            Method::Get => self.agent.get(&request.url),
            Method::Post => self.agent.post(&request.url),
        }
        .timeout(request.timeout);

        for (key, value) in &request.query {
            req = req.query(key, value);
        }

        let result = match &request.body {
            Some(body) => req.send_json(body),
            None => req.call(),
        };

        let response = result.map_err(classify_error)?;
        if !(200..300).contains(&response.status()) {
            return Err(CallError::Status(response.status()));
        }

        response
            .into_json::<Value>()
            .map_err(|e| CallError::Decode(e.to_string()))
    }
}

fn classify_error(err: ureq::Error) -> CallError {
    match err {
        ureq::Error::Status(code, _) => CallError::Status(code),
        ureq::Error::Transport(transport) => {
            if is_timeout(&transport) {
                CallError::Timeout
            } else {
                CallError::Connection(transport.to_string())
            }
        }
    }
}

fn is_timeout(transport: &ureq::Transport) -> bool {
    std::error::Error::source(transport)
        .and_then(|src| src.downcast_ref::<std::io::Error>())
        .map(|io| matches!(io.kind(), std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock))
        .unwrap_or(false)
}
