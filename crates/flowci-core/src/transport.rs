use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::flow::{DeleteFlowRequest, Flow};

/// Request/response seam to the backend API. Each call is a single bounded
/// request; an `Err` is a transport-level failure (connection, timeout) and
/// is distinct from a response that reports a domain error.
pub trait FlowTransport {
    fn edit_flow(&self, flow: &Flow) -> anyhow::Result<Value>;
    fn delete_flow(&self, request: &DeleteFlowRequest) -> anyhow::Result<Value>;
    fn fetch_plugins(&self) -> anyhow::Result<Value>;
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Blocking HTTP+JSON implementation. The client-wide timeout bounds every
/// request, so a hung server resolves to the transport-error path instead of
/// leaving the caller waiting forever.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl FlowTransport for HttpTransport {
    fn edit_flow(&self, flow: &Flow) -> anyhow::Result<Value> {
        Ok(self
            .client
            .put(self.url("/flow"))
            .json(flow)
            .send()?
            .json()?)
    }

    fn delete_flow(&self, request: &DeleteFlowRequest) -> anyhow::Result<Value> {
        Ok(self
            .client
            .delete(self.url("/flow"))
            .json(request)
            .send()?
            .json()?)
    }

    fn fetch_plugins(&self) -> anyhow::Result<Value> {
        Ok(self.client.get(self.url("/plugins")).send()?.json()?)
    }
}
