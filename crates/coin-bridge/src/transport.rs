use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::error::BridgeError;

/// Connect timeout for node requests.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Raw HTTP reply from a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Asynchronous I/O dispatcher for node requests.
///
/// Implementations run on the wallet's event loop and must not block. The
/// bridge never spawns tasks of its own; every request goes through here.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// POST `body` to `http://{address}/` with the given authorization header.
    async fn post(
        &self,
        address: &str,
        authorization: &str,
        body: String,
    ) -> Result<HttpReply, BridgeError>;
}

/// [`RpcTransport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the client. No connection is opened until the first request.
    pub fn new() -> Result<Self, BridgeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| BridgeError::Io(format!("failed to build http client: {e}")))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn post(
        &self,
        address: &str,
        authorization: &str,
        body: String,
    ) -> Result<HttpReply, BridgeError> {
        let response = self
            .client
            .post(format!("http://{address}/"))
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| BridgeError::Io(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BridgeError::Io(e.to_string()))?;

        Ok(HttpReply { status, body })
    }
}
