//! Scripted [`RpcTransport`] for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::BridgeError;
use crate::transport::{HttpReply, RpcTransport};

#[derive(Debug, Clone)]
pub(crate) struct Request {
    pub address: String,
    pub authorization: String,
    pub body: Value,
}

/// Replies are queued per RPC method and consumed in order.
#[derive(Default)]
pub(crate) struct MockTransport {
    replies: Mutex<HashMap<String, VecDeque<Result<HttpReply, BridgeError>>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: &str, status: u16, body: &str) {
        self.push(
            method,
            Ok(HttpReply {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn result(&self, method: &str, result: Value) {
        let body = json!({ "result": result, "error": null, "id": 1 }).to_string();
        self.reply(method, 200, &body);
    }

    pub fn fail(&self, method: &str, error: BridgeError) {
        self.push(method, Err(error));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.body["method"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn params(&self, method: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r.body["method"] == method)
            .map(|r| r.body["params"].clone())
            .collect()
    }

    pub fn authorizations(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.authorization).collect()
    }

    fn push(&self, method: &str, reply: Result<HttpReply, BridgeError>) {
        self.replies
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn post(
        &self,
        address: &str,
        authorization: &str,
        body: String,
    ) -> Result<HttpReply, BridgeError> {
        let body: Value = serde_json::from_str(&body).unwrap();
        let method = body["method"].as_str().unwrap_or_default().to_string();
        self.requests.lock().unwrap().push(Request {
            address: address.to_string(),
            authorization: authorization.to_string(),
            body,
        });

        self.replies
            .lock()
            .unwrap()
            .get_mut(&method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(BridgeError::Io(format!("no scripted reply for {method}"))))
    }
}
