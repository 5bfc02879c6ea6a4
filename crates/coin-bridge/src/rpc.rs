//! Shared node RPC machinery used by every bridge.
//!
//! Builds JSON-RPC request bodies, maps HTTP replies to [`BridgeError`], and
//! checks once per node address that the node serves the expected chain.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::BridgeError;
use crate::settings::CoreConnection;
use crate::transport::{HttpReply, RpcTransport};

const HTTP_BAD_REQUEST: u16 = 400;
const HTTP_UNAUTHORIZED: u16 = 401;
const HTTP_NOT_FOUND: u16 = 404;
const HTTP_INTERNAL_SERVER_ERROR: u16 = 500;

const SATOSHI_PER_COIN: f64 = 100_000_000.0;

/// Convert a coin amount as returned by a node into satoshis.
///
/// Negative, NaN and infinite amounts are rejected.
pub fn coin_to_satoshi(value: f64) -> Result<u64, BridgeError> {
    let satoshi = (value * SATOSHI_PER_COIN).round();
    if !satoshi.is_finite() || satoshi < 0.0 || satoshi > u64::MAX as f64 {
        return Err(BridgeError::InvalidResultFormat(format!(
            "invalid coin amount {value}"
        )));
    }
    Ok(satoshi as u64)
}

/// Convert satoshis into a coin amount for node parameters.
pub fn satoshi_to_coin(value: u64) -> f64 {
    value as f64 / SATOSHI_PER_COIN
}

/// Serialize a JSON-RPC request.
pub fn request_body(method: &str, params: &Value, id: u64) -> String {
    json!({ "method": method, "params": params, "id": id }).to_string()
}

/// Map a raw node reply to its `result` value.
///
/// Bitcoin-derived nodes answer failed calls with 404 / 500 and a JSON error
/// body, so those statuses are parsed rather than rejected.
pub fn parse_reply(reply: &HttpReply) -> Result<Value, BridgeError> {
    if reply.status == HTTP_UNAUTHORIZED {
        return Err(BridgeError::InvalidCredentials);
    }
    if reply.status >= HTTP_BAD_REQUEST
        && !matches!(
            reply.status,
            HTTP_BAD_REQUEST | HTTP_NOT_FOUND | HTTP_INTERNAL_SERVER_ERROR
        )
    {
        return Err(BridgeError::Io(format!("HTTP status: {}", reply.status)));
    }
    if reply.body.is_empty() {
        return Err(BridgeError::InvalidResultFormat("Empty response.".into()));
    }

    let mut parsed: Value = serde_json::from_str(&reply.body)?;

    if let Some(error) = parsed.get("error").filter(|e| !is_empty(e)) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(BridgeError::Node(message));
    }

    match parsed.get_mut("result").map(Value::take) {
        Some(result) if !is_empty(&result) => Ok(result),
        _ => Err(BridgeError::EmptyResult),
    }
}

/// Null, `[]` and `{}` all count as "no value".
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

/// Request dispatcher shared by settings-backed and daemon bridges.
pub struct RpcClient<'a> {
    transport: &'a dyn RpcTransport,
    coin: String,
    next_id: AtomicU64,
    /// Genesis verdict per node address.
    verified: Mutex<HashMap<String, bool>>,
}

impl<'a> RpcClient<'a> {
    pub fn new(transport: &'a dyn RpcTransport, coin: impl Into<String>) -> Self {
        Self {
            transport,
            coin: coin.into(),
            next_id: AtomicU64::new(1),
            verified: Mutex::new(HashMap::new()),
        }
    }

    /// Send one call. When `genesis` is non-empty the node is verified first.
    pub async fn call(
        &self,
        connection: &CoreConnection,
        genesis: &[String],
        method: &str,
        params: Value,
    ) -> Result<Value, BridgeError> {
        if !genesis.is_empty() {
            self.verify_node(connection, genesis).await?;
        }

        debug!(coin = %self.coin, method, "send rpc request");
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = request_body(method, &params, id);
        let reply = self
            .transport
            .post(&connection.address, &connection.authorization(), body)
            .await?;
        parse_reply(&reply)
    }

    /// Cached verdict for `address`, if the node was already checked.
    pub fn verdict(&self, address: &str) -> Option<bool> {
        self.verified
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(address)
            .copied()
    }

    async fn verify_node(
        &self,
        connection: &CoreConnection,
        genesis: &[String],
    ) -> Result<(), BridgeError> {
        match self.verdict(&connection.address) {
            Some(true) => return Ok(()),
            Some(false) => return Err(BridgeError::InvalidGenesisBlock),
            None => {}
        }

        let body = json!({ "method": "getblockhash", "params": [0], "id": "verify" }).to_string();
        let reply = self
            .transport
            .post(&connection.address, &connection.authorization(), body)
            .await?;
        let hash = parse_reply(&reply)?;
        let hash = hash
            .as_str()
            .ok_or_else(|| BridgeError::InvalidResultFormat("genesis hash is not a string".into()))?;

        let valid = genesis.iter().any(|expected| expected == hash);
        self.verified
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(connection.address.clone(), valid);

        if valid {
            debug!(coin = %self.coin, address = %connection.address, "node verified");
            Ok(())
        } else {
            warn!(coin = %self.coin, address = %connection.address, hash, "node serves another chain");
            Err(BridgeError::InvalidGenesisBlock)
        }
    }
}
