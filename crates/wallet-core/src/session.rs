use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Session handle exchanged with the wallet proxy service.
///
/// Both fields are optional on the wire and default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionReply {
    pub session: String,
    pub error: String,
}

impl SessionReply {
    pub fn from_json(raw: &str) -> Result<Self, WalletError> {
        serde_json::from_str(raw).map_err(|e| WalletError::InvalidSession(e.to_string()))
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}
