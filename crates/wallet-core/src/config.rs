//! JSON wallet configuration.
//!
//! The active network is chosen here, once, at process start. Every bridge
//! built from this config inherits it.

use std::fmt;
use std::fs;
use std::path::Path;

use coin_bridge::{ConnectionType, CoreConnection, DaemonOptions, Settings};
use coin_params::NetworkProfile;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Connection and fee settings of one coin.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinConfig {
    pub coin: String,
    pub user_name: String,
    pub password: String,
    /// `host:port` of the node or wallet daemon.
    pub address: String,
    /// `"core"`, `"electrum"` or `"none"`.
    pub connection_type: String,
    /// Satoshis per kilobyte.
    pub fee_rate: Option<u64>,
    pub confirmations: Option<u16>,
    pub lock_time_in_blocks: Option<u32>,
    pub genesis_block_hashes: Vec<String>,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            coin: String::new(),
            user_name: String::new(),
            password: String::new(),
            address: String::new(),
            connection_type: ConnectionType::Core.to_string(),
            fee_rate: None,
            confirmations: None,
            lock_time_in_blocks: None,
            genesis_block_hashes: Vec::new(),
        }
    }
}

impl fmt::Debug for CoinConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoinConfig")
            .field("coin", &self.coin)
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .field("address", &self.address)
            .field("connection_type", &self.connection_type)
            .field("fee_rate", &self.fee_rate)
            .finish_non_exhaustive()
    }
}

impl CoinConfig {
    fn connection(&self) -> CoreConnection {
        CoreConnection::new(&self.user_name, &self.password, &self.address)
    }

    /// Settings for a full-node coin on `network`.
    pub fn to_settings(&self, network: NetworkProfile) -> Result<Settings, WalletError> {
        let connection_type: ConnectionType = self
            .connection_type
            .parse()
            .map_err(|e| WalletError::Config(format!("{}: {e}", self.coin)))?;

        let mut settings = Settings::new(network);
        settings.connection = self.connection();
        settings.connection_type = connection_type;
        if let Some(fee_rate) = self.fee_rate {
            settings.fee_rate = fee_rate;
        }
        if let Some(confirmations) = self.confirmations {
            settings.lock_tx_min_confirmations = confirmations;
            settings.withdraw_tx_min_confirmations = confirmations;
        }
        if let Some(blocks) = self.lock_time_in_blocks {
            settings.lock_time_in_blocks = blocks;
        }
        settings.genesis_block_hashes = self.genesis_block_hashes.clone();
        Ok(settings)
    }

    /// Options for a wallet-daemon coin on `network`.
    pub fn to_daemon_options(&self, network: NetworkProfile) -> DaemonOptions {
        let mut options = DaemonOptions::new(
            &self.user_name,
            &self.password,
            &self.address,
            network.is_mainnet(),
        );
        if let Some(fee_rate) = self.fee_rate {
            options.fee_rate = fee_rate;
        }
        if let Some(confirmations) = self.confirmations {
            options.confirmations = confirmations;
        }
        options
    }
}

/// Top-level wallet configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletConfig {
    pub network: NetworkProfile,
    #[serde(default)]
    pub coins: Vec<CoinConfig>,
}

impl WalletConfig {
    pub fn new(network: NetworkProfile) -> Self {
        Self {
            network,
            coins: Vec::new(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, WalletError> {
        let config: WalletConfig = serde_json::from_str(raw)
            .map_err(|e| WalletError::Config(format!("invalid config: {e}")))?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, WalletError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| WalletError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn save(&self, path: &Path) -> Result<(), WalletError> {
        let payload = serde_json::to_string_pretty(self)
            .map_err(|e| WalletError::Config(format!("failed to stringify config: {e}")))?;
        fs::write(path, payload)
            .map_err(|e| WalletError::Config(format!("failed to save {}: {e}", path.display())))
    }

    pub fn coin(&self, name: &str) -> Option<&CoinConfig> {
        self.coins.iter().find(|c| c.coin == name)
    }

    fn check(&self) -> Result<(), WalletError> {
        for (i, coin) in self.coins.iter().enumerate() {
            if coin.coin.is_empty() {
                return Err(WalletError::Config(format!("coin #{i} has no name")));
            }
            if self.coins[..i].iter().any(|c| c.coin == coin.coin) {
                return Err(WalletError::Config(format!("coin '{}' listed twice", coin.coin)));
            }
        }
        Ok(())
    }
}
