use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use coin_params::NetworkProfile;
use secrecy::{ExposeSecret, SecretString};

/// Credentials and address of a node's RPC endpoint.
#[derive(Debug, Clone)]
pub struct CoreConnection {
    pub user_name: String,
    pub password: SecretString,
    /// `host:port` of the node.
    pub address: String,
}

impl CoreConnection {
    pub fn new(
        user_name: impl Into<String>,
        password: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            password: SecretString::from(password.into()),
            address: address.into(),
        }
    }

    /// HTTP basic authorization header value.
    pub fn authorization(&self) -> String {
        let credentials = format!("{}:{}", self.user_name, self.password.expose_secret());
        format!("Basic {}", STANDARD.encode(credentials))
    }

    pub fn is_initialized(&self) -> bool {
        !self.user_name.is_empty()
            && !self.password.expose_secret().is_empty()
            && !self.address.is_empty()
    }
}

impl Default for CoreConnection {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl PartialEq for CoreConnection {
    fn eq(&self, other: &Self) -> bool {
        self.user_name == other.user_name
            && self.password.expose_secret() == other.password.expose_secret()
            && self.address == other.address
    }
}

impl Eq for CoreConnection {}

/// How the wallet reaches a coin's network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionType {
    #[default]
    None,
    Core,
    Electrum,
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionType::None => write!(f, "none"),
            ConnectionType::Core => write!(f, "core"),
            ConnectionType::Electrum => write!(f, "electrum"),
        }
    }
}

impl FromStr for ConnectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ConnectionType::None),
            "core" => Ok(ConnectionType::Core),
            "electrum" => Ok(ConnectionType::Electrum),
            other => Err(format!("unknown connection type '{other}'")),
        }
    }
}

/// Per-coin settings owned by the embedding wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub connection: CoreConnection,
    pub connection_type: ConnectionType,
    pub network: NetworkProfile,
    /// Satoshis per kilobyte.
    pub fee_rate: u64,
    pub lock_tx_min_confirmations: u16,
    pub withdraw_tx_min_confirmations: u16,
    pub lock_time_in_blocks: u32,
    pub blocks_per_hour: f64,
    /// Overrides the coin profile's genesis list when non-empty.
    pub genesis_block_hashes: Vec<String>,
}

impl Settings {
    pub fn new(network: NetworkProfile) -> Self {
        Self {
            connection: CoreConnection::default(),
            connection_type: ConnectionType::None,
            network,
            fee_rate: 90_000,
            lock_tx_min_confirmations: 6,
            withdraw_tx_min_confirmations: 6,
            // 12h at 6 blocks per hour
            lock_time_in_blocks: 12 * 6,
            blocks_per_hour: 6.0,
            genesis_block_hashes: Vec::new(),
        }
    }

    pub fn with_connection(mut self, connection: CoreConnection) -> Self {
        self.connection = connection;
        self.connection_type = ConnectionType::Core;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.connection.is_initialized()
    }

    pub fn is_core_activated(&self) -> bool {
        self.connection.is_initialized() && self.connection_type == ConnectionType::Core
    }

    pub fn is_activated(&self) -> bool {
        self.is_core_activated()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(NetworkProfile::testnet())
    }
}

/// Source of a coin's settings.
///
/// Owned by the embedding wallet. Bridges borrow it and must be dropped first.
/// `network` must return the same value for the provider's whole lifetime;
/// the other settings may change between calls.
pub trait SettingsProvider: Send + Sync {
    fn settings(&self) -> Settings;

    fn network(&self) -> NetworkProfile {
        self.settings().network
    }
}
