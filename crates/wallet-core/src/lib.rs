pub mod config;
pub mod error;
pub mod ipfs;
pub mod logging;
pub mod mnemonic;
pub mod peers;
pub mod session;
pub mod settings;
pub mod swap;

use std::path::Path;

pub use coin_bridge::{CoinBridge, RpcTransport};
pub use coin_params::NetworkProfile;
pub use config::{CoinConfig, WalletConfig};
pub use error::WalletError;
pub use settings::StaticSettingsProvider;
pub use swap::{PreparedSwap, SwapBridges};

// ─── Startup ─────────────────────────────────────────────────────────

/// Read the config at `path` and wire its coins.
///
/// Fails fast on unknown coins, missing bindings and unsupported
/// (coin, network) pairs.
pub fn open_wallet(path: &Path) -> Result<SwapBridges, WalletError> {
    let config = WalletConfig::load(path)?;
    tracing::info!(path = %path.display(), network = %config.network, "wallet config loaded");
    SwapBridges::from_config(&config)
}

/// Built-in peers for the configured network.
pub fn default_peers(network: NetworkProfile) -> Vec<String> {
    peers::default_peers(network)
        .iter()
        .map(|peer| peer.to_string())
        .collect()
}
