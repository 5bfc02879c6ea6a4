//! Bridge wiring for the swap engine.
//!
//! [`SwapBridges`] owns the per-coin settings built from the wallet config and
//! checks every binding when it is built. [`SwapBridges::prepare`] hands out
//! one bridge per swap, after its address version has been resolved.

use std::collections::BTreeMap;

use coin_bridge::{BridgeFactory, CoinBridge, DaemonOptions, RpcTransport};
use coin_params::{CoinRegistry, NetworkProfile, Transport, VersionBytes};
use tracing::{info, warn};

use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::settings::StaticSettingsProvider;

pub struct SwapBridges {
    network: NetworkProfile,
    registry: CoinRegistry,
    providers: BTreeMap<String, StaticSettingsProvider>,
    daemons: BTreeMap<String, DaemonOptions>,
}

impl SwapBridges {
    /// Wire every configured coin against the built-in registry.
    pub fn from_config(config: &WalletConfig) -> Result<Self, WalletError> {
        Self::with_registry(config, CoinRegistry::builtin())
    }

    /// Fails if a configured coin has no binding or no version on the
    /// configured network.
    pub fn with_registry(config: &WalletConfig, registry: CoinRegistry) -> Result<Self, WalletError> {
        let mut providers = BTreeMap::new();
        let mut daemons = BTreeMap::new();

        for coin in &config.coins {
            let profile = registry.profile(&coin.coin)?;
            let binding = profile
                .binding
                .ok_or_else(|| WalletError::MissingCoreBinding(coin.coin.clone()))?;
            match binding.transport {
                Transport::Rpc => {
                    let settings = coin.to_settings(config.network)?;
                    providers.insert(coin.coin.clone(), StaticSettingsProvider::new(settings));
                }
                Transport::Daemon => {
                    daemons.insert(coin.coin.clone(), coin.to_daemon_options(config.network));
                }
            }
        }

        let bridges = Self {
            network: config.network,
            registry,
            providers,
            daemons,
        };
        bridges.factory()?.validate()?;
        info!(
            network = %bridges.network,
            coins = bridges.providers.len() + bridges.daemons.len(),
            "swap bridges ready"
        );
        Ok(bridges)
    }

    pub fn network(&self) -> NetworkProfile {
        self.network
    }

    pub fn registry(&self) -> &CoinRegistry {
        &self.registry
    }

    /// Settings of a full-node coin, for updates between swaps.
    pub fn provider(&self, coin: &str) -> Option<&StaticSettingsProvider> {
        self.providers.get(coin)
    }

    pub fn coins(&self) -> impl Iterator<Item = &str> {
        self.providers
            .keys()
            .chain(self.daemons.keys())
            .map(String::as_str)
    }

    /// Factory bound to this wallet's settings.
    pub fn factory(&self) -> Result<BridgeFactory<'_>, WalletError> {
        let mut factory = BridgeFactory::new(self.registry.clone());
        for (coin, provider) in &self.providers {
            factory.bind_settings(coin, provider)?;
        }
        for (coin, options) in &self.daemons {
            factory.bind_daemon(coin, options.clone())?;
        }
        Ok(factory)
    }

    /// Build the bridge for one swap on `coin`.
    ///
    /// The address version is resolved here, so a swap on an unsupported
    /// (coin, network) pair fails before any funds are committed.
    pub fn prepare<'a>(
        &'a self,
        coin: &str,
        reactor: &'a dyn RpcTransport,
    ) -> Result<PreparedSwap<'a>, WalletError> {
        let bridge = self.factory()?.create(coin, reactor)?;
        let version = bridge.address_version()?;

        if bridge.version_policy().is_legacy() {
            warn!(coin, "legacy fixed-testnet address version in use");
        }
        info!(
            coin,
            generation = %bridge.generation(),
            p2kh = version.p2kh,
            wif = version.wif,
            "swap prepared"
        );
        Ok(PreparedSwap { bridge, version })
    }
}

/// A bridge whose address version is known to resolve.
pub struct PreparedSwap<'a> {
    bridge: Box<dyn CoinBridge + 'a>,
    version: VersionBytes,
}

impl<'a> PreparedSwap<'a> {
    pub fn coin(&self) -> &str {
        self.bridge.coin_name()
    }

    /// Version resolved when the swap was prepared.
    pub fn version(&self) -> VersionBytes {
        self.version
    }

    pub fn bridge(&self) -> &dyn CoinBridge {
        self.bridge.as_ref()
    }

    pub fn into_bridge(self) -> Box<dyn CoinBridge + 'a> {
        self.bridge
    }
}
