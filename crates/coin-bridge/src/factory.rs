use std::collections::BTreeMap;

use coin_params::{resolve_version, CoinRegistry, Transport};
use tracing::{info, warn};

use crate::bridge::{BridgeCore, CoinBridge, DaemonBridge, DaemonOptions};
use crate::error::BridgeError;
use crate::settings::{ConnectionType, SettingsProvider};
use crate::transport::RpcTransport;

/// Builds bridges for registered coins.
///
/// Coins bound to a full node need a settings provider, coins bound to a
/// wallet daemon need [`DaemonOptions`]. Providers are borrowed for `'a`, so
/// every bridge created here is dropped before them.
pub struct BridgeFactory<'a> {
    registry: CoinRegistry,
    providers: BTreeMap<String, &'a dyn SettingsProvider>,
    daemons: BTreeMap<String, DaemonOptions>,
}

impl<'a> BridgeFactory<'a> {
    pub fn new(registry: CoinRegistry) -> Self {
        Self {
            registry,
            providers: BTreeMap::new(),
            daemons: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &CoinRegistry {
        &self.registry
    }

    /// Attach the settings provider of a full-node coin.
    pub fn bind_settings(
        &mut self,
        coin: &str,
        provider: &'a dyn SettingsProvider,
    ) -> Result<(), BridgeError> {
        self.expect_transport(coin, Transport::Rpc)?;
        self.providers.insert(coin.to_string(), provider);
        Ok(())
    }

    /// Attach the credentials of a wallet-daemon coin.
    pub fn bind_daemon(&mut self, coin: &str, options: DaemonOptions) -> Result<(), BridgeError> {
        self.expect_transport(coin, Transport::Daemon)?;
        self.daemons.insert(coin.to_string(), options);
        Ok(())
    }

    /// Coins that have a connection attached.
    pub fn bound_coins(&self) -> impl Iterator<Item = &str> {
        self.providers
            .keys()
            .chain(self.daemons.keys())
            .map(String::as_str)
    }

    /// Startup check: every registered coin is well formed and every bound
    /// coin resolves an address version on its configured network.
    pub fn validate(&self) -> Result<(), BridgeError> {
        self.registry.validate()?;

        for (coin, provider) in &self.providers {
            let profile = self.registry.profile(coin)?;
            resolve_version(profile, provider.network())?;
        }
        for (coin, options) in &self.daemons {
            let profile = self.registry.profile(coin)?;
            let network = coin_params::NetworkProfile::from_is_mainnet(options.is_mainnet());
            resolve_version(profile, network)?;
        }
        Ok(())
    }

    /// Build the bridge bound to `coin`.
    ///
    /// Fails with [`BridgeError::MissingCoreBinding`] when the coin is
    /// unknown, has no binding or connection, or its provider selects a
    /// connection type without a bridge.
    pub fn create(
        &self,
        coin: &str,
        reactor: &'a dyn RpcTransport,
    ) -> Result<Box<dyn CoinBridge + 'a>, BridgeError> {
        let missing = || BridgeError::MissingCoreBinding(coin.to_string());
        let profile = self.registry.get(coin).ok_or_else(missing)?;
        let binding = profile.binding.ok_or_else(missing)?;

        let bridge: Box<dyn CoinBridge + 'a> = match binding.transport {
            Transport::Rpc => {
                let provider = *self.providers.get(coin).ok_or_else(missing)?;
                let connection_type = provider.settings().connection_type;
                if connection_type != ConnectionType::Core {
                    warn!(coin, %connection_type, "connection type has no bridge");
                    return Err(missing());
                }
                Box::new(BridgeCore::new(reactor, provider, profile, binding.generation))
            }
            Transport::Daemon => {
                let options = self.daemons.get(coin).ok_or_else(missing)?.clone();
                Box::new(DaemonBridge::with_options(
                    reactor,
                    options,
                    profile,
                    binding.generation,
                ))
            }
        };

        info!(
            coin,
            generation = %binding.generation,
            transport = %binding.transport,
            "bridge created"
        );
        Ok(bridge)
    }

    fn expect_transport(&self, coin: &str, transport: Transport) -> Result<(), BridgeError> {
        match self.registry.get(coin).and_then(|p| p.binding) {
            Some(binding) if binding.transport == transport => Ok(()),
            _ => Err(BridgeError::MissingCoreBinding(coin.to_string())),
        }
    }
}
