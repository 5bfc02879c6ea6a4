use std::sync::RwLock;

use coin_bridge::{Settings, SettingsProvider};
use coin_params::NetworkProfile;
use tracing::warn;

/// In-memory settings provider owned by the wallet.
///
/// Bridges read a fresh copy on every call, so an update made between swaps
/// is seen by the next request. The network is fixed at construction; updates
/// can change everything else.
#[derive(Debug)]
pub struct StaticSettingsProvider {
    network: NetworkProfile,
    settings: RwLock<Settings>,
}

impl StaticSettingsProvider {
    pub fn new(settings: Settings) -> Self {
        Self {
            network: settings.network,
            settings: RwLock::new(settings),
        }
    }

    /// Apply `f` to the current settings. A change to `network` is discarded.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) {
        let mut guard = self
            .settings
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
        if guard.network != self.network {
            warn!(
                pinned = %self.network,
                requested = %guard.network,
                "network is fixed for the session, change ignored"
            );
            guard.network = self.network;
        }
    }

    pub fn replace(&self, settings: Settings) {
        self.update(|current| *current = settings);
    }
}

impl SettingsProvider for StaticSettingsProvider {
    fn settings(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn network(&self) -> NetworkProfile {
        self.network
    }
}
