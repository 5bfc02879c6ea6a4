use coin_params::version::BASE_TESTNET;
use coin_params::{resolve_version, CoinProfile, CoreBinding, Generation, NetworkProfile, Transport};

use crate::error::BridgeError;

/// How a bridge picks the network its address version comes from.
///
/// Bridge generations historically disagree here, so each strategy is a named
/// variant rather than one unified rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPolicy {
    /// Network captured once when the bridge was built.
    Pinned(NetworkProfile),
    /// Network read from the connection source on every call.
    Live,
    /// Always the base testnet bytes, whatever the active network.
    ///
    /// Legacy behavior of generation-016 daemon bridges. The active
    /// (coin, network) pair must still be supported.
    LegacyFixedTestnet,
}

impl VersionPolicy {
    /// Policy a bridge gets unless the integrator overrides it.
    pub fn default_for(binding: CoreBinding, network_at_construction: NetworkProfile) -> Self {
        match (binding.transport, binding.generation) {
            (Transport::Rpc, Generation::V016) => VersionPolicy::Pinned(network_at_construction),
            (Transport::Rpc, Generation::V017) => VersionPolicy::Live,
            (Transport::Daemon, Generation::V016) => VersionPolicy::LegacyFixedTestnet,
            (Transport::Daemon, Generation::V017) => VersionPolicy::Live,
        }
    }

    pub fn is_legacy(self) -> bool {
        self == VersionPolicy::LegacyFixedTestnet
    }

    /// Resolve `profile`'s version bytes. `live` is not consulted for
    /// [`VersionPolicy::Pinned`].
    pub fn resolve(
        self,
        profile: &CoinProfile,
        live: impl FnOnce() -> NetworkProfile,
    ) -> Result<coin_params::VersionBytes, BridgeError> {
        match self {
            VersionPolicy::Pinned(network) => Ok(resolve_version(profile, network)?),
            VersionPolicy::Live => Ok(resolve_version(profile, live())?),
            VersionPolicy::LegacyFixedTestnet => {
                resolve_version(profile, live())?;
                Ok(BASE_TESTNET)
            }
        }
    }
}
