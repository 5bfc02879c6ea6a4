use std::collections::BTreeMap;

use crate::error::ParamsError;
use crate::network::NetworkProfile;
use crate::profile::{CoinProfile, BUILTIN_PROFILES};
use crate::version::{resolve_version, VersionBytes};

/// Registration surface for coins.
///
/// All coin-specific knowledge lives here. Adding a coin means registering a
/// profile; nothing that consumes bridges has to change.
#[derive(Debug, Clone, Default)]
pub struct CoinRegistry {
    profiles: BTreeMap<String, CoinProfile>,
}

impl CoinRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in coin.
    pub fn builtin() -> Self {
        let profiles = BUILTIN_PROFILES
            .iter()
            .map(|p| (p.name().to_string(), (*p).clone()))
            .collect();
        Self { profiles }
    }

    /// Add a coin. Names must be valid and unique.
    pub fn register(&mut self, profile: CoinProfile) -> Result<(), ParamsError> {
        profile.identity.check()?;
        let name = profile.name().to_string();
        if self.profiles.contains_key(&name) {
            return Err(ParamsError::DuplicateCoin(name));
        }
        self.profiles.insert(name, profile);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CoinProfile> {
        self.profiles.get(name)
    }

    /// Like [`get`](Self::get), but an unknown name is an error.
    pub fn profile(&self, name: &str) -> Result<&CoinProfile, ParamsError> {
        self.get(name)
            .ok_or_else(|| ParamsError::UnknownCoin(name.to_string()))
    }

    pub fn resolve_version(
        &self,
        name: &str,
        network: NetworkProfile,
    ) -> Result<VersionBytes, ParamsError> {
        resolve_version(self.profile(name)?, network)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &CoinProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Check the whole table once at startup.
    ///
    /// Every coin needs a bridge binding and at least one network it can
    /// resolve versions for. Returns the first offending coin.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for profile in self.profiles.values() {
            profile.identity.check()?;
            if profile.binding.is_none() {
                return Err(ParamsError::MissingBinding(profile.name().to_string()));
            }
            let resolvable = [NetworkProfile::mainnet(), NetworkProfile::testnet()]
                .into_iter()
                .any(|network| profile.supports(network));
            if !resolvable {
                return Err(ParamsError::InvalidIdentity(format!(
                    "{} supports no network",
                    profile.name()
                )));
            }
        }
        Ok(())
    }
}
