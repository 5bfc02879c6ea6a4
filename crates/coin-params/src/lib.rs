//! Per-coin parameters for Bitcoin-derived chains.
//!
//! Provides the network selector, the address version tables, the coin
//! profile registry, and version-checked P2KH / WIF encoding.

pub mod address;
pub mod error;
pub mod network;
pub mod profile;
pub mod registry;
pub mod version;

pub use error::ParamsError;
pub use network::NetworkProfile;
pub use profile::{CoinIdentity, CoinProfile, CoreBinding, Generation, Transport};
pub use registry::CoinRegistry;
pub use version::{resolve_version, VersionBytes, VersionEntry};
