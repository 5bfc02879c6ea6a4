//! The generic coin bridge.
//!
//! One [`Bridge`] type covers every coin, generation and transport. Coin
//! knowledge lives in the [`CoinProfile`]; the connection comes from a
//! [`ConnectionSource`], either a borrowed [`SettingsProvider`]
//! ([`BridgeCore`]) or owned daemon credentials ([`DaemonBridge`]).

use async_trait::async_trait;
use coin_params::address::{decode_p2kh, decode_wif, encode_wif, p2kh_address};
use coin_params::{CoinProfile, CoreBinding, Generation, NetworkProfile, Transport, VersionBytes};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::BridgeError;
use crate::policy::VersionPolicy;
use crate::rpc::{coin_to_satoshi, satoshi_to_coin, RpcClient};
use crate::settings::{CoreConnection, SettingsProvider};
use crate::transport::RpcTransport;

const DEFAULT_FEE_RATE: u64 = 90_000;
const DEFAULT_CONFIRMATIONS: u16 = 6;

/// Where a bridge gets its node connection and active network from.
pub trait ConnectionSource: Send + Sync {
    fn connection(&self) -> CoreConnection;

    fn network(&self) -> NetworkProfile;

    /// Satoshis per kilobyte.
    fn fee_rate(&self) -> u64;

    fn min_confirmations(&self) -> u16;

    /// Genesis hashes that replace the profile's list when non-empty.
    fn genesis_override(&self) -> Vec<String> {
        Vec::new()
    }

    /// Whether the node's genesis block is checked before the first call.
    fn verifies_genesis(&self) -> bool;
}

/// Connection read through a borrowed settings provider.
#[derive(Clone, Copy)]
pub struct ProviderSource<'a> {
    provider: &'a dyn SettingsProvider,
}

impl<'a> ProviderSource<'a> {
    pub fn new(provider: &'a dyn SettingsProvider) -> Self {
        Self { provider }
    }
}

impl ConnectionSource for ProviderSource<'_> {
    fn connection(&self) -> CoreConnection {
        self.provider.settings().connection
    }

    fn network(&self) -> NetworkProfile {
        self.provider.network()
    }

    fn fee_rate(&self) -> u64 {
        self.provider.settings().fee_rate
    }

    fn min_confirmations(&self) -> u16 {
        self.provider.settings().lock_tx_min_confirmations
    }

    fn genesis_override(&self) -> Vec<String> {
        self.provider.settings().genesis_block_hashes
    }

    fn verifies_genesis(&self) -> bool {
        true
    }
}

/// Direct credentials for a coin's wallet daemon.
#[derive(Debug, Clone, PartialEq)]
pub struct DaemonOptions {
    pub connection: CoreConnection,
    /// Satoshis per kilobyte.
    pub fee_rate: u64,
    pub confirmations: u16,
    pub mainnet: bool,
}

impl DaemonOptions {
    pub fn new(
        user_name: impl Into<String>,
        password: impl Into<String>,
        address: impl Into<String>,
        mainnet: bool,
    ) -> Self {
        Self {
            connection: CoreConnection::new(user_name, password, address),
            fee_rate: DEFAULT_FEE_RATE,
            confirmations: DEFAULT_CONFIRMATIONS,
            mainnet,
        }
    }

    pub fn is_mainnet(&self) -> bool {
        self.mainnet
    }
}

impl ConnectionSource for DaemonOptions {
    fn connection(&self) -> CoreConnection {
        self.connection.clone()
    }

    fn network(&self) -> NetworkProfile {
        NetworkProfile::from_is_mainnet(self.is_mainnet())
    }

    fn fee_rate(&self) -> u64 {
        self.fee_rate
    }

    fn min_confirmations(&self) -> u16 {
        self.confirmations
    }

    fn verifies_genesis(&self) -> bool {
        false
    }
}

/// Wallet balances in satoshis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetailedBalance {
    pub confirmed: u64,
    pub unconfirmed: u64,
    pub immature: u64,
}

/// An unspent output as reported by `gettxout`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutInfo {
    /// Satoshis.
    pub value: u64,
    pub confirmations: u32,
    pub script_pub_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundedTransaction {
    pub hex: String,
    /// Position of the change output, `-1` when none was added.
    pub change_position: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub hex: String,
    pub complete: bool,
}

#[derive(Deserialize)]
struct WalletInfoReply {
    balance: f64,
    unconfirmed_balance: f64,
    immature_balance: f64,
}

#[derive(Deserialize)]
struct ScriptPubKeyReply {
    hex: String,
}

#[derive(Deserialize)]
struct TxOutReply {
    value: f64,
    confirmations: u32,
    #[serde(rename = "scriptPubKey")]
    script_pub_key: ScriptPubKeyReply,
}

#[derive(Deserialize)]
struct FundReply {
    hex: String,
    changepos: i32,
}

#[derive(Deserialize)]
struct SignReply {
    hex: String,
    complete: bool,
}

fn expect_str(value: Value, what: &str) -> Result<String, BridgeError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(BridgeError::InvalidResultFormat(format!(
            "{what}: expected string, got {other}"
        ))),
    }
}

fn expect_amount(value: &Value, what: &str) -> Result<u64, BridgeError> {
    let coins = value
        .as_f64()
        .ok_or_else(|| BridgeError::InvalidResultFormat(format!("{what}: expected amount")))?;
    coin_to_satoshi(coins)
}

/// Uniform per-chain contract used by the swap engine.
#[async_trait]
pub trait CoinBridge: Send + Sync {
    /// Canonical chain name. Pure, never does I/O.
    fn coin_name(&self) -> &str;

    /// Address-type discriminator, empty when the coin has none.
    fn address_type(&self) -> &str;

    /// Version bytes for address and WIF encoding. Pure, never does I/O.
    fn address_version(&self) -> Result<VersionBytes, BridgeError>;

    fn generation(&self) -> Generation;

    fn transport(&self) -> Transport;

    fn version_policy(&self) -> VersionPolicy;

    /// Satoshis per kilobyte used when funding transactions.
    fn fee_rate(&self) -> u64;

    fn min_confirmations(&self) -> u16;

    fn format_address(&self, pubkey: &[u8]) -> Result<String, BridgeError> {
        Ok(p2kh_address(pubkey, self.address_version()?)?)
    }

    /// Key hash of `address`. Addresses of another chain or network fail.
    fn parse_address(&self, address: &str) -> Result<[u8; 20], BridgeError> {
        Ok(decode_p2kh(address, self.address_version()?)?)
    }

    fn export_private_key(
        &self,
        secret: &[u8; 32],
        compressed: bool,
    ) -> Result<Zeroizing<String>, BridgeError> {
        Ok(Zeroizing::new(encode_wif(
            secret,
            compressed,
            self.address_version()?,
        )?))
    }

    fn import_private_key(&self, wif: &str) -> Result<(Zeroizing<[u8; 32]>, bool), BridgeError> {
        Ok(decode_wif(wif, self.address_version()?)?)
    }

    async fn get_block_count(&self) -> Result<u64, BridgeError>;

    async fn get_genesis_block_hash(&self) -> Result<String, BridgeError>;

    /// Spendable balance in satoshis with at least `confirmations`.
    async fn get_balance(&self, confirmations: u16) -> Result<u64, BridgeError>;

    async fn get_detailed_balance(&self) -> Result<DetailedBalance, BridgeError>;

    /// `None` when the output is spent or unknown.
    async fn get_tx_out(&self, txid: &str, output_index: u32)
        -> Result<Option<TxOutInfo>, BridgeError>;

    async fn get_raw_change_address(&self) -> Result<String, BridgeError>;

    /// Private key of a wallet address, checked against this coin's WIF version.
    async fn dump_priv_key(&self, address: &str)
        -> Result<(Zeroizing<[u8; 32]>, bool), BridgeError>;

    async fn fund_raw_transaction(
        &self,
        raw_tx: &str,
        fee_rate: u64,
    ) -> Result<FundedTransaction, BridgeError>;

    async fn sign_raw_transaction(&self, raw_tx: &str) -> Result<SignedTransaction, BridgeError>;

    /// Broadcast and return the transaction id.
    async fn send_raw_transaction(&self, raw_tx: &str) -> Result<String, BridgeError>;
}

/// Bridge for one coin over one connection source.
pub struct Bridge<'a, S> {
    rpc: RpcClient<'a>,
    source: S,
    profile: CoinProfile,
    binding: CoreBinding,
    policy: VersionPolicy,
}

/// Full-node bridge reading its connection from a settings provider.
pub type BridgeCore<'a> = Bridge<'a, ProviderSource<'a>>;

/// Wallet-daemon bridge with its own credentials.
pub type DaemonBridge<'a> = Bridge<'a, DaemonOptions>;

impl<'a, S: ConnectionSource> Bridge<'a, S> {
    fn build(
        reactor: &'a dyn RpcTransport,
        source: S,
        profile: &CoinProfile,
        binding: CoreBinding,
    ) -> Self {
        let policy = VersionPolicy::default_for(binding, source.network());
        debug!(
            coin = profile.name(),
            generation = %binding.generation,
            transport = %binding.transport,
            ?policy,
            "bridge constructed"
        );
        Self {
            rpc: RpcClient::new(reactor, profile.name()),
            source,
            profile: profile.clone(),
            binding,
            policy,
        }
    }

    /// Replace the default version policy.
    pub fn with_version_policy(mut self, policy: VersionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn profile(&self) -> &CoinProfile {
        &self.profile
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn genesis(&self) -> Vec<String> {
        if !self.source.verifies_genesis() {
            return Vec::new();
        }
        let overridden = self.source.genesis_override();
        if !overridden.is_empty() {
            return overridden;
        }
        self.profile
            .genesis_hashes(self.source.network())
            .iter()
            .map(|hash| hash.to_string())
            .collect()
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, BridgeError> {
        let connection = self.source.connection();
        let genesis = self.genesis();
        self.rpc.call(&connection, &genesis, method, params).await
    }
}

impl<'a> BridgeCore<'a> {
    pub fn new(
        reactor: &'a dyn RpcTransport,
        settings: &'a dyn SettingsProvider,
        profile: &CoinProfile,
        generation: Generation,
    ) -> Self {
        Self::build(
            reactor,
            ProviderSource::new(settings),
            profile,
            CoreBinding::rpc(generation),
        )
    }
}

impl<'a> DaemonBridge<'a> {
    /// Generation-016 daemon bridge from raw credentials.
    ///
    /// Its address version stays on testnet even when `mainnet` is set.
    pub fn new_016(
        reactor: &'a dyn RpcTransport,
        user_name: impl Into<String>,
        password: impl Into<String>,
        address: impl Into<String>,
        mainnet: bool,
        profile: &CoinProfile,
    ) -> Self {
        let options = DaemonOptions::new(user_name, password, address, mainnet);
        Self::with_options(reactor, options, profile, Generation::V016)
    }

    /// Generation-017 daemon bridge from an options bundle.
    pub fn new_017(
        reactor: &'a dyn RpcTransport,
        options: DaemonOptions,
        profile: &CoinProfile,
    ) -> Self {
        Self::with_options(reactor, options, profile, Generation::V017)
    }

    /// Daemon bridge of either generation from an options bundle.
    pub fn with_options(
        reactor: &'a dyn RpcTransport,
        options: DaemonOptions,
        profile: &CoinProfile,
        generation: Generation,
    ) -> Self {
        Self::build(reactor, options, profile, CoreBinding::daemon(generation))
    }

    pub fn options(&self) -> &DaemonOptions {
        &self.source
    }
}

#[async_trait]
impl<'a, S: ConnectionSource> CoinBridge for Bridge<'a, S> {
    fn coin_name(&self) -> &str {
        self.profile.name()
    }

    fn address_type(&self) -> &str {
        self.profile.address_type()
    }

    fn address_version(&self) -> Result<VersionBytes, BridgeError> {
        self.policy
            .resolve(&self.profile, || self.source.network())
    }

    fn generation(&self) -> Generation {
        self.binding.generation
    }

    fn transport(&self) -> Transport {
        self.binding.transport
    }

    fn version_policy(&self) -> VersionPolicy {
        self.policy
    }

    fn fee_rate(&self) -> u64 {
        self.source.fee_rate()
    }

    fn min_confirmations(&self) -> u16 {
        self.source.min_confirmations()
    }

    async fn get_block_count(&self) -> Result<u64, BridgeError> {
        match self.call("getblockcount", json!([])).await {
            Ok(count) => count.as_u64().ok_or_else(|| {
                BridgeError::InvalidResultFormat("block count is not an integer".into())
            }),
            // a fresh chain reports no blocks
            Err(BridgeError::EmptyResult) => Ok(0),
            Err(e) => Err(e),
        }
    }

    async fn get_genesis_block_hash(&self) -> Result<String, BridgeError> {
        let hash = self.call("getblockhash", json!([0])).await?;
        expect_str(hash, "getblockhash")
    }

    async fn get_balance(&self, confirmations: u16) -> Result<u64, BridgeError> {
        let balance = self.call("getbalance", json!(["*", confirmations])).await?;
        expect_amount(&balance, "getbalance")
    }

    async fn get_detailed_balance(&self) -> Result<DetailedBalance, BridgeError> {
        let info: WalletInfoReply =
            serde_json::from_value(self.call("getwalletinfo", json!([])).await?)?;
        Ok(DetailedBalance {
            confirmed: coin_to_satoshi(info.balance)?,
            unconfirmed: coin_to_satoshi(info.unconfirmed_balance)?,
            immature: coin_to_satoshi(info.immature_balance)?,
        })
    }

    async fn get_tx_out(
        &self,
        txid: &str,
        output_index: u32,
    ) -> Result<Option<TxOutInfo>, BridgeError> {
        let reply = match self.call("gettxout", json!([txid, output_index])).await {
            Ok(reply) => reply,
            Err(BridgeError::EmptyResult) => return Ok(None),
            Err(e) => return Err(e),
        };
        let out: TxOutReply = serde_json::from_value(reply)?;
        Ok(Some(TxOutInfo {
            value: coin_to_satoshi(out.value)?,
            confirmations: out.confirmations,
            script_pub_key: out.script_pub_key.hex,
        }))
    }

    async fn get_raw_change_address(&self) -> Result<String, BridgeError> {
        let params = if self.address_type().is_empty() {
            json!([])
        } else {
            json!([self.address_type()])
        };
        let address = self.call("getrawchangeaddress", params).await?;
        expect_str(address, "getrawchangeaddress")
    }

    async fn dump_priv_key(
        &self,
        address: &str,
    ) -> Result<(Zeroizing<[u8; 32]>, bool), BridgeError> {
        let wif = Zeroizing::new(expect_str(
            self.call("dumpprivkey", json!([address])).await?,
            "dumpprivkey",
        )?);
        self.import_private_key(&wif)
    }

    async fn fund_raw_transaction(
        &self,
        raw_tx: &str,
        fee_rate: u64,
    ) -> Result<FundedTransaction, BridgeError> {
        // zero leaves the fee to the node
        let params = if fee_rate == 0 {
            json!([raw_tx])
        } else {
            json!([raw_tx, { "feeRate": satoshi_to_coin(fee_rate) }])
        };
        let funded: FundReply =
            serde_json::from_value(self.call("fundrawtransaction", params).await?)?;
        Ok(FundedTransaction {
            hex: funded.hex,
            change_position: funded.changepos,
        })
    }

    async fn sign_raw_transaction(&self, raw_tx: &str) -> Result<SignedTransaction, BridgeError> {
        let method = match self.binding.generation {
            Generation::V016 => "signrawtransaction",
            Generation::V017 => "signrawtransactionwithwallet",
        };
        let signed: SignReply = serde_json::from_value(self.call(method, json!([raw_tx])).await?)?;
        Ok(SignedTransaction {
            hex: signed.hex,
            complete: signed.complete,
        })
    }

    async fn send_raw_transaction(&self, raw_tx: &str) -> Result<String, BridgeError> {
        let txid = self.call("sendrawtransaction", json!([raw_tx])).await?;
        expect_str(txid, "sendrawtransaction")
    }
}
