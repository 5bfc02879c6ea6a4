//! Scenario tests over the public bridge API: the built-in version table,
//! construction idempotence, the legacy 016 daemon behavior and an
//! end-to-end Litecoin swap preflight against a scripted node.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use coin_bridge::*;
use coin_params::profile::{BUILTIN_PROFILES, DENARIUS, LITECOIN};
use coin_params::version::{BASE_MAINNET, BASE_TESTNET};
use coin_params::{CoinRegistry, Generation, NetworkProfile, Transport, VersionBytes};
use serde_json::{json, Value};

const NODE: &str = "127.0.0.1:9332";

/// Answers requests in order from a fixed script.
struct ScriptedNode {
    replies: Mutex<VecDeque<Value>>,
    seen: Mutex<Vec<Value>>,
}

impl ScriptedNode {
    fn new(results: Vec<Value>) -> Self {
        Self {
            replies: Mutex::new(results.into()),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn methods(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|body| body["method"].as_str().unwrap().to_string())
            .collect()
    }
}

#[async_trait]
impl RpcTransport for ScriptedNode {
    async fn post(
        &self,
        _address: &str,
        _authorization: &str,
        body: String,
    ) -> Result<HttpReply, BridgeError> {
        self.seen.lock().unwrap().push(serde_json::from_str(&body).unwrap());
        let result = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| BridgeError::Io("script exhausted".into()))?;
        Ok(HttpReply {
            status: 200,
            body: json!({ "result": result, "error": null }).to_string(),
        })
    }
}

struct FixedSettings(Settings);

impl FixedSettings {
    fn new(network: NetworkProfile) -> Self {
        Self(Settings::new(network).with_connection(CoreConnection::new("rpc", "pw", NODE)))
    }
}

impl SettingsProvider for FixedSettings {
    fn settings(&self) -> Settings {
        self.0.clone()
    }
}

fn live_bridge<'a>(
    node: &'a ScriptedNode,
    settings: &'a FixedSettings,
    profile: &coin_params::CoinProfile,
) -> Box<dyn CoinBridge + 'a> {
    match profile.binding.map(|b| b.transport) {
        Some(Transport::Daemon) => {
            let options = DaemonOptions::new("rpc", "pw", NODE, settings.0.network.is_mainnet());
            Box::new(DaemonBridge::new_017(node, options, profile))
        }
        _ => Box::new(BridgeCore::new(node, settings, profile, Generation::V017)),
    }
}

// ─── Version table ─────────────────────────────────────────────────

#[test]
fn every_builtin_coin_resolves_documented_bytes() {
    let expected: &[(&str, Option<VersionBytes>, Option<VersionBytes>)] = &[
        ("bitcoin", Some(BASE_MAINNET), Some(BASE_TESTNET)),
        ("litecoin", Some(VersionBytes::new(48, 0xB0)), Some(BASE_TESTNET)),
        ("qtum", Some(BASE_MAINNET), Some(BASE_TESTNET)),
        ("bitcoin cash", Some(BASE_MAINNET), Some(BASE_TESTNET)),
        ("dash", Some(BASE_MAINNET), Some(BASE_TESTNET)),
        ("denarius", Some(BASE_MAINNET), None),
    ];
    assert_eq!(expected.len(), BUILTIN_PROFILES.len());

    let node = ScriptedNode::new(vec![]);
    for (name, mainnet, testnet) in expected {
        let profile = BUILTIN_PROFILES
            .iter()
            .find(|p| p.name() == *name)
            .unwrap();
        for (network, bytes) in [
            (NetworkProfile::mainnet(), mainnet),
            (NetworkProfile::testnet(), testnet),
        ] {
            let settings = FixedSettings::new(network);
            let bridge = live_bridge(&node, &settings, profile);
            match bytes {
                Some(bytes) => assert_eq!(bridge.address_version().unwrap(), *bytes, "{name} {network}"),
                None => assert!(
                    matches!(bridge.address_version(), Err(BridgeError::UnsupportedNetwork { .. })),
                    "{name} {network}"
                ),
            }
        }
    }
    assert!(node.methods().is_empty());
}

#[test]
fn coin_names_are_stable_and_lowercase() {
    let node = ScriptedNode::new(vec![]);
    for profile in BUILTIN_PROFILES {
        let main = FixedSettings::new(NetworkProfile::mainnet());
        let test = FixedSettings::new(NetworkProfile::testnet());
        let a = live_bridge(&node, &main, profile);
        let b = live_bridge(&node, &test, profile);

        assert!(!a.coin_name().is_empty());
        assert_eq!(a.coin_name(), a.coin_name().to_lowercase());
        assert_eq!(a.coin_name(), b.coin_name());
        assert_eq!(a.coin_name(), a.coin_name());
    }
}

#[test]
fn identical_inputs_build_identical_bridges() {
    let node = ScriptedNode::new(vec![]);
    for profile in BUILTIN_PROFILES {
        for network in [NetworkProfile::mainnet(), NetworkProfile::testnet()] {
            let settings = FixedSettings::new(network);
            let first = live_bridge(&node, &settings, profile);
            let second = live_bridge(&node, &settings, profile);
            assert_eq!(first.coin_name(), second.coin_name());
            assert_eq!(first.address_type(), second.address_type());
            assert_eq!(first.address_version(), second.address_version());
        }
    }
}

// ─── Legacy 016 daemon ─────────────────────────────────────────────

#[test]
fn daemon_016_litecoin_reports_testnet_wif_on_mainnet() {
    let node = ScriptedNode::new(vec![]);
    let bridge = DaemonBridge::new_016(&node, "rpc", "pw", NODE, true, &LITECOIN);

    let version = bridge.address_version().unwrap();
    assert_eq!(version.wif, 0xEF);
    assert_eq!(version.p2kh, 0x6F);
}

#[test]
fn daemon_016_denarius_testnet_is_unsupported() {
    let node = ScriptedNode::new(vec![]);
    let bridge = DaemonBridge::new_016(&node, "rpc", "pw", NODE, false, &DENARIUS);

    assert_eq!(
        bridge.address_version(),
        Err(BridgeError::UnsupportedNetwork {
            coin: "denarius".into(),
            network: NetworkProfile::testnet(),
        })
    );
    assert!(bridge.format_address(&[2u8; 33]).is_err());
    assert!(node.methods().is_empty());
}

#[test]
fn unsupported_pair_leaves_registry_untouched() {
    let registry = CoinRegistry::builtin();
    let before: Vec<String> = registry.names().map(str::to_string).collect();

    let err = registry
        .resolve_version("denarius", NetworkProfile::testnet())
        .unwrap_err();
    assert!(err.to_string().contains("denarius"));
    assert!(err.to_string().contains("testnet"));

    let after: Vec<String> = registry.names().map(str::to_string).collect();
    assert_eq!(before, after);
    assert_eq!(
        registry.resolve_version("denarius", NetworkProfile::mainnet()),
        Ok(BASE_MAINNET)
    );
}

// ─── End to end ────────────────────────────────────────────────────

#[test]
fn litecoin_017_mainnet_and_testnet() {
    let node = ScriptedNode::new(vec![]);

    let main = FixedSettings::new(NetworkProfile::mainnet());
    let bridge = BridgeCore::new(&node, &main, &LITECOIN, Generation::V017);
    assert_eq!(bridge.coin_name(), "litecoin");
    assert_eq!(bridge.address_version().unwrap().p2kh, 48);

    let test = FixedSettings::new(NetworkProfile::testnet());
    let bridge = BridgeCore::new(&node, &test, &LITECOIN, Generation::V017);
    assert_eq!(
        bridge.address_version().unwrap().p2kh,
        bitcoin::constants::PUBKEY_ADDRESS_PREFIX_TEST
    );
    assert_ne!(bridge.address_version().unwrap().p2kh, 48);
}

#[tokio::test]
async fn litecoin_preflight_against_node() {
    let genesis = LITECOIN.genesis_hashes(NetworkProfile::mainnet())[0];
    let node = ScriptedNode::new(vec![
        json!(genesis),
        json!(2_700_000),
        json!(0.75),
        json!("LQ3rsW2Hg6YqnHGG3y7AxHq2jJ6H7QCuQF"),
    ]);
    let settings = FixedSettings::new(NetworkProfile::mainnet());
    let mut factory = BridgeFactory::new(CoinRegistry::builtin());
    factory.bind_settings("litecoin", &settings).unwrap();
    factory.validate().unwrap();

    let bridge = factory.create("litecoin", &node).unwrap();
    assert_eq!(bridge.get_block_count().await.unwrap(), 2_700_000);
    assert_eq!(bridge.get_balance(6).await.unwrap(), 75_000_000);
    bridge.get_raw_change_address().await.unwrap();

    assert_eq!(
        node.methods(),
        vec!["getblockhash", "getblockcount", "getbalance", "getrawchangeaddress"]
    );
}

#[tokio::test]
async fn daemon_bridge_never_verifies_genesis() {
    let node = ScriptedNode::new(vec![json!(10)]);
    let bridge = DaemonBridge::new_016(&node, "rpc", "pw", NODE, true, &DENARIUS);
    assert_eq!(bridge.get_block_count().await.unwrap(), 10);
    assert_eq!(node.methods(), vec!["getblockcount"]);
}
