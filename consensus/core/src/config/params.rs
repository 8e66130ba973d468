use hex_literal::hex;
use primitive_types::U256;
use tracing::{debug, warn};

use super::checkpoints::{Checkpoint, CheckpointData};
use super::genesis::GenesisBlock;
use super::seeds::{self, DnsSeed, SeedAddress};
use crate::block::Block;
use crate::constants::{COIN, GENESIS_BLOCK_VERSION};
use crate::errors::{ParamsError, ParamsResult};
use crate::network::NetworkType;
use crate::{Amount, Hash};

const MAIN_GENESIS_OUTPUT_PUBKEY: [u8; 65] = hex!(
    "04106c478d52e103cde9d1cd66b8cd7ac59c49f98b0df16651d7658df975f8971e2be1450ca2975149b4cbba85d81716705d0d5d42f4de3d076579466467d75b9d"
);

pub const MAIN_GENESIS: GenesisBlock = GenesisBlock {
    hash: Hash::from_be_bytes(hex!("30ff8d81ba3dd0c9a26b57e71e6c3848497011f65bef59d97c547425e05e8c01")),
    hash_merkle_root: Hash::from_be_bytes(hex!("b127d9ca811cf8e86f706fef1d5692b2841a490e4cdcb49af3fa0d9dcc5775f6")),
    version: GENESIS_BLOCK_VERSION,
    timestamp: 1549601953,
    bits: 0x1e0ffff0,
    nonce: 762554,
    coinbase_message: b"Forbes.com: Feb 6, 2019 How Is China Implementing Blockchain Technology?",
    output_pubkey: &MAIN_GENESIS_OUTPUT_PUBKEY,
    reward: 2 * COIN,
};

const TESTNET_GENESIS_HASH: Hash =
    Hash::from_be_bytes(hex!("9c16503977299b26bf7c0c609223dc317963096bdf847feb9fa40e2f1b38d986"));

const REGTEST_GENESIS_HASH: Hash =
    Hash::from_be_bytes(hex!("f2f9e60d0f9f47ddd88abfaaf0b85c3e843222efeb8562e797060929cbbae19d"));

const MAIN_CHECKPOINTS: [Checkpoint; 5] = [
    Checkpoint { height: 0, hash: MAIN_GENESIS.hash },
    Checkpoint {
        height: 100,
        hash: Hash::from_be_bytes(hex!("0000099ba27373aef78691d43d0cc002a043fc6ee98f728a81f094babf3d4b25")),
    },
    Checkpoint {
        height: 200,
        hash: Hash::from_be_bytes(hex!("0000093c318526129faf462080e4629190471e2ac60efa2e424cc3f8ee9f5d5d")),
    },
    Checkpoint {
        height: 500,
        hash: Hash::from_be_bytes(hex!("7d86c7e6c6f4f0c0f1bcc2c45b7b18950ac64530bdaf6327533a526dab07f079")),
    },
    Checkpoint {
        height: 900,
        hash: Hash::from_be_bytes(hex!("59a8260e6cabe092aa806a8aaa110f4c31f096d28bee8441b87658f74869407a")),
    },
];

const MAIN_ALERT_PUBKEY: [u8; 65] = hex!(
    "048923e64312ff219041f9eaea792bc5c8d4184f8de313a47421937c75800cc817939d8262a03bedd92227069e0e5ab91dac05ba564630808476a14e81311acef0"
);

const MAIN_SPORK_PUBKEY: [u8; 65] = hex!(
    "0485e4d2273e583f2eb25fe7eb46c2f6994836919c6ed42ddbdd1a6f6cab6b8410e05eeeca93b978e417b3c56faed582da2dd16e57940f2e640272a6a47061bd93"
);

const TESTNET_ALERT_PUBKEY: [u8; 65] = hex!(
    "0421e5514e4bf9dae7d21929ec01fbd22e5efcd97a36addff482c6a0d7aacbaaae9926b5390f5f55953e39f7c12397289d7ea2bd4e6a96b8cb192cce0f05f3d83e"
);

const TESTNET_SPORK_PUBKEY: [u8; 65] = hex!(
    "049c170fa09b99ac3a104b4da0f7786098f5e5bba425cb061090e22ce173da7e9fee11068a5444534ba49e23723c50ec6fe0ba81fb13efbb24384ac711efd924aa"
);

/// Placeholder checkpoint for networks that pin nothing beyond height 0
const PLACEHOLDER_CHECKPOINTS: [Checkpoint; 1] = [Checkpoint { height: 0, hash: Hash::from_u64_word(1) }];

/// Base58 version prefix classes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl Base58Type {
    pub fn iter() -> impl Iterator<Item = Base58Type> {
        [Self::PubkeyAddress, Self::ScriptAddress, Self::SecretKey, Self::ExtPublicKey, Self::ExtSecretKey].into_iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Base58Prefixes {
    pub pubkey_address: &'static [u8],
    pub script_address: &'static [u8],
    pub secret_key: &'static [u8],
    pub ext_public_key: &'static [u8],
    pub ext_secret_key: &'static [u8],
}

impl Base58Prefixes {
    pub fn get(&self, ty: Base58Type) -> &'static [u8] {
        match ty {
            Base58Type::PubkeyAddress => self.pubkey_address,
            Base58Type::ScriptAddress => self.script_address,
            Base58Type::SecretKey => self.secret_key,
            Base58Type::ExtPublicKey => self.ext_public_key,
            Base58Type::ExtSecretKey => self.ext_secret_key,
        }
    }
}

/// Consensus constants
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsensusParams {
    /// Easiest allowed proof-of-work target
    pub pow_limit: U256,
    pub max_reorganization_depth: u32,
    pub enforce_block_upgrade_majority: u32,
    pub reject_block_outdated_majority: u32,
    pub to_check_block_upgrade_majority: u32,
    /// Seconds
    pub target_timespan: i64,
    /// Seconds
    pub target_spacing: i64,
    /// Last height that may be mined with proof of work
    pub last_pow_block: u64,
    /// Confirmations before a coinbase or coinstake can be spent
    pub maturity: u32,
    pub max_money_out: Amount,
    pub modifier_update_block: u64,
    /// Default miner threads, 0 for one per core
    pub miner_threads: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MasternodeParams {
    pub count_drift: u32,
    /// Unix time from which masternode payments are made
    pub start_payments: i64,
    pub pool_max_transactions: u32,
    pub spork_pubkey: &'static [u8],
    pub obfuscation_pool_dummy_address: &'static str,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolicyFlags {
    pub require_rpc_password: bool,
    pub mining_requires_peers: bool,
    pub allow_min_difficulty_blocks: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub skip_proof_of_work_check: bool,
    pub testnet_to_be_deprecated_field_rpc: bool,
    pub headers_first_syncing_active: bool,
}

/// The full parameter set of one network.
///
/// Instances are created by [`super::registry::Registry`] and handed out by
/// shared reference; only unit test parameters accept the `set_*` overrides.
#[derive(Clone, Debug)]
pub struct Params {
    pub net: NetworkType,
    /// Wire message prefix
    pub message_start: [u8; 4],
    pub alert_pubkey: &'static [u8],
    pub default_port: u16,
    pub consensus: ConsensusParams,
    pub genesis: GenesisBlock,
    pub genesis_block: Block,
    pub checkpoints: CheckpointData,
    pub base58_prefixes: Base58Prefixes,
    pub fixed_seeds: Vec<SeedAddress>,
    pub dns_seeds: Vec<DnsSeed>,
    pub policy: PolicyFlags,
    pub masternode: MasternodeParams,
}

impl Params {
    pub(crate) fn mainnet() -> ParamsResult<Self> {
        let net = NetworkType::Mainnet;

        debug!("{}: setting consensus constants", net);
        let consensus = ConsensusParams {
            pow_limit: U256::MAX >> 20,
            max_reorganization_depth: 100,
            enforce_block_upgrade_majority: 201,
            reject_block_outdated_majority: 202,
            to_check_block_upgrade_majority: 203,
            target_timespan: 2 * 60,
            target_spacing: 2 * 60,
            last_pow_block: 200,
            maturity: 100,
            max_money_out: 100_394_599 * COIN,
            modifier_update_block: 0,
            miner_threads: 0,
        };

        let genesis = MAIN_GENESIS;
        let genesis_block = genesis.build_verified(net)?;

        let checkpoints = CheckpointData::new(net, &MAIN_CHECKPOINTS, 1572479405, 5863, 100.0)?;

        let base58_prefixes = Base58Prefixes {
            pubkey_address: &[85],
            script_address: &[25],
            secret_key: &[212],
            ext_public_key: &[0x02, 0x2D, 0x25, 0x33],
            ext_secret_key: &[0x02, 0x21, 0x31, 0x2B],
        };

        // the compiled-in list is expanded and then dropped: main ships without fixed seeds
        let mut fixed_seeds = seeds::expand_now(seeds::MAIN_FIXED_SEEDS);
        fixed_seeds.clear();

        let dns_seeds = vec![DnsSeed::new("sstcoin.top", "seeds.sstcoin.top")];

        Ok(Self {
            net,
            message_start: [0xfa, 0xbe, 0xb5, 0xd9],
            alert_pubkey: &MAIN_ALERT_PUBKEY,
            default_port: 12020,
            consensus,
            genesis,
            genesis_block,
            checkpoints,
            base58_prefixes,
            fixed_seeds,
            dns_seeds,
            policy: PolicyFlags {
                require_rpc_password: true,
                mining_requires_peers: true,
                allow_min_difficulty_blocks: false,
                default_consistency_checks: false,
                require_standard: true,
                mine_blocks_on_demand: false,
                skip_proof_of_work_check: false,
                testnet_to_be_deprecated_field_rpc: false,
                headers_first_syncing_active: false,
            },
            masternode: MasternodeParams {
                count_drift: 20,
                start_payments: 1,
                pool_max_transactions: 3,
                spork_pubkey: &MAIN_SPORK_PUBKEY,
                obfuscation_pool_dummy_address: "bSNPApYSNtfEEmPzUgDg3eiNUiKLYtn64T",
            },
        })
    }

    pub(crate) fn testnet(main: &Params) -> ParamsResult<Self> {
        let net = NetworkType::Testnet;

        debug!("{}: overriding {} constants", net, main.net);
        let consensus = ConsensusParams {
            enforce_block_upgrade_majority: 51,
            reject_block_outdated_majority: 75,
            to_check_block_upgrade_majority: 100,
            miner_threads: 0,
            target_timespan: 60,
            target_spacing: 60,
            last_pow_block: 200,
            maturity: 15,
            modifier_update_block: 51197,
            max_money_out: 100_394_599 * COIN,
            ..main.consensus.clone()
        };

        let genesis = GenesisBlock { hash: TESTNET_GENESIS_HASH, timestamp: 1549601954, nonce: 629189, ..main.genesis };
        let genesis_block = genesis.build_verified(net)?;

        let checkpoints = CheckpointData::new(net, &PLACEHOLDER_CHECKPOINTS, 1549789990, 0, 250.0)?;

        let base58_prefixes = Base58Prefixes {
            pubkey_address: &[139],
            script_address: &[19],
            secret_key: &[239],
            ext_public_key: &[0x3a, 0x80, 0x61, 0xa0],
            ext_secret_key: &[0x3a, 0x80, 0x58, 0x37],
        };

        let mut fixed_seeds = seeds::expand_now(seeds::TESTNET_FIXED_SEEDS);
        fixed_seeds.clear();

        Ok(Self {
            net,
            message_start: [0x0c, 0x11, 0x0a, 0x07],
            alert_pubkey: &TESTNET_ALERT_PUBKEY,
            default_port: 12120,
            consensus,
            genesis,
            genesis_block,
            checkpoints,
            base58_prefixes,
            fixed_seeds,
            dns_seeds: Vec::new(),
            policy: PolicyFlags {
                require_rpc_password: true,
                mining_requires_peers: true,
                allow_min_difficulty_blocks: true,
                default_consistency_checks: false,
                require_standard: false,
                mine_blocks_on_demand: false,
                testnet_to_be_deprecated_field_rpc: true,
                ..main.policy
            },
            masternode: MasternodeParams {
                count_drift: 4,
                start_payments: 1420837558,
                pool_max_transactions: 2,
                spork_pubkey: &TESTNET_SPORK_PUBKEY,
                obfuscation_pool_dummy_address: "xzctEamdG1LveaMEsoV4WWFjSHeg7g3nBE",
            },
        })
    }

    pub(crate) fn regtest(testnet: &Params) -> ParamsResult<Self> {
        let net = NetworkType::Regtest;

        debug!("{}: overriding {} constants", net, testnet.net);
        let consensus = ConsensusParams {
            enforce_block_upgrade_majority: 750,
            reject_block_outdated_majority: 950,
            to_check_block_upgrade_majority: 1000,
            miner_threads: 1,
            target_timespan: 60,
            target_spacing: 60,
            pow_limit: U256::MAX >> 1,
            ..testnet.consensus.clone()
        };

        let genesis = GenesisBlock { hash: REGTEST_GENESIS_HASH, timestamp: 1549601955, nonce: 4222693, ..testnet.genesis };
        let genesis_block = genesis.build_verified(net)?;

        let checkpoints = CheckpointData::new(net, &PLACEHOLDER_CHECKPOINTS, 1549789991, 0, 100.0)?;

        Ok(Self {
            net,
            message_start: [0xfb, 0xbf, 0xb6, 0xda],
            default_port: 12220,
            consensus,
            genesis,
            genesis_block,
            checkpoints,
            fixed_seeds: Vec::new(),
            dns_seeds: Vec::new(),
            policy: PolicyFlags {
                require_rpc_password: false,
                mining_requires_peers: false,
                allow_min_difficulty_blocks: true,
                default_consistency_checks: true,
                require_standard: false,
                mine_blocks_on_demand: true,
                testnet_to_be_deprecated_field_rpc: false,
                ..testnet.policy
            },
            ..testnet.clone()
        })
    }

    pub(crate) fn unittest(main: &Params) -> ParamsResult<Self> {
        let net = NetworkType::Unittest;

        debug!("{}: overriding {} constants", net, main.net);
        Ok(Self {
            net,
            default_port: 12320,
            fixed_seeds: Vec::new(),
            dns_seeds: Vec::new(),
            policy: PolicyFlags {
                require_rpc_password: false,
                mining_requires_peers: false,
                default_consistency_checks: true,
                allow_min_difficulty_blocks: false,
                mine_blocks_on_demand: true,
                ..main.policy
            },
            ..main.clone()
        })
    }

    pub fn network_name(&self) -> &'static str {
        self.net.name()
    }

    pub fn hash_genesis_block(&self) -> Hash {
        self.genesis.hash
    }

    pub fn base58_prefix(&self, ty: Base58Type) -> &'static [u8] {
        self.base58_prefixes.get(ty)
    }

    /// Base58check encoding of `payload` under this network's prefix for `ty`.
    pub fn encode_base58check(&self, ty: Base58Type, payload: &[u8]) -> String {
        let mut data = self.base58_prefix(ty).to_vec();
        data.extend_from_slice(payload);
        bs58::encode(data).with_check().into_string()
    }

    /// The payload of `encoded` if it is valid base58check with this network's prefix for `ty`.
    pub fn decode_base58check(&self, ty: Base58Type, encoded: &str) -> Option<Vec<u8>> {
        let data = bs58::decode(encoded).with_check(None).into_vec().ok()?;
        let prefix = self.base58_prefix(ty);
        data.strip_prefix(prefix).map(<[u8]>::to_vec)
    }

    fn ensure_modifiable(&self, setting: &'static str) -> ParamsResult<()> {
        if self.net.is_modifiable() {
            Ok(())
        } else {
            warn!("Rejected override of {} on {} parameters", setting, self.net);
            Err(ParamsError::NotModifiable { network: self.net, setting })
        }
    }

    pub fn set_enforce_block_upgrade_majority(&mut self, value: u32) -> ParamsResult<()> {
        self.ensure_modifiable("enforce_block_upgrade_majority")?;
        self.consensus.enforce_block_upgrade_majority = value;
        Ok(())
    }

    pub fn set_reject_block_outdated_majority(&mut self, value: u32) -> ParamsResult<()> {
        self.ensure_modifiable("reject_block_outdated_majority")?;
        self.consensus.reject_block_outdated_majority = value;
        Ok(())
    }

    pub fn set_to_check_block_upgrade_majority(&mut self, value: u32) -> ParamsResult<()> {
        self.ensure_modifiable("to_check_block_upgrade_majority")?;
        self.consensus.to_check_block_upgrade_majority = value;
        Ok(())
    }

    pub fn set_default_consistency_checks(&mut self, value: bool) -> ParamsResult<()> {
        self.ensure_modifiable("default_consistency_checks")?;
        self.policy.default_consistency_checks = value;
        Ok(())
    }

    pub fn set_allow_min_difficulty_blocks(&mut self, value: bool) -> ParamsResult<()> {
        self.ensure_modifiable("allow_min_difficulty_blocks")?;
        self.policy.allow_min_difficulty_blocks = value;
        Ok(())
    }

    pub fn set_skip_proof_of_work_check(&mut self, value: bool) -> ParamsResult<()> {
        self.ensure_modifiable("skip_proof_of_work_check")?;
        self.policy.skip_proof_of_work_check = value;
        Ok(())
    }
}
