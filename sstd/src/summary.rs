//! Serializable snapshot of the selected network's parameters.

use consensus_core::config::checkpoints::{Checkpoint, LatestCheckpoint};
use consensus_core::config::params::{Base58Type, Params};
use consensus_core::network::NetworkType;
use consensus_core::pow::target_to_compact;
use consensus_core::Hash;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ParamsSummary {
    pub network: NetworkType,
    pub message_start: String,
    pub default_port: u16,
    pub genesis: GenesisSummary,
    pub pow_limit_bits: String,
    pub target_timespan: i64,
    pub target_spacing: i64,
    pub last_pow_block: u64,
    pub maturity: u32,
    pub max_money_out: i64,
    pub base58_prefixes: Vec<PrefixSummary>,
    pub checkpoints_enabled: bool,
    pub checkpoints: Vec<Checkpoint>,
    pub latest_checkpoint: LatestCheckpoint,
    pub dns_seeds: Vec<String>,
    pub fixed_seed_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenesisSummary {
    pub hash: Hash,
    pub merkle_root: Hash,
    pub timestamp: u32,
    pub bits: String,
    pub nonce: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrefixSummary {
    pub kind: String,
    pub prefix: String,
}

impl ParamsSummary {
    pub fn new(params: &Params, checkpoints_enabled: bool) -> Self {
        let header = &params.genesis_block.header;
        Self {
            network: params.net,
            message_start: hex::encode(params.message_start),
            default_port: params.default_port,
            genesis: GenesisSummary {
                hash: params.hash_genesis_block(),
                merkle_root: header.hash_merkle_root,
                timestamp: header.timestamp,
                bits: format!("0x{:08x}", header.bits),
                nonce: header.nonce,
            },
            pow_limit_bits: format!("0x{:08x}", target_to_compact(params.consensus.pow_limit)),
            target_timespan: params.consensus.target_timespan,
            target_spacing: params.consensus.target_spacing,
            last_pow_block: params.consensus.last_pow_block,
            maturity: params.consensus.maturity,
            max_money_out: params.consensus.max_money_out,
            base58_prefixes: Base58Type::iter()
                .map(|ty| PrefixSummary { kind: format!("{:?}", ty), prefix: hex::encode(params.base58_prefix(ty)) })
                .collect(),
            checkpoints_enabled,
            checkpoints: params.checkpoints.iter().collect(),
            latest_checkpoint: params.checkpoints.latest(),
            dns_seeds: params.dns_seeds.iter().map(|seed| seed.host.to_string()).collect(),
            fixed_seed_count: params.fixed_seeds.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_core::config::registry::Registry;

    #[test]
    fn main_summary() {
        let registry = Registry::new().unwrap();
        let summary = ParamsSummary::new(registry.params_for(NetworkType::Mainnet), true);
        assert_eq!(summary.default_port, 12020);
        assert_eq!(summary.pow_limit_bits, "0x1e0fffff");
        assert_eq!(summary.checkpoints.len(), 5);
        assert_eq!(summary.latest_checkpoint.height, 900);
        assert_eq!(summary.base58_prefixes.len(), 5);
    }

    #[test]
    fn serializes_hashes_as_hex() {
        let registry = Registry::new().unwrap();
        let params = registry.params_for(NetworkType::Regtest);
        let json = serde_json::to_value(ParamsSummary::new(params, false)).unwrap();
        assert_eq!(json["network"], "regtest");
        assert_eq!(json["genesis"]["hash"], params.hash_genesis_block().to_hex());
        assert_eq!(json["checkpoints_enabled"], false);
    }
}
