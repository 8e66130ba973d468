use thiserror::Error;

use crate::network::NetworkType;
use crate::Hash;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("{network} genesis hash mismatch (expected {expected}, computed {computed})")]
    GenesisHashMismatch { network: NetworkType, expected: Hash, computed: Hash },

    #[error("{network} genesis merkle root mismatch (expected {expected}, computed {computed})")]
    GenesisMerkleRootMismatch { network: NetworkType, expected: Hash, computed: Hash },

    #[error("invalid {network} checkpoint table: {reason}")]
    InvalidCheckpointTable { network: NetworkType, reason: String },

    #[error("no network has been selected")]
    NetworkNotSelected,

    #[error("network {active} is already selected, cannot select {requested}")]
    NetworkAlreadySelected { active: NetworkType, requested: NetworkType },

    #[error("cannot set {setting} on {network} parameters, only unit test parameters are modifiable")]
    NotModifiable { network: NetworkType, setting: &'static str },

    #[error("invalid combination of -regtest and -testnet")]
    ConflictingNetworkFlags,

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

impl ParamsError {
    /// Fatal errors are configuration defects; startup must not proceed past them.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParamsError::GenesisHashMismatch { .. }
                | ParamsError::GenesisMerkleRootMismatch { .. }
                | ParamsError::InvalidCheckpointTable { .. }
                | ParamsError::NetworkNotSelected
        )
    }
}

pub type ParamsResult<T> = std::result::Result<T, ParamsError>;
