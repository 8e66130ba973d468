use tracing::{debug, error};

use crate::block::{Block, Header};
use crate::errors::{ParamsError, ParamsResult};
use crate::network::NetworkType;
use crate::script::{Opcode, Script};
use crate::tx::{Transaction, TransactionOutput};
use crate::{Amount, Hash, ZERO_HASH};

/// `nBits` of the genesis-era difficulty, pushed into every genesis coinbase
const GENESIS_COINBASE_BITS: i64 = 486604799;

/// Extra-nonce pushed after the bits in the genesis coinbase
const GENESIS_COINBASE_EXTRA_NONCE: i64 = 4;

/// The constants uniquely representing the genesis block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenesisBlock {
    /// Expected block hash
    pub hash: Hash,
    /// Expected merkle root
    pub hash_merkle_root: Hash,
    pub version: i32,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
    pub coinbase_message: &'static [u8],
    /// Uncompressed public key paid by the genesis output
    pub output_pubkey: &'static [u8],
    pub reward: Amount,
}

impl GenesisBlock {
    pub fn build_genesis_transactions(&self) -> Vec<Transaction> {
        let signature_script = Script::new()
            .push_int(GENESIS_COINBASE_BITS)
            .push_num(GENESIS_COINBASE_EXTRA_NONCE)
            .push_slice(self.coinbase_message);
        let script_public_key = Script::new().push_slice(self.output_pubkey).push_opcode(Opcode::OP_CHECKSIG);
        vec![Transaction::new_coinbase(signature_script, vec![TransactionOutput::new(self.reward, script_public_key)])]
    }

    /// Assembles the block from the constants without checking the expected values.
    pub fn build(&self) -> Block {
        let transactions = self.build_genesis_transactions();
        let mut block = Block::new(
            Header {
                version: self.version,
                hash_prev_block: ZERO_HASH,
                hash_merkle_root: ZERO_HASH,
                timestamp: self.timestamp,
                bits: self.bits,
                nonce: self.nonce,
            },
            transactions,
        );
        block.header.hash_merkle_root = block.compute_merkle_root();
        block
    }

    /// Builds the block and checks its merkle root and hash against the pinned values.
    pub fn build_verified(&self, network: NetworkType) -> ParamsResult<Block> {
        let block = self.build();
        let merkle_root = block.header.hash_merkle_root;
        if merkle_root != self.hash_merkle_root {
            error!("{} genesis merkle root {} does not match {}", network, merkle_root, self.hash_merkle_root);
            return Err(ParamsError::GenesisMerkleRootMismatch { network, expected: self.hash_merkle_root, computed: merkle_root });
        }

        let hash = block.hash();
        if hash != self.hash {
            error!("{} genesis hash {} does not match {} (merkle root {})", network, hash, self.hash, merkle_root);
            return Err(ParamsError::GenesisHashMismatch { network, expected: self.hash, computed: hash });
        }

        debug!("{} genesis verified: hash {}, merkle root {}", network, hash, merkle_root);
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::params::MAIN_GENESIS;
    use hex_literal::hex;

    #[test]
    fn coinbase_script_sig_layout() {
        let txs = MAIN_GENESIS.build_genesis_transactions();
        assert_eq!(txs.len(), 1);
        assert!(txs[0].is_coinbase());

        let script_sig = txs[0].inputs[0].signature_script.as_bytes();
        assert_eq!(&script_sig[..7], &hex!("04ffff001d0104"));
        assert_eq!(script_sig[7] as usize, MAIN_GENESIS.coinbase_message.len());
        assert_eq!(&script_sig[8..], MAIN_GENESIS.coinbase_message);
    }

    #[test]
    fn build_is_deterministic() {
        let a = MAIN_GENESIS.build();
        let b = MAIN_GENESIS.build();
        assert_eq!(a, b);
        assert_eq!(a.hash(), b.hash());
        assert_eq!(a.header.hash_merkle_root, a.compute_merkle_root());
    }

    #[test]
    fn main_genesis_verifies() {
        let block = MAIN_GENESIS.build_verified(NetworkType::Mainnet).unwrap();
        assert_eq!(block.hash(), MAIN_GENESIS.hash);
        assert_eq!(block.header.hash_merkle_root.to_string(), "b127d9ca811cf8e86f706fef1d5692b2841a490e4cdcb49af3fa0d9dcc5775f6");
    }

    #[test]
    fn hash_mismatch_reports_both_values() {
        let wrong = GenesisBlock { nonce: MAIN_GENESIS.nonce + 1, ..MAIN_GENESIS };
        let computed = wrong.build().hash();
        match wrong.build_verified(NetworkType::Mainnet) {
            Err(err @ ParamsError::GenesisHashMismatch { .. }) => {
                assert!(err.is_fatal());
                assert_eq!(
                    err,
                    ParamsError::GenesisHashMismatch { network: NetworkType::Mainnet, expected: MAIN_GENESIS.hash, computed }
                );
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn merkle_mismatch_is_checked_first() {
        let wrong = GenesisBlock { reward: MAIN_GENESIS.reward + 1, ..MAIN_GENESIS };
        assert!(matches!(wrong.build_verified(NetworkType::Mainnet), Err(ParamsError::GenesisMerkleRootMismatch { .. })));
    }
}
