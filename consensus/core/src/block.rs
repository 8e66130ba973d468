use serde::{Deserialize, Serialize};
use sst_hashes::{merkle_root, QuarkHash};
use std::io::{self, Write};

use crate::constants::HEADER_SIZE;
use crate::tx::Transaction;
use crate::Hash;

/// The 80-byte block header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: i32,
    pub hash_prev_block: Hash,
    pub hash_merkle_root: Hash,
    pub timestamp: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl Header {
    pub fn serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(self.hash_prev_block.as_bytes())?;
        writer.write_all(self.hash_merkle_root.as_bytes())?;
        writer.write_all(&self.timestamp.to_le_bytes())?;
        writer.write_all(&self.bits.to_le_bytes())?;
        writer.write_all(&self.nonce.to_le_bytes())
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let mut cursor = &mut out[..];
        // exactly HEADER_SIZE bytes are written
        let _ = self.serialize(&mut cursor);
        out
    }

    /// Block identity: Quark over the serialized header
    pub fn hash(&self) -> Hash {
        let mut hasher = QuarkHash::new();
        let _ = self.serialize(&mut hasher);
        hasher.finalize()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

impl Block {
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Merkle root over the transaction ids, independent of the header field
    pub fn compute_merkle_root(&self) -> Hash {
        let ids: Vec<Hash> = self.transactions.iter().map(Transaction::id).collect();
        merkle_root(&ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sst_hashes::quark;

    fn header() -> Header {
        Header {
            version: 1,
            hash_prev_block: Hash::zeroed(),
            hash_merkle_root: Hash::from_u64_word(0xabcdef),
            timestamp: 1549601953,
            bits: 0x1e0ffff0,
            nonce: 762554,
        }
    }

    #[test]
    fn header_layout() {
        let bytes = header().to_bytes();
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[36..39], &[0xef, 0xcd, 0xab]);
        assert_eq!(&bytes[68..72], &1549601953u32.to_le_bytes());
        assert_eq!(&bytes[72..76], &[0xf0, 0xff, 0x0f, 0x1e]);
        assert_eq!(&bytes[76..80], &762554u32.to_le_bytes());
    }

    #[test]
    fn header_hash_is_quark() {
        let h = header();
        assert_eq!(h.hash(), quark(&h.to_bytes()));
    }

    #[test]
    fn changing_the_nonce_changes_the_hash() {
        let a = header();
        let b = Header { nonce: a.nonce + 1, ..a };
        assert_ne!(a.hash(), b.hash());
    }
}
