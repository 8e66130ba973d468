pub mod blake512;
pub mod bmw512;
pub mod hasher;
pub mod merkle;
pub mod pow_hash;

// Re-export commonly used types
pub use hasher::{double_sha256, sha256, HashError, HashWriter};
pub use merkle::merkle_root;
pub use pow_hash::{quark, QuarkHash};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::Hash as StdHash;
use std::ops::Deref;
use std::str::FromStr;

pub const HASH_SIZE: usize = 32;

/// A 256-bit hash in internal byte order.
///
/// Block and transaction hashes are displayed and parsed byte-reversed, the
/// way explorers and RPC show them, while `as_bytes` exposes the order used
/// on the wire and inside merkle computations.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Builds a hash from its display (big-endian) byte order, e.g. a `hex!` literal
    /// copied from an explorer.
    pub const fn from_be_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        let mut le = [0u8; HASH_SIZE];
        let mut i = 0;
        while i < HASH_SIZE {
            le[i] = bytes[HASH_SIZE - 1 - i];
            i += 1;
        }
        Self(le)
    }

    /// Returns raw bytes
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub const fn zeroed() -> Self {
        Self([0u8; HASH_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Constructs a hash from four little-endian u64 limbs, least significant first.
    pub const fn from_le_u64(parts: [u64; 4]) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        let mut i = 0;
        while i < 4 {
            let le = parts[i].to_le_bytes();
            let mut j = 0;
            while j < 8 {
                bytes[i * 8 + j] = le[j];
                j += 1;
            }
            i += 1;
        }
        Self(bytes)
    }

    /// The 256-bit integer `word`, e.g. `from_u64_word(1)` displays as `00..01`.
    pub const fn from_u64_word(word: u64) -> Self {
        Self::from_le_u64([word, 0, 0, 0])
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, HashError> {
        let array: [u8; HASH_SIZE] = slice.try_into().map_err(|_| HashError::InvalidLength(slice.len()))?;
        Ok(Self(array))
    }

    /// Parses the display (byte-reversed) hex form.
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| HashError::InvalidHex(e.to_string()))?;
        bytes.reverse();
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; HASH_SIZE] {
    fn from(h: Hash) -> Self {
        h.0
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl StdHash for Hash {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // the low limb is already uniformly distributed
        let mut le = [0u8; 8];
        le.copy_from_slice(&self.0[0..8]);
        u64::from_le_bytes(le).hash(state);
    }
}

impl Deref for Hash {
    type Target = [u8; HASH_SIZE];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(de::Error::custom)
    }
}
