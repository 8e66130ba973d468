use sha2::{Digest, Sha256};
use std::io::Write;

use crate::Hash;

#[derive(Debug)]
pub enum HashError {
    InvalidHex(String),
    InvalidLength(usize),
}

impl std::fmt::Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashError::InvalidHex(msg) => write!(f, "Hash decoding error: {}", msg),
            HashError::InvalidLength(len) => write!(f, "Hash decoding error: expected 32 bytes, got {}", len),
        }
    }
}

impl std::error::Error for HashError {}

/// Compute SHA256(SHA256(data))
pub fn double_sha256(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    Hash::from_bytes(Sha256::digest(first).into())
}

/// Compute SHA256(data)
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Incremental SHA-256d over anything written into it
#[derive(Clone)]
pub struct HashWriter(Sha256);

impl HashWriter {
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    pub fn finalize(self) -> Hash {
        let first = self.0.finalize();
        Hash::from_bytes(Sha256::digest(first).into())
    }
}

impl Write for HashWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Default for HashWriter {
    fn default() -> Self {
        Self::new()
    }
}
