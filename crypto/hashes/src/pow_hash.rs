use crate::Hash;
use groestl::Groestl512;
use jh::Jh512;
use sha2::Digest;
use sha3::Keccak512;
use skein::{consts::U64, Skein512};
use std::io::Write;

type Digest512 = [u8; 64];

fn digest<D: Digest>(data: &[u8]) -> Digest512 {
    let mut out = [0u8; 64];
    out.copy_from_slice(&D::digest(data));
    out
}

fn groestl(data: &[u8]) -> Digest512 {
    digest::<Groestl512>(data)
}

fn jh(data: &[u8]) -> Digest512 {
    digest::<Jh512>(data)
}

fn keccak(data: &[u8]) -> Digest512 {
    digest::<Keccak512>(data)
}

fn skein(data: &[u8]) -> Digest512 {
    digest::<Skein512<U64>>(data)
}

/// Bit 3 of the first byte picks the branch taken at each data-dependent stage.
fn branch(h: &Digest512) -> bool {
    h[0] & 8 != 0
}

/// Quark: nine chained 512-bit hashes, three of them data-dependent,
/// truncated to 256 bits.
pub fn quark(data: &[u8]) -> Hash {
    let mut h = crate::blake512::blake512(data);
    h = crate::bmw512::bmw512(&h);
    h = if branch(&h) { groestl(&h) } else { skein(&h) };
    h = groestl(&h);
    h = jh(&h);
    h = if branch(&h) { crate::blake512::blake512(&h) } else { crate::bmw512::bmw512(&h) };
    h = keccak(&h);
    h = skein(&h);
    h = if branch(&h) { keccak(&h) } else { jh(&h) };

    let mut out = [0u8; 32];
    out.copy_from_slice(&h[..32]);
    Hash::from_bytes(out)
}

/// Buffers serialized header bytes and hashes them with Quark on finalize
#[derive(Clone, Default)]
pub struct QuarkHash {
    buf: Vec<u8>,
}

impl QuarkHash {
    pub fn new() -> Self {
        Self { buf: Vec::with_capacity(80) }
    }

    pub fn finalize(&self) -> Hash {
        quark(&self.buf)
    }
}

impl Write for QuarkHash {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_quark_of_empty_input() {
        assert_eq!(quark(b"").as_bytes(), &hex!("0800f13b5af35b8363864de22b7bedeca369e2a7c6c77b4f69441cb03a517d9c"));
    }

    #[test]
    fn test_quark_of_abc() {
        assert_eq!(quark(b"abc").as_bytes(), &hex!("a54b64292dd6aade02bea66228cd721e637cd5a2c1c7dee320b08ae60349d9d0"));
    }

    #[test]
    fn test_quark_of_header_sized_input() {
        let data: Vec<u8> = (0u8..80).collect();
        assert_eq!(quark(&data).as_bytes(), &hex!("ae69759081f8ffa2913284f985c25eab7af8aaa39670419b03ac68afb3c75ece"));
    }

    #[test]
    fn test_writer_matches_one_shot() {
        let data: Vec<u8> = (0u8..80).collect();
        let mut hasher = QuarkHash::new();
        hasher.write_all(&data[..4]).unwrap();
        hasher.write_all(&data[4..]).unwrap();
        assert_eq!(hasher.finalize(), quark(&data));
    }

    #[test]
    fn test_pivx_mainnet_genesis_header() {
        // version 1, null prev, merkle 1b2ef6e2.., time 1454124731, bits 0x1e0ffff0, nonce 2402015
        let mut header = Vec::with_capacity(80);
        header.extend_from_slice(&1u32.to_le_bytes());
        header.extend_from_slice(&[0u8; 32]);
        let merkle = Hash::from_hex("1b2ef6e2f28be914103a277377ae7729dcd125dfeb8bf97bd5964ba72b6dc39b").unwrap();
        header.extend_from_slice(merkle.as_bytes());
        header.extend_from_slice(&1454124731u32.to_le_bytes());
        header.extend_from_slice(&0x1e0ffff0u32.to_le_bytes());
        header.extend_from_slice(&2402015u32.to_le_bytes());

        assert_eq!(quark(&header).to_string(), "0000041e482b9b9691d98eefb48473405c0b8ec31b76df3797c74a78680ef818");
    }
}
