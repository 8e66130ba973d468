pub use primitive_types::U256;

use crate::Hash;

/// Decoded compact difficulty bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactTarget {
    pub target: U256,
    pub negative: bool,
    pub overflow: bool,
}

/// Expands compact `bits` (exponent byte plus 23-bit mantissa and sign bit).
pub fn compact_to_target(bits: u32) -> CompactTarget {
    let size = (bits >> 24) as usize;
    let mut word = bits & 0x007f_ffff;
    let target = if size <= 3 {
        word >>= 8 * (3 - size);
        U256::from(word)
    } else if size - 3 < 32 {
        U256::from(word) << (8 * (size - 3))
    } else {
        U256::zero()
    };

    let negative = word != 0 && bits & 0x0080_0000 != 0;
    let overflow = word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
    CompactTarget { target, negative, overflow }
}

pub fn target_to_compact(target: U256) -> u32 {
    let mut size = (target.bits() + 7) / 8;
    let mut compact = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (target >> (8 * (size - 3))).low_u64() as u32
    };

    // keep the sign bit clear by moving to a larger exponent
    if compact & 0x0080_0000 != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | ((size as u32) << 24)
}

/// A hash read as a little-endian 256-bit integer
pub fn hash_to_u256(hash: &Hash) -> U256 {
    U256::from_little_endian(hash.as_bytes())
}

/// Whether `hash` satisfies `bits` under the network ceiling `pow_limit`.
pub fn check_proof_of_work(hash: &Hash, bits: u32, pow_limit: U256) -> bool {
    let CompactTarget { target, negative, overflow } = compact_to_target(bits);
    if negative || overflow || target.is_zero() || target > pow_limit {
        return false;
    }
    hash_to_u256(hash) <= target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_bits_expand() {
        let decoded = compact_to_target(0x1e0ffff0);
        assert!(!decoded.negative && !decoded.overflow);
        assert_eq!(decoded.target, U256::from(0x0ffff0u32) << (8 * 27));
        assert_eq!(target_to_compact(decoded.target), 0x1e0ffff0);
    }

    #[test]
    fn pow_limits_compact() {
        assert_eq!(target_to_compact(U256::MAX >> 20), 0x1e0fffff);
        assert_eq!(target_to_compact(U256::MAX >> 1), 0x207fffff);
    }

    #[test]
    fn sign_and_overflow() {
        assert!(compact_to_target(0x04923456).negative);
        assert!(compact_to_target(0xff123456).overflow);
        assert_eq!(compact_to_target(0x01123456).target, U256::from(0x12u32));
        assert_eq!(target_to_compact(U256::from(0x80u32)), 0x02008000);
    }

    #[test]
    fn proof_of_work_against_target() {
        let limit = U256::MAX >> 20;
        let easy = Hash::from_le_u64([0, 0, 0, 0x0000_00ff_0000_0000]);
        assert!(check_proof_of_work(&easy, 0x1e0ffff0, limit));

        let hard = Hash::from_le_u64([0, 0, 0, 0xffff_0000_0000_0000]);
        assert!(!check_proof_of_work(&hard, 0x1e0ffff0, limit));

        // a target above the network ceiling is never valid
        assert!(!check_proof_of_work(&easy, 0x207fffff, limit));
    }
}
