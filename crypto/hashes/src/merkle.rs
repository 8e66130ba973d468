use crate::{Hash, HashWriter};
use std::io::Write;

/// Bitcoin-style merkle root: leaves are paired and SHA-256d hashed level by
/// level, duplicating the last node of an odd level. No leaves yield zero.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    if leaves.is_empty() {
        return Hash::zeroed();
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let left = pair[0];
                let right = pair.get(1).copied().unwrap_or(left);
                hash_pair(&left, &right)
            })
            .collect();
    }
    level[0]
}

fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut writer = HashWriter::new();
    // writes into a hasher cannot fail
    let _ = writer.write_all(left.as_bytes());
    let _ = writer.write_all(right.as_bytes());
    writer.finalize()
}
