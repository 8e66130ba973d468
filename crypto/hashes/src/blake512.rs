//! BLAKE-512 (SHA-3 finalist, 16 rounds) as used by the Quark chain.

const BLOCK_LEN: usize = 128;

const IV: [u64; 8] = [
    0x6A09E667F3BCC908, 0xBB67AE8584CAA73B, 0x3C6EF372FE94F82B, 0xA54FF53A5F1D36F1,
    0x510E527FADE682D1, 0x9B05688C2B3E6C1F, 0x1F83D9ABFB41BD6B, 0x5BE0CD19137E2179,
];

const C: [u64; 16] = [
    0x243F6A8885A308D3, 0x13198A2E03707344, 0xA4093822299F31D0, 0x082EFA98EC4E6C89,
    0x452821E638D01377, 0xBE5466CF34E90C6C, 0xC0AC29B7C97C50DD, 0x3F84D5B5B5470917,
    0x9216D5D98979FB1B, 0xD1310BA698DFB5AC, 0x2FFD72DBD01ADFB7, 0xB8E1AFED6A267E96,
    0xBA7C9045F12C7F99, 0x24A19947B3916CF7, 0x0801F2E2858EFC16, 0x636920D871574E69,
];

const SIGMA: [[usize; 16]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

/// Column steps followed by diagonal steps: (a, b, c, d) state indices.
const STEPS: [[usize; 4]; 8] = [
    [0, 4, 8, 12],
    [1, 5, 9, 13],
    [2, 6, 10, 14],
    [3, 7, 11, 15],
    [0, 5, 10, 15],
    [1, 6, 11, 12],
    [2, 7, 8, 13],
    [3, 4, 9, 14],
];

/// One-shot BLAKE-512 digest.
pub fn blake512(data: &[u8]) -> [u8; 64] {
    let mut h = IV;
    let bit_len = data.len() as u128 * 8;

    let mut blocks = data.chunks_exact(BLOCK_LEN);
    let mut counter: u128 = 0;
    for block in &mut blocks {
        counter += (BLOCK_LEN * 8) as u128;
        compress(&mut h, block, counter);
    }

    let rest = blocks.remainder();
    let mut tail = [0u8; 2 * BLOCK_LEN];
    tail[..rest.len()].copy_from_slice(rest);
    tail[rest.len()] = 0x80;
    let tail_len = if rest.len() < BLOCK_LEN - 16 { BLOCK_LEN } else { 2 * BLOCK_LEN };
    tail[tail_len - 17] |= 0x01;
    tail[tail_len - 16..tail_len].copy_from_slice(&bit_len.to_be_bytes());

    // a block carrying no message bits is compressed with a zero counter
    if tail_len == BLOCK_LEN {
        let t = if rest.is_empty() { 0 } else { bit_len };
        compress(&mut h, &tail[..BLOCK_LEN], t);
    } else {
        compress(&mut h, &tail[..BLOCK_LEN], bit_len);
        compress(&mut h, &tail[BLOCK_LEN..], 0);
    }

    let mut out = [0u8; 64];
    for (chunk, word) in out.chunks_exact_mut(8).zip(h.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    out
}

fn compress(h: &mut [u64; 8], block: &[u8], t: u128) {
    let mut m = [0u64; 16];
    for (word, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *word = u64::from_be_bytes(buf);
    }

    let t_lo = t as u64;
    let t_hi = (t >> 64) as u64;
    let mut v = [0u64; 16];
    v[..8].copy_from_slice(h);
    v[8..12].copy_from_slice(&C[..4]);
    v[12] = t_lo ^ C[4];
    v[13] = t_lo ^ C[5];
    v[14] = t_hi ^ C[6];
    v[15] = t_hi ^ C[7];

    for round in 0..16 {
        let s = &SIGMA[round % 10];
        for (i, &[a, b, c, d]) in STEPS.iter().enumerate() {
            let (x, y) = (s[2 * i], s[2 * i + 1]);
            v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[x] ^ C[y]);
            v[d] = (v[d] ^ v[a]).rotate_right(32);
            v[c] = v[c].wrapping_add(v[d]);
            v[b] = (v[b] ^ v[c]).rotate_right(25);
            v[a] = v[a].wrapping_add(v[b]).wrapping_add(m[y] ^ C[x]);
            v[d] = (v[d] ^ v[a]).rotate_right(16);
            v[c] = v[c].wrapping_add(v[d]);
            v[b] = (v[b] ^ v[c]).rotate_right(11);
        }
    }

    for i in 0..8 {
        h[i] ^= v[i] ^ v[i + 8];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn empty_input() {
        assert_eq!(
            blake512(b""),
            hex!("a8cfbbd73726062df0c6864dda65defe58ef0cc52a5625090fa17601e1eecd1b628e94f396ae402a00acc9eab77b4d4c2e852aaaa25a636d80af3fc7913ef5b8")
        );
    }

    #[test]
    fn abc() {
        assert_eq!(
            blake512(b"abc"),
            hex!("14266c7c704a3b58fb421ee69fd005fcc6eeff742136be67435df995b7c986e7cbde4dbde135e7689c354d2bc5b8d260536c554b4f84c118e61efc576fed7cd3")
        );
    }

    #[test]
    fn two_block_zero_message() {
        // 144 zero bytes: the second block holds message bits and the length
        assert_eq!(
            blake512(&[0u8; 144]),
            hex!("313717d608e9cf758dcb1eb0f0c3cf9fc150b2d500fb33f51c52afc99d358a2f1374b8a38bba7974e7f6ef79cab16f22ce1e649d6e01ad9589c213045d545dde")
        );
    }

    #[test]
    fn padding_fits_exactly_in_one_block() {
        let data: Vec<u8> = (0u8..111).collect();
        assert_eq!(
            blake512(&data),
            hex!("5329f386033ff4492299d9a893f8ec8e8c7ed9e5fb24a74d2a018fcf7378edc25840a2df487707f02819a5822c1ef203ee41b1595fcd330edee15a7c3c0d82af")
        );
    }

    #[test]
    fn length_spills_into_second_tail_block() {
        let data: Vec<u8> = (0u8..120).collect();
        assert_eq!(
            blake512(&data),
            hex!("3bff10f204cee60a442c25f981876e7db8d27b2c63ddfc35cf078369ac575c5920e4f491026447b1a22cdf8d9635d0d9b0f3d3397bb5196c004364a05575d4b7")
        );
    }
}
