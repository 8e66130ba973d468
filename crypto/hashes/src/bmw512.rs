//! Blue Midnight Wish 512, the second stage of the Quark chain.

const BLOCK_LEN: usize = 128;

const IV: [u64; 16] = {
    let mut iv = [0u64; 16];
    let mut i = 0;
    while i < 16 {
        iv[i] = 0x8081828384858687u64.wrapping_add((i as u64).wrapping_mul(0x0808080808080808));
        i += 1;
    }
    iv
};

const FINAL: [u64; 16] = {
    let mut k = [0u64; 16];
    let mut i = 0;
    while i < 16 {
        k[i] = 0xaaaaaaaaaaaaaaa0 + i as u64;
        i += 1;
    }
    k
};

/// Terms of W_j: indices into M ^ H, added when the flag is true and subtracted otherwise.
const W_TERMS: [[(usize, bool); 5]; 16] = [
    [(5, true), (7, false), (10, true), (13, true), (14, true)],
    [(6, true), (8, false), (11, true), (14, true), (15, false)],
    [(0, true), (7, true), (9, true), (12, false), (15, true)],
    [(0, true), (1, false), (8, true), (10, false), (13, true)],
    [(1, true), (2, true), (9, true), (11, false), (14, false)],
    [(3, true), (2, false), (10, true), (12, false), (15, true)],
    [(4, true), (0, false), (3, false), (11, false), (13, true)],
    [(1, true), (4, false), (5, false), (12, false), (14, false)],
    [(2, true), (5, false), (6, false), (13, true), (15, false)],
    [(0, true), (3, false), (6, true), (7, false), (14, true)],
    [(8, true), (1, false), (4, false), (7, false), (15, true)],
    [(8, true), (0, false), (2, false), (5, false), (9, true)],
    [(1, true), (3, true), (6, false), (9, false), (10, true)],
    [(2, true), (4, true), (7, true), (10, true), (11, true)],
    [(3, true), (5, false), (8, true), (11, false), (12, false)],
    [(12, true), (4, false), (6, false), (9, false), (13, true)],
];

const EXPAND2_ROT: [u32; 7] = [5, 11, 27, 32, 37, 43, 53];

fn s0(x: u64) -> u64 {
    (x >> 1) ^ (x << 3) ^ x.rotate_left(4) ^ x.rotate_left(37)
}

fn s1(x: u64) -> u64 {
    (x >> 1) ^ (x << 2) ^ x.rotate_left(13) ^ x.rotate_left(43)
}

fn s2(x: u64) -> u64 {
    (x >> 2) ^ (x << 1) ^ x.rotate_left(19) ^ x.rotate_left(53)
}

fn s3(x: u64) -> u64 {
    (x >> 2) ^ (x << 2) ^ x.rotate_left(28) ^ x.rotate_left(59)
}

fn s4(x: u64) -> u64 {
    (x >> 1) ^ x
}

fn s5(x: u64) -> u64 {
    (x >> 2) ^ x
}

/// One-shot BMW-512 digest.
pub fn bmw512(data: &[u8]) -> [u8; 64] {
    let mut h = IV;

    let mut blocks = data.chunks_exact(BLOCK_LEN);
    for block in &mut blocks {
        h = compress(&h, &load_block(block));
    }

    let rest = blocks.remainder();
    let mut tail = [0u8; 2 * BLOCK_LEN];
    tail[..rest.len()].copy_from_slice(rest);
    tail[rest.len()] = 0x80;
    let tail_len = if rest.len() < BLOCK_LEN - 8 { BLOCK_LEN } else { 2 * BLOCK_LEN };
    let bit_len = (data.len() as u64).wrapping_mul(8);
    tail[tail_len - 8..tail_len].copy_from_slice(&bit_len.to_le_bytes());
    for block in tail[..tail_len].chunks_exact(BLOCK_LEN) {
        h = compress(&h, &load_block(block));
    }

    // finalization compresses the chaining value under a constant key
    let h = compress(&FINAL, &h);

    let mut out = [0u8; 64];
    for (chunk, word) in out.chunks_exact_mut(8).zip(h[8..].iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

fn load_block(block: &[u8]) -> [u64; 16] {
    let mut m = [0u64; 16];
    for (word, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        *word = u64::from_le_bytes(buf);
    }
    m
}

fn add_element(m: &[u64; 16], h: &[u64; 16], j: usize) -> u64 {
    let a = j - 16;
    let rot = |i: usize| m[i % 16].rotate_left((i % 16) as u32 + 1);
    rot(a)
        .wrapping_add(rot(a + 3))
        .wrapping_sub(rot(a + 10))
        .wrapping_add((j as u64).wrapping_mul(0x0555555555555555))
        ^ h[(a + 7) % 16]
}

fn compress(h: &[u64; 16], m: &[u64; 16]) -> [u64; 16] {
    let mut x = [0u64; 16];
    for i in 0..16 {
        x[i] = m[i] ^ h[i];
    }

    let f0: [fn(u64) -> u64; 5] = [s0, s1, s2, s3, s4];
    let mut q = [0u64; 32];
    for j in 0..16 {
        let w = W_TERMS[j].iter().fold(0u64, |acc, &(i, add)| {
            if add {
                acc.wrapping_add(x[i])
            } else {
                acc.wrapping_sub(x[i])
            }
        });
        q[j] = f0[j % 5](w).wrapping_add(h[(j + 1) % 16]);
    }

    let f1: [fn(u64) -> u64; 4] = [s1, s2, s3, s0];
    for j in 16..18 {
        let acc = (0..16).fold(0u64, |acc, k| acc.wrapping_add(f1[k % 4](q[j - 16 + k])));
        q[j] = acc.wrapping_add(add_element(m, h, j));
    }

    for j in 18..32 {
        let mut acc = 0u64;
        for k in 0..7 {
            acc = acc
                .wrapping_add(q[j - 16 + 2 * k])
                .wrapping_add(q[j - 15 + 2 * k].rotate_left(EXPAND2_ROT[k]));
        }
        acc = acc.wrapping_add(s4(q[j - 2])).wrapping_add(s5(q[j - 1]));
        q[j] = acc.wrapping_add(add_element(m, h, j));
    }

    let xl = q[16..24].iter().fold(0u64, |acc, v| acc ^ v);
    let xh = q[24..32].iter().fold(xl, |acc, v| acc ^ v);

    let mut n = [0u64; 16];
    n[0] = ((xh << 5) ^ (q[16] >> 5) ^ m[0]).wrapping_add(xl ^ q[24] ^ q[0]);
    n[1] = ((xh >> 7) ^ (q[17] << 8) ^ m[1]).wrapping_add(xl ^ q[25] ^ q[1]);
    n[2] = ((xh >> 5) ^ (q[18] << 5) ^ m[2]).wrapping_add(xl ^ q[26] ^ q[2]);
    n[3] = ((xh >> 1) ^ (q[19] << 5) ^ m[3]).wrapping_add(xl ^ q[27] ^ q[3]);
    n[4] = ((xh >> 3) ^ q[20] ^ m[4]).wrapping_add(xl ^ q[28] ^ q[4]);
    n[5] = ((xh << 6) ^ (q[21] >> 6) ^ m[5]).wrapping_add(xl ^ q[29] ^ q[5]);
    n[6] = ((xh >> 4) ^ (q[22] << 6) ^ m[6]).wrapping_add(xl ^ q[30] ^ q[6]);
    n[7] = ((xh >> 11) ^ (q[23] << 2) ^ m[7]).wrapping_add(xl ^ q[31] ^ q[7]);
    n[8] = n[4].rotate_left(9).wrapping_add(xh ^ q[24] ^ m[8]).wrapping_add((xl << 8) ^ q[23] ^ q[8]);
    n[9] = n[5].rotate_left(10).wrapping_add(xh ^ q[25] ^ m[9]).wrapping_add((xl >> 6) ^ q[16] ^ q[9]);
    n[10] = n[6].rotate_left(11).wrapping_add(xh ^ q[26] ^ m[10]).wrapping_add((xl << 6) ^ q[17] ^ q[10]);
    n[11] = n[7].rotate_left(12).wrapping_add(xh ^ q[27] ^ m[11]).wrapping_add((xl << 4) ^ q[18] ^ q[11]);
    n[12] = n[0].rotate_left(13).wrapping_add(xh ^ q[28] ^ m[12]).wrapping_add((xl >> 3) ^ q[19] ^ q[12]);
    n[13] = n[1].rotate_left(14).wrapping_add(xh ^ q[29] ^ m[13]).wrapping_add((xl >> 4) ^ q[20] ^ q[13]);
    n[14] = n[2].rotate_left(15).wrapping_add(xh ^ q[30] ^ m[14]).wrapping_add((xl >> 7) ^ q[21] ^ q[14]);
    n[15] = n[3].rotate_left(16).wrapping_add(xh ^ q[31] ^ m[15]).wrapping_add((xl >> 2) ^ q[22] ^ q[15]);
    n
}
