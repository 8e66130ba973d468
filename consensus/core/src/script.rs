use serde::{Deserialize, Serialize};

/// Script opcodes used when assembling coinbase and output scripts
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    OP_0 = 0x00,
    OP_PUSHDATA1 = 0x4c,
    OP_PUSHDATA2 = 0x4d,
    OP_PUSHDATA4 = 0x4e,
    OP_1NEGATE = 0x4f,
    OP_1 = 0x51,
    OP_16 = 0x60,
    OP_CHECKSIG = 0xac,
}

/// Raw script bytes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_opcode(mut self, opcode: Opcode) -> Self {
        self.0.push(opcode as u8);
        self
    }

    /// Pushes `data` with the shortest push opcode for its length.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < Opcode::OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(Opcode::OP_PUSHDATA1 as u8);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(Opcode::OP_PUSHDATA2 as u8);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(Opcode::OP_PUSHDATA4 as u8);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Pushes an integer: small values as OP_N, everything else as a script number.
    pub fn push_int(self, n: i64) -> Self {
        match n {
            -1 => self.push_opcode(Opcode::OP_1NEGATE),
            0 => self.push_opcode(Opcode::OP_0),
            1..=16 => {
                let mut script = self;
                script.0.push(Opcode::OP_1 as u8 + (n as u8 - 1));
                script
            }
            _ => self.push_slice(&script_num_to_vec(n)),
        }
    }

    /// Pushes the script-number encoding of `n` as data, even for small values.
    pub fn push_num(self, n: i64) -> Self {
        self.push_slice(&script_num_to_vec(n))
    }
}

/// Minimal little-endian sign-magnitude encoding of a script number.
pub fn script_num_to_vec(n: i64) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }

    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }

    // the top bit carries the sign, so add a byte if it is already used
    if out[out.len() - 1] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        let last = out.len() - 1;
        out[last] |= 0x80;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn script_numbers() {
        assert!(script_num_to_vec(0).is_empty());
        assert_eq!(script_num_to_vec(4), vec![0x04]);
        assert_eq!(script_num_to_vec(-1), vec![0x81]);
        assert_eq!(script_num_to_vec(0x80), vec![0x80, 0x00]);
        assert_eq!(script_num_to_vec(-0x80), vec![0x80, 0x80]);
        assert_eq!(script_num_to_vec(486604799), hex!("ffff001d").to_vec());
    }

    #[test]
    fn push_int_uses_small_opcodes() {
        let script = Script::new().push_int(0).push_int(1).push_int(16).push_int(17);
        assert_eq!(script.as_bytes(), &[0x00, 0x51, 0x60, 0x01, 0x11]);
    }

    #[test]
    fn push_num_always_pushes_data() {
        assert_eq!(Script::new().push_num(4).as_bytes(), &[0x01, 0x04]);
    }

    #[test]
    fn push_slice_lengths() {
        assert_eq!(Script::new().push_slice(&[0xab; 75]).len(), 76);
        let pushdata1 = Script::new().push_slice(&[0xab; 76]);
        assert_eq!(&pushdata1.as_bytes()[..2], &[0x4c, 76]);
        let pushdata2 = Script::new().push_slice(&[0xab; 300]);
        assert_eq!(&pushdata2.as_bytes()[..3], &[0x4d, 0x2c, 0x01]);
    }

    #[test]
    fn pay_to_pubkey() {
        let pubkey = [0x04u8; 65];
        let script = Script::new().push_slice(&pubkey).push_opcode(Opcode::OP_CHECKSIG);
        assert_eq!(script.len(), 67);
        assert_eq!(script.as_bytes()[0], 65);
        assert_eq!(script.as_bytes()[66], 0xac);
    }
}
