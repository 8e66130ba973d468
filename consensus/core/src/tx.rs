//!
//! # Transaction
//!
//! Bitcoin-format transactions, enough to assemble and identify a coinbase.
//!

use serde::{Deserialize, Serialize};
use sst_hashes::HashWriter;
use std::io::{self, Write};

use crate::script::Script;
use crate::{Amount, Hash, ZERO_HASH};

/// A transaction identifier: SHA-256d of the serialized transaction.
pub type TransactionId = Hash;

pub const CURRENT_TX_VERSION: i32 = 1;

pub const SEQUENCE_FINAL: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: u32,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }

    /// The outpoint referenced by a coinbase input
    pub fn null() -> Self {
        Self { transaction_id: ZERO_HASH, index: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        self.transaction_id.is_zero() && self.index == u32::MAX
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub signature_script: Script,
    pub sequence: u32,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint, signature_script: Script, sequence: u32) -> Self {
        Self { previous_outpoint, signature_script, sequence }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Amount,
    pub script_public_key: Script,
}

impl TransactionOutput {
    pub fn new(value: Amount, script_public_key: Script) -> Self {
        Self { value, script_public_key }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn new(version: i32, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u32) -> Self {
        Self { version, inputs, outputs, lock_time }
    }

    /// A coinbase spends nothing: exactly one input with a null outpoint.
    pub fn new_coinbase(signature_script: Script, outputs: Vec<TransactionOutput>) -> Self {
        let input = TransactionInput::new(TransactionOutpoint::null(), signature_script, SEQUENCE_FINAL);
        Self::new(CURRENT_TX_VERSION, vec![input], outputs, 0)
    }

    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_outpoint.is_null()
    }

    pub fn serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.version.to_le_bytes())?;
        write_compact_size(writer, self.inputs.len() as u64)?;
        for input in &self.inputs {
            writer.write_all(input.previous_outpoint.transaction_id.as_bytes())?;
            writer.write_all(&input.previous_outpoint.index.to_le_bytes())?;
            write_var_bytes(writer, input.signature_script.as_bytes())?;
            writer.write_all(&input.sequence.to_le_bytes())?;
        }
        write_compact_size(writer, self.outputs.len() as u64)?;
        for output in &self.outputs {
            writer.write_all(&output.value.to_le_bytes())?;
            write_var_bytes(writer, output.script_public_key.as_bytes())?;
        }
        writer.write_all(&self.lock_time.to_le_bytes())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.serialize(&mut buf);
        buf
    }

    pub fn id(&self) -> TransactionId {
        let mut writer = HashWriter::new();
        let _ = self.serialize(&mut writer);
        writer.finalize()
    }
}

pub fn write_compact_size<W: Write>(writer: &mut W, n: u64) -> io::Result<()> {
    match n {
        0..=0xfc => writer.write_all(&[n as u8]),
        0xfd..=0xffff => {
            writer.write_all(&[0xfd])?;
            writer.write_all(&(n as u16).to_le_bytes())
        }
        0x1_0000..=0xffff_ffff => {
            writer.write_all(&[0xfe])?;
            writer.write_all(&(n as u32).to_le_bytes())
        }
        _ => {
            writer.write_all(&[0xff])?;
            writer.write_all(&n.to_le_bytes())
        }
    }
}

fn write_var_bytes<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    write_compact_size(writer, bytes.len() as u64)?;
    writer.write_all(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Opcode;
    use sst_hashes::double_sha256;

    fn compact(n: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        write_compact_size(&mut buf, n).unwrap();
        buf
    }

    #[test]
    fn compact_size_boundaries() {
        assert_eq!(compact(0xfc), vec![0xfc]);
        assert_eq!(compact(0xfd), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(compact(0x1_0000), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(compact(0x1_0000_0000).len(), 9);
    }

    #[test]
    fn coinbase_layout() {
        let script_sig = Script::new().push_slice(b"hi");
        let output = TransactionOutput::new(50, Script::new().push_opcode(Opcode::OP_CHECKSIG));
        let tx = Transaction::new_coinbase(script_sig, vec![output]);
        assert!(tx.is_coinbase());

        let bytes = tx.to_bytes();
        // version, 1 input, null outpoint
        assert_eq!(&bytes[..5], &[1, 0, 0, 0, 1]);
        assert!(bytes[5..37].iter().all(|b| *b == 0));
        assert_eq!(&bytes[37..41], &[0xff; 4]);
        // script sig: len 3, push 2 bytes
        assert_eq!(&bytes[41..45], &[3, 2, b'h', b'i']);
        assert_eq!(&bytes[45..49], &[0xff; 4]);
        // 1 output of 50 base units paying to OP_CHECKSIG, lock time 0
        assert_eq!(bytes[49], 1);
        assert_eq!(&bytes[50..58], &50i64.to_le_bytes());
        assert_eq!(&bytes[58..60], &[1, 0xac]);
        assert_eq!(&bytes[60..], &[0, 0, 0, 0]);

        assert_eq!(tx.id(), double_sha256(&bytes));
    }

    #[test]
    fn spending_input_is_not_coinbase() {
        let input = TransactionInput::new(TransactionOutpoint::new(Hash::from_u64_word(7), 0), Script::new(), SEQUENCE_FINAL);
        let tx = Transaction::new(CURRENT_TX_VERSION, vec![input], vec![], 0);
        assert!(!tx.is_coinbase());
    }
}
