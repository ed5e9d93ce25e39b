mod script_public_key;

use crate::hashing;
use ftmint_hashes::Hash;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub use script_public_key::{SCRIPT_VECTOR_SIZE, ScriptPublicKey, ScriptVec, scriptvec};

/// Represents the ID of a transaction. Stored in digest byte order
pub type TransactionId = Hash;

/// Represents a transaction outpoint
#[derive(Eq, Hash, PartialEq, Debug, Copy, Clone, Serialize, Deserialize)]
pub struct TransactionOutpoint {
    pub transaction_id: TransactionId,
    pub index: u32,
}

impl TransactionOutpoint {
    pub fn new(transaction_id: TransactionId, index: u32) -> Self {
        Self { transaction_id, index }
    }
}

impl Display for TransactionOutpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.transaction_id.reversed(), self.index)
    }
}

/// Represents a transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub previous_outpoint: TransactionOutpoint,
    pub signature_script: Vec<u8>,
    pub sequence: u32,
}

impl TransactionInput {
    pub fn new(previous_outpoint: TransactionOutpoint, signature_script: Vec<u8>, sequence: u32) -> Self {
        Self { previous_outpoint, signature_script, sequence }
    }
}

/// Represents a transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: u64,
    pub script_public_key: ScriptPublicKey,
}

impl TransactionOutput {
    pub fn new(value: u64, script_public_key: ScriptPublicKey) -> Self {
        Self { value, script_public_key }
    }

    /// Wire serialization: `value (8 bytes LE) || varint(script len) || script`
    pub fn serialize(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(8 + 9 + self.script_public_key.len());
        hashing::write_output(&mut buffer, self);
        buffer
    }
}

/// Represents a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn new(version: u32, inputs: Vec<TransactionInput>, outputs: Vec<TransactionOutput>, lock_time: u32) -> Self {
        Self { version, inputs, outputs, lock_time }
    }

    /// Returns the transaction ID
    pub fn id(&self) -> TransactionId {
        hashing::tx::id(self)
    }

    /// Returns the commitment to all outputs of this transaction
    pub fn outputs_hash(&self) -> Hash {
        hashing::outputs::hash_outputs(&self.outputs)
    }
}
