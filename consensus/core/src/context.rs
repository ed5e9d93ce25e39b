use crate::{
    errors::{TxError, TxResult},
    tx::Transaction,
};
use ftmint_addresses::Address;
use ftmint_hashes::Hash;
use serde::{Deserialize, Serialize};

/// Change declared by the spender of a covenant. The covenant rebuilds the change output
/// from it when reconstructing the outputs commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeOutput {
    pub address: Address,
    pub amount: u64,
}

impl ChangeOutput {
    pub fn new(address: Address, amount: u64) -> Self {
        Self { address, amount }
    }
}

/// The ledger-supplied view of the spending transaction, as seen by the input being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxContext {
    pub lock_time: u64,
    /// Sequence of the input being validated
    pub sequence: u32,
    /// `hash256` over the serialized outputs of the spending transaction
    pub hash_outputs: Hash,
    pub change: Option<ChangeOutput>,
}

impl TxContext {
    pub fn new(lock_time: u64, sequence: u32, hash_outputs: Hash, change: Option<ChangeOutput>) -> Self {
        Self { lock_time, sequence, hash_outputs, change }
    }

    /// Builds the context of input `input_index` of `tx`
    pub fn from_transaction(tx: &Transaction, input_index: usize, change: Option<ChangeOutput>) -> TxResult<Self> {
        let input = tx.inputs.get(input_index).ok_or(TxError::InputIndexOutOfRange(input_index, tx.inputs.len()))?;
        Ok(Self { lock_time: tx.lock_time as u64, sequence: input.sequence, hash_outputs: tx.outputs_hash(), change })
    }
}
