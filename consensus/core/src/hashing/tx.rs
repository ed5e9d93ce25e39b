use super::{HasherExtensions, write_output};
use crate::tx::{Transaction, TransactionId, TransactionInput, TransactionOutpoint};
use ftmint_hashes::{Hasher, HasherBase, Sha256d};

/// Not intended for direct use by clients. Instead use `tx.id()`
pub fn id(tx: &Transaction) -> TransactionId {
    let mut hasher = Sha256d::new();
    write_transaction(&mut hasher, tx);
    hasher.finalize()
}

/// Returns the full wire serialization of the transaction
pub fn serialize(tx: &Transaction) -> Vec<u8> {
    let mut buffer = Vec::new();
    write_transaction(&mut buffer, tx);
    buffer
}

/// Write the transaction into the provided hasher in wire order
fn write_transaction<T: HasherBase>(hasher: &mut T, tx: &Transaction) {
    hasher.write_u32(tx.version).write_len(tx.inputs.len());
    for input in tx.inputs.iter() {
        write_input(hasher, input);
    }

    hasher.write_len(tx.outputs.len());
    for output in tx.outputs.iter() {
        write_output(hasher, output);
    }

    hasher.write_u32(tx.lock_time);
}

#[inline(always)]
fn write_input<T: HasherBase>(hasher: &mut T, input: &TransactionInput) {
    write_outpoint(hasher, &input.previous_outpoint);
    hasher.write_var_bytes(&input.signature_script).write_u32(input.sequence);
}

#[inline(always)]
fn write_outpoint<T: HasherBase>(hasher: &mut T, outpoint: &TransactionOutpoint) {
    hasher.update(outpoint.transaction_id).write_u32(outpoint.index);
}
