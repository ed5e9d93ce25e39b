use super::write_output;
use crate::tx::TransactionOutput;
use ftmint_hashes::{Hash, Hasher, Sha256d};

/// Concatenation of the serialized outputs, in order. The empty slice serializes to zero bytes
pub fn serialize_outputs<'a>(outputs: impl IntoIterator<Item = &'a TransactionOutput>) -> Vec<u8> {
    let mut buffer = Vec::new();
    for output in outputs {
        write_output(&mut buffer, output);
    }
    buffer
}

/// `hash256` over the concatenated serialized outputs. This is the value a spending
/// transaction commits to as its outputs digest.
pub fn hash_outputs<'a>(outputs: impl IntoIterator<Item = &'a TransactionOutput>) -> Hash {
    let mut hasher = Sha256d::new();
    for output in outputs {
        write_output(&mut hasher, output);
    }
    hasher.finalize()
}
