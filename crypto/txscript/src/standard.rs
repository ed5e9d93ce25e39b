use crate::{
    errors::TxScriptError,
    opcodes::codes::{OpCheckSig, OpData20, OpDup, OpEqualVerify, OpHash160},
};
use ftmint_addresses::{Address, Prefix};
use ftmint_consensus_core::tx::{ScriptPublicKey, ScriptVec};
use ftmint_hashes::{HASH160_SIZE, Hash160};
use smallvec::SmallVec;

/// Length of a pay-to-pubkey-hash locking script
pub const P2PKH_SCRIPT_LEN: usize = 25;

/// Creates a new script to pay a transaction output to a 20-byte pubkey hash.
fn pay_to_pub_key_hash(pub_key_hash: &Hash160) -> ScriptVec {
    SmallVec::from_iter(
        [OpDup, OpHash160, OpData20]
            .into_iter()
            .chain(pub_key_hash.as_slice().iter().copied())
            .chain([OpEqualVerify, OpCheckSig]),
    )
}

/// Creates a new script to pay a transaction output to the specified address.
pub fn pay_to_address_script(address: &Address) -> ScriptPublicKey {
    ScriptPublicKey::new(pay_to_pub_key_hash(&address.hash))
}

/// Whether the script is exactly `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`
pub fn is_pay_to_pub_key_hash(script: &[u8]) -> bool {
    script.len() == P2PKH_SCRIPT_LEN
        && script[..3] == [OpDup, OpHash160, OpData20]
        && script[23..] == [OpEqualVerify, OpCheckSig]
}

/// Returns the address encoded in a script public key.
///
/// Only pay-to-pubkey-hash scripts carry an address, any other script
/// returns the `TxScriptError::PubKeyFormat` error.
pub fn extract_script_pub_key_address(script_public_key: &ScriptPublicKey, prefix: Prefix) -> Result<Address, TxScriptError> {
    let script = script_public_key.script();
    if !is_pay_to_pub_key_hash(script) {
        return Err(TxScriptError::PubKeyFormat);
    }
    let hash = Hash160::try_from(&script[3..3 + HASH160_SIZE]).map_err(|_| TxScriptError::PubKeyFormat)?;
    Ok(Address::new(prefix, hash))
}
