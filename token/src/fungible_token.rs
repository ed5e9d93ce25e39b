//! The generic BSV-20 v2 token base: immutable metadata plus the output builders a
//! covenant uses to recreate the outputs it requires.

use crate::{
    config::DeployConfig,
    errors::{TokenError, TokenResult},
    params::{TokenParams, check_metadata},
    predicate::MintPredicate,
    state::TokenState,
    token_id::TokenId,
};
use ftmint_addresses::Address;
use ftmint_consensus_core::{
    constants::TOKEN_OUTPUT_VALUE,
    context::ChangeOutput,
    tx::{ScriptPublicKey, ScriptVec, TransactionOutput},
};
use ftmint_txscript::{
    Inscription, ScriptBuilder, ScriptBuilderResult,
    inscription::BSV20_CONTENT_TYPE,
    opcodes::codes::OpReturn,
    pay_to_address_script,
    script_parser::parse_script,
};

/// Version byte closing the state section of a contract output
pub const STATE_VERSION: u8 = 0;

/// Bytes following the state pushes: 4-byte state length and the version byte
const STATE_TRAILER_LEN: usize = 5;

/// BSV-20 `transfer` inscription content: `{"p":"bsv-20","op":"transfer","id":"<id>","amt":"<amt>"}`
pub fn transfer_inscription_json(id: &TokenId, amount: u64) -> Vec<u8> {
    format!(r#"{{"p":"bsv-20","op":"transfer","id":"{id}","amt":"{amount}"}}"#).into_bytes()
}

/// BSV-20 `deploy+mint` inscription content: `{"p":"bsv-20","op":"deploy+mint","sym":..,"amt":..,"dec":..}`
pub fn deploy_inscription_json(symbol: &str, max_supply: u64, decimals: u8) -> Vec<u8> {
    // The symbol is the only free-form field and renders as a quoted, escaped JSON string
    let symbol = serde_json::Value::from(symbol);
    format!(r#"{{"p":"bsv-20","op":"deploy+mint","sym":{symbol},"amt":"{max_supply}","dec":"{decimals}"}}"#).into_bytes()
}

/// Appends `OP_RETURN <supply> <last_update> <state len: 4 bytes LE> <version>`
fn write_state<'b>(builder: &'b mut ScriptBuilder, state: &TokenState) -> ScriptBuilderResult<&'b mut ScriptBuilder> {
    let state_data = ScriptBuilder::new().add_u64(state.supply)?.add_u64(state.last_update)?.drain();
    builder
        .add_op(OpReturn)?
        .append_script(&state_data)?
        .append_script(&(state_data.len() as u32).to_le_bytes())?
        .append_script(&[STATE_VERSION])
}

/// Token metadata composed with the compiled covenant code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FungibleToken {
    params: TokenParams,
    covenant_script: ScriptVec,
}

impl FungibleToken {
    pub fn new(params: TokenParams, covenant_script: ScriptVec) -> Self {
        Self { params, covenant_script }
    }

    pub fn params(&self) -> &TokenParams {
        &self.params
    }

    pub fn id(&self) -> TokenId {
        self.params.id()
    }

    pub fn covenant_script(&self) -> &[u8] {
        &self.covenant_script
    }

    /// Binds the token to a concrete contract state, yielding the mint predicate of that contract output
    pub fn bind(&self, state: TokenState) -> TokenResult<MintPredicate<'_>> {
        if state.supply > self.params.max_supply() {
            return Err(TokenError::SupplyExceedsMax { supply: state.supply, max_supply: self.params.max_supply() });
        }
        Ok(MintPredicate::new(self, state))
    }

    /// Ord envelope tagging an output with `amount` units of the token `id`
    pub fn transfer_inscription(id: &TokenId, amount: u64) -> ScriptBuilderResult<Vec<u8>> {
        Inscription::new(BSV20_CONTENT_TYPE, &transfer_inscription_json(id, amount)).envelope()
    }

    /// The successor contract output carrying `state`:
    /// `transfer-inscription(id, supply) || covenant || OP_RETURN || state`
    pub fn build_state_output_ft(&self, state: &TokenState) -> ScriptBuilderResult<TransactionOutput> {
        let mut builder = ScriptBuilder::new();
        Inscription::new(BSV20_CONTENT_TYPE, &transfer_inscription_json(&self.id(), state.supply)).write_envelope(&mut builder)?;
        builder.append_script(&self.covenant_script)?;
        write_state(&mut builder, state)?;
        Ok(TransactionOutput::new(TOKEN_OUTPUT_VALUE, ScriptPublicKey::from_vec(builder.drain())))
    }

    /// A 1-satoshi P2PKH output to `destination` inscribed with `amount` units of `id`
    pub fn build_transfer_output(destination: &Address, id: &TokenId, amount: u64) -> ScriptBuilderResult<TransactionOutput> {
        let mut builder = ScriptBuilder::new();
        Inscription::new(BSV20_CONTENT_TYPE, &transfer_inscription_json(id, amount)).write_envelope(&mut builder)?;
        builder.append_script(pay_to_address_script(destination).script())?;
        Ok(TransactionOutput::new(TOKEN_OUTPUT_VALUE, ScriptPublicKey::from_vec(builder.drain())))
    }

    /// The spender's change output, absent when no change is declared or its amount is zero
    pub fn build_change_output(change: Option<&ChangeOutput>) -> Option<TransactionOutput> {
        change.filter(|change| change.amount > 0).map(|change| TransactionOutput::new(change.amount, pay_to_address_script(&change.address)))
    }

    /// Ord envelope of the deploy inscription
    pub fn deploy_inscription(symbol: &str, max_supply: u64, decimals: u8) -> ScriptBuilderResult<Vec<u8>> {
        Inscription::new(BSV20_CONTENT_TYPE, &deploy_inscription_json(symbol, max_supply, decimals)).envelope()
    }

    /// The genesis contract output of a deployment:
    /// `deploy-inscription || covenant || OP_RETURN || genesis state`.
    /// The token id becomes known only once the deploy transaction is, see [`TokenId::from_outpoint`].
    pub fn deploy_output(config: &DeployConfig, covenant_script: &[u8]) -> TokenResult<TransactionOutput> {
        check_metadata(&config.symbol, config.decimals, config.max_mint_amount)?;
        let mut builder = ScriptBuilder::new();
        Inscription::new(BSV20_CONTENT_TYPE, &deploy_inscription_json(&config.symbol, config.max_supply, config.decimals))
            .write_envelope(&mut builder)?;
        builder.append_script(covenant_script)?;
        write_state(&mut builder, &config.genesis_state())?;
        Ok(TransactionOutput::new(TOKEN_OUTPUT_VALUE, ScriptPublicKey::from_vec(builder.drain())))
    }

    /// Recovers the state carried by one of this token's contract outputs
    pub fn decode_state_output(&self, script: &[u8]) -> TokenResult<TokenState> {
        let malformed = |reason: &str| TokenError::MalformedStateOutput(reason.to_string());

        let (inscription, rest) = Inscription::split(script)
            .map_err(|err| TokenError::MalformedStateOutput(err.to_string()))?
            .ok_or_else(|| malformed("missing inscription envelope"))?;
        let rest = rest.strip_prefix(self.covenant_script.as_slice()).ok_or_else(|| malformed("covenant code mismatch"))?;
        let rest = rest.strip_prefix(&[OpReturn]).ok_or_else(|| malformed("missing OP_RETURN"))?;
        if rest.len() < STATE_TRAILER_LEN {
            return Err(malformed("truncated state"));
        }

        let (state_data, trailer) = rest.split_at(rest.len() - STATE_TRAILER_LEN);
        if trailer[4] != STATE_VERSION {
            return Err(TokenError::MalformedStateOutput(format!("unknown state version {}", trailer[4])));
        }
        let declared_len = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]) as usize;
        if declared_len != state_data.len() {
            return Err(TokenError::MalformedStateOutput(format!("state length {} declared as {declared_len}", state_data.len())));
        }

        let mut fields = Vec::with_capacity(2);
        for parsed in parse_script(state_data) {
            let value = parsed.and_then(|p| p.as_number()).map_err(|err| TokenError::MalformedStateOutput(err.to_string()))?;
            fields.push(u64::try_from(value).map_err(|_| malformed("state field out of range"))?);
        }
        let [supply, last_update] = fields[..] else {
            return Err(TokenError::MalformedStateOutput(format!("expected 2 state fields, found {}", fields.len())));
        };

        if inscription.content_type != BSV20_CONTENT_TYPE || inscription.content != transfer_inscription_json(&self.id(), supply) {
            return Err(malformed("inscription does not match the carried supply"));
        }
        Ok(TokenState::new(supply, last_update))
    }
}
