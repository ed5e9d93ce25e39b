//! The mint predicate: validates a proposed spend of a mint covenant output and reconstructs
//! the exact outputs the spending transaction must carry.

use crate::{
    errors::{MintError, MintResult},
    fungible_token::FungibleToken,
    state::TokenState,
};
use ftmint_addresses::Address;
use ftmint_consensus_core::{
    constants::LOCK_TIME_THRESHOLD,
    context::TxContext,
    hashing::outputs::hash_outputs,
    locktime::{LockTimeKind, is_final_sequence},
    tx::TransactionOutput,
};
use ftmint_core::{debug, trace};
use ftmint_hashes::Hash;
use serde::{Deserialize, Serialize};

/// Everything a single mint call supplies: the caller's request and the ledger's view of the
/// spending transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintContext {
    pub destination: Address,
    pub requested_amount: u64,
    pub tx: TxContext,
}

impl MintContext {
    pub fn new(destination: Address, requested_amount: u64, tx: TxContext) -> Self {
        Self { destination, requested_amount, tx }
    }
}

/// An accepted mint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintAcceptance {
    pub next_state: TokenState,
    /// Token units paid to the destination
    pub transferred: u64,
    /// The contract output carrying `next_state`, absent once the supply is exhausted
    pub successor: Option<TransactionOutput>,
    /// The required outputs, in order
    pub outputs: Vec<TransactionOutput>,
    pub outputs_hash: Hash,
}

impl MintAcceptance {
    pub fn is_terminal(&self) -> bool {
        self.successor.is_none()
    }
}

/// A mint covenant output: the token base bound to the state this output carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintPredicate<'a> {
    token: &'a FungibleToken,
    state: TokenState,
}

impl<'a> MintPredicate<'a> {
    /// Use [`FungibleToken::bind`] which validates the state against the token params
    pub(crate) fn new(token: &'a FungibleToken, state: TokenState) -> Self {
        Self { token, state }
    }

    pub fn token(&self) -> &'a FungibleToken {
        self.token
    }

    pub fn state(&self) -> TokenState {
        self.state
    }

    /// Evaluates a mint call. Pure: identical inputs always give identical results
    pub fn evaluate(&self, ctx: &MintContext) -> MintResult<MintAcceptance> {
        self.evaluate_inner(ctx)
            .inspect(|acceptance| {
                trace!(
                    "[{}] mint of {} accepted, supply {} -> {}",
                    self.token.id(),
                    acceptance.transferred,
                    self.state.supply,
                    acceptance.next_state.supply
                );
            })
            .inspect_err(|err| {
                debug!("[{}] mint of {} rejected: {}", self.token.id(), ctx.requested_amount, err);
            })
    }

    fn evaluate_inner(&self, ctx: &MintContext) -> MintResult<MintAcceptance> {
        let params = self.token.params();

        self.check_time_lock(&ctx.tx)?;
        let last_update = ctx.tx.lock_time;

        if ctx.requested_amount > params.max_mint_amount() {
            return Err(MintError::AmountExceedsLimit { requested: ctx.requested_amount, max: params.max_mint_amount() });
        }

        let (next_state, transferred, successor) = if self.state.supply > ctx.requested_amount {
            let next_state = TokenState::new(self.state.supply - ctx.requested_amount, last_update);
            (next_state, ctx.requested_amount, Some(self.token.build_state_output_ft(&next_state)?))
        } else {
            (TokenState::new(0, last_update), self.state.supply, None)
        };

        let transfer = FungibleToken::build_transfer_output(&ctx.destination, &self.token.id(), transferred)?;
        let change = FungibleToken::build_change_output(ctx.tx.change.as_ref());
        let outputs: Vec<_> = successor.iter().cloned().chain(Some(transfer)).chain(change).collect();

        let outputs_hash = hash_outputs(&outputs);
        if outputs_hash != ctx.tx.hash_outputs {
            return Err(MintError::OutputsMismatch { expected: outputs_hash, declared: ctx.tx.hash_outputs });
        }

        Ok(MintAcceptance { next_state, transferred, successor, outputs, outputs_hash })
    }

    /// Lock time checks the ledger enforces on `lock_time >= last_update + time_delta`
    fn check_time_lock(&self, tx: &TxContext) -> MintResult<()> {
        // An unlock point past u64::MAX is never reached
        let Some(unlock) = self.state.last_update.checked_add(self.token.params().time_delta()) else {
            return Err(MintError::ThrottleViolation { lock_time: tx.lock_time, unlock: u64::MAX });
        };

        if unlock < LOCK_TIME_THRESHOLD && LockTimeKind::of(tx.lock_time) != LockTimeKind::BlockHeight {
            return Err(MintError::LockTimeKindMismatch { lock_time: tx.lock_time, unlock });
        }
        if is_final_sequence(tx.sequence) {
            return Err(MintError::FinalSequence);
        }
        if tx.lock_time < unlock {
            return Err(MintError::ThrottleViolation { lock_time: tx.lock_time, unlock });
        }
        Ok(())
    }
}
