use ftmint_addresses::Prefix;
use ftmint_consensus_core::errors::TxError;
use ftmint_hashes::Hash;
use ftmint_txscript::ScriptBuilderError;
use thiserror::Error;

/// Invalid token parameters, state or configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("max mint amount must be positive")]
    ZeroMaxMintAmount,

    #[error("decimals {0} exceed the maximum of {1}")]
    InvalidDecimals(u8, u8),

    #[error("token symbol is empty")]
    EmptySymbol,

    #[error("supply {supply} exceeds the max supply {max_supply}")]
    SupplyExceedsMax { supply: u64, max_supply: u64 },

    #[error("invalid token id '{0}', expected <txid>_<vout>")]
    InvalidTokenId(String),

    #[error("malformed state output: {0}")]
    MalformedStateOutput(String),

    #[error("deploy configuration error: {0}")]
    Config(String),

    #[error("address on {found} does not belong to the {expected} deployment")]
    NetworkMismatch { expected: Prefix, found: Prefix },

    #[error(transparent)]
    ScriptBuilder(#[from] ScriptBuilderError),

    #[error(transparent)]
    Tx(#[from] TxError),
}

pub type TokenResult<T> = std::result::Result<T, TokenError>;

/// Coarse classification of mint rejections. Every rejection is final, the kind only serves diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectKind {
    Throttle,
    Amount,
    Outputs,
}

/// Reasons a mint call is rejected, in check order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MintError {
    #[error("time lock not yet expired: lock time {lock_time} is before {unlock}")]
    ThrottleViolation { lock_time: u64, unlock: u64 },

    #[error("lock time {lock_time} is a timestamp while the unlock point {unlock} is a block height")]
    LockTimeKindMismatch { lock_time: u64, unlock: u64 },

    #[error("the contract input has a final sequence, lock time is not enforced")]
    FinalSequence,

    #[error("mint amount {requested} exceeds maximum {max}")]
    AmountExceedsLimit { requested: u64, max: u64 },

    #[error("hashOutputs mismatch: expected {expected}, declared {declared}")]
    OutputsMismatch { expected: Hash, declared: Hash },

    #[error("cannot construct the required outputs: {0}")]
    OutputConstruction(#[from] ScriptBuilderError),
}

impl MintError {
    pub fn kind(&self) -> RejectKind {
        match self {
            MintError::ThrottleViolation { .. } | MintError::LockTimeKindMismatch { .. } | MintError::FinalSequence => {
                RejectKind::Throttle
            }
            MintError::AmountExceedsLimit { .. } => RejectKind::Amount,
            MintError::OutputsMismatch { .. } | MintError::OutputConstruction(_) => RejectKind::Outputs,
        }
    }
}

pub type MintResult<T> = std::result::Result<T, MintError>;
