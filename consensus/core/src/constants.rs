/// Current transaction version
pub const TX_VERSION: u32 = 1;

/// An input sequence equal to this value is final and disables lock time enforcement
pub const MAX_TX_IN_SEQUENCE_NUM: u32 = u32::MAX;

/// Lock times below this threshold are block heights, at or above it they are unix timestamps
pub const LOCK_TIME_THRESHOLD: u64 = 500_000_000;

/// Value (in satoshis) carried by token outputs. Each token output is a single inscribed satoshi
pub const TOKEN_OUTPUT_VALUE: u64 = 1;
