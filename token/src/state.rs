use serde::{Deserialize, Serialize};

/// The mutable part of the covenant, carried from one contract output to its successor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenState {
    /// Remaining mintable units
    pub supply: u64,
    /// Lock time of the last accepted mint (or the genesis time)
    pub last_update: u64,
}

impl TokenState {
    pub fn new(supply: u64, last_update: u64) -> Self {
        Self { supply, last_update }
    }

    /// The state of a freshly deployed covenant: nothing minted yet
    pub fn genesis(max_supply: u64, genesis_time: u64) -> Self {
        Self { supply: max_supply, last_update: genesis_time }
    }

    /// Whether the whole supply has been minted
    pub fn is_exhausted(&self) -> bool {
        self.supply == 0
    }
}
