//! BSV-20 v2 fungible token minting under a covenant.
//!
//! A deployed token locks its remaining supply in a contract output. Every mint spends that
//! output, pays the minted units to a destination and, unless the supply is exhausted, recreates
//! the contract output with the decreased supply. [`MintPredicate`] decides whether such a spend
//! is valid, [`MintCallBuilder`] assembles one.

pub mod builder;
pub mod config;
pub mod errors;
pub mod fungible_token;
pub mod params;
pub mod predicate;
pub mod state;
pub mod token_id;

pub use builder::{MintCall, MintCallBuilder};
pub use config::DeployConfig;
pub use errors::{MintError, MintResult, RejectKind, TokenError, TokenResult};
pub use fungible_token::FungibleToken;
pub use params::TokenParams;
pub use predicate::{MintAcceptance, MintContext, MintPredicate};
pub use state::TokenState;
pub use token_id::TokenId;
