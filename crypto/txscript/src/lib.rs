pub mod errors;
pub mod inscription;
pub mod opcodes;
pub mod script_builder;
pub mod script_num;
pub mod script_parser;
pub mod standard;

pub use errors::{TxScriptError, TxScriptResult};
pub use inscription::Inscription;
pub use script_builder::{ScriptBuilder, ScriptBuilderError, ScriptBuilderResult};
pub use standard::{extract_script_pub_key_address, pay_to_address_script};

/// Largest script the builder will produce. Scripts are unbounded by consensus after the
/// Genesis upgrade, this is the common relay policy cap.
pub const MAX_SCRIPTS_SIZE: usize = 10_000_000;

/// Largest single data push the builder will produce
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 100_000;
