use thiserror::Error;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum TxScriptError {
    #[error("invalid opcode length: {0:02x?}")]
    MalformedPushSize(Vec<u8>),
    #[error("opcode requires {0} bytes, but script only has {1} remaining")]
    MalformedPush(usize, usize),
    #[error("push encoding is not minimal: {0}")]
    NotMinimalData(String),
    #[error("Number too big: {0}")]
    NumberTooBig(String),
    #[error("unsupported public key type")]
    PubKeyFormat,
    #[error("expected a data push, found opcode {0:#04x}")]
    ExpectedDataPush(u8),
}

pub type TxScriptResult<T> = std::result::Result<T, TxScriptError>;
