use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error("transaction input index {0} >= {1}")]
    InputIndexOutOfRange(usize, usize),
}

pub type TxResult<T> = std::result::Result<T, TxError>;
