use crate::errors::{TokenError, TokenResult};
use ftmint_consensus_core::tx::{TransactionId, TransactionOutpoint};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// BSV-20 v2 token id: the outpoint of the deploy output, rendered `<txid>_<vout>`
/// with the txid in display (byte reversed) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(TransactionOutpoint);

impl TokenId {
    pub fn from_outpoint(transaction_id: TransactionId, index: u32) -> Self {
        Self(TransactionOutpoint::new(transaction_id, index))
    }

    pub fn outpoint(&self) -> TransactionOutpoint {
        self.0
    }
}

impl From<TransactionOutpoint> for TokenId {
    fn from(outpoint: TransactionOutpoint) -> Self {
        Self(outpoint)
    }
}

impl Display for TokenId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.0.transaction_id.reversed(), self.0.index)
    }
}

impl FromStr for TokenId {
    type Err = TokenError;

    fn from_str(s: &str) -> TokenResult<Self> {
        let invalid = || TokenError::InvalidTokenId(s.to_string());
        let (txid, vout) = s.split_once('_').ok_or_else(invalid)?;
        let txid = TransactionId::from_str(txid).map_err(|_| invalid())?;
        // Leading signs and zero padding would give one outpoint several ids
        if vout.is_empty() || !vout.bytes().all(|b| b.is_ascii_digit()) || (vout.len() > 1 && vout.starts_with('0')) {
            return Err(invalid());
        }
        let vout = vout.parse::<u32>().map_err(|_| invalid())?;
        Ok(Self::from_outpoint(txid.reversed(), vout))
    }
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        TokenId::from_str(&s).map_err(serde::de::Error::custom)
    }
}
