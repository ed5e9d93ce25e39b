use crate::{
    errors::{TokenError, TokenResult},
    token_id::TokenId,
};
use serde::{Deserialize, Serialize};

/// Largest `dec` value accepted by BSV-20 indexers
pub const MAX_DECIMALS: u8 = 18;

/// Immutable parameters of a mint covenant, fixed at deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTokenParams")]
pub struct TokenParams {
    id: TokenId,
    symbol: String,
    max_supply: u64,
    decimals: u8,
    max_mint_amount: u64,
    time_delta: u64,
}

impl TokenParams {
    pub fn new(
        id: TokenId,
        symbol: impl Into<String>,
        max_supply: u64,
        decimals: u8,
        max_mint_amount: u64,
        time_delta: u64,
    ) -> TokenResult<Self> {
        let symbol = symbol.into();
        check_metadata(&symbol, decimals, max_mint_amount)?;
        Ok(Self { id, symbol, max_supply, decimals, max_mint_amount, time_delta })
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn max_supply(&self) -> u64 {
        self.max_supply
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn max_mint_amount(&self) -> u64 {
        self.max_mint_amount
    }

    pub fn time_delta(&self) -> u64 {
        self.time_delta
    }
}

pub(crate) fn check_metadata(symbol: &str, decimals: u8, max_mint_amount: u64) -> TokenResult<()> {
    if symbol.is_empty() {
        return Err(TokenError::EmptySymbol);
    }
    if decimals > MAX_DECIMALS {
        return Err(TokenError::InvalidDecimals(decimals, MAX_DECIMALS));
    }
    if max_mint_amount == 0 {
        return Err(TokenError::ZeroMaxMintAmount);
    }
    Ok(())
}

#[derive(Deserialize)]
struct RawTokenParams {
    id: TokenId,
    symbol: String,
    max_supply: u64,
    decimals: u8,
    max_mint_amount: u64,
    time_delta: u64,
}

impl TryFrom<RawTokenParams> for TokenParams {
    type Error = TokenError;

    fn try_from(raw: RawTokenParams) -> TokenResult<Self> {
        Self::new(raw.id, raw.symbol, raw.max_supply, raw.decimals, raw.max_mint_amount, raw.time_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftmint_hashes::Hash;

    #[test]
    fn test_validation() {
        struct Test {
            name: &'static str,
            symbol: &'static str,
            decimals: u8,
            max_mint_amount: u64,
            expected: TokenResult<()>,
        }

        let tests = vec![
            Test { name: "valid", symbol: "MINT", decimals: 8, max_mint_amount: 500, expected: Ok(()) },
            Test { name: "max decimals", symbol: "MINT", decimals: 18, max_mint_amount: 1, expected: Ok(()) },
            Test { name: "empty symbol", symbol: "", decimals: 0, max_mint_amount: 500, expected: Err(TokenError::EmptySymbol) },
            Test {
                name: "too many decimals",
                symbol: "MINT",
                decimals: 19,
                max_mint_amount: 500,
                expected: Err(TokenError::InvalidDecimals(19, MAX_DECIMALS)),
            },
            Test { name: "zero mint amount", symbol: "MINT", decimals: 0, max_mint_amount: 0, expected: Err(TokenError::ZeroMaxMintAmount) },
        ];

        let id = TokenId::from_outpoint(Hash::from_u64_word(1), 0);
        for test in tests {
            let result = TokenParams::new(id, test.symbol, 1000, test.decimals, test.max_mint_amount, 600).map(|_| ());
            assert_eq!(result, test.expected, "test '{}' failed", test.name);
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let id = TokenId::from_outpoint(Hash::from_u64_word(1), 0);
        let params = TokenParams::new(id, "MINT", 1000, 0, 500, 600).unwrap();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(serde_json::from_str::<TokenParams>(&json).unwrap(), params);

        let zero_mint = json.replace("\"max_mint_amount\":500", "\"max_mint_amount\":0");
        assert!(serde_json::from_str::<TokenParams>(&zero_mint).is_err());
    }
}
