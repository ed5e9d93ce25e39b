use crate::{
    errors::{TokenError, TokenResult},
    params::TokenParams,
    state::TokenState,
    token_id::TokenId,
};
use ftmint_addresses::Prefix;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of a token deployment, usually loaded from a TOML file:
///
/// ```toml
/// symbol = "MINT"
/// max_supply = 21000000
/// decimals = 8
/// max_mint_amount = 1000
/// time_delta = 144
/// genesis_time = 850000
/// network = "mainnet"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    pub symbol: String,
    pub max_supply: u64,
    #[serde(default)]
    pub decimals: u8,
    pub max_mint_amount: u64,
    pub time_delta: u64,
    #[serde(default)]
    pub genesis_time: u64,
    /// Network the mint destinations and change addresses must belong to, see [`MintCallBuilder::network`]
    ///
    /// [`MintCallBuilder::network`]: crate::MintCallBuilder::network
    #[serde(default = "default_network")]
    pub network: Prefix,
}

fn default_network() -> Prefix {
    Prefix::Mainnet
}

impl DeployConfig {
    pub fn from_toml_str(s: &str) -> TokenResult<Self> {
        toml::from_str(s).map_err(|err| TokenError::Config(err.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> TokenResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| TokenError::Config(format!("{}: {err}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> TokenResult<String> {
        toml::to_string(self).map_err(|err| TokenError::Config(err.to_string()))
    }

    pub fn genesis_state(&self) -> TokenState {
        TokenState::genesis(self.max_supply, self.genesis_time)
    }

    /// Fixes the deployment under `id`, the outpoint of its genesis output
    pub fn validate(&self, id: TokenId) -> TokenResult<(TokenParams, TokenState)> {
        let params = TokenParams::new(id, self.symbol.clone(), self.max_supply, self.decimals, self.max_mint_amount, self.time_delta)?;
        Ok((params, self.genesis_state()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftmint_hashes::Hash;

    const CONFIG: &str = r#"
symbol = "MINT"
max_supply = 21000000
decimals = 8
max_mint_amount = 1000
time_delta = 144
genesis_time = 850000
network = "testnet"
"#;

    #[test]
    fn test_from_toml() {
        let config = DeployConfig::from_toml_str(CONFIG).unwrap();
        assert_eq!(
            config,
            DeployConfig {
                symbol: "MINT".to_string(),
                max_supply: 21_000_000,
                decimals: 8,
                max_mint_amount: 1000,
                time_delta: 144,
                genesis_time: 850_000,
                network: Prefix::Testnet,
            }
        );
        assert_eq!(DeployConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap(), config);
    }

    #[test]
    fn test_defaults() {
        let config = DeployConfig::from_toml_str("symbol = \"X\"\nmax_supply = 10\nmax_mint_amount = 1\ntime_delta = 0\n").unwrap();
        assert_eq!(config.decimals, 0);
        assert_eq!(config.genesis_time, 0);
        assert_eq!(config.network, Prefix::Mainnet);
    }

    #[test]
    fn test_invalid_configs() {
        struct Test {
            name: &'static str,
            toml: String,
        }

        let tests = vec![
            Test { name: "missing supply", toml: CONFIG.replace("max_supply = 21000000\n", "") },
            Test { name: "unknown field", toml: format!("{CONFIG}premine = 5\n") },
            Test { name: "unknown network", toml: CONFIG.replace("testnet", "regtest") },
            Test { name: "negative delta", toml: CONFIG.replace("144", "-1") },
        ];

        for test in tests {
            assert!(matches!(DeployConfig::from_toml_str(&test.toml), Err(TokenError::Config(_))), "test '{}' should fail", test.name);
        }
        assert!(matches!(DeployConfig::load("/nonexistent/ftmint-deploy.toml"), Err(TokenError::Config(_))));
    }

    #[test]
    fn test_validate() {
        let id = TokenId::from_outpoint(Hash::from_u64_word(8), 0);
        let config = DeployConfig::from_toml_str(CONFIG).unwrap();
        let (params, state) = config.validate(id).unwrap();
        assert_eq!(params.id(), id);
        assert_eq!(params.max_supply(), 21_000_000);
        assert_eq!(state, TokenState::new(21_000_000, 850_000));

        let config = DeployConfig { max_mint_amount: 0, ..config };
        assert_eq!(config.validate(id), Err(TokenError::ZeroMaxMintAmount));
    }
}
