use std::collections::HashMap;
use thiserror::Error;

/// A `U256` has at most 78 decimal digits.
const MAX_DECIMALS: u32 = 77;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Decimals of the quote token (USDC) used when presenting amounts.
    pub quote_decimals: u32,
    /// Decimals used when presenting the bought asset quantity.
    pub buy_token_decimals: u32,
    pub log_filter: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quote_decimals: 6,
            buy_token_decimals: 18,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let quote_decimals =
            parse_decimals(&env_map, "QUOTE_TOKEN_DECIMALS", defaults.quote_decimals)?;
        let buy_token_decimals =
            parse_decimals(&env_map, "BUY_TOKEN_DECIMALS", defaults.buy_token_decimals)?;

        let log_filter = env_map
            .get("RUST_LOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Config {
            quote_decimals,
            buy_token_decimals,
            log_filter,
        })
    }
}

fn parse_decimals(
    env_map: &HashMap<String, String>,
    key: &str,
    default: u32,
) -> Result<u32, ConfigError> {
    let Some(raw) = env_map.get(key) else {
        return Ok(default);
    };

    let decimals = raw.trim().parse::<u32>().map_err(|_| {
        ConfigError::InvalidValue(key.to_string(), "must be a valid u32".to_string())
    })?;

    if decimals > MAX_DECIMALS {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("must be at most {}, got {}", MAX_DECIMALS, decimals),
        ));
    }

    Ok(decimals)
}
