//! Runtime configuration read from the environment (and `.env`)

use std::time::Duration;
use thiserror::Error;

use crate::services::SessionConfig;
use crate::utils::retry::RetryPolicy;

const DEFAULT_DATABASE_URL: &str = "sqlite://ledger_session.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set in .env file")]
    Missing(&'static str),
    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Wallet bridge endpoint. Unset means no wallet provider is installed.
    pub wallet_rpc_url: Option<String>,
    pub ledger_rpc_url: String,
    pub ledger_contract_address: String,
    pub database_url: String,
    pub rpc_timeout: Duration,
    pub receipt_poll_interval: Duration,
    pub read_retry_attempts: u32,
}

impl Config {
    /// Load from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            wallet_rpc_url: non_empty("WALLET_RPC_URL"),
            ledger_rpc_url: non_empty("LEDGER_RPC_URL").ok_or(ConfigError::Missing("LEDGER_RPC_URL"))?,
            ledger_contract_address: non_empty("LEDGER_CONTRACT_ADDRESS")
                .ok_or(ConfigError::Missing("LEDGER_CONTRACT_ADDRESS"))?,
            database_url: non_empty("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            rpc_timeout: Duration::from_secs(parse_or("RPC_TIMEOUT_SECS", non_empty("RPC_TIMEOUT_SECS"), 30)?),
            receipt_poll_interval: Duration::from_millis(parse_or(
                "RECEIPT_POLL_MS",
                non_empty("RECEIPT_POLL_MS"),
                1000,
            )?),
            read_retry_attempts: parse_or("READ_RETRY_ATTEMPTS", non_empty("READ_RETRY_ATTEMPTS"), 3)?,
        })
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            read_retry: RetryPolicy {
                max_attempts: self.read_retry_attempts.max(1),
                ..RetryPolicy::default()
            },
        }
    }
}

fn parse_or<T: std::str::FromStr>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { name, value: v }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("LEDGER_RPC_URL", "http://localhost:8545"),
            ("LEDGER_CONTRACT_ADDRESS", "0xC0"),
        ]))
        .unwrap();

        assert_eq!(config.wallet_rpc_url, None);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.rpc_timeout, Duration::from_secs(30));
        assert_eq!(config.receipt_poll_interval, Duration::from_millis(1000));
        assert_eq!(config.session_config().read_retry.max_attempts, 3);
    }

    #[test]
    fn test_missing_ledger_url() {
        let result = Config::from_lookup(lookup(&[("LEDGER_CONTRACT_ADDRESS", "0xC0")]));
        assert!(matches!(result, Err(ConfigError::Missing("LEDGER_RPC_URL"))));
    }

    #[test]
    fn test_invalid_number() {
        let result = Config::from_lookup(lookup(&[
            ("LEDGER_RPC_URL", "http://localhost:8545"),
            ("LEDGER_CONTRACT_ADDRESS", "0xC0"),
            ("READ_RETRY_ATTEMPTS", "many"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { name: "READ_RETRY_ATTEMPTS", .. })));
    }

    #[test]
    fn test_blank_wallet_url_means_no_wallet() {
        let config = Config::from_lookup(lookup(&[
            ("WALLET_RPC_URL", "  "),
            ("LEDGER_RPC_URL", "http://localhost:8545"),
            ("LEDGER_CONTRACT_ADDRESS", "0xC0"),
        ]))
        .unwrap();
        assert_eq!(config.wallet_rpc_url, None);
    }
}
