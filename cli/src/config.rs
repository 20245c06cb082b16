//! TOML configuration loading and validation.
//!
//! Every section and field has a default, so an absent config file is the
//! same as an empty one.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub alpaca: AlpacaConfig,
    pub yahoo: YahooConfig,
    pub input: InputConfig,
    pub fetch: FetchConfig,
}

/// Which market-data source to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Alpaca,
    #[default]
    Yahoo,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Alpaca => write!(f, "alpaca"),
            ProviderKind::Yahoo => write!(f, "yahoo"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlpacaConfig {
    pub base_url: String,
    pub feed: String,
    /// Environment variable holding the API key id.
    pub key_env: String,
    /// Environment variable holding the API secret.
    pub secret_env: String,
}

impl Default for AlpacaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://data.alpaca.markets".into(),
            feed: "iex".into(),
            key_env: "ALPACA_API_KEY".into(),
            secret_env: "ALPACA_API_SECRET".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YahooConfig {
    pub base_url: String,
    pub lookback_days: u32,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".into(),
            lookback_days: 5,
        }
    }
}

/// Bounds and defaults for the input boxes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub min_equity: f64,
    pub max_equity: f64,
    pub default_equity: f64,
    pub max_chars: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            min_equity: 1_000.0,
            max_equity: 100_000_000.0,
            default_equity: 10_000.0,
            max_chars: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// 1 = sequential; more uses a bounded worker pool.
    pub workers: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate config from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        if self.provider.timeout_secs == 0 {
            return Err(Error::Config("provider.timeout_secs must be > 0".into()));
        }
        if self.yahoo.lookback_days == 0 {
            return Err(Error::Config("yahoo.lookback_days must be > 0".into()));
        }
        if self.alpaca.key_env.is_empty() || self.alpaca.secret_env.is_empty() {
            return Err(Error::Config(
                "alpaca.key_env and alpaca.secret_env must not be empty".into(),
            ));
        }
        let input = &self.input;
        if input.min_equity.is_nan() || input.min_equity <= 0.0 {
            return Err(Error::Config("input.min_equity must be > 0".into()));
        }
        if input.min_equity > input.max_equity {
            return Err(Error::Config(
                "input.min_equity must not exceed input.max_equity".into(),
            ));
        }
        if input.default_equity < input.min_equity || input.default_equity > input.max_equity {
            return Err(Error::Config(
                "input.default_equity must lie within [min_equity, max_equity]".into(),
            ));
        }
        if input.max_chars == 0 {
            return Err(Error::Config("input.max_chars must be > 0".into()));
        }
        if self.fetch.workers == 0 {
            return Err(Error::Config("fetch.workers must be > 0".into()));
        }
        Ok(())
    }
}
