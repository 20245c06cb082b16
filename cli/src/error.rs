//! Error types for the command-line front end.

use std::path::PathBuf;

use sharecalc_quotes::QuoteError;

/// All errors that can occur while running the calculator from the CLI.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("missing credentials: {0}")]
    Credentials(String),

    #[error(transparent)]
    Calc(#[from] sharecalc::Error),

    #[error("price provider error: {0}")]
    Quote(#[from] QuoteError),

    #[error("prompt failed: {0}")]
    Prompt(String),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when the user's input was at fault (exit code 2).
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Calc(e) if e.is_input_error())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
