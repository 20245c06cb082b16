//! Errors raised while validating input and computing a rebalance.

/// Boxed error from a price source, kept intact as the `source()` of
/// [`Error::PriceFetch`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors that can occur while turning inputs into a rebalance table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("could not parse {field} value {value:?} as a number")]
    Parse { field: &'static str, value: String },

    #[error("failed to fetch price for {symbol}: {source}")]
    PriceFetch {
        symbol: String,
        #[source]
        source: BoxError,
    },

    #[error("invalid price for {symbol}: {price} (must be a positive, finite amount)")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("arithmetic error: {0}")]
    Arithmetic(String),
}

impl Error {
    /// True for errors caused by what the user typed (as opposed to the
    /// price source or the arithmetic).
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Parse { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
