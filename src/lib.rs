//! # sharecalc
//!
//! How many shares should you buy (or sell) to hit a target allocation?
//!
//! Given a starting equity, a list of tickers, target weights and the shares
//! already held, [`RebalanceCalculator`] prices each ticker, converts the
//! weighted equity into a whole-share target and reports the net trade.
//!
//! ## Quick Start
//!
//! ```
//! use std::str::FromStr;
//! use sharecalc::{Decimal, PortfolioInput, RebalanceCalculator};
//!
//! let d = |s: &str| Decimal::from_str(s).unwrap();
//!
//! let input = PortfolioInput::from_lists(
//!     d("10000"),
//!     vec!["SPY".into(), "QQQ".into(), "AMD".into()],
//!     vec![d("0.4"), d("0.3"), d("0.3")],
//!     vec![d("10"), d("5"), d("1")],
//! )
//! .unwrap();
//!
//! let table = RebalanceCalculator::new()
//!     .compute_with_prices(&input, &[500.0, 400.0, 150.0])
//!     .unwrap();
//!
//! let targets: Vec<_> = table.rows().iter().map(|r| r.target_shares).collect();
//! assert_eq!(targets, vec![d("8"), d("8"), d("20")]);
//!
//! let net: Vec<_> = table.rows().iter().map(|r| r.net_shares_to_rebalance).collect();
//! assert_eq!(net, vec![d("-2"), d("3"), d("19")]);
//! ```
//!
//! ## Rounding
//!
//! Prices are quantized half-up to two decimal places before use, and share
//! targets are rounded half-up to whole shares:
//!
//! | equity × weight / price | target |
//! |-------------------------|--------|
//! | 10000 × 0.3 / 400 = 7.5 | 8      |
//! | 10000 × 0.3 / 150 = 20  | 20     |
//!
//! ## Raw Text Input
//!
//! The interactive front end collects comma-separated text. [`RawInput`]
//! turns that into a validated [`PortfolioInput`], or `None` when there is
//! nothing to compute yet:
//!
//! ```
//! use sharecalc::RawInput;
//!
//! let raw = RawInput {
//!     equity: "10000".into(),
//!     symbols: "SPY, QQQ".into(),
//!     weights: "".into(),
//!     shares: "0, 0".into(),
//! };
//! assert!(raw.parse().unwrap().is_none());
//! ```

pub mod calculator;
mod error;
pub mod input;
pub mod rounding;
pub mod table;

// Re-export public API
pub use calculator::{RebalanceCalculator, rebalance_row};
pub use error::{BoxError, Error, Result};
pub use input::{Holding, PortfolioInput, RawInput};
pub use rounding::{quantize_f64, round_half_up};
pub use table::{RebalanceRow, RebalanceTable, Totals};

pub use rust_decimal::Decimal;
