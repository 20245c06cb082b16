//! sharecalc-cli: command-line and interactive front end for sharecalc.
//!
//! Collects equity, tickers, weights and current holdings, fetches prices
//! from the configured market-data provider and prints how many shares of
//! each ticker to buy or sell.

pub mod config;
pub mod error;
pub mod provider;
pub mod session;
