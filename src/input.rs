//! Portfolio input: parsing comma-separated text into validated holdings.

use std::str::FromStr;

use log::warn;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

/// One line of the portfolio: a ticker, its target weight and the shares
/// already held.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Holding {
    pub symbol: String,
    pub weight: Decimal,
    pub current_shares: Decimal,
}

/// Validated input for one rebalance computation.
///
/// Holdings keep input order. Weights are not required to sum to 1 and
/// symbols are not deduplicated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PortfolioInput {
    pub equity: Decimal,
    pub holdings: Vec<Holding>,
}

impl PortfolioInput {
    /// Build from parallel lists.
    ///
    /// An empty `current_shares` list means "nothing held yet" and is
    /// expanded to zeros. Any other length mismatch is rejected.
    pub fn from_lists(
        equity: Decimal,
        symbols: Vec<String>,
        weights: Vec<Decimal>,
        current_shares: Vec<Decimal>,
    ) -> Result<Self> {
        let current_shares = if current_shares.is_empty() {
            vec![Decimal::ZERO; symbols.len()]
        } else {
            current_shares
        };

        if symbols.len() != weights.len() || symbols.len() != current_shares.len() {
            return Err(Error::Validation(format!(
                "number of symbols, weights, and shares must be equal! \
                 (got {} symbols, {} weights, {} shares)",
                symbols.len(),
                weights.len(),
                current_shares.len()
            )));
        }
        if symbols.is_empty() {
            return Err(Error::Validation("no symbols given".into()));
        }
        if let Some(pos) = symbols.iter().position(|s| s.is_empty()) {
            return Err(Error::Validation(format!("symbol #{} is empty", pos + 1)));
        }
        if equity <= Decimal::ZERO {
            return Err(Error::Validation(format!(
                "equity must be positive (got {equity})"
            )));
        }

        let holdings = symbols
            .into_iter()
            .zip(weights)
            .zip(current_shares)
            .map(|((symbol, weight), current_shares)| Holding {
                symbol,
                weight,
                current_shares,
            })
            .collect();

        let input = Self { equity, holdings };
        input.warn_on_oddities();
        Ok(input)
    }

    /// Symbols in input order.
    pub fn symbols(&self) -> Vec<&str> {
        self.holdings.iter().map(|h| h.symbol.as_str()).collect()
    }

    /// Sum of all target weights, `None` if it overflows.
    pub fn weight_sum(&self) -> Option<Decimal> {
        self.holdings
            .iter()
            .try_fold(Decimal::ZERO, |acc, h| acc.checked_add(h.weight))
    }

    /// Symbols that appear more than once, in first-repeat order.
    pub fn duplicate_symbols(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        let mut dups = Vec::new();
        for h in &self.holdings {
            if !seen.insert(h.symbol.as_str()) && !dups.contains(&h.symbol.as_str()) {
                dups.push(h.symbol.as_str());
            }
        }
        dups
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    fn warn_on_oddities(&self) {
        match self.weight_sum() {
            Some(sum) if sum == Decimal::ONE => {}
            Some(sum) => warn!("weights sum to {} rather than 1", sum.normalize()),
            None => warn!("weights sum to more than the largest representable amount"),
        }
        for h in self.holdings.iter().filter(|h| h.weight < Decimal::ZERO) {
            warn!("{} has a negative weight ({})", h.symbol, h.weight);
        }
        let dups = self.duplicate_symbols();
        if !dups.is_empty() {
            warn!("duplicate symbols: {}", dups.join(", "));
        }
    }
}

/// Raw text as typed by the user, one field per input box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    pub equity: String,
    pub symbols: String,
    pub weights: String,
    pub shares: String,
}

impl RawInput {
    /// Parse into a [`PortfolioInput`].
    ///
    /// Returns `Ok(None)` while the symbol or weight box is still blank:
    /// there is nothing to compute and no table should be shown. A blank
    /// shares box means no shares are held.
    pub fn parse(&self) -> Result<Option<PortfolioInput>> {
        if self.symbols.trim().is_empty() || self.weights.trim().is_empty() {
            return Ok(None);
        }

        let equity = parse_decimal(self.equity.trim(), "equity")?;
        let symbols = parse_symbols(&self.symbols);
        let weights = parse_decimals(&self.weights, "weights")?;
        let shares = parse_decimals(&self.shares, "shares")?;

        PortfolioInput::from_lists(equity, symbols, weights, shares).map(Some)
    }
}

/// Split a comma-separated ticker list, trimming whitespace.
///
/// A trailing comma is tolerated; an empty string yields no symbols.
pub fn parse_symbols(text: &str) -> Vec<String> {
    let mut items: Vec<String> = text.split(',').map(|s| s.trim().to_string()).collect();
    if items.last().is_some_and(|s| s.is_empty()) {
        items.pop();
    }
    items
}

/// Split a comma-separated list of numbers.
///
/// `field` names the input box in error messages.
pub fn parse_decimals(text: &str, field: &'static str) -> Result<Vec<Decimal>> {
    let mut items: Vec<&str> = text.split(',').map(str::trim).collect();
    if items.last().is_some_and(|s| s.is_empty()) {
        items.pop();
    }
    items.into_iter().map(|s| parse_decimal(s, field)).collect()
}

fn parse_decimal(text: &str, field: &'static str) -> Result<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| Error::Parse {
            field,
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn raw(equity: &str, symbols: &str, weights: &str, shares: &str) -> RawInput {
        RawInput {
            equity: equity.into(),
            symbols: symbols.into(),
            weights: weights.into(),
            shares: shares.into(),
        }
    }

    #[test]
    fn parse_symbols_trims() {
        assert_eq!(parse_symbols("SPY, QQQ ,AMD"), vec!["SPY", "QQQ", "AMD"]);
        assert_eq!(parse_symbols("SPY,"), vec!["SPY"]);
        assert!(parse_symbols("").is_empty());
    }

    #[test]
    fn parse_decimals_accepts_ints_and_floats() {
        let v = parse_decimals("10, 5.5, 0", "shares").unwrap();
        assert_eq!(v, vec![d("10"), d("5.5"), d("0")]);
    }

    #[test]
    fn parse_decimals_accepts_scientific() {
        let v = parse_decimals("4e-1", "weights").unwrap();
        assert_eq!(v, vec![d("0.4")]);
    }

    #[test]
    fn parse_decimals_rejects_garbage() {
        let err = parse_decimals("0.4, abc", "weights").unwrap_err();
        match err {
            Error::Parse { field, value } => {
                assert_eq!(field, "weights");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_decimals_rejects_inner_blank() {
        assert!(parse_decimals("1,,2", "shares").is_err());
    }

    #[test]
    fn from_lists_length_mismatch() {
        let err = PortfolioInput::from_lists(
            d("10000"),
            vec!["SPY".into(), "QQQ".into()],
            vec![d("0.5")],
            vec![d("0"), d("0")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("must be equal"));
    }

    #[test]
    fn from_lists_empty_shares_means_zero() {
        let input = PortfolioInput::from_lists(
            d("10000"),
            vec!["SPY".into(), "QQQ".into()],
            vec![d("0.5"), d("0.5")],
            vec![],
        )
        .unwrap();
        assert!(input.holdings.iter().all(|h| h.current_shares.is_zero()));
    }

    #[test]
    fn from_lists_rejects_empty() {
        assert!(PortfolioInput::from_lists(d("10000"), vec![], vec![], vec![]).is_err());
    }

    #[test]
    fn from_lists_rejects_blank_symbol() {
        let err = PortfolioInput::from_lists(
            d("10000"),
            vec!["SPY".into(), "".into()],
            vec![d("0.5"), d("0.5")],
            vec![],
        )
        .unwrap_err();
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn from_lists_rejects_non_positive_equity() {
        let r = PortfolioInput::from_lists(
            Decimal::ZERO,
            vec!["SPY".into()],
            vec![d("1")],
            vec![],
        );
        assert!(r.is_err());
    }

    #[test]
    fn weights_need_not_sum_to_one() {
        let input = PortfolioInput::from_lists(
            d("10000"),
            vec!["SPY".into(), "QQQ".into()],
            vec![d("0.7"), d("0.7")],
            vec![],
        )
        .unwrap();
        assert_eq!(input.weight_sum(), Some(d("1.4")));
    }

    #[test]
    fn huge_weights_do_not_panic() {
        let input = PortfolioInput::from_lists(
            d("10000"),
            vec!["AAA".into(), "BBB".into()],
            vec![
                Decimal::from_scientific("5e28").unwrap(),
                Decimal::from_scientific("5e28").unwrap(),
            ],
            vec![],
        )
        .unwrap();
        assert_eq!(input.weight_sum(), None);
    }

    #[test]
    fn duplicates_are_kept() {
        let input = PortfolioInput::from_lists(
            d("10000"),
            vec!["SPY".into(), "QQQ".into(), "SPY".into()],
            vec![d("0.2"), d("0.4"), d("0.4")],
            vec![],
        )
        .unwrap();
        assert_eq!(input.len(), 3);
        assert_eq!(input.duplicate_symbols(), vec!["SPY"]);
    }

    #[test]
    fn raw_blank_symbols_short_circuits() {
        assert_eq!(raw("10000", "", "0.4", "0").parse().unwrap(), None);
        assert_eq!(raw("10000", "   ", "0.4", "0").parse().unwrap(), None);
    }

    #[test]
    fn raw_blank_weights_short_circuits() {
        assert_eq!(raw("10000", "SPY", "", "0").parse().unwrap(), None);
    }

    #[test]
    fn raw_parses_full_input() {
        let input = raw("10000", "SPY, QQQ, AMD", "0.4, 0.3, 0.3", "10, 5, 1")
            .parse()
            .unwrap()
            .unwrap();
        assert_eq!(input.equity, d("10000"));
        assert_eq!(input.symbols(), vec!["SPY", "QQQ", "AMD"]);
        assert_eq!(input.holdings[1].weight, d("0.3"));
        assert_eq!(input.holdings[2].current_shares, d("1"));
    }

    #[test]
    fn raw_default_shares_length_must_match() {
        // "0, 0, 0" is the default text; with two symbols it is a mismatch.
        let err = raw("10000", "SPY, QQQ", "0.5, 0.5", "0, 0, 0")
            .parse()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn raw_bad_equity() {
        let err = raw("ten grand", "SPY", "1", "").parse().unwrap_err();
        assert!(matches!(err, Error::Parse { field: "equity", .. }));
    }
}
