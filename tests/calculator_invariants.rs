//! Property-based tests for the rebalance computation.
//!
//! These tests use proptest to verify that the share arithmetic holds
//! across randomly generated portfolios.

use std::cell::Cell;

use proptest::prelude::*;
use sharecalc::{BoxError, Decimal, Error, PortfolioInput, RebalanceCalculator, round_half_up};

/// Equity in whole dollars within the accepted input range
fn equity_strategy() -> impl Strategy<Value = Decimal> {
    (1_000i64..=100_000_000i64).prop_map(Decimal::from)
}

/// Weight in basis points, 0.0001 ..= 1.0
fn weight_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000i64).prop_map(|bps| Decimal::new(bps, 4))
}

/// Price already at cent precision, $0.01 ..= $10,000.00
fn price_cents_strategy() -> impl Strategy<Value = i64> {
    1i64..=1_000_000i64
}

/// Currently held shares
fn shares_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000i64).prop_map(Decimal::from)
}

fn holding_strategy() -> impl Strategy<Value = (Decimal, i64, Decimal)> {
    (weight_strategy(), price_cents_strategy(), shares_strategy())
}

fn build(equity: Decimal, holdings: &[(Decimal, i64, Decimal)]) -> (PortfolioInput, Vec<f64>) {
    let symbols = (0..holdings.len()).map(|i| format!("S{i}")).collect();
    let weights = holdings.iter().map(|h| h.0).collect();
    let shares = holdings.iter().map(|h| h.2).collect();
    let prices = holdings.iter().map(|h| h.1 as f64 / 100.0).collect();
    let input = PortfolioInput::from_lists(equity, symbols, weights, shares).unwrap();
    (input, prices)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // ========================================================================
    // ARITHMETIC INVARIANTS
    // ========================================================================

    /// target_shares == round_half_up(equity * weight / price, 0)
    #[test]
    fn target_matches_formula(
        equity in equity_strategy(),
        holdings in prop::collection::vec(holding_strategy(), 1..8),
    ) {
        let (input, prices) = build(equity, &holdings);
        let table = RebalanceCalculator::new().compute_with_prices(&input, &prices).unwrap();

        for (row, &(weight, cents, _)) in table.rows().iter().zip(&holdings) {
            let price = Decimal::new(cents, 2);
            prop_assert_eq!(row.price, price);
            prop_assert_eq!(row.target_shares, round_half_up(equity * weight / price, 0));
        }
    }

    /// net == target - current, exactly
    #[test]
    fn net_is_target_minus_current(
        equity in equity_strategy(),
        holdings in prop::collection::vec(holding_strategy(), 1..8),
    ) {
        let (input, prices) = build(equity, &holdings);
        let table = RebalanceCalculator::new().compute_with_prices(&input, &prices).unwrap();

        for row in table.rows() {
            prop_assert_eq!(row.net_shares_to_rebalance, row.target_shares - row.current_shares);
        }
    }

    /// Target shares are whole numbers
    #[test]
    fn targets_are_whole(
        equity in equity_strategy(),
        holdings in prop::collection::vec(holding_strategy(), 1..8),
    ) {
        let (input, prices) = build(equity, &holdings);
        let table = RebalanceCalculator::new().compute_with_prices(&input, &prices).unwrap();

        for row in table.rows() {
            prop_assert_eq!(row.target_shares, row.target_shares.trunc());
        }
    }

    // ========================================================================
    // ORDERING AND VALIDATION
    // ========================================================================

    /// Output rows follow input order
    #[test]
    fn rows_keep_input_order(
        equity in equity_strategy(),
        holdings in prop::collection::vec(holding_strategy(), 1..8),
    ) {
        let (input, prices) = build(equity, &holdings);
        let table = RebalanceCalculator::new().compute_with_prices(&input, &prices).unwrap();

        let symbols: Vec<&str> = table.rows().iter().map(|r| r.symbol.as_str()).collect();
        prop_assert_eq!(symbols, input.symbols());
    }

    /// Mismatched list lengths are rejected before any price is requested
    #[test]
    fn mismatch_rejected_before_fetch(
        n_symbols in 1usize..6,
        n_weights in 1usize..6,
    ) {
        prop_assume!(n_symbols != n_weights);

        let fetched = Cell::new(0usize);
        let result = PortfolioInput::from_lists(
            Decimal::from(10_000),
            (0..n_symbols).map(|i| format!("S{i}")).collect(),
            vec![Decimal::new(1, 1); n_weights],
            vec![],
        )
        .and_then(|input| {
            RebalanceCalculator::new().compute(&input, |_| {
                fetched.set(fetched.get() + 1);
                Ok::<_, BoxError>(100.0)
            })
        });

        prop_assert!(matches!(result, Err(Error::Validation(_))));
        prop_assert_eq!(fetched.get(), 0);
    }

    /// A zero price anywhere fails the whole computation
    #[test]
    fn zero_price_fails_everything(
        equity in equity_strategy(),
        holdings in prop::collection::vec(holding_strategy(), 1..8),
        zero_at in any::<prop::sample::Index>(),
    ) {
        let (input, mut prices) = build(equity, &holdings);
        let i = zero_at.index(prices.len());
        prices[i] = 0.0;

        let result = RebalanceCalculator::new().compute_with_prices(&input, &prices);
        prop_assert!(
            matches!(result, Err(Error::InvalidPrice { .. })),
            "expected InvalidPrice, got {:?}",
            result
        );
    }
}
