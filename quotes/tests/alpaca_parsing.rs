//! Tests for Alpaca API response parsing, no live connection needed.

#[cfg(feature = "alpaca")]
mod alpaca_tests {
    use sharecalc_quotes::QuoteError;
    use sharecalc_quotes::alpaca::price_from_response;
    use sharecalc_quotes::alpaca::types::LatestTradeResponse;

    // ========================================================================
    // LatestTradeResponse parsing
    // ========================================================================

    #[test]
    fn parse_latest_trade_full() {
        let json = r#"{
            "symbol": "SPY",
            "trade": {
                "t": "2024-05-03T19:59:59.123456789Z",
                "x": "V",
                "p": 511.29,
                "s": 100,
                "c": ["@"],
                "i": 52983525033527,
                "z": "B"
            }
        }"#;

        let resp: LatestTradeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.symbol, "SPY");
        let trade = resp.trade.as_ref().unwrap();
        assert_eq!(trade.price, 511.29);
        assert_eq!(trade.size, 100);
        assert_eq!(trade.exchange, "V");
        assert!(trade.timestamp.starts_with("2024-05-03"));

        assert_eq!(price_from_response(&resp).unwrap(), 511.29);
    }

    #[test]
    fn parse_latest_trade_minimal() {
        let json = r#"{ "symbol": "AMD", "trade": { "t": "2024-05-03T19:59:59Z", "p": 150 } }"#;
        let resp: LatestTradeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(price_from_response(&resp).unwrap(), 150.0);
    }

    // ========================================================================
    // Missing data
    // ========================================================================

    #[test]
    fn missing_trade_is_no_data() {
        let json = r#"{ "symbol": "ZZZZ" }"#;
        let resp: LatestTradeResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            price_from_response(&resp),
            Err(QuoteError::NoData { symbol }) if symbol == "ZZZZ"
        ));
    }

    #[test]
    fn null_trade_is_no_data() {
        let json = r#"{ "symbol": "ZZZZ", "trade": null }"#;
        let resp: LatestTradeResponse = serde_json::from_str(json).unwrap();
        assert!(price_from_response(&resp).is_err());
    }

    #[test]
    fn zero_trade_price_is_passed_through() {
        let json = r#"{ "symbol": "SPY", "trade": { "t": "2024-05-03T19:59:59Z", "p": 0.0 } }"#;
        let resp: LatestTradeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(price_from_response(&resp).unwrap(), 0.0);
    }

    #[test]
    fn malformed_price_fails_to_parse() {
        let json = r#"{ "symbol": "SPY", "trade": { "t": "x", "p": "511.29" } }"#;
        assert!(serde_json::from_str::<LatestTradeResponse>(json).is_err());
    }
}
