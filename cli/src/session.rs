//! Calculation workflow: raw input → validate → fetch prices → compute → render.
//!
//! This is the main workflow that ties the calculator to a price provider.

use dialoguer::{Confirm, Input};
use log::info;
use serde::Serialize;
use sharecalc::{
    Decimal, Error as CalcError, PortfolioInput, RawInput, RebalanceCalculator, RebalanceRow,
    RebalanceTable, Totals,
};
use sharecalc_quotes::{PriceProvider, QuoteError, fetch_prices, fetch_prices_parallel};

use crate::config::{Config, InputConfig};
use crate::error::{Error, Result};

/// Output format for a computed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Check the raw text against the configured limits, then parse it.
///
/// Returns `Ok(None)` when the symbol or weight box is blank.
pub fn validate_input(limits: &InputConfig, raw: &RawInput) -> Result<Option<PortfolioInput>> {
    for (name, text) in [
        ("equity", &raw.equity),
        ("symbols", &raw.symbols),
        ("weights", &raw.weights),
        ("shares", &raw.shares),
    ] {
        let chars = text.chars().count();
        if chars > limits.max_chars {
            return Err(invalid(format!(
                "{name} is {chars} characters long (max {})",
                limits.max_chars
            )));
        }
    }

    let Some(input) = raw.parse()? else {
        return Ok(None);
    };

    let min = bound(limits.min_equity)?;
    let max = bound(limits.max_equity)?;
    if input.equity < min || input.equity > max {
        return Err(invalid(format!(
            "equity {} is outside [{}, {}]",
            input.equity.normalize(),
            min.normalize(),
            max.normalize()
        )));
    }
    Ok(Some(input))
}

/// Fetch prices for every holding and compute the table.
///
/// With `workers > 1` prices are fetched on a bounded pool; otherwise one
/// symbol at a time with a progress line per symbol on stderr.
pub fn compute_table(
    provider: &dyn PriceProvider,
    input: &PortfolioInput,
    workers: usize,
) -> Result<RebalanceTable> {
    let calculator = RebalanceCalculator::new();
    let symbols = input.symbols();
    info!(
        "Fetching {} prices from {} ({} worker{})",
        symbols.len(),
        provider.name(),
        workers,
        if workers == 1 { "" } else { "s" }
    );

    if workers > 1 {
        let mut results = fetch_prices_parallel(provider, &symbols, workers)?.into_iter();
        let table = calculator.compute(input, |symbol| {
            results.next().map_or_else(
                || Err(QuoteError::Other(format!("no result for {symbol}"))),
                |r| r.map(|q| q.price),
            )
        })?;
        return Ok(table);
    }

    let total = symbols.len();
    let mut done = 0;
    let table = calculator.compute(input, |symbol| {
        let price = provider.latest_price(symbol)?;
        done += 1;
        eprintln!("[{done}/{total}] {symbol:8} ${price:.2}");
        Ok::<_, QuoteError>(price)
    })?;
    Ok(table)
}

/// Validate, fetch and compute. `Ok(None)` means there was nothing to compute.
pub fn calculate(
    config: &Config,
    provider: &dyn PriceProvider,
    raw: &RawInput,
) -> Result<Option<RebalanceTable>> {
    let Some(input) = validate_input(&config.input, raw)? else {
        info!("No symbols or weights given; nothing to compute");
        return Ok(None);
    };
    compute_table(provider, &input, config.fetch.workers).map(Some)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    equity: Decimal,
    rows: &'a [RebalanceRow],
    totals: &'a Totals,
}

/// Render a table as aligned text or JSON.
pub fn render(table: &RebalanceTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(table.to_string()),
        OutputFormat::Json => {
            let report = JsonReport {
                equity: table.equity,
                rows: table.rows(),
                totals: table.totals(),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

/// One-shot `calc` command.
pub fn run_calc(
    config: &Config,
    provider: &dyn PriceProvider,
    raw: &RawInput,
    format: OutputFormat,
) -> Result<()> {
    if let Some(table) = calculate(config, provider, raw)? {
        println!("{}", render(&table, format)?);
    }
    Ok(())
}

/// Prompt for input, show the table, repeat until the user stops.
///
/// Input and price errors are reported and the prompts start over; only
/// prompt (terminal) failures end the session.
pub fn run_interactive(config: &Config, provider: &dyn PriceProvider) -> Result<()> {
    println!("How many stock shares should you buy?\n");
    println!("Enter the starting equity, the stock symbols, portfolio weights and");
    println!("your current number of shares to see what to buy or sell.\n");

    loop {
        let raw = prompt_input(&config.input)?;
        match interactive_round(config, provider, &raw) {
            Ok(text) => println!("{text}"),
            Err(text) => eprintln!("{text}"),
        }

        let again = Confirm::new()
            .with_prompt("Rebalance another portfolio?")
            .default(false)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))?;
        if !again {
            return Ok(());
        }
    }
}

/// One pass of the interactive loop: the text to show on stdout, or the
/// error line for stderr.
pub fn interactive_round(
    config: &Config,
    provider: &dyn PriceProvider,
    raw: &RawInput,
) -> std::result::Result<String, String> {
    match calculate(config, provider, raw) {
        Ok(Some(table)) => Ok(format!("\n{table}")),
        Ok(None) => Ok("Enter at least one symbol and one weight.".into()),
        Err(e) => Err(format!("Error: {e}")),
    }
}

/// `price` command: latest price per symbol.
pub fn show_prices(provider: &dyn PriceProvider, symbols: &[String]) -> Result<()> {
    let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
    let quotes = fetch_prices(provider, &symbols)?;
    for q in quotes {
        println!("  {:8} ${:>10.2}", q.symbol, q.price);
    }
    Ok(())
}

fn prompt_input(limits: &InputConfig) -> Result<RawInput> {
    let min = limits.min_equity;
    let max = limits.max_equity;
    let equity = Input::<String>::new()
        .with_prompt("Starting Equity")
        .default(format!("{}", limits.default_equity))
        .validate_with(move |s: &String| -> std::result::Result<(), String> {
            match s.trim().parse::<f64>() {
                Ok(v) if v >= min && v <= max => Ok(()),
                Ok(_) => Err(format!("must be between {min} and {max}")),
                Err(_) => Err("must be a number".into()),
            }
        })
        .interact_text()
        .map_err(prompt_error)?;

    let symbols = text_prompt("Stock Symbols (e.g. SPY, QQQ, AMD)", None)?;
    let weights = text_prompt("Stock Weights: must be decimal (e.g. 0.4, 0.3, 0.3)", None)?;
    let shares = text_prompt("Quantity Of Shares Already Owned", Some("0, 0, 0"))?;

    Ok(RawInput {
        equity,
        symbols,
        weights,
        shares,
    })
}

fn text_prompt(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(d) = default {
        input = input.default(d.to_string());
    }
    input.interact_text().map_err(prompt_error)
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Prompt(e.to_string())
}

fn invalid(msg: String) -> Error {
    Error::Calc(CalcError::Validation(msg))
}

fn bound(value: f64) -> Result<Decimal> {
    Decimal::try_from(value)
        .map_err(|e| Error::Config(format!("equity bound {value} is not representable: {e}")))
}
