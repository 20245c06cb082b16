//! Price provider selection: config + environment -> a connected provider.

use std::time::Duration;

use log::info;
use sharecalc_quotes::PriceProvider;
use sharecalc_quotes::alpaca::AlpacaProvider;
use sharecalc_quotes::yahoo::YahooProvider;

use crate::config::{Config, ProviderKind};
use crate::error::{Error, Result};

/// Build the provider named by `kind`, reading credentials through `env`.
///
/// The provider is returned unconnected.
pub fn build_provider<F>(
    config: &Config,
    kind: ProviderKind,
    env: F,
) -> Result<Box<dyn PriceProvider>>
where
    F: Fn(&str) -> Option<String>,
{
    let timeout = Duration::from_secs(config.provider.timeout_secs);
    let provider: Box<dyn PriceProvider> = match kind {
        ProviderKind::Alpaca => {
            let alpaca = &config.alpaca;
            let key = lookup(&env, &alpaca.key_env)?;
            let secret = lookup(&env, &alpaca.secret_env)?;
            Box::new(
                AlpacaProvider::new(&key, &secret)
                    .with_base_url(&alpaca.base_url)
                    .with_feed(&alpaca.feed)
                    .with_timeout(timeout),
            )
        }
        ProviderKind::Yahoo => Box::new(
            YahooProvider::new()
                .with_base_url(&config.yahoo.base_url)
                .with_lookback_days(config.yahoo.lookback_days)
                .with_timeout(timeout),
        ),
    };
    Ok(provider)
}

/// Build and connect the configured provider using the process environment.
pub fn connect_provider(config: &Config, kind: ProviderKind) -> Result<Box<dyn PriceProvider>> {
    let mut provider = build_provider(config, kind, |name| std::env::var(name).ok())?;
    provider.connect()?;
    info!("Using {} price provider", provider.name());
    Ok(provider)
}

fn lookup<F>(env: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match env(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Credentials(format!(
            "environment variable {name} is not set"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn yahoo_needs_no_credentials() {
        let provider =
            build_provider(&Config::default(), ProviderKind::Yahoo, env_with(&[])).unwrap();
        assert_eq!(provider.name(), "yahoo");
    }

    #[test]
    fn alpaca_reads_configured_env_vars() {
        let mut config = Config::default();
        config.alpaca.key_env = "K".into();
        config.alpaca.secret_env = "S".into();
        let env = env_with(&[("K", "id"), ("S", "secret")]);
        let provider = build_provider(&config, ProviderKind::Alpaca, env).unwrap();
        assert_eq!(provider.name(), "alpaca");
    }

    #[test]
    fn alpaca_missing_secret() {
        let err = build_provider(
            &Config::default(),
            ProviderKind::Alpaca,
            env_with(&[("ALPACA_API_KEY", "id")]),
        )
        .err()
        .unwrap();
        assert!(matches!(err, Error::Credentials(ref m) if m.contains("ALPACA_API_SECRET")));
    }

    #[test]
    fn blank_credential_is_missing() {
        let err = build_provider(
            &Config::default(),
            ProviderKind::Alpaca,
            env_with(&[("ALPACA_API_KEY", "  "), ("ALPACA_API_SECRET", "s")]),
        )
        .err()
        .unwrap();
        assert!(matches!(err, Error::Credentials(_)));
    }
}
