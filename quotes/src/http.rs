//! Shared blocking HTTP plumbing for the REST providers.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::QuoteError;

/// Build a blocking client with a request timeout.
pub(crate) fn build_client(timeout: Duration, user_agent: &str) -> Result<Client, QuoteError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(|e| QuoteError::Connection(format!("failed to build HTTP client: {e}")))
}

/// Join `segments` onto `base` as path segments, percent-encoding each one,
/// then append `query` pairs.
///
/// A symbol such as `SPY?feed=sip` or `SPY#x` stays a single path segment.
pub(crate) fn endpoint(
    base: &str,
    segments: &[&str],
    query: &[(&str, &str)],
) -> Result<Url, QuoteError> {
    let mut url = Url::parse(base)
        .map_err(|e| QuoteError::Connection(format!("invalid base URL {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| QuoteError::Connection(format!("base URL {base} cannot take a path")))?
        .pop_if_empty()
        .extend(segments);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

/// Send a request and decode a JSON body, mapping HTTP failures onto
/// [`QuoteError`] variants.
pub(crate) fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    symbol: &str,
) -> Result<T, QuoteError> {
    let resp = request
        .send()
        .map_err(|e| QuoteError::Connection(format!("request for {symbol} failed: {e}")))?;

    let resp = check_status(resp, symbol)?;
    let body = resp
        .text()
        .map_err(|e| QuoteError::Connection(format!("failed to read body for {symbol}: {e}")))?;
    debug!("{symbol}: {} bytes", body.len());

    serde_json::from_str(&body).map_err(|e| QuoteError::Parse(format!("{symbol}: {e}")))
}

fn check_status(resp: Response, symbol: &str) -> Result<Response, QuoteError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(status_error(status, symbol, &body))
}

/// Map a non-success status to an error.
pub(crate) fn status_error(status: StatusCode, symbol: &str, body: &str) -> QuoteError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            QuoteError::Auth(format!("{status}: {body}"))
        }
        StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
            QuoteError::UnknownSymbol(symbol.to_string())
        }
        StatusCode::TOO_MANY_REQUESTS => QuoteError::RateLimit,
        _ => QuoteError::Connection(format!("{symbol} returned {status}: {body}")),
    }
}
