//! Quote model and wire parsing

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RateError;

/// Pairs requested on every poll, in display order
pub const QUOTED_PAIRS: [&str; 4] = ["USD-BRL", "EUR-BRL", "GBP-BRL", "BTC-BRL"];

/// Price of one unit of `code` in `code_in`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub code: String,
    pub code_in: String,
    pub bid: Decimal,
    /// Daily change in percent
    pub pct_change: Option<Decimal>,
    pub quoted_at: DateTime<Utc>,
}

/// One entry of the quote API response; numbers arrive as strings
#[derive(Debug, Deserialize)]
pub(crate) struct RawQuote {
    code: String,
    codein: String,
    bid: String,
    #[serde(rename = "pctChange")]
    pct_change: Option<String>,
    timestamp: String,
}

impl RawQuote {
    fn into_quote(self, key: &str) -> Result<Quote, RateError> {
        let bid = Decimal::from_str(self.bid.trim()).map_err(|e| RateError::malformed(key, e))?;
        if bid <= Decimal::ZERO {
            return Err(RateError::malformed(key, format!("non-positive bid {}", bid)));
        }
        let seconds: i64 = self
            .timestamp
            .trim()
            .parse()
            .map_err(|e| RateError::malformed(key, e))?;
        let quoted_at = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| RateError::malformed(key, "timestamp out of range"))?;

        Ok(Quote {
            code: self.code,
            code_in: self.codein,
            bid,
            pct_change: self
                .pct_change
                .and_then(|p| Decimal::from_str(p.trim()).ok()),
            quoted_at,
        })
    }
}

/// Parses a response body keyed by pair (`USDBRL`, `EURBRL`, ...)
///
/// Quotes come back in [`QUOTED_PAIRS`] order. Pairs missing from the body
/// or failing to parse are skipped; a body with no usable quote is an error.
pub fn parse_quotes(body: &str) -> Result<Vec<Quote>, RateError> {
    let raw: HashMap<String, RawQuote> =
        serde_json::from_str(body).map_err(|e| RateError::malformed("response", e))?;
    parse_raw(raw)
}

pub(crate) fn parse_raw(mut raw: HashMap<String, RawQuote>) -> Result<Vec<Quote>, RateError> {
    let mut quotes = Vec::with_capacity(QUOTED_PAIRS.len());
    let mut rejected = None;
    for pair in QUOTED_PAIRS {
        let key = pair.replace('-', "");
        let Some(entry) = raw.remove(&key) else {
            continue;
        };
        match entry.into_quote(&key) {
            Ok(quote) => quotes.push(quote),
            Err(e) => {
                warn!(pair = %key, error = %e, "Skipping malformed quote");
                rejected = Some(e);
            }
        }
    }
    if quotes.is_empty() {
        return Err(rejected.unwrap_or(RateError::Empty));
    }
    Ok(quotes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BODY: &str = r#"{
        "USDBRL": {"code": "USD", "codein": "BRL", "name": "Dólar Americano/Real Brasileiro",
                   "bid": "5.0123", "ask": "5.0150", "pctChange": "-0.42", "timestamp": "1718740800"},
        "BTCBRL": {"code": "BTC", "codein": "BRL", "bid": "352100.5", "pctChange": "1.8", "timestamp": "1718740805"}
    }"#;

    #[test]
    fn test_parse_in_display_order() {
        let quotes = parse_quotes(BODY).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].code, "USD");
        assert_eq!(quotes[0].bid, dec!(5.0123));
        assert_eq!(quotes[0].pct_change, Some(dec!(-0.42)));
        assert_eq!(quotes[0].quoted_at.timestamp(), 1718740800);
        assert_eq!(quotes[1].code, "BTC");
    }

    #[test]
    fn test_bad_bid_is_malformed() {
        let body = r#"{"USDBRL": {"code": "USD", "codein": "BRL", "bid": "n/a", "timestamp": "1"}}"#;
        assert!(matches!(parse_quotes(body), Err(RateError::Malformed { .. })));
    }

    #[test]
    fn test_bad_pair_keeps_the_others() {
        let body = r#"{
            "USDBRL": {"code": "USD", "codein": "BRL", "bid": "5.01", "timestamp": "1718740800"},
            "EURBRL": {"code": "EUR", "codein": "BRL", "bid": "5.44", "timestamp": "1718740800"},
            "BTCBRL": {"code": "BTC", "codein": "BRL", "bid": "-", "timestamp": "1718740800"}
        }"#;
        let quotes = parse_quotes(body).unwrap();

        let codes: Vec<&str> = quotes.iter().map(|q| q.code.as_str()).collect();
        assert_eq!(codes, vec!["USD", "EUR"]);
    }

    #[test]
    fn test_empty_body() {
        assert!(matches!(parse_quotes("{}"), Err(RateError::Empty)));
        assert!(parse_quotes("not json").is_err());
    }
}
