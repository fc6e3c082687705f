//! Rate table type and the rate source abstraction

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::warn;

/// Rates for one base currency: 1 unit of `base` = `rate` units of the key.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: String,
    rates: BTreeMap<String, f64>,
    fetched_at: DateTime<Utc>,
}

impl RateTable {
    /// Builds a table, normalizing codes to uppercase.
    ///
    /// Codes that are not three ASCII letters are skipped. A negative or
    /// non-finite rate rejects the whole table, as does an empty result.
    pub fn new<I, K>(base: &str, rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let base = base.to_uppercase();
        let mut table = BTreeMap::new();

        for (code, rate) in rates {
            let code = code.as_ref().to_uppercase();
            if !is_currency_code(&code) {
                warn!(%code, %base, "Skipping malformed currency code");
                continue;
            }
            if !rate.is_finite() || rate < 0.0 {
                return Err(anyhow!("Invalid rate {} for {} in {} table", rate, code, base));
            }
            table.insert(code, rate);
        }

        if table.is_empty() {
            return Err(anyhow!("No rates returned for base currency: {}", base));
        }

        Ok(Self {
            base,
            rates: table,
            fetched_at: Utc::now(),
        })
    }

    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// All currency codes in lexicographic order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// True for three ASCII uppercase letters.
pub fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase())
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_table_normalizes_codes() {
        let table = RateTable::new("usd", [("eur", 0.9), ("GBP", 0.8), ("USD", 1.0)]).unwrap();
        assert_eq!(table.base(), "USD");
        assert_eq!(table.rate("EUR"), Some(0.9));
        assert_eq!(table.rate("eur"), None);
        assert_eq!(table.codes().collect::<Vec<_>>(), vec!["EUR", "GBP", "USD"]);
    }

    #[test]
    fn test_rate_table_skips_malformed_codes() {
        let table = RateTable::new("USD", [("EUR", 0.9), ("EURO", 1.0), ("X1Y", 2.0)]).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rate_table_rejects_invalid_values() {
        assert!(RateTable::new("USD", [("EUR", -0.9)]).is_err());
        assert!(RateTable::new("USD", [("EUR", f64::NAN)]).is_err());
        assert!(RateTable::new("USD", [("EUR", f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_rate_table_rejects_empty() {
        let result = RateTable::new("USD", Vec::<(&str, f64)>::new());
        assert_eq!(
            result.unwrap_err().to_string(),
            "No rates returned for base currency: USD"
        );
    }

    #[test]
    fn test_is_currency_code() {
        assert!(is_currency_code("EUR"));
        assert!(!is_currency_code("eur"));
        assert!(!is_currency_code("EU"));
        assert!(!is_currency_code("E/R"));
    }
}
