//! Conversion and currency listing on top of the rate cache.

use crate::core::cache::RateCache;
use crate::core::error::ConversionError;
use crate::core::rates::{RateSource, RateTable};
use crate::core::regions::{RegionGroup, group_by_region};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, instrument};

/// Base used to populate the cache when listing with nothing cached.
pub const REFERENCE_BASE: &str = "USD";

/// Raw `<amount> <from> <to>` arguments as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub amount: String,
    pub from: String,
    pub to: String,
}

impl FromStr for ConversionRequest {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(amount), Some(from), Some(to), None) => Ok(Self {
                amount: amount.to_string(),
                from: from.to_string(),
                to: to.to_string(),
            }),
            _ => Err(ConversionError::Usage),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub converted: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyListing {
    /// Base of the table the codes were taken from.
    pub base: String,
    pub groups: Vec<RegionGroup>,
    /// Every code, sorted.
    pub all: Vec<String>,
}

impl CurrencyListing {
    fn from_table(table: &RateTable) -> Self {
        Self {
            base: table.base().to_string(),
            groups: group_by_region(table.codes()),
            all: table.codes().map(str::to_string).collect(),
        }
    }
}

/// Parses user amount text, accepting `,` as the decimal separator.
pub fn parse_amount(text: &str) -> Result<f64, ConversionError> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| ConversionError::InvalidAmount(text.to_string()))
}

fn normalize_code(code: &str) -> Result<String, ConversionError> {
    let code = code.trim().to_uppercase();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ConversionError::UnsupportedCurrency(code));
    }
    Ok(code)
}

pub struct ConversionService<S: RateSource> {
    cache: RateCache<S>,
}

impl<S: RateSource> ConversionService<S> {
    pub fn new(source: S) -> Self {
        Self {
            cache: RateCache::new(source),
        }
    }

    pub fn with_max_age(self, max_age: Option<Duration>) -> Self {
        Self {
            cache: self.cache.with_max_age(max_age),
        }
    }

    #[instrument(name = "Convert", skip(self))]
    pub async fn convert(
        &self,
        amount_text: &str,
        from: &str,
        to: &str,
    ) -> Result<Conversion, ConversionError> {
        let amount = parse_amount(amount_text)?;
        let from = normalize_code(from)?;
        let to = normalize_code(to)?;

        let rates = self.cache.get_rates(&from).await?;
        let rate = rates
            .rate(&to)
            .ok_or_else(|| ConversionError::UnsupportedCurrency(to.clone()))?;

        let converted = amount * rate;
        debug!(amount, rate, converted, "Converted {} to {}", from, to);

        Ok(Conversion {
            amount,
            from,
            to,
            rate,
            converted,
        })
    }

    pub async fn convert_request(
        &self,
        request: &ConversionRequest,
    ) -> Result<Conversion, ConversionError> {
        self.convert(&request.amount, &request.from, &request.to)
            .await
    }

    /// Lists every code of the held table, fetching `REFERENCE_BASE` if none is held.
    #[instrument(name = "ListCurrencies", skip(self))]
    pub async fn list_currencies(&self) -> Result<CurrencyListing, ConversionError> {
        let table = match self.cache.current().await {
            Some(table) => table,
            None => self.cache.get_rates(REFERENCE_BASE).await?,
        };
        debug!("Listing {} currencies from {} table", table.len(), table.base());
        Ok(CurrencyListing::from_table(&table))
    }
}
