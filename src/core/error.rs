//! Error kinds surfaced by conversion and listing.

use thiserror::Error;

/// Errors reported back to the user for a single command.
///
/// None of these are fatal: the command host renders them and keeps running.
#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    /// The command did not receive exactly `<amount> <from> <to>`.
    #[error("usage: <amount> <from> <to>")]
    Usage,

    /// The amount text is not a finite number.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The rate source could not provide a table for `base`.
    #[error("Failed to fetch exchange rates for {base}: {reason}")]
    FetchFailed { base: String, reason: String },

    /// The currency code is not present in the fetched table.
    #[error("Currency {0} is not supported")]
    UnsupportedCurrency(String),
}
