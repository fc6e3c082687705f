//! Core conversion logic and application plumbing

pub mod cache;
pub mod config;
pub mod error;
pub mod log;
pub mod rates;
pub mod regions;
pub mod service;

// Re-export main types for cleaner imports
pub use cache::RateCache;
pub use error::ConversionError;
pub use rates::{RateSource, RateTable};
pub use regions::{Region, RegionGroup};
pub use service::{Conversion, ConversionRequest, ConversionService, CurrencyListing};
