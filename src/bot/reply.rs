//! Message templates sent back by the bot commands.

use crate::core::{Conversion, CurrencyListing};
use std::fmt::Display;

pub const USAGE: &str = "Usage:\n\
!currency <amount> <from_currency> <to_currency>\n\
Example:\n\
!currency 100 USD EUR\n\
\n\
Currencies grouped by region:\n\
!currencylist";

/// One reply per template; fields are the template's named placeholders.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Usage,
    Error { message: String },
    Converted(Conversion),
    ByRegion(CurrencyListing),
    Flat(CurrencyListing),
}

impl Reply {
    pub fn error(message: impl Display) -> Self {
        Reply::Error {
            message: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error { .. })
    }
}

impl Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Usage => write!(f, "{USAGE}"),
            Reply::Error { message } => write!(f, "❗ Error: {message}"),
            Reply::Converted(c) => write!(
                f,
                "💱 {} {} = {:.2} {}",
                c.amount, c.from, c.converted, c.to
            ),
            Reply::ByRegion(listing) => {
                let regions = listing
                    .groups
                    .iter()
                    .map(|g| format!("🌍 {}: {}", g.region, g.codes.join(", ")))
                    .collect::<Vec<_>>()
                    .join("\n");
                write!(
                    f,
                    "🌍 Currencies by region:\n\n{}\n\n📄 All available currencies:\n{}",
                    regions,
                    listing.all.join("  ")
                )
            }
            Reply::Flat(listing) => write!(f, "{}", listing.all.join("\n")),
        }
    }
}
