//! Static grouping of currency codes by geographic region, used for display.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Region {
    Europe,
    Asia,
    Americas,
    Oceania,
    Africa,
    Other,
}

impl Region {
    /// Display order; `Other` is always last.
    pub const ALL: [Region; 6] = [
        Region::Europe,
        Region::Asia,
        Region::Americas,
        Region::Oceania,
        Region::Africa,
        Region::Other,
    ];
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Europe => "Europe",
                Region::Asia => "Asia",
                Region::Americas => "Americas",
                Region::Oceania => "Oceania",
                Region::Africa => "Africa",
                Region::Other => "Other",
            }
        )
    }
}

const REGION_CURRENCIES: &[(Region, &[&str])] = &[
    (
        Region::Europe,
        &[
            "EUR", "GBP", "CHF", "SEK", "NOK", "DKK", "RUB", "UAH", "CZK", "PLN", "HUF", "BGN",
            "HRK", "RON", "ISK", "MKD", "MDL", "BYN", "GEL",
        ],
    ),
    (
        Region::Asia,
        &[
            "CNY", "JPY", "INR", "KRW", "SGD", "THB", "MYR", "IDR", "PHP", "VND", "PKR", "BDT",
            "LKR", "NPR", "KZT", "UZS", "TWD", "HKD",
        ],
    ),
    (
        Region::Americas,
        &[
            "USD", "CAD", "MXN", "BRL", "ARS", "CLP", "COP", "PEN", "UYU", "VEF", "GTQ", "BOB",
            "PYG", "CRC", "HTG",
        ],
    ),
    (Region::Oceania, &["AUD", "NZD", "FJD", "PGK", "SBD"]),
    (
        Region::Africa,
        &[
            "ZAR", "EGP", "NGN", "KES", "GHS", "DZD", "MAD", "TND", "TZS", "UGX", "XOF", "XAF",
        ],
    ),
];

static CODE_TO_REGION: LazyLock<HashMap<&'static str, Region>> = LazyLock::new(|| {
    REGION_CURRENCIES
        .iter()
        .flat_map(|(region, codes)| codes.iter().map(move |code| (*code, *region)))
        .collect()
});

/// Region a code belongs to, `Region::Other` when it is in no curated list.
pub fn region_of(code: &str) -> Region {
    CODE_TO_REGION.get(code).copied().unwrap_or(Region::Other)
}

/// Codes curated for `region`; empty for `Region::Other`.
pub fn curated_codes(region: Region) -> &'static [&'static str] {
    REGION_CURRENCIES
        .iter()
        .find(|(r, _)| *r == region)
        .map(|(_, codes)| *codes)
        .unwrap_or(&[])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionGroup {
    pub region: Region,
    pub codes: Vec<String>,
}

/// Partitions `codes` into region buckets.
///
/// Every code lands in exactly one bucket. Empty buckets are omitted,
/// buckets follow `Region::ALL` order and codes inside a bucket are sorted.
pub fn group_by_region<'a, I>(codes: I) -> Vec<RegionGroup>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buckets: HashMap<Region, Vec<String>> = HashMap::new();
    for code in codes {
        buckets
            .entry(region_of(code))
            .or_default()
            .push(code.to_string());
    }

    Region::ALL
        .iter()
        .filter_map(|region| {
            buckets.remove(region).map(|mut codes| {
                codes.sort();
                RegionGroup {
                    region: *region,
                    codes,
                }
            })
        })
        .collect()
}
