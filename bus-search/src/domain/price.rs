//! Price bands and price ordering.

use std::fmt;
use std::str::FromStr;

use super::InvalidLabel;

/// Coerce a raw numeric column value to `f64`.
///
/// Leading and trailing whitespace is ignored. Anything that is not a finite
/// number yields `None`, which excludes the row from range comparisons.
///
/// # Examples
///
/// ```
/// use bus_search::domain::coerce_number;
///
/// assert_eq!(coerce_number("450"), Some(450.0));
/// assert_eq!(coerce_number(" 1200.50 "), Some(1200.5));
/// assert_eq!(coerce_number("N/A"), None);
/// assert_eq!(coerce_number("NaN"), None);
/// ```
pub fn coerce_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A fare range offered by the price filter.
///
/// The open-ended bands are strict (`< 500`, `> 2000`); the middle bands are
/// inclusive at both ends, so a fare of exactly 1000 is in both
/// `500 - 1000` and `1000 - 1500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBand {
    Below500,
    From500To1000,
    From1000To1500,
    From1500To2000,
    Above2000,
}

impl PriceBand {
    /// All bands in the order they are offered to the user.
    pub const ALL: [PriceBand; 5] = [
        PriceBand::Below500,
        PriceBand::From500To1000,
        PriceBand::From1000To1500,
        PriceBand::From1500To2000,
        PriceBand::Above2000,
    ];

    /// Whether a fare falls in this band.
    pub fn contains(self, price: f64) -> bool {
        match self {
            PriceBand::Below500 => price < 500.0,
            PriceBand::From500To1000 => (500.0..=1000.0).contains(&price),
            PriceBand::From1000To1500 => (1000.0..=1500.0).contains(&price),
            PriceBand::From1500To2000 => (1500.0..=2000.0).contains(&price),
            PriceBand::Above2000 => price > 2000.0,
        }
    }

    /// Display label, also the value submitted by the dashboard form.
    pub fn label(self) -> &'static str {
        match self {
            PriceBand::Below500 => "Below 500",
            PriceBand::From500To1000 => "500 - 1000",
            PriceBand::From1000To1500 => "1000 - 1500",
            PriceBand::From1500To2000 => "1500 - 2000",
            PriceBand::Above2000 => "Above 2000",
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceBand {
    type Err = InvalidLabel;

    /// Accepts the display label, ignoring case and the spacing or dash style
    /// around the range separator ("500-1000", "500 – 1000").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        PriceBand::ALL
            .into_iter()
            .find(|b| squash(b.label()) == wanted)
            .ok_or_else(|| InvalidLabel::new("price band", s))
    }
}

/// Lowercase, drop whitespace and unify dashes.
fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Secondary sort direction for price when listing a route's trips.
///
/// Trips are always ordered by star rating (highest first) before price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriceOrder {
    #[default]
    LowToHigh,
    HighToLow,
}

impl PriceOrder {
    pub const ALL: [PriceOrder; 2] = [PriceOrder::LowToHigh, PriceOrder::HighToLow];

    pub fn label(self) -> &'static str {
        match self {
            PriceOrder::LowToHigh => "Low to High",
            PriceOrder::HighToLow => "High to Low",
        }
    }

    /// Whether prices increase down the list.
    pub fn is_ascending(self) -> bool {
        self == PriceOrder::LowToHigh
    }
}

impl fmt::Display for PriceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceOrder {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "lowtohigh" | "asc" => Ok(PriceOrder::LowToHigh),
            "hightolow" | "desc" => Ok(PriceOrder::HighToLow),
            _ => Err(InvalidLabel::new("price order", s)),
        }
    }
}
