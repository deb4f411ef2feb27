//! Star rating tiers and the policies that interpret them.

use std::fmt;
use std::str::FromStr;

use super::InvalidLabel;

/// A star rating tier selected in the filter, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RatingTier(u8);

impl RatingTier {
    /// Tiers in the order they are offered (best first).
    pub const ALL: [RatingTier; 5] = [
        RatingTier(5),
        RatingTier(4),
        RatingTier(3),
        RatingTier(2),
        RatingTier(1),
    ];

    /// Create a tier, returning `None` outside 1..=5.
    pub fn new(stars: u8) -> Option<Self> {
        (1..=5).contains(&stars).then_some(Self(stars))
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RatingTier {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(RatingTier::new)
            .ok_or_else(|| InvalidLabel::new("rating tier", s))
    }
}

/// How a selected [`RatingTier`] is turned into a rating range.
///
/// The server runs with exactly one policy, chosen through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingPolicy {
    /// Each tier owns a band of ratings:
    ///
    /// | Tier | Ratings kept |
    /// |------|--------------|
    /// | 5    | (4.2, 5]     |
    /// | 4    | (3.0, 4.2]   |
    /// | 3    | (2.0, 3.0]   |
    /// | 2    | (1.0, 2.0]   |
    /// | 1    | [0, 1.0]     |
    #[default]
    Bucket,

    /// Tier N keeps every rating at or below N.
    Threshold,
}

impl RatingPolicy {
    /// Whether a numeric rating is kept when `tier` is selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use bus_search::domain::{RatingPolicy, RatingTier};
    ///
    /// let four = RatingTier::new(4).unwrap();
    /// assert!(RatingPolicy::Bucket.accepts(four, 4.2));
    /// assert!(!RatingPolicy::Bucket.accepts(four, 4.5));
    /// assert!(RatingPolicy::Threshold.accepts(four, 2.0));
    /// ```
    pub fn accepts(self, tier: RatingTier, rating: f64) -> bool {
        match self {
            RatingPolicy::Bucket => match tier.stars() {
                5 => rating > 4.2 && rating <= 5.0,
                4 => rating > 3.0 && rating <= 4.2,
                3 => rating > 2.0 && rating <= 3.0,
                2 => rating > 1.0 && rating <= 2.0,
                _ => (0.0..=1.0).contains(&rating),
            },
            RatingPolicy::Threshold => rating <= f64::from(tier.stars()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RatingPolicy::Bucket => "bucket",
            RatingPolicy::Threshold => "threshold",
        }
    }
}

impl FromStr for RatingPolicy {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bucket" => Ok(RatingPolicy::Bucket),
            "threshold" => Ok(RatingPolicy::Threshold),
            _ => Err(InvalidLabel::new("rating policy", s)),
        }
    }
}
