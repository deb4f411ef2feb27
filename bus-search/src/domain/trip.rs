//! The trip row.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::{coerce_number, parse_time_of_day};

/// One row of the `bus_routes` table: a single scheduled departure on a route.
///
/// Fields are kept exactly as the data source returned them. Typed views
/// (`price_value`, `departing_time_of_day`, ...) are computed on demand and
/// return `None` when the raw value cannot be coerced, so a malformed row is
/// never an error, it simply drops out of the comparisons that need the
/// missing value. Numeric JSON values are read into their text form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub route_name: String,
    #[serde(default, deserialize_with = "raw_field")]
    pub departing_time: Option<String>,
    #[serde(default, deserialize_with = "raw_field")]
    pub reaching_time: Option<String>,
    #[serde(default, deserialize_with = "raw_field")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "raw_field")]
    pub seat_availability: Option<String>,
    #[serde(default, deserialize_with = "raw_field")]
    pub star_rating: Option<String>,
    #[serde(default, deserialize_with = "raw_field")]
    pub bus_type: Option<String>,
}

impl Trip {
    /// Create a trip with only its route set.
    pub fn new(route_name: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
            departing_time: None,
            reaching_time: None,
            price: None,
            seat_availability: None,
            star_rating: None,
            bus_type: None,
        }
    }

    /// Time of day of departure, if the raw value parses.
    pub fn departing_time_of_day(&self) -> Option<NaiveTime> {
        self.departing_time.as_deref().and_then(parse_time_of_day)
    }

    /// Time of day of arrival, if the raw value parses.
    pub fn reaching_time_of_day(&self) -> Option<NaiveTime> {
        self.reaching_time.as_deref().and_then(parse_time_of_day)
    }

    /// Fare as a number, if the raw value is numeric.
    pub fn price_value(&self) -> Option<f64> {
        self.price.as_deref().and_then(coerce_number)
    }

    /// Star rating as a number, if the raw value is numeric.
    pub fn star_rating_value(&self) -> Option<f64> {
        self.star_rating.as_deref().and_then(coerce_number)
    }
}

/// Accepts text, a number or anything else; only text and numbers are kept.
fn raw_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => Some(s),
        Raw::Int(i) => Some(i.to_string()),
        Raw::Float(f) => Some(f.to_string()),
        Raw::Other(_) => None,
    })
}
