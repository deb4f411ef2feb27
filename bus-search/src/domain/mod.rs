//! Domain types for bus route search.
//!
//! Filter categories are closed enums with a display label and a lenient
//! `FromStr`, so the web layer can pass form values straight through.
//! Row values are the opposite: they are free text from the data source and
//! are only ever coerced on demand.

mod bus_type;
mod price;
mod rating;
mod route;
mod time_of_day;
mod trip;

pub use bus_type::BusTypeClass;
pub use price::{PriceBand, PriceOrder, coerce_number};
pub use rating::{RatingPolicy, RatingTier};
pub use route::{InvalidRoute, RouteName, RoutePrefix};
pub use time_of_day::{TimeBucket, parse_time_of_day};
pub use trip::Trip;

/// Error returned when a filter or option label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct InvalidLabel {
    kind: &'static str,
    value: String,
}

impl InvalidLabel {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
