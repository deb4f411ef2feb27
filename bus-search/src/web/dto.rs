//! Data transfer objects for web requests and responses.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dashboard::{DEFAULT_PREFIX, DashboardRequest};
use crate::domain::{PriceOrder, Trip, coerce_number};
use crate::search::FilterSelection;

/// Request for route names.
#[derive(Debug, Deserialize)]
pub struct RoutesRequest {
    /// Leading characters of the route name
    pub prefix: Option<String>,
}

/// Response listing route names.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoutesResponse {
    /// Matching routes, sorted
    pub routes: Vec<String>,
}

/// Request for the trips on one route.
#[derive(Debug, Deserialize)]
pub struct TripsRequest {
    /// Exact route name
    pub route: Option<String>,

    /// Price order, e.g. "Low to High" or "desc"
    pub sort: Option<String>,
}

/// Response listing a route's trips.
#[derive(Debug, Serialize, Deserialize)]
pub struct TripsResponse {
    pub route: String,
    pub trips: Vec<Trip>,
}

/// Response for a filtered search.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub route: String,

    /// Whether any filter was active
    pub filtered: bool,

    pub trips: Vec<Trip>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Search parameters shared by the dashboard page and the search API.
///
/// Read from raw query pairs so that `rating` and `type` can repeat. Blank
/// values count as unset. Values that do not parse are left unset and
/// recorded in `rejected`; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub prefix: Option<String>,
    pub route: Option<String>,
    pub order: Option<PriceOrder>,
    pub filters: FilterSelection,
    pub rejected: Vec<String>,
}

impl SearchParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "prefix" => params.prefix = Some(value.to_string()),
                "route" => params.route = Some(value.to_string()),
                "sort" => params.order = params.parse(key, value),
                "departing" => params.filters.departing = params.parse(key, value),
                "reaching" => params.filters.reaching = params.parse(key, value),
                "bus_type" => params.filters.bus_type = params.parse(key, value),
                "star_rating" => params.filters.star_rating = params.parse(key, value),
                "price" => params.filters.price = params.parse(key, value),
                "rating" => match coerce_number(value) {
                    Some(rating) if !params.filters.ratings.contains(&rating) => {
                        params.filters.ratings.push(rating);
                    }
                    Some(_) => {}
                    None => params.reject(key, value),
                },
                "type" => {
                    if !params.filters.bus_types.iter().any(|t| t == value) {
                        params.filters.bus_types.push(value.to_string());
                    }
                }
                _ => {}
            }
        }

        params
    }

    /// The first rejected parameter, if any.
    pub fn first_rejected(&self) -> Option<&str> {
        self.rejected.first().map(String::as_str)
    }

    /// The dashboard request, defaulting the prefix.
    pub fn into_request(self) -> DashboardRequest {
        DashboardRequest {
            prefix: self.prefix.unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            route: self.route,
            order: self.order,
            filters: self.filters,
        }
    }

    fn parse<T: FromStr>(&mut self, key: &str, value: &str) -> Option<T> {
        let parsed = value.parse().ok();
        if parsed.is_none() {
            self.reject(key, value);
        }
        parsed
    }

    fn reject(&mut self, key: &str, value: &str) {
        self.rejected.push(format!("invalid {key}: {value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusTypeClass, PriceBand, RatingTier, TimeBucket};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_every_filter() {
        let params = SearchParams::from_pairs(&pairs(&[
            ("prefix", "c"),
            ("route", "Chennai to Bangalore"),
            ("sort", "High to Low"),
            ("departing", "Morning"),
            ("reaching", "night"),
            ("bus_type", "Semi Sleeper"),
            ("star_rating", "4"),
            ("price", "500 - 1000"),
            ("rating", "4.5"),
            ("rating", "3.9"),
            ("rating", "4.50"),
            ("type", "AC Sleeper"),
            ("type", "AC Sleeper"),
        ]));

        assert!(params.rejected.is_empty());
        assert_eq!(params.prefix.as_deref(), Some("c"));
        assert_eq!(params.route.as_deref(), Some("Chennai to Bangalore"));
        assert_eq!(params.order, Some(PriceOrder::HighToLow));
        assert_eq!(
            params.filters,
            FilterSelection {
                departing: Some(TimeBucket::Morning),
                reaching: Some(TimeBucket::Night),
                bus_type: Some(BusTypeClass::SemiSleeper),
                star_rating: RatingTier::new(4),
                price: Some(PriceBand::From500To1000),
                ratings: vec![4.5, 3.9],
                bus_types: vec!["AC Sleeper".into()],
            }
        );
    }

    #[test]
    fn blank_values_are_unset() {
        let params = SearchParams::from_pairs(&pairs(&[
            ("prefix", " "),
            ("departing", ""),
            ("price", ""),
            ("type", "  "),
        ]));

        assert_eq!(params, SearchParams::default());
        assert_eq!(params.into_request().prefix, "A");
    }

    #[test]
    fn invalid_values_are_recorded() {
        let params = SearchParams::from_pairs(&pairs(&[
            ("departing", "Dusk"),
            ("rating", "five"),
            ("star_rating", "9"),
            ("colour", "red"),
        ]));

        assert!(params.filters.is_empty());
        assert_eq!(params.rejected.len(), 3);
        assert_eq!(params.first_rejected(), Some("invalid departing: \"Dusk\""));
    }

    #[test]
    fn into_request_keeps_selection() {
        let request = SearchParams::from_pairs(&pairs(&[
            ("prefix", "b"),
            ("route", "Bangalore to Goa"),
            ("price", "Below 500"),
        ]))
        .into_request();

        assert_eq!(request.prefix, "b");
        assert_eq!(request.route.as_deref(), Some("Bangalore to Goa"));
        assert_eq!(request.filters.price, Some(PriceBand::Below500));
        assert_eq!(request.order, None);
    }

    #[test]
    fn error_response_json() {
        let json = serde_json::to_string(&ErrorResponse {
            error: "bad".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"error":"bad"}"#);
    }
}
