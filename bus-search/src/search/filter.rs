//! The filter engine.

use crate::domain::{BusTypeClass, PriceBand, RatingPolicy, RatingTier, TimeBucket, Trip};

/// The filters chosen for one render cycle.
///
/// Every field is independent; `None` or an empty set leaves that dimension
/// unconstrained. Active filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    /// Time-of-day bucket the departure must fall in.
    pub departing: Option<TimeBucket>,
    /// Time-of-day bucket the arrival must fall in.
    pub reaching: Option<TimeBucket>,
    pub bus_type: Option<BusTypeClass>,
    /// Interpreted through the engine's [`RatingPolicy`].
    pub star_rating: Option<RatingTier>,
    pub price: Option<PriceBand>,
    /// Exact star ratings to keep.
    pub ratings: Vec<f64>,
    /// Exact bus type strings to keep.
    pub bus_types: Vec<String>,
}

impl FilterSelection {
    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        self.departing.is_none()
            && self.reaching.is_none()
            && self.bus_type.is_none()
            && self.star_rating.is_none()
            && self.price.is_none()
            && self.ratings.is_empty()
            && self.bus_types.is_empty()
    }
}

/// Applies a [`FilterSelection`] to fetched trips.
///
/// Stateless apart from the rating policy. A row whose value for an active
/// dimension is missing or cannot be coerced fails that dimension; it never
/// causes an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine {
    rating_policy: RatingPolicy,
}

impl FilterEngine {
    pub fn new(rating_policy: RatingPolicy) -> Self {
        Self { rating_policy }
    }

    pub fn rating_policy(&self) -> RatingPolicy {
        self.rating_policy
    }

    /// Trips passing every active filter, in input order.
    ///
    /// Returned rows are clones of the input rows, unchanged. With an empty
    /// selection the input comes back as is.
    pub fn apply(&self, trips: &[Trip], selection: &FilterSelection) -> Vec<Trip> {
        if selection.is_empty() {
            return trips.to_vec();
        }
        trips
            .iter()
            .filter(|trip| self.keeps(trip, selection))
            .cloned()
            .collect()
    }

    /// Whether one trip passes every active filter.
    pub fn keeps(&self, trip: &Trip, selection: &FilterSelection) -> bool {
        if let Some(bucket) = selection.departing
            && !trip.departing_time_of_day().is_some_and(|t| bucket.contains(t))
        {
            return false;
        }
        if let Some(bucket) = selection.reaching
            && !trip.reaching_time_of_day().is_some_and(|t| bucket.contains(t))
        {
            return false;
        }
        if let Some(class) = selection.bus_type
            && !trip.bus_type.as_deref().is_some_and(|b| class.matches(b))
        {
            return false;
        }
        if let Some(tier) = selection.star_rating
            && !trip
                .star_rating_value()
                .is_some_and(|r| self.rating_policy.accepts(tier, r))
        {
            return false;
        }
        if let Some(band) = selection.price
            && !trip.price_value().is_some_and(|p| band.contains(p))
        {
            return false;
        }
        if !selection.ratings.is_empty() {
            let Some(rating) = trip.star_rating_value() else {
                return false;
            };
            if !selection.ratings.contains(&rating) {
                return false;
            }
        }
        if !selection.bus_types.is_empty() {
            let Some(bus_type) = trip.bus_type.as_deref() else {
                return false;
            };
            if !selection.bus_types.iter().any(|b| b == bus_type) {
                return false;
            }
        }
        true
    }
}

/// Distinct numeric star ratings, in the order first seen.
pub fn distinct_ratings(trips: &[Trip]) -> Vec<f64> {
    let mut ratings: Vec<f64> = Vec::new();
    for rating in trips.iter().filter_map(Trip::star_rating_value) {
        if !ratings.contains(&rating) {
            ratings.push(rating);
        }
    }
    ratings
}

/// Distinct bus type strings, in the order first seen.
pub fn distinct_bus_types(trips: &[Trip]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for bus_type in trips.iter().filter_map(|t| t.bus_type.as_deref()) {
        if !types.iter().any(|t| t == bus_type) {
            types.push(bus_type.to_string());
        }
    }
    types
}
