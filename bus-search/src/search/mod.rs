//! Route lookup, trip retrieval and trip filtering.
//!
//! [`route_index`] and [`trip_fetcher`] run against an open
//! [`TripSession`](crate::source::TripSession). The [`FilterEngine`] is pure:
//! it takes the fetched trips and a [`FilterSelection`] and returns the
//! subset that passes every active predicate.

mod filter;
pub mod route_index;
pub mod trip_fetcher;


pub use filter::{FilterEngine, FilterSelection, distinct_bus_types, distinct_ratings};
