//! Access to the trips table.
//!
//! A [`TripSource`] is long-lived and shared by every request. Each render
//! cycle opens one [`TripSession`] from it, runs at most a couple of queries
//! and drops the session when the cycle ends, on success or failure. For the
//! SQL source a session owns one pooled connection, so dropping the session
//! hands the connection back.
//!
//! Two sources exist:
//! - [`SqlTripSource`]: MySQL (or SQLite) through sqlx's `Any` driver
//! - [`MemoryTripSource`]: a fixed set of trips, optionally loaded from a
//!   JSON file, for development and tests

mod error;
mod memory;
mod sql;

use async_trait::async_trait;

use crate::domain::{PriceOrder, RouteName, RoutePrefix, Trip};

pub use error::SourceError;
pub use memory::MemoryTripSource;
pub use sql::SqlTripSource;

/// A place trips can be read from.
#[async_trait]
pub trait TripSource: Send + Sync {
    /// Open a session for one render cycle.
    ///
    /// Fails with [`SourceError::Unavailable`] when no connection can be made.
    async fn open(&self) -> Result<Box<dyn TripSession>, SourceError>;

    /// Short description for logs, without credentials.
    fn describe(&self) -> String;
}

/// Read-only queries over the trips table, valid for one render cycle.
#[async_trait]
pub trait TripSession: Send {
    /// Distinct route names starting with `prefix`.
    ///
    /// Implementations match case-insensitively. Ordering and uniqueness are
    /// re-established by [`crate::search::route_index`], so backends may
    /// return names in collation order.
    async fn route_names(&mut self, prefix: &RoutePrefix) -> Result<Vec<String>, SourceError>;

    /// Every trip on exactly `route`.
    ///
    /// With `order` set, trips come back sorted by star rating (highest
    /// first) and then by price in the given direction.
    async fn trips(
        &mut self,
        route: &RouteName,
        order: Option<PriceOrder>,
    ) -> Result<Vec<Trip>, SourceError>;
}
