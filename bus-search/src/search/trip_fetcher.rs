//! Trips for one route.

use tracing::debug;

use crate::domain::{PriceOrder, RouteName, Trip};
use crate::source::{SourceError, TripSession};

/// Every trip on exactly `route`.
///
/// Without `order` the sequence has no guaranteed order. With it, trips are
/// sorted by star rating (highest first) and then by price in the requested
/// direction. An empty result means the route has no trips and is not an
/// error.
pub async fn fetch(
    session: &mut dyn TripSession,
    route: &RouteName,
    order: Option<PriceOrder>,
) -> Result<Vec<Trip>, SourceError> {
    let mut trips = session.trips(route, order).await?;

    // Case-insensitive collations can widen an equality match.
    trips.retain(|t| t.route_name == route.as_str());

    debug!(%route, ?order, count = trips.len(), "fetched trips");
    Ok(trips)
}
