//! In-memory trip source.
//!
//! Serves a fixed list of trips, either built in code or loaded from a JSON
//! file holding an array of trip objects. Useful for running the dashboard
//! without a database and for tests.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{PriceOrder, RouteName, RoutePrefix, Trip};

use super::{SourceError, TripSession, TripSource};

/// Trip source backed by a vector of trips.
#[derive(Debug, Clone, Default)]
pub struct MemoryTripSource {
    trips: Arc<Vec<Trip>>,
}

impl MemoryTripSource {
    pub fn new(trips: Vec<Trip>) -> Self {
        Self {
            trips: Arc::new(trips),
        }
    }

    /// Load trips from a JSON file containing an array of trip objects.
    ///
    /// Missing optional fields default to `null`. Prices, seat counts and
    /// ratings may be JSON numbers or strings.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| {
            SourceError::Unavailable(format!("failed to read {}: {}", path.display(), e))
        })?;

        let trips: Vec<Trip> = serde_json::from_str(&json).map_err(|e| {
            SourceError::Unavailable(format!("failed to parse {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), count = trips.len(), "loaded trips file");
        Ok(Self::new(trips))
    }

    /// Number of trips held.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

#[async_trait]
impl TripSource for MemoryTripSource {
    async fn open(&self) -> Result<Box<dyn TripSession>, SourceError> {
        Ok(Box::new(MemorySession {
            trips: Arc::clone(&self.trips),
        }))
    }

    fn describe(&self) -> String {
        format!("in-memory ({} trips)", self.trips.len())
    }
}

struct MemorySession {
    trips: Arc<Vec<Trip>>,
}

#[async_trait]
impl TripSession for MemorySession {
    async fn route_names(&mut self, prefix: &RoutePrefix) -> Result<Vec<String>, SourceError> {
        let mut names: Vec<String> = self
            .trips
            .iter()
            .filter(|t| prefix.matches(&t.route_name))
            .map(|t| t.route_name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    async fn trips(
        &mut self,
        route: &RouteName,
        order: Option<PriceOrder>,
    ) -> Result<Vec<Trip>, SourceError> {
        let mut trips: Vec<Trip> = self
            .trips
            .iter()
            .filter(|t| t.route_name == route.as_str())
            .cloned()
            .collect();

        if let Some(order) = order {
            sort_for_listing(&mut trips, order);
        }
        Ok(trips)
    }
}

/// Star rating descending, then price in `order`. Unparsable values sort last.
fn sort_for_listing(trips: &mut [Trip], order: PriceOrder) {
    trips.sort_by(|a, b| {
        let by_rating = compare_present(a.star_rating_value(), b.star_rating_value(), false);
        by_rating.then_with(|| {
            compare_present(a.price_value(), b.price_value(), order.is_ascending())
        })
    });
}

fn compare_present(a: Option<f64>, b: Option<f64>, ascending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if ascending => x.total_cmp(&y),
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn trip(route: &str, rating: &str, price: &str) -> Trip {
        let mut t = Trip::new(route);
        t.star_rating = Some(rating.to_string());
        t.price = Some(price.to_string());
        t
    }

    fn source() -> MemoryTripSource {
        MemoryTripSource::new(vec![
            trip("Chennai to Bangalore", "4.5", "900"),
            trip("Chennai to Bangalore", "3.1", "450"),
            trip("Chennai to Bangalore", "4.5", "700"),
            trip("Chennai to Bangalore", "n/a", "300"),
            trip("chennai to Madurai", "4.0", "650"),
            trip("Coimbatore to Chennai", "3.9", "800"),
            trip("Bangalore to Chennai", "4.2", "1200"),
        ])
    }

    fn prices(trips: &[Trip]) -> Vec<&str> {
        trips.iter().filter_map(|t| t.price.as_deref()).collect()
    }

    #[tokio::test]
    async fn route_names_by_prefix() {
        let mut session = source().open().await.unwrap();
        let prefix = RoutePrefix::parse("ch").unwrap();

        let names = session.route_names(&prefix).await.unwrap();
        assert_eq!(names, vec!["Chennai to Bangalore", "chennai to Madurai"]);
    }

    #[tokio::test]
    async fn route_names_none_found() {
        let mut session = source().open().await.unwrap();
        let prefix = RoutePrefix::parse("ZZ").unwrap();

        assert!(session.route_names(&prefix).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn trips_for_exact_route() {
        let mut session = source().open().await.unwrap();
        let route = RouteName::parse("Chennai to Bangalore").unwrap();

        let trips = session.trips(&route, None).await.unwrap();
        assert_eq!(trips.len(), 4);
        assert_eq!(prices(&trips), vec!["900", "450", "700", "300"]);

        let other_case = RouteName::parse("chennai to bangalore").unwrap();
        assert!(session.trips(&other_case, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn trips_sorted_low_to_high() {
        let mut session = source().open().await.unwrap();
        let route = RouteName::parse("Chennai to Bangalore").unwrap();

        let trips = session
            .trips(&route, Some(PriceOrder::LowToHigh))
            .await
            .unwrap();
        assert_eq!(prices(&trips), vec!["700", "900", "450", "300"]);
    }

    #[tokio::test]
    async fn trips_sorted_high_to_low() {
        let mut session = source().open().await.unwrap();
        let route = RouteName::parse("Chennai to Bangalore").unwrap();

        let trips = session
            .trips(&route, Some(PriceOrder::HighToLow))
            .await
            .unwrap();
        assert_eq!(prices(&trips), vec!["900", "700", "450", "300"]);
    }

    #[test]
    fn load_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"route_name": "Goa to Pune", "departing_time": "21:00:00", "price": "850"}},
                {{"route_name": "Goa to Mumbai", "bus_type": "AC Sleeper"}},
                {{"route_name": "Goa to Hubli", "price": 450, "seat_availability": 12, "star_rating": 4.5}}
            ]"#
        )
        .unwrap();

        let source = MemoryTripSource::from_json_file(file.path()).unwrap();
        assert_eq!(source.len(), 3);
        assert_eq!(source.describe(), "in-memory (3 trips)");
        assert_eq!(source.trips[2].price_value(), Some(450.0));
        assert_eq!(source.trips[2].seat_availability.as_deref(), Some("12"));
    }

    #[tokio::test]
    async fn bundled_sample_data() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/trips.json");
        let source = MemoryTripSource::from_json_file(path).unwrap();
        assert_eq!(source.len(), 21);

        let mut session = source.open().await.unwrap();
        let names = session
            .route_names(&RoutePrefix::parse("a").unwrap())
            .await
            .unwrap();
        assert_eq!(names, vec!["Agra to Delhi", "Ahmedabad to Mumbai"]);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = MemoryTripSource::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn malformed_file_is_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = MemoryTripSource::from_json_file(file.path()).unwrap_err();
        assert!(err.is_unavailable());
        assert!(err.to_string().contains("failed to parse"));
    }
}
