//! Askama templates for the dashboard page.

use askama::Template;

use crate::dashboard::{Dashboard, DashboardSettings, Notice};
use crate::domain::{BusTypeClass, PriceBand, PriceOrder, RatingTier, TimeBucket, Trip};

/// The search dashboard.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub prefix: String,
    pub routes: Vec<SelectOption>,
    pub sort: Vec<SelectOption>,
    pub departing: Vec<SelectOption>,
    pub reaching: Vec<SelectOption>,
    pub bus_type: Vec<SelectOption>,
    pub star_rating: Vec<SelectOption>,
    pub price: Vec<SelectOption>,
    pub ratings: Vec<SelectOption>,
    pub bus_types: Vec<SelectOption>,
    /// The route listing followed by the filtered results, when present.
    pub tables: Vec<TripTable>,
    pub notices: Vec<NoticeView>,
    pub rating_policy: &'static str,
}

impl DashboardTemplate {
    pub fn new(dashboard: &Dashboard, settings: DashboardSettings) -> Self {
        let filters = &dashboard.filters;
        let selected_route = dashboard.selected_route.as_deref();

        Self {
            prefix: dashboard.prefix.clone(),
            routes: dashboard
                .routes
                .iter()
                .map(|r| SelectOption::new(r, r, Some(r.as_str()) == selected_route))
                .collect(),
            sort: PriceOrder::ALL
                .into_iter()
                .map(|o| SelectOption::new(o.label(), o.label(), dashboard.order == Some(o)))
                .collect(),
            departing: choices(&TimeBucket::ALL, filters.departing, TimeBucket::label),
            reaching: choices(&TimeBucket::ALL, filters.reaching, TimeBucket::label),
            bus_type: choices(&BusTypeClass::ALL, filters.bus_type, BusTypeClass::label),
            star_rating: with_any(
                RatingTier::ALL
                    .into_iter()
                    .map(|t| {
                        let stars = t.to_string();
                        SelectOption::new(&stars, &stars, filters.star_rating == Some(t))
                    })
                    .collect(),
            ),
            price: choices(&PriceBand::ALL, filters.price, PriceBand::label),
            ratings: dashboard
                .rating_options
                .iter()
                .map(|r| {
                    let value = r.to_string();
                    SelectOption::new(&value, &value, filters.ratings.contains(r))
                })
                .collect(),
            bus_types: dashboard
                .bus_type_options
                .iter()
                .map(|b| SelectOption::new(b, b, filters.bus_types.contains(b)))
                .collect(),
            tables: tables(dashboard),
            notices: dashboard.notices.iter().map(NoticeView::from_notice).collect(),
            rating_policy: settings.rating_policy.name(),
        }
    }
}

/// A titled table of trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripTable {
    pub heading: String,
    pub rows: Vec<TripView>,
}

impl TripTable {
    fn new(heading: String, trips: &[Trip]) -> Self {
        Self {
            heading,
            rows: trips.iter().map(TripView::from_trip).collect(),
        }
    }
}

fn tables(dashboard: &Dashboard) -> Vec<TripTable> {
    let mut tables = Vec::new();

    if let Some(route) = &dashboard.selected_route
        && !dashboard.trips.is_empty()
    {
        tables.push(TripTable::new(
            format!("Bus details for route: {route}"),
            &dashboard.trips,
        ));
    }

    if let Some(results) = dashboard.results.as_deref().filter(|r| !r.is_empty()) {
        let heading = if dashboard.filters.is_empty() {
            format!("All buses ({})", results.len())
        } else {
            format!("Filtered results ({})", results.len())
        };
        tables.push(TripTable::new(heading, results));
    }

    tables
}

/// An `<option>` in a select control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: &str, label: &str, selected: bool) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected,
        }
    }
}

/// Options for a single-choice filter, led by an "Any" entry that leaves it
/// unset.
fn choices<T: Copy + PartialEq>(
    all: &[T],
    selected: Option<T>,
    label: fn(T) -> &'static str,
) -> Vec<SelectOption> {
    with_any(
        all.iter()
            .map(|&item| SelectOption::new(label(item), label(item), selected == Some(item)))
            .collect(),
    )
}

fn with_any(options: Vec<SelectOption>) -> Vec<SelectOption> {
    let any = SelectOption::new("", "Any", !options.iter().any(|o| o.selected));
    std::iter::once(any).chain(options).collect()
}

/// A trip row for display. Missing values show as empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripView {
    pub route_name: String,
    pub departing_time: String,
    pub reaching_time: String,
    pub price: String,
    pub seat_availability: String,
    pub star_rating: String,
    pub bus_type: String,
}

impl TripView {
    pub fn from_trip(trip: &Trip) -> Self {
        let cell = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            route_name: trip.route_name.clone(),
            departing_time: cell(&trip.departing_time),
            reaching_time: cell(&trip.reaching_time),
            price: cell(&trip.price),
            seat_availability: cell(&trip.seat_availability),
            star_rating: cell(&trip.star_rating),
            bus_type: cell(&trip.bus_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    /// CSS class: info, warning or error
    pub level: &'static str,
    pub message: String,
}

impl NoticeView {
    pub fn from_notice(notice: &Notice) -> Self {
        Self {
            level: notice.level.as_str(),
            message: notice.message.clone(),
        }
    }
}
