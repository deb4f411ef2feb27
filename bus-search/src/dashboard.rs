//! One render cycle of the search dashboard.
//!
//! [`build`] walks the same steps a user does on the page: type a prefix,
//! pick a route, look at its trips, narrow them with filters. Each step that
//! comes up empty stops the cycle with a notice instead of an error, and a
//! data source failure stops it with an error notice. The caller only ever
//! gets a [`Dashboard`] back; rendering it is the web layer's job.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, error, warn};

use crate::domain::{InvalidLabel, PriceOrder, RatingPolicy, RouteName, RoutePrefix, Trip};
use crate::search::{
    FilterEngine, FilterSelection, distinct_bus_types, distinct_ratings, route_index,
    trip_fetcher,
};
use crate::source::{SourceError, TripSession, TripSource};

/// Prefix used when the user has not typed one yet.
pub const DEFAULT_PREFIX: &str = "A";

const CONNECTION_FAILED: &str =
    "Unable to connect to the database. Please check your connection settings.";
const NO_ROUTES: &str = "No routes found starting with the specified letter.";
const NO_MATCHES: &str = "No buses found matching the selected filters.";
const SELECT_A_FILTER: &str = "Please select at least one filter to view the results.";

/// What to show when the user has not picked any filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyFilterPolicy {
    /// Show no results and ask the user to pick a filter.
    #[default]
    ShowNothing,
    /// Show every trip on the route.
    ShowAll,
}

impl EmptyFilterPolicy {
    pub fn name(self) -> &'static str {
        match self {
            EmptyFilterPolicy::ShowNothing => "nothing",
            EmptyFilterPolicy::ShowAll => "all",
        }
    }
}

impl FromStr for EmptyFilterPolicy {
    type Err = InvalidLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nothing" | "none" => Ok(EmptyFilterPolicy::ShowNothing),
            "all" => Ok(EmptyFilterPolicy::ShowAll),
            _ => Err(InvalidLabel::new("empty filter policy", s)),
        }
    }
}

/// Policies fixed for the lifetime of the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardSettings {
    pub rating_policy: RatingPolicy,
    pub empty_filter_policy: EmptyFilterPolicy,
}

/// Everything the user has entered on the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardRequest {
    /// Route prefix as typed; blank means no lookup.
    pub prefix: String,
    /// Route chosen in the selector, if any.
    pub route: Option<String>,
    pub order: Option<PriceOrder>,
    pub filters: FilterSelection,
}

impl DashboardRequest {
    /// A request for the given prefix with nothing else selected.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    /// Lowercase name, used as a CSS class.
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message for the user about how the cycle went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// The outcome of one render cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    /// Normalised prefix, empty when none was given.
    pub prefix: String,
    /// Routes matching the prefix, sorted.
    pub routes: Vec<String>,
    /// The route whose trips were fetched.
    pub selected_route: Option<String>,
    pub order: Option<PriceOrder>,
    pub filters: FilterSelection,
    /// Every trip on the selected route, as fetched.
    pub trips: Vec<Trip>,
    /// Trips to show under the filters, or `None` when no result table
    /// should be shown.
    pub results: Option<Vec<Trip>>,
    /// Distinct star ratings on the route, for the exact-rating selector.
    pub rating_options: Vec<f64>,
    /// Distinct bus types on the route, for the exact-type selector.
    pub bus_type_options: Vec<String>,
    pub notices: Vec<Notice>,
}

impl Dashboard {
    fn new(request: &DashboardRequest) -> Self {
        Self {
            order: request.order,
            filters: request.filters.clone(),
            ..Default::default()
        }
    }

    /// Whether the cycle ended on an error.
    pub fn has_error(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

/// Run one render cycle against `source`.
///
/// Opens one session, which is dropped before returning on every path.
/// Never fails: problems are reported through [`Dashboard::notices`].
pub async fn build(
    source: &dyn TripSource,
    request: &DashboardRequest,
    settings: DashboardSettings,
) -> Dashboard {
    let mut dashboard = Dashboard::new(request);

    let mut session = match source.open().await {
        Ok(session) => session,
        Err(e) => {
            warn!(source = %source.describe(), error = %e, "could not open trip source");
            dashboard.notices.push(Notice::error(CONNECTION_FAILED));
            return dashboard;
        }
    };

    if let Err(e) = run(session.as_mut(), request, settings, &mut dashboard).await {
        error!(error = %e, "dashboard cycle failed");
        let notice = if e.is_unavailable() {
            Notice::error(CONNECTION_FAILED)
        } else {
            Notice::error(format!("An error occurred: {e}"))
        };
        dashboard.notices.push(notice);
    }

    debug!(
        prefix = %dashboard.prefix,
        routes = dashboard.routes.len(),
        trips = dashboard.trips.len(),
        results = dashboard.results.as_ref().map(Vec::len),
        notices = dashboard.notices.len(),
        "dashboard built"
    );
    dashboard
}

async fn run(
    session: &mut dyn TripSession,
    request: &DashboardRequest,
    settings: DashboardSettings,
    dashboard: &mut Dashboard,
) -> Result<(), SourceError> {
    let Ok(prefix) = RoutePrefix::parse(&request.prefix) else {
        return Ok(());
    };
    dashboard.prefix = prefix.as_str().to_string();

    dashboard.routes = route_index::lookup(session, &prefix).await?;
    let Some(selected) = select_route(&dashboard.routes, request.route.as_deref()) else {
        dashboard.notices.push(Notice::info(NO_ROUTES));
        return Ok(());
    };
    dashboard.selected_route = Some(selected.clone());

    let no_data = Notice::warning(format!("No data found for Route: {selected}."));
    let Ok(route) = RouteName::parse(&selected) else {
        dashboard.notices.push(no_data);
        return Ok(());
    };

    dashboard.trips = trip_fetcher::fetch(session, &route, request.order).await?;
    if dashboard.trips.is_empty() {
        dashboard.notices.push(no_data);
        return Ok(());
    }
    dashboard.rating_options = distinct_ratings(&dashboard.trips);
    dashboard.bus_type_options = distinct_bus_types(&dashboard.trips);

    if request.filters.is_empty() {
        match settings.empty_filter_policy {
            EmptyFilterPolicy::ShowNothing => {
                dashboard.notices.push(Notice::warning(SELECT_A_FILTER));
            }
            EmptyFilterPolicy::ShowAll => {
                dashboard.results = Some(dashboard.trips.clone());
            }
        }
        return Ok(());
    }

    let engine = FilterEngine::new(settings.rating_policy);
    let results = engine.apply(&dashboard.trips, &request.filters);
    if results.is_empty() {
        dashboard.notices.push(Notice::warning(NO_MATCHES));
    }
    dashboard.results = Some(results);
    Ok(())
}

/// The requested route if it is one of `routes`, else the first route.
fn select_route(routes: &[String], requested: Option<&str>) -> Option<String> {
    requested
        .and_then(|r| routes.iter().find(|name| name.as_str() == r))
        .or_else(|| routes.first())
        .cloned()
}
