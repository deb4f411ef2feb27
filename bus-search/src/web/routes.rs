//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::dashboard;
use crate::domain::{PriceOrder, RouteName, RoutePrefix};
use crate::search::{FilterEngine, route_index, trip_fetcher};
use crate::source::SourceError;

use super::dto::*;
use super::state::AppState;
use super::templates::DashboardTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(health))
        .route("/api/routes", get(list_routes))
        .route("/api/trips", get(list_trips))
        .route("/api/search", get(search_trips))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The search dashboard.
///
/// Invalid or unknown form values are treated as unset rather than rejected.
async fn dashboard_page(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let request = SearchParams::from_pairs(&pairs).into_request();
    let dashboard = dashboard::build(state.source.as_ref(), &request, state.settings).await;

    let template = DashboardTemplate::new(&dashboard, state.settings);
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html))
}

/// Route names starting with a prefix.
async fn list_routes(
    State(state): State<AppState>,
    Query(req): Query<RoutesRequest>,
) -> Result<Json<RoutesResponse>, AppError> {
    let prefix = RoutePrefix::parse(req.prefix.as_deref().unwrap_or_default()).map_err(|e| {
        AppError::BadRequest {
            message: e.to_string(),
        }
    })?;

    let mut session = state.source.open().await?;
    let routes = route_index::lookup(session.as_mut(), &prefix).await?;

    Ok(Json(RoutesResponse { routes }))
}

/// Every trip on a route, optionally ordered by rating and price.
async fn list_trips(
    State(state): State<AppState>,
    Query(req): Query<TripsRequest>,
) -> Result<Json<TripsResponse>, AppError> {
    let route = parse_route(req.route.as_deref())?;
    let order = req
        .sort
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<PriceOrder>)
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;

    let mut session = state.source.open().await?;
    let trips = trip_fetcher::fetch(session.as_mut(), &route, order).await?;

    Ok(Json(TripsResponse {
        route: route.to_string(),
        trips,
    }))
}

/// A route's trips narrowed by the filter engine.
///
/// Takes the same parameters as the dashboard, but rejects invalid values.
/// Without any filter the route's trips come back unfiltered.
async fn search_trips(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>, AppError> {
    let params = SearchParams::from_pairs(&pairs);
    if let Some(rejected) = params.first_rejected() {
        return Err(AppError::BadRequest {
            message: rejected.to_string(),
        });
    }
    let route = parse_route(params.route.as_deref())?;

    let mut session = state.source.open().await?;
    let trips = trip_fetcher::fetch(session.as_mut(), &route, params.order).await?;
    drop(session);

    let engine = FilterEngine::new(state.settings.rating_policy);
    Ok(Json(SearchResponse {
        route: route.to_string(),
        filtered: !params.filters.is_empty(),
        trips: engine.apply(&trips, &params.filters),
    }))
}

fn parse_route(route: Option<&str>) -> Result<RouteName, AppError> {
    RouteName::parse(route.unwrap_or_default()).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::Unavailable(_) => AppError::Unavailable {
                message: e.to_string(),
            },
            SourceError::Query(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
