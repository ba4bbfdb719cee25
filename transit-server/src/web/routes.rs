//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::client::ClientError;
use crate::estimate::{EstimateError, TripEstimate};
use crate::planner::{Planner, SearchError, SearchRequest};
use crate::stops::StopError;

use super::dto::*;
use super::state::{AppState, RouteSource};

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/routes/find", post(find_routes))
        .route("/api/stops/suggest", get(suggest_stops))
        .route("/api/trips/estimate", post(estimate_trip))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Find direct and combined routes between two catalog stops.
async fn find_routes(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RouteResponse>, AppError> {
    let req: FindRouteRequest = parse_body(&body)?;

    // Both ends must be catalog stops before anything is searched
    let origin = state.catalog.canonicalize(&req.origin)?.to_string();
    let destination = state.catalog.canonicalize(&req.destination)?.to_string();

    let routes = match &state.routes {
        RouteSource::Local { graph, config } => {
            let graph = Arc::clone(graph);
            let config = Arc::clone(config);
            let request = SearchRequest::new(origin.clone(), destination.clone());

            tokio::task::spawn_blocking(move || {
                Planner::new(&graph, &config)
                    .search(&request)
                    .map(|result| result.routes)
            })
            .await
            .map_err(|e| AppError::Internal {
                message: format!("route search task failed: {e}"),
            })??
        }
        RouteSource::Remote(client) => {
            Arc::unwrap_or_clone(client.find_route(&origin, &destination).await?)
        }
    };

    Ok(Json(RouteResponse::new(origin, destination, routes)))
}

/// Autocomplete stop names.
async fn suggest_stops(
    State(state): State<AppState>,
    Query(req): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    let limit = req.limit.unwrap_or(usize::MAX);
    let stops = state
        .catalog
        .suggest(&req.q, req.all_on_empty)
        .into_iter()
        .take(limit)
        .map(str::to_string)
        .collect();

    Json(SuggestResponse { stops })
}

/// Estimate travel time and fare for one mode.
async fn estimate_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TripEstimate>, AppError> {
    let req: EstimateRequest = parse_body(&body)?;
    let estimate = state
        .estimator
        .estimate(req.distance_km, req.baseline_minutes, req.mode)?;
    Ok(Json(estimate))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<StopError> for AppError {
    fn from(e: StopError) -> Self {
        match e {
            StopError::UnknownStop(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<EstimateError> for AppError {
    fn from(e: EstimateError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(e: ClientError) -> Self {
        AppError::Internal {
            message: format!("route backend: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
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
