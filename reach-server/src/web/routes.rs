//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::{debug, error, warn};

use crate::cache::SearchKey;
use crate::domain::{CellId, ModeSet};
use crate::planner::{
    Budgets, DestinationDetail, Planner, ReachabilityResult, SearchError, SearchRequest,
};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/reachability", get(reachability))
        .route("/destination", get(destination))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Earliest arrival at every reachable cell.
async fn reachability(
    State(state): State<AppState>,
    Query(query): Query<ReachabilityQuery>,
) -> Result<Json<ReachabilityResponse>, AppError> {
    let request = build_request(&state, &query)?;
    let result = run_search(&state, request).await?;

    Ok(Json(ReachabilityResponse::from_result(&result)))
}

/// Time, distance and cost of reaching one destination.
async fn destination(
    State(state): State<AppState>,
    Query(query): Query<DestinationQuery>,
) -> Result<Json<DestinationResponse>, AppError> {
    let (search, destination) = query.into_parts();

    let destination = parse_cell(&destination, "destination")?;
    if !state.index.contains_cell(&destination) {
        return Err(AppError::NotFound {
            message: format!("Unknown destination cell: {destination}"),
        });
    }

    let request = build_request(&state, &search)?;
    let result = run_search(&state, request).await?;
    let detail = DestinationDetail::for_destination(&result, &state.geo, &state.cost, &destination);

    Ok(Json(DestinationResponse {
        source: result.source().to_string(),
        destination: destination.to_string(),
        reachable: detail.is_some(),
        detail,
    }))
}

fn parse_cell(value: &str, field: &str) -> Result<CellId, AppError> {
    CellId::parse(value).map_err(|e| AppError::BadRequest {
        message: format!("Invalid {field}: {e}"),
    })
}

/// Turn query parameters into a validated search request.
fn build_request(state: &AppState, query: &ReachabilityQuery) -> Result<SearchRequest, AppError> {
    let source = parse_cell(&query.source, "source")?;
    if !state.index.contains_cell(&source) {
        return Err(AppError::NotFound {
            message: format!("Unknown source cell: {source}"),
        });
    }

    let mut budgets = Budgets::from_config(&state.config);
    if let Some(mins) = query.max_minutes {
        budgets = budgets.with_max_elapsed_mins(mins);
    }
    if let Some(euros) = query.max_money {
        budgets = budgets.with_max_money(euros);
    }
    if let Some(kg) = query.max_co2 {
        budgets = budgets.with_max_co2(kg);
    }
    if let Some(modes) = &query.modes {
        let modes = ModeSet::parse_list(modes).map_err(|e| AppError::BadRequest {
            message: e.to_string(),
        })?;
        budgets = budgets.with_modes(modes);
    }

    let hour = query.start_hour.unwrap_or(state.config.start_hour);
    Ok(SearchRequest::at_hour(source, hour, budgets, &state.config)?)
}

/// Serve a search from cache, or run it on the blocking pool.
async fn run_search(
    state: &AppState,
    request: SearchRequest,
) -> Result<Arc<ReachabilityResult>, AppError> {
    let key = SearchKey::for_request(&request);
    if let Some(hit) = state.cache.get(&key).await {
        debug!(source = %request.source, "Search cache hit");
        return Ok(hit);
    }

    let index = state.index.clone();
    let geo = state.geo.clone();
    let cost = state.cost.clone();
    let config = state.config.clone();

    let result = tokio::task::spawn_blocking(move || {
        Planner::new(&index, &geo, &cost, &config).search(&request)
    })
    .await
    .map_err(|e| AppError::Internal {
        message: format!("Search task failed: {e}"),
    })?;

    let result = Arc::new(result);
    state.cache.insert(key, result.clone()).await;
    Ok(result)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
