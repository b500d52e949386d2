//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::domain::{SearchCriteria, StationCode};
use crate::itinerary::{AssemblyError, PlanError, SelectionError};
use crate::stations::{long_haul_options, regional_options};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/options", get(station_options))
        .route("/api/stations/:id/name", get(station_name))
        .route("/api/route", get(route))
        .route("/api/plan", post(plan_trip))
        .route(
            "/api/itinerary",
            post(select_itinerary).get(current_itinerary),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plottable stations; empty until the directory has loaded.
async fn list_stations(State(state): State<AppState>) -> Json<StationMarkersResponse> {
    let snapshot = state.directory.snapshot().await;
    let stations = snapshot
        .markers()
        .into_iter()
        .filter_map(StationMarker::from_record)
        .collect();

    Json(StationMarkersResponse {
        loaded: !snapshot.is_empty(),
        stations,
    })
}

/// Stations offered in the search form.
async fn station_options() -> Json<StationOptionsResponse> {
    Json(StationOptionsResponse {
        regional: regional_options().map(Into::into).collect(),
        long_haul: long_haul_options().map(Into::into).collect(),
    })
}

/// Display name for a raw stop id.
async fn station_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<StationNameResponse> {
    let name = state.names.resolve(&id);
    Json(StationNameResponse { id, name })
}

/// Route from the hub to a destination.
///
/// Without a `destination` parameter, the current search's destination is
/// used.
async fn route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Json<RouteResponse> {
    let destination = match query.destination {
        Some(code) => Some(StationCode::new(code)).filter(|c| !c.is_empty()),
        None => state
            .session
            .snapshot()
            .await
            .criteria
            .as_ref()
            .map(|c| c.destination.clone()),
    };

    let directory = state.directory.snapshot().await;
    state
        .session
        .update_route(destination.as_ref(), &directory)
        .await;
    let snapshot = state.session.snapshot().await;

    Json(RouteResponse {
        destination: destination.map(|c| c.to_string()),
        route: snapshot.route.clone(),
        viewport: snapshot.viewport.clone(),
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render(template: &impl Template) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Submit a trip search.
async fn plan_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let criteria: SearchCriteria = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    // Rejected searches leave the current results and selection in place
    criteria.validate().map_err(PlanError::from)?;

    let ticket = state.session.begin_search(criteria.clone()).await;
    let directory = state.directory.snapshot().await;
    state
        .session
        .update_route(Some(&criteria.destination), &directory)
        .await;

    let outcome = state.assembler.plan_trip(&criteria).await;
    if !state.session.finish_search(ticket, &outcome).await {
        return Err(AppError::superseded());
    }
    let itineraries = outcome?;

    if accepts_html(&headers) {
        render(&PlanResultsTemplate {
            itineraries: itineraries
                .iter()
                .enumerate()
                .map(|(i, s)| ItineraryCardView::from_summary(i, s))
                .collect(),
        })
    } else {
        Ok(Json(PlanResponse { itineraries }).into_response())
    }
}

/// Expand one itinerary of the current results.
async fn select_itinerary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SelectItineraryRequest>,
) -> Result<Response, AppError> {
    let selection = state.session.begin_selection(req.index).await?;

    let outcome = state
        .assembler
        .assemble_detail(&selection.summary, &selection.origin, &selection.destination)
        .await;
    if !state
        .session
        .finish_selection(selection.ticket, &outcome)
        .await
    {
        return Err(AppError::superseded());
    }
    let detail = outcome?;

    if accepts_html(&headers) {
        render(&ItineraryDetailTemplate::new(&detail, &state.names))
    } else {
        Ok(Json(ItineraryDetailResponse::new(detail)).into_response())
    }
}

/// The currently expanded itinerary.
async fn current_itinerary(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let snapshot = state.session.snapshot().await;
    let detail = snapshot.detail.detail().ok_or_else(|| AppError::NotFound {
        message: "No itinerary selected.".to_string(),
    })?;

    if accepts_html(&headers) {
        render(&ItineraryDetailTemplate::new(detail, &state.names))
    } else {
        Ok(Json(ItineraryDetailResponse::new(detail.clone())).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    BadGateway { message: String },
    Internal { message: String },
}

impl AppError {
    /// A newer search or selection replaced this one while it was in flight.
    fn superseded() -> Self {
        AppError::Conflict {
            message: "Superseded by a newer request.".to_string(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::Invalid(_) => AppError::BadRequest {
                message: e.user_message(),
            },
            PlanError::Service(_) => AppError::BadGateway {
                message: e.user_message(),
            },
        }
    }
}

impl From<SelectionError> for AppError {
    fn from(e: SelectionError) -> Self {
        AppError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<AssemblyError> for AppError {
    fn from(e: AssemblyError) -> Self {
        AppError::BadRequest {
            message: format!("This itinerary cannot be expanded: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
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
