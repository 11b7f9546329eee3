//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{error, warn};

use crate::dispatch::{DispatchError, JourneySubmitter};
use crate::planner::{PlanError, RoutingRequest, plan_journey};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: JourneySubmitter + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/journey/preview", post(preview_journey))
        .route("/journey/submit", post(submit_journey::<S>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan a journey without submitting it.
async fn preview_journey(
    Json(req): Json<RoutingRequest>,
) -> Result<Json<PreviewJourneyResponse>, AppError> {
    let planned = plan_journey(&req)?;
    Ok(Json(planned.into()))
}

/// Plan a journey, merge pricing and submit it upstream.
async fn submit_journey<S>(
    State(state): State<AppState<S>>,
    Json(req): Json<SubmitJourneyRequest>,
) -> Result<Json<SubmitJourneyResponse>, AppError>
where
    S: JourneySubmitter + Send + Sync + 'static,
{
    let planned = plan_journey(&req.routing)?;
    let payload = planned.payload.with_pricing(req.price, req.cost);

    let journey_id = state.submitter.submit_journey(&payload).await?;

    Ok(Json(SubmitJourneyResponse {
        journey_id,
        stops: planned.stops,
        warnings: planned.warnings,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unprocessable { message: String },
    Upstream { message: String },
    /// Dispatch is temporarily unreachable; the same request may succeed later
    Unavailable { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(_) | PlanError::NoPickupStops => AppError::BadRequest {
                message: e.to_string(),
            },
            PlanError::MissingIdentifier { .. } => AppError::Unprocessable {
                message: e.to_string(),
            },
        }
    }
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        let message = e.to_string();
        if e.is_retryable() {
            AppError::Unavailable { message }
        } else {
            AppError::Upstream { message }
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest { message }
            | AppError::Unprocessable { message }
            | AppError::Upstream { message }
            | AppError::Unavailable { message } => message,
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
