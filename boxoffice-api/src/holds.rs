use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use boxoffice_core::HoldId;
use boxoffice_hold::{AvailabilitySnapshot, HoldStatus};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/seats/available", get(seats_available))
        .route("/v1/availability", get(availability))
        .route("/v1/holds", post(create_hold))
        .route("/v1/holds/{hold_id}", get(hold_status))
        .route("/v1/holds/{hold_id}/reservation", post(reserve_hold))
}

#[derive(Debug, Serialize)]
struct SeatsAvailableResponse {
    seats_available: u32,
}

#[derive(Debug, Deserialize)]
struct CreateHoldRequest {
    num_seats: i64,
}

#[derive(Debug, Serialize)]
struct CreateHoldResponse {
    hold_id: HoldId,
    num_seats: u32,
    expires_in_ms: u64,
    expires_at: i64,
}

#[derive(Debug, Serialize)]
struct HoldStatusResponse {
    hold_id: HoldId,
    status: HoldStatus,
}

#[derive(Debug, Serialize)]
struct ReservationResponse {
    reservation_id: String,
}

async fn seats_available(State(state): State<AppState>) -> Json<SeatsAvailableResponse> {
    Json(SeatsAvailableResponse {
        seats_available: state.tickets.num_seats_available(),
    })
}

async fn availability(State(state): State<AppState>) -> Json<AvailabilitySnapshot> {
    Json(state.tickets.snapshot())
}

async fn create_hold(
    State(state): State<AppState>,
    Json(req): Json<CreateHoldRequest>,
) -> Result<impl IntoResponse, AppError> {
    if req.num_seats <= 0 {
        return Err(AppError::ValidationError(
            "num_seats must be greater than zero".to_string(),
        ));
    }
    let num_seats = u32::try_from(req.num_seats)
        .map_err(|_| AppError::ValidationError(format!("num_seats too large: {}", req.num_seats)))?;

    let hold = state
        .tickets
        .find_and_hold_seats(num_seats)?
        .ok_or_else(|| AppError::ConflictError("Not enough seats available".to_string()))?;

    // Fresh hold, so the full TTL remains
    let ttl = state.tickets.hold_ttl();
    info!(hold_id = %hold.id(), seats = num_seats, "hold created");

    Ok((
        StatusCode::CREATED,
        Json(CreateHoldResponse {
            hold_id: hold.id().clone(),
            num_seats: hold.num_seats(),
            expires_in_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            expires_at: Utc::now()
                .timestamp()
                .saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)),
        }),
    ))
}

async fn hold_status(
    State(state): State<AppState>,
    Path(hold_id): Path<String>,
) -> Json<HoldStatusResponse> {
    let hold_id = HoldId::from(hold_id);
    let status = state.tickets.check_hold(&hold_id);
    Json(HoldStatusResponse { hold_id, status })
}

async fn reserve_hold(
    State(state): State<AppState>,
    Path(hold_id): Path<String>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation_id = state.tickets.reserve(&HoldId::from(hold_id))?;
    Ok(Json(ReservationResponse { reservation_id }))
}
