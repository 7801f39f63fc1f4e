use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::{Booking, CreateBooking},
    AppState,
};

pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<CreateBooking>, JsonRejection>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let Json(payload) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let booking = state.bookings.create_booking(payload).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Booking successful",
            "booking": booking,
        })),
    ))
}

pub async fn list_bookings(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Vec<Booking>>)> {
    let bookings = state.bookings.list_bookings().await?;

    info!(count = bookings.len(), "Listed bookings");

    Ok((StatusCode::OK, Json(bookings)))
}
