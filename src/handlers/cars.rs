use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{error::AppResult, models::Car, AppState};

pub async fn list_cars(State(state): State<AppState>) -> AppResult<(StatusCode, Json<Vec<Car>>)> {
    let cars = state.inventory.list_available().await?;

    info!(count = cars.len(), "Listed available cars");

    Ok((StatusCode::OK, Json(cars)))
}
