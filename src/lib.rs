use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod booking;
pub mod config;
pub mod error;
pub mod handlers;
pub mod inventory;
pub mod models;
pub mod seed;
pub mod store;

use crate::booking::BookingService;
use crate::inventory::Inventory;
use crate::models::{Booking, Car};
use crate::store::RecordStore;

/// Shared application state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub inventory: Inventory,
    pub bookings: Arc<BookingService>,
}

impl AppState {
    pub fn new(cars: Arc<dyn RecordStore<Car>>, bookings: Arc<dyn RecordStore<Booking>>) -> Self {
        let inventory = Inventory::new(cars);
        Self {
            bookings: Arc::new(BookingService::new(inventory.clone(), bookings)),
            inventory,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Status ──────────────────────────────────────────────────────────
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))

        // ── Inventory ───────────────────────────────────────────────────────
        .route("/cars", get(handlers::cars::list_cars))

        // ── Bookings ────────────────────────────────────────────────────────
        .route("/book", post(handlers::bookings::create_booking))
        .route("/bookings", get(handlers::bookings::list_bookings))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
