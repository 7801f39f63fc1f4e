use std::sync::Arc;

use tracing::info;

use car_rental_service::{
    build_router,
    config::Config,
    models::{Booking, Car},
    seed,
    store::JsonFileStore,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,car_rental_service=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let cars = Arc::new(JsonFileStore::<Car>::new(&config.cars_file));
    let bookings = Arc::new(JsonFileStore::<Booking>::new(&config.bookings_file));

    seed::prepare_data_files(&cars, &bookings, config.seed_on_start).await?;
    info!(
        cars = %config.cars_file.display(),
        bookings = %config.bookings_file.display(),
        "Data files ready"
    );

    let app = build_router(AppState::new(cars, bookings));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
