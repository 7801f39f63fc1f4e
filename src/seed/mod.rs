use serde_json::{json, Map, Value};
use tracing::info;

use crate::models::{Booking, Car, CarId};
use crate::store::{JsonFileStore, StoreError};

/// (make, model, year, price per day)
static FLEET: &[(&str, &str, u16, u32)] = &[
    ("Toyota", "Corolla", 2022, 45),
    ("Honda", "Civic", 2021, 48),
    ("Ford", "Mustang", 2023, 95),
    ("Tesla", "Model 3", 2023, 110),
    ("Hyundai", "Tucson", 2022, 62),
    ("Volkswagen", "Golf", 2020, 40),
    ("BMW", "X3", 2022, 120),
    ("Kia", "Sportage", 2021, 58),
];

/// The fleet a fresh data directory starts with. Ids run from 1, nothing booked.
pub fn default_fleet() -> Vec<Car> {
    FLEET
        .iter()
        .zip(1i64..)
        .map(|(&(make, model, year, price), id)| {
            let details: Map<String, Value> = match json!({
                "make": make,
                "model": model,
                "year": year,
                "pricePerDay": price,
            }) {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            Car {
                id: CarId::Number(id),
                booked: false,
                details,
            }
        })
        .collect()
}

/// Create whichever collection files are missing. Existing files are left alone.
pub async fn prepare_data_files(
    cars: &JsonFileStore<Car>,
    bookings: &JsonFileStore<Booking>,
    seed_fleet: bool,
) -> Result<(), StoreError> {
    let fleet = if seed_fleet { default_fleet() } else { Vec::new() };

    if cars.ensure_initialized(&fleet).await? {
        info!(path = %cars.path().display(), count = fleet.len(), "Seeded car collection");
    }
    if bookings.ensure_initialized(&[]).await? {
        info!(path = %bookings.path().display(), "Created empty booking collection");
    }
    Ok(())
}
