use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cars_file: PathBuf,
    pub bookings_file: PathBuf,
    /// Write the default fleet when the car collection does not exist yet.
    pub seed_on_start: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()));

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            cars_file: std::env::var("CARS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("cars.json")),
            bookings_file: std::env::var("BOOKINGS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join("bookings.json")),
            seed_on_start: std::env::var("SEED_ON_START")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("SEED_ON_START must be true or false")?,
        })
    }
}
