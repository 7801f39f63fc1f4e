use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Car, CarId},
    store::RecordStore,
};

/// Cars whose booked flag is false, in their stored order.
pub fn available(cars: Vec<Car>) -> Vec<Car> {
    cars.into_iter().filter(Car::is_available).collect()
}

/// Index of the car with `id`, by linear scan.
pub fn locate(cars: &[Car], id: &CarId) -> AppResult<usize> {
    cars.iter()
        .position(|c| &c.id == id)
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
}

/// The car fleet, backed by whatever [`RecordStore`] was injected.
#[derive(Debug, Clone)]
pub struct Inventory {
    cars: Arc<dyn RecordStore<Car>>,
}

impl Inventory {
    pub fn new(cars: Arc<dyn RecordStore<Car>>) -> Self {
        Self { cars }
    }

    pub async fn all(&self) -> AppResult<Vec<Car>> {
        self.cars
            .get_all()
            .await
            .map_err(|e| AppError::storage("Failed to load cars", e))
    }

    pub async fn list_available(&self) -> AppResult<Vec<Car>> {
        Ok(available(self.all().await?))
    }

    pub async fn find_by_id(&self, id: &CarId) -> AppResult<Car> {
        let mut cars = self.all().await?;
        let idx = locate(&cars, id)?;
        Ok(cars.swap_remove(idx))
    }

    /// Overwrite the whole fleet.
    pub async fn persist(&self, cars: &[Car]) -> AppResult<()> {
        self.cars
            .put_all(cars)
            .await
            .map_err(|e| AppError::storage("Failed to save cars", e))
    }
}
