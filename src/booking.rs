use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    error::{AppError, AppResult},
    inventory::{self, Inventory},
    models::{Booking, CreateBooking},
    store::RecordStore,
};

/// Creates bookings against the inventory.
///
/// All booking writes go through `write_lock`, so the check-then-mark on a
/// car's booked flag cannot interleave with another booking.
#[derive(Debug)]
pub struct BookingService {
    inventory: Inventory,
    bookings: Arc<dyn RecordStore<Booking>>,
    write_lock: Mutex<()>,
}

impl BookingService {
    pub fn new(inventory: Inventory, bookings: Arc<dyn RecordStore<Booking>>) -> Self {
        Self {
            inventory,
            bookings,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list_bookings(&self) -> AppResult<Vec<Booking>> {
        self.bookings
            .get_all()
            .await
            .map_err(|e| AppError::storage("Failed to load bookings", e))
    }

    pub async fn create_booking(&self, request: CreateBooking) -> AppResult<Booking> {
        let request = request.validate()?;

        let _guard = self.write_lock.lock().await;

        let mut cars = self.inventory.all().await?;
        let mut bookings = self.list_bookings().await?;

        let idx = inventory::locate(&cars, &request.car_id)?;

        if cars[idx].booked {
            warn!(car_id = %request.car_id, "Car is already booked");
            return Err(AppError::Conflict("Car is already booked".to_string()));
        }

        cars[idx].booked = true;
        self.inventory.persist(&cars).await?;

        let booking = Booking::new(request);
        bookings.push(booking.clone());

        if let Err(e) = self.bookings.put_all(&bookings).await {
            // Put the car back so it is not left booked with no booking on record.
            cars[idx].booked = false;
            if let Err(revert) = self.inventory.persist(&cars).await {
                error!(
                    car_id = %booking.car_id,
                    error = %revert,
                    "Failed to release car after booking write failed"
                );
            }
            return Err(AppError::storage("Failed to save booking", e));
        }

        info!(
            booking_id = %booking.id,
            car_id = %booking.car_id,
            "Created booking"
        );

        Ok(booking)
    }
}
