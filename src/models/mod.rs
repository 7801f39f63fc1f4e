pub mod booking;
pub mod car;

pub use booking::*;
pub use car::*;
