// Nursery Infrastructure - SQLite Adapter
// Implements: FarmerRepository, BookingRepository, RegistrationIndex

mod booking_repository;
mod connection;
mod error;
mod farmer_repository;
mod registration_index;
#[cfg(any(test, feature = "test-fixtures"))]
mod schema;

pub use booking_repository::SqliteBookingRepository;
pub use connection::create_pool;
pub use farmer_repository::SqliteFarmerRepository;
pub use registration_index::{SqliteRegistrationIndex, REGISTRATION_INDEX_NAME};
#[cfg(any(test, feature = "test-fixtures"))]
pub use schema::create_schema;

// Note: sqlx::Error conversion is handled by error::map_sqlx_error
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
