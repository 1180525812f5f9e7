// Domain Layer - Pure business logic and entities

pub mod booking;
pub mod error;
pub mod farmer;
pub mod registration;

// Re-exports
pub use booking::{Booking, BookingId, FarmerRef};
pub use error::DomainError;
pub use farmer::{Farmer, FarmerId};
pub use registration::{RegistrationCounter, RegistrationNo, REGISTRATION_PREFIX};
