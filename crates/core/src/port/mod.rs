// Port Layer - Interfaces for external dependencies

pub mod booking_repository;
pub mod farmer_repository;
pub mod registration_index;
pub mod time_provider;

// Re-exports
pub use booking_repository::BookingRepository;
pub use farmer_repository::FarmerRepository;
pub use registration_index::RegistrationIndex;
pub use time_provider::{FixedTimeProvider, SystemTimeProvider, TimeProvider};
