// Booking Repository Port (Interface)

use crate::domain::{Booking, BookingId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for booking persistence
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking
    async fn insert(&self, booking: &Booking) -> Result<()>;

    /// Find booking by ID
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>>;

    /// Full snapshot of the collection, in scan order
    async fn find_all(&self) -> Result<Vec<Booking>>;

    /// Set the denormalized farmer registration number and `updated_at` only
    ///
    /// Returns `NotFound` if no booking has this ID.
    async fn set_farmer_registration_no(
        &self,
        id: &BookingId,
        registration_no: &str,
        updated_at: i64,
    ) -> Result<()>;
}
