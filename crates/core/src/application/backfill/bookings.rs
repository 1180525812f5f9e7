// Booking phase: denormalize farmer registration numbers onto bookings

use super::farmers::RegistrationLookup;
use crate::domain::BookingId;
use crate::error::Result;
use crate::port::{BookingRepository, TimeProvider};
use tracing::{info, warn};

/// Result of the booking phase
#[derive(Debug, Default)]
pub struct BookingPhase {
    pub scanned: usize,
    pub updated: usize,
    /// Bookings whose farmer reference could not be resolved (left unmodified)
    pub unresolved: Vec<BookingId>,
}

/// Execute the booking phase
///
/// Resolution uses only the in-memory lookup from the farmer phase; farmers
/// are not re-read from the store.
pub async fn execute(
    booking_repo: &dyn BookingRepository,
    time_provider: &dyn TimeProvider,
    lookup: &RegistrationLookup,
) -> Result<BookingPhase> {
    let bookings = booking_repo.find_all().await?;
    info!(bookings = bookings.len(), "Found bookings");

    let mut phase = BookingPhase {
        scanned: bookings.len(),
        ..Default::default()
    };

    for booking in bookings {
        let resolved = booking
            .farmer_ref()
            .and_then(|farmer_ref| lookup.get(farmer_ref.key()));

        let Some(registration_no) = resolved else {
            warn!(
                booking_id = %booking.id,
                farmer_ref = %booking.farmer,
                "Booking references unknown farmer, left unchanged"
            );
            phase.unresolved.push(booking.id);
            continue;
        };

        booking_repo
            .set_farmer_registration_no(&booking.id, registration_no, time_provider.now_millis())
            .await?;

        info!(
            booking_id = %booking.id,
            registration_no = %registration_no,
            "Updated booking with farmer registration number"
        );
        phase.updated += 1;
    }

    Ok(phase)
}
