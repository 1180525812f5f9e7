// Registration Backfill - assigns farmer registration numbers and copies
// them onto bookings
//
// Phases (strictly sequential, one collection snapshot each):
// 1. Read farmers, seed the counter from existing numbers
// 2. Assign `REG-NNNNNN` to every farmer lacking one
// 3. Best-effort unique index on the registration number
// 4. Read bookings, denormalize the farmer's number onto each

pub mod bookings;
pub mod farmers;
pub mod report;
pub mod uniqueness;

#[cfg(test)]
mod fakes;

pub use bookings::BookingPhase;
pub use farmers::{FarmerPhase, RegistrationLookup};
pub use report::BackfillReport;
pub use uniqueness::IndexOutcome;

use crate::error::Result;
use crate::port::{BookingRepository, FarmerRepository, RegistrationIndex, TimeProvider};
use std::sync::Arc;
use tracing::info;

/// Registration backfill service
///
/// Assumes it is the only instance running against the store: two concurrent
/// runs can seed the same counter value and hand out colliding numbers.
pub struct RegistrationBackfill {
    farmer_repo: Arc<dyn FarmerRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    registration_index: Arc<dyn RegistrationIndex>,
    time_provider: Arc<dyn TimeProvider>,
}

impl RegistrationBackfill {
    pub fn new(
        farmer_repo: Arc<dyn FarmerRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        registration_index: Arc<dyn RegistrationIndex>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            farmer_repo,
            booking_repo,
            registration_index,
            time_provider,
        }
    }

    /// Run all phases to completion
    ///
    /// Read failures and individual write failures abort the run; writes
    /// already applied stay persisted, and a later run picks up the rest.
    /// Index failures never abort.
    pub async fn run(&self) -> Result<BackfillReport> {
        info!("Starting registration backfill");

        let farmer_phase =
            farmers::execute(self.farmer_repo.as_ref(), self.time_provider.as_ref()).await?;
        info!(
            assigned = farmer_phase.assigned,
            already_registered = farmer_phase.already_registered,
            "Farmer registration numbers backfilled"
        );

        let index = uniqueness::execute(self.registration_index.as_ref()).await;

        let booking_phase = bookings::execute(
            self.booking_repo.as_ref(),
            self.time_provider.as_ref(),
            &farmer_phase.lookup,
        )
        .await?;
        info!(
            updated = booking_phase.updated,
            unresolved = booking_phase.unresolved.len(),
            "Booking registration numbers backfilled"
        );

        Ok(BackfillReport {
            farmers_scanned: farmer_phase.scanned,
            registrations_assigned: farmer_phase.assigned,
            already_registered: farmer_phase.already_registered,
            bookings_scanned: booking_phase.scanned,
            bookings_updated: booking_phase.updated,
            bookings_unresolved: booking_phase.unresolved.len(),
            index,
            next_counter: farmer_phase.counter.peek(),
        })
    }
}
