// Farmer phase: seed the counter, assign missing registration numbers

use crate::domain::{Farmer, FarmerId, RegistrationCounter};
use crate::error::Result;
use crate::port::{FarmerRepository, TimeProvider};
use std::collections::HashMap;
use tracing::{debug, info};

/// Farmer ID -> registration number, built here and consumed by the booking phase
pub type RegistrationLookup = HashMap<FarmerId, String>;

/// Result of the farmer phase
#[derive(Debug)]
pub struct FarmerPhase {
    pub lookup: RegistrationLookup,
    /// Counter after the last assignment
    pub counter: RegistrationCounter,
    pub scanned: usize,
    pub assigned: usize,
    pub already_registered: usize,
}

/// Seed the counter from the registration numbers already present
pub fn seed_counter(farmers: &[Farmer]) -> Result<RegistrationCounter> {
    let counter = RegistrationCounter::seed(
        farmers
            .iter()
            .filter_map(Farmer::assigned_registration_no),
    )?;
    Ok(counter)
}

/// Execute the farmer phase
///
/// Reads the whole collection once, then walks it in scan order. Farmers that
/// already carry a registration number are only recorded in the lookup.
pub async fn execute(
    farmer_repo: &dyn FarmerRepository,
    time_provider: &dyn TimeProvider,
) -> Result<FarmerPhase> {
    let farmers = farmer_repo.find_all().await?;
    info!(farmers = farmers.len(), "Found farmers");

    let counter = seed_counter(&farmers)?;
    debug!(next_counter = counter.peek(), "Registration counter seeded");

    assign_missing(farmer_repo, time_provider, farmers, counter).await
}

/// Assign registration numbers to every farmer lacking one
pub async fn assign_missing(
    farmer_repo: &dyn FarmerRepository,
    time_provider: &dyn TimeProvider,
    farmers: Vec<Farmer>,
    mut counter: RegistrationCounter,
) -> Result<FarmerPhase> {
    let scanned = farmers.len();
    let mut lookup = RegistrationLookup::with_capacity(scanned);
    let mut assigned = 0;
    let mut already_registered = 0;

    for farmer in farmers {
        if let Some(existing) = farmer.assigned_registration_no() {
            lookup.insert(farmer.id.clone(), existing.to_string());
            already_registered += 1;
            continue;
        }

        let registration_no = counter.issue()?;
        farmer_repo
            .set_registration_no(&farmer.id, &registration_no, time_provider.now_millis())
            .await?;

        info!(
            farmer_id = %farmer.id,
            registration_no = %registration_no,
            "Assigned registration number"
        );

        lookup.insert(farmer.id, registration_no.into_string());
        assigned += 1;
    }

    Ok(FarmerPhase {
        lookup,
        counter,
        scanned,
        assigned,
        already_registered,
    })
}
