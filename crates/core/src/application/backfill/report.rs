// Backfill run summary

use super::uniqueness::IndexOutcome;

/// Counts collected over one run of the backfill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillReport {
    pub farmers_scanned: usize,
    pub registrations_assigned: usize,
    pub already_registered: usize,
    pub bookings_scanned: usize,
    pub bookings_updated: usize,
    pub bookings_unresolved: usize,
    pub index: IndexOutcome,
    /// Counter value the next run would start from if nothing else changed
    pub next_counter: u64,
}

impl BackfillReport {
    /// True when nothing was left for a follow-up run to fix
    pub fn is_clean(&self) -> bool {
        self.bookings_unresolved == 0 && self.index.is_created()
    }
}
