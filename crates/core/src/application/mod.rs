// Application Layer - Use Cases

pub mod backfill;

// Re-exports
pub use backfill::{BackfillReport, IndexOutcome, RegistrationBackfill};
