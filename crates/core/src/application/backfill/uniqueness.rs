// Uniqueness phase: best-effort unique index on registration numbers

use crate::port::RegistrationIndex;
use tracing::{info, warn};

/// Outcome of the index step; there is no error variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOutcome {
    Created,
    Skipped { reason: String },
}

impl IndexOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, IndexOutcome::Created)
    }
}

/// Attempt to enforce uniqueness; failures are logged and swallowed
pub async fn execute(index: &dyn RegistrationIndex) -> IndexOutcome {
    match index.ensure_unique().await {
        Ok(()) => {
            info!(index = index.index_name(), "Unique index on registration number ensured");
            IndexOutcome::Created
        }
        Err(e) => {
            warn!(
                index = index.index_name(),
                error = %e,
                "Could not create unique index on registration number (continuing)"
            );
            IndexOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    }
}
