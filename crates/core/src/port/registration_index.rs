// Registration Index Port (best-effort uniqueness constraint)

use crate::error::Result;
use async_trait::async_trait;

/// Store-side uniqueness constraint on farmer registration numbers
///
/// Implementations report failure through `Result` (duplicates already
/// present, a conflicting index of the same name, ...). Callers in the
/// application layer treat the step as best-effort and never abort on it.
#[async_trait]
pub trait RegistrationIndex: Send + Sync {
    /// Name of the index as it appears in the store
    fn index_name(&self) -> &str;

    /// Create the unique index if it does not exist yet
    async fn ensure_unique(&self) -> Result<()>;
}
