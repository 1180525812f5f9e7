// Farmer Repository Port (Interface)

use crate::domain::{Farmer, FarmerId, RegistrationNo};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for farmer persistence
#[async_trait]
pub trait FarmerRepository: Send + Sync {
    /// Insert a new farmer
    async fn insert(&self, farmer: &Farmer) -> Result<()>;

    /// Find farmer by ID
    async fn find_by_id(&self, id: &FarmerId) -> Result<Option<Farmer>>;

    /// Full snapshot of the collection, in scan order
    async fn find_all(&self) -> Result<Vec<Farmer>>;

    /// Set the registration number and `updated_at` only
    ///
    /// Returns `NotFound` if no farmer has this ID.
    async fn set_registration_no(
        &self,
        id: &FarmerId,
        registration_no: &RegistrationNo,
        updated_at: i64,
    ) -> Result<()>;
}
