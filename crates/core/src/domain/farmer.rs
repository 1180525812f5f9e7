// Farmer Domain Model

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Farmer identity key (store-assigned, opaque)
pub type FarmerId = String;

/// Registered farmer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub id: FarmerId,
    pub name: String,
    pub mobile_number: Option<String>,

    /// Human-readable identifier; once set it is never reassigned
    pub registration_no: Option<String>,

    pub created_at: i64, // epoch ms
    pub updated_at: i64, // epoch ms
}

impl Farmer {
    /// Create a new farmer with injected ID and timestamp
    pub fn new(
        id: impl Into<FarmerId>,
        created_at: i64,
        name: impl Into<String>,
        mobile_number: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "farmer name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: id.into(),
            name,
            mobile_number,
            registration_no: None,
            created_at,
            updated_at: created_at,
        })
    }

    /// Create a farmer with a generated UUID (fixtures and tests)
    pub fn new_test(name: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            mobile_number: None,
            registration_no: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style helper for pre-registered farmers
    pub fn with_registration_no(mut self, registration_no: impl Into<String>) -> Self {
        self.registration_no = Some(registration_no.into());
        self
    }

    /// Registration number, unless missing or blank
    ///
    /// A blank value does not count as assigned; such farmers get a fresh number.
    pub fn assigned_registration_no(&self) -> Option<&str> {
        self.registration_no
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }
}
