// Booking Domain Model
//
// Bookings point at a farmer either by the raw identity key or by a wrapped
// key object (`{"$oid": "..."}`), depending on how the record was written.

use serde::{Deserialize, Serialize};

/// Booking identity key (store-assigned, opaque)
pub type BookingId = String;

/// Conventional wrapper field for store-style identity keys
pub const KEY_WRAPPER_FIELD: &str = "$oid";

/// Normalized farmer reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FarmerRef {
    /// Bare key (string or number in the stored document)
    Raw(String),
    /// Key nested under the wrapper field
    Wrapped(String),
}

impl FarmerRef {
    /// Normalize a stored reference value.
    ///
    /// Returns `None` for `null`, booleans, arrays, and objects that do not
    /// expose a string under the wrapper field.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::String(s) => Some(FarmerRef::Raw(s.clone())),
            Value::Number(n) => Some(FarmerRef::Raw(n.to_string())),
            Value::Object(map) => match map.get(KEY_WRAPPER_FIELD) {
                Some(Value::String(s)) => Some(FarmerRef::Wrapped(s.clone())),
                _ => None,
            },
            Value::Null | Value::Bool(_) | Value::Array(_) => None,
        }
    }

    /// Canonical key used for lookups
    pub fn key(&self) -> &str {
        match self {
            FarmerRef::Raw(key) | FarmerRef::Wrapped(key) => key,
        }
    }
}

/// Plant booking placed on behalf of a farmer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,

    /// Reference exactly as stored (raw key, wrapped key, or null)
    pub farmer: serde_json::Value,

    pub plant_name: Option<String>,
    pub quantity: i64,

    /// Denormalized copy of the farmer's registration number
    pub farmer_registration_no: Option<String>,

    pub created_at: i64, // epoch ms
    pub updated_at: i64, // epoch ms
}

impl Booking {
    /// Create a new booking with injected ID and timestamp
    pub fn new(
        id: impl Into<BookingId>,
        created_at: i64,
        farmer: serde_json::Value,
        plant_name: Option<String>,
        quantity: i64,
    ) -> Self {
        Self {
            id: id.into(),
            farmer,
            plant_name,
            quantity,
            farmer_registration_no: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Create a booking with a generated UUID (fixtures and tests)
    pub fn new_test(farmer: serde_json::Value) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self::new(uuid::Uuid::new_v4().to_string(), now, farmer, None, 1)
    }

    /// Normalized farmer reference, if the stored value has a usable shape
    pub fn farmer_ref(&self) -> Option<FarmerRef> {
        FarmerRef::from_value(&self.farmer)
    }
}
