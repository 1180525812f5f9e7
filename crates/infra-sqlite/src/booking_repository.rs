// SQLite BookingRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use nursery_core::domain::{Booking, BookingId};
use nursery_core::error::{AppError, Result};
use nursery_core::port::BookingRepository;
use sqlx::SqlitePool;

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Encode the farmer reference column (JSON text, NULL for null)
fn encode_farmer_ref(value: &serde_json::Value) -> Option<String> {
    if value.is_null() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Decode the farmer reference column
///
/// Rows written by other tools may hold the bare key instead of JSON text;
/// those are read back as a raw string reference.
fn decode_farmer_ref(column: Option<String>) -> serde_json::Value {
    match column {
        None => serde_json::Value::Null,
        Some(text) => serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)),
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, farmer, plant_name, quantity, farmer_registration_no,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.id)
        .bind(encode_farmer_ref(&booking.farmer))
        .bind(&booking.plant_name)
        .bind(booking.quantity)
        .bind(&booking.farmer_registration_no)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(BookingRow::into_booking))
    }

    async fn find_all(&self) -> Result<Vec<Booking>> {
        let rows: Vec<BookingRow> =
            sqlx::query_as("SELECT * FROM bookings ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BookingRow::into_booking).collect())
    }

    async fn set_farmer_registration_no(
        &self,
        id: &BookingId,
        registration_no: &str,
        updated_at: i64,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE bookings SET farmer_registration_no = ?, updated_at = ? WHERE id = ?",
        )
        .bind(registration_no)
        .bind(updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("booking {}", id)));
        }

        Ok(())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: String,
    farmer: Option<String>,
    plant_name: Option<String>,
    quantity: i64,
    farmer_registration_no: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl BookingRow {
    fn into_booking(self) -> Booking {
        Booking {
            id: self.id,
            farmer: decode_farmer_ref(self.farmer),
            plant_name: self.plant_name,
            quantity: self.quantity,
            farmer_registration_no: self.farmer_registration_no,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
