// SQLite FarmerRepository Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use nursery_core::domain::{Farmer, FarmerId, RegistrationNo};
use nursery_core::error::{AppError, Result};
use nursery_core::port::FarmerRepository;
use sqlx::SqlitePool;

pub struct SqliteFarmerRepository {
    pool: SqlitePool,
}

impl SqliteFarmerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FarmerRepository for SqliteFarmerRepository {
    async fn insert(&self, farmer: &Farmer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO farmers (
                id, name, mobile_number, registration_no, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&farmer.id)
        .bind(&farmer.name)
        .bind(&farmer.mobile_number)
        .bind(&farmer.registration_no)
        .bind(farmer.created_at)
        .bind(farmer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &FarmerId) -> Result<Option<Farmer>> {
        let row = sqlx::query_as::<_, FarmerRow>("SELECT * FROM farmers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(FarmerRow::into_farmer))
    }

    async fn find_all(&self) -> Result<Vec<Farmer>> {
        let rows: Vec<FarmerRow> =
            sqlx::query_as("SELECT * FROM farmers ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(FarmerRow::into_farmer).collect())
    }

    async fn set_registration_no(
        &self,
        id: &FarmerId,
        registration_no: &RegistrationNo,
        updated_at: i64,
    ) -> Result<()> {
        let result =
            sqlx::query("UPDATE farmers SET registration_no = ?, updated_at = ? WHERE id = ?")
                .bind(registration_no.as_str())
                .bind(updated_at)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("farmer {}", id)));
        }

        Ok(())
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct FarmerRow {
    id: String,
    name: String,
    mobile_number: Option<String>,
    registration_no: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl FarmerRow {
    fn into_farmer(self) -> Farmer {
        Farmer {
            id: self.id,
            name: self.name,
            mobile_number: self.mobile_number,
            registration_no: self.registration_no,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
