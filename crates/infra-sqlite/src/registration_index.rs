// SQLite RegistrationIndex Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use nursery_core::error::{AppError, Result};
use nursery_core::port::RegistrationIndex;
use sqlx::SqlitePool;
use tracing::debug;

/// Name of the unique index on farmers.registration_no
pub const REGISTRATION_INDEX_NAME: &str = "idx_farmers_registration_no";

pub struct SqliteRegistrationIndex {
    pool: SqlitePool,
}

impl SqliteRegistrationIndex {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationIndex for SqliteRegistrationIndex {
    fn index_name(&self) -> &str {
        REGISTRATION_INDEX_NAME
    }

    async fn ensure_unique(&self) -> Result<()> {
        // `unique` is 1 for UNIQUE indexes, 0 otherwise
        let existing: Option<i64> = sqlx::query_scalar(
            r#"SELECT "unique" FROM pragma_index_list('farmers') WHERE name = ?"#,
        )
        .bind(REGISTRATION_INDEX_NAME)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match existing {
            Some(1) => {
                debug!(index = REGISTRATION_INDEX_NAME, "Unique index already present");
                Ok(())
            }
            Some(_) => Err(AppError::Conflict(format!(
                "index {} already exists and is not unique",
                REGISTRATION_INDEX_NAME
            ))),
            None => {
                let statement = format!(
                    "CREATE UNIQUE INDEX {} ON farmers(registration_no)",
                    REGISTRATION_INDEX_NAME
                );
                sqlx::query(&statement)
                    .execute(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;
                Ok(())
            }
        }
    }
}
