use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::admin::errors::AdminError;
use crate::domain::admin::models::Administrator;
use crate::domain::admin::models::AdministratorId;
use crate::domain::admin::models::NewAdministrator;
use crate::domain::admin::ports::AdminRepository;

const USERNAME_UNIQUE_CONSTRAINT: &str = "admins_username_key";

#[derive(sqlx::FromRow)]
struct AdministratorRow {
    id: i32,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<AdministratorRow> for Administrator {
    fn from(row: AdministratorRow) -> Self {
        Self {
            id: AdministratorId(row.id),
            username: row.username,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

pub struct PostgresAdminRepository {
    pool: PgPool,
}

impl PostgresAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn create(&self, administrator: NewAdministrator) -> Result<Administrator, AdminError> {
        let row = sqlx::query_as::<_, AdministratorRow>(
            r#"
            INSERT INTO admins (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(administrator.username.as_str())
        .bind(&administrator.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
                {
                    return AdminError::DuplicateUsername(administrator.username.to_string());
                }
            }
            AdminError::PersistenceError(e.to_string())
        })?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: AdministratorId) -> Result<Option<Administrator>, AdminError> {
        let row = sqlx::query_as::<_, AdministratorRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AdminError::PersistenceError(e.to_string()))?;

        Ok(row.map(Administrator::from))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Administrator>, AdminError> {
        let row = sqlx::query_as::<_, AdministratorRow>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM admins
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AdminError::PersistenceError(e.to_string()))?;

        Ok(row.map(Administrator::from))
    }

    async fn delete(&self, id: AdministratorId) -> Result<(), AdminError> {
        let result = sqlx::query(
            r#"
            DELETE FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AdminError::PersistenceError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AdminError::NotFound(format!("id {}", id)));
        }

        Ok(())
    }
}
