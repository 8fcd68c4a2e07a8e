use async_trait::async_trait;

use crate::db::DbPool;
use crate::error::Result;
use crate::models::{Device, NewDevice};

/// Persistence operations for devices
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// All devices ordered by id, optionally filtered by a case-insensitive name match
    async fn list(&self, search: Option<String>) -> Result<Vec<Device>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Device>>;

    async fn create(&self, device: &NewDevice) -> Result<Device>;

    /// Replace every mutable field of a device. `None` if the id does not exist.
    async fn replace(&self, id: i64, device: &NewDevice) -> Result<Option<Device>>;

    /// Returns false if the id does not exist
    async fn delete(&self, id: i64) -> Result<bool>;

    /// (connected, table_exists)
    async fn health_check(&self) -> Result<(bool, bool)>;
}

#[derive(Clone)]
pub struct DeviceRepository {
    pool: DbPool,
}

impl DeviceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceStore for DeviceRepository {
    async fn list(&self, search: Option<String>) -> Result<Vec<Device>> {
        let devices = match search {
            Some(term) => {
                sqlx::query_as::<_, Device>(
                    r#"
                    SELECT id, name, power_watts, hours_per_day, quantity, cost_per_kwh,
                           created_at, updated_at
                    FROM devices
                    WHERE name ILIKE '%' || $1 || '%'
                    ORDER BY id
                    "#,
                )
                .bind(escape_like(&term))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Device>(
                    r#"
                    SELECT id, name, power_watts, hours_per_day, quantity, cost_per_kwh,
                           created_at, updated_at
                    FROM devices
                    ORDER BY id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(devices)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            SELECT id, name, power_watts, hours_per_day, quantity, cost_per_kwh,
                   created_at, updated_at
            FROM devices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(device)
    }

    async fn create(&self, device: &NewDevice) -> Result<Device> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO devices (name, power_watts, hours_per_day, quantity, cost_per_kwh,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, name, power_watts, hours_per_day, quantity, cost_per_kwh,
                      created_at, updated_at
            "#,
        )
        .bind(&device.name)
        .bind(device.power_watts)
        .bind(device.hours_per_day)
        .bind(device.quantity)
        .bind(device.cost_per_kwh)
        .fetch_one(&self.pool)
        .await?;

        Ok(device)
    }

    async fn replace(&self, id: i64, device: &NewDevice) -> Result<Option<Device>> {
        let device = sqlx::query_as::<_, Device>(
            r#"
            UPDATE devices
            SET name = $2, power_watts = $3, hours_per_day = $4, quantity = $5,
                cost_per_kwh = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, power_watts, hours_per_day, quantity, cost_per_kwh,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&device.name)
        .bind(device.power_watts)
        .bind(device.hours_per_day)
        .bind(device.quantity)
        .bind(device.cost_per_kwh)
        .fetch_optional(&self.pool)
        .await?;

        Ok(device)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(bool, bool)> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;

        let table_exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_schema = current_schema()
                  AND table_name = 'devices'
            )
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok((true, table_exists))
    }
}

/// Escape LIKE wildcards so the search term matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
