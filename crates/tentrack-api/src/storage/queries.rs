//! Database queries for the tentrack API.

use chrono::Utc;
use sqlx::types::Json;
use tentrack_core::tent::date_to_timestamp;
use tentrack_core::{NewTent, Stats, Tent, TentPatch, TentStatus};
use tracing::debug;

use super::db::{DatabaseError, TentDatabase};
use super::models::TentRow;

impl TentDatabase {
    // =========================================================================
    // Tent queries
    // =========================================================================

    /// List all tents, newest first.
    pub async fn list_tents(&self) -> Result<Vec<Tent>, DatabaseError> {
        let rows = sqlx::query_as::<_, TentRow>(
            "SELECT * FROM tents ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows.into_iter().map(Tent::from).collect())
    }

    /// Get a tent by ID.
    pub async fn get_tent(&self, id: &str) -> Result<Tent, DatabaseError> {
        sqlx::query_as::<_, TentRow>("SELECT * FROM tents WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .map(Tent::from)
            .ok_or_else(|| DatabaseError::NotFound(format!("Tent {id}")))
    }

    /// Insert a new tent. The store assigns `id` and `created_at`.
    pub async fn create_tent(&self, new: &NewTent) -> Result<Tent, DatabaseError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO tents (id, name, model, capacity, status, condition, last_inspected, missing_items, damaged_items, location, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new.name)
        .bind(&new.model)
        .bind(new.capacity)
        .bind(new.status.as_store())
        .bind(&new.condition)
        .bind(date_to_timestamp(new.last_inspected))
        .bind(Json(&new.missing_items))
        .bind(Json(&new.damaged_items))
        .bind(&new.location)
        .bind(now)
        .execute(self.pool())
        .await?;

        debug!(id = %id, "Tent row inserted");
        self.get_tent(&id).await
    }

    /// Apply a partial update and return the stored result.
    ///
    /// Read-modify-write without a transaction: concurrent writers to the
    /// same tent resolve as last-writer-wins.
    pub async fn update_tent(&self, id: &str, patch: &TentPatch) -> Result<Tent, DatabaseError> {
        let mut tent = self.get_tent(id).await?;
        patch.apply_to(&mut tent);

        let result = sqlx::query(
            "UPDATE tents SET name = ?, model = ?, capacity = ?, status = ?, condition = ?, \
             last_inspected = ?, missing_items = ?, damaged_items = ?, location = ? WHERE id = ?",
        )
        .bind(&tent.name)
        .bind(&tent.model)
        .bind(tent.capacity)
        .bind(tent.status.as_store())
        .bind(&tent.condition)
        .bind(date_to_timestamp(tent.last_inspected))
        .bind(Json(&tent.missing_items))
        .bind(Json(&tent.damaged_items))
        .bind(&tent.location)
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Tent {id}")));
        }
        Ok(tent)
    }

    /// Hard-delete a tent.
    pub async fn delete_tent(&self, id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM tents WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Tent {id}")));
        }
        Ok(())
    }

    // =========================================================================
    // Aggregate queries
    // =========================================================================

    /// Count tents, optionally restricted to one status.
    pub async fn count_tents(&self, status: Option<TentStatus>) -> Result<u64, DatabaseError> {
        let (count,): (i64,) = match status {
            Some(status) => {
                sqlx::query_as("SELECT COUNT(*) FROM tents WHERE status = ?")
                    .bind(status.as_store())
                    .fetch_one(self.pool())
                    .await?
            }
            None => {
                sqlx::query_as("SELECT COUNT(*) FROM tents")
                    .fetch_one(self.pool())
                    .await?
            }
        };

        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Dashboard counts from four independent count queries.
    pub async fn stats(&self) -> Result<Stats, DatabaseError> {
        let (total, good, needs_repair, missing_items) = tokio::try_join!(
            self.count_tents(None),
            self.count_tents(Some(TentStatus::Good)),
            self.count_tents(Some(TentStatus::NeedsRepair)),
            self.count_tents(Some(TentStatus::MissingItems)),
        )?;

        Ok(Stats {
            total,
            good,
            needs_repair,
            missing_items,
        })
    }

    /// Cheap round-trip used by the health endpoint.
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }
}
