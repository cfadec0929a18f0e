//! Data models for tentrack storage.

use sqlx::types::Json;
use tentrack_core::tent::timestamp_to_date;
use tentrack_core::{Tent, TentStatus};

/// A row of the `tents` table, in store vocabulary.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TentRow {
    pub id: String,
    pub name: String,
    pub model: String,
    pub capacity: f64,
    pub status: String,
    pub condition: String,
    pub last_inspected: i64,
    pub missing_items: Json<Vec<String>>,
    pub damaged_items: Json<Vec<String>>,
    pub location: String,
    pub created_at: i64,
}

impl From<TentRow> for Tent {
    fn from(row: TentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            model: row.model,
            capacity: row.capacity,
            status: TentStatus::from_store(&row.status),
            condition: row.condition,
            last_inspected: timestamp_to_date(row.last_inspected),
            missing_items: row.missing_items.0,
            damaged_items: row.damaged_items.0,
            location: row.location,
            created_at: row.created_at,
        }
    }
}
