//! Tent record model.
//!
//! `Tent` is the only entity. The wire form uses camelCase keys, dates as
//! `YYYY-MM-DD` and item lists as JSON arrays.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::status::TentStatus;

/// A persisted tent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tent {
    pub id: String,
    pub name: String,
    pub model: String,
    pub capacity: f64,
    pub status: TentStatus,
    #[serde(default)]
    pub condition: String,
    pub last_inspected: NaiveDate,
    #[serde(default)]
    pub missing_items: Vec<String>,
    #[serde(default)]
    pub damaged_items: Vec<String>,
    #[serde(default)]
    pub location: String,
    /// Unix timestamp (seconds) of creation; drives list ordering.
    #[serde(default)]
    pub created_at: i64,
}

/// Editable fields of a tent that does not exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTent {
    pub name: String,
    pub model: String,
    pub capacity: f64,
    #[serde(default)]
    pub status: TentStatus,
    #[serde(default)]
    pub condition: String,
    pub last_inspected: NaiveDate,
    #[serde(default)]
    pub missing_items: Vec<String>,
    #[serde(default)]
    pub damaged_items: Vec<String>,
    #[serde(default)]
    pub location: String,
}

impl NewTent {
    /// Materialize a record with the given identity.
    pub fn into_tent(self, id: String, created_at: i64) -> Tent {
        Tent {
            id,
            name: self.name,
            model: self.model,
            capacity: self.capacity,
            status: self.status,
            condition: self.condition,
            last_inspected: self.last_inspected,
            missing_items: self.missing_items,
            damaged_items: self.damaged_items,
            location: self.location,
            created_at,
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_inspected: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damaged_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl TentPatch {
    /// A patch that overwrites every editable field with `tent`'s values.
    pub fn replace_with(tent: &Tent) -> Self {
        Self {
            name: Some(tent.name.clone()),
            model: Some(tent.model.clone()),
            capacity: Some(tent.capacity),
            status: Some(tent.status),
            condition: Some(tent.condition.clone()),
            last_inspected: Some(tent.last_inspected),
            missing_items: Some(tent.missing_items.clone()),
            damaged_items: Some(tent.damaged_items.clone()),
            location: Some(tent.location.clone()),
        }
    }

    /// Whether the patch carries no field at all.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.model.is_none()
            && self.capacity.is_none()
            && self.status.is_none()
            && self.condition.is_none()
            && self.last_inspected.is_none()
            && self.missing_items.is_none()
            && self.damaged_items.is_none()
            && self.location.is_none()
    }

    /// Apply the supplied fields to `tent`. `id` and `created_at` never change.
    pub fn apply_to(&self, tent: &mut Tent) {
        if let Some(name) = &self.name {
            tent.name.clone_from(name);
        }
        if let Some(model) = &self.model {
            tent.model.clone_from(model);
        }
        if let Some(capacity) = self.capacity {
            tent.capacity = capacity;
        }
        if let Some(status) = self.status {
            tent.status = status;
        }
        if let Some(condition) = &self.condition {
            tent.condition.clone_from(condition);
        }
        if let Some(date) = self.last_inspected {
            tent.last_inspected = date;
        }
        if let Some(items) = &self.missing_items {
            tent.missing_items.clone_from(items);
        }
        if let Some(items) = &self.damaged_items {
            tent.damaged_items.clone_from(items);
        }
        if let Some(location) = &self.location {
            tent.location.clone_from(location);
        }
    }
}

/// Parse an inspection date.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; timestamps are truncated
/// to their UTC calendar date.
pub fn parse_inspection_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| Error::InvalidDate(raw.to_string()))
}

/// Unix timestamp of midnight UTC on `date`.
pub fn date_to_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// UTC calendar date of a unix timestamp. Out-of-range values map to the epoch.
pub fn timestamp_to_date(ts: i64) -> NaiveDate {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

/// Reject negative and non-finite capacities.
pub fn validate_capacity(capacity: f64) -> Result<f64> {
    if capacity.is_finite() && capacity >= 0.0 {
        Ok(capacity)
    } else {
        Err(Error::InvalidCapacity(capacity.to_string()))
    }
}

/// Coerce free text (form input, JSON string) into a capacity.
pub fn parse_capacity(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| Error::InvalidCapacity(trimmed.to_string()))?;
    validate_capacity(value)
}
