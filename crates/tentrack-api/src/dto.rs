//! Request bodies and their coercion into core types.
//!
//! Clients send what the original browser form sent: `capacity` may arrive as
//! a number or a numeric string, dates as `YYYY-MM-DD` or full timestamps, and
//! optional fields may be missing altogether.

use serde::Deserialize;
use tentrack_core::tent::{parse_capacity, parse_inspection_date, validate_capacity};
use tentrack_core::{NewTent, TentPatch, TentStatus};

/// A capacity as sent by a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CapacityInput {
    Number(f64),
    Text(String),
}

impl CapacityInput {
    /// Coerce to a validated non-negative number.
    pub fn resolve(&self) -> tentrack_core::Result<f64> {
        match self {
            Self::Number(n) => validate_capacity(*n),
            Self::Text(s) => parse_capacity(s),
        }
    }
}

/// Body of `POST /tents`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTentRequest {
    pub name: String,
    pub model: String,
    pub capacity: CapacityInput,
    pub status: Option<TentStatus>,
    pub condition: Option<String>,
    pub last_inspected: String,
    pub missing_items: Option<Vec<String>>,
    pub damaged_items: Option<Vec<String>>,
    pub location: Option<String>,
}

impl CreateTentRequest {
    /// Apply defaults and coercions.
    pub fn into_new_tent(self) -> tentrack_core::Result<NewTent> {
        Ok(NewTent {
            capacity: self.capacity.resolve()?,
            last_inspected: parse_inspection_date(&self.last_inspected)?,
            name: self.name,
            model: self.model,
            status: self.status.unwrap_or_default(),
            condition: self.condition.unwrap_or_default(),
            missing_items: self.missing_items.unwrap_or_default(),
            damaged_items: self.damaged_items.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
        })
    }
}

/// Body of `PATCH /tents/{id}`. Unknown keys such as `id` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTentRequest {
    pub name: Option<String>,
    pub model: Option<String>,
    pub capacity: Option<CapacityInput>,
    pub status: Option<TentStatus>,
    pub condition: Option<String>,
    pub last_inspected: Option<String>,
    pub missing_items: Option<Vec<String>>,
    pub damaged_items: Option<Vec<String>>,
    pub location: Option<String>,
}

impl UpdateTentRequest {
    /// Coerce the supplied fields into a patch.
    pub fn into_patch(self) -> tentrack_core::Result<TentPatch> {
        Ok(TentPatch {
            capacity: self.capacity.as_ref().map(CapacityInput::resolve).transpose()?,
            last_inspected: self
                .last_inspected
                .as_deref()
                .map(parse_inspection_date)
                .transpose()?,
            name: self.name,
            model: self.model,
            status: self.status,
            condition: self.condition,
            missing_items: self.missing_items,
            damaged_items: self.damaged_items,
            location: self.location,
        })
    }
}
