//! Dashboard aggregate counts.

use serde::{Deserialize, Serialize};

use crate::status::TentStatus;
use crate::tent::Tent;

/// Tent counts per status.
///
/// Every tent has exactly one status, so `total` always equals the sum of the
/// three buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: u64,
    pub good: u64,
    pub needs_repair: u64,
    pub missing_items: u64,
}

impl Stats {
    /// Derive counts from an in-memory collection.
    pub fn from_tents(tents: &[Tent]) -> Self {
        let mut stats = Self::default();
        for tent in tents {
            stats.add(tent.status);
        }
        stats
    }

    /// Count one more tent with the given status.
    pub const fn add(&mut self, status: TentStatus) {
        self.total += 1;
        match status {
            TentStatus::Good => self.good += 1,
            TentStatus::NeedsRepair => self.needs_repair += 1,
            TentStatus::MissingItems => self.missing_items += 1,
        }
    }

    /// Count for a single status bucket.
    pub const fn count(&self, status: TentStatus) -> u64 {
        match status {
            TentStatus::Good => self.good,
            TentStatus::NeedsRepair => self.needs_repair,
            TentStatus::MissingItems => self.missing_items,
        }
    }
}
