//! Tent status vocabulary.
//!
//! One enum inside the process, two spellings outside it: the HTTP API and
//! the UI speak `needs-repair`, the `SQLite` table stores `needs_repair`.
//! Both parsers are total and fall back to [`TentStatus::Good`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Condition category of a tent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TentStatus {
    #[default]
    Good,
    NeedsRepair,
    MissingItems,
}

impl TentStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Good, Self::NeedsRepair, Self::MissingItems];

    /// Spelling used on the wire and in the UI.
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::NeedsRepair => "needs-repair",
            Self::MissingItems => "missing-items",
        }
    }

    /// Spelling persisted in the `status` column.
    pub const fn as_store(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::NeedsRepair => "needs_repair",
            Self::MissingItems => "missing_items",
        }
    }

    /// Parse the wire spelling. Unknown values map to `Good`.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "needs-repair" => Self::NeedsRepair,
            "missing-items" => Self::MissingItems,
            _ => Self::Good,
        }
    }

    /// Parse the store spelling. Unknown values map to `Good`.
    pub fn from_store(s: &str) -> Self {
        match s {
            "needs_repair" => Self::NeedsRepair,
            "missing_items" => Self::MissingItems,
            _ => Self::Good,
        }
    }

    /// Next status in display order, wrapping around. Used by selectors.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Good => Self::NeedsRepair,
            Self::NeedsRepair => Self::MissingItems,
            Self::MissingItems => Self::Good,
        }
    }

    /// Previous status in display order, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Good => Self::MissingItems,
            Self::NeedsRepair => Self::Good,
            Self::MissingItems => Self::NeedsRepair,
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good Condition",
            Self::NeedsRepair => "Needs Repair",
            Self::MissingItems => "Missing Items",
        }
    }
}

impl fmt::Display for TentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for TentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for TentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wire_spelling_is_bijective() {
        for status in TentStatus::ALL {
            assert_eq!(TentStatus::from_wire(status.as_wire()), status);
        }
    }

    #[test]
    fn store_spelling_is_bijective() {
        for status in TentStatus::ALL {
            assert_eq!(TentStatus::from_store(status.as_store()), status);
        }
    }

    #[test]
    fn spellings_differ_only_in_separator() {
        assert_eq!(TentStatus::NeedsRepair.as_wire(), "needs-repair");
        assert_eq!(TentStatus::NeedsRepair.as_store(), "needs_repair");
        assert_eq!(TentStatus::MissingItems.as_wire(), "missing-items");
        assert_eq!(TentStatus::MissingItems.as_store(), "missing_items");
        assert_eq!(TentStatus::Good.as_wire(), TentStatus::Good.as_store());
    }

    #[test]
    fn unknown_values_fall_back_to_good() {
        assert_eq!(TentStatus::from_store("broken"), TentStatus::Good);
        assert_eq!(TentStatus::from_store(""), TentStatus::Good);
        // A store spelling is not a wire spelling and vice versa.
        assert_eq!(TentStatus::from_wire("needs_repair"), TentStatus::Good);
        assert_eq!(TentStatus::from_store("missing-items"), TentStatus::Good);
    }

    #[test]
    fn serde_uses_wire_spelling() {
        let json = serde_json::to_string(&TentStatus::MissingItems).unwrap();
        assert_eq!(json, r#""missing-items""#);
        let parsed: TentStatus = serde_json::from_str(r#""needs-repair""#).unwrap();
        assert_eq!(parsed, TentStatus::NeedsRepair);
        let fallback: TentStatus = serde_json::from_str(r#""whatever""#).unwrap();
        assert_eq!(fallback, TentStatus::Good);
    }

    #[test]
    fn next_and_prev_cycle() {
        for status in TentStatus::ALL {
            assert_eq!(status.next().prev(), status);
        }
        assert_eq!(TentStatus::MissingItems.next(), TentStatus::Good);
    }
}
