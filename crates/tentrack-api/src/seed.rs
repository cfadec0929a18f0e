//! Fixture tents for a fresh database.

use chrono::NaiveDate;
use tentrack_core::{NewTent, TentStatus};
use tracing::info;

use crate::storage::{DatabaseError, TentDatabase};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn items(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

/// The three example tents.
pub fn fixtures() -> Vec<NewTent> {
    vec![
        NewTent {
            name: "Coleman Dome".to_string(),
            model: "Sundome 4-Person".to_string(),
            capacity: 4.0,
            status: TentStatus::Good,
            condition: "Excellent condition, all components present".to_string(),
            last_inspected: date(2024, 6, 15),
            missing_items: Vec::new(),
            damaged_items: Vec::new(),
            location: "Warehouse A-1".to_string(),
        },
        NewTent {
            name: "REI Base Camp".to_string(),
            model: "Base Camp 6".to_string(),
            capacity: 6.0,
            status: TentStatus::NeedsRepair,
            condition: "Main door zipper needs replacement".to_string(),
            last_inspected: date(2024, 6, 10),
            missing_items: items(&["Rainfly stuff sack"]),
            damaged_items: items(&["Main door zipper"]),
            location: "Warehouse A-2".to_string(),
        },
        NewTent {
            name: "Big Agnes Copper".to_string(),
            model: "Copper Spur 2".to_string(),
            capacity: 2.0,
            status: TentStatus::MissingItems,
            condition: "Good overall condition".to_string(),
            last_inspected: date(2024, 6, 12),
            missing_items: items(&["Tent stakes (4)", "Guyline kit"]),
            damaged_items: Vec::new(),
            location: "Warehouse B-1".to_string(),
        },
    ]
}

impl TentDatabase {
    /// Insert the fixture tents when the table is empty.
    ///
    /// Returns how many tents were inserted.
    pub async fn seed_if_empty(&self) -> Result<usize, DatabaseError> {
        if self.count_tents(None).await? > 0 {
            info!("Database already has tents, skipping seed");
            return Ok(0);
        }

        let fixtures = fixtures();
        for tent in &fixtures {
            self.create_tent(tent).await?;
        }
        info!(count = fixtures.len(), "Seeded example tents");
        Ok(fixtures.len())
    }
}
