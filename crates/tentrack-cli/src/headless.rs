//! Headless (non-interactive) commands.
//!
//! Each command talks to the API once and writes its result to the given
//! writer, either as a plain table or as JSON.

use std::io::Write;

use thiserror::Error;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::client::{ClientError, TentApi};
use crate::config::CliConfig;
use crate::ui::{format_inspection_date, person_label, truncate_to_width};

/// Headless command errors.
#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Output format for headless commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Left-align `text` in a `width`-column cell, truncating when too wide.
fn cell(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let pad = width.saturating_sub(UnicodeWidthStr::width(text.as_str()));
    format!("{text}{}", " ".repeat(pad))
}

/// `tentrack list`
pub async fn list<A: TentApi, W: Write>(
    api: &A,
    out: &mut W,
    format: OutputFormat,
) -> Result<(), HeadlessError> {
    let tents = api.list_tents().await?;
    if format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &tents)?;
        writeln!(out)?;
        return Ok(());
    }
    if tents.is_empty() {
        writeln!(out, "No tents registered.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{}  {}  {}  {}  {}  {}",
        cell("ID", 36),
        cell("NAME", 24),
        cell("STATUS", 14),
        cell("CAPACITY", 11),
        cell("LOCATION", 16),
        "INSPECTED"
    )?;
    for tent in &tents {
        writeln!(
            out,
            "{}  {}  {}  {}  {}  {}",
            cell(&tent.id, 36),
            cell(&tent.name, 24),
            cell(tent.status.label(), 14),
            cell(&person_label(tent.capacity), 11),
            cell(&tent.location, 16),
            format_inspection_date(tent.last_inspected)
        )?;
    }
    Ok(())
}

/// `tentrack stats`
pub async fn stats<A: TentApi, W: Write>(
    api: &A,
    out: &mut W,
    format: OutputFormat,
) -> Result<(), HeadlessError> {
    let stats = api.stats().await?;
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &stats)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            writeln!(out, "Total tents:     {}", stats.total)?;
            writeln!(out, "Good condition:  {}", stats.good)?;
            writeln!(out, "Needs repair:    {}", stats.needs_repair)?;
            writeln!(out, "Missing items:   {}", stats.missing_items)?;
        }
    }
    Ok(())
}

/// `tentrack delete <id>`
pub async fn delete<A: TentApi, W: Write>(
    api: &A,
    out: &mut W,
    id: &str,
) -> Result<(), HeadlessError> {
    api.delete_tent(id).await?;
    info!(id, "Tent deleted");
    writeln!(out, "Deleted tent {id}")?;
    Ok(())
}

/// `tentrack config --api-url <URL>`: persist the API URL, or print the current one.
pub fn configure<W: Write>(
    config: &mut CliConfig,
    api_url: Option<String>,
    out: &mut W,
) -> Result<(), HeadlessError> {
    if let Some(url) = api_url {
        config.api_url = Some(url.trim_end_matches('/').to_string());
        config
            .save()
            .map_err(|e| HeadlessError::Config(e.to_string()))?;
        if let Some(path) = CliConfig::config_path() {
            writeln!(out, "Saved API URL to {}", path.display())?;
        }
    }
    writeln!(out, "API URL: {}", config.resolve_api_url(None))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use tentrack_core::{NewTent, Stats, Tent, TentPatch, TentStatus};

    use super::*;

    struct StaticApi {
        tents: Vec<Tent>,
        deleted: Mutex<Vec<String>>,
    }

    impl StaticApi {
        fn new(tents: Vec<Tent>) -> Self {
            Self {
                tents,
                deleted: Mutex::new(Vec::new()),
            }
        }
    }

    impl TentApi for StaticApi {
        async fn list_tents(&self) -> Result<Vec<Tent>, ClientError> {
            Ok(self.tents.clone())
        }

        async fn create_tent(&self, _new: &NewTent) -> Result<Tent, ClientError> {
            Err(ClientError::Config("read-only".into()))
        }

        async fn update_tent(&self, _id: &str, _patch: &TentPatch) -> Result<Tent, ClientError> {
            Err(ClientError::Config("read-only".into()))
        }

        async fn delete_tent(&self, id: &str) -> Result<(), ClientError> {
            if self.tents.iter().any(|t| t.id == id) {
                self.deleted.lock().unwrap().push(id.to_string());
                Ok(())
            } else {
                Err(ClientError::Api {
                    status: 404,
                    message: format!(r#"{{"code":"not_found","message":"tent {id} not found"}}"#),
                })
            }
        }

        async fn stats(&self) -> Result<Stats, ClientError> {
            Ok(Stats::from_tents(&self.tents))
        }
    }

    fn seeded() -> StaticApi {
        let tent = NewTent {
            name: "Coleman Dome".into(),
            model: "Sundome 4-Person".into(),
            capacity: 4.0,
            status: TentStatus::Good,
            condition: String::new(),
            last_inspected: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            missing_items: Vec::new(),
            damaged_items: Vec::new(),
            location: "Warehouse A-1".into(),
        }
        .into_tent("t1".into(), 0);
        StaticApi::new(vec![tent])
    }

    async fn run_list(api: &StaticApi, format: OutputFormat) -> String {
        let mut out = Vec::new();
        list(api, &mut out, format).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn list_table() {
        let text = run_list(&seeded(), OutputFormat::Table).await;
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("ID"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("t1 "));
        assert!(row.contains("Coleman Dome"));
        assert!(row.contains("Good Condition"));
        assert!(row.contains("4 persons"));
        assert!(row.ends_with("15/06/2024"));
    }

    #[tokio::test]
    async fn list_json_uses_wire_shape() {
        let text = run_list(&seeded(), OutputFormat::Json).await;
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["lastInspected"], "2024-06-15");
        assert_eq!(value[0]["status"], "good");
    }

    #[tokio::test]
    async fn list_empty() {
        let text = run_list(&StaticApi::new(Vec::new()), OutputFormat::Table).await;
        assert_eq!(text.trim(), "No tents registered.");
    }

    #[tokio::test]
    async fn stats_outputs() {
        let api = seeded();
        let mut out = Vec::new();
        stats(&api, &mut out, OutputFormat::Table).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total tents:     1"));
        assert!(text.contains("Good condition:  1"));

        let mut out = Vec::new();
        stats(&api, &mut out, OutputFormat::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["needsRepair"], 0);
    }

    #[tokio::test]
    async fn delete_reports_missing_tent() {
        let api = seeded();
        let mut out = Vec::new();
        delete(&api, &mut out, "t1").await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "Deleted tent t1");
        assert_eq!(*api.deleted.lock().unwrap(), vec!["t1".to_string()]);

        let err = delete(&api, &mut Vec::new(), "nope").await.unwrap_err();
        assert!(matches!(
            err,
            HeadlessError::Client(ClientError::Api { status: 404, .. })
        ));
    }

    #[test]
    fn cell_pads_and_truncates() {
        assert_eq!(cell("ab", 4), "ab  ");
        assert_eq!(cell("abcdef", 4), "abc…");
    }
}
