//! Persistence of the cleaned table, aggregate views and dashboard.
//!
//! Tables are written as CSV with a header row, the dashboard as JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::dashboard::{Dashboard, Views};
use crate::survey::CleanedTable;
use csv::WriterBuilder;
use std::fs::{self, File};
use std::path::Path;

/// Logs rows as pretty-printed JSON.
pub fn print_json<T: Serialize>(rows: &[T]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

/// Writes `rows` to a CSV file at `path`, replacing any existing file.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the dashboard description as pretty JSON.
pub fn write_dashboard(path: &Path, dashboard: &Dashboard) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, dashboard)?;
    Ok(())
}

/// Writes every table and `dashboard.json` into `dir`, creating it if needed.
#[tracing::instrument(skip(cleaned, views, dashboard))]
pub fn write_all(
    dir: &Path,
    cleaned: &CleanedTable,
    views: &Views,
    dashboard: &Dashboard,
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    write_table(&dir.join("gss_clean.csv"), cleaned.records())?;
    write_table(&dir.join("summary_by_sex.csv"), &views.summary)?;
    write_table(&dir.join("breadwinner_counts.csv"), &views.breadwinner)?;
    write_table(&dir.join("prestige_bins.csv"), &views.binned)?;
    write_table(&dir.join("prestige_income_scatter.csv"), &views.scatter)?;
    write_table(&dir.join("prestige_income_trends.csv"), &views.trends)?;
    write_table(&dir.join("income_box.csv"), &views.income_box)?;
    write_table(&dir.join("prestige_box.csv"), &views.prestige_box)?;
    write_table(&dir.join("prestige_category_box.csv"), &views.binned_box)?;
    write_dashboard(&dir.join("dashboard.json"), dashboard)?;

    info!(files = 10, "Dashboard outputs written");
    Ok(())
}
