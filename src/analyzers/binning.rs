use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::analyzers::types::{BinnedRow, BinnedTable};
use crate::error::{PipelineError, Result};
use crate::survey::CleanedTable;

/// Right-closed bin edges over job prestige: (15.9, 26.9], …, (70.9, 82.9].
pub const PRESTIGE_EDGES: [f64; 7] = [15.9, 26.9, 37.9, 48.9, 59.9, 70.9, 82.9];

/// Job prestige band. Variant order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum JobPrestigeCategory {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Premium,
}

impl JobPrestigeCategory {
    pub const ALL: [Self; 6] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::VeryHigh,
        Self::Premium,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Premium => "Premium",
        }
    }

    /// Band containing `prestige`, or `None` outside (15.9, 82.9].
    pub fn from_prestige(prestige: f64) -> Option<Self> {
        PRESTIGE_EDGES
            .windows(2)
            .position(|w| prestige > w[0] && prestige <= w[1])
            .map(|i| Self::ALL[i])
    }
}

impl fmt::Display for JobPrestigeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Projects to (income, sex, job_prestige, jp_cat), dropping incomplete rows
/// and prestige values outside every band.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn bin_by_prestige(table: &CleanedTable) -> Result<BinnedTable> {
    let rows: BinnedTable = table
        .iter()
        .filter_map(|r| {
            let job_prestige = r.job_prestige?;
            Some(BinnedRow {
                income: r.income?,
                sex: r.sex.clone()?,
                job_prestige,
                jp_cat: JobPrestigeCategory::from_prestige(job_prestige)?,
            })
        })
        .collect();

    debug!(
        kept = rows.len(),
        dropped = table.len() - rows.len(),
        "Job prestige binned"
    );

    if rows.is_empty() {
        return Err(PipelineError::EmptyResult("no rows left after prestige binning"));
    }
    Ok(rows)
}
