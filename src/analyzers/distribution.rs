//! Distribution views behind the scatter and box charts.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::analyzers::binning::JobPrestigeCategory;
use crate::analyzers::types::{
    BinnedBoxSummary, BinnedTable, BoxSummary, ScatterPoint, ScatterTable, TrendLine,
};
use crate::analyzers::utility::{FiveNumber, ols};
use crate::error::{PipelineError, Result};
use crate::survey::{CleanedTable, SurveyRecord};

/// Numeric column summarised per sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Income,
    JobPrestige,
}

impl Measure {
    pub fn value(self, r: &SurveyRecord) -> Option<f64> {
        match self {
            Self::Income => r.income,
            Self::JobPrestige => r.job_prestige,
        }
    }

    /// Axis label used on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Annual Income ($)",
            Self::JobPrestige => "Occupational Job Prestige Score",
        }
    }
}

/// Respondents with job prestige, income and sex recorded.
pub fn prestige_income_scatter(table: &CleanedTable) -> Result<ScatterTable> {
    let points: ScatterTable = table
        .iter()
        .filter_map(|r| {
            Some(ScatterPoint {
                job_prestige: r.job_prestige?,
                income: r.income?,
                sex: r.sex.clone()?,
                education: r.education,
                socioeconomic_index: r.socioeconomic_index,
            })
        })
        .collect();

    if points.is_empty() {
        return Err(PipelineError::EmptyResult("no respondents with prestige and income"));
    }
    Ok(points)
}

/// Per-sex OLS trend of income on job prestige.
///
/// Sexes with fewer than two points or a constant prestige are omitted.
pub fn prestige_income_trends(points: &[ScatterPoint]) -> Vec<TrendLine> {
    let mut by_sex: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for p in points {
        by_sex
            .entry(p.sex.as_str())
            .or_default()
            .push((p.job_prestige, p.income));
    }

    by_sex
        .into_iter()
        .filter_map(|(sex, xy)| {
            let fit = ols(&xy)?;
            Some(TrendLine {
                sex: sex.to_string(),
                slope: fit.slope,
                intercept: fit.intercept,
                r_squared: fit.r_squared,
                n: xy.len(),
            })
        })
        .collect()
}

/// Five-number summary of `measure` per sex, ordered by sex.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn box_summary(table: &CleanedTable, measure: Measure) -> Result<Vec<BoxSummary>> {
    let mut by_sex: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in table.iter() {
        if let (Some(sex), Some(v)) = (r.sex.as_deref(), measure.value(r)) {
            by_sex.entry(sex).or_default().push(v);
        }
    }

    let rows: Vec<BoxSummary> = by_sex
        .into_iter()
        .filter_map(|(sex, values)| {
            FiveNumber::from_values(&values).map(|s| BoxSummary::new(sex.to_string(), s))
        })
        .collect();

    if rows.is_empty() {
        return Err(PipelineError::EmptyResult("no values for box summary"));
    }
    debug!(groups = rows.len(), "Box summary computed");
    Ok(rows)
}

/// Five-number summary of job prestige per (category, sex).
pub fn binned_box_summary(binned: &BinnedTable) -> Result<Vec<BinnedBoxSummary>> {
    let mut cells: BTreeMap<(JobPrestigeCategory, &str), Vec<f64>> = BTreeMap::new();
    for r in binned {
        cells
            .entry((r.jp_cat, r.sex.as_str()))
            .or_default()
            .push(r.job_prestige);
    }

    let rows: Vec<BinnedBoxSummary> = cells
        .into_iter()
        .filter_map(|((cat, sex), values)| {
            FiveNumber::from_values(&values)
                .map(|s| BinnedBoxSummary::new(cat, sex.to_string(), s))
        })
        .collect();

    if rows.is_empty() {
        return Err(PipelineError::EmptyResult("no binned rows to summarise"));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::BinnedRow;

    fn record(sex: &str, income: f64, job_prestige: f64) -> SurveyRecord {
        SurveyRecord {
            sex: Some(sex.to_string()),
            income: Some(income),
            job_prestige: Some(job_prestige),
            ..Default::default()
        }
    }

    fn binned(sex: &str, job_prestige: f64) -> BinnedRow {
        BinnedRow {
            income: 1000.0,
            sex: sex.to_string(),
            job_prestige,
            jp_cat: JobPrestigeCategory::from_prestige(job_prestige).unwrap(),
        }
    }

    #[test]
    fn test_scatter_requires_all_axes() {
        let table = CleanedTable::from_records(vec![
            record("male", 10.0, 40.0),
            SurveyRecord {
                income: None,
                ..record("female", 0.0, 30.0)
            },
        ]);
        let points = prestige_income_scatter(&table).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].sex, "male");
    }

    #[test]
    fn test_trends_per_sex() {
        let table = CleanedTable::from_records(vec![
            record("male", 1000.0, 20.0),
            record("male", 3000.0, 40.0),
            record("male", 5000.0, 60.0),
            record("female", 2000.0, 30.0),
        ]);
        let points = prestige_income_scatter(&table).unwrap();
        let trends = prestige_income_trends(&points);

        assert_eq!(trends.len(), 1);
        assert_eq!(trends[0].sex, "male");
        assert_eq!(trends[0].n, 3);
        assert!((trends[0].slope - 100.0).abs() < 1e-9);
        assert!((trends[0].intercept + 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_box_summary_income() {
        let table = CleanedTable::from_records(vec![
            record("male", 10.0, 40.0),
            record("male", 20.0, 40.0),
            record("male", 30.0, 40.0),
            record("female", 5.0, 40.0),
        ]);
        let rows = box_summary(&table, Measure::Income).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sex, "female");
        assert_eq!(rows[0].median, 5.0);
        assert_eq!(rows[1].sex, "male");
        assert_eq!((rows[1].min, rows[1].q1, rows[1].median), (10.0, 15.0, 20.0));
        assert_eq!((rows[1].q3, rows[1].max, rows[1].n), (25.0, 30.0, 3));
    }

    #[test]
    fn test_box_summary_empty() {
        let table = CleanedTable::from_records(vec![SurveyRecord::default()]);
        assert!(matches!(
            box_summary(&table, Measure::JobPrestige).unwrap_err(),
            PipelineError::EmptyResult(_)
        ));
    }

    #[test]
    fn test_binned_box_ordered_by_category() {
        let rows = binned_box_summary(&vec![
            binned("male", 80.0),
            binned("female", 20.0),
            binned("male", 20.0),
            binned("male", 45.0),
        ])
        .unwrap();

        let keys: Vec<_> = rows.iter().map(|r| (r.jp_cat, r.sex.as_str())).collect();
        assert_eq!(
            keys,
            vec![
                (JobPrestigeCategory::VeryLow, "female"),
                (JobPrestigeCategory::VeryLow, "male"),
                (JobPrestigeCategory::Medium, "male"),
                (JobPrestigeCategory::Premium, "male"),
            ]
        );
    }
}
