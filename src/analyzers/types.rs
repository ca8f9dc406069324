//! Row types for the aggregate views handed to the renderer.

use serde::Serialize;

use crate::analyzers::binning::JobPrestigeCategory;
use crate::analyzers::utility::FiveNumber;

/// Mean indicators for one sex, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Avg. Income")]
    pub avg_income: Option<f64>,
    #[serde(rename = "Avg. Job Prestige")]
    pub avg_job_prestige: Option<f64>,
    #[serde(rename = "Avg. Socioeconomic Index")]
    pub avg_socioeconomic_index: Option<f64>,
    #[serde(rename = "Avg. Years of Education")]
    pub avg_education: Option<f64>,
}

/// Number of respondents giving one breadwinner answer, per sex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub sex: String,
    pub male_breadwinner: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedRow {
    pub income: f64,
    pub sex: String,
    pub job_prestige: f64,
    pub jp_cat: JobPrestigeCategory,
}

/// One respondent in the income vs prestige scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub job_prestige: f64,
    pub income: f64,
    pub sex: String,
    pub education: Option<f64>,
    pub socioeconomic_index: Option<f64>,
}

/// OLS fit of income on job prestige for one sex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLine {
    pub sex: String,
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub n: usize,
}

/// Box plot statistics of a measure for one sex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub sex: String,
    pub n: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Box plot statistics of job prestige for one (category, sex) cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedBoxSummary {
    pub jp_cat: JobPrestigeCategory,
    pub sex: String,
    pub n: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxSummary {
    pub(crate) fn new(sex: String, s: FiveNumber) -> Self {
        Self {
            sex,
            n: s.n,
            min: s.min,
            q1: s.q1,
            median: s.median,
            q3: s.q3,
            max: s.max,
        }
    }
}

impl BinnedBoxSummary {
    pub(crate) fn new(jp_cat: JobPrestigeCategory, sex: String, s: FiveNumber) -> Self {
        Self {
            jp_cat,
            sex,
            n: s.n,
            min: s.min,
            q1: s.q1,
            median: s.median,
            q3: s.q3,
            max: s.max,
        }
    }
}

pub type SummaryTable = Vec<SummaryRow>;
pub type CountTable = Vec<CountRow>;
pub type BinnedTable = Vec<BinnedRow>;
pub type ScatterTable = Vec<ScatterPoint>;
