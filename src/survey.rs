//! Survey table model: the raw GSS extract and its cleaned projection.
//!
//! [`RawTable`] holds text cells exactly as read, with missing-value
//! sentinels already turned into `None`. [`clean`] keeps the fixed column
//! subset, renames it to domain names and types every field.

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};

/// Respondent identifier column, kept as the row key.
pub const ID_COLUMN: &str = "id";

/// Data columns retained from the raw extract, in output order.
pub const SOURCE_COLUMNS: [&str; 16] = [
    "wtss", "sex", "educ", "region", "age", "coninc", "prestg10", "mapres10", "papres10", "sei10",
    "satjob", "fechld", "fefam", "fepol", "fepresch", "meovrwrk",
];

/// Raw name to domain name. Columns not listed keep their raw name.
///
/// `fehire` and `fejobaff` are not part of the retained subset; renaming
/// them is a no-op.
pub const RENAMES: &[(&str, &str)] = &[
    ("wtss", "weight"),
    ("educ", "education"),
    ("coninc", "income"),
    ("prestg10", "job_prestige"),
    ("mapres10", "mother_job_prestige"),
    ("papres10", "father_job_prestige"),
    ("sei10", "socioeconomic_index"),
    ("fechld", "relationship"),
    ("fefam", "male_breadwinner"),
    ("fehire", "hire_women"),
    ("fejobaff", "preference_hire_women"),
    ("fepol", "men_bettersuited"),
    ("fepresch", "child_suffer"),
    ("meovrwrk", "men_overwork"),
];

/// Cell strings that mean "no answer".
pub const MISSING_SENTINELS: &[&str] = &[
    "IAP",
    "IAP,DK,NA,uncodeable",
    "NOT SURE",
    "DK",
    "IAP, DK, NA, uncodeable",
    ".a",
    "CAN'T CHOOSE",
    "",
    "#N/A",
    "#N/A N/A",
    "#NA",
    "-1.#IND",
    "-1.#QNAN",
    "-NaN",
    "-nan",
    "1.#IND",
    "1.#QNAN",
    "<NA>",
    "N/A",
    "NA",
    "NULL",
    "NaN",
    "None",
    "n/a",
    "nan",
    "null",
];

/// Top-coded age bucket and the numeric value it stands for.
pub const AGE_SENTINEL: &str = "89 or older";
pub const AGE_SENTINEL_VALUE: f64 = 89.0;

pub fn is_missing(cell: &str) -> bool {
    MISSING_SENTINELS.contains(&cell)
}

/// Domain name for a raw column.
pub fn target_name(raw: &str) -> &str {
    RENAMES
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| *to)
        .unwrap_or(raw)
}

/// Header row plus text cells, `None` where the source had a sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        if let Some(pos) = rows.iter().position(|r| r.len() != headers.len()) {
            return Err(PipelineError::mismatch(format!(
                "row {pos} has {} cells, expected {}",
                rows[pos].len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a retained column under either its raw or its domain name.
    fn resolve(&self, raw: &str) -> Option<usize> {
        self.column_index(raw)
            .or_else(|| self.column_index(target_name(raw)))
    }
}

/// Fails with [`PipelineError::SchemaMismatch`] naming every absent column.
pub fn require_columns(table: &RawTable) -> Result<()> {
    let missing: Vec<&str> = std::iter::once(ID_COLUMN)
        .chain(SOURCE_COLUMNS)
        .filter(|c| table.resolve(c).is_none())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::mismatch(format!(
            "missing columns: {}",
            missing.join(", ")
        )))
    }
}

/// One respondent after cleaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SurveyRecord {
    pub id: Option<u64>,
    pub weight: Option<f64>,
    pub sex: Option<String>,
    pub education: Option<f64>,
    pub region: Option<String>,
    pub age: Option<f64>,
    pub income: Option<f64>,
    pub job_prestige: Option<f64>,
    pub mother_job_prestige: Option<f64>,
    pub father_job_prestige: Option<f64>,
    pub socioeconomic_index: Option<f64>,
    pub satjob: Option<String>,
    pub relationship: Option<String>,
    pub male_breadwinner: Option<String>,
    pub men_bettersuited: Option<String>,
    pub child_suffer: Option<String>,
    pub men_overwork: Option<String>,
}

impl SurveyRecord {
    /// Cells in [`CleanedTable::column_names`] order.
    fn to_cells(&self) -> Vec<Option<String>> {
        let num = |v: Option<f64>| v.map(format_number);
        let text = |v: &Option<String>| v.clone();
        vec![
            self.id.map(|v| v.to_string()),
            num(self.weight),
            text(&self.sex),
            num(self.education),
            text(&self.region),
            num(self.age),
            num(self.income),
            num(self.job_prestige),
            num(self.mother_job_prestige),
            num(self.father_job_prestige),
            num(self.socioeconomic_index),
            text(&self.satjob),
            text(&self.relationship),
            text(&self.male_breadwinner),
            text(&self.men_bettersuited),
            text(&self.child_suffer),
            text(&self.men_overwork),
        ]
    }
}

/// Whole numbers print without a fractional part so they re-parse exactly.
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// The cleaned survey; every aggregate is derived from a borrow of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedTable {
    records: Vec<SurveyRecord>,
}

impl CleanedTable {
    pub fn from_records(records: Vec<SurveyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurveyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Domain column names in output order.
    pub fn column_names() -> Vec<&'static str> {
        std::iter::once(ID_COLUMN)
            .chain(SOURCE_COLUMNS.into_iter().map(target_name))
            .collect()
    }

    /// Text form of the table under its domain column names.
    pub fn to_raw(&self) -> RawTable {
        RawTable {
            headers: Self::column_names().into_iter().map(String::from).collect(),
            rows: self.records.iter().map(SurveyRecord::to_cells).collect(),
        }
    }
}

/// Column positions for one pass over a [`RawTable`].
#[derive(Clone, Copy)]
struct Layout {
    id: usize,
    cols: [usize; 16],
}

impl Layout {
    fn resolve(table: &RawTable) -> Result<Self> {
        require_columns(table)?;
        let find = |c: &str| {
            table
                .resolve(c)
                .ok_or_else(|| PipelineError::mismatch(format!("missing column '{c}'")))
        };
        let mut cols = [0usize; 16];
        for (slot, name) in cols.iter_mut().zip(SOURCE_COLUMNS) {
            *slot = find(name)?;
        }
        Ok(Self {
            id: find(ID_COLUMN)?,
            cols,
        })
    }
}

/// Cleans a raw table: subset, rename, age substitution, typing.
///
/// Accepts columns under either raw or domain names, so cleaning
/// `cleaned.to_raw()` yields `cleaned` again.
#[tracing::instrument(skip(raw), fields(rows = raw.len()))]
pub fn clean(raw: &RawTable) -> Result<CleanedTable> {
    let layout = Layout::resolve(raw)?;
    let mut records = Vec::with_capacity(raw.len());

    for (row_no, row) in raw.rows().iter().enumerate() {
        let cell = move |i: usize| row[layout.cols[i]].as_deref();
        let num = move |i: usize| parse_number(cell(i), SOURCE_COLUMNS[i], row_no);
        let text = move |i: usize| cell(i).map(str::to_string);

        records.push(SurveyRecord {
            id: parse_id(row[layout.id].as_deref(), row_no)?,
            weight: num(0)?,
            sex: text(1),
            education: num(2)?,
            region: text(3),
            age: parse_age(cell(4), row_no)?,
            income: num(5)?,
            job_prestige: num(6)?,
            mother_job_prestige: num(7)?,
            father_job_prestige: num(8)?,
            socioeconomic_index: num(9)?,
            satjob: text(10),
            relationship: text(11),
            male_breadwinner: text(12),
            men_bettersuited: text(13),
            child_suffer: text(14),
            men_overwork: text(15),
        });
    }

    let missing_age = records.iter().filter(|r| r.age.is_none()).count();
    debug!(missing_age, "Age column normalised");
    info!(records = records.len(), "Survey table cleaned");

    Ok(CleanedTable { records })
}

fn parse_number(cell: Option<&str>, column: &str, row_no: usize) -> Result<Option<f64>> {
    let Some(text) = cell else {
        return Ok(None);
    };
    let value: f64 = text.trim().parse().map_err(|_| {
        PipelineError::mismatch(format!(
            "non-numeric value '{text}' in column '{}' at row {row_no}",
            target_name(column)
        ))
    })?;
    if value.is_nan() {
        return Ok(None);
    }
    if value.is_infinite() {
        return Err(PipelineError::mismatch(format!(
            "non-finite value '{text}' in column '{}' at row {row_no}",
            target_name(column)
        )));
    }
    Ok(Some(value))
}

fn parse_id(cell: Option<&str>, row_no: usize) -> Result<Option<u64>> {
    cell.map(|text| {
        text.trim().parse::<u64>().map_err(|_| {
            PipelineError::mismatch(format!("invalid respondent id '{text}' at row {row_no}"))
        })
    })
    .transpose()
}

/// Substitutes the top-coded bucket, then requires a non-negative number.
fn parse_age(cell: Option<&str>, row_no: usize) -> Result<Option<f64>> {
    if cell == Some(AGE_SENTINEL) {
        return Ok(Some(AGE_SENTINEL_VALUE));
    }
    let age = parse_number(cell, "age", row_no)?;
    match age {
        Some(a) if a < 0.0 => Err(PipelineError::mismatch(format!(
            "age {a} out of range at row {row_no}"
        ))),
        other => Ok(other),
    }
}
