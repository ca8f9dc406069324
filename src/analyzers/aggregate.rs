use crate::analyzers::types::{CountRow, CountTable, SummaryRow, SummaryTable};
use crate::analyzers::utility::{mean, round2};
use crate::error::{PipelineError, Result};
use crate::survey::{CleanedTable, SurveyRecord};
use std::collections::BTreeMap;
use tracing::debug;

/// Non-null values of each averaged measure within one sex.
#[derive(Default)]
struct MeasureSeries {
    income: Vec<f64>,
    job_prestige: Vec<f64>,
    socioeconomic_index: Vec<f64>,
    education: Vec<f64>,
}

impl MeasureSeries {
    fn push(&mut self, r: &SurveyRecord) {
        let series = self;

        macro_rules! push_field {
            ($field:ident) => {
                if let Some(v) = r.$field {
                    series.$field.push(v);
                }
            };
        }

        push_field!(income);
        push_field!(job_prestige);
        push_field!(socioeconomic_index);
        push_field!(education);
    }
}

/// Mean income, job prestige, socioeconomic index and education per sex.
///
/// Rows without a sex are left out. Nulls are skipped per measure; a measure
/// with no values in a group is `None`. Rows are ordered by sex.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn summarize_by_sex(table: &CleanedTable) -> Result<SummaryTable> {
    let mut groups: BTreeMap<&str, MeasureSeries> = BTreeMap::new();

    for r in table.iter() {
        let Some(sex) = r.sex.as_deref() else {
            continue;
        };
        groups.entry(sex).or_default().push(r);
    }

    if groups.is_empty() {
        return Err(PipelineError::EmptyResult("no respondents with a recorded sex"));
    }

    let avg = |values: &[f64]| mean(values).map(round2);

    let rows: SummaryTable = groups
        .into_iter()
        .map(|(sex, s)| SummaryRow {
            gender: sex.to_string(),
            avg_income: avg(&s.income),
            avg_job_prestige: avg(&s.job_prestige),
            avg_socioeconomic_index: avg(&s.socioeconomic_index),
            avg_education: avg(&s.education),
        })
        .collect();

    debug!(groups = rows.len(), "Summary by sex computed");
    Ok(rows)
}

/// Respondent counts per observed (sex, male_breadwinner) pair.
///
/// Rows missing either key are not counted.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn breadwinner_counts(table: &CleanedTable) -> Result<CountTable> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();

    for r in table.iter() {
        if let (Some(sex), Some(answer)) = (r.sex.as_deref(), r.male_breadwinner.as_deref()) {
            *counts.entry((sex, answer)).or_default() += 1;
        }
    }

    if counts.is_empty() {
        return Err(PipelineError::EmptyResult("no breadwinner answers recorded"));
    }

    let rows: CountTable = counts
        .into_iter()
        .map(|((sex, answer), count)| CountRow {
            sex: sex.to_string(),
            male_breadwinner: answer.to_string(),
            count,
        })
        .collect();

    debug!(pairs = rows.len(), "Breadwinner counts computed");
    Ok(rows)
}
