//! Dashboard description handed to the external page renderer.
//!
//! [`Views`] runs every aggregate over one cleaned table. [`Dashboard`]
//! arranges them into titled sections, each carrying the figure kind, its
//! axis labels and the rows to plot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::analyzers::types::{
    BinnedBoxSummary, BinnedTable, BoxSummary, CountTable, ScatterTable, SummaryTable, TrendLine,
};
use crate::analyzers::{
    Measure, bin_by_prestige, binned_box_summary, box_summary, breadwinner_counts,
    prestige_income_scatter, prestige_income_trends, summarize_by_sex,
};
use crate::error::Result;
use crate::survey::CleanedTable;

pub const TITLE: &str = "Exploring the General Social Survey Results";

const INTRO: &str = "\
The [General Social Survey](http://www.gss.norc.org/About-The-GSS) (GSS) is a national survey \
conducted across the USA since 1972 focusing on data collection to enhance our understanding of \
opinions as they manifest into behaviors. To support our understanding of the survey, the \
following dashboard has been developed which focused on key issues surrounding the gender wage \
gap domestically.

According to the [US Department of Labor](https://blog.dol.gov/2021/03/19/5-facts-about-the-state-of-the-gender-pay-gap), \
women earn 82 cents for every dollar earned by men (other reports have it closer to 84). This \
issue extrapolates beyond women's working years as well, impacting their benefits such as Social \
Security during retirement given that less earnings earlier in life equates to lower benefits \
upon retirement. Although progress has been made in comparison to the 70's when the GSS survey \
started (women were at 57 cents for every dollar earned by men), events such as the pandemic have \
stalled the progress toward equality. When factoring race and holding all else equal (i.e. \
education and years of experience), the gap widens further to 65% for Black and Latina women.

As noted by [Pew Research Center](https://www.pewresearch.org/fact-tank/2021/05/25/gender-pay-gap-facts/), \
this wage gap of 16-18 cents in median earnings equates to an additional ~42 days of work \
annually for women in order to be equal to men. The age gap is improving when factoring in age \
as for women 25-35, a gap of 93 cents exists showing progress through generations. Similar PEW \
Research has identified 40% of women experienced gender discrimination, a hypothesized key \
contributor to the ongoing issue.";

/// Every aggregate of one cleaned table.
#[derive(Debug, Clone)]
pub struct Views {
    pub summary: SummaryTable,
    pub breadwinner: CountTable,
    pub binned: BinnedTable,
    pub scatter: ScatterTable,
    pub trends: Vec<TrendLine>,
    pub income_box: Vec<BoxSummary>,
    pub prestige_box: Vec<BoxSummary>,
    pub binned_box: Vec<BinnedBoxSummary>,
}

impl Views {
    #[tracing::instrument(skip(table), fields(rows = table.len()))]
    pub fn compute(table: &CleanedTable) -> Result<Self> {
        let binned = bin_by_prestige(table)?;
        let scatter = prestige_income_scatter(table)?;

        let views = Self {
            summary: summarize_by_sex(table)?,
            breadwinner: breadwinner_counts(table)?,
            trends: prestige_income_trends(&scatter),
            income_box: box_summary(table, Measure::Income)?,
            prestige_box: box_summary(table, Measure::JobPrestige)?,
            binned_box: binned_box_summary(&binned)?,
            binned,
            scatter,
        };

        info!(
            summary_rows = views.summary.len(),
            breadwinner_rows = views.breadwinner.len(),
            binned_rows = views.binned.len(),
            "Aggregate views computed"
        );
        Ok(views)
    }
}

/// Horizontal placement of a section on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Full,
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Figure {
    Table {
        rows: SummaryTable,
    },
    Bar {
        x: &'static str,
        y: &'static str,
        color: &'static str,
        facet: &'static str,
        labels: BTreeMap<&'static str, &'static str>,
        rows: CountTable,
    },
    Scatter {
        x: &'static str,
        y: &'static str,
        color: &'static str,
        labels: BTreeMap<&'static str, &'static str>,
        points: ScatterTable,
        trends: Vec<TrendLine>,
    },
    Box {
        measure: Measure,
        labels: BTreeMap<&'static str, &'static str>,
        boxes: Vec<BoxSummary>,
    },
    FacetedBox {
        facet: &'static str,
        facet_wrap: usize,
        labels: BTreeMap<&'static str, &'static str>,
        boxes: Vec<BinnedBoxSummary>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub heading: &'static str,
    pub placement: Placement,
    pub figure: Figure,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: &'static str,
    pub generated_at: DateTime<Utc>,
    pub intro_markdown: &'static str,
    pub sections: Vec<Section>,
}

fn labels(pairs: &[(&'static str, &'static str)]) -> BTreeMap<&'static str, &'static str> {
    pairs.iter().copied().collect()
}

impl Dashboard {
    /// Computes every view of `table` and lays out the page.
    pub fn build(table: &CleanedTable) -> Result<Self> {
        Ok(Self::from_views(&Views::compute(table)?))
    }

    pub fn from_views(views: &Views) -> Self {
        let full = |heading, figure| Section {
            heading,
            placement: Placement::Full,
            figure,
        };

        let sections = vec![
            full(
                "Avg. Indicators for Men vs. Women Influencing Wage Gap",
                Figure::Table {
                    rows: views.summary.clone(),
                },
            ),
            full(
                "Male Breadwinner Categories by Gender",
                Figure::Bar {
                    x: "male_breadwinner",
                    y: "count",
                    color: "sex",
                    facet: "sex",
                    labels: labels(&[
                        ("male_breadwinner", "Male Breadwinner Categories"),
                        ("sex", "Gender"),
                        ("count", "# of Responses"),
                    ]),
                    rows: views.breadwinner.clone(),
                },
            ),
            full(
                "Annual Income ($) vs Occupational Job Prestige Score by Gender",
                Figure::Scatter {
                    x: "job_prestige",
                    y: "income",
                    color: "sex",
                    labels: labels(&[
                        ("job_prestige", Measure::JobPrestige.label()),
                        ("income", Measure::Income.label()),
                        ("sex", "Gender"),
                    ]),
                    points: views.scatter.clone(),
                    trends: views.trends.clone(),
                },
            ),
            Section {
                heading: "Annual Income ($) by Gender",
                placement: Placement::Left,
                figure: Figure::Box {
                    measure: Measure::Income,
                    labels: labels(&[("income", Measure::Income.label())]),
                    boxes: views.income_box.clone(),
                },
            },
            Section {
                heading: "Occupational Job Prestige Score by Gender",
                placement: Placement::Right,
                figure: Figure::Box {
                    measure: Measure::JobPrestige,
                    labels: labels(&[("job_prestige", Measure::JobPrestige.label())]),
                    boxes: views.prestige_box.clone(),
                },
            },
            full(
                "Occupational Job Prestige Score & Category by Gender",
                Figure::FacetedBox {
                    facet: "jp_cat",
                    facet_wrap: 2,
                    labels: labels(&[
                        ("sex", "Gender"),
                        ("job_prestige", Measure::JobPrestige.label()),
                        ("jp_cat", "Job Prestige Category"),
                    ]),
                    boxes: views.binned_box.clone(),
                },
            ),
        ];

        Self {
            title: TITLE,
            generated_at: Utc::now(),
            intro_markdown: INTRO,
            sections,
        }
    }
}
