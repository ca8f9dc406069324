//! Aggregate views derived from the cleaned survey.
//!
//! Every function borrows a [`crate::survey::CleanedTable`] (or a view
//! derived from one) and returns a fresh table; none mutate their input.

pub mod aggregate;
pub mod binning;
pub mod distribution;
pub mod types;
pub mod utility;

pub use aggregate::{breadwinner_counts, summarize_by_sex};
pub use binning::{JobPrestigeCategory, bin_by_prestige};
pub use distribution::{
    Measure, binned_box_summary, box_summary, prestige_income_scatter, prestige_income_trends,
};
