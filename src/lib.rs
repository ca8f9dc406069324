pub mod analyzers;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod load;
pub mod output;
pub mod parser;
pub mod survey;

pub use error::{PipelineError, Result};
