//! Persistence of the run artifact.
//!
//! Path calculation is pure and lives in `paths`; `writer` is the only
//! place that touches the results directory.

mod paths;
mod writer;

pub use paths::{result_filename, sanitize_topic};
pub use writer::write_result;
