//! `tour-output` — planning output writers for the rust_tourplan planner.
//!
//! A finished [`Planning`](tour_solver::Planning) is flattened to plain
//! rows by [`rows_from_planning`] and written by a [`PlanningWriter`]
//! backend.  The CSV backend creates two files:
//!
//! | File                   | Contents                              |
//! |------------------------|---------------------------------------|
//! | `planning_legs.csv`    | one row per leg, in driving order     |
//! | `planning_summary.csv` | one whole-tour summary row            |
//!
//! # Usage
//!
//! ```rust,ignore
//! use tour_output::{rows_from_planning, CsvWriter, PlanningWriter};
//!
//! let (legs, summary) = rows_from_planning(&planning, &map);
//! let mut writer = CsvWriter::new(Path::new("./output"))?;
//! writer.write_legs(&legs)?;
//! writer.write_summary(&summary)?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::{rows_from_planning, LegRow, SummaryRow};
pub use writer::PlanningWriter;
