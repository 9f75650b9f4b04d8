//! The `PlanningWriter` trait implemented by output backends.

use crate::{LegRow, OutputResult, SummaryRow};

/// Trait implemented by planning output writers.
pub trait PlanningWriter {
    /// Write the tour's legs in driving order.
    fn write_legs(&mut self, rows: &[LegRow]) -> OutputResult<()>;

    /// Write the whole-tour summary row.
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
