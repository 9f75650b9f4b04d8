//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `planning_legs.csv`
//! - `planning_summary.csv`
//!
//! Times of day are written both as raw seconds and formatted `hh:mm:ss`
//! so the files are usable without postprocessing.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use tour_core::format_time_of_day;

use crate::writer::PlanningWriter;
use crate::{LegRow, OutputResult, SummaryRow};

/// Writes a planning to two CSV files.
pub struct CsvWriter {
    legs:      Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut legs = Writer::from_path(dir.join("planning_legs.csv"))?;
        legs.write_record([
            "leg",
            "from_intersection",
            "to_intersection",
            "streets",
            "segment_count",
            "travel_s",
            "arrival",
            "wait_s",
            "service_s",
            "violates_window",
        ])?;

        let mut summaries = Writer::from_path(dir.join("planning_summary.csv"))?;
        summaries.write_record([
            "stops",
            "departure",
            "total_s",
            "travel_s",
            "wait_s",
            "service_s",
            "violated_windows",
        ])?;

        Ok(Self { legs, summaries, finished: false })
    }
}

impl PlanningWriter for CsvWriter {
    fn write_legs(&mut self, rows: &[LegRow]) -> OutputResult<()> {
        for row in rows {
            self.legs.write_record(&[
                row.leg.to_string(),
                row.from_intersection.to_string(),
                row.to_intersection.to_string(),
                row.streets.clone(),
                row.segment_count.to_string(),
                row.travel_s.to_string(),
                format_time_of_day(row.arrival_s),
                row.wait_s.to_string(),
                row.service_s.to_string(),
                (row.violates_window as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.stops.to_string(),
            format_time_of_day(row.departure_s),
            row.total_s.to_string(),
            row.travel_s.to_string(),
            row.wait_s.to_string(),
            row.service_s.to_string(),
            row.violated_windows.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.legs.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
