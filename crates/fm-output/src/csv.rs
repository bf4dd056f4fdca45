//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `fleet_snapshots.csv`
//! - `turn_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{FleetSnapshotRow, OutputResult, TurnSummaryRow};
use crate::writer::OutputWriter;

pub const SNAPSHOT_FILE: &str = "fleet_snapshots.csv";
pub const SUMMARY_FILE: &str = "turn_summaries.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots:  Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join(SNAPSHOT_FILE))?;
        snapshots.write_record([
            "turn", "fleet_id", "owner", "x", "y", "system", "next_system", "destination",
            "ships", "speed", "fuel", "remaining",
        ])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(["turn", "moved", "arrived", "resupplied", "blocked", "explored", "distance"])?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[FleetSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.turn.to_string(),
                row.fleet_id.to_string(),
                row.owner.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.system.to_string(),
                row.next_system.to_string(),
                row.destination.to_string(),
                row.ships.to_string(),
                row.speed.to_string(),
                row.fuel.to_string(),
                row.remaining.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_turn_summary(&mut self, row: &TurnSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.turn.to_string(),
            row.moved.to_string(),
            row.arrived.to_string(),
            row.resupplied.to_string(),
            row.blocked.to_string(),
            row.explored.to_string(),
            row.distance.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
