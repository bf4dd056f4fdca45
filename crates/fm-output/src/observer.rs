//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use fm_core::ids::raw_system;
use fm_core::{EmpireId, Turn};
use fm_fleet::FleetStore;
use fm_sim::{SimObserver, TurnSummary};

use crate::row::{FleetSnapshotRow, TurnSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes fleet snapshots and turn summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

/// One row per fleet, in ascending id order.
pub fn snapshot_rows(turn: Turn, fleets: &FleetStore) -> OutputResult<Vec<FleetSnapshotRow>> {
    fleets
        .fleets()
        .map(|f| {
            Ok(FleetSnapshotRow {
                turn:        turn.0,
                fleet_id:    f.id.0,
                owner:       f.primary_owner().unwrap_or(EmpireId::INVALID).0,
                x:           f.position.x,
                y:           f.position.y,
                system:      raw_system(f.system),
                next_system: raw_system(f.next_system),
                destination: raw_system(f.destination),
                ships:       f.num_ships() as u32,
                speed:       f.speed(),
                fuel:        fleets.fuel(f.id)?,
                remaining:   f.route.distance(),
            })
        })
        .collect()
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_turn_end(&mut self, turn: Turn, summary: &TurnSummary) {
        let row = TurnSummaryRow {
            turn:       turn.0,
            moved:      summary.moved as u64,
            arrived:    summary.arrived as u64,
            resupplied: summary.resupplied as u64,
            blocked:    summary.blocked as u64,
            explored:   summary.explored as u64,
            distance:   summary.distance,
        };
        let result = self.writer.write_turn_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, turn: Turn, fleets: &FleetStore) {
        let result = match snapshot_rows(turn, fleets) {
            Ok(rows) if rows.is_empty() => Ok(()),
            Ok(rows) => self.writer.write_snapshots(&rows),
            Err(e) => Err(e),
        };
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_turn: Turn) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
