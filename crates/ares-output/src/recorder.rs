//! Feeding published frames into a [`SnapshotWriter`].

use tracing::debug;

use ares_sim::{SimulationOutputData, Subscription};

use crate::row::{CellRow, TickSummaryRow};
use crate::writer::SnapshotWriter;
use crate::OutputResult;

/// Turns frames into rows and hands them to `W`.
pub struct SnapshotRecorder<W: SnapshotWriter> {
    writer: W,
    frames: usize,
}

impl<W: SnapshotWriter> SnapshotRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    /// Write the summary and every occupied cell of `frame`.
    pub fn record(&mut self, frame: &SimulationOutputData) -> OutputResult<()> {
        self.writer.write_tick_summary(&TickSummaryRow::from(frame))?;
        let rows: Vec<CellRow> = frame
            .snapshot
            .cells
            .iter()
            .map(|cell| CellRow::from_cell(frame, cell))
            .collect();
        if !rows.is_empty() {
            self.writer.write_cells(&rows)?;
        }
        self.frames += 1;
        Ok(())
    }

    /// Frames recorded so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

/// Record frames from `subscription` until `limit` frames were written or
/// the simulation is removed, blocking in between.  Returns the number of
/// frames written.  The writer is not finished.
pub fn drain_subscription<W: SnapshotWriter>(
    subscription: &Subscription,
    writer:       &mut W,
    limit:        Option<usize>,
) -> OutputResult<usize> {
    let mut recorder = SnapshotRecorder::new(writer);
    for frame in subscription.iter().take(limit.unwrap_or(usize::MAX)) {
        recorder.record(&frame)?;
    }
    let frames = recorder.frames();
    debug!(sim = %subscription.simulation_id(), frames, "subscription drained");
    Ok(frames)
}
