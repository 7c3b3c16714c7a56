//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `cell_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::SnapshotWriter;
use crate::{CellRow, OutputResult, TickSummaryRow};

pub const CELLS_FILE: &str = "cell_snapshots.csv";
pub const SUMMARIES_FILE: &str = "tick_summaries.csv";

/// Writes published frames to two CSV files.
pub struct CsvSnapshotWriter {
    cells:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvSnapshotWriter {
    /// Create both files in `dir` (truncating existing ones) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut cells = Writer::from_path(dir.join(CELLS_FILE))?;
        cells.write_record(["simulation", "tick", "x", "y", "agent_id", "agent_type", "parameters"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARIES_FILE))?;
        summaries.write_record(["simulation", "tick", "finished", "agents"])?;

        Ok(Self { cells, summaries, finished: false })
    }
}

impl SnapshotWriter for CsvSnapshotWriter {
    fn write_cells(&mut self, rows: &[CellRow]) -> OutputResult<()> {
        for row in rows {
            self.cells.write_record([
                row.simulation_id.to_string(),
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.agent_id.to_string(),
                row.agent_type.clone(),
                row.parameters.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record([
            row.simulation_id.to_string(),
            row.tick.to_string(),
            (row.finished as u8).to_string(),
            row.agents.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.cells.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
