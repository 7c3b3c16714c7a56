//! `ares-output`: persisting what a simulation publishes.
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`row`]      | `CellRow`, `TickSummaryRow`: flat rows built from a frame   |
//! | [`writer`]   | `SnapshotWriter`: the backend trait                         |
//! | [`csv`]      | `CsvSnapshotWriter`: `cell_snapshots.csv` + `tick_summaries.csv`  |
//! | [`recorder`] | `SnapshotRecorder`, `drain_subscription`                    |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                            |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ares_output::{CsvSnapshotWriter, drain_subscription};
//!
//! let sub = ares.subscribe(id)?;
//! let mut writer = CsvSnapshotWriter::new(Path::new("./output"))?;
//! let frames = drain_subscription(&sub, &mut writer, Some(100))?;
//! writer.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod recorder;
pub mod row;
pub mod writer;


pub use crate::csv::CsvSnapshotWriter;
pub use error::{OutputError, OutputResult};
pub use recorder::{SnapshotRecorder, drain_subscription};
pub use row::{CellRow, TickSummaryRow};
pub use writer::SnapshotWriter;
