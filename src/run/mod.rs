//! Batch runs: the executor, its event contract and the worker thread wrapper.

mod events;
mod executor;
mod report;
mod worker;

pub use events::{EventSink, RunEvent};
pub use executor::{run_move, run_move_until};
pub use report::{FileOutcome, FileRecord, RunReport};
pub use worker::{RunHandle, spawn_run};
