//! Runs a batch on a dedicated worker thread so the caller stays free to observe events.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::config::PolicyConfig;
use crate::errors::DateSortError;
use crate::shutdown::ShutdownFlag;

use super::events::RunEvent;
use super::executor::run_move_until;
use super::report::RunReport;

/// Handle to a running batch: an event stream plus the worker's join handle.
pub struct RunHandle {
    events: Receiver<RunEvent>,
    shutdown: ShutdownFlag,
    worker: JoinHandle<Result<RunReport, DateSortError>>,
}

impl RunHandle {
    /// Ask the worker to stop before its next file.
    pub fn cancel(&self) {
        self.shutdown.request();
    }

    /// Events in processing order; the channel closes after the terminal event.
    pub fn events(&self) -> &Receiver<RunEvent> {
        &self.events
    }

    /// Wait for the worker and return its result. Events not yet received are dropped.
    pub fn join(self) -> anyhow::Result<Result<RunReport, DateSortError>> {
        drop(self.events);
        self.worker
            .join()
            .map_err(|_| anyhow::anyhow!("date-sort worker thread panicked"))
    }
}

/// Start `run_move_until` for `files` on a thread named `date-sort-worker`.
/// Requests on `shutdown` (or [`RunHandle::cancel`]) stop it between files.
pub fn spawn_run(policy: PolicyConfig, files: Vec<PathBuf>, shutdown: ShutdownFlag) -> io::Result<RunHandle> {
    let (tx, rx) = mpsc::channel();
    let flag = shutdown.clone();
    let worker = thread::Builder::new()
        .name("date-sort-worker".into())
        .spawn(move || {
            // A dropped receiver only means nobody is watching; keep working.
            let mut sink = |event: RunEvent| {
                let _ = tx.send(event);
            };
            run_move_until(&policy, &files, &flag, &mut sink)
        })?;
    Ok(RunHandle {
        events: rx,
        shutdown,
        worker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn events_end_with_terminal_and_channel_closes() {
        let td = tempdir().unwrap();
        fs::write(td.path().join("a.txt"), b"a").unwrap();
        let files = vec![td.path().join("a.txt")];
        let handle = spawn_run(PolicyConfig::new(td.path()), files, ShutdownFlag::new()).unwrap();

        let events: Vec<RunEvent> = handle.events().iter().collect();
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
        assert!(matches!(events.last(), Some(RunEvent::Finished(r)) if r.moved() == 1));

        let report = handle.join().unwrap().unwrap();
        assert_eq!(report.total, 1);
    }

    #[test]
    fn failed_root_is_reported_through_channel() {
        let td = tempdir().unwrap();
        let handle = spawn_run(PolicyConfig::new(td.path().join("missing")), Vec::new(), ShutdownFlag::new()).unwrap();
        let events: Vec<RunEvent> = handle.events().iter().collect();
        assert!(matches!(events.as_slice(), [RunEvent::Failed(_)]));
        assert!(handle.join().unwrap().is_err());
    }
}
