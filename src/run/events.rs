//! Events a run pushes to its observer, in processing order.

use super::report::RunReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// A file is being dispatched; `current` is 1-based.
    Progress { current: usize, total: usize },
    /// One human-readable line, e.g. a per-file outcome.
    Log(String),
    /// Terminal: the run completed.
    Finished(RunReport),
    /// Terminal: the run could not proceed.
    Failed(String),
}

impl RunEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunEvent::Finished(_) | RunEvent::Failed(_))
    }
}

/// Receiver of run events.
pub trait EventSink {
    fn emit(&mut self, event: RunEvent);
}

impl<F> EventSink for F
where
    F: FnMut(RunEvent),
{
    fn emit(&mut self, event: RunEvent) {
        self(event)
    }
}
