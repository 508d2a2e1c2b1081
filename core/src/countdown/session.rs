//! Countdown session state

use std::fmt;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::announce::CountdownScript;

/// Lifecycle of a countdown session.
///
/// `Idle → Scheduled → Running → Completed | Cancelled`, then back to
/// `Scheduled` on the next schedule call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scheduled,
    Running,
    Completed,
    Cancelled,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Idle => "idle",
            SessionState::Scheduled => "scheduled",
            SessionState::Running => "running",
            SessionState::Completed => "completed",
            SessionState::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// Mutable session guts behind the orchestrator's lock.
pub(super) struct SessionInner {
    pub state: SessionState,

    /// Script waiting for `start`.
    pub pending: Option<CountdownScript>,

    /// Guards the current run's timers; replaced on disarm.
    pub cancel: CancellationToken,

    /// Armed timer tasks for the current run.
    pub timers: Vec<JoinHandle<()>>,

    /// Monotonic run counter; stale firings compare against it.
    pub run_id: u64,

    /// Lines still to fire in the current run.
    pub lines_remaining: usize,
}

impl SessionInner {
    pub fn new() -> Self {
        SessionInner {
            state: SessionState::Idle,
            pending: None,
            cancel: CancellationToken::new(),
            timers: Vec::new(),
            run_id: 0,
            lines_remaining: 0,
        }
    }

    /// Cancel the current run's token, abort its timers, and install a
    /// fresh token for the next run.
    pub fn disarm(&mut self) {
        self.cancel.cancel();
        for timer in self.timers.drain(..) {
            timer.abort();
        }
        self.cancel = CancellationToken::new();
    }
}
