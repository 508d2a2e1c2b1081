//! Error types for timing calculations

use thiserror::Error;

/// Errors from schedule computation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("no actors registered")]
    EmptyRoster,

    #[error("no actors in attack group {group}")]
    GroupNotFound { group: u32 },

    #[error("rally {name:?} has not been started")]
    RallyNotStarted { name: String },

    #[error("actor {name:?} has a pinned send time and cannot join a synchronized launch")]
    PinnedActor { name: String },
}
