//! Error types for countdown sessions

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountdownError {
    #[error("output sink is not ready")]
    SinkUnavailable,

    #[error("no countdown is scheduled")]
    NothingScheduled,
}
