//! Error types for rendering and delivery

use std::io;

use thiserror::Error;

/// Errors from synthesizing announcement text into an artifact.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("cannot render announcement: {reason}")]
    InvalidInput { reason: &'static str },

    #[error("speech backend failed")]
    Backend {
        #[source]
        source: io::Error,
    },
}

/// Errors from delivering an artifact through a sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("output sink is not connected")]
    NotConnected,

    #[error("artifact delivery failed")]
    Delivery {
        #[source]
        source: io::Error,
    },
}
