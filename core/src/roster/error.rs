//! Error types for roster operations

use thiserror::Error;

/// Errors from roster store operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("actor {name:?} is not registered")]
    ActorNotFound { name: String },
}

/// Errors from operator input parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid duration {text:?}: {reason}")]
    InvalidDuration { text: String, reason: &'static str },

    #[error("invalid actor spec {text:?}: {reason}")]
    InvalidActorSpec { text: String, reason: &'static str },
}
