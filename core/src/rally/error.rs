//! Error types for rally board operations

use thiserror::Error;

/// Errors from rally and preset management
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RallyError {
    #[error("rally {name:?} is already tracked")]
    AlreadyTracked { name: String },

    #[error("rally {name:?} not found")]
    RallyNotFound { name: String },

    #[error("rally {name:?} was already started")]
    AlreadyStarted { name: String },

    #[error("preset {slot:?} not found")]
    PresetNotFound { slot: String },

    #[error("{field} must be greater than zero")]
    NonPositiveDuration { field: &'static str },

    #[error("lead time must not exceed {} seconds", u32::MAX)]
    LeadOutOfRange,

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("a preset needs at least one actor")]
    EmptyPreset,
}
