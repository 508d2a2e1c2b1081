//! Actor roster system
//!
//! This module provides:
//! - **Actors**: Named participants with a travel time or a pinned send time
//! - **Store**: Owned in-memory registry with group queries
//! - **Input**: Parsing for operator-entered durations and actor specs,
//!   plus the matching display/spoken formatting helpers

mod actor;
mod input;
mod store;

pub mod error;

pub use actor::{Actor, ActorSpec, DEFAULT_ATTACK_GROUP, Timing};
pub use error::{ParseError, RosterError};
pub use input::{
    format_clock, format_duration, parse_actor_spec, parse_duration, speak_duration,
};
pub use store::Roster;
