//! Enemy rally tracking
//!
//! This module provides:
//! - **EnemyRally**: An external countdown we cannot trigger, only observe
//!   (`Pending → Active → Expired`)
//! - **Board**: Owned registry of rallies keyed by name, with start and
//!   time-until-arrival queries
//! - **Presets**: Saved rally + actor-list configurations reloadable under
//!   a slot id (in-memory for the process lifetime)

mod board;
mod enemy;
mod preset;

pub mod error;


pub use board::RallyBoard;
pub use enemy::{EnemyRally, RallyState};
pub use error::RallyError;
pub use preset::RallyPreset;
