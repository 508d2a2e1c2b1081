//! Countdown session system
//!
//! This module provides:
//! - **Session state**: the `Idle/Scheduled/Running/Completed/Cancelled` lifecycle
//! - **Orchestrator**: one cancellable timer per script line, driven through
//!   the cache, renderer, and sink seams

mod orchestrator;
mod session;

pub mod error;

#[cfg(test)]
mod orchestrator_tests;

pub use error::CountdownError;
pub use orchestrator::CountdownOrchestrator;
pub use session::SessionState;
