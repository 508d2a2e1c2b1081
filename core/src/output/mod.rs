//! Announcement delivery
//!
//! This module provides:
//! - **Artifacts**: rendered announcements, held in memory or on disk
//! - **Renderer**: text to artifact synthesis behind a trait seam
//! - **Sink**: async delivery endpoint for rendered artifacts
//! - **Clock**: the time source countdown timers are armed against

mod artifact;
mod clock;
mod renderer;
mod sink;

pub mod error;

pub use artifact::AudioArtifact;
pub use clock::{Clock, SystemClock};
pub use error::{RenderError, SinkError};
pub use renderer::{ConsoleRenderer, SpeechRenderer};
pub use sink::{ConsoleSink, OutputSink};
