//! Delivery sinks

use async_trait::async_trait;

use super::artifact::AudioArtifact;
use super::error::SinkError;

/// Delivery endpoint for rendered announcements.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Whether the sink can accept deliveries right now.
    fn is_ready(&self) -> bool;

    /// Deliver one artifact.
    async fn send(&self, artifact: &AudioArtifact) -> Result<(), SinkError>;

    /// Halt any in-flight delivery.
    async fn stop(&self);
}

/// Sink that prints announcements to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

#[async_trait]
impl OutputSink for ConsoleSink {
    fn is_ready(&self) -> bool {
        true
    }

    async fn send(&self, artifact: &AudioArtifact) -> Result<(), SinkError> {
        match artifact {
            AudioArtifact::Text(text) => println!(">> {text}"),
            AudioArtifact::File(path) => println!(">> [audio] {}", path.display()),
        }
        Ok(())
    }

    async fn stop(&self) {}
}
