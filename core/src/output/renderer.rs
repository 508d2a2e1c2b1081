//! Speech rendering seam

use async_trait::async_trait;

use crate::settings::VoiceSettings;

use super::artifact::AudioArtifact;
use super::error::RenderError;

/// Synthesizes announcement text into a deliverable artifact.
///
/// A backend that performs real synthesis returns [`AudioArtifact::File`];
/// passthrough backends return [`AudioArtifact::Text`] and leave speaking
/// to the sink. Safe to call concurrently for different inputs.
#[async_trait]
pub trait SpeechRenderer: Send + Sync {
    async fn render(
        &self,
        text: &str,
        voice: &VoiceSettings,
    ) -> Result<AudioArtifact, RenderError>;
}

/// Passthrough renderer for console delivery.
#[derive(Debug, Default)]
pub struct ConsoleRenderer;

#[async_trait]
impl SpeechRenderer for ConsoleRenderer {
    async fn render(
        &self,
        text: &str,
        _voice: &VoiceSettings,
    ) -> Result<AudioArtifact, RenderError> {
        if text.trim().is_empty() {
            return Err(RenderError::InvalidInput {
                reason: "announcement text is empty",
            });
        }
        Ok(AudioArtifact::Text(text.to_string()))
    }
}
