//! Coordinator settings
//!
//! Persisted as TOML through confy under the "volley" app name. Every field
//! carries a serde default so configs written by older builds keep loading.

use serde::{Deserialize, Serialize};

use crate::announce::CachePolicy;

/// Voice parameters folded into every announcement fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Voice name handed to the speech backend
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Speech rate in words per minute
    #[serde(default = "default_rate_wpm")]
    pub rate_wpm: u32,

    /// Platform tag baked into fingerprints so artifacts rendered on one
    /// OS are never replayed on another
    #[serde(default = "default_platform_tag")]
    pub platform_tag: String,
}

fn default_voice() -> String {
    "Samantha".to_string()
}

fn default_rate_wpm() -> u32 {
    170
}

fn default_platform_tag() -> String {
    std::env::consts::OS.to_string()
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            rate_wpm: default_rate_wpm(),
            platform_tag: default_platform_tag(),
        }
    }
}

/// Settings persisted across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Seconds before the first attack that the "Be ready." cue fires
    #[serde(default = "default_prepare_lead_secs")]
    pub prepare_lead_secs: u32,

    #[serde(default)]
    pub voice: VoiceSettings,

    #[serde(default = "default_cache_policy")]
    pub cache_policy: CachePolicy,
}

fn default_prepare_lead_secs() -> u32 {
    10
}

fn default_cache_policy() -> CachePolicy {
    CachePolicy::Unbounded
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prepare_lead_secs: default_prepare_lead_secs(),
            voice: VoiceSettings::default(),
            cache_policy: default_cache_policy(),
        }
    }
}

/// Extension trait for Settings persistence
pub trait SettingsExt {
    fn load() -> Self;
    fn save(self);
}

impl SettingsExt for Settings {
    fn load() -> Self {
        confy::load("volley", "config").unwrap_or_default()
    }

    fn save(self) {
        confy::store("volley", "config", self).expect("Failed to save configuration");
    }
}
