use std::sync::Arc;

use tokio::sync::RwLock;
use volley_core::announce::AnnouncementCache;
use volley_core::countdown::CountdownOrchestrator;
use volley_core::output::{
    Clock, ConsoleRenderer, ConsoleSink, OutputSink, SpeechRenderer, SystemClock,
};
use volley_core::rally::RallyBoard;
use volley_core::roster::Roster;
use volley_core::settings::{Settings, SettingsExt};

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub settings: Arc<RwLock<Settings>>,
    pub roster: Arc<RwLock<Roster>>,
    pub board: Arc<RwLock<RallyBoard>>,
    pub cache: Arc<AnnouncementCache>,
    pub sink: Arc<dyn OutputSink>,
    pub renderer: Arc<dyn SpeechRenderer>,
    pub countdown: Arc<CountdownOrchestrator>,
}

impl CliContext {
    pub fn new() -> Self {
        let settings = Settings::load();
        let cache = Arc::new(AnnouncementCache::new(settings.cache_policy));
        let sink: Arc<dyn OutputSink> = Arc::new(ConsoleSink);
        let renderer: Arc<dyn SpeechRenderer> = Arc::new(ConsoleRenderer);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let countdown = Arc::new(CountdownOrchestrator::new(
            Arc::clone(&sink),
            Arc::clone(&renderer),
            clock,
            Arc::clone(&cache),
            settings.voice.clone(),
        ));

        Self {
            settings: Arc::new(RwLock::new(settings)),
            roster: Arc::new(RwLock::new(Roster::new())),
            board: Arc::new(RwLock::new(RallyBoard::new())),
            cache,
            sink,
            renderer,
            countdown,
        }
    }
}
