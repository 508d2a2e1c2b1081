use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::yield_now;
use tokio::time::advance;

use crate::announce::{
    AnnouncementCache, CachePolicy, CountdownScript, LineKind, ScriptLine, line_fingerprint,
};
use crate::output::{AudioArtifact, OutputSink, RenderError, SinkError, SpeechRenderer, SystemClock};
use crate::settings::VoiceSettings;

use super::error::CountdownError;
use super::orchestrator::CountdownOrchestrator;
use super::session::SessionState;

/// Sink that records delivered text and counts stop calls.
struct RecordingSink {
    ready: bool,
    sent: Mutex<Vec<String>>,
    stops: AtomicUsize,
}

impl RecordingSink {
    fn new() -> Arc<Self> {
        Arc::new(RecordingSink {
            ready: true,
            sent: Mutex::new(Vec::new()),
            stops: AtomicUsize::new(0),
        })
    }

    fn offline() -> Arc<Self> {
        Arc::new(RecordingSink {
            ready: false,
            sent: Mutex::new(Vec::new()),
            stops: AtomicUsize::new(0),
        })
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OutputSink for RecordingSink {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn send(&self, artifact: &AudioArtifact) -> Result<(), SinkError> {
        let text = match artifact {
            AudioArtifact::Text(text) => text.clone(),
            AudioArtifact::File(path) => path.display().to_string(),
        };
        self.sent.lock().unwrap().push(text);
        Ok(())
    }

    async fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Renderer that counts render calls, optionally failing on a text marker
/// or sleeping to simulate a slow backend.
struct TestRenderer {
    renders: AtomicUsize,
    fail_on: Option<&'static str>,
    delay: Option<Duration>,
    delay_on: Option<&'static str>,
}

impl TestRenderer {
    fn new() -> Arc<Self> {
        Arc::new(TestRenderer {
            renders: AtomicUsize::new(0),
            fail_on: None,
            delay: None,
            delay_on: None,
        })
    }

    fn failing_on(marker: &'static str) -> Arc<Self> {
        Arc::new(TestRenderer {
            renders: AtomicUsize::new(0),
            fail_on: Some(marker),
            delay: None,
            delay_on: None,
        })
    }

    fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(TestRenderer {
            renders: AtomicUsize::new(0),
            fail_on: None,
            delay: Some(delay),
            delay_on: None,
        })
    }

    /// Slow only for lines containing `marker`.
    fn slow_on(marker: &'static str, delay: Duration) -> Arc<Self> {
        Arc::new(TestRenderer {
            renders: AtomicUsize::new(0),
            fail_on: None,
            delay: Some(delay),
            delay_on: Some(marker),
        })
    }

    fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechRenderer for TestRenderer {
    async fn render(
        &self,
        text: &str,
        _voice: &VoiceSettings,
    ) -> Result<AudioArtifact, RenderError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            if self.delay_on.is_none_or(|marker| text.contains(marker)) {
                tokio::time::sleep(delay).await;
            }
        }
        if self.fail_on.is_some_and(|marker| text.contains(marker)) {
            return Err(RenderError::InvalidInput {
                reason: "synthesizer rejected input",
            });
        }
        Ok(AudioArtifact::Text(text.to_string()))
    }
}

fn orchestrator(
    sink: &Arc<RecordingSink>,
    renderer: &Arc<TestRenderer>,
    cache: &Arc<AnnouncementCache>,
) -> CountdownOrchestrator {
    CountdownOrchestrator::new(
        Arc::clone(sink) as Arc<dyn OutputSink>,
        Arc::clone(renderer) as Arc<dyn SpeechRenderer>,
        Arc::new(SystemClock),
        Arc::clone(cache),
        VoiceSettings::default(),
    )
}

fn script(lines: &[(u32, &str)]) -> CountdownScript {
    let voice = VoiceSettings::default();
    let total_duration = lines.iter().map(|(offset, _)| *offset).max().unwrap_or(0);
    CountdownScript {
        lines: lines
            .iter()
            .map(|(offset, text)| ScriptLine {
                fire_offset: *offset,
                text: (*text).to_string(),
                kind: LineKind::Attack,
                fingerprint: line_fingerprint(text, &voice),
            })
            .collect(),
        total_duration,
    }
}

/// Run every ready task without moving the paused clock.
async fn settle() {
    for _ in 0..50 {
        yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn lines_fire_in_offset_order() {
    let sink = RecordingSink::new();
    let renderer = TestRenderer::new();
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    session
        .schedule(script(&[(0, "one"), (2, "two"), (5, "three")]))
        .await
        .unwrap();
    assert_eq!(session.state().await, SessionState::Scheduled);

    session.start().await.unwrap();
    assert_eq!(session.state().await, SessionState::Running);

    settle().await;
    assert_eq!(sink.sent(), vec!["one"]);

    advance(Duration::from_secs(2)).await;
    settle().await;
    assert_eq!(sink.sent(), vec!["one", "two"]);

    advance(Duration::from_secs(3)).await;
    settle().await;
    assert_eq!(sink.sent(), vec!["one", "two", "three"]);
    assert_eq!(session.state().await, SessionState::Completed);
}

#[tokio::test(start_paused = true)]
async fn same_offset_lines_deliver_in_script_order() {
    let sink = RecordingSink::new();
    // The opening narration renders slowly; the attack call sharing its
    // offset must wait for it rather than jump the queue.
    let renderer = TestRenderer::slow_on("sequence", Duration::from_secs(2));
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    session
        .schedule(script(&[
            (0, "Attack sequence begins"),
            (0, "Alpha go!"),
            (5, "Bravo go!"),
        ]))
        .await
        .unwrap();
    session.start().await.unwrap();
    settle().await;
    assert_eq!(sink.sent(), Vec::<String>::new());

    advance(Duration::from_secs(2)).await;
    settle().await;
    assert_eq!(sink.sent(), vec!["Attack sequence begins", "Alpha go!"]);

    advance(Duration::from_secs(3)).await;
    settle().await;
    assert_eq!(
        sink.sent(),
        vec!["Attack sequence begins", "Alpha go!", "Bravo go!"]
    );
    assert_eq!(session.state().await, SessionState::Completed);
}

#[tokio::test(start_paused = true)]
async fn cancel_disarms_pending_timers_and_stops_audio() {
    let sink = RecordingSink::new();
    let renderer = TestRenderer::new();
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    session
        .schedule(script(&[(0, "first"), (30, "late")]))
        .await
        .unwrap();
    session.start().await.unwrap();
    settle().await;
    assert_eq!(sink.sent(), vec!["first"]);

    assert!(session.cancel().await);
    assert_eq!(session.state().await, SessionState::Cancelled);
    assert_eq!(sink.stops(), 1);

    // The disarmed timer never fires.
    advance(Duration::from_secs(60)).await;
    settle().await;
    assert_eq!(sink.sent(), vec!["first"]);

    // Cancelling again is a no-op.
    assert!(!session.cancel().await);
    assert_eq!(sink.stops(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_is_a_noop_when_nothing_is_running() {
    let sink = RecordingSink::new();
    let renderer = TestRenderer::new();
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    assert!(!session.cancel().await);
    assert_eq!(session.state().await, SessionState::Idle);

    session.schedule(script(&[(0, "go")])).await.unwrap();
    session.start().await.unwrap();
    settle().await;
    assert_eq!(session.state().await, SessionState::Completed);

    assert!(!session.cancel().await);
    assert_eq!(session.state().await, SessionState::Completed);
    assert_eq!(sink.stops(), 0);
}

#[tokio::test]
async fn schedule_requires_a_ready_sink() {
    let sink = RecordingSink::offline();
    let renderer = TestRenderer::new();
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    let result = session.schedule(script(&[(0, "go")])).await;
    assert!(matches!(result, Err(CountdownError::SinkUnavailable)));
    assert_eq!(session.state().await, SessionState::Idle);
}

#[tokio::test]
async fn start_requires_a_pending_script() {
    let sink = RecordingSink::new();
    let renderer = TestRenderer::new();
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    let result = session.start().await;
    assert!(matches!(result, Err(CountdownError::NothingScheduled)));
}

#[tokio::test(start_paused = true)]
async fn scheduling_supersedes_a_running_countdown() {
    let sink = RecordingSink::new();
    let renderer = TestRenderer::new();
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    session
        .schedule(script(&[(0, "a0"), (60, "a60")]))
        .await
        .unwrap();
    session.start().await.unwrap();
    settle().await;
    assert_eq!(sink.sent(), vec!["a0"]);

    // Replaces the running countdown and stops its audio.
    session.schedule(script(&[(0, "b0")])).await.unwrap();
    assert_eq!(session.state().await, SessionState::Scheduled);
    assert_eq!(sink.stops(), 1);

    session.start().await.unwrap();
    settle().await;
    advance(Duration::from_secs(60)).await;
    settle().await;

    // The superseded run's 60 s line never fires.
    assert_eq!(sink.sent(), vec!["a0", "b0"]);
    assert_eq!(session.state().await, SessionState::Completed);
}

#[tokio::test(start_paused = true)]
async fn render_failures_do_not_stop_the_run() {
    let sink = RecordingSink::new();
    let renderer = TestRenderer::failing_on("boom");
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    session
        .schedule(script(&[(0, "boom"), (1, "ok")]))
        .await
        .unwrap();
    session.start().await.unwrap();
    settle().await;

    advance(Duration::from_secs(1)).await;
    settle().await;

    assert_eq!(sink.sent(), vec!["ok"]);
    assert_eq!(session.state().await, SessionState::Completed);
}

#[tokio::test(start_paused = true)]
async fn artifacts_are_cached_across_runs() {
    let sink = RecordingSink::new();
    let renderer = TestRenderer::new();
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    for _ in 0..2 {
        session
            .schedule(script(&[(0, "alpha"), (1, "beta")]))
            .await
            .unwrap();
        session.start().await.unwrap();
        settle().await;
        advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(session.state().await, SessionState::Completed);
    }

    assert_eq!(sink.sent(), vec!["alpha", "beta", "alpha", "beta"]);
    assert_eq!(renderer.renders(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancel_mid_render_suppresses_delivery() {
    let sink = RecordingSink::new();
    let renderer = TestRenderer::slow(Duration::from_millis(100));
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    session.schedule(script(&[(0, "slow line")])).await.unwrap();
    session.start().await.unwrap();
    settle().await;
    assert_eq!(renderer.renders(), 1);

    assert!(session.cancel().await);

    advance(Duration::from_millis(200)).await;
    settle().await;

    assert!(sink.sent().is_empty());
    assert_eq!(sink.stops(), 1);
    assert_eq!(session.state().await, SessionState::Cancelled);
}

#[tokio::test]
async fn empty_script_completes_immediately() {
    let sink = RecordingSink::new();
    let renderer = TestRenderer::new();
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let session = orchestrator(&sink, &renderer, &cache);

    session
        .schedule(CountdownScript {
            lines: Vec::new(),
            total_duration: 0,
        })
        .await
        .unwrap();
    session.start().await.unwrap();
    assert_eq!(session.state().await, SessionState::Completed);
}

#[tokio::test(start_paused = true)]
async fn sessions_share_renders_through_the_cache() {
    let cache = Arc::new(AnnouncementCache::new(CachePolicy::Unbounded));
    let renderer = TestRenderer::new();
    let first_sink = RecordingSink::new();
    let second_sink = RecordingSink::new();
    let first = orchestrator(&first_sink, &renderer, &cache);
    let second = orchestrator(&second_sink, &renderer, &cache);

    first.schedule(script(&[(0, "Alpha go!")])).await.unwrap();
    first.start().await.unwrap();
    settle().await;

    second.schedule(script(&[(0, "Alpha go!")])).await.unwrap();
    second.start().await.unwrap();
    settle().await;

    assert_eq!(first_sink.sent(), vec!["Alpha go!"]);
    assert_eq!(second_sink.sent(), vec!["Alpha go!"]);
    assert_eq!(renderer.renders(), 1);
}
