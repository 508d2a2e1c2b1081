//! Countdown orchestration
//!
//! # Lifecycle
//!
//! 1. `schedule(script)` parks the script as pending, superseding a running
//!    countdown → `Scheduled`
//! 2. `start()` arms one cancellable timer per distinct fire offset →
//!    `Running`
//! 3. Every line fired → `Completed`; `cancel()` while running → `Cancelled`
//!
//! Each timer parks on the clock seam until its offset, then fires its
//! lines in script order: the narration a script opens with always lands
//! before an attack call sharing its offset. Each line resolves its
//! artifact through the announcement cache and delivers to the sink. A
//! failed render or delivery on one line is logged and swallowed; the rest
//! of the run is unaffected.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::announce::{AnnouncementCache, CountdownScript, ScriptLine};
use crate::output::{Clock, OutputSink, SpeechRenderer};
use crate::settings::VoiceSettings;

use super::error::CountdownError;
use super::session::{SessionInner, SessionState};

/// Drives one countdown session against the sink, renderer, and clock seams.
///
/// Orchestrators are independent of each other; sharing an
/// [`AnnouncementCache`] between them is what makes renders collapse
/// across sessions.
pub struct CountdownOrchestrator {
    sink: Arc<dyn OutputSink>,
    renderer: Arc<dyn SpeechRenderer>,
    clock: Arc<dyn Clock>,
    cache: Arc<AnnouncementCache>,
    voice: VoiceSettings,
    session: Arc<Mutex<SessionInner>>,
}

impl CountdownOrchestrator {
    pub fn new(
        sink: Arc<dyn OutputSink>,
        renderer: Arc<dyn SpeechRenderer>,
        clock: Arc<dyn Clock>,
        cache: Arc<AnnouncementCache>,
        voice: VoiceSettings,
    ) -> Self {
        CountdownOrchestrator {
            sink,
            renderer,
            clock,
            cache,
            voice,
            session: Arc::new(Mutex::new(SessionInner::new())),
        }
    }

    /// Park `script` as the pending countdown.
    ///
    /// Fails `SinkUnavailable` when the sink cannot accept deliveries. A
    /// running countdown is cancelled first and its in-flight audio stopped.
    pub async fn schedule(&self, script: CountdownScript) -> Result<(), CountdownError> {
        if !self.sink.is_ready() {
            return Err(CountdownError::SinkUnavailable);
        }

        let superseded = {
            let mut inner = self.session.lock().await;
            let superseded = inner.state == SessionState::Running;
            if superseded {
                inner.disarm();
            }
            debug!(
                lines = script.lines.len(),
                total_duration = script.total_duration,
                superseded,
                "Countdown scheduled"
            );
            inner.pending = Some(script);
            inner.state = SessionState::Scheduled;
            superseded
        };

        if superseded {
            self.sink.stop().await;
        }
        Ok(())
    }

    /// Arm the pending script's timers.
    ///
    /// Fails `NothingScheduled` when no script is pending.
    pub async fn start(&self) -> Result<(), CountdownError> {
        let mut inner = self.session.lock().await;
        let script = inner
            .pending
            .take()
            .ok_or(CountdownError::NothingScheduled)?;

        inner.run_id += 1;
        inner.lines_remaining = script.lines.len();
        inner.state = SessionState::Running;
        if inner.lines_remaining == 0 {
            inner.state = SessionState::Completed;
            return Ok(());
        }

        let run_id = inner.run_id;
        let cancel = inner.cancel.clone();
        debug!(run_id, lines = script.lines.len(), "Countdown started");

        let mut by_offset: BTreeMap<u32, Vec<ScriptLine>> = BTreeMap::new();
        for line in script.lines {
            by_offset.entry(line.fire_offset).or_default().push(line);
        }

        inner.timers = by_offset
            .into_iter()
            .map(|(fire_offset, lines)| {
                let ctx = TimerContext {
                    sink: Arc::clone(&self.sink),
                    renderer: Arc::clone(&self.renderer),
                    clock: Arc::clone(&self.clock),
                    cache: Arc::clone(&self.cache),
                    voice: self.voice.clone(),
                    session: Arc::clone(&self.session),
                    cancel: cancel.clone(),
                    run_id,
                };
                tokio::spawn(fire_group(ctx, fire_offset, lines))
            })
            .collect();

        Ok(())
    }

    /// Cancel a running countdown, disarming its timers and stopping
    /// in-flight audio. Returns whether a run was cancelled; on a
    /// non-running session this is a no-op.
    pub async fn cancel(&self) -> bool {
        {
            let mut inner = self.session.lock().await;
            if inner.state != SessionState::Running {
                return false;
            }
            inner.disarm();
            inner.state = SessionState::Cancelled;
            debug!(run_id = inner.run_id, "Countdown cancelled");
        }
        self.sink.stop().await;
        true
    }

    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state
    }
}

/// Everything one armed timer needs, cloned per offset group.
struct TimerContext {
    sink: Arc<dyn OutputSink>,
    renderer: Arc<dyn SpeechRenderer>,
    clock: Arc<dyn Clock>,
    cache: Arc<AnnouncementCache>,
    voice: VoiceSettings,
    session: Arc<Mutex<SessionInner>>,
    cancel: CancellationToken,
    run_id: u64,
}

/// Park until the group's offset, then fire its lines in script order.
/// Cancellation wins at every await point.
async fn fire_group(ctx: TimerContext, fire_offset: u32, lines: Vec<ScriptLine>) {
    if fire_offset > 0 {
        let delay = Duration::from_secs(u64::from(fire_offset));
        tokio::select! {
            () = ctx.cancel.cancelled() => return,
            () = ctx.clock.sleep(delay) => {}
        }
    }

    for line in &lines {
        if ctx.cancel.is_cancelled() {
            return;
        }
        fire_line(&ctx, line).await;
    }
}

/// Resolve one line's artifact through the cache and deliver it.
async fn fire_line(ctx: &TimerContext, line: &ScriptLine) {
    let rendered = ctx
        .cache
        .get_or_render(&line.fingerprint, || async {
            ctx.renderer.render(&line.text, &ctx.voice).await
        })
        .await;

    match rendered {
        Ok(artifact) => {
            // A cancel that lands mid-render suppresses delivery.
            if ctx.cancel.is_cancelled() {
                return;
            }
            if let Err(err) = ctx.sink.send(&artifact).await {
                warn!(error = %err, line = %line.text, "Announcement delivery failed");
            }
        }
        Err(err) => {
            warn!(error = %err, line = %line.text, "Announcement render failed");
        }
    }

    finish_line(ctx).await;
}

/// Record one fired line; the last one completes the run.
async fn finish_line(ctx: &TimerContext) {
    let mut inner = ctx.session.lock().await;
    if inner.run_id != ctx.run_id || inner.state != SessionState::Running {
        return;
    }
    inner.lines_remaining -= 1;
    if inner.lines_remaining == 0 {
        inner.state = SessionState::Completed;
        inner.timers.clear();
        debug!(run_id = ctx.run_id, "Countdown completed");
    }
}
