pub mod announce;
pub mod countdown;
pub mod output;
pub mod plan;
pub mod rally;
pub mod roster;
pub mod settings;

// Re-exports for convenience
pub use announce::{
    AnnouncementCache, CachePolicy, CountdownScript, Fingerprint, LineKind, ScriptLine,
    arrival_announcement, launch_script, line_fingerprint, rally_script, schedule_fingerprint,
};
pub use countdown::{CountdownError, CountdownOrchestrator, SessionState};
pub use output::{
    AudioArtifact, Clock, ConsoleRenderer, ConsoleSink, OutputSink, RenderError, SinkError,
    SpeechRenderer, SystemClock,
};
pub use plan::{
    AnnouncementGroup, PlanError, SAFETY_MARGIN_SECS, ScheduleEntry, SynchronizedSchedule,
    group_by_fire_offset, launch_schedule, rally_schedule,
};
pub use rally::{EnemyRally, RallyBoard, RallyError, RallyPreset, RallyState};
pub use roster::{
    Actor, ActorSpec, DEFAULT_ATTACK_GROUP, ParseError, Roster, RosterError, Timing, format_clock,
    format_duration, parse_actor_spec, parse_duration, speak_duration,
};
pub use settings::{Settings, SettingsExt, VoiceSettings};
