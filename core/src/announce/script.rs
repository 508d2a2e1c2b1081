//! Countdown script assembly
//!
//! Turns a grouped schedule into the ordered announcement lines the
//! orchestrator arms timers from. Narration/intro lines are keyed by the
//! schedule-level fingerprint; every other line is keyed by its exact text.

use crate::plan::{AnnouncementGroup, SynchronizedSchedule, group_by_fire_offset};
use crate::roster::speak_duration;
use crate::settings::VoiceSettings;

use super::fingerprint::{Fingerprint, line_fingerprint, schedule_fingerprint};

/// What a script line announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Plan walkthrough spoken up front.
    Narration,
    /// "Be ready." cue ahead of the first attack.
    Prepare,
    /// "X, Y go!" for one announcement group.
    Attack,
    /// Terminal line at the end of the countdown.
    Completion,
}

/// One armed announcement: when to fire, what to say, and the cache key
/// for its rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub fire_offset: u32,
    pub text: String,
    pub kind: LineKind,
    pub fingerprint: Fingerprint,
}

/// Ordered announcement lines for one countdown run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownScript {
    pub lines: Vec<ScriptLine>,
    pub total_duration: u32,
}

/// Build the synchronize-arrival script: narration at offset 0, one attack
/// line per group, completion at `total_duration`.
pub fn launch_script(schedule: &SynchronizedSchedule, voice: &VoiceSettings) -> CountdownScript {
    let mut lines = Vec::new();

    if let Some(first) = schedule.entries.first() {
        let mut narration = format!("Synchronized attack sequence. {} starts first. ", first.name);
        for entry in &schedule.entries {
            if entry.fire_offset == 0 {
                narration.push_str(&format!("{} starts immediately. ", entry.name));
            } else {
                narration.push_str(&format!(
                    "{} starts at second {}. ",
                    entry.name, entry.fire_offset
                ));
            }
        }
        narration.push_str(&format!("{} ready. Three. Two. One. Go.", first.name));

        lines.push(ScriptLine {
            fire_offset: 0,
            text: narration,
            kind: LineKind::Narration,
            fingerprint: schedule_fingerprint(schedule, voice),
        });
    }

    push_attack_lines(&mut lines, &group_by_fire_offset(&schedule.entries), voice);
    push_line(
        &mut lines,
        schedule.total_duration,
        "Attack sequence complete.",
        LineKind::Completion,
        voice,
    );

    CountdownScript {
        lines,
        total_duration: schedule.total_duration,
    }
}

/// Build the deadline-driven script: intro at offset 0, a "Be ready." cue
/// `prepare_lead_secs` ahead of the first attack (dropped when that lands
/// at or before the start), attack lines per group, completion at
/// `total_duration`.
pub fn rally_script(
    rally_name: &str,
    schedule: &SynchronizedSchedule,
    voice: &VoiceSettings,
    prepare_lead_secs: u32,
) -> CountdownScript {
    let mut lines = Vec::new();

    let intro = format!(
        "{rally_name} has started a rally it will arrive after {}.",
        speak_duration(schedule.total_duration)
    );
    lines.push(ScriptLine {
        fire_offset: 0,
        text: intro,
        kind: LineKind::Narration,
        fingerprint: schedule_fingerprint(schedule, voice),
    });

    let groups = group_by_fire_offset(&schedule.entries);
    if let Some(first_attack) = groups.first().map(|g| g.fire_offset) {
        let prepare_at = first_attack.saturating_sub(prepare_lead_secs);
        if prepare_at > 0 {
            push_line(&mut lines, prepare_at, "Be ready.", LineKind::Prepare, voice);
        }
    }

    push_attack_lines(&mut lines, &groups, voice);
    push_line(
        &mut lines,
        schedule.total_duration,
        "Rally complete.",
        LineKind::Completion,
        voice,
    );

    CountdownScript {
        lines,
        total_duration: schedule.total_duration,
    }
}

/// Standalone arrival warning for an already-started rally.
pub fn arrival_announcement(rally_name: &str, seconds_until_arrival: u32) -> String {
    format!(
        "{rally_name} has started a rally. Enemy will arrive in {}. Prepare for reinforcement!",
        speak_duration(seconds_until_arrival)
    )
}

fn push_attack_lines(
    lines: &mut Vec<ScriptLine>,
    groups: &[AnnouncementGroup],
    voice: &VoiceSettings,
) {
    for group in groups {
        let text = format!("{} go!", group.members.join(", "));
        let fingerprint = line_fingerprint(&text, voice);
        lines.push(ScriptLine {
            fire_offset: group.fire_offset,
            text,
            kind: LineKind::Attack,
            fingerprint,
        });
    }
}

fn push_line(
    lines: &mut Vec<ScriptLine>,
    fire_offset: u32,
    text: &str,
    kind: LineKind,
    voice: &VoiceSettings,
) {
    lines.push(ScriptLine {
        fire_offset,
        text: text.to_string(),
        kind,
        fingerprint: line_fingerprint(text, voice),
    });
}
