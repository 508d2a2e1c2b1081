//! Operator input parsing and display formatting
//!
//! Durations come in two written forms: `"1:30"` (minutes:seconds) and
//! `"90"` (plain seconds). Actor specs extend the same grammar:
//! `"Alice:25"` registers a travel actor (25 s travel), `"Alice:11:02"`
//! registers a pinned actor (send at 11:02 into the countdown).

use super::actor::{ActorSpec, Timing};
use super::error::ParseError;

/// Parse `"1:30"` or `"90"` into whole seconds.
///
/// The colon form requires exactly two numeric fields with seconds < 60.
pub fn parse_duration(text: &str) -> Result<u32, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid_duration(text, "empty input"));
    }

    match trimmed.split_once(':') {
        Some((minutes, seconds)) => {
            if seconds.contains(':') {
                return Err(invalid_duration(text, "expected minutes:seconds"));
            }
            let minutes = parse_field(minutes)
                .ok_or_else(|| invalid_duration(text, "minutes must be a non-negative integer"))?;
            let seconds = parse_field(seconds)
                .ok_or_else(|| invalid_duration(text, "seconds must be a non-negative integer"))?;
            if seconds >= 60 {
                return Err(invalid_duration(text, "seconds must be below 60"));
            }
            combine_minutes(minutes, seconds)
                .ok_or_else(|| invalid_duration(text, "duration is too large"))
        }
        None => parse_field(trimmed)
            .ok_or_else(|| invalid_duration(text, "expected a non-negative integer")),
    }
}

/// Parse `"Name:25"` (travel) or `"Name:11:02"` (pinned send time).
pub fn parse_actor_spec(text: &str) -> Result<ActorSpec, ParseError> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() < 2 {
        return Err(invalid_spec(text, "expected Name:seconds or Name:minutes:seconds"));
    }
    if parts.len() > 3 {
        return Err(invalid_spec(text, "too many fields"));
    }

    let name = parts[0].trim();
    if name.is_empty() {
        return Err(invalid_spec(text, "actor name must not be empty"));
    }

    let timing = if parts.len() == 2 {
        let seconds = parse_field(parts[1])
            .ok_or_else(|| invalid_spec(text, "travel time must be a non-negative integer"))?;
        if seconds == 0 {
            return Err(invalid_spec(text, "travel time must be greater than zero"));
        }
        Timing::Travel(seconds)
    } else {
        let minutes = parse_field(parts[1])
            .ok_or_else(|| invalid_spec(text, "minutes must be a non-negative integer"))?;
        let seconds = parse_field(parts[2])
            .ok_or_else(|| invalid_spec(text, "seconds must be a non-negative integer"))?;
        if seconds >= 60 {
            return Err(invalid_spec(text, "seconds must be below 60"));
        }
        let total = combine_minutes(minutes, seconds)
            .ok_or_else(|| invalid_spec(text, "send time is too large"))?;
        Timing::Pinned(total)
    };

    Ok(ActorSpec {
        name: name.to_string(),
        timing,
    })
}

/// Compact display form: `"1:30"` for 90, `"45s"` below a minute.
pub fn format_duration(seconds: u32) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if minutes > 0 {
        format!("{minutes}:{rest:02}")
    } else {
        format!("{rest}s")
    }
}

/// Remaining-time display form: `"1m 38s"`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Spoken duration for announcements: `"2 minutes and 10 seconds"`,
/// dropping the zero part (`"2 minutes"`, `"45 seconds"`).
pub fn speak_duration(seconds: u32) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if minutes > 0 {
        if rest > 0 {
            format!("{minutes} minutes and {rest} seconds")
        } else {
            format!("{minutes} minutes")
        }
    } else {
        format!("{rest} seconds")
    }
}

fn parse_field(field: &str) -> Option<u32> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// `minutes:seconds` as total seconds; `None` when the total leaves u32.
fn combine_minutes(minutes: u32, seconds: u32) -> Option<u32> {
    u32::try_from(u64::from(minutes) * 60 + u64::from(seconds)).ok()
}

fn invalid_duration(text: &str, reason: &'static str) -> ParseError {
    ParseError::InvalidDuration {
        text: text.to_string(),
        reason,
    }
}

fn invalid_spec(text: &str, reason: &'static str) -> ParseError {
    ParseError::InvalidActorSpec {
        text: text.to_string(),
        reason,
    }
}
