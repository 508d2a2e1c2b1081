//! Enemy rally records

use std::fmt;

use chrono::{DateTime, Utc};

/// Where a rally sits in its lifecycle.
///
/// Derived from `started_at` and the clock rather than stored, so a rally
/// can never be observed in a stale state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RallyState {
    /// Tracked but the countdown has not begun.
    Pending,
    /// Counting down; arrival is in the future.
    Active,
    /// The arrival instant has passed.
    Expired,
}

impl fmt::Display for RallyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RallyState::Pending => "pending",
            RallyState::Active => "active",
            RallyState::Expired => "expired",
        };
        f.write_str(label)
    }
}

/// An adversary's countdown: we observe it, we never trigger it.
///
/// The total lead time is fixed at creation from two operator-entered
/// parts: a muster duration (minutes the adversary spends forming up) and
/// a march duration (seconds of travel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyRally {
    /// Unique key on the rally board.
    pub name: String,

    /// Minutes the adversary spends forming up before marching.
    pub muster_minutes: u32,

    /// Seconds of travel once the march begins.
    pub march_seconds: u32,

    /// Attack group expected to answer this rally.
    pub attack_group: u32,

    /// When the rally was first tracked.
    pub created_at: DateTime<Utc>,

    /// When the countdown began; `None` while pending.
    pub started_at: Option<DateTime<Utc>>,
}

/// Muster and march combined into one lead duration, in whole seconds.
///
/// Computed wide so operator-entered parts can never wrap u32 arithmetic;
/// the board rejects combinations that do not fit back into u32.
pub(super) fn lead_secs(muster_minutes: u32, march_seconds: u32) -> u64 {
    u64::from(muster_minutes) * 60 + u64::from(march_seconds)
}

impl EnemyRally {
    pub fn new(
        name: impl Into<String>,
        muster_minutes: u32,
        march_seconds: u32,
        attack_group: u32,
    ) -> Self {
        Self {
            name: name.into(),
            muster_minutes,
            march_seconds,
            attack_group,
            created_at: Utc::now(),
            started_at: None,
        }
    }

    /// Fixed duration from start to adversary arrival.
    ///
    /// Board validation keeps tracked rallies inside u32 range; a rally
    /// built by hand with larger parts clamps rather than wraps.
    pub fn total_lead_secs(&self) -> u32 {
        u32::try_from(lead_secs(self.muster_minutes, self.march_seconds)).unwrap_or(u32::MAX)
    }

    pub fn state(&self, now: DateTime<Utc>) -> RallyState {
        match self.target_arrival() {
            None => RallyState::Pending,
            Some(arrival) if now < arrival => RallyState::Active,
            Some(_) => RallyState::Expired,
        }
    }

    /// Arrival instant, once started.
    pub fn target_arrival(&self) -> Option<DateTime<Utc>> {
        self.started_at
            .map(|started| started + chrono::Duration::seconds(i64::from(self.total_lead_secs())))
    }

    /// Whole seconds until arrival, rounded up and clamped to 0 once the
    /// arrival has passed. `None` until started.
    pub fn time_until_arrival(&self, now: DateTime<Utc>) -> Option<u32> {
        let arrival = self.target_arrival()?;
        let millis = (arrival - now).num_milliseconds();
        if millis <= 0 {
            return Some(0);
        }
        Some((millis as u64).div_ceil(1000) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn lead_time_combines_muster_and_march() {
        let rally = EnemyRally::new("North Keep", 2, 10, 1);
        assert_eq!(rally.total_lead_secs(), 130);
    }

    #[test]
    fn oversized_lead_clamps_instead_of_wrapping() {
        let rally = EnemyRally::new("Huge", u32::MAX, u32::MAX, 1);
        assert_eq!(rally.total_lead_secs(), u32::MAX);
    }

    #[test]
    fn state_follows_the_clock() {
        let mut rally = EnemyRally::new("North Keep", 2, 10, 1);
        assert_eq!(rally.state(t0()), RallyState::Pending);

        rally.started_at = Some(t0());
        assert_eq!(rally.state(t0()), RallyState::Active);
        assert_eq!(
            rally.state(t0() + chrono::Duration::seconds(129)),
            RallyState::Active
        );
        assert_eq!(
            rally.state(t0() + chrono::Duration::seconds(130)),
            RallyState::Expired
        );
    }

    #[test]
    fn time_until_arrival_ceils_and_clamps() {
        let mut rally = EnemyRally::new("North Keep", 2, 10, 1);
        assert_eq!(rally.time_until_arrival(t0()), None);

        rally.started_at = Some(t0());
        assert_eq!(rally.time_until_arrival(t0()), Some(130));
        assert_eq!(
            rally.time_until_arrival(t0() + chrono::Duration::milliseconds(500)),
            Some(130)
        );
        assert_eq!(
            rally.time_until_arrival(t0() + chrono::Duration::seconds(1)),
            Some(129)
        );
        assert_eq!(
            rally.time_until_arrival(t0() + chrono::Duration::seconds(500)),
            Some(0)
        );
    }
}
