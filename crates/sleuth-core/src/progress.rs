//! Player progress for one play session.
//!
//! Owned by the host and passed explicitly. The timer and the disclosure
//! model never read it; the host pulls `initial_secs` and the trust score
//! out of it and feeds time-up events back in.

use serde::{Deserialize, Serialize};

use crate::disclosure::TrustScore;
use crate::events::{Event, ExpiryCause};
use crate::storage::{Config, EpisodeConfig, TimerConfig};
use crate::timer::TimerDriver;

/// What the host did in response to a time-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeUpOutcome {
    pub cause: ExpiryCause,
    pub trust_before: TrustScore,
    pub trust_after: TrustScore,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameProgress {
    pub trust: TrustScore,
    /// Episodes that ran out of time.
    pub time_ups: u32,
    /// Clock penalties handed out (wrong accusations and the like).
    pub penalties_applied: u32,
}

impl GameProgress {
    pub fn new(episode: &EpisodeConfig) -> Self {
        Self {
            trust: episode.initial_trust,
            ..Self::default()
        }
    }

    pub fn trust(&self) -> TrustScore {
        self.trust
    }

    /// Shift trust, saturating in `[0, 100]`. Returns the new score.
    pub fn adjust_trust(&mut self, delta: i64) -> TrustScore {
        let before = self.trust;
        self.trust = self.trust.adjusted(delta);
        tracing::debug!(
            before = before.value(),
            after = self.trust.value(),
            delta,
            "trust adjusted"
        );
        self.trust
    }

    /// Build a driver for the next episode from configuration.
    pub fn episode_timer(config: &Config) -> TimerDriver {
        TimerDriver::with_period(config.episode.time_limit_secs, config.timer.tick_period())
    }

    /// Take a clock penalty on `timer`. Returns the event it produced.
    pub fn penalize(&mut self, timer: &mut TimerDriver, config: &TimerConfig) -> Option<Event> {
        self.penalties_applied += 1;
        let secs = i64::try_from(config.wrong_answer_penalty_secs).unwrap_or(i64::MAX);
        timer.add_time(-secs)
    }

    /// Record a time-up and apply the configured trust penalty.
    pub fn apply_time_up(&mut self, cause: ExpiryCause, config: &TimerConfig) -> TimeUpOutcome {
        let trust_before = self.trust;
        self.time_ups += 1;
        let trust_after = self.adjust_trust(-i64::from(config.time_up_trust_penalty));
        tracing::info!(?cause, time_ups = self.time_ups, "episode ran out of time");
        TimeUpOutcome {
            cause,
            trust_before,
            trust_after,
        }
    }
}
