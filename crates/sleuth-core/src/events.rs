use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Why a countdown reached zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryCause {
    /// The last second ticked away.
    Countdown,
    /// A negative time adjustment drove the clock to zero.
    Adjustment,
}

/// Every timer state change produces an Event.
/// Hosts re-render on them; observers subscribe to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_secs: u64,
        formatted: String,
        at: DateTime<Utc>,
    },
    /// Bonus (positive) or penalty (negative) applied to the clock.
    TimeAdjusted {
        delta_secs: i64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Terminal event of a run. Emitted at most once per cycle.
    TimeUp {
        cause: ExpiryCause,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        is_running: bool,
        is_paused: bool,
        remaining_secs: u64,
        initial_secs: u64,
        formatted: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_time_up(&self) -> bool {
        matches!(self, Event::TimeUp { .. })
    }

    /// Remaining seconds carried by the event, if it has any.
    pub fn remaining_secs(&self) -> Option<u64> {
        match self {
            Event::TimerStarted { remaining_secs, .. }
            | Event::TimerPaused { remaining_secs, .. }
            | Event::TimerResumed { remaining_secs, .. }
            | Event::TimerTicked { remaining_secs, .. }
            | Event::TimeAdjusted { remaining_secs, .. }
            | Event::TimerReset { remaining_secs, .. }
            | Event::StateSnapshot { remaining_secs, .. } => Some(*remaining_secs),
            Event::TimeUp { .. } => Some(0),
        }
    }
}
