//! Countdown timer engine.
//!
//! The engine is a pure state machine. It does not own a clock or a thread:
//! each call to `tick()` stands for one elapsed second. [`TimerDriver`] wraps
//! it with a tokio interval for real-time use.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused <-> Running) -> Expired
//!   ^                                          |
//!   +------------------ reset -----------------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = CountdownTimer::new(125);
//! timer.start();
//! // Once per second:
//! if let Some(Event::TimeUp { .. }) = timer.tick() { /* ... */ }
//! ```
//!
//! [`TimerDriver`]: super::TimerDriver

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::{Event, ExpiryCause};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Countdown reached zero and time-up fired for this cycle.
    /// Only `reset` leaves this state.
    Expired,
}

/// Core countdown state machine.
///
/// Every command returns the event it produced, or `None` when the call
/// had no effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    initial_secs: u64,
    remaining_secs: u64,
    state: TimerState,
}

impl CountdownTimer {
    /// Create a stopped, unpaused timer set to `initial_secs`.
    pub fn new(initial_secs: u64) -> Self {
        Self {
            initial_secs,
            remaining_secs: initial_secs,
            state: TimerState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn initial_secs(&self) -> u64 {
        self.initial_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// True while the countdown is active, paused or not.
    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    /// Whether time-up already fired in the current cycle.
    pub fn has_expired(&self) -> bool {
        self.state == TimerState::Expired
    }

    /// `M:SS` rendering of the remaining time.
    pub fn formatted(&self) -> String {
        format_clock(self.remaining_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            is_running: self.is_running(),
            is_paused: self.is_paused(),
            remaining_secs: self.remaining_secs,
            initial_secs: self.initial_secs,
            formatted: self.formatted(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                tracing::debug!(remaining_secs = self.remaining_secs, "timer started");
                Some(Event::TimerStarted {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            TimerState::Running => None,
            TimerState::Expired => None, // Needs a reset first.
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                tracing::debug!(remaining_secs = self.remaining_secs, "timer paused");
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Paused => {
                self.state = TimerState::Running;
                tracing::debug!(remaining_secs = self.remaining_secs, "timer resumed");
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Return to `Idle` at the initial value and re-arm time-up.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.remaining_secs = self.initial_secs;
        tracing::debug!(remaining_secs = self.remaining_secs, "timer reset");
        Some(Event::TimerReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Add (or, if negative, subtract) seconds regardless of state.
    ///
    /// There is no upper clamp. A negative delta that reaches zero expires
    /// the timer immediately, even if it was never started.
    pub fn add_time(&mut self, delta_secs: i64) -> Option<Event> {
        self.remaining_secs = if delta_secs >= 0 {
            self.remaining_secs.saturating_add(delta_secs.unsigned_abs())
        } else {
            self.remaining_secs.saturating_sub(delta_secs.unsigned_abs())
        };

        if delta_secs < 0 && self.remaining_secs == 0 && self.state != TimerState::Expired {
            return Some(self.expire(ExpiryCause::Adjustment));
        }

        tracing::debug!(delta_secs, remaining_secs = self.remaining_secs, "time adjusted");
        Some(Event::TimeAdjusted {
            delta_secs,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Advance by one second. Returns `TimeUp` on the tick that reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return Some(self.expire(ExpiryCause::Countdown));
        }
        Some(Event::TimerTicked {
            remaining_secs: self.remaining_secs,
            formatted: self.formatted(),
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expire(&mut self, cause: ExpiryCause) -> Event {
        self.state = TimerState::Expired;
        self.remaining_secs = 0;
        tracing::info!(?cause, "time up");
        Event::TimeUp {
            cause,
            at: Utc::now(),
        }
    }
}

/// Render seconds as `M:SS` (minutes unpadded, seconds two digits).
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
