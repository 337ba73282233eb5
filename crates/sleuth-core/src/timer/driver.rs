//! Real-time driver for [`CountdownTimer`].
//!
//! Owns one engine and at most one periodic tick task on the tokio runtime.
//! The task only exists while the engine is running; pause, reset, expiry
//! and drop all cancel it. Each cancellation bumps a generation counter
//! under the engine lock, so a tick that already woke up before the abort
//! took effect sees a stale generation and is discarded.
//!
//! Events fan out through a broadcast channel; any number of observers may
//! subscribe. The broadcast buffer is bounded, so time-ups are additionally
//! recorded in a `watch` channel that never drops: an observer that lagged
//! behind still sees how many expiries happened and the latest one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::engine::{CountdownTimer, TimerState};
use crate::events::{Event, ExpiryCause};

/// One countdown second.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

const EVENT_CAPACITY: usize = 64;

/// Running tally of time-ups, published on every expiry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeUps {
    /// Expiries since the driver was created. Survives `reset`.
    pub count: u64,
    /// The most recent `TimeUp` event.
    pub last: Option<Event>,
}

impl TimeUps {
    pub fn last_cause(&self) -> Option<ExpiryCause> {
        match self.last {
            Some(Event::TimeUp { cause, .. }) => Some(cause),
            _ => None,
        }
    }
}

struct Shared {
    timer: CountdownTimer,
    generation: u64,
    time_ups: watch::Sender<TimeUps>,
}

impl Shared {
    /// Forward `event` to observers. Time-ups also land in the watch tally.
    fn publish(&self, events: &broadcast::Sender<Event>, event: &Event) {
        if event.is_time_up() {
            self.time_ups.send_modify(|tally| {
                tally.count += 1;
                tally.last = Some(event.clone());
            });
        }
        // No receivers is fine.
        let _ = events.send(event.clone());
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives a [`CountdownTimer`] from a tokio interval.
///
/// Commands that may spawn the tick task (`start`, `resume`, `on_time_up`)
/// must be called from within a tokio runtime.
pub struct TimerDriver {
    shared: Arc<Mutex<Shared>>,
    events: broadcast::Sender<Event>,
    ticker: Option<JoinHandle<()>>,
    observers: Vec<JoinHandle<()>>,
    period: Duration,
}

impl TimerDriver {
    pub fn new(initial_secs: u64) -> Self {
        Self::with_period(initial_secs, DEFAULT_TICK_PERIOD)
    }

    /// Same as [`TimerDriver::new`] with a custom wall-clock length per countdown second.
    pub fn with_period(initial_secs: u64, period: Duration) -> Self {
        let (events, _rx) = broadcast::channel(EVENT_CAPACITY);
        let (time_ups, _rx) = watch::channel(TimeUps::default());
        Self {
            shared: Arc::new(Mutex::new(Shared {
                timer: CountdownTimer::new(initial_secs),
                generation: 0,
                time_ups,
            })),
            events,
            ticker: None,
            observers: Vec::new(),
            period,
        }
    }

    /// Receive every event emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Watch the time-up tally. Unlike [`TimerDriver::subscribe`], this never
    /// loses an expiry to a full buffer.
    pub fn watch_time_ups(&self) -> watch::Receiver<TimeUps> {
        lock(&self.shared).time_ups.subscribe()
    }

    /// Invoke `callback` once per time-up until the driver is dropped.
    ///
    /// If several expiries land before the observer wakes, the callback runs
    /// once for each, all with the latest cause.
    pub fn on_time_up<F>(&mut self, mut callback: F)
    where
        F: FnMut(ExpiryCause) + Send + 'static,
    {
        let mut rx = self.watch_time_ups();
        let mut seen = rx.borrow_and_update().count;
        self.observers.push(tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let (count, cause) = {
                    let tally = rx.borrow_and_update();
                    (tally.count, tally.last_cause())
                };
                let Some(cause) = cause else { continue };
                for _ in seen..count {
                    callback(cause);
                }
                seen = count;
            }
        }));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        lock(&self.shared).timer.state()
    }

    pub fn remaining_secs(&self) -> u64 {
        lock(&self.shared).timer.remaining_secs()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.shared).timer.is_running()
    }

    pub fn is_paused(&self) -> bool {
        lock(&self.shared).timer.is_paused()
    }

    pub fn formatted(&self) -> String {
        lock(&self.shared).timer.formatted()
    }

    pub fn snapshot(&self) -> Event {
        lock(&self.shared).timer.snapshot()
    }

    /// The `TimeUp` event of the current cycle, if the clock has expired.
    pub fn time_up(&self) -> Option<Event> {
        let shared = lock(&self.shared);
        if shared.timer.state() != TimerState::Expired {
            return None;
        }
        let last = shared.time_ups.borrow().last.clone();
        last
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.apply(CountdownTimer::start);
        self.ensure_ticker();
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.apply(CountdownTimer::pause);
        if event.is_some() {
            self.cancel_ticker();
        }
        event
    }

    pub fn resume(&mut self) -> Option<Event> {
        let event = self.apply(CountdownTimer::resume);
        self.ensure_ticker();
        event
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.cancel_ticker();
        self.apply(CountdownTimer::reset)
    }

    pub fn add_time(&mut self, delta_secs: i64) -> Option<Event> {
        let event = self.apply(|timer| timer.add_time(delta_secs));
        if event.as_ref().is_some_and(Event::is_time_up) {
            self.cancel_ticker();
        }
        event
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn apply<F>(&self, command: F) -> Option<Event>
    where
        F: FnOnce(&mut CountdownTimer) -> Option<Event>,
    {
        let mut shared = lock(&self.shared);
        let event = command(&mut shared.timer)?;
        shared.publish(&self.events, &event);
        Some(event)
    }

    fn ensure_ticker(&mut self) {
        let generation = {
            let shared = lock(&self.shared);
            if shared.timer.state() != TimerState::Running {
                return;
            }
            shared.generation
        };
        if self.ticker.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }

        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let period = self.period;
        tracing::debug!(generation, ?period, "spawning tick task");
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let mut guard = lock(&shared);
                if guard.generation != generation {
                    break;
                }
                let Some(event) = guard.timer.tick() else {
                    break;
                };
                let expired = event.is_time_up();
                if expired {
                    guard.generation += 1;
                }
                guard.publish(&events, &event);
                if expired {
                    break;
                }
            }
        }));
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            tracing::debug!("tick task cancelled");
        }
        lock(&self.shared).generation += 1;
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        for observer in self.observers.drain(..) {
            observer.abort();
        }
    }
}
