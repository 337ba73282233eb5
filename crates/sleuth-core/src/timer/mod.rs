mod driver;
mod engine;

pub use driver::{TimeUps, TimerDriver, DEFAULT_TICK_PERIOD};
pub use engine::{format_clock, CountdownTimer, TimerState};
