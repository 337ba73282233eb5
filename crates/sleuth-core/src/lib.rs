//! # Sleuth Core Library
//!
//! Game-logic core for a detective puzzle client. Hosts (the CLI, or any UI)
//! own the player's progress and drive two small components from it.
//!
//! ## Architecture
//!
//! - **Timer**: a pure countdown state machine plus a tokio-backed driver that
//!   ticks it once per second and broadcasts events to observers
//! - **Disclosure**: pure functions of the trust score that pick a presentation
//!   tier, decide the low-trust caveat, and set the hidden-aspect opacity
//! - **Progress**: an explicitly passed state object holding trust and
//!   time-up bookkeeping
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`CountdownTimer`]: Core timer state machine
//! - [`TimerDriver`]: Real-time tick driver with cancellation
//! - [`ResponseRecord`]: A partner answer and how it is displayed
//! - [`GameProgress`]: Host-owned player state
//! - [`Config`]: Application configuration management

pub mod disclosure;
pub mod error;
pub mod events;
pub mod progress;
pub mod storage;
pub mod timer;

pub use disclosure::{
    hidden_aspect_opacity, presentation_tier, should_show_low_trust_caveat, DisplayOptions,
    DisplayedResponse, PalettePolicy, PresentationTier, RenderPolicy, ResponseRecord, TierStyle,
    TrustScore,
};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::{Event, ExpiryCause};
pub use progress::{GameProgress, TimeUpOutcome};
pub use storage::Config;
pub use timer::{format_clock, CountdownTimer, TimeUps, TimerDriver, TimerState};
