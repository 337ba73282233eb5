use std::time::Duration;

use clap::Subcommand;
use sleuth_core::{format_clock, Config, Event, TimerDriver, ValidationError};
use tokio::sync::broadcast::error::RecvError;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a live countdown until time is up
    Run {
        /// Countdown length in seconds (defaults to episode.time_limit_secs)
        #[arg(long)]
        seconds: Option<u64>,
        /// Milliseconds per countdown second (defaults to timer.tick_millis)
        #[arg(long)]
        tick_millis: Option<u64>,
        /// Print every event as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print seconds as M:SS
    Format {
        seconds: u64,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run {
            seconds,
            tick_millis,
            json,
        } => {
            let config = Config::load_or_default();
            let seconds = positive_seconds(seconds.unwrap_or(config.episode.time_limit_secs))?;
            let period = tick_millis
                .map(|ms| Duration::from_millis(ms.max(1)))
                .unwrap_or_else(|| config.timer.tick_period());

            let runtime = super::runtime()?;
            runtime.block_on(countdown(TimerDriver::with_period(seconds, period), json))?;
        }
        TimerAction::Format { seconds } => {
            println!("{}", format_clock(seconds));
        }
    }
    Ok(())
}

pub(crate) fn positive_seconds(seconds: u64) -> Result<u64, ValidationError> {
    if seconds == 0 {
        return Err(ValidationError::InvalidValue {
            field: "seconds".into(),
            message: "countdown must be at least one second".into(),
        });
    }
    Ok(seconds)
}

async fn countdown(mut timer: TimerDriver, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut rx = timer.subscribe();
    print_event(&timer.snapshot(), json)?;
    timer.start();

    loop {
        match rx.recv().await {
            Ok(event) => {
                print_event(&event, json)?;
                if event.is_time_up() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "dropped timer events");
                // The time-up itself may have been among them.
                if let Some(time_up) = timer.time_up() {
                    print_event(&time_up, json)?;
                    break;
                }
            }
            Err(RecvError::Closed) => break,
        }
    }
    Ok(())
}

fn print_event(event: &Event, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(event)?);
        return Ok(());
    }
    match event {
        Event::StateSnapshot { formatted, .. } | Event::TimerTicked { formatted, .. } => {
            println!("{formatted}");
        }
        Event::TimeUp { .. } => println!("time up"),
        _ => {}
    }
    Ok(())
}
