use clap::Args;
use serde::Serialize;
use sleuth_core::{Config, Event, GameProgress, TimeUpOutcome, TrustScore};
use tokio::sync::broadcast::error::RecvError;

use super::timer::positive_seconds;

#[derive(Args)]
pub struct PlayArgs {
    /// Episode length in seconds (defaults to episode.time_limit_secs)
    #[arg(long)]
    seconds: Option<u64>,
    /// Starting trust (defaults to episode.initial_trust)
    #[arg(long, allow_negative_numbers = true)]
    trust: Option<i64>,
    /// Milliseconds per countdown second (defaults to timer.tick_millis)
    #[arg(long)]
    tick_millis: Option<u64>,
    /// Wrong accusations made before the clock starts
    #[arg(long, default_value = "0")]
    wrong_answers: u32,
}

#[derive(Serialize)]
struct EpisodeReport {
    outcome: TimeUpOutcome,
    progress: GameProgress,
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    if let Some(seconds) = args.seconds {
        config.episode.time_limit_secs = positive_seconds(seconds)?;
    }
    if let Some(trust) = args.trust {
        config.episode.initial_trust = TrustScore::new(trust);
    }
    if let Some(ms) = args.tick_millis {
        config.timer.tick_millis = ms;
    }

    let runtime = super::runtime()?;
    let report = runtime.block_on(play_episode(&config, args.wrong_answers))?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn play_episode(
    config: &Config,
    wrong_answers: u32,
) -> Result<EpisodeReport, Box<dyn std::error::Error>> {
    let mut progress = GameProgress::new(&config.episode);
    let mut timer = GameProgress::episode_timer(config);
    let mut rx = timer.subscribe();
    let mut time_ups = timer.watch_time_ups();

    for _ in 0..wrong_answers {
        progress.penalize(&mut timer, &config.timer);
    }
    // A no-op when the penalties already used up the clock.
    timer.start();

    let cause = loop {
        tokio::select! {
            biased;
            tally = time_ups.wait_for(|tally| tally.count > 0) => {
                let cause = tally?.last_cause();
                break cause.ok_or("time-up recorded without a cause")?;
            }
            event = rx.recv() => match event {
                Ok(Event::TimerTicked { formatted, .. }) => eprintln!("{formatted}"),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "dropped timer events");
                }
                Err(RecvError::Closed) => return Err("timer stopped without expiring".into()),
            },
        }
    };

    let outcome = progress.apply_time_up(cause, &config.timer);
    Ok(EpisodeReport { outcome, progress })
}
