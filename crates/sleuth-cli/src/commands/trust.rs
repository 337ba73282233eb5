use clap::Subcommand;
use serde::Serialize;
use sleuth_core::{Config, PresentationTier, RenderPolicy, ResponseRecord, TierStyle, TrustScore};

#[derive(Subcommand)]
pub enum TrustAction {
    /// Print tier, caveat flag and hidden-aspect opacity for a trust value
    Show {
        /// Trust score; clamped to 0..=100
        #[arg(allow_negative_numbers = true)]
        value: i64,
        /// Treat the answer as deliberately misleading
        #[arg(long)]
        shady: bool,
    },
    /// Render a partner answer the way the player would see it
    Render {
        #[arg(long, allow_negative_numbers = true)]
        trust: i64,
        #[arg(long)]
        question: String,
        #[arg(long)]
        response: String,
        #[arg(long)]
        shady: bool,
        /// Diagnostic note, shown only with SLEUTH_ENV=dev or disclosure.show_diagnostics
        #[arg(long)]
        note: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct TrustReport {
    trust: TrustScore,
    tier: PresentationTier,
    caveat: bool,
    hidden_aspect_opacity: f64,
    style: TierStyle,
}

pub fn run(action: TrustAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let policy = config.render_policy();

    match action {
        TrustAction::Show { value, shady } => {
            let trust = TrustScore::new(value);
            let tier = trust.tier(shady);
            let report = TrustReport {
                trust,
                tier,
                caveat: trust.shows_caveat(),
                hidden_aspect_opacity: trust.hidden_aspect_opacity(),
                style: policy.style(tier),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        TrustAction::Render {
            trust,
            question,
            response,
            shady,
            note,
            json,
        } => {
            let mut record = ResponseRecord::new(question, response, TrustScore::new(trust));
            if shady {
                record = record.shady(note);
            } else {
                record.diagnostic_note = note;
            }
            let shown = record.display(&policy, &config.display_options());

            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("[{}] {} ({})", shown.style.marker, shown.style.label, shown.style.accent_color);
                println!("Q: {}", shown.question);
                println!("A: {}", shown.full_text());
                println!("hidden aspect: {:.2}", shown.hidden_aspect_opacity);
                if let Some(note) = &shown.diagnostic_note {
                    println!("diagnostic: {note}");
                }
            }
        }
    }
    Ok(())
}
