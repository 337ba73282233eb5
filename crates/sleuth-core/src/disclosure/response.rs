use serde::{Deserialize, Serialize};

use super::policy::{RenderPolicy, TierStyle};
use super::tier::{PresentationTier, TrustScore};

pub const DEFAULT_CAVEAT: &str =
    "(Partner's confidence is low. Cross-check this against the evidence.)";

/// One answer from the partner, as shown to the player. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub question: String,
    pub response: String,
    pub trust_level_at_display: TrustScore,
    /// Deliberate misdirection by game design, independent of trust.
    #[serde(default)]
    pub is_shady: bool,
    /// Internal annotation, only surfaced in development builds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic_note: Option<String>,
}

/// Host-side switches for [`ResponseRecord::display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub caveat_message: String,
    pub show_diagnostics: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            caveat_message: DEFAULT_CAVEAT.into(),
            show_diagnostics: false,
        }
    }
}

/// Everything a renderer needs for one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayedResponse {
    pub question: String,
    pub text: String,
    pub tier: PresentationTier,
    pub style: TierStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caveat: Option<String>,
    pub hidden_aspect_opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_note: Option<String>,
}

impl DisplayedResponse {
    /// Answer text with the caveat appended when present.
    pub fn full_text(&self) -> String {
        match &self.caveat {
            Some(caveat) => format!("{} {}", self.text, caveat),
            None => self.text.clone(),
        }
    }
}

impl ResponseRecord {
    pub fn new(
        question: impl Into<String>,
        response: impl Into<String>,
        trust: TrustScore,
    ) -> Self {
        Self {
            question: question.into(),
            response: response.into(),
            trust_level_at_display: trust,
            is_shady: false,
            diagnostic_note: None,
        }
    }

    pub fn shady(mut self, note: Option<String>) -> Self {
        self.is_shady = true;
        self.diagnostic_note = note;
        self
    }

    pub fn tier(&self) -> PresentationTier {
        self.trust_level_at_display.tier(self.is_shady)
    }

    pub fn display(&self, policy: &dyn RenderPolicy, options: &DisplayOptions) -> DisplayedResponse {
        let trust = self.trust_level_at_display;
        let tier = self.tier();
        DisplayedResponse {
            question: self.question.clone(),
            text: self.response.clone(),
            tier,
            style: policy.style(tier),
            caveat: trust
                .shows_caveat()
                .then(|| options.caveat_message.clone()),
            hidden_aspect_opacity: trust.hidden_aspect_opacity(),
            diagnostic_note: if options.show_diagnostics {
                self.diagnostic_note.clone()
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disclosure::policy::PalettePolicy;

    fn record(trust: i64) -> ResponseRecord {
        ResponseRecord::new(
            "Where was the butler at midnight?",
            "In the pantry, polishing silver.",
            TrustScore::new(trust),
        )
    }

    #[test]
    fn high_trust_has_no_caveat() {
        let shown = record(85).display(&PalettePolicy::default(), &DisplayOptions::default());
        assert_eq!(shown.tier, PresentationTier::Strong);
        assert!(shown.caveat.is_none());
        assert_eq!(shown.full_text(), "In the pantry, polishing silver.");
        assert!((shown.hidden_aspect_opacity - 0.15).abs() < 1e-9);
    }

    #[test]
    fn low_trust_appends_caveat() {
        let options = DisplayOptions {
            caveat_message: "(unsure)".into(),
            ..DisplayOptions::default()
        };
        let shown = record(30).display(&PalettePolicy::default(), &options);
        assert_eq!(shown.tier, PresentationTier::Weak);
        assert_eq!(shown.full_text(), "In the pantry, polishing silver. (unsure)");
    }

    #[test]
    fn shady_response_uses_alert_regardless_of_trust() {
        let shown = record(95)
            .shady(Some("contradicts the clock evidence".into()))
            .display(&PalettePolicy::default(), &DisplayOptions::default());
        assert_eq!(shown.tier, PresentationTier::Alert);
        assert_eq!(shown.style.label, "Alert");
        assert!(shown.diagnostic_note.is_none());
    }

    #[test]
    fn diagnostics_only_when_enabled() {
        let options = DisplayOptions {
            show_diagnostics: true,
            ..DisplayOptions::default()
        };
        let shown = record(50)
            .shady(Some("misdirection".into()))
            .display(&PalettePolicy::default(), &options);
        assert_eq!(shown.diagnostic_note.as_deref(), Some("misdirection"));
    }
}
