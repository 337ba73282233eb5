//! Trust score and presentation tiers.
//!
//! Everything here is a pure, total function of the trust value. Inputs
//! outside `[0, 100]` are clamped rather than rejected so a host can always
//! render something.

use serde::{Deserialize, Serialize};

pub const MIN_TRUST: u8 = 0;
pub const MAX_TRUST: u8 = 100;

/// Below this, the host appends the low-trust caveat.
pub const CAVEAT_THRESHOLD: u8 = 40;

/// How much the player currently trusts the partner's answers, in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", from = "i64")]
pub struct TrustScore(u8);

impl TrustScore {
    /// Clamp any integer into range.
    pub fn new(value: i64) -> Self {
        Self(value.clamp(i64::from(MIN_TRUST), i64::from(MAX_TRUST)) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Shift by `delta`, saturating at the bounds.
    pub fn adjusted(self, delta: i64) -> Self {
        Self::new(i64::from(self.0).saturating_add(delta))
    }

    pub fn tier(self, is_shady: bool) -> PresentationTier {
        if is_shady {
            return PresentationTier::Alert;
        }
        match self.0 {
            80..=u8::MAX => PresentationTier::Strong,
            60..=79 => PresentationTier::Good,
            40..=59 => PresentationTier::Normal,
            20..=39 => PresentationTier::Weak,
            _ => PresentationTier::Distrust,
        }
    }

    pub fn shows_caveat(self) -> bool {
        self.0 < CAVEAT_THRESHOLD
    }

    /// Opacity of the hidden-aspect overlay. Lower trust shows more of it.
    pub fn hidden_aspect_opacity(self) -> f64 {
        let raw = f64::from(MAX_TRUST - self.0) / f64::from(MAX_TRUST);
        raw.clamp(0.0, 1.0)
    }
}

impl Default for TrustScore {
    fn default() -> Self {
        Self(50)
    }
}

impl From<i64> for TrustScore {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<TrustScore> for u8 {
    fn from(score: TrustScore) -> Self {
        score.0
    }
}

/// How an answer is framed. Exactly one variant applies per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationTier {
    Strong,
    Good,
    Normal,
    Weak,
    Distrust,
    /// Shady response; overrides every trust-derived tier.
    Alert,
}

impl PresentationTier {
    pub const ALL: [PresentationTier; 6] = [
        PresentationTier::Strong,
        PresentationTier::Good,
        PresentationTier::Normal,
        PresentationTier::Weak,
        PresentationTier::Distrust,
        PresentationTier::Alert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PresentationTier::Strong => "strong",
            PresentationTier::Good => "good",
            PresentationTier::Normal => "normal",
            PresentationTier::Weak => "weak",
            PresentationTier::Distrust => "distrust",
            PresentationTier::Alert => "alert",
        }
    }
}

impl std::fmt::Display for PresentationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn presentation_tier(trust: i64, is_shady: bool) -> PresentationTier {
    TrustScore::new(trust).tier(is_shady)
}

pub fn should_show_low_trust_caveat(trust: i64) -> bool {
    TrustScore::new(trust).shows_caveat()
}

/// `clamp((100 - trust) / 100, 0, 1)`
pub fn hidden_aspect_opacity(trust: i64) -> f64 {
    TrustScore::new(trust).hidden_aspect_opacity()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(presentation_tier(85, false), PresentationTier::Strong);
        assert_eq!(presentation_tier(80, false), PresentationTier::Strong);
        assert_eq!(presentation_tier(79, false), PresentationTier::Good);
        assert_eq!(presentation_tier(60, false), PresentationTier::Good);
        assert_eq!(presentation_tier(55, false), PresentationTier::Normal);
        assert_eq!(presentation_tier(40, false), PresentationTier::Normal);
        assert_eq!(presentation_tier(39, false), PresentationTier::Weak);
        assert_eq!(presentation_tier(20, false), PresentationTier::Weak);
        assert_eq!(presentation_tier(19, false), PresentationTier::Distrust);
        assert_eq!(presentation_tier(0, false), PresentationTier::Distrust);
    }

    #[test]
    fn shady_overrides_any_trust() {
        assert_eq!(presentation_tier(10, true), PresentationTier::Alert);
        assert_eq!(presentation_tier(100, true), PresentationTier::Alert);
    }

    #[test]
    fn out_of_range_trust_is_clamped() {
        assert_eq!(presentation_tier(250, false), PresentationTier::Strong);
        assert_eq!(presentation_tier(-7, false), PresentationTier::Distrust);
        assert!(should_show_low_trust_caveat(-1));
        assert_eq!(hidden_aspect_opacity(-50), 1.0);
        assert_eq!(hidden_aspect_opacity(400), 0.0);
    }

    #[test]
    fn caveat_boundary() {
        assert!(should_show_low_trust_caveat(39));
        assert!(!should_show_low_trust_caveat(40));
    }

    #[test]
    fn opacity_endpoints() {
        assert_eq!(hidden_aspect_opacity(100), 0.0);
        assert_eq!(hidden_aspect_opacity(0), 1.0);
        assert!((hidden_aspect_opacity(75) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn adjusted_saturates() {
        let score = TrustScore::new(95);
        assert_eq!(score.adjusted(20).value(), 100);
        assert_eq!(score.adjusted(-500).value(), 0);
    }

    #[test]
    fn trust_score_deserializes_with_clamp() {
        let score: TrustScore = serde_json::from_str("140").unwrap();
        assert_eq!(score.value(), 100);
        assert_eq!(serde_json::to_string(&score).unwrap(), "100");
    }
}
