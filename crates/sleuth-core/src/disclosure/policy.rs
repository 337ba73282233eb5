//! Rendering policies: how a [`PresentationTier`] looks.
//!
//! Tier selection never consults a policy, so hosts can swap styling
//! (terminal, web, plain text) without touching the decision logic.

use serde::{Deserialize, Serialize};

use super::tier::PresentationTier;

/// Visual framing for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStyle {
    pub label: String,
    /// Hex colour, e.g. `#22c55e`.
    pub accent_color: String,
    pub marker: String,
}

/// Maps tiers to styles.
pub trait RenderPolicy {
    fn style(&self, tier: PresentationTier) -> TierStyle;
}

/// Accent colour per tier, as stored in `[disclosure.palette]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPalette {
    #[serde(default = "default_strong")]
    pub strong: String,
    #[serde(default = "default_good")]
    pub good: String,
    #[serde(default = "default_normal")]
    pub normal: String,
    #[serde(default = "default_weak")]
    pub weak: String,
    #[serde(default = "default_distrust")]
    pub distrust: String,
    #[serde(default = "default_alert")]
    pub alert: String,
}

fn default_strong() -> String {
    "#22c55e".into()
}
fn default_good() -> String {
    "#3b82f6".into()
}
fn default_normal() -> String {
    "#9ca3af".into()
}
fn default_weak() -> String {
    "#f59e0b".into()
}
fn default_distrust() -> String {
    "#ef4444".into()
}
fn default_alert() -> String {
    "#a855f7".into()
}

impl Default for TierPalette {
    fn default() -> Self {
        Self {
            strong: default_strong(),
            good: default_good(),
            normal: default_normal(),
            weak: default_weak(),
            distrust: default_distrust(),
            alert: default_alert(),
        }
    }
}

impl TierPalette {
    pub fn color(&self, tier: PresentationTier) -> &str {
        match tier {
            PresentationTier::Strong => &self.strong,
            PresentationTier::Good => &self.good,
            PresentationTier::Normal => &self.normal,
            PresentationTier::Weak => &self.weak,
            PresentationTier::Distrust => &self.distrust,
            PresentationTier::Alert => &self.alert,
        }
    }
}

/// Default policy: fixed labels and markers, colours from a palette.
#[derive(Debug, Clone, Default)]
pub struct PalettePolicy {
    palette: TierPalette,
}

impl PalettePolicy {
    pub fn new(palette: TierPalette) -> Self {
        Self { palette }
    }
}

impl RenderPolicy for PalettePolicy {
    fn style(&self, tier: PresentationTier) -> TierStyle {
        let (label, marker) = match tier {
            PresentationTier::Strong => ("Strong trust", "++"),
            PresentationTier::Good => ("Good trust", "+"),
            PresentationTier::Normal => ("Neutral", "~"),
            PresentationTier::Weak => ("Weak trust", "-"),
            PresentationTier::Distrust => ("Distrust", "--"),
            PresentationTier::Alert => ("Alert", "!!"),
        };
        TierStyle {
            label: label.into(),
            accent_color: self.palette.color(tier).into(),
            marker: marker.into(),
        }
    }
}
