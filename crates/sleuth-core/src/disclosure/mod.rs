//! Trust-gated disclosure: how much of the partner's answer the player gets
//! to see, and how it is framed.

mod policy;
mod response;
mod tier;

pub use policy::{PalettePolicy, RenderPolicy, TierPalette, TierStyle};
pub use response::{DisplayOptions, DisplayedResponse, ResponseRecord, DEFAULT_CAVEAT};
pub use tier::{
    hidden_aspect_opacity, presentation_tier, should_show_low_trust_caveat, PresentationTier,
    TrustScore, CAVEAT_THRESHOLD, MAX_TRUST, MIN_TRUST,
};
