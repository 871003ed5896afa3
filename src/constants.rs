//! Shared constants for the portfolio views

/// Z-order of the full-screen effect layers. Egui always draws on top.
pub mod layers {
    pub const ORRERY: i32 = -2;
    pub const DUST: i32 = 0;
    pub const COMETS: i32 = 1;
    pub const TIMELINE_BACKDROP: i32 = 0;
    pub const JOURNEY: i32 = 50;
}

/// Sizes for the journey overlay
pub mod journey_ui {
    pub const DOT_RADIUS: f32 = 6.0;
    pub const DOT_SPACING: f32 = 22.0;
    pub const BOTTOM_MARGIN: f32 = 48.0;
}
