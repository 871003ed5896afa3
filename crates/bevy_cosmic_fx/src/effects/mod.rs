//! Built-in effects: which population each one spawns and how it is drawn.

pub mod backdrop;
pub mod burst;
pub mod comets;
pub mod dust;
pub mod orrery;

pub use dust::DustRule;

use bevy::prelude::*;

use crate::engine::{ClearMode, EngineRules, SpawnRule, Tuning};

/// The effects the portfolio mounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Slow violet and pink dust that fades and recycles.
    SpaceDust,
    /// Comets with fading tails over floating motes.
    CometField,
    /// Stars, rings and dots drifting behind the timeline.
    TimelineBackdrop,
    /// Sun, planets and asteroid belt turning in the background.
    Orrery,
    /// The phase-sequenced cut-scene.
    CosmicJourney,
}

impl EffectKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SpaceDust => "Space Dust",
            Self::CometField => "Comet Field",
            Self::TimelineBackdrop => "Timeline Backdrop",
            Self::Orrery => "Orrery",
            Self::CosmicJourney => "Cosmic Journey",
        }
    }

    /// Laid out around the surface centre, so a resize moves the whole
    /// population with it.
    pub fn is_centered(&self) -> bool {
        matches!(self, Self::Orrery)
    }

    pub fn rules(&self, tuning: &Tuning) -> EngineRules {
        match self {
            Self::CosmicJourney => EngineRules {
                clear: ClearMode::Fade {
                    color: Color::BLACK,
                    alpha: tuning.fade_alpha,
                },
                life_step: tuning.life_step,
                forces: tuning.forces,
                trail_len: tuning.trail_len,
            },
            _ => EngineRules {
                clear: ClearMode::Clear,
                life_step: 1.0,
                forces: tuning.forces,
                trail_len: tuning.trail_len,
            },
        }
    }

    /// The population an ambient effect starts with. The journey spawns per
    /// phase instead.
    pub fn seed(&self, tuning: &Tuning) -> Option<SpawnRule> {
        match self {
            Self::SpaceDust => Some(SpawnRule::AmbientDust(DustRule {
                count: tuning.dust_count,
                ..default()
            })),
            Self::CometField => Some(SpawnRule::CometField {
                comets: tuning.comet_count,
                motes: tuning.mote_count,
            }),
            Self::TimelineBackdrop => Some(SpawnRule::TimelineBackdrop {
                count: tuning.backdrop_count,
            }),
            Self::Orrery => Some(SpawnRule::Orrery {
                asteroids: tuning.asteroid_count,
            }),
            Self::CosmicJourney => None,
        }
    }
}
