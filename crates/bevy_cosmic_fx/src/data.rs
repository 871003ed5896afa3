//! Serializable spawn descriptions.
//!
//! Every type here round-trips through serde + RON so phase tables can be
//! authored outside the binary. The engine turns these into live
//! [`Particle`](crate::particle::Particle)s at spawn time.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scalar value types
// ---------------------------------------------------------------------------

/// A scalar value that can be constant or a random range.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum ScalarRange {
    Constant(f32),
    Random(f32, f32),
}

impl Default for ScalarRange {
    fn default() -> Self {
        Self::Constant(1.0)
    }
}

impl ScalarRange {
    /// Sample a value from this range.
    pub fn sample(&self) -> f32 {
        match self {
            Self::Constant(v) => *v,
            Self::Random(a, b) => a + (b - a) * fastrand::f32(),
        }
    }
}

// ---------------------------------------------------------------------------
// Colour
// ---------------------------------------------------------------------------

/// How a spawned particle picks its colour.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum ColorSource {
    /// HSL with a random hue in degrees. Saturation and lightness are 0..1.
    Hsl {
        hue: ScalarRange,
        saturation: f32,
        lightness: ScalarRange,
    },
    /// Fixed sRGB colour.
    Rgb([u8; 3]),
    /// The i-th particle of a burst takes entry `i % len`.
    Cycle(Vec<[u8; 3]>),
    /// Uniform random pick per particle.
    Pick(Vec<[u8; 3]>),
}

impl Default for ColorSource {
    fn default() -> Self {
        Self::Rgb([255, 255, 255])
    }
}

impl ColorSource {
    /// Sample a colour for the `index`-th particle of a burst.
    pub fn sample(&self, index: usize) -> Color {
        match self {
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => Color::hsl(hue.sample().rem_euclid(360.0), *saturation, lightness.sample()),
            Self::Rgb([r, g, b]) => Color::srgb_u8(*r, *g, *b),
            Self::Cycle(palette) if !palette.is_empty() => {
                let [r, g, b] = palette[index % palette.len()];
                Color::srgb_u8(r, g, b)
            }
            Self::Pick(palette) if !palette.is_empty() => {
                let [r, g, b] = palette[fastrand::usize(..palette.len())];
                Color::srgb_u8(r, g, b)
            }
            _ => Color::WHITE,
        }
    }
}

// ---------------------------------------------------------------------------
// Particle kinds & fates
// ---------------------------------------------------------------------------

/// Closed set of particle kinds. The kind selects the draw rule and any
/// kind-specific force.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Explosion,
    Inflation,
    Matter,
    Star,
    Galaxy,
    Planet,
    Sun,
    Earth,
    Atmosphere,
    #[default]
    Dust,
    Mote,
    Asteroid,
    DecorativeStar,
    Ring,
    Dot,
}

impl ParticleKind {
    /// Pulled toward the surface centre every tick.
    pub fn gravitates(&self) -> bool {
        matches!(self, Self::Matter | Self::Galaxy)
    }

    /// Position is re-projected onto its orbit every tick.
    pub fn orbits(&self) -> bool {
        matches!(self, Self::Planet | Self::Asteroid)
    }

    /// Drawn with a radial glow under the disk.
    pub fn glows(&self) -> bool {
        matches!(self, Self::Star | Self::Sun)
    }
}

/// What happens to a particle when its life runs out.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fate {
    /// Removed once `life >= max_life`. Opacity is `1 - life / max_life`.
    #[default]
    Expire,
    /// Reset to `life = 0` at a fresh random position. Opacity is
    /// `base_opacity * (1 - life / max_life)`.
    Recycle,
    /// No life accounting. Opacity stays at `base_opacity`.
    Immortal,
}

// ---------------------------------------------------------------------------
// Burst description
// ---------------------------------------------------------------------------

/// Where the particles of a burst start.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum Origin {
    /// Surface centre.
    Center,
    /// Uniform over the whole surface.
    Anywhere,
    /// Random angle around the centre at a sampled radius.
    Ring { radius: ScalarRange },
    /// Particle `i` of `n` sits at angle `i / n * TAU`, radius `base + step * i`.
    Spokes { base: f32, step: f32 },
}

/// Initial velocity of a burst particle.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum VelocityRule {
    Still,
    /// Random direction with a sampled speed.
    Scatter { speed: ScalarRange },
    /// Each axis is `(rand - 0.5) * spread`.
    Jitter { spread: f32 },
    /// Perpendicular to the spawn angle. Particle `i` moves at `speed - falloff * i`.
    Tangential { speed: f32, falloff: f32 },
    /// Along the spawn angle, away from the centre.
    Outward { speed: f32 },
}

/// Sampled start state for a single particle.
pub struct Placement {
    pub position: Vec2,
    pub angle: f32,
}

impl Origin {
    /// Place the `index`-th of `count` particles on a surface of `size`.
    pub fn place(&self, index: usize, count: usize, size: Vec2) -> Placement {
        let center = size * 0.5;
        match self {
            Self::Center => Placement {
                position: center,
                angle: fastrand::f32() * TAU,
            },
            Self::Anywhere => Placement {
                position: Vec2::new(fastrand::f32() * size.x, fastrand::f32() * size.y),
                angle: fastrand::f32() * TAU,
            },
            Self::Ring { radius } => {
                let angle = fastrand::f32() * TAU;
                Placement {
                    position: center + Vec2::from_angle(angle) * radius.sample(),
                    angle,
                }
            }
            Self::Spokes { base, step } => {
                let angle = index as f32 / count.max(1) as f32 * TAU;
                Placement {
                    position: center + Vec2::from_angle(angle) * (base + step * index as f32),
                    angle,
                }
            }
        }
    }
}

impl VelocityRule {
    pub fn sample(&self, index: usize, angle: f32) -> Vec2 {
        match self {
            Self::Still => Vec2::ZERO,
            Self::Scatter { speed } => Vec2::from_angle(fastrand::f32() * TAU) * speed.sample(),
            Self::Jitter { spread } => Vec2::new(
                (fastrand::f32() - 0.5) * spread,
                (fastrand::f32() - 0.5) * spread,
            ),
            Self::Tangential { speed, falloff } => {
                Vec2::from_angle(angle + FRAC_PI_2) * (speed - falloff * index as f32)
            }
            Self::Outward { speed } => Vec2::from_angle(angle) * *speed,
        }
    }
}

/// A one-shot spawn of `count` expiring particles.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Burst {
    pub count: u32,
    pub kind: ParticleKind,
    pub origin: Origin,
    pub velocity: VelocityRule,
    /// Radius in pixels.
    pub size: ScalarRange,
    pub color: ColorSource,
    pub opacity: f32,
    /// Life units, advanced by `life_step` every tick.
    pub max_life: f32,
}

impl Default for Burst {
    fn default() -> Self {
        Self {
            count: 50,
            kind: ParticleKind::Explosion,
            origin: Origin::Center,
            velocity: VelocityRule::Scatter {
                speed: ScalarRange::Random(1.0, 4.0),
            },
            size: ScalarRange::Random(1.0, 3.0),
            color: ColorSource::default(),
            opacity: 1.0,
            max_life: 1000.0,
        }
    }
}
