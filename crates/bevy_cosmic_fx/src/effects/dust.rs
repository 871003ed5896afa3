use bevy::prelude::*;

use crate::data::{ColorSource, Fate, ParticleKind, ScalarRange};
use crate::particle::Particle;

const VIOLET: [u8; 3] = [0x8b, 0x5c, 0xf6];
const PINK: [u8; 3] = [0xec, 0x48, 0x99];

/// Ambient dust population.
#[derive(Clone, Debug, PartialEq)]
pub struct DustRule {
    pub count: u32,
    pub max_life: ScalarRange,
    /// Starting age, so the population does not pulse in sync.
    pub initial_life: ScalarRange,
}

impl Default for DustRule {
    fn default() -> Self {
        Self {
            count: 100,
            max_life: ScalarRange::Random(500.0, 1500.0),
            initial_life: ScalarRange::Random(0.0, 1000.0),
        }
    }
}

pub fn spawn(rule: &DustRule, size: Vec2) -> impl Iterator<Item = Particle> + '_ {
    let palette = ColorSource::Pick(vec![VIOLET, PINK]);
    (0..rule.count as usize).map(move |i| {
        let base_opacity = fastrand::f32() * 0.3 + 0.1;
        Particle {
            velocity: Vec2::new(
                (fastrand::f32() - 0.5) * 0.2,
                (fastrand::f32() - 0.5) * 0.2,
            ),
            size: fastrand::f32() * 1.5 + 0.5,
            color: palette.sample(i),
            base_opacity,
            opacity: base_opacity,
            life: rule.initial_life.sample(),
            max_life: rule.max_life.sample(),
            fate: Fate::Recycle,
            wraps: true,
            ..Particle::new(
                ParticleKind::Dust,
                Vec2::new(fastrand::f32() * size.x, fastrand::f32() * size.y),
            )
        }
    })
}
