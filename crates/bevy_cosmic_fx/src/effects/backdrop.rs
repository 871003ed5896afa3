use bevy::prelude::*;

use crate::data::{Fate, ParticleKind};
use crate::particle::Particle;

/// Drifting stars, rings and dots behind the detailed timeline.
pub fn spawn(count: u32, size: Vec2) -> impl Iterator<Item = Particle> {
    (0..count).map(move |_| {
        let kind = if fastrand::f32() > 0.7 {
            ParticleKind::DecorativeStar
        } else if fastrand::bool() {
            ParticleKind::Ring
        } else {
            ParticleKind::Dot
        };
        let color = if fastrand::bool() {
            Color::srgb_u8(0x8b, 0x5c, 0xf6)
        } else {
            Color::srgb_u8(0xec, 0x48, 0x99)
        };
        let base_opacity = fastrand::f32() * 0.6 + 0.2;
        Particle {
            velocity: Vec2::new(
                (fastrand::f32() - 0.5) * 0.5,
                (fastrand::f32() - 0.5) * 0.5,
            ),
            size: fastrand::f32() * 3.0 + 1.0,
            color,
            base_opacity,
            opacity: base_opacity,
            fate: Fate::Immortal,
            wraps: true,
            ..Particle::new(
                kind,
                Vec2::new(fastrand::f32() * size.x, fastrand::f32() * size.y),
            )
        }
    })
}
