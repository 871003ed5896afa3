use bevy::prelude::*;

use crate::data::{Fate, ParticleKind};
use crate::particle::Particle;

/// Floating motes drawn under the comets. They wrap and never age.
pub fn motes(count: u32, size: Vec2) -> impl Iterator<Item = Particle> {
    (0..count).map(move |_| {
        let base_opacity = fastrand::f32() * 0.5 + 0.2;
        Particle {
            velocity: Vec2::new(
                (fastrand::f32() - 0.5) * 0.5,
                (fastrand::f32() - 0.5) * 0.5,
            ),
            size: fastrand::f32() * 2.0 + 1.0,
            color: Color::hsl(fastrand::f32() * 60.0 + 260.0, 0.6, 0.7),
            base_opacity,
            opacity: base_opacity,
            fate: Fate::Immortal,
            wraps: true,
            ..Particle::new(
                ParticleKind::Mote,
                Vec2::new(fastrand::f32() * size.x, fastrand::f32() * size.y),
            )
        }
    })
}
