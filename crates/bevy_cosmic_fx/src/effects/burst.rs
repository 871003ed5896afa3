use bevy::prelude::*;

use crate::data::{Burst, Fate};
use crate::particle::{Forces, Particle};

/// Expand a burst into `count` expiring particles.
pub fn spawn<'a>(burst: &'a Burst, size: Vec2, forces: &'a Forces) -> impl Iterator<Item = Particle> + 'a {
    let count = burst.count as usize;
    (0..count).map(move |i| {
        let placement = burst.origin.place(i, count, size);
        Particle {
            velocity: burst.velocity.sample(i, placement.angle),
            size: burst.size.sample(),
            color: burst.color.sample(i),
            base_opacity: burst.opacity,
            opacity: burst.opacity,
            life: 0.0,
            max_life: burst.max_life,
            orbit_step: if burst.kind.orbits() {
                forces.orbit_step
            } else {
                0.0
            },
            fate: Fate::Expire,
            wraps: false,
            ..Particle::new(burst.kind, placement.position)
        }
    })
}
