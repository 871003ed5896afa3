use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::data::{Fate, ParticleKind};
use crate::particle::Particle;

/// Frames per second the orbital periods are expressed against.
const FRAME_RATE: f32 = 60.0;

pub struct Body {
    pub name: &'static str,
    /// Diameter in pixels.
    pub diameter: f32,
    pub distance: f32,
    /// Seconds per revolution.
    pub period: f32,
    pub color: [u8; 3],
}

pub const PLANETS: [Body; 6] = [
    Body { name: "Mercury", diameter: 8.0, distance: 80.0, period: 4.0, color: [0x9c, 0xa3, 0xaf] },
    Body { name: "Venus", diameter: 12.0, distance: 100.0, period: 7.0, color: [0xfa, 0xcc, 0x15] },
    Body { name: "Earth", diameter: 14.0, distance: 120.0, period: 10.0, color: [0x3b, 0x82, 0xf6] },
    Body { name: "Mars", diameter: 10.0, distance: 140.0, period: 15.0, color: [0xef, 0x44, 0x44] },
    Body { name: "Jupiter", diameter: 28.0, distance: 180.0, period: 25.0, color: [0xfb, 0x92, 0x3c] },
    Body { name: "Saturn", diameter: 24.0, distance: 220.0, period: 30.0, color: [0xca, 0x8a, 0x04] },
];

const SUN_RADIUS: f32 = 32.0;
const ASTEROID: [u8; 3] = [0x9c, 0xa3, 0xaf];
/// Sun and planets are kept faint behind the content.
const SYSTEM_OPACITY: f32 = 0.2;

/// Radians per tick for a body with the given period in seconds.
pub fn angular_step(period: f32) -> f32 {
    TAU / (period * FRAME_RATE)
}

fn body(kind: ParticleKind, position: Vec2, radius: f32, color: Color, opacity: f32, step: f32) -> Particle {
    Particle {
        size: radius,
        color,
        base_opacity: opacity,
        opacity,
        orbit_step: step,
        fate: Fate::Immortal,
        ..Particle::new(kind, position)
    }
}

/// Sun at the centre, the six inner planets, and an asteroid belt.
pub fn spawn(asteroids: u32, size: Vec2) -> Vec<Particle> {
    let center = size * 0.5;
    let mut bodies = Vec::with_capacity(1 + PLANETS.len() + asteroids as usize);

    bodies.push(body(
        ParticleKind::Sun,
        center,
        SUN_RADIUS,
        Color::srgb_u8(0xfa, 0xcc, 0x15),
        SYSTEM_OPACITY,
        0.0,
    ));

    for planet in &PLANETS {
        let [r, g, b] = planet.color;
        bodies.push(body(
            ParticleKind::Planet,
            center + Vec2::X * planet.distance,
            planet.diameter * 0.5,
            Color::srgb_u8(r, g, b),
            SYSTEM_OPACITY,
            angular_step(planet.period),
        ));
    }

    let [r, g, b] = ASTEROID;
    for i in 0..asteroids {
        let angle = i as f32 / asteroids as f32 * TAU;
        let distance = 200.0 + fastrand::f32() * 100.0;
        let speed = fastrand::f32() * 0.5 + 0.2;
        bodies.push(body(
            ParticleKind::Asteroid,
            center + Vec2::from_angle(angle) * distance,
            (fastrand::f32() * 8.0 + 4.0) * 0.5,
            Color::srgb_u8(r, g, b),
            fastrand::f32() * 0.6 + 0.2,
            angular_step(60.0 / speed),
        ));
    }

    bodies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Forces;

    #[test]
    fn orrery_has_sun_planets_and_belt() {
        let bodies = spawn(15, Vec2::new(1200.0, 900.0));
        assert_eq!(bodies.len(), 1 + 6 + 15);
        assert_eq!(bodies[0].kind, ParticleKind::Sun);
        assert!(bodies.iter().all(|b| b.fate == Fate::Immortal));
    }

    #[test]
    fn mercury_completes_an_orbit_in_its_period() {
        let size = Vec2::new(1200.0, 900.0);
        let mut mercury = spawn(0, size).swap_remove(1);
        let start = mercury.position;
        let ticks = (PLANETS[0].period * FRAME_RATE) as usize;
        for i in 0..ticks {
            mercury.integrate(size, &Forces::default(), 1.0);
            if i == ticks / 2 {
                assert!(mercury.position.distance(start) > 100.0);
            }
        }
        assert!(mercury.position.distance(start) < 1.0);
    }
}
