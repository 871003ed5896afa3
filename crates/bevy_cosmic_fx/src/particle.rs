//! Live particle records and their per-tick kinematics.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::data::{Fate, ParticleKind};

/// Tuning constants for the kind-specific forces. These are hand-tuned
/// values, not physical ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Forces {
    /// Inward acceleration per tick for gravitating kinds.
    pub gravity_strength: f32,
    /// Angular step (radians per tick) given to journey planets.
    pub orbit_step: f32,
}

impl Default for Forces {
    fn default() -> Self {
        Self {
            gravity_strength: 0.01,
            orbit_step: 0.02,
        }
    }
}

/// A single CPU-simulated particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radius in pixels.
    pub size: f32,
    pub color: Color,
    /// Opacity at spawn. The live value is in `opacity`.
    pub base_opacity: f32,
    pub opacity: f32,
    pub life: f32,
    pub max_life: f32,
    /// Radians per tick, only read by orbiting kinds.
    pub orbit_step: f32,
    pub kind: ParticleKind,
    pub fate: Fate,
    /// Wrap around the surface edges instead of drifting off.
    pub wraps: bool,
}

impl Particle {
    pub fn new(kind: ParticleKind, position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size: 1.0,
            color: Color::WHITE,
            base_opacity: 1.0,
            opacity: 1.0,
            life: 0.0,
            max_life: 1.0,
            orbit_step: 0.0,
            kind,
            fate: Fate::Immortal,
            wraps: false,
        }
    }

    /// Normalized lifetime `life / max_life`. Zero for immortal particles.
    pub fn life_ratio(&self) -> f32 {
        if self.fate == Fate::Immortal || self.max_life <= 0.0 {
            0.0
        } else {
            self.life / self.max_life
        }
    }

    pub fn is_spent(&self) -> bool {
        self.fate != Fate::Immortal && self.life >= self.max_life
    }

    /// Apply velocity, the kind force, edge wrapping and the opacity rule,
    /// then advance `life` by `life_step`. `size` is the surface size.
    pub fn integrate(&mut self, size: Vec2, forces: &Forces, life_step: f32) {
        let center = size * 0.5;
        self.position += self.velocity;

        if self.kind.gravitates() {
            let to_center = center - self.position;
            let distance = to_center.length();
            if distance > 0.0 {
                self.velocity += to_center / distance * forces.gravity_strength;
            }
        }

        if self.kind.orbits() {
            let offset = self.position - center;
            let radius = offset.length();
            let angle = offset.y.atan2(offset.x) + self.orbit_step;
            self.position = center + Vec2::from_angle(angle) * radius;
        }

        if self.wraps {
            wrap(&mut self.position, size);
        }

        let ratio = self.life_ratio();
        self.opacity = match self.fate {
            Fate::Expire => (1.0 - ratio).max(0.0),
            Fate::Recycle => (self.base_opacity * (1.0 - ratio)).clamp(0.0, 1.0),
            Fate::Immortal => self.base_opacity,
        };

        if self.fate != Fate::Immortal {
            self.life += life_step;
        }
    }

    /// Restart a recycling particle somewhere random on the surface.
    pub fn recycle(&mut self, size: Vec2) {
        self.life = 0.0;
        self.position = Vec2::new(fastrand::f32() * size.x, fastrand::f32() * size.y);
    }
}

/// Wrap a position so it stays within `[0, size]` on both axes.
pub fn wrap(position: &mut Vec2, size: Vec2) {
    if position.x > size.x {
        position.x = 0.0;
    }
    if position.x < 0.0 {
        position.x = size.x;
    }
    if position.y > size.y {
        position.y = 0.0;
    }
    if position.y < 0.0 {
        position.y = size.y;
    }
}

// ---------------------------------------------------------------------------
// Comets
// ---------------------------------------------------------------------------

/// Horizontal distance past the surface edge where comets park and respawn.
pub const COMET_MARGIN: f32 = 100.0;

/// A reusable comet. It crosses the surface left to right, then respawns
/// on the trailing edge with an empty trail.
#[derive(Clone, Debug, PartialEq)]
pub struct Comet {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: Color,
    /// Oldest point first.
    pub trail: VecDeque<Vec2>,
    pub trail_len: usize,
}

impl Comet {
    /// A comet parked at the trailing edge with a random height and heading.
    pub fn launch(surface: Vec2, trail_len: usize) -> Self {
        Self {
            position: Vec2::new(-COMET_MARGIN, fastrand::f32() * surface.y),
            velocity: Vec2::new(fastrand::f32() * 3.0 + 2.0, (fastrand::f32() - 0.5) * 2.0),
            size: fastrand::f32() * 3.0 + 2.0,
            color: Color::hsl(fastrand::f32() * 60.0 + 200.0, 0.7, 0.7),
            trail: VecDeque::with_capacity(trail_len + 1),
            trail_len,
        }
    }

    /// Advance one tick. A comet already past the leading edge respawns
    /// instead of moving.
    pub fn step(&mut self, surface: Vec2) {
        if self.position.x > surface.x + COMET_MARGIN {
            self.position = Vec2::new(-COMET_MARGIN, fastrand::f32() * surface.y);
            self.trail.clear();
            return;
        }

        self.position += self.velocity;
        self.trail.push_back(self.position);
        while self.trail.len() > self.trail_len {
            self.trail.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURFACE: Vec2 = Vec2::new(800.0, 600.0);

    fn expiring(kind: ParticleKind) -> Particle {
        Particle {
            fate: Fate::Expire,
            max_life: 10.0,
            ..Particle::new(kind, SURFACE * 0.5)
        }
    }

    #[test]
    fn gravity_pulls_toward_center() {
        let mut p = expiring(ParticleKind::Matter);
        p.position = Vec2::new(100.0, 300.0);
        p.integrate(SURFACE, &Forces::default(), 1.0);
        assert!(p.velocity.x > 0.0);
        assert!(p.velocity.y.abs() < 1e-6);
        assert!((p.velocity.length() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn gravity_ignores_non_gravitating_kinds() {
        let mut p = expiring(ParticleKind::Inflation);
        p.position = Vec2::new(100.0, 300.0);
        p.integrate(SURFACE, &Forces::default(), 1.0);
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn orbit_keeps_radius_and_advances_angle() {
        let mut p = expiring(ParticleKind::Planet);
        p.position = SURFACE * 0.5 + Vec2::new(100.0, 0.0);
        p.orbit_step = 0.02;
        p.integrate(SURFACE, &Forces::default(), 1.0);
        let offset = p.position - SURFACE * 0.5;
        assert!((offset.length() - 100.0).abs() < 1e-3);
        assert!((offset.y.atan2(offset.x) - 0.02).abs() < 1e-4);
    }

    #[test]
    fn orbit_radius_follows_the_velocity_step() {
        let mut p = expiring(ParticleKind::Planet);
        p.position = SURFACE * 0.5 + Vec2::new(100.0, 0.0);
        p.velocity = Vec2::new(0.0, 3.0);
        p.orbit_step = 0.0;
        p.integrate(SURFACE, &Forces::default(), 1.0);
        let radius = (p.position - SURFACE * 0.5).length();
        assert!((radius - Vec2::new(100.0, 3.0).length()).abs() < 1e-3);
    }

    #[test]
    fn expiring_opacity_falls_with_life() {
        let mut p = expiring(ParticleKind::Star);
        p.life = 5.0;
        p.integrate(SURFACE, &Forces::default(), 1.0);
        assert!((p.opacity - 0.5).abs() < 1e-6);
        assert_eq!(p.life, 6.0);
    }

    #[test]
    fn wrap_moves_across_edges() {
        let mut pos = Vec2::new(801.0, -1.0);
        wrap(&mut pos, SURFACE);
        assert_eq!(pos, Vec2::new(0.0, 600.0));
    }

    #[test]
    fn comet_trail_is_capped() {
        let mut comet = Comet::launch(SURFACE, 20);
        comet.velocity = Vec2::new(1.0, 0.0);
        for _ in 0..50 {
            comet.step(SURFACE);
        }
        assert_eq!(comet.trail.len(), 20);
        assert_eq!(comet.trail.back(), Some(&comet.position));
    }

    #[test]
    fn comet_respawns_on_tick_after_leaving() {
        let mut comet = Comet::launch(SURFACE, 20);
        comet.velocity = Vec2::new(5.0, 0.0);
        comet.position = Vec2::new(SURFACE.x + COMET_MARGIN - 2.0, 10.0);
        comet.step(SURFACE);
        assert!(comet.position.x > SURFACE.x + COMET_MARGIN);
        assert!(!comet.trail.is_empty());

        comet.step(SURFACE);
        assert_eq!(comet.position.x, -COMET_MARGIN);
        assert!((0.0..SURFACE.y).contains(&comet.position.y));
        assert!(comet.trail.is_empty());
    }
}
