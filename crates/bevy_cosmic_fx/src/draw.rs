//! Per-kind draw rules.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::data::ParticleKind;
use crate::particle::{Comet, Particle};
use crate::surface::DrawSurface;

/// Continent colour on the earth disk.
const CONTINENT: Color = Color::srgb(0.133, 0.545, 0.133);
/// (offset, radius) of the two continent disks.
const CONTINENTS: [(Vec2, f32); 2] = [(Vec2::new(-15.0, -10.0), 12.0), (Vec2::new(10.0, 15.0), 8.0)];

/// Vertices of a five-point star traced at 144 degree steps.
pub fn star_points(center: Vec2, radius: f32) -> [Vec2; 5] {
    std::array::from_fn(|i| center + Vec2::from_angle(i as f32 * 144.0 * PI / 180.0) * radius)
}

fn faded(color: Color, opacity: f32) -> Color {
    let alpha = color.alpha() * opacity;
    color.with_alpha(alpha.clamp(0.0, 1.0))
}

pub fn draw_particle(surface: &mut dyn DrawSurface, p: &Particle) {
    if p.opacity <= 0.0 {
        return;
    }
    let color = faded(p.color, p.opacity);

    if p.kind.glows() {
        surface.radial_gradient_fill(p.position, p.size * 2.0, color);
    }

    match p.kind {
        ParticleKind::Earth => {
            surface.fill_circle(p.position, p.size, color);
            let land = faded(CONTINENT, p.opacity);
            for (offset, radius) in CONTINENTS {
                surface.fill_circle(p.position + offset, radius, land);
            }
        }
        ParticleKind::Ring => surface.stroke_circle(p.position, p.size, 1.0, color),
        ParticleKind::DecorativeStar => {
            surface.fill_polygon(&star_points(p.position, p.size), color);
        }
        _ => surface.fill_circle(p.position, p.size, color),
    }
}

pub fn draw_comet(surface: &mut dyn DrawSurface, comet: &Comet) {
    let n = comet.trail.len() as f32;
    for (i, point) in comet.trail.iter().enumerate() {
        let t = i as f32 / n;
        let radius = t * comet.size;
        if radius > 0.0 {
            surface.fill_circle(*point, radius, comet.color.with_alpha(t * 0.8));
        }
    }

    surface.fill_circle(comet.position, comet.size, comet.color);
    surface.radial_gradient_fill(comet.position, comet.size + 10.0, comet.color.with_alpha(0.6));
    surface.fill_circle(comet.position, comet.size * 0.5, Color::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Fate;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn particle(kind: ParticleKind) -> Particle {
        Particle {
            size: 4.0,
            fate: Fate::Immortal,
            ..Particle::new(kind, Vec2::new(50.0, 50.0))
        }
    }

    #[test]
    fn earth_is_base_disk_plus_two_continents() {
        let mut surface = RecordingSurface::new(Vec2::splat(100.0));
        draw_particle(&mut surface, &particle(ParticleKind::Earth));
        assert_eq!(surface.circles(), 3);
        assert!(matches!(
            surface.commands[1],
            DrawCommand::FillCircle { center, radius, .. }
                if center == Vec2::new(35.0, 40.0) && radius == 12.0
        ));
    }

    #[test]
    fn stars_glow_at_twice_their_size() {
        let mut surface = RecordingSurface::new(Vec2::splat(100.0));
        draw_particle(&mut surface, &particle(ParticleKind::Star));
        assert!(matches!(
            surface.commands[0],
            DrawCommand::Glow { radius, .. } if radius == 8.0
        ));
        assert_eq!(surface.circles(), 1);
    }

    #[test]
    fn rings_are_stroked() {
        let mut surface = RecordingSurface::new(Vec2::splat(100.0));
        draw_particle(&mut surface, &particle(ParticleKind::Ring));
        assert!(matches!(surface.commands[0], DrawCommand::StrokeCircle { .. }));
    }

    #[test]
    fn invisible_particles_are_skipped() {
        let mut surface = RecordingSurface::new(Vec2::splat(100.0));
        let mut p = particle(ParticleKind::Dot);
        p.opacity = 0.0;
        draw_particle(&mut surface, &p);
        assert!(surface.commands.is_empty());
    }

    #[test]
    fn comet_trail_brightens_toward_head() {
        let mut comet = Comet::launch(Vec2::new(400.0, 300.0), 20);
        comet.velocity = Vec2::new(2.0, 0.0);
        for _ in 0..5 {
            comet.step(Vec2::new(400.0, 300.0));
        }
        let mut surface = RecordingSurface::new(Vec2::new(400.0, 300.0));
        draw_comet(&mut surface, &comet);

        let alphas: Vec<f32> = surface
            .commands
            .iter()
            .take(4)
            .filter_map(|c| match c {
                DrawCommand::FillCircle { color, .. } => Some(color.alpha()),
                _ => None,
            })
            .collect();
        assert_eq!(alphas.len(), 4);
        assert!(alphas.windows(2).all(|w| w[0] < w[1]));
    }
}
