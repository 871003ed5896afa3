//! The per-effect particle engine.
//!
//! One `ParticleEngine` owns one particle population. It lives for one
//! mount of its view: the stage initializes it with the surface size,
//! ticks it once per frame, and tears it down on unmount.

use std::any::Any;
use std::time::Duration;

use bevy::prelude::*;

use crate::data::{Burst, Fate};
use crate::draw::{draw_comet, draw_particle};
use crate::effects::{self, DustRule, EffectKind};
use crate::particle::{Comet, Forces, Particle};
use crate::stage::{Animation, Flow};
use crate::surface::DrawSurface;

/// Engine-wide tuning, usually built from the host's settings file.
#[derive(Clone, Debug, PartialEq)]
pub struct Tuning {
    pub forces: Forces,
    /// Life units a journey particle ages per tick (about 16 ms at 60 Hz).
    pub life_step: f32,
    /// Overlay alpha for fading effects.
    pub fade_alpha: f32,
    /// How long a phase caption stays up after a phase change.
    pub caption: Duration,
    /// Delay between the last phase emptying out and completion.
    pub completion_grace: Duration,
    pub trail_len: usize,
    pub dust_count: u32,
    pub comet_count: u32,
    pub mote_count: u32,
    pub backdrop_count: u32,
    pub asteroid_count: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            forces: Forces::default(),
            life_step: 16.0,
            fade_alpha: 0.1,
            caption: Duration::from_millis(2000),
            completion_grace: Duration::from_millis(1000),
            trail_len: 20,
            dust_count: 100,
            comet_count: 3,
            mote_count: 50,
            backdrop_count: 80,
            asteroid_count: 15,
        }
    }
}

/// How the surface is prepared before each render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClearMode {
    /// Erase everything.
    Clear,
    /// Composite a translucent overlay so older frames fade into trails.
    Fade { color: Color, alpha: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineRules {
    pub clear: ClearMode,
    /// Added to `life` of every mortal particle each tick.
    pub life_step: f32,
    pub forces: Forces,
    pub trail_len: usize,
}

impl Default for EngineRules {
    fn default() -> Self {
        Self {
            clear: ClearMode::Clear,
            life_step: 1.0,
            forces: Forces::default(),
            trail_len: 20,
        }
    }
}

/// A population rule. Ambient rules populate once and keep their
/// particles alive; bursts are one-shot and expire.
#[derive(Clone, Debug, PartialEq)]
pub enum SpawnRule {
    AmbientDust(DustRule),
    CometField { comets: u32, motes: u32 },
    TimelineBackdrop { count: u32 },
    Orrery { asteroids: u32 },
    Burst(Burst),
}

pub struct ParticleEngine {
    effect: EffectKind,
    rules: EngineRules,
    size: Vec2,
    particles: Vec<Particle>,
    comets: Vec<Comet>,
    /// Spawned on the first `initialize` with a non-empty surface.
    seed: Vec<SpawnRule>,
    /// Fading engines lay down an opaque base after every (re)initialize.
    needs_base: bool,
    torn_down: bool,
}

impl ParticleEngine {
    pub fn new(effect: EffectKind, rules: EngineRules) -> Self {
        Self {
            effect,
            rules,
            size: Vec2::ZERO,
            particles: Vec::new(),
            comets: Vec::new(),
            seed: Vec::new(),
            needs_base: true,
            torn_down: false,
        }
    }

    /// Engine preconfigured for one of the built-in effects. Its population
    /// is spawned once the surface has a size.
    pub fn for_effect(effect: EffectKind, tuning: &Tuning) -> Self {
        let mut engine = Self::new(effect, effect.rules(tuning));
        engine.seed.extend(effect.seed(tuning));
        engine
    }

    pub fn effect(&self) -> EffectKind {
        self.effect
    }

    pub fn rules(&self) -> &EngineRules {
        &self.rules
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn comets(&self) -> &[Comet] {
        &self.comets
    }

    /// Live particles plus comets.
    pub fn len(&self) -> usize {
        self.particles.len() + self.comets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Record the surface size. It is called again on every viewport resize.
    pub fn initialize(&mut self, size: Vec2) {
        let previous = std::mem::replace(&mut self.size, size);
        if self.effect.is_centered() && previous.x > 0.0 && previous.y > 0.0 {
            let shift = (size - previous) * 0.5;
            for particle in &mut self.particles {
                particle.position += shift;
            }
        }
        self.needs_base = true;
        if size.x > 0.0 && size.y > 0.0 && !self.seed.is_empty() {
            for rule in std::mem::take(&mut self.seed) {
                self.spawn(rule);
            }
        }
    }

    /// Populate according to `rule` at the current surface size.
    pub fn spawn(&mut self, rule: SpawnRule) {
        if self.torn_down {
            return;
        }
        let size = self.size;
        match rule {
            SpawnRule::AmbientDust(dust) => self.particles.extend(effects::dust::spawn(&dust, size)),
            SpawnRule::CometField { comets, motes } => {
                let trail_len = self.rules.trail_len;
                self.comets
                    .extend((0..comets).map(|_| Comet::launch(size, trail_len)));
                self.particles.extend(effects::comets::motes(motes, size));
            }
            SpawnRule::TimelineBackdrop { count } => {
                self.particles.extend(effects::backdrop::spawn(count, size));
            }
            SpawnRule::Orrery { asteroids } => {
                self.particles.extend(effects::orrery::spawn(asteroids, size));
            }
            SpawnRule::Burst(burst) => {
                let forces = self.rules.forces;
                self.particles
                    .extend(effects::burst::spawn(&burst, size, &forces));
            }
        }
    }

    /// Drop every particle and comet.
    pub fn clear_particles(&mut self) {
        self.particles.clear();
        self.comets.clear();
    }

    /// Advance kinematics by one tick. The survivors are kept with a
    /// retain pass; spent recycling particles restart in place.
    pub fn step(&mut self) {
        let size = self.size;
        let forces = self.rules.forces;
        let life_step = self.rules.life_step;

        self.particles.retain_mut(|p| {
            p.integrate(size, &forces, life_step);
            if !p.is_spent() {
                return true;
            }
            if p.fate == Fate::Recycle {
                p.recycle(size);
                true
            } else {
                false
            }
        });

        for comet in &mut self.comets {
            comet.step(size);
        }
    }

    /// Clear or fade the surface, then draw every live particle.
    pub fn render(&mut self, surface: &mut dyn DrawSurface) {
        match self.rules.clear {
            ClearMode::Clear => surface.clear(),
            ClearMode::Fade { color, alpha } => {
                if self.needs_base {
                    surface.fade(color, 1.0);
                    self.needs_base = false;
                }
                surface.fade(color, alpha);
            }
        }
        for particle in &self.particles {
            draw_particle(surface, particle);
        }
        for comet in &self.comets {
            draw_comet(surface, comet);
        }
    }

    /// One update-and-render cycle. Without a surface (not attached yet)
    /// nothing happens.
    pub fn tick(&mut self, surface: Option<&mut dyn DrawSurface>) {
        if self.torn_down {
            return;
        }
        let Some(surface) = surface else {
            return;
        };
        self.step();
        self.render(surface);
    }

    /// Release the population. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.clear_particles();
        self.seed.clear();
        debug!("{} engine torn down", self.effect.label());
    }
}

impl Animation for ParticleEngine {
    fn label(&self) -> &str {
        self.effect.label()
    }

    fn initialize(&mut self, size: Vec2) {
        ParticleEngine::initialize(self, size);
    }

    fn frame(&mut self, _now: Duration, surface: Option<&mut dyn DrawSurface>) -> Flow {
        self.tick(surface);
        if self.torn_down {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }

    fn teardown(&mut self) {
        ParticleEngine::teardown(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
