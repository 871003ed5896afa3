//! The cosmic journey: a fading particle engine driven by the phase
//! sequencer.

use std::any::Any;
use std::time::Duration;

use bevy::prelude::*;

use crate::effects::EffectKind;
use crate::engine::{ParticleEngine, SpawnRule, Tuning};
use crate::phases::PhaseTable;
use crate::sequencer::{JourneyEvent, PhaseSequencer};
use crate::stage::{Animation, Flow};
use crate::surface::DrawSurface;

pub struct CosmicJourney {
    engine: ParticleEngine,
    sequencer: PhaseSequencer,
}

impl CosmicJourney {
    pub fn new(table: PhaseTable, tuning: &Tuning) -> Self {
        Self {
            engine: ParticleEngine::for_effect(EffectKind::CosmicJourney, tuning),
            sequencer: PhaseSequencer::new(table, tuning.caption, tuning.completion_grace),
        }
    }

    /// Begin at phase 0 and spawn its bursts.
    pub fn activate(&mut self, now: Duration) {
        if self.sequencer.activate(now).is_some() {
            self.enter_phase(0);
        }
    }

    pub fn skip(&mut self) {
        self.sequencer.skip();
    }

    pub fn drain_events(&mut self) -> Vec<JourneyEvent> {
        self.sequencer.drain_events()
    }

    pub fn sequencer(&self) -> &PhaseSequencer {
        &self.sequencer
    }

    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    fn enter_phase(&mut self, index: usize) {
        self.engine.clear_particles();
        let bursts = self
            .sequencer
            .table()
            .get(index)
            .map(|phase| phase.bursts.clone())
            .unwrap_or_default();
        for burst in bursts {
            self.engine.spawn(SpawnRule::Burst(burst));
        }
    }
}

impl Animation for CosmicJourney {
    fn label(&self) -> &str {
        EffectKind::CosmicJourney.label()
    }

    fn initialize(&mut self, size: Vec2) {
        self.engine.initialize(size);
    }

    fn frame(&mut self, now: Duration, surface: Option<&mut dyn DrawSurface>) -> Flow {
        if self.sequencer.is_finished() {
            return Flow::Stop;
        }
        let Some(surface) = surface else {
            return Flow::Continue;
        };

        if let Some(index) = self.sequencer.advance(now) {
            self.enter_phase(index);
        }
        self.engine.tick(Some(surface));
        self.sequencer.settle(now, self.engine.len());

        if self.sequencer.is_finished() {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }

    fn teardown(&mut self) {
        self.sequencer.teardown();
        self.engine.teardown();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Burst, ParticleKind};
    use crate::phases::Phase;
    use crate::sequencer::SequencerState;
    use crate::stage::Stage;
    use crate::surface::{DrawCommand, RecordingSurface};

    const SURFACE: Vec2 = Vec2::new(800.0, 600.0);

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn short_table() -> PhaseTable {
        let phase = |title: &str, duration_ms, count| Phase {
            title: title.to_string(),
            subtitle: String::new(),
            description: String::new(),
            duration_ms,
            bursts: vec![Burst {
                count,
                kind: ParticleKind::Inflation,
                max_life: 160.0,
                ..default()
            }],
        };
        PhaseTable::new(vec![phase("first", 100, 20), phase("last", 50, 5)]).unwrap()
    }

    fn journey() -> CosmicJourney {
        let mut journey = CosmicJourney::new(short_table(), &Tuning::default());
        journey.initialize(SURFACE);
        journey
    }

    #[test]
    fn activate_spawns_the_first_phase() {
        let mut journey = journey();
        journey.activate(ms(0));
        assert_eq!(journey.engine().len(), 20);
        assert_eq!(
            journey.drain_events(),
            vec![JourneyEvent::PhaseChanged {
                index: 0,
                caption_visible: ms(2000)
            }]
        );
    }

    #[test]
    fn phase_change_replaces_the_population() {
        let mut journey = journey();
        journey.activate(ms(0));
        let mut surface = RecordingSurface::new(SURFACE);
        journey.frame(ms(100), Some(&mut surface));
        assert_eq!(journey.sequencer().current_phase(), Some(1));
        assert_eq!(journey.engine().len(), 5);
    }

    #[test]
    fn runs_to_completion_and_stops() {
        let mut journey = journey();
        journey.activate(ms(0));
        let mut surface = RecordingSurface::new(SURFACE);

        let mut now = 0;
        let mut flow = Flow::Continue;
        while flow == Flow::Continue && now < 5000 {
            now += 16;
            flow = journey.frame(ms(now), Some(&mut surface));
        }
        assert_eq!(flow, Flow::Stop);
        // 10 ticks at life_step 16 empty the last phase, then a second of grace.
        assert!(now >= 1100, "finished at {now} ms");

        let completed = journey
            .drain_events()
            .into_iter()
            .filter(|e| *e == JourneyEvent::Completed)
            .count();
        assert_eq!(completed, 1);
    }

    #[test]
    fn first_render_lays_an_opaque_base() {
        let mut journey = journey();
        journey.activate(ms(0));
        let mut surface = RecordingSurface::new(SURFACE);
        journey.frame(ms(16), Some(&mut surface));
        assert!(matches!(
            surface.commands[0],
            DrawCommand::Fade { alpha, .. } if alpha == 1.0
        ));
    }

    #[test]
    fn frame_without_surface_waits() {
        let mut journey = journey();
        journey.activate(ms(0));
        assert_eq!(journey.frame(ms(500), None), Flow::Continue);
        assert_eq!(journey.sequencer().state(), SequencerState::Phase(0));
        assert_eq!(journey.engine().len(), 20);
    }

    #[test]
    fn skip_stops_the_next_frame() {
        let mut stage: Stage<RecordingSurface> = Stage::new(SURFACE.as_uvec2());
        let id = stage.mount(
            CosmicJourney::new(short_table(), &Tuning::default()),
            Some(RecordingSurface::new(SURFACE)),
        );
        if let Some(journey) = stage.animation_mut::<CosmicJourney>(id) {
            journey.activate(ms(0));
            journey.skip();
        }
        stage.frame(ms(16));
        assert!(!stage.is_frame_pending(id));

        stage.unmount(id);
        stage.unmount(id);
        assert!(!stage.is_mounted(id));
    }
}
