//! Wall-clock phase sequencing for the journey.
//!
//! The sequencer never reads a clock itself. Every call takes the current
//! time as a [`Duration`] since some fixed origin, so the host decides what
//! "now" means and tests can drive it frame by frame.

use std::time::Duration;

use bevy::prelude::*;

use crate::phases::{Phase, PhaseTable};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JourneyEvent {
    /// A phase began. The caption stays up for `caption_visible`.
    PhaseChanged { index: usize, caption_visible: Duration },
    /// The journey ended, naturally or through a skip. Fires once per activation.
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Phase(usize),
    /// The last phase emptied out. `Completed` fires at `fire_at`.
    Complete { fire_at: Duration },
    Finished,
}

pub struct PhaseSequencer {
    table: PhaseTable,
    state: SequencerState,
    phase_started_at: Duration,
    caption_expires_at: Duration,
    caption: Duration,
    grace: Duration,
    completed: bool,
    events: Vec<JourneyEvent>,
}

impl PhaseSequencer {
    pub fn new(table: PhaseTable, caption: Duration, grace: Duration) -> Self {
        Self {
            table,
            state: SequencerState::Idle,
            phase_started_at: Duration::ZERO,
            caption_expires_at: Duration::ZERO,
            caption,
            grace,
            completed: false,
            events: Vec::new(),
        }
    }

    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SequencerState::Finished
    }

    /// Start from phase 0. Does nothing while a run is in progress.
    pub fn activate(&mut self, now: Duration) -> Option<&Phase> {
        if !matches!(self.state, SequencerState::Idle | SequencerState::Finished) {
            return None;
        }
        self.completed = false;
        self.enter(0, now);
        self.table.get(0)
    }

    /// Move to the next phase once the current one has run its duration.
    /// Returns the index of the phase just entered.
    pub fn advance(&mut self, now: Duration) -> Option<usize> {
        let SequencerState::Phase(index) = self.state else {
            return None;
        };
        let phase = self.table.get(index)?;
        if index + 1 >= self.table.len() || now.saturating_sub(self.phase_started_at) < phase.duration() {
            return None;
        }
        self.enter(index + 1, now);
        Some(index + 1)
    }

    /// Drive completion. `live` is the number of particles still on screen.
    pub fn settle(&mut self, now: Duration, live: usize) {
        match self.state {
            SequencerState::Phase(index) if index + 1 == self.table.len() && live == 0 => {
                debug!("journey emptied out, completing in {:?}", self.grace);
                self.state = SequencerState::Complete {
                    fire_at: now + self.grace,
                };
            }
            SequencerState::Complete { fire_at } if now >= fire_at => self.finish(),
            _ => {}
        }
    }

    /// Jump straight to the end.
    pub fn skip(&mut self) {
        if self.state != SequencerState::Finished {
            info!("journey skipped");
            self.finish();
        }
    }

    /// Stop without signalling completion.
    pub fn teardown(&mut self) {
        self.state = SequencerState::Finished;
        self.events.clear();
    }

    pub fn caption_visible(&self, now: Duration) -> bool {
        matches!(self.state, SequencerState::Phase(_) | SequencerState::Complete { .. })
            && now < self.caption_expires_at
    }

    /// Index of the phase on screen. It stays on the last phase while
    /// completion is pending.
    pub fn current_phase(&self) -> Option<usize> {
        match self.state {
            SequencerState::Phase(index) => Some(index),
            SequencerState::Complete { .. } => Some(self.table.len() - 1),
            SequencerState::Idle | SequencerState::Finished => None,
        }
    }

    /// `(current, total)` for the progress dots.
    pub fn progress(&self) -> (Option<usize>, usize) {
        (self.current_phase(), self.table.len())
    }

    pub fn drain_events(&mut self) -> Vec<JourneyEvent> {
        std::mem::take(&mut self.events)
    }

    fn enter(&mut self, index: usize, now: Duration) {
        self.state = SequencerState::Phase(index);
        self.phase_started_at = now;
        self.caption_expires_at = now + self.caption;
        if let Some(phase) = self.table.get(index) {
            info!("journey phase {}: {}", index, phase.title);
        }
        self.events.push(JourneyEvent::PhaseChanged {
            index,
            caption_visible: self.caption,
        });
    }

    fn finish(&mut self) {
        self.state = SequencerState::Finished;
        if !self.completed {
            self.completed = true;
            self.events.push(JourneyEvent::Completed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn table(durations: &[u64]) -> PhaseTable {
        PhaseTable::new(
            durations
                .iter()
                .enumerate()
                .map(|(i, d)| Phase {
                    title: format!("phase {i}"),
                    subtitle: String::new(),
                    description: String::new(),
                    duration_ms: *d,
                    bursts: Vec::new(),
                })
                .collect(),
        )
        .unwrap()
    }

    fn sequencer(durations: &[u64]) -> PhaseSequencer {
        PhaseSequencer::new(table(durations), ms(2000), ms(1000))
    }

    fn completions(events: &[JourneyEvent]) -> usize {
        events.iter().filter(|e| **e == JourneyEvent::Completed).count()
    }

    #[test]
    fn phases_advance_by_one_in_order() {
        let mut seq = sequencer(&[30, 20, 40, 10]);
        seq.activate(ms(0));
        let mut seen = vec![0];
        let mut now = 0;
        while now < 500 {
            now += 7;
            if let Some(index) = seq.advance(ms(now)) {
                seen.push(index);
            }
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);

        let changes: Vec<usize> = seq
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                JourneyEvent::PhaseChanged { index, .. } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(changes, seen);
    }

    #[test]
    fn two_phase_scenario_completes_after_grace() {
        let mut seq = sequencer(&[100, 50]);
        seq.activate(ms(0));
        assert_eq!(seq.current_phase(), Some(0));

        assert_eq!(seq.advance(ms(99)), None);
        assert_eq!(seq.advance(ms(100)), Some(1));

        // Last phase: particles still alive, then gone at 180 ms.
        seq.settle(ms(150), 12);
        assert_eq!(seq.state(), SequencerState::Phase(1));
        seq.settle(ms(180), 0);
        assert_eq!(seq.state(), SequencerState::Complete { fire_at: ms(1180) });

        seq.settle(ms(1179), 0);
        assert_eq!(completions(&seq.drain_events()), 0);
        seq.settle(ms(1180), 0);
        assert!(seq.is_finished());
        assert_eq!(completions(&seq.drain_events()), 1);
    }

    #[test]
    fn empty_middle_phase_does_not_complete_early() {
        let mut seq = sequencer(&[100, 50]);
        seq.activate(ms(0));
        seq.settle(ms(10), 0);
        assert_eq!(seq.state(), SequencerState::Phase(0));
    }

    #[test]
    fn skip_right_after_activate_completes_once() {
        let mut seq = sequencer(&[3000, 2500, 2500]);
        seq.activate(ms(0));
        seq.skip();
        seq.skip();
        let events = seq.drain_events();
        assert_eq!(completions(&events), 1);
        assert!(seq.is_finished());
        assert_eq!(seq.advance(ms(10_000)), None);
    }

    #[test]
    fn skip_during_grace_races_natural_completion() {
        let mut seq = sequencer(&[10]);
        seq.activate(ms(0));
        seq.settle(ms(20), 0);
        seq.skip();
        seq.settle(ms(5000), 0);
        assert_eq!(completions(&seq.drain_events()), 1);
    }

    #[test]
    fn teardown_is_silent() {
        let mut seq = sequencer(&[10, 10]);
        seq.activate(ms(0));
        seq.drain_events();
        seq.teardown();
        seq.skip();
        assert!(seq.drain_events().is_empty());
    }

    #[test]
    fn reactivation_starts_a_fresh_run() {
        let mut seq = sequencer(&[10]);
        seq.activate(ms(0));
        seq.skip();
        seq.drain_events();
        assert!(seq.activate(ms(100)).is_some());
        assert_eq!(seq.current_phase(), Some(0));
        seq.skip();
        assert_eq!(completions(&seq.drain_events()), 1);
    }

    #[test]
    fn caption_hides_after_two_seconds() {
        let mut seq = sequencer(&[5000, 5000]);
        seq.activate(ms(0));
        assert!(seq.caption_visible(ms(1999)));
        assert!(!seq.caption_visible(ms(2000)));
        seq.advance(ms(5000));
        assert!(seq.caption_visible(ms(5001)));
        assert_eq!(seq.progress(), (Some(1), 2));
    }
}
