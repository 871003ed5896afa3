//! The journey's phase table.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{Burst, ColorSource, Origin, ParticleKind, ScalarRange, VelocityRule};

#[derive(Debug, Error)]
pub enum PhaseTableError {
    #[error("could not parse phase table: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("phase table has no phases")]
    Empty,
    #[error("phase {index} has a zero duration")]
    ZeroDuration { index: usize },
}

/// One step of the journey: its caption and the bursts spawned on entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Phase {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub bursts: Vec<Burst>,
}

impl Phase {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Ordered, non-empty list of phases.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "Vec<Phase>", into = "Vec<Phase>")]
pub struct PhaseTable {
    phases: Vec<Phase>,
}

impl TryFrom<Vec<Phase>> for PhaseTable {
    type Error = PhaseTableError;

    fn try_from(phases: Vec<Phase>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}

impl From<PhaseTable> for Vec<Phase> {
    fn from(table: PhaseTable) -> Self {
        table.phases
    }
}

impl PhaseTable {
    pub fn new(phases: Vec<Phase>) -> Result<Self, PhaseTableError> {
        if phases.is_empty() {
            return Err(PhaseTableError::Empty);
        }
        if let Some(index) = phases.iter().position(|p| p.duration_ms == 0) {
            return Err(PhaseTableError::ZeroDuration { index });
        }
        Ok(Self { phases })
    }

    /// Parse a RON list of phases.
    pub fn from_ron(source: &str) -> Result<Self, PhaseTableError> {
        let phases: Vec<Phase> = ron::from_str(source)?;
        Self::new(phases)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter()
    }

    /// From the Big Bang to the formation of Earth.
    pub fn reference() -> Self {
        Self {
            phases: vec![
                phase(
                    "The Big Bang",
                    "13.8 billion years ago",
                    "The universe begins with an explosive expansion",
                    3000,
                    vec![Burst {
                        count: 200,
                        kind: ParticleKind::Explosion,
                        origin: Origin::Center,
                        velocity: VelocityRule::Scatter {
                            speed: ScalarRange::Random(5.0, 20.0),
                        },
                        size: ScalarRange::Random(2.0, 10.0),
                        color: hsl(10.0, 70.0, 1.0, ScalarRange::Random(0.5, 1.0)),
                        opacity: 1.0,
                        max_life: 3000.0,
                    }],
                ),
                phase(
                    "Cosmic Inflation",
                    "First moments",
                    "Space expands faster than light",
                    2500,
                    vec![Burst {
                        count: 150,
                        kind: ParticleKind::Inflation,
                        origin: Origin::Anywhere,
                        velocity: VelocityRule::Jitter { spread: 20.0 },
                        size: ScalarRange::Random(1.0, 5.0),
                        color: hsl(200.0, 320.0, 0.8, ScalarRange::Constant(0.7)),
                        opacity: 0.8,
                        max_life: 2500.0,
                    }],
                ),
                phase(
                    "Formation of Matter",
                    "380,000 years later",
                    "First atoms form as universe cools",
                    2500,
                    vec![Burst {
                        count: 100,
                        kind: ParticleKind::Matter,
                        origin: Origin::Anywhere,
                        velocity: VelocityRule::Jitter { spread: 2.0 },
                        size: ScalarRange::Random(2.0, 5.0),
                        color: hsl(280.0, 340.0, 0.7, ScalarRange::Constant(0.6)),
                        opacity: 0.9,
                        max_life: 2500.0,
                    }],
                ),
                phase(
                    "Birth of Stars",
                    "100 million years later",
                    "Gravity pulls matter together, igniting the first stars",
                    3000,
                    vec![Burst {
                        count: 80,
                        kind: ParticleKind::Star,
                        origin: Origin::Anywhere,
                        velocity: VelocityRule::Jitter { spread: 1.0 },
                        size: ScalarRange::Random(3.0, 9.0),
                        color: hsl(40.0, 100.0, 1.0, ScalarRange::Constant(0.8)),
                        opacity: 1.0,
                        max_life: 3000.0,
                    }],
                ),
                phase(
                    "Galaxy Formation",
                    "1 billion years later",
                    "Stars cluster into magnificent galaxies",
                    2500,
                    vec![Burst {
                        count: 120,
                        kind: ParticleKind::Galaxy,
                        origin: Origin::Ring {
                            radius: ScalarRange::Random(50.0, 250.0),
                        },
                        velocity: VelocityRule::Tangential {
                            speed: 2.0,
                            falloff: 0.0,
                        },
                        size: ScalarRange::Random(2.0, 6.0),
                        color: hsl(200.0, 320.0, 0.8, ScalarRange::Constant(0.7)),
                        opacity: 0.8,
                        max_life: 2500.0,
                    }],
                ),
                phase(
                    "Solar System Birth",
                    "4.6 billion years ago",
                    "Our Sun ignites, planets begin to form",
                    3000,
                    vec![
                        Burst {
                            count: 1,
                            kind: ParticleKind::Sun,
                            origin: Origin::Center,
                            velocity: VelocityRule::Still,
                            size: ScalarRange::Constant(30.0),
                            color: ColorSource::Rgb([0xff, 0xd7, 0x00]),
                            opacity: 1.0,
                            max_life: 3000.0,
                        },
                        Burst {
                            count: 6,
                            kind: ParticleKind::Planet,
                            origin: Origin::Spokes {
                                base: 80.0,
                                step: 30.0,
                            },
                            velocity: VelocityRule::Tangential {
                                speed: 3.0,
                                falloff: 0.3,
                            },
                            size: ScalarRange::Random(4.0, 12.0),
                            color: ColorSource::Cycle(vec![
                                [0x8c, 0x78, 0x53],
                                [0xff, 0xc6, 0x49],
                                [0x6b, 0x93, 0xd6],
                                [0xc1, 0x44, 0x0e],
                                [0xd8, 0xca, 0x9d],
                                [0xfa, 0xd5, 0xa5],
                            ]),
                            opacity: 1.0,
                            max_life: 3000.0,
                        },
                    ],
                ),
                phase(
                    "Earth Formation",
                    "4.5 billion years ago",
                    "Our beautiful blue planet takes shape",
                    3000,
                    vec![
                        Burst {
                            count: 1,
                            kind: ParticleKind::Earth,
                            origin: Origin::Center,
                            velocity: VelocityRule::Still,
                            size: ScalarRange::Constant(50.0),
                            color: ColorSource::Rgb([0x4a, 0x90, 0xe2]),
                            opacity: 1.0,
                            max_life: 3000.0,
                        },
                        Burst {
                            count: 50,
                            kind: ParticleKind::Atmosphere,
                            origin: Origin::Ring {
                                radius: ScalarRange::Random(60.0, 80.0),
                            },
                            velocity: VelocityRule::Outward { speed: 0.5 },
                            size: ScalarRange::Random(1.0, 4.0),
                            color: ColorSource::Rgb([0x87, 0xce, 0xeb]),
                            opacity: 0.6,
                            max_life: 3000.0,
                        },
                    ],
                ),
            ],
        }
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::reference()
    }
}

fn phase(title: &str, subtitle: &str, description: &str, duration_ms: u64, bursts: Vec<Burst>) -> Phase {
    Phase {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        description: description.to_string(),
        duration_ms,
        bursts,
    }
}

fn hsl(hue_min: f32, hue_max: f32, saturation: f32, lightness: ScalarRange) -> ColorSource {
    ColorSource::Hsl {
        hue: ScalarRange::Random(hue_min, hue_max),
        saturation,
        lightness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_table_matches_the_journey() {
        let table = PhaseTable::reference();
        assert_eq!(table.len(), 7);
        let durations: Vec<u64> = table.iter().map(|p| p.duration_ms).collect();
        assert_eq!(durations, vec![3000, 2500, 2500, 3000, 2500, 3000, 3000]);
        assert_eq!(table.get(0).map(|p| p.title.as_str()), Some("The Big Bang"));
        assert_eq!(table.get(6).map(|p| p.title.as_str()), Some("Earth Formation"));
        for phase in table.iter() {
            let total: u32 = phase.bursts.iter().map(|b| b.count).sum();
            assert!(total > 0, "{} spawns nothing", phase.title);
        }
    }

    #[test]
    fn loads_from_ron_with_default_bursts() {
        let source = r#"[
            (
                title: "Only",
                subtitle: "Now",
                description: "A single phase",
                duration_ms: 500,
                bursts: [(count: 10, kind: Matter)],
            ),
        ]"#;
        let table = PhaseTable::from_ron(source).unwrap();
        assert_eq!(table.len(), 1);
        let burst = &table.get(0).unwrap().bursts[0];
        assert_eq!(burst.count, 10);
        assert_eq!(burst.kind, ParticleKind::Matter);
        assert_eq!(burst.max_life, Burst::default().max_life);
    }

    #[test]
    fn rejects_empty_and_zero_duration_tables() {
        assert!(matches!(PhaseTable::from_ron("[]"), Err(PhaseTableError::Empty)));

        let source = r#"[
            (title: "A", subtitle: "", description: "", duration_ms: 100),
            (title: "B", subtitle: "", description: "", duration_ms: 0),
        ]"#;
        assert!(matches!(
            PhaseTable::from_ron(source),
            Err(PhaseTableError::ZeroDuration { index: 1 })
        ));
        assert!(matches!(PhaseTable::from_ron("[(title: 1)]"), Err(PhaseTableError::Ron(_))));
    }

    #[test]
    fn deserializing_a_table_directly_is_validated() {
        assert!(ron::from_str::<PhaseTable>("[]").is_err());
        let source = r#"[(title: "A", subtitle: "", description: "", duration_ms: 0)]"#;
        assert!(ron::from_str::<PhaseTable>(source).is_err());
        let source = r#"[(title: "A", subtitle: "", description: "", duration_ms: 10)]"#;
        assert_eq!(ron::from_str::<PhaseTable>(source).map(|t| t.len()).ok(), Some(1));
    }

    #[test]
    fn reference_table_survives_ron() {
        let table = PhaseTable::reference();
        let text = ron::ser::to_string_pretty(&table, ron::ser::PrettyConfig::default()).unwrap();
        assert_eq!(PhaseTable::from_ron(&text).unwrap().len(), 7);
    }
}
