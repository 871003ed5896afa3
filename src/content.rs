//! Timeline entries shown in the detailed timeline view.

use bevy_egui::egui::Color32;

use crate::theme::colors;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MilestoneKind {
    Milestone,
    Education,
    Achievement,
    Internship,
    Future,
}

impl MilestoneKind {
    pub fn accent(&self) -> Color32 {
        match self {
            Self::Achievement => colors::YELLOW,
            Self::Internship => colors::GREEN,
            Self::Future => colors::BLUE,
            Self::Milestone | Self::Education => colors::PURPLE_LIGHT,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Milestone => "Milestone",
            Self::Education => "Education",
            Self::Achievement => "Achievement",
            Self::Internship => "Internship",
            Self::Future => "Future",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Milestone {
    pub year: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub details: &'static str,
    pub kind: MilestoneKind,
}

const fn entry(
    year: &'static str,
    title: &'static str,
    description: &'static str,
    details: &'static str,
    kind: MilestoneKind,
) -> Milestone {
    Milestone {
        year,
        title,
        description,
        details,
        kind,
    }
}

pub const MILESTONES: &[Milestone] = &[
    entry(
        "2007",
        "Born",
        "The beginning of the journey",
        "Where the cosmic adventure starts",
        MilestoneKind::Milestone,
    ),
    entry(
        "2009-2013",
        "Pre-school",
        "Play home through kindergarten",
        "First steps into learning and discovery",
        MilestoneKind::Education,
    ),
    entry(
        "2013-2019",
        "Primary School",
        "Classes 1 to 6",
        "Building a strong academic foundation",
        MilestoneKind::Education,
    ),
    entry(
        "2019-2022",
        "Middle School",
        "Classes 7 to 9",
        "A new curriculum, and online learning through the pandemic",
        MilestoneKind::Education,
    ),
    entry(
        "2023",
        "10th Grade Results",
        "Board examinations",
        "A solid result that set up the next stage",
        MilestoneKind::Achievement,
    ),
    entry(
        "2023-2025",
        "Higher Secondary",
        "Physics, Chemistry, Mathematics and Computer Science",
        "Choosing the science stream and starting to specialize",
        MilestoneKind::Education,
    ),
    entry(
        "2025",
        "12th Grade Results",
        "Board examinations",
        "Completed higher secondary education",
        MilestoneKind::Achievement,
    ),
    entry(
        "2025",
        "Summer Internship",
        "Technology and innovation program",
        "First practical experience building software with a team",
        MilestoneKind::Internship,
    ),
    entry(
        "Future",
        "AI/ML Engineering",
        "Bachelor's degree",
        "Studying artificial intelligence and machine learning",
        MilestoneKind::Future,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_starts_at_birth_and_ends_in_the_future() {
        assert_eq!(MILESTONES.first().map(|m| m.kind), Some(MilestoneKind::Milestone));
        assert_eq!(MILESTONES.last().map(|m| m.kind), Some(MilestoneKind::Future));
    }
}
