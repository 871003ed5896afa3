//! The journey overlay: mounts the cut-scene, relays its events and draws
//! the caption, progress dots and skip control.

use bevy::prelude::*;
use bevy_cosmic_fx::{spawn_fx_layer, CanvasStage, CosmicFxSet, CosmicJourney, JourneyEvent, MountId};
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use super::{JourneyProgress, JourneyState};
use crate::constants::{journey_ui, layers};
use crate::settings::FxSettings;
use crate::theme::colors;

/// The mounted journey layer, if one is playing
#[derive(Resource, Default)]
pub struct ActiveJourney(pub Option<(Entity, MountId)>);

pub struct JourneyPlugin;

impl Plugin for JourneyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveJourney>()
            .add_systems(OnEnter(JourneyState::Playing), start_journey)
            .add_systems(OnExit(JourneyState::Playing), stop_journey)
            .add_systems(
                Update,
                (skip_on_escape, relay_journey_events)
                    .chain()
                    .after(CosmicFxSet::Frame)
                    .run_if(in_state(JourneyState::Playing)),
            )
            .add_systems(
                EguiPrimaryContextPass,
                draw_journey_overlay.run_if(in_state(JourneyState::Playing)),
            );
    }
}

fn start_journey(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut stage: ResMut<CanvasStage>,
    mut active: ResMut<ActiveJourney>,
    settings: Res<FxSettings>,
    time: Res<Time<Real>>,
) {
    let journey = CosmicJourney::new(settings.phase_table(), &settings.tuning());
    let (entity, mount) = spawn_fx_layer(&mut commands, &mut images, &mut stage, journey, layers::JOURNEY);
    if let Some(journey) = stage.animation_mut::<CosmicJourney>(mount) {
        journey.activate(time.elapsed());
    }
    active.0 = Some((entity, mount));
    info!("Cosmic journey started");
}

fn stop_journey(mut commands: Commands, mut stage: ResMut<CanvasStage>, mut active: ResMut<ActiveJourney>) {
    if let Some((entity, mount)) = active.0.take() {
        stage.unmount(mount);
        commands.entity(entity).try_despawn();
    }
}

fn skip_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut stage: ResMut<CanvasStage>,
    active: Res<ActiveJourney>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    let Some((_, mount)) = active.0 else {
        return;
    };
    if let Some(journey) = stage.animation_mut::<CosmicJourney>(mount) {
        journey.skip();
    }
}

fn relay_journey_events(
    mut stage: ResMut<CanvasStage>,
    active: Res<ActiveJourney>,
    mut progress: ResMut<JourneyProgress>,
    mut next_journey: ResMut<NextState<JourneyState>>,
) {
    let journey = match active.0 {
        Some((_, mount)) => stage.animation_mut::<CosmicJourney>(mount),
        None => None,
    };
    let Some(journey) = journey else {
        next_journey.set(JourneyState::Inactive);
        return;
    };

    for event in journey.drain_events() {
        match event {
            JourneyEvent::PhaseChanged { index, caption_visible } => {
                debug!("journey phase {} (caption {:?})", index, caption_visible);
            }
            JourneyEvent::Completed => {
                progress.completed = true;
                next_journey.set(JourneyState::Inactive);
            }
        }
    }
}

/// Fill state of each progress dot.
pub fn progress_dots(current: Option<usize>, total: usize) -> Vec<bool> {
    (0..total).map(|i| current.is_some_and(|c| i <= c)).collect()
}

struct Caption {
    title: String,
    subtitle: String,
    description: String,
}

fn draw_journey_overlay(
    mut contexts: EguiContexts,
    mut stage: ResMut<CanvasStage>,
    active: Res<ActiveJourney>,
    time: Res<Time<Real>>,
) -> Result {
    let Some((_, mount)) = active.0 else {
        return Ok(());
    };
    let Some(journey) = stage.animation_mut::<CosmicJourney>(mount) else {
        return Ok(());
    };
    let ctx = contexts.ctx_mut()?;
    let now = time.elapsed();

    let sequencer = journey.sequencer();
    let (current, total) = sequencer.progress();
    let caption = current
        .filter(|_| sequencer.caption_visible(now))
        .and_then(|index| sequencer.table().get(index))
        .map(|phase| Caption {
            title: phase.title.clone(),
            subtitle: phase.subtitle.clone(),
            description: phase.description.clone(),
        });

    if let Some(caption) = caption {
        egui::Area::new(egui::Id::new("journey_caption"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .interactable(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(caption.title).size(56.0).strong().color(colors::YELLOW));
                    ui.label(egui::RichText::new(caption.subtitle).size(26.0).color(colors::PURPLE_LIGHT));
                    ui.add_space(8.0);
                    ui.label(egui::RichText::new(caption.description).size(18.0).color(colors::TEXT_SECONDARY));
                });
            });
    }

    egui::Area::new(egui::Id::new("journey_progress"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -journey_ui::BOTTOM_MARGIN])
        .interactable(false)
        .show(ctx, |ui| {
            let dots = progress_dots(current, total);
            let size = egui::vec2(
                journey_ui::DOT_SPACING * dots.len() as f32,
                journey_ui::DOT_RADIUS * 2.0,
            );
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            let painter = ui.painter();
            for (i, filled) in dots.into_iter().enumerate() {
                let center = egui::pos2(
                    rect.left() + journey_ui::DOT_SPACING * (i as f32 + 0.5),
                    rect.center().y,
                );
                let color = if filled { colors::YELLOW } else { colors::TEXT_MUTED.gamma_multiply(0.4) };
                painter.circle_filled(center, journey_ui::DOT_RADIUS, color);
            }
        });

    let mut skip = false;
    egui::Area::new(egui::Id::new("journey_skip"))
        .anchor(egui::Align2::RIGHT_TOP, [-24.0, 24.0])
        .show(ctx, |ui| {
            skip = ui
                .button(egui::RichText::new("Skip \u{23ED}").color(colors::TEXT_PRIMARY))
                .on_hover_text("Esc")
                .clicked();
        });
    if skip {
        journey.skip();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_fill_up_to_the_current_phase() {
        assert_eq!(progress_dots(Some(2), 4), vec![true, true, true, false]);
        assert_eq!(progress_dots(None, 3), vec![false, false, false]);
    }
}
