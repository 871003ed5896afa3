use bevy::prelude::*;
use bevy_cosmic_fx::{CanvasStage, EffectKind};
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use super::{mount_view_layers, JourneyProgress, JourneyState, PortfolioView};
use crate::constants::layers;
use crate::content::{Milestone, MILESTONES};
use crate::settings::FxSettings;
use crate::theme::colors;

const STRIPE_WIDTH: f32 = 3.0;

pub struct TimelinePlugin;

impl Plugin for TimelinePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PortfolioView::Timeline), mount_timeline_backdrop)
            .add_systems(OnExit(PortfolioView::Timeline), end_journey)
            .add_systems(
                EguiPrimaryContextPass,
                draw_timeline
                    .run_if(in_state(PortfolioView::Timeline).and(in_state(JourneyState::Inactive))),
            );
    }
}

fn mount_timeline_backdrop(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut stage: ResMut<CanvasStage>,
    settings: Res<FxSettings>,
) {
    if !settings.show_backdrop {
        return;
    }
    mount_view_layers(
        &mut commands,
        &mut images,
        &mut stage,
        &settings.tuning(),
        &[(EffectKind::TimelineBackdrop, layers::TIMELINE_BACKDROP)],
    );
}

fn end_journey(mut next_journey: ResMut<NextState<JourneyState>>) {
    next_journey.set(JourneyState::Inactive);
}

fn draw_timeline(
    mut contexts: EguiContexts,
    mut next_view: ResMut<NextState<PortfolioView>>,
    mut next_journey: ResMut<NextState<JourneyState>>,
    progress: Res<JourneyProgress>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let mut play = false;

    egui::TopBottomPanel::top("timeline_header")
        .frame(
            egui::Frame::new()
                .fill(colors::BG_BAR)
                .inner_margin(egui::Margin::symmetric(24, 12)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("\u{2190} Back").clicked() {
                    next_view.set(PortfolioView::Home);
                }
                ui.add_space(16.0);
                ui.label(
                    egui::RichText::new("Detailed Journey Timeline")
                        .size(22.0)
                        .strong()
                        .color(colors::PURPLE_LIGHT),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(egui::RichText::new("\u{25B6} Cosmic Journey").color(colors::YELLOW))
                        .clicked()
                    {
                        play = true;
                    }
                });
            });
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(720.0);
                    ui.add_space(24.0);
                    if !progress.completed {
                        play |= intro_card(ui);
                        ui.add_space(24.0);
                    }
                    for milestone in MILESTONES {
                        milestone_card(ui, milestone);
                        ui.add_space(12.0);
                    }
                });
            });
        });

    if play {
        next_journey.set(JourneyState::Playing);
    }
    Ok(())
}

/// Returns true when the journey button was pressed.
fn intro_card(ui: &mut egui::Ui) -> bool {
    let mut begin = false;
    egui::Frame::new()
        .fill(colors::BG_CARD)
        .stroke(egui::Stroke::new(1.0, colors::ORANGE))
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::same(24))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("Experience the Cosmic Journey")
                        .size(28.0)
                        .strong()
                        .color(colors::YELLOW),
                );
                ui.add_space(8.0);
                ui.label(
                    "Before exploring my personal timeline, witness the journey of the universe \
                     itself, from the Big Bang to the formation of Earth.",
                );
                ui.add_space(12.0);
                begin = ui
                    .button(egui::RichText::new("\u{25B6} Begin Cosmic Journey").color(colors::TEXT_PRIMARY))
                    .clicked();
            });
        });
    begin
}

fn milestone_card(ui: &mut egui::Ui, milestone: &Milestone) {
    let accent = milestone.kind.accent();
    let response = egui::Frame::new()
        .fill(colors::BG_CARD)
        .stroke(egui::Stroke::new(1.0, colors::BORDER))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(milestone.year).strong().color(accent));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(milestone.kind.label()).small().color(colors::TEXT_MUTED));
                });
            });
            ui.label(egui::RichText::new(milestone.title).size(20.0).strong().color(colors::TEXT_PRIMARY));
            ui.label(milestone.description);
            ui.label(egui::RichText::new(milestone.details).small().color(colors::TEXT_MUTED));
        });

    let rect = response.response.rect;
    let stripe = egui::Rect::from_min_max(rect.left_top(), egui::pos2(rect.left() + STRIPE_WIDTH, rect.bottom()));
    ui.painter().rect_filled(stripe, egui::CornerRadius::same(2), accent);
}
