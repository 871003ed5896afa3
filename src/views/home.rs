use bevy::prelude::*;
use bevy_cosmic_fx::{CanvasStage, EffectKind};
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use super::{mount_view_layers, PortfolioView};
use crate::constants::layers;
use crate::settings::{FxSettings, SettingsWindowState};
use crate::theme::colors;

pub struct HomePlugin;

impl Plugin for HomePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PortfolioView::Home), mount_home_backdrops)
            .add_systems(EguiPrimaryContextPass, draw_hero.run_if(in_state(PortfolioView::Home)));
    }
}

fn mount_home_backdrops(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut stage: ResMut<CanvasStage>,
    settings: Res<FxSettings>,
) {
    let mut effects = vec![
        (EffectKind::SpaceDust, layers::DUST),
        (EffectKind::CometField, layers::COMETS),
    ];
    if settings.show_orrery {
        effects.push((EffectKind::Orrery, layers::ORRERY));
    }
    mount_view_layers(&mut commands, &mut images, &mut stage, &settings.tuning(), &effects);
    info!("Home view: {} backdrops", effects.len());
}

fn draw_hero(
    mut contexts: EguiContexts,
    mut next_view: ResMut<NextState<PortfolioView>>,
    mut settings_window: ResMut<SettingsWindowState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.3);
                ui.label(egui::RichText::new("SPACE").size(96.0).strong().color(colors::PURPLE_LIGHT));
                ui.label(egui::RichText::new("Full Stack Developer").size(32.0).color(colors::TEXT_PRIMARY));
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(
                        "Crafting digital experiences that are out of this world.\n\
                         Building the future, one line of code at a time.",
                    )
                    .size(18.0)
                    .color(colors::TEXT_MUTED),
                );
                ui.add_space(24.0);

                if ui
                    .button(egui::RichText::new("View Detailed Timeline").size(18.0).color(colors::TEXT_PRIMARY))
                    .clicked()
                {
                    next_view.set(PortfolioView::Timeline);
                }
                ui.add_space(8.0);
                if ui
                    .small_button("Effects (F1)")
                    .on_hover_text("Tune the particle backdrops")
                    .clicked()
                {
                    settings_window.open = !settings_window.open;
                }
            });
        });

    Ok(())
}
