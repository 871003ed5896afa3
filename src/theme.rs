use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Resource to track if the theme has been applied
#[derive(Resource, Default)]
pub struct ThemeApplied(pub bool);

pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ThemeApplied>()
            .add_systems(Update, apply_space_theme);
    }
}

/// Violet and pink on black
pub mod colors {
    use bevy_egui::egui::Color32;

    pub const BG_CARD: Color32 = Color32::from_rgba_premultiplied(30, 18, 48, 200);
    pub const BG_BAR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 230);
    pub const BORDER: Color32 = Color32::from_rgb(76, 52, 130);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(200, 200, 210);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(150, 150, 165);

    pub const VIOLET: Color32 = Color32::from_rgb(0x8b, 0x5c, 0xf6);
    pub const PINK: Color32 = Color32::from_rgb(0xec, 0x48, 0x99);
    pub const PURPLE_LIGHT: Color32 = Color32::from_rgb(0xc0, 0x84, 0xfc);
    pub const YELLOW: Color32 = Color32::from_rgb(0xfa, 0xcc, 0x15);
    pub const ORANGE: Color32 = Color32::from_rgb(0xf9, 0x73, 0x16);
    pub const GREEN: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80);
    pub const BLUE: Color32 = Color32::from_rgb(0x60, 0xa5, 0xfa);
}

fn apply_space_theme(mut contexts: EguiContexts, mut theme_applied: ResMut<ThemeApplied>) {
    if theme_applied.0 {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    style.visuals.window_corner_radius = egui::CornerRadius::same(10);
    style.visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(8);
    style.visuals.widgets.hovered.corner_radius = egui::CornerRadius::same(8);
    style.visuals.widgets.active.corner_radius = egui::CornerRadius::same(8);

    style.visuals.window_fill = colors::BG_CARD;
    style.visuals.window_stroke = egui::Stroke::new(1.0, colors::BORDER);
    style.visuals.panel_fill = egui::Color32::TRANSPARENT;

    style.visuals.widgets.inactive.weak_bg_fill = colors::BG_CARD;
    style.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, colors::BORDER);
    style.visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, colors::PURPLE_LIGHT);
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, colors::VIOLET);
    style.visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, colors::TEXT_PRIMARY);
    style.visuals.selection.bg_fill = colors::VIOLET;
    style.visuals.override_text_color = Some(colors::TEXT_SECONDARY);

    ctx.set_style(style);
    theme_applied.0 = true;
}
