use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::prelude::*;
use bevy_cosmic_fx::{Forces, PhaseTable, Tuning};
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no config directory on this platform")]
    NoConfigDir,
    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse settings: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("could not serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

/// Effect tuning that persists to disk
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FxSettings {
    pub dust_count: u32,
    pub comet_count: u32,
    pub mote_count: u32,
    pub backdrop_count: u32,
    pub asteroid_count: u32,
    /// Comet trail length in points
    pub trail_len: usize,
    pub gravity_strength: f32,
    /// Journey planet step in radians per tick
    pub orbit_step: f32,
    /// Journey aging per tick
    pub life_step: f32,
    pub caption_ms: u64,
    pub completion_grace_ms: u64,
    pub fade_alpha: f32,
    /// Canvas resolution relative to the window (0.1..=1.0)
    pub canvas_scale: f32,
    pub show_orrery: bool,
    pub show_backdrop: bool,
    /// RON phase table used instead of the built-in journey
    pub phase_table: Option<PathBuf>,
}

impl Default for FxSettings {
    fn default() -> Self {
        let tuning = Tuning::default();
        Self {
            dust_count: tuning.dust_count,
            comet_count: tuning.comet_count,
            mote_count: tuning.mote_count,
            backdrop_count: tuning.backdrop_count,
            asteroid_count: tuning.asteroid_count,
            trail_len: tuning.trail_len,
            gravity_strength: tuning.forces.gravity_strength,
            orbit_step: tuning.forces.orbit_step,
            life_step: tuning.life_step,
            caption_ms: tuning.caption.as_millis() as u64,
            completion_grace_ms: tuning.completion_grace.as_millis() as u64,
            fade_alpha: tuning.fade_alpha,
            canvas_scale: 1.0,
            show_orrery: true,
            show_backdrop: true,
            phase_table: None,
        }
    }
}

impl FxSettings {
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("cosmic_portfolio");
            p.push("settings.ron");
            p
        })
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!("Using default fx settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Ok(ron::from_str(&content)?)
    }

    /// Save settings to disk
    pub fn save(&self) {
        let result = Self::file_path()
            .ok_or(SettingsError::NoConfigDir)
            .and_then(|path| self.save_to(&path).map(|_| path));
        match result {
            Ok(path) => info!("Settings saved to: {:?}", path),
            Err(e) => error!("Failed to save settings: {}", e),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn tuning(&self) -> Tuning {
        Tuning {
            forces: Forces {
                gravity_strength: self.gravity_strength,
                orbit_step: self.orbit_step,
            },
            life_step: self.life_step.max(f32::EPSILON),
            fade_alpha: self.fade_alpha.clamp(0.0, 1.0),
            caption: Duration::from_millis(self.caption_ms),
            completion_grace: Duration::from_millis(self.completion_grace_ms),
            trail_len: self.trail_len,
            dust_count: self.dust_count,
            comet_count: self.comet_count,
            mote_count: self.mote_count,
            backdrop_count: self.backdrop_count,
            asteroid_count: self.asteroid_count,
        }
    }

    /// The configured journey, falling back to the built-in one.
    pub fn phase_table(&self) -> PhaseTable {
        let Some(path) = &self.phase_table else {
            return PhaseTable::reference();
        };
        let loaded = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|source| PhaseTable::from_ron(&source).map_err(|e| e.to_string()));
        match loaded {
            Ok(table) => table,
            Err(e) => {
                warn!("Ignoring phase table {:?}: {}", path, e);
                PhaseTable::reference()
            }
        }
    }
}

/// Resource to track if the settings window is open
#[derive(Resource, Default)]
pub struct SettingsWindowState {
    pub open: bool,
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<FxSettings>() {
            app.insert_resource(FxSettings::load());
        }
        app.init_resource::<SettingsWindowState>()
            .add_systems(Update, toggle_settings_window)
            .add_systems(EguiPrimaryContextPass, draw_settings_window);
    }
}

fn toggle_settings_window(keyboard: Res<ButtonInput<KeyCode>>, mut window_state: ResMut<SettingsWindowState>) {
    if keyboard.just_pressed(KeyCode::F1) {
        window_state.open = !window_state.open;
    }
}

/// Draw the settings window. Changes apply the next time a view mounts.
fn draw_settings_window(
    mut contexts: EguiContexts,
    mut settings: ResMut<FxSettings>,
    mut window_state: ResMut<SettingsWindowState>,
) -> Result {
    if !window_state.open {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    let mut changed = false;
    egui::Window::new("Effects")
        .open(&mut window_state.open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Backdrops");
            egui::Grid::new("fx_counts_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Dust:");
                    changed |= ui.add(egui::Slider::new(&mut settings.dust_count, 0..=400)).changed();
                    ui.end_row();

                    ui.label("Comets:");
                    changed |= ui.add(egui::Slider::new(&mut settings.comet_count, 0..=10)).changed();
                    ui.end_row();

                    ui.label("Motes:");
                    changed |= ui.add(egui::Slider::new(&mut settings.mote_count, 0..=200)).changed();
                    ui.end_row();

                    ui.label("Trail Length:");
                    changed |= ui.add(egui::Slider::new(&mut settings.trail_len, 1..=60)).changed();
                    ui.end_row();

                    ui.label("Solar System:");
                    changed |= ui.checkbox(&mut settings.show_orrery, "").changed();
                    ui.end_row();

                    ui.label("Timeline Particles:");
                    changed |= ui.checkbox(&mut settings.show_backdrop, "").changed();
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.heading("Journey");
            egui::Grid::new("fx_journey_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Trail Fade:");
                    changed |= ui
                        .add(egui::Slider::new(&mut settings.fade_alpha, 0.02..=1.0).step_by(0.01))
                        .changed();
                    ui.end_row();

                    ui.label("Caption:");
                    changed |= ui
                        .add(egui::Slider::new(&mut settings.caption_ms, 500..=5000).suffix(" ms"))
                        .changed();
                    ui.end_row();
                });
        });

    if changed {
        settings.save();
    }
    Ok(())
}
