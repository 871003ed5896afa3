//! # Cosmic Portfolio
//!
//! A space-themed portfolio shell. Each view sits on animated particle
//! backdrops from [`bevy_cosmic_fx`], and the detailed timeline can play
//! the cosmic journey cut-scene from the Big Bang to the formation of Earth.
//!
//! ```no_run
//! use bevy::prelude::*;
//! use cosmic_portfolio::PortfolioPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(PortfolioPlugin::default())
//!         .run();
//! }
//! ```
//!
//! - **Home**: dust, comets and a slowly turning solar system behind the hero
//! - **Timeline**: drifting stars and rings behind the milestone list
//! - **Journey**: seven timed phases, skippable with `Esc`
//!
//! Press `F1` to tune the effects. Settings persist to
//! `<config dir>/cosmic_portfolio/settings.ron`.

pub mod constants;
pub mod content;
pub mod settings;
pub mod theme;
pub mod views;

pub use settings::{FxSettings, SettingsError, SettingsPlugin};
pub use views::{JourneyState, PortfolioView, ViewsPlugin};

use bevy::prelude::*;
use bevy_cosmic_fx::CosmicFxPlugin;
use bevy_egui::EguiPlugin;

use theme::ThemePlugin;

/// Main plugin that bundles the portfolio
#[derive(Default)]
pub struct PortfolioPlugin {
    /// Use these settings instead of the ones on disk
    pub settings: Option<FxSettings>,
}

impl Plugin for PortfolioPlugin {
    fn build(&self, app: &mut App) {
        let settings = self.settings.clone().unwrap_or_else(FxSettings::load);
        let canvas_scale = settings.canvas_scale;

        app.insert_resource(settings)
            .insert_resource(ClearColor(Color::BLACK))
            // Third-party plugins
            .add_plugins(EguiPlugin::default())
            .add_plugins(CosmicFxPlugin { canvas_scale })
            // Portfolio
            .add_plugins(ThemePlugin)
            .add_plugins(SettingsPlugin)
            .add_plugins(ViewsPlugin)
            .add_systems(Startup, spawn_camera);
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Portfolio Camera"), Camera2d));
}
