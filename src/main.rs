//! Main binary for the portfolio.

use bevy::prelude::*;
use cosmic_portfolio::PortfolioPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cosmic Portfolio".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PortfolioPlugin::default())
        .run();
}
