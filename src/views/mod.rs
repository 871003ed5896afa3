//! Portfolio views and the effect layers each one mounts.

pub mod home;
pub mod journey;
pub mod timeline;

use bevy::prelude::*;
use bevy_cosmic_fx::{despawn_fx_layer, spawn_fx_layer, CanvasStage, EffectKind, FxLayer, ParticleEngine, Tuning};

/// The page on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, States)]
pub enum PortfolioView {
    #[default]
    Home,
    /// The detailed timeline with the cosmic journey
    Timeline,
}

/// Whether the journey cut-scene is playing over the timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, States)]
pub enum JourneyState {
    #[default]
    Inactive,
    Playing,
}

/// Marks effect layers owned by the current view
#[derive(Component)]
pub struct ViewLayer;

/// Remembers that the journey ran, which hides the timeline intro card
#[derive(Resource, Default)]
pub struct JourneyProgress {
    pub completed: bool,
}

pub struct ViewsPlugin;

impl Plugin for ViewsPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<PortfolioView>()
            .init_state::<JourneyState>()
            .init_resource::<JourneyProgress>()
            .add_systems(OnExit(PortfolioView::Home), unmount_view_layers)
            .add_systems(OnExit(PortfolioView::Timeline), unmount_view_layers)
            .add_plugins((home::HomePlugin, timeline::TimelinePlugin, journey::JourneyPlugin));
    }
}

/// Mount one engine per effect, each on its own layer.
pub fn mount_view_layers(
    commands: &mut Commands,
    images: &mut Assets<Image>,
    stage: &mut CanvasStage,
    tuning: &Tuning,
    effects: &[(EffectKind, i32)],
) {
    for &(effect, z) in effects {
        let engine = ParticleEngine::for_effect(effect, tuning);
        let (entity, _) = spawn_fx_layer(commands, images, stage, engine, z);
        commands.entity(entity).insert(ViewLayer);
    }
}

fn unmount_view_layers(
    mut commands: Commands,
    mut stage: ResMut<CanvasStage>,
    layers: Query<(Entity, &FxLayer), With<ViewLayer>>,
) {
    for (entity, layer) in &layers {
        despawn_fx_layer(&mut commands, &mut stage, entity, layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FxSettings;
    use bevy::state::app::StatesPlugin;
    use bevy_cosmic_fx::CosmicJourney;

    use super::journey::ActiveJourney;

    fn app(settings: FxSettings) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .init_asset::<Image>()
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(CanvasStage::new(UVec2::new(320, 240)))
            .insert_resource(settings)
            .add_plugins(ViewsPlugin);
        app
    }

    fn layer_count(app: &mut App) -> usize {
        app.world_mut().query::<&FxLayer>().iter(app.world()).count()
    }

    #[test]
    fn views_swap_their_backdrops() {
        let mut app = app(FxSettings::default());
        app.update();
        assert_eq!(layer_count(&mut app), 3);
        assert_eq!(app.world().resource::<CanvasStage>().len(), 3);

        app.world_mut()
            .resource_mut::<NextState<PortfolioView>>()
            .set(PortfolioView::Timeline);
        app.update();
        app.update();
        assert_eq!(layer_count(&mut app), 1);
        assert_eq!(app.world().resource::<CanvasStage>().len(), 1);
    }

    #[test]
    fn disabled_orrery_is_not_mounted() {
        let mut app = app(FxSettings {
            show_orrery: false,
            ..default()
        });
        app.update();
        assert_eq!(layer_count(&mut app), 2);
    }

    fn open_timeline(app: &mut App) {
        app.update();
        app.world_mut()
            .resource_mut::<NextState<PortfolioView>>()
            .set(PortfolioView::Timeline);
        app.update();
        app.update();
    }

    fn play_journey(app: &mut App) {
        app.world_mut()
            .resource_mut::<NextState<JourneyState>>()
            .set(JourneyState::Playing);
        app.update();
    }

    fn journey_state(app: &App) -> JourneyState {
        *app.world().resource::<State<JourneyState>>().get()
    }

    #[test]
    fn escape_skips_the_journey_back_to_the_timeline() {
        let mut app = app(FxSettings::default());
        open_timeline(&mut app);
        play_journey(&mut app);

        assert_eq!(journey_state(&app), JourneyState::Playing);
        assert_eq!(layer_count(&mut app), 2);
        assert_eq!(app.world().resource::<CanvasStage>().len(), 2);
        let (_, mount) = app.world().resource::<ActiveJourney>().0.unwrap();
        assert!(app.world().resource::<CanvasStage>().animation::<CosmicJourney>(mount).is_some());

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();
        app.update();

        assert_eq!(journey_state(&app), JourneyState::Inactive);
        assert!(app.world().resource::<JourneyProgress>().completed);
        assert!(app.world().resource::<ActiveJourney>().0.is_none());
        assert!(!app.world().resource::<CanvasStage>().is_mounted(mount));
        assert_eq!(app.world().resource::<CanvasStage>().len(), 1);
        assert_eq!(layer_count(&mut app), 1);
    }

    #[test]
    fn journey_replays_after_completion() {
        let mut app = app(FxSettings::default());
        open_timeline(&mut app);
        play_journey(&mut app);

        let (_, mount) = app.world().resource::<ActiveJourney>().0.unwrap();
        if let Some(journey) = app
            .world_mut()
            .resource_mut::<CanvasStage>()
            .animation_mut::<CosmicJourney>(mount)
        {
            journey.skip();
        }
        app.update();
        app.update();
        assert_eq!(journey_state(&app), JourneyState::Inactive);
        assert!(app.world().resource::<JourneyProgress>().completed);

        play_journey(&mut app);
        assert_eq!(journey_state(&app), JourneyState::Playing);
        assert_eq!(app.world().resource::<CanvasStage>().len(), 2);
        assert!(app.world().resource::<JourneyProgress>().completed);
    }

    #[test]
    fn unmounted_journey_returns_to_inactive_without_completing() {
        let mut app = app(FxSettings::default());
        open_timeline(&mut app);
        play_journey(&mut app);

        let (_, mount) = app.world().resource::<ActiveJourney>().0.unwrap();
        app.world_mut().resource_mut::<CanvasStage>().unmount(mount);
        app.update();
        app.update();

        assert_eq!(journey_state(&app), JourneyState::Inactive);
        assert!(!app.world().resource::<JourneyProgress>().completed);
        assert_eq!(layer_count(&mut app), 1);
    }
}
