//! # bevy_cosmic_fx
//!
//! CPU particle backdrops for Bevy UI.
//!
//! Every effect is a [`ParticleEngine`] that paints into a software
//! [`PixelCanvas`]. The [`CanvasStage`] resource drives the mounted effects
//! once per frame, the same way a browser drives `requestAnimationFrame`
//! callbacks, and the plugin copies each canvas into an [`Image`] shown by a
//! full-screen [`ImageNode`]. The cosmic journey adds a timed
//! [`PhaseSequencer`] on top of a fading engine.
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_cosmic_fx::{CanvasStage, CosmicFxPlugin, EffectKind, ParticleEngine, Tuning};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(CosmicFxPlugin::default())
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands, mut images: ResMut<Assets<Image>>, mut stage: ResMut<CanvasStage>) {
//!     commands.spawn(Camera2d);
//!     let dust = ParticleEngine::for_effect(EffectKind::SpaceDust, &Tuning::default());
//!     bevy_cosmic_fx::spawn_fx_layer(&mut commands, &mut images, &mut stage, dust, 0);
//! }
//! ```

pub mod data;
pub mod draw;
pub mod effects;
pub mod engine;
pub mod journey;
pub mod particle;
pub mod phases;
pub mod raster;
pub mod sequencer;
pub mod stage;
pub mod surface;

pub use data::*;
pub use effects::{DustRule, EffectKind};
pub use engine::{ClearMode, EngineRules, ParticleEngine, SpawnRule, Tuning};
pub use journey::CosmicJourney;
pub use particle::{Comet, Forces, Particle};
pub use phases::{Phase, PhaseTable, PhaseTableError};
pub use raster::PixelCanvas;
pub use sequencer::{JourneyEvent, PhaseSequencer, SequencerState};
pub use stage::{Animation, CanvasStage, Flow, MountId, Stage};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::window::{PrimaryWindow, WindowResized};

/// Ratio between canvas pixels and logical window pixels.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CanvasScale(pub f32);

impl Default for CanvasScale {
    fn default() -> Self {
        Self(1.0)
    }
}

/// A full-screen UI node showing one mounted effect.
#[derive(Component, Debug, Clone)]
pub struct FxLayer {
    pub mount: MountId,
    pub image: Handle<Image>,
}

/// System sets for ordering host systems around the stage.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CosmicFxSet {
    /// Viewport tracking and resize notification.
    Resize,
    /// Frame callbacks.
    Frame,
    /// Canvas to image copies.
    Upload,
}

pub struct CosmicFxPlugin {
    pub canvas_scale: f32,
}

impl Default for CosmicFxPlugin {
    fn default() -> Self {
        Self { canvas_scale: 1.0 }
    }
}

impl Plugin for CosmicFxPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CanvasStage>()
            .insert_resource(CanvasScale(self.canvas_scale.clamp(0.1, 1.0)))
            .configure_sets(
                Update,
                (CosmicFxSet::Resize, CosmicFxSet::Frame, CosmicFxSet::Upload).chain(),
            )
            .add_systems(
                Update,
                (
                    track_viewport.in_set(CosmicFxSet::Resize),
                    run_stage_frame.in_set(CosmicFxSet::Frame),
                    upload_canvases.in_set(CosmicFxSet::Upload),
                ),
            );
    }
}

fn scaled(size: Vec2, scale: f32) -> UVec2 {
    (size * scale).round().max(Vec2::ZERO).as_uvec2()
}

/// Feed window resizes into the stage. Until the first resize arrives the
/// primary window size is used.
fn track_viewport(
    mut resized: MessageReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    scale: Res<CanvasScale>,
    mut stage: ResMut<CanvasStage>,
) {
    let mut size = resized.read().last().map(|e| Vec2::new(e.width, e.height));
    if size.is_none() && stage.viewport() == UVec2::ZERO {
        size = windows.single().ok().map(|w| w.size());
    }
    if let Some(size) = size {
        let viewport = scaled(size, scale.0);
        if viewport != stage.viewport() {
            debug!("fx viewport {}x{}", viewport.x, viewport.y);
            stage.resize(viewport);
        }
    }
}

fn run_stage_frame(time: Res<Time<Real>>, mut stage: ResMut<CanvasStage>) {
    stage.frame(time.elapsed());
}

fn upload_canvases(stage: Res<CanvasStage>, layers: Query<&FxLayer>, mut images: ResMut<Assets<Image>>) {
    for layer in &layers {
        if !stage.was_drawn(layer.mount) {
            continue;
        }
        let Some(canvas) = stage.surface(layer.mount) else {
            continue;
        };
        if canvas.width() == 0 || canvas.height() == 0 {
            continue;
        }
        let Some(image) = images.get_mut(&layer.image) else {
            continue;
        };
        if image.size() != canvas.dimensions() {
            image.resize(extent(canvas.dimensions()));
        }
        let bytes = canvas.as_bytes();
        match image.data.as_mut() {
            Some(data) if data.len() == bytes.len() => data.copy_from_slice(bytes),
            _ => image.data = Some(bytes.to_vec()),
        }
    }
}

fn extent(size: UVec2) -> Extent3d {
    Extent3d {
        width: size.x.max(1),
        height: size.y.max(1),
        depth_or_array_layers: 1,
    }
}

/// Transparent RGBA8 image the canvas is copied into.
pub fn canvas_image(size: UVec2) -> Image {
    Image::new_fill(
        extent(size),
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
}

/// Mount `animation` on a fresh canvas and show it full-screen at `z`.
pub fn spawn_fx_layer(
    commands: &mut Commands,
    images: &mut Assets<Image>,
    stage: &mut CanvasStage,
    animation: impl Animation,
    z: i32,
) -> (Entity, MountId) {
    let viewport = stage.viewport();
    let name = Name::new(animation.label().to_string());
    let image = images.add(canvas_image(viewport));
    let mount = stage.mount(animation, Some(PixelCanvas::new(viewport)));

    let entity = commands
        .spawn((
            name,
            FxLayer {
                mount,
                image: image.clone(),
            },
            ImageNode::new(image),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            ZIndex(z),
        ))
        .id();
    (entity, mount)
}

/// Unmount the layer's animation and despawn its node.
pub fn despawn_fx_layer(commands: &mut Commands, stage: &mut CanvasStage, entity: Entity, layer: &FxLayer) {
    stage.unmount(layer.mount);
    commands.entity(entity).despawn();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn canvas_image_matches_canvas_layout() {
        let canvas = PixelCanvas::new(UVec2::new(32, 16));
        let image = canvas_image(canvas.dimensions());
        assert_eq!(image.size(), UVec2::new(32, 16));
        assert_eq!(image.data.as_ref().map(|d| d.len()), Some(canvas.as_bytes().len()));
    }

    #[test]
    fn zero_viewport_still_yields_a_valid_image() {
        assert_eq!(canvas_image(UVec2::ZERO).size(), UVec2::ONE);
    }

    #[test]
    fn stage_paints_dust_onto_its_canvas() {
        let mut stage = CanvasStage::new(UVec2::new(200, 150));
        let dust = ParticleEngine::for_effect(EffectKind::SpaceDust, &Tuning::default());
        let id = stage.mount(dust, Some(PixelCanvas::new(UVec2::new(200, 150))));
        stage.frame(Duration::ZERO);

        let painted = stage
            .surface(id)
            .map(|c| c.as_bytes().chunks(4).filter(|px| px[3] > 0).count())
            .unwrap_or(0);
        assert!(painted > 0);
    }

    #[test]
    fn scaled_viewport_rounds() {
        assert_eq!(scaled(Vec2::new(1280.0, 721.0), 0.5), UVec2::new(640, 361));
    }

    #[test]
    fn upload_skips_layers_that_stopped() {
        let viewport = UVec2::new(40, 30);
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Image>()
            .insert_resource(CanvasStage::new(viewport))
            .add_systems(Update, (run_stage_frame, upload_canvases).chain());

        let mut layer = |engine: ParticleEngine| {
            let image = app.world_mut().resource_mut::<Assets<Image>>().add(canvas_image(viewport));
            let mount = app
                .world_mut()
                .resource_mut::<CanvasStage>()
                .mount(engine, Some(PixelCanvas::new(viewport)));
            app.world_mut().spawn(FxLayer {
                mount,
                image: image.clone(),
            });
            image
        };
        let dust = layer(ParticleEngine::for_effect(EffectKind::SpaceDust, &Tuning::default()));
        let mut finished = ParticleEngine::for_effect(EffectKind::SpaceDust, &Tuning::default());
        finished.teardown();
        let stopped = layer(finished);
        app.update();

        let marker = vec![7u8; (viewport.x * viewport.y * 4) as usize];
        for handle in [&dust, &stopped] {
            if let Some(image) = app.world_mut().resource_mut::<Assets<Image>>().get_mut(handle) {
                image.data = Some(marker.clone());
            }
        }
        app.update();

        let images = app.world().resource::<Assets<Image>>();
        let data = |handle: &Handle<Image>| images.get(handle).and_then(|i| i.data.clone());
        assert_ne!(data(&dust), Some(marker.clone()));
        assert_eq!(data(&stopped), Some(marker));
    }
}
