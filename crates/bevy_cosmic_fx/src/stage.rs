//! Cooperative frame scheduling.
//!
//! A [`Stage`] holds every mounted animation with its optional surface. Each
//! display frame it runs the animations that asked for a frame. An
//! animation asks for the next one only by returning [`Flow::Continue`] from
//! its tick, so a stopped or unmounted animation never runs again.
//!
//! Mounts are addressed by a generational [`MountId`]. Unmounting bumps the
//! slot generation, so a stale id held by a view that was already torn down
//! is ignored instead of reaching whatever reuses the slot.

use std::any::Any;
use std::time::Duration;

use bevy::prelude::*;

use crate::raster::PixelCanvas;
use crate::surface::DrawSurface;

/// Result of one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Request another frame.
    Continue,
    /// Leave no pending request.
    Stop,
}

/// Something the stage can drive once per frame.
pub trait Animation: Send + Sync + 'static {
    fn label(&self) -> &str;
    /// Called on mount and again on every viewport resize.
    fn initialize(&mut self, size: Vec2);
    fn frame(&mut self, now: Duration, surface: Option<&mut dyn DrawSurface>) -> Flow;
    fn teardown(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MountId {
    index: u32,
    generation: u32,
}

struct Mount<S> {
    animation: Box<dyn Animation>,
    surface: Option<S>,
    frame_requested: bool,
    /// The surface was painted by the latest `frame` call.
    drawn: bool,
}

struct Slot<S> {
    generation: u32,
    mount: Option<Mount<S>>,
}

#[derive(Resource)]
pub struct Stage<S: DrawSurface + Send + Sync + 'static> {
    slots: Vec<Slot<S>>,
    free: Vec<u32>,
    viewport: UVec2,
}

/// The stage the Bevy plugin drives.
pub type CanvasStage = Stage<PixelCanvas>;

impl<S: DrawSurface + Send + Sync + 'static> Default for Stage<S> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            viewport: UVec2::ZERO,
        }
    }
}

impl<S: DrawSurface + Send + Sync + 'static> Stage<S> {
    pub fn new(viewport: UVec2) -> Self {
        Self {
            viewport,
            ..default()
        }
    }

    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Number of live mounts.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.mount.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Initialize `animation` at the current viewport and request its first
    /// frame.
    pub fn mount(&mut self, animation: impl Animation, mut surface: Option<S>) -> MountId {
        if let Some(surface) = surface.as_mut().filter(|s| s.size() != self.viewport.as_vec2()) {
            surface.resize(self.viewport);
        }
        let mut animation: Box<dyn Animation> = Box::new(animation);
        animation.initialize(self.viewport.as_vec2());
        debug!("mounted {}", animation.label());

        let mount = Mount {
            animation,
            surface,
            frame_requested: true,
            drawn: false,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].mount = Some(mount);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    mount: Some(mount),
                });
                self.slots.len() as u32 - 1
            }
        };
        MountId {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Give a mounted animation its surface, sized to the viewport.
    pub fn attach(&mut self, id: MountId, mut surface: S) {
        let viewport = self.viewport;
        if let Some(mount) = self.get_mut(id) {
            if surface.size() != viewport.as_vec2() {
                surface.resize(viewport);
            }
            mount.surface = Some(surface);
        }
    }

    /// Cancel the pending frame and tear the animation down. Stale or
    /// already-unmounted ids are ignored.
    pub fn unmount(&mut self, id: MountId) {
        if self.get_mut(id).is_none() {
            return;
        }
        let slot = &mut self.slots[id.index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(mut mount) = slot.mount.take() {
            mount.animation.teardown();
            debug!("unmounted {}", mount.animation.label());
        }
        self.free.push(id.index);
    }

    pub fn is_mounted(&self, id: MountId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_frame_pending(&self, id: MountId) -> bool {
        self.get(id).is_some_and(|m| m.frame_requested)
    }

    /// Whether the latest `frame` call painted this mount's surface.
    pub fn was_drawn(&self, id: MountId) -> bool {
        self.get(id).is_some_and(|m| m.drawn)
    }

    /// Run every pending frame request once.
    pub fn frame(&mut self, now: Duration) {
        for mount in self.slots.iter_mut().filter_map(|s| s.mount.as_mut()) {
            mount.drawn = false;
        }
        let pending: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.mount.as_ref().is_some_and(|m| m.frame_requested))
            .map(|(index, _)| index)
            .collect();

        for index in pending {
            let Some(mount) = self.slots[index].mount.as_mut() else {
                continue;
            };
            mount.frame_requested = false;
            mount.drawn = mount.surface.is_some();
            let surface = mount.surface.as_mut().map(|s| s as &mut dyn DrawSurface);
            if mount.animation.frame(now, surface) == Flow::Continue {
                mount.frame_requested = true;
            }
        }
    }

    /// Resize every surface and re-initialize every listener.
    pub fn resize(&mut self, viewport: UVec2) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        for mount in self.slots.iter_mut().filter_map(|s| s.mount.as_mut()) {
            if let Some(surface) = mount.surface.as_mut() {
                surface.resize(viewport);
            }
            mount.animation.initialize(viewport.as_vec2());
        }
    }

    pub fn surface(&self, id: MountId) -> Option<&S> {
        self.get(id)?.surface.as_ref()
    }

    pub fn animation<T: Animation>(&self, id: MountId) -> Option<&T> {
        self.get(id)?.animation.as_any().downcast_ref::<T>()
    }

    /// Downcast a mounted animation to its concrete type.
    pub fn animation_mut<T: Animation>(&mut self, id: MountId) -> Option<&mut T> {
        self.get_mut(id)?.animation.as_any_mut().downcast_mut::<T>()
    }

    fn get(&self, id: MountId) -> Option<&Mount<S>> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.mount.as_ref()
    }

    fn get_mut(&mut self, id: MountId) -> Option<&mut Mount<S>> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.mount.as_mut()
    }
}
