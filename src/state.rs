use cgmath::Rad;

use crate::{
    animation::{CameraRig, RegionState},
    config::Palette,
    data_structures::bounds::Aabb,
    hover::{HoverEvent, HoverState},
    registry::{RegionRegistry, RegionSlots},
};

/// Everything the viewer knows, owned in one place.
///
/// Input and loaders never touch this directly: they send events to the event
/// loop which calls the methods below.
#[derive(Debug)]
pub struct ViewerState {
    pub registry: RegionRegistry,
    pub hover: HoverState,
    pub rig: CameraRig,
    pub regions: RegionSlots<RegionState>,
    pub palette: Palette,
    running: bool,
}

impl ViewerState {
    pub fn new(registry: RegionRegistry, palette: Palette) -> Self {
        let regions = RegionSlots::new(registry.len());
        Self {
            registry,
            hover: HoverState::new(),
            rig: CameraRig::new(),
            regions,
            palette,
            running: true,
        }
    }

    pub fn on_hover(&mut self, event: &HoverEvent) -> bool {
        self.hover.apply(event, &self.registry)
    }

    /// Window focus. Updates pause while unfocused and resume where they left
    /// off.
    pub fn set_focus(&mut self, focused: bool) {
        if self.running != focused {
            log::debug!("viewer {}", if focused { "resumed" } else { "paused" });
        }
        self.running = focused;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Records a finished load. `bounds` are the framing bounds of the region.
    pub fn region_loaded(&mut self, index: usize, bounds: Aabb) -> bool {
        let inserted = self
            .regions
            .insert(index, RegionState::new(bounds, self.palette.rest));
        if !inserted {
            log::warn!("ignoring load result for region {}", index);
        }
        inserted
    }

    pub fn region_failed(&mut self, index: usize) -> bool {
        self.regions.mark_failed(index)
    }

    /// One frame of animation. Returns `false` without touching anything while
    /// paused.
    pub fn update(&mut self, fovy: Rad<f32>) -> bool {
        if !self.running {
            return false;
        }
        let hovered = self.hover.hovered();
        for (index, region) in self.regions.loaded_mut() {
            region.anim.step(hovered == Some(index), &self.palette);
        }
        let focus = hovered.and_then(|i| self.regions.get(i).map(|region| (i, region)));
        self.rig.update(focus, fovy);
        true
    }
}
