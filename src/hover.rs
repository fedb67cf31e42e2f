//! Hover input tracking.
//!
//! Input sources (DOM listeners on the web, the keyboard natively) only ever
//! produce [`HoverEvent`]s. [`HoverState`] is the single place they land.

use crate::registry::RegionRegistry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    /// The pointer entered a list item with this visible text.
    Enter(String),
    /// The pointer left the list.
    Leave,
}

/// The currently hovered region, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverState(Option<usize>);

impl HoverState {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn hovered(&self) -> Option<usize> {
        self.0
    }

    /// Applies one event. Returns `true` if the hovered region changed.
    ///
    /// A label that names no region is ignored.
    pub fn apply(&mut self, event: &HoverEvent, registry: &RegionRegistry) -> bool {
        let next = match event {
            HoverEvent::Enter(label) => match registry.index_of(label) {
                Some(index) => Some(index),
                None => {
                    log::trace!("ignoring hover on unknown label {:?}", label);
                    return false;
                }
            },
            HoverEvent::Leave => None,
        };
        let changed = self.0 != next;
        self.0 = next;
        changed
    }
}

/// Keyboard stand-in for the DOM list on native builds.
///
/// ArrowDown/ArrowUp step through the registry and Escape leaves the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListCursor {
    position: Option<usize>,
}

impl ListCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn next(&mut self, registry: &RegionRegistry) -> Option<HoverEvent> {
        if registry.is_empty() {
            return None;
        }
        let index = match self.position {
            Some(i) => (i + 1) % registry.len(),
            None => 0,
        };
        self.enter(index, registry)
    }

    pub fn prev(&mut self, registry: &RegionRegistry) -> Option<HoverEvent> {
        if registry.is_empty() {
            return None;
        }
        let index = match self.position {
            Some(0) | None => registry.len() - 1,
            Some(i) => i - 1,
        };
        self.enter(index, registry)
    }

    pub fn leave(&mut self) -> HoverEvent {
        self.position = None;
        HoverEvent::Leave
    }

    fn enter(&mut self, index: usize, registry: &RegionRegistry) -> Option<HoverEvent> {
        let name = registry.name(index)?;
        self.position = Some(index);
        Some(HoverEvent::Enter(name.to_string()))
    }
}
