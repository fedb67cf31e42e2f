//! The fixed list of regions and the per-region slot store.
//!
//! Region identity is its position in the registry. Every per-region store is
//! pre-sized to the registry length so loads may complete in any order.

/// The ordered, immutable list of region names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionRegistry {
    names: Vec<String>,
}

impl RegionRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case- and whitespace-sensitive lookup. The first match wins.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.names.iter().position(|name| name == label)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }
}

/// Load status of one region.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Slot<T> {
    #[default]
    Pending,
    Loaded(T),
    Failed,
}

impl<T> Slot<T> {
    pub fn as_loaded(&self) -> Option<&T> {
        match self {
            Slot::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Slot::Pending)
    }
}

/// One slot per registry entry, keyed by region index.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionSlots<T> {
    slots: Vec<Slot<T>>,
}

impl<T> RegionSlots<T> {
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| Slot::Pending).collect(),
        }
    }

    pub fn slot(&self, index: usize) -> Option<&Slot<T>> {
        self.slots.get(index)
    }

    /// The loaded value at `index`. Pending, failed and out-of-range slots
    /// yield `None`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Slot::as_loaded)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Slot::as_loaded_mut)
    }

    /// Fills a pending slot. Returns `false` if `index` is out of range or the
    /// slot already resolved; the store is left untouched in that case.
    pub fn insert(&mut self, index: usize, value: T) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_pending() => {
                *slot = Slot::Loaded(value);
                true
            }
            _ => false,
        }
    }

    /// Marks a pending slot as failed.
    pub fn mark_failed(&mut self, index: usize) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) if slot.is_pending() => {
                *slot = Slot::Failed;
                true
            }
            _ => false,
        }
    }

    pub fn loaded(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_loaded().map(|value| (i, value)))
    }

    pub fn loaded_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_loaded_mut().map(|value| (i, value)))
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.as_loaded().is_some()).count()
    }

    /// True once no slot is pending any more.
    pub fn is_settled(&self) -> bool {
        self.slots.iter().all(|s| !s.is_pending())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
