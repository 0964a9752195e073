use std::ops::{Index, IndexMut};

use dockspace_core::{hash_id_key, label_id_key, panel_id, DockStatus, Rect};

use crate::panel::{Panel, PanelIndex};

// ──────────────────────────────────────────────
// Registry: arena of panel and split records
// ──────────────────────────────────────────────

/// Owns every panel and split record. Records never move; they are
/// addressed by [`PanelIndex`] and iterated in insertion order.
#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Option<Panel>>,
    free: Vec<usize>,
    order: Vec<PanelIndex>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, index: PanelIndex) -> Option<&Panel> {
        self.slots.get(index.0).and_then(|s| s.as_ref())
    }

    pub(crate) fn get_mut(&mut self, index: PanelIndex) -> Option<&mut Panel> {
        self.slots.get_mut(index.0).and_then(|s| s.as_mut())
    }

    pub fn contains(&self, index: PanelIndex) -> bool {
        self.get(index).is_some()
    }

    /// Live records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PanelIndex, &Panel)> + '_ {
        self.order.iter().map(move |&i| (i, &self[i]))
    }

    /// Snapshot of the live indices, for loops that mutate the registry.
    pub fn indices(&self) -> Vec<PanelIndex> {
        self.order.clone()
    }

    /// Look up a panel by label. Identity is the hash of the label's id key
    /// confirmed by comparing the key itself, so colliding labels stay apart.
    pub fn find(&self, label: &str) -> Option<PanelIndex> {
        let key = label_id_key(label);
        let id = hash_id_key(key);
        self.order.iter().copied().find(|&i| self[i].matches(id, key))
    }

    /// Return the panel for `label`, registering it on first use.
    ///
    /// A new panel covers `area` and floats, unless it is the first record
    /// in the registry, which starts docked. The flag is true when the
    /// record was created by this call.
    pub(crate) fn get_or_create(&mut self, label: &str, opened: bool, area: Rect) -> (PanelIndex, bool) {
        if let Some(index) = self.find(label) {
            return (index, false);
        }
        let status = if self.is_empty() {
            DockStatus::Docked
        } else {
            DockStatus::Float
        };
        let index = self.insert(Panel::new(label, panel_id(label), status, opened, area));
        (index, true)
    }

    pub(crate) fn insert(&mut self, panel: Panel) -> PanelIndex {
        let index = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(panel);
                PanelIndex(slot)
            }
            None => {
                self.slots.push(Some(panel));
                PanelIndex(self.slots.len() - 1)
            }
        };
        self.order.push(index);
        index
    }

    /// Hard structural delete. Callers must have re-linked every reference
    /// to `index` beforehand.
    pub(crate) fn remove(&mut self, index: PanelIndex) -> Option<Panel> {
        let panel = self.slots.get_mut(index.0)?.take()?;
        self.order.retain(|&i| i != index);
        self.free.push(index.0);
        Some(panel)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.order.clear();
    }
}

impl Index<PanelIndex> for Registry {
    type Output = Panel;

    fn index(&self, index: PanelIndex) -> &Panel {
        match self.get(index) {
            Some(panel) => panel,
            None => panic!("stale panel index {index}"),
        }
    }
}

impl IndexMut<PanelIndex> for Registry {
    fn index_mut(&mut self, index: PanelIndex) -> &mut Panel {
        match self.get_mut(index) {
            Some(panel) => panel,
            None => panic!("stale panel index {index}"),
        }
    }
}
