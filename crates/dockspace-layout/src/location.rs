use dockspace_core::{DockSlot, DockStatus};

use crate::panel::{LocationPath, PanelIndex, SideCode};
use crate::registry::Registry;
use crate::DockContext;

impl Registry {
    /// The side of its parent split `index` occupies, if it has a parent.
    pub fn side_code(&self, index: PanelIndex) -> Option<SideCode> {
        let parent = self[index].parent?;
        let [Some(a), Some(b)] = self[parent].children else {
            return None;
        };
        let pos = self[index].pos;
        let code = if self.is_horizontal(parent) {
            if pos.x < self[a].pos.x || pos.x < self[b].pos.x {
                SideCode::HorizontalFirst
            } else {
                SideCode::HorizontalSecond
            }
        } else if pos.y < self[a].pos.y || pos.y < self[b].pos.y {
            SideCode::VerticalFirst
        } else {
            SideCode::VerticalSecond
        };
        Some(code)
    }

    /// Side codes from `index` up to the root, innermost first.
    pub fn location_of(&self, index: PanelIndex, max_depth: usize) -> LocationPath {
        let mut codes = Vec::new();
        let mut node = index;
        while codes.len() < max_depth {
            let Some(code) = self.side_code(node) else {
                break;
            };
            codes.push(code);
            match self[node].parent {
                Some(parent) => node = parent,
                None => break,
            }
        }
        LocationPath::new(codes)
    }
}

impl DockContext {
    /// Remember where a docked panel sits so it can return there later.
    pub(crate) fn fill_location(&mut self, index: PanelIndex) {
        if self.registry[index].status == DockStatus::Float {
            return;
        }
        let location = self
            .registry
            .location_of(index, self.config.max_location_depth);
        log::trace!("{} location {location}", self.describe(index));
        self.registry[index].location = location;
    }

    /// Re-dock a reopened panel at its recorded location.
    ///
    /// Walks from the root taking the recorded sides outermost first. A leaf
    /// reached with sides left over is split on the next side; once the
    /// sides run out the panel joins the reached node as a tab.
    pub(crate) fn try_dock_to_stored_location(&mut self, index: PanelIndex) {
        let p = &self.registry[index];
        if p.status == DockStatus::Docked || p.location.is_empty() {
            return;
        }
        let Some(mut node) = self.root_dock() else {
            return;
        };
        let codes: Vec<SideCode> = p.location.codes().iter().rev().copied().collect();
        log::debug!("re-docking {} at {}", self.describe(index), p.location);

        for code in codes {
            match self.registry[node].children {
                [Some(a), Some(b)] => {
                    node = if self.registry.side_code(a) == Some(code) { a } else { b };
                }
                _ => {
                    self.dock(index, Some(node), code.slot());
                    return;
                }
            }
        }
        self.dock(index, Some(node), DockSlot::Tab);
    }
}
