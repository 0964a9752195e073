use dockspace_core::{DockSlot, DockStatus, Size, SplitDirection, Vec2};

use crate::panel::{Panel, PanelIndex};
use crate::DockContext;

// ──────────────────────────────────────────────
// Docking and undocking
// ──────────────────────────────────────────────

impl DockContext {
    /// Attach a free-standing `panel` relative to `dest`.
    ///
    /// With no destination the panel becomes a docked root covering the
    /// workspace. `Tab` appends it to `dest`'s tab group; the edge slots
    /// split `dest` in two. `Float` and `None` leave it floating. The panel
    /// is made active either way.
    pub fn dock(&mut self, panel: PanelIndex, dest: Option<PanelIndex>, slot: DockSlot) {
        {
            let p = &self.registry[panel];
            assert!(p.parent.is_none(), "docking panel {panel} that still has a parent");
            assert!(
                p.prev_tab.is_none() && p.next_tab.is_none(),
                "docking panel {panel} that is still in a tab group"
            );
            assert!(!p.is_container(), "docking split node {panel}");
        }

        match dest {
            None => {
                let leaf_min = self.leaf_min_size();
                self.registry[panel].status = DockStatus::Docked;
                self.registry
                    .set_pos_size(panel, self.workspace.pos(), self.workspace.size(), leaf_min);
                log::debug!("docked {} to the workspace", self.describe(panel));
            }
            Some(dest) => {
                assert!(dest != panel, "docking panel {panel} onto itself");
                match slot {
                    DockSlot::Tab => self.dock_tab(panel, dest),
                    slot if slot.is_edge() => self.dock_split(panel, dest, slot),
                    _ => self.registry[panel].status = DockStatus::Float,
                }
                log::debug!(
                    "docked {} {:?} of {}",
                    self.describe(panel),
                    slot,
                    self.describe(dest)
                );
            }
        }

        self.registry.set_active(panel);
    }

    fn dock_tab(&mut self, panel: PanelIndex, dest: PanelIndex) {
        // Split nodes never join a tab group; tab onto their first leaf.
        let dest = self.registry.first_leaf(dest);
        let last = self.registry.last_tab(dest);
        let (parent, pos, size) = {
            let d = &self.registry[dest];
            (d.parent, d.pos, d.size)
        };

        self.registry[last].next_tab = Some(panel);
        let p = &mut self.registry[panel];
        p.prev_tab = Some(last);
        p.next_tab = None;
        p.parent = parent;
        p.pos = pos;
        p.size = size;
        p.status = DockStatus::Docked;
    }

    fn dock_split(&mut self, panel: PanelIndex, dest: PanelIndex, slot: DockSlot) {
        let first = self.registry.first_tab(dest);
        let (dest_parent, pos, size) = {
            let d = &self.registry[dest];
            (d.parent, d.pos, d.size)
        };

        let mut split = Panel::split(pos, size);
        split.parent = dest_parent;
        split.children = [Some(first), Some(panel)];
        let split = self.registry.insert(split);

        if let Some(grandparent) = dest_parent {
            for child in self.registry[grandparent].children.iter_mut() {
                if *child == Some(first) {
                    *child = Some(split);
                }
            }
        }

        self.registry.set_parent(first, Some(split));
        let p = &mut self.registry[panel];
        p.parent = Some(split);
        p.status = DockStatus::Docked;

        self.bisect(split, first, panel, slot);
    }

    /// Give `panel` the `slot` half of `split` and `dest` the other half,
    /// then order the children so the first is top/left.
    fn bisect(&mut self, split: PanelIndex, dest: PanelIndex, panel: PanelIndex, slot: DockSlot) {
        let leaf_min = self.leaf_min_size();
        let (pos, size) = {
            let s = &self.registry[split];
            (s.pos, s.size)
        };
        let (second, half) = match slot.direction() {
            Some(SplitDirection::Horizontal) => (
                Vec2::new(pos.x + size.width * 0.5, pos.y),
                Size::new(size.width * 0.5, size.height),
            ),
            _ => (
                Vec2::new(pos.x, pos.y + size.height * 0.5),
                Size::new(size.width, size.height * 0.5),
            ),
        };
        let (dest_pos, panel_pos) = match slot {
            DockSlot::Left | DockSlot::Top => (second, pos),
            _ => (pos, second),
        };

        let p = &mut self.registry[panel];
        p.pos = panel_pos;
        p.size = half;
        self.registry.set_pos_size(dest, dest_pos, half, leaf_min);

        if let [Some(a), Some(b)] = self.registry[split].children {
            let (pa, pb) = (self.registry[a].pos, self.registry[b].pos);
            if pb.x < pa.x || pb.y < pa.y {
                self.registry[split].children = [Some(b), Some(a)];
            }
        }
    }

    /// Detach `panel` from its tab group and split tree. Its status is left
    /// for the caller to set.
    ///
    /// A tab leaves its group and hands the active flag to a neighbour. A
    /// sole occupant of a split side takes the split node down with it: the
    /// surviving child is promoted into the node's place and geometry.
    pub fn undock(&mut self, panel: PanelIndex) {
        assert!(
            !self.registry.is_container(panel),
            "undocking split node {panel}"
        );
        let (prev, next, parent) = {
            let p = &self.registry[panel];
            (p.prev_tab, p.next_tab, p.parent)
        };

        if let Some(prev) = prev {
            self.registry[prev].next_tab = next;
            if let Some(next) = next {
                self.registry[next].prev_tab = Some(prev);
            }
            self.registry.set_active(prev);
        } else if let Some(next) = next {
            self.registry[next].prev_tab = None;
            self.registry.set_active(next);
            if let Some(parent) = parent {
                for child in self.registry[parent].children.iter_mut() {
                    if *child == Some(panel) {
                        *child = Some(next);
                    }
                }
            }
        } else if let Some(parent) = parent {
            self.collapse(parent, panel);
        }

        let p = &mut self.registry[panel];
        p.parent = None;
        p.prev_tab = None;
        p.next_tab = None;
        log::debug!("undocked {}", self.describe(panel));
    }

    /// Remove split `container`, whose child `leaving` is going away, and
    /// promote the other child into its place.
    fn collapse(&mut self, container: PanelIndex, leaving: PanelIndex) {
        let leaf_min = self.leaf_min_size();
        let (survivor, grandparent, pos, size) = {
            let c = &self.registry[container];
            let survivor = match c.children {
                [Some(a), Some(b)] if a == leaving => b,
                [Some(a), Some(_)] => a,
                _ => panic!("split node {container} is missing a child"),
            };
            (survivor, c.parent, c.pos, c.size)
        };

        if let Some(grandparent) = grandparent {
            for child in self.registry[grandparent].children.iter_mut() {
                if *child == Some(container) {
                    *child = Some(survivor);
                }
            }
        }
        self.registry.set_parent(survivor, grandparent);
        self.registry.set_pos_size(survivor, pos, size, leaf_min);

        if self.next_parent == Some(container) {
            self.next_parent = None;
        }
        self.registry.remove(container);
        log::debug!("collapsed split {container} into {survivor}");
    }

    /// The docked top-level node, if any: a root split or a root leaf.
    pub fn root_dock(&self) -> Option<PanelIndex> {
        self.registry
            .iter()
            .map(|(i, _)| i)
            .find(|&i| self.registry.is_docked_root(i))
    }

    /// Float every docked leaf that has gone unseen for too long, counting
    /// frames up to and including `completed`. Runs once per completed frame.
    pub(crate) fn check_liveness(&mut self, completed: u64) {
        if self.last_liveness_check == Some(completed) {
            return;
        }
        self.last_liveness_check = Some(completed);

        for index in self.registry.indices() {
            let Some(p) = self.registry.get(index) else {
                continue;
            };
            if p.is_container() || p.status == DockStatus::Float {
                continue;
            }
            let missed = completed.saturating_sub(p.last_frame_seen);
            let missed = u32::try_from(missed).unwrap_or(u32::MAX);
            self.registry[index].missed_frames = missed;

            if missed > self.config.max_missed_frames {
                log::debug!(
                    "{} not seen for {missed} frames, floating it",
                    self.describe(index)
                );
                self.undock(index);
                self.registry[index].status = DockStatus::Float;
            }
        }
    }

    /// Dock a newly shown panel with the slot hinted by the host, next to
    /// the preferred parent or else the root.
    pub(crate) fn auto_dock(&mut self, panel: PanelIndex, slot: DockSlot) {
        {
            let p = &self.registry[panel];
            if p.status == DockStatus::Docked || p.parent.is_some() {
                return;
            }
        }
        let preferred = self.next_parent.filter(|&n| {
            n != panel
                && self
                    .registry
                    .get(n)
                    .is_some_and(|p| p.status == DockStatus::Docked)
        });
        match preferred.or_else(|| self.root_dock()) {
            Some(target) if target != panel => self.dock(panel, Some(target), slot),
            _ => {}
        }
    }

    pub(crate) fn describe(&self, index: PanelIndex) -> String {
        match self.registry.get(index) {
            Some(p) if !p.is_container() => format!("panel {:?} {index}", p.display_label()),
            Some(_) => format!("split {index}"),
            None => format!("removed {index}"),
        }
    }
}
