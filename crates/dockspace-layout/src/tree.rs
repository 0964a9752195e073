use dockspace_core::{DockStatus, Rect, Size, SplitDirection, Vec2};

use crate::panel::PanelIndex;
use crate::registry::Registry;

// ──────────────────────────────────────────────
// Tab groups
// ──────────────────────────────────────────────

impl Registry {
    pub fn is_container(&self, index: PanelIndex) -> bool {
        self[index].is_container()
    }

    /// Walk `prev_tab` links to the head of the group.
    pub fn first_tab(&self, index: PanelIndex) -> PanelIndex {
        let mut tab = index;
        while let Some(prev) = self[tab].prev_tab {
            tab = prev;
        }
        tab
    }

    pub fn last_tab(&self, index: PanelIndex) -> PanelIndex {
        let mut tab = index;
        while let Some(next) = self[tab].next_tab {
            tab = next;
        }
        tab
    }

    /// Every member of `index`'s tab group, head first.
    pub fn tab_group(&self, index: PanelIndex) -> Vec<PanelIndex> {
        let mut out = Vec::new();
        let mut tab = Some(self.first_tab(index));
        while let Some(t) = tab {
            out.push(t);
            tab = self[t].next_tab;
        }
        out
    }

    /// Make `index` the only active member of its group.
    pub(crate) fn set_active(&mut self, index: PanelIndex) {
        for tab in self.tab_group(index) {
            self[tab].active = tab == index;
        }
    }

    /// Assign `parent` to every member of the group.
    pub(crate) fn set_parent(&mut self, index: PanelIndex, parent: Option<PanelIndex>) {
        for tab in self.tab_group(index) {
            self[tab].parent = parent;
        }
    }

    /// A split without a parent, or the head of a docked group without one.
    pub fn is_docked_root(&self, index: PanelIndex) -> bool {
        let p = &self[index];
        p.parent.is_none()
            && (p.is_container() || (p.status == DockStatus::Docked && p.prev_tab.is_none()))
    }

    /// Descend through first children until a leaf is reached.
    pub fn first_leaf(&self, index: PanelIndex) -> PanelIndex {
        let mut node = index;
        while let Some(first) = self[node].children[0] {
            node = first;
        }
        node
    }
}

// ──────────────────────────────────────────────
// Split geometry
// ──────────────────────────────────────────────

impl Registry {
    fn children_of(&self, index: PanelIndex) -> (PanelIndex, PanelIndex) {
        match self[index].children {
            [Some(a), Some(b)] => (a, b),
            _ => panic!("panel {index} is not a split node"),
        }
    }

    /// A split is horizontal iff its first child lies left of its second.
    pub fn is_horizontal(&self, index: PanelIndex) -> bool {
        let (a, b) = self.children_of(index);
        self[a].pos.x < self[b].pos.x
    }

    pub fn direction(&self, index: PanelIndex) -> Option<SplitDirection> {
        if !self.is_container(index) {
            return None;
        }
        Some(if self.is_horizontal(index) {
            SplitDirection::Horizontal
        } else {
            SplitDirection::Vertical
        })
    }

    /// Smallest size the subtree at `index` can be laid out to.
    pub fn min_size(&self, index: PanelIndex, leaf_min: Size) -> Size {
        if !self.is_container(index) {
            return leaf_min;
        }
        let (a, b) = self.children_of(index);
        let s0 = self.min_size(a, leaf_min);
        let s1 = self.min_size(b, leaf_min);
        if self.is_horizontal(index) {
            Size::new(s0.width + s1.width, s0.height.max(s1.height))
        } else {
            Size::new(s0.width.max(s1.width), s0.height + s1.height)
        }
    }

    /// Place `index` and its tab siblings, then re-partition any children.
    pub(crate) fn set_pos_size(&mut self, index: PanelIndex, pos: Vec2, size: Size, leaf_min: Size) {
        for tab in self.tab_group(index) {
            let panel = &mut self[tab];
            panel.pos = pos;
            panel.size = size;
        }
        if self.is_container(index) {
            self.set_children_pos_size(index, pos, size, leaf_min);
        }
    }

    /// Partition `pos`/`size` between the two children in proportion to
    /// their previous extents along the split axis.
    pub(crate) fn set_children_pos_size(&mut self, index: PanelIndex, pos: Vec2, size: Size, leaf_min: Size) {
        let (a, b) = self.children_of(index);
        let horizontal = self.is_horizontal(index);
        let min0 = self.min_size(a, leaf_min);
        let min1 = self.min_size(b, leaf_min);
        let prev0 = self[a].size;
        let prev1 = self[b].size;

        if horizontal {
            let total = prev0.width + prev1.width;
            let mut w0 = if total > 0.0 {
                (size.width * prev0.width / total).trunc()
            } else {
                (size.width * 0.5).trunc()
            };
            if w0 < min0.width {
                w0 = min0.width;
            } else if size.width - w0 < min1.width {
                w0 = size.width - min1.width;
            }
            self.set_pos_size(a, pos, Size::new(w0, size.height), leaf_min);
            let w0 = self[a].size.width;
            self.set_pos_size(
                b,
                Vec2::new(pos.x + w0, pos.y),
                Size::new(size.width - w0, size.height),
                leaf_min,
            );
        } else {
            let total = prev0.height + prev1.height;
            let mut h0 = if total > 0.0 {
                (size.height * prev0.height / total).trunc()
            } else {
                (size.height * 0.5).trunc()
            };
            if h0 < min0.height {
                h0 = min0.height;
            } else if size.height - h0 < min1.height {
                h0 = size.height - min1.height;
            }
            self.set_pos_size(a, pos, Size::new(size.width, h0), leaf_min);
            let h0 = self[a].size.height;
            self.set_pos_size(
                b,
                Vec2::new(pos.x, pos.y + h0),
                Size::new(size.width, size.height - h0),
                leaf_min,
            );
        }
    }

    /// The grab handle on the boundary between a split's children.
    pub fn split_handle_rect(&self, index: PanelIndex, thickness: f32) -> Rect {
        let (a, _) = self.children_of(index);
        let node = &self[index];
        let first = self[a].size;
        if self.is_horizontal(index) {
            Rect::new(node.pos.x + first.width, node.pos.y, thickness, node.size.height)
        } else {
            Rect::new(node.pos.x, node.pos.y + first.height, node.size.width, thickness)
        }
    }

    /// Move a split's boundary by `delta` along its axis, clamped so neither
    /// child shrinks below its minimum, then re-lay out both children.
    pub(crate) fn resize_split(&mut self, index: PanelIndex, delta: f32, leaf_min: Size) {
        let (a, b) = self.children_of(index);
        let horizontal = self.is_horizontal(index);
        let min0 = self.min_size(a, leaf_min);
        let min1 = self.min_size(b, leaf_min);
        let node_pos = self[index].pos;
        let node_size = self[index].size;
        let mut size0 = self[a].size;
        let mut size1 = self[b].size;

        let (pos0, pos1) = if horizontal {
            let d = delta.max(-(size0.width - min0.width)).min(size1.width - min1.width);
            size0.width += d;
            size1.width -= d;
            size0.height = node_size.height;
            size1.height = node_size.height;
            size1.width = min1.width.max(node_size.width - size0.width);
            size0.width = min0.width.max(node_size.width - size1.width);
            (node_pos, Vec2::new(node_pos.x + size0.width, node_pos.y))
        } else {
            let d = delta.max(-(size0.height - min0.height)).min(size1.height - min1.height);
            size0.height += d;
            size1.height -= d;
            size0.width = node_size.width;
            size1.width = node_size.width;
            size1.height = min1.height.max(node_size.height - size0.height);
            size0.height = min0.height.max(node_size.height - size1.height);
            (node_pos, Vec2::new(node_pos.x, node_pos.y + size0.height))
        };

        self.set_pos_size(a, pos0, size0, leaf_min);
        self.set_pos_size(b, pos1, size1, leaf_min);
    }
}
