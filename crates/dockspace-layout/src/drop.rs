use dockspace_core::{
    DockSlot, DockStatus, MouseButton, Rect, StyleColor, Ui, Vec2, WindowFlags,
};

use crate::config::DockConfig;
use crate::panel::PanelIndex;
use crate::DockContext;

// ──────────────────────────────────────────────
// Slot geometry
// ──────────────────────────────────────────────

/// Drop target for `slot` around the centre of `parent`.
pub fn slot_rect(parent: Rect, slot: DockSlot, config: &DockConfig) -> Rect {
    let c = parent.center();
    let half = config.slot_half_extent;
    let inner = config.slot_inner_offset;
    let outer = config.slot_outer_offset;
    let (min, max) = match slot {
        DockSlot::Top => (Vec2::new(c.x - half, c.y - outer), Vec2::new(c.x + half, c.y - inner)),
        DockSlot::Right => (Vec2::new(c.x + inner, c.y - half), Vec2::new(c.x + outer, c.y + half)),
        DockSlot::Bottom => (Vec2::new(c.x - half, c.y + inner), Vec2::new(c.x + half, c.y + outer)),
        DockSlot::Left => (Vec2::new(c.x - outer, c.y - half), Vec2::new(c.x - inner, c.y + half)),
        _ => (Vec2::new(c.x - half, c.y - half), Vec2::new(c.x + half, c.y + half)),
    };
    Rect::from_min_max(min, max)
}

/// Drop target for an edge `slot` just inside the border of `parent`.
/// Only edge slots have a border target.
pub fn slot_rect_on_border(parent: Rect, slot: DockSlot, config: &DockConfig) -> Option<Rect> {
    let c = parent.center();
    let min = parent.min();
    let max = parent.max();
    let half = config.slot_half_extent;
    let near = config.border_slot_margin;
    let far = near + (config.slot_outer_offset - config.slot_inner_offset);
    let (a, b) = match slot {
        DockSlot::Top => (Vec2::new(c.x - half, min.y + near), Vec2::new(c.x + half, min.y + far)),
        DockSlot::Left => (Vec2::new(min.x + near, c.y - half), Vec2::new(min.x + far, c.y + half)),
        DockSlot::Bottom => (Vec2::new(c.x - half, max.y - far), Vec2::new(c.x + half, max.y - near)),
        DockSlot::Right => (Vec2::new(max.x - far, c.y - half), Vec2::new(max.x - near, c.y + half)),
        _ => return None,
    };
    Some(Rect::from_min_max(a, b))
}

/// The part of `rect` a panel would occupy if dropped on `slot`.
pub fn docked_rect(rect: Rect, slot: DockSlot) -> Rect {
    let half_w = rect.width * 0.5;
    let half_h = rect.height * 0.5;
    match slot {
        DockSlot::Top => Rect::new(rect.x, rect.y, rect.width, half_h),
        DockSlot::Right => Rect::new(rect.x + half_w, rect.y, half_w, rect.height),
        DockSlot::Bottom => Rect::new(rect.x, rect.y + half_h, rect.width, half_h),
        DockSlot::Left => Rect::new(rect.x, rect.y, half_w, rect.height),
        _ => rect,
    }
}

// ──────────────────────────────────────────────
// Drag handling
// ──────────────────────────────────────────────

impl DockContext {
    /// The docked leaf under `position`, in registry order.
    pub fn dock_at(&self, position: Vec2) -> Option<PanelIndex> {
        self.registry.iter().find_map(|(i, p)| {
            let hit = p.status == DockStatus::Docked
                && !p.is_container()
                && p.rect().contains(position);
            hit.then_some(i)
        })
    }

    /// One frame of a panel following the pointer: draw the drop targets
    /// and dock, float or keep dragging depending on where it is released.
    pub(crate) fn handle_drag<U: Ui + ?Sized>(&mut self, ui: &mut U, index: PanelIndex) {
        let pointer = ui.pointer();
        let dest = self.dock_at(pointer.position);

        ui.begin_window(
            "##Overlay",
            None,
            Rect::default(),
            WindowFlags::TOOLTIP
                | WindowFlags::NO_TITLE_BAR
                | WindowFlags::NO_MOVE
                | WindowFlags::NO_RESIZE
                | WindowFlags::NO_SAVED_SETTINGS
                | WindowFlags::ALWAYS_AUTO_RESIZE,
        );
        ui.painter().push_clip_fullscreen();

        self.registry[index].pos = pointer.position - self.drag_offset;

        let mut docked = false;
        if let Some(dest) = dest {
            let rect = self.registry[dest].rect();
            docked = self.dock_slots(ui, index, Some(dest), rect, false);
        }
        if !docked {
            let workspace = self.workspace;
            docked = self.dock_slots(ui, index, None, workspace, true);
        }

        if !docked {
            let ghost = ui.style_color(StyleColor::FrameBg).with_alpha(self.config.ghost_alpha);
            let rect = self.registry[index].rect();
            ui.painter().rect_filled(rect, ghost);
        }
        ui.painter().pop_clip();

        if !docked && !pointer.is_down(MouseButton::Left) {
            let p = &mut self.registry[index];
            p.status = DockStatus::Float;
            p.location.clear();
            self.registry.set_active(index);
            log::debug!("dropped {} as floating", self.describe(index));
        }
        ui.end_window();
    }

    /// Draw the drop slots of `rect` and dock `index` if the pointer was
    /// released over one. Border slots dock against the root.
    fn dock_slots<U: Ui + ?Sized>(
        &mut self,
        ui: &mut U,
        index: PanelIndex,
        dest: Option<PanelIndex>,
        rect: Rect,
        on_border: bool,
    ) -> bool {
        let pointer = ui.pointer();
        let color = ui.style_color(StyleColor::Button);
        let hovered_color = ui.style_color(StyleColor::ButtonHovered);
        let slots: &[DockSlot] = if on_border {
            &DockSlot::BORDER_SLOTS
        } else {
            &DockSlot::PANEL_SLOTS
        };

        for &slot in slots {
            let target = if on_border {
                slot_rect_on_border(rect, slot, &self.config)
            } else {
                Some(slot_rect(rect, slot, &self.config))
            };
            let Some(target) = target else {
                continue;
            };
            let hovered = target.contains(pointer.position);
            ui.painter()
                .rect_filled(target, if hovered { hovered_color } else { color });
            if !hovered {
                continue;
            }

            if !pointer.is_down(MouseButton::Left) {
                let dest = dest.or_else(|| self.root_dock());
                self.dock(index, dest, slot);
                return true;
            }
            ui.painter().rect_filled(docked_rect(rect, slot), color);
        }
        false
    }
}
