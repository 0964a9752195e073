use dockspace_core::{CursorIcon, DockStatus, MouseButton, StyleColor, Ui};

use crate::DockContext;

impl DockContext {
    /// Lay out docked roots over the workspace and run the splitter
    /// handles. Does nothing after the first call of a frame.
    pub fn update_splits<U: Ui + ?Sized>(&mut self, ui: &mut U) {
        let frame = ui.frame_index();
        if self.last_split_frame == Some(frame) {
            return;
        }
        self.last_split_frame = Some(frame);

        ui.send_to_back();

        let leaf_min = self.leaf_min_size();
        for index in self.registry.indices() {
            if self.registry.is_docked_root(index) {
                let size = self
                    .workspace
                    .size()
                    .max(self.registry.min_size(index, leaf_min));
                self.registry
                    .set_pos_size(index, self.workspace.pos(), size, leaf_min);
            }
        }

        let pointer = ui.pointer();
        let color = ui.style_color(StyleColor::Button);
        let hovered_color = ui.style_color(StyleColor::ButtonHovered);
        let thickness = self.config.splitter_thickness;

        for index in self.registry.indices() {
            if !self.registry.is_container(index) {
                continue;
            }
            if !pointer.is_down(MouseButton::Left) {
                self.registry[index].status = DockStatus::Docked;
            }

            let horizontal = self.registry.is_horizontal(index);
            let handle = self.registry.split_handle_rect(index, thickness);
            let response = ui.invisible_button(&format!("split#{}", index.index()), handle);

            let delta = if self.registry[index].status == DockStatus::Dragged {
                if horizontal {
                    pointer.delta.x
                } else {
                    pointer.delta.y
                }
            } else {
                0.0
            };
            if delta != 0.0 {
                log::trace!("resizing split {index} by {delta}");
            }
            self.registry.resize_split(index, delta, leaf_min);

            if response.hovered {
                ui.set_mouse_cursor(if horizontal {
                    CursorIcon::ResizeEw
                } else {
                    CursorIcon::ResizeNs
                });
                if pointer.is_clicked(MouseButton::Left) {
                    self.registry[index].status = DockStatus::Dragged;
                }
            }
            ui.painter()
                .rect_filled(handle, if response.hovered { hovered_color } else { color });
        }
    }
}
