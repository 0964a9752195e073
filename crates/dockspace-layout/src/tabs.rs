use dockspace_core::{
    DockStatus, MouseButton, Path, Rect, Size, StyleColor, Ui, Vec2, WindowFlags,
};

use crate::panel::PanelIndex;
use crate::DockContext;

// ──────────────────────────────────────────────
// Tab bar
// ──────────────────────────────────────────────

impl DockContext {
    /// Draw the tab strip of the group headed by `head`. Returns true when
    /// the close button of the active tab was clicked.
    pub(crate) fn tab_bar<U: Ui + ?Sized>(
        &mut self,
        ui: &mut U,
        head: PanelIndex,
        close_button: bool,
    ) -> bool {
        let metrics = ui.metrics();
        let line_height = metrics.line_height;
        let button = self.config.button_size;
        let (pos, size, head_id) = {
            let p = &self.registry[head];
            (p.pos, p.size, p.id)
        };
        let bar = Rect::new(pos.x, pos.y, size.width, self.tab_bar_height());

        let mut closed = false;
        if ui.begin_child(&format!("tabs{head_id}"), bar, true, WindowFlags::empty()) {
            let pointer = ui.pointer();
            let text_color = ui.style_color(StyleColor::Text);
            let color = ui.style_color(StyleColor::FrameBg);
            let hovered_color = ui.style_color(StyleColor::FrameBgHovered);
            let active_color = ui.style_color(StyleColor::FrameBgActive);

            let tabs = self.registry.tab_group(head);
            let y = bar.y + metrics.window_padding.y * 0.5;
            let mut x = bar.x + metrics.window_padding.x;
            if tabs.len() > 1 {
                self.tab_list_button(ui, head_id, &tabs, Rect::new(x, y, button, button));
                x += button;
            }

            for &tab in &tabs {
                x += self.config.tab_spacing;
                let (id, text) = {
                    let p = &self.registry[tab];
                    (p.id, p.display_label().to_string())
                };
                let mut tab_size = Size::new(ui.text_width(&text), line_height);
                let tab_rect = Rect::new(x, y, tab_size.width, tab_size.height);

                let response = ui.invisible_button(&format!("tab#{id}"), tab_rect);
                if response.clicked {
                    self.registry.set_active(tab);
                    self.next_parent = Some(tab);
                }
                let mut dragged = false;
                if response.active && pointer.is_dragging(MouseButton::Left) {
                    self.drag_offset = pointer.position - self.registry[tab].pos;
                    self.undock(tab);
                    self.registry[tab].status = DockStatus::Dragged;
                    log::trace!("tore off {}", self.describe(tab));
                    dragged = true;
                }

                let active = self.registry[tab].active;
                if active && close_button {
                    let close = Rect::new(
                        x + tab_size.width + metrics.item_spacing.x,
                        y,
                        button,
                        button,
                    );
                    if ui.invisible_button(&format!("close#{id}"), close).clicked {
                        closed = true;
                    }
                    let c = close.center();
                    let painter = ui.painter();
                    painter.line(c + Vec2::new(-3.5, -3.5), c + Vec2::new(3.5, 3.5), text_color);
                    painter.line(c + Vec2::new(3.5, -3.5), c + Vec2::new(-3.5, 3.5), text_color);
                    tab_size.width += button + metrics.item_spacing.x;
                }

                let fill = if response.hovered {
                    hovered_color
                } else if active {
                    active_color
                } else {
                    color
                };
                let outline = self.tab_outline(tab_rect.pos(), tab_size);
                let painter = ui.painter();
                painter.convex_fill(outline.points(), fill);
                painter.text(tab_rect.pos() + Vec2::new(0.0, 1.0), text_color, &text);

                x += tab_size.width;
                if dragged {
                    break;
                }
            }

            let baseline = y + line_height;
            ui.painter()
                .line(Vec2::new(pos.x, baseline), Vec2::new(pos.x + size.width, baseline), color);
        }
        ui.end_child();
        closed
    }

    /// Trapezoid with bezier shoulders hugging a tab of `size` at `p`.
    fn tab_outline(&self, p: Vec2, size: Size) -> Path {
        let segments = self.config.bezier_segments;
        let (w, h) = (size.width, size.height);
        let spacing = self.config.tab_spacing;
        let mut path = Path::new();
        path.line_to(p + Vec2::new(-spacing, h));
        path.bezier_to(
            p + Vec2::new(-spacing + 5.0, h),
            p + Vec2::new(-5.0, 0.0),
            p,
            segments,
        );
        path.line_to(p + Vec2::new(w, 0.0));
        path.bezier_to(
            p + Vec2::new(w + 5.0, 0.0),
            p + Vec2::new(w + spacing - 5.0, h),
            p + Vec2::new(w + spacing, h),
            segments,
        );
        path
    }

    /// The drop-down listing every tab of a group, shown when it has more
    /// than one member.
    fn tab_list_button<U: Ui + ?Sized>(
        &mut self,
        ui: &mut U,
        head_id: u32,
        tabs: &[PanelIndex],
        rect: Rect,
    ) {
        let popup = format!("tab_list_popup#{head_id}");
        let response = ui.invisible_button(&format!("list#{head_id}"), rect);
        if response.clicked {
            ui.open_popup(&popup);
        }
        if ui.begin_popup(&popup) {
            for &tab in tabs {
                let text = self.registry[tab].display_label().to_string();
                if ui.selectable(&text) {
                    self.registry.set_active(tab);
                    self.next_parent = Some(tab);
                }
            }
            ui.end_popup();
        }

        let color = ui.style_color(if response.hovered {
            StyleColor::FrameBgActive
        } else {
            StyleColor::Text
        });
        let min = rect.min();
        let cx = rect.center().x;
        let painter = ui.painter();
        painter.rect_filled(
            Rect::from_min_max(Vec2::new(cx - 4.0, min.y + 3.0), Vec2::new(cx + 4.0, min.y + 5.0)),
            color,
        );
        painter.triangle_filled(
            Vec2::new(cx - 4.0, min.y + 7.0),
            Vec2::new(cx + 4.0, min.y + 7.0),
            Vec2::new(cx, min.y + 12.0),
            color,
        );
    }
}
