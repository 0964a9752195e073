// Scripted session: feeds synthetic pointer events through the tracker and
// drives a dockspace with three panels in the headless host.

use dockspace_core::{DockSlot, InputEvent, MouseButton, Rect, Ui, Vec2, WindowFlags};
use dockspace_host::{HeadlessUi, PointerTracker};
use dockspace_layout::{slot_rect, DockContext, PanelInfo};

use crate::settings::DemoSettings;

pub const PANELS: [&str; 3] = ["Dock 1", "Dock 2", "Dock 3"];

pub struct Session {
    tracker: PointerTracker,
    ui: HeadlessUi,
    ctx: DockContext,
    opened: [bool; PANELS.len()],
    /// Slot hinted to the host before the panel at the given position.
    pending_hint: Option<(usize, DockSlot)>,
    show_debug_view: bool,
}

impl Session {
    pub fn new(settings: &DemoSettings) -> Self {
        let display = settings.display.size();
        Self {
            tracker: PointerTracker::new(display),
            ui: HeadlessUi::new(display),
            ctx: DockContext::with_config(settings.dock.clone()),
            opened: [true; PANELS.len()],
            pending_hint: Some((1, DockSlot::Bottom)),
            show_debug_view: settings.show_debug_view,
        }
    }

    pub fn context(&self) -> &DockContext {
        &self.ctx
    }

    /// Run one frame over the events queued since the last one.
    pub fn frame(&mut self, debug_view: bool) {
        let pointer = self.tracker.new_frame();
        let display = self.tracker.display_size();
        self.ui.set_display_size(display);
        self.ui.begin_frame(pointer);

        let flags = WindowFlags::NO_TITLE_BAR | WindowFlags::NO_MOVE | WindowFlags::NO_RESIZE;
        let screen = Rect::new(0.0, 0.0, display.width, display.height);
        self.ui.begin_window("Dock Demo", None, screen, flags);
        self.ctx.begin_dockspace(&mut self.ui);

        for (i, label) in PANELS.iter().enumerate() {
            if let Some((at, slot)) = self.pending_hint {
                if at == i {
                    self.ctx.set_next_dock_slot(slot);
                    self.pending_hint = None;
                }
            }
            if self
                .ctx
                .begin_panel(&mut self.ui, label, Some(&mut self.opened[i]), WindowFlags::empty())
            {
                self.ui.text(&format!("Content of {label}"));
            }
            self.ctx.end_panel(&mut self.ui);
        }

        self.ctx.end_dockspace(&mut self.ui);
        self.ui.end_window();

        if debug_view {
            self.ctx.debug_view(&mut self.ui);
            for line in self.ui.text_lines() {
                log::debug!("{line}");
            }
        }
    }

    fn pointer_to(&mut self, position: Vec2) {
        self.tracker.handle(InputEvent::MouseMove { position });
    }

    fn press(&mut self, position: Vec2) {
        self.tracker.handle(InputEvent::MouseDown {
            position,
            button: MouseButton::Left,
        });
    }

    fn release(&mut self, position: Vec2) {
        self.tracker.handle(InputEvent::MouseUp {
            position,
            button: MouseButton::Left,
        });
    }

    /// Grab a floating panel by its title bar and drop it on the right slot
    /// of a docked one.
    fn drag_to_right_of(&mut self, dragged: &str, target: &str) {
        let (Some(dragged), Some(target)) = (self.ctx.find(dragged), self.ctx.find(target)) else {
            log::warn!("drag skipped: panel not registered");
            return;
        };
        let (Some(from), Some(onto)) = (self.ctx.panel(dragged), self.ctx.panel(target)) else {
            return;
        };
        let from = from.rect();
        let grab = Vec2::new(from.x + from.width * 0.7, from.y + 5.0);
        let drop = slot_rect(onto.rect(), DockSlot::Right, self.ctx.config()).center();
        log::info!("dragging from ({}, {}) to ({}, {})", grab.x, grab.y, drop.x, drop.y);

        self.pointer_to(grab);
        self.frame(false);
        self.press(grab);
        self.frame(false);
        self.pointer_to(drop);
        self.frame(false);
        self.release(drop);
        self.frame(false);
    }

    /// Close a panel through its host flag for one frame, then reopen it.
    fn close_and_reopen(&mut self, at: usize) {
        self.opened[at] = false;
        self.frame(false);
        self.opened[at] = true;
        self.frame(false);
    }

    /// The whole script: initial layout, a drag onto a slot, a close and
    /// reopen, then a settle frame.
    pub fn run(&mut self) -> Vec<PanelInfo> {
        self.pointer_to(Vec2::new(1.0, 1.0));
        self.frame(false);
        self.frame(false);
        self.drag_to_right_of(PANELS[2], PANELS[0]);
        self.close_and_reopen(1);
        self.frame(self.show_debug_view);
        self.ctx.snapshot()
    }
}
