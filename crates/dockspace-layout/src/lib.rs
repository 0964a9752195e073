// Docking layout engine.
// Panels live in an arena registry; docked ones form a binary split tree
// whose leaves are tab groups. The host drives it frame by frame through
// dockspace_core::Ui.

mod config;
mod debug;
mod dock;
mod drop;
mod location;
mod panel;
mod registry;
mod splits;
mod tabs;
mod tests;
mod tree;

pub use config::DockConfig;
pub use debug::PanelInfo;
pub use drop::{docked_rect, slot_rect, slot_rect_on_border};
pub use panel::{LocationPath, Panel, PanelIndex, SideCode};
pub use registry::Registry;

use dockspace_core::{
    DockSlot, DockStatus, Rect, Size, Ui, UiMetrics, Vec2, WindowFlags,
};

// ──────────────────────────────────────────────
// DockContext
// ──────────────────────────────────────────────

/// What `end_panel` has to close for the panel begun last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndAction {
    None,
    End,
    EndChild,
}

pub struct DockContext {
    registry: Registry,
    config: DockConfig,
    /// Pointer offset from the dragged panel's origin.
    drag_offset: Vec2,
    current: Option<PanelIndex>,
    /// Where a hinted new panel docks; the last begun or clicked panel.
    next_parent: Option<PanelIndex>,
    next_dock_slot: Option<DockSlot>,
    last_split_frame: Option<u64>,
    /// Last completed frame the liveness check ran for.
    last_liveness_check: Option<u64>,
    end_action: EndAction,
    in_panel: bool,
    workspace: Rect,
    metrics: UiMetrics,
}

impl DockContext {
    pub fn new() -> Self {
        Self::with_config(DockConfig::default())
    }

    pub fn with_config(config: DockConfig) -> Self {
        Self {
            registry: Registry::new(),
            config,
            drag_offset: Vec2::ZERO,
            current: None,
            next_parent: None,
            next_dock_slot: None,
            last_split_frame: None,
            last_liveness_check: None,
            end_action: EndAction::None,
            in_panel: false,
            workspace: Rect::default(),
            metrics: UiMetrics::default(),
        }
    }

    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn find(&self, label: &str) -> Option<PanelIndex> {
        self.registry.find(label)
    }

    pub fn panel(&self, index: PanelIndex) -> Option<&Panel> {
        self.registry.get(index)
    }

    /// The area docked roots are laid out in, as of the last
    /// [`DockContext::begin_dockspace`].
    pub fn workspace(&self) -> Rect {
        self.workspace
    }

    /// The panel between `begin_panel` and `end_panel`, if any.
    pub fn current(&self) -> Option<PanelIndex> {
        self.current
    }

    pub(crate) fn leaf_min_size(&self) -> Size {
        let min = self.config.min_leaf_size;
        Size::new(min.width, min.height + self.metrics.line_height)
    }

    /// Height of the strip above a docked panel that holds its tabs.
    pub(crate) fn tab_bar_height(&self) -> f32 {
        self.metrics.line_height + self.metrics.window_padding.y
    }

    // ── Frame surface ───────────────────────────

    /// Open the region docked panels are laid out in: the remaining content
    /// area of the host's current window.
    pub fn begin_dockspace<U: Ui + ?Sized>(&mut self, ui: &mut U) -> bool {
        let rect = ui.content_region();
        self.workspace = rect;
        self.metrics = ui.metrics();
        ui.begin_child(
            "###workspace",
            rect,
            false,
            WindowFlags::NO_SCROLLBAR | WindowFlags::NO_SCROLL_WITH_MOUSE,
        )
    }

    /// Close the dockspace. Every panel of the frame has been begun by now,
    /// so the frame counts as completed for the liveness check.
    pub fn end_dockspace<U: Ui + ?Sized>(&mut self, ui: &mut U) {
        ui.end_child();
        self.check_liveness(ui.frame_index());
    }

    /// Hint the slot the next newly shown panel docks into.
    pub fn set_next_dock_slot(&mut self, slot: DockSlot) {
        self.next_dock_slot = Some(slot);
    }

    /// Begin the panel named `label`. Returns true when its content should
    /// be submitted; [`DockContext::end_panel`] must be called either way.
    ///
    /// `opened` is the host's visibility flag. When given, a close button is
    /// shown on the panel's tab and cleared when it is clicked.
    pub fn begin_panel<U: Ui + ?Sized>(
        &mut self,
        ui: &mut U,
        label: &str,
        mut opened: Option<&mut bool>,
        extra_flags: WindowFlags,
    ) -> bool {
        self.in_panel = true;
        self.end_action = EndAction::None;
        self.metrics = ui.metrics();
        let next_slot = self.next_dock_slot.take();
        let frame = ui.frame_index();
        let wants_open = opened.as_deref().map_or(true, |o| *o);

        let area = if self.workspace.is_empty() {
            Rect::from_pos_size(Vec2::ZERO, ui.display_size())
        } else {
            self.workspace
        };
        let (index, created) = self.registry.get_or_create(label, wants_open, area);
        if created {
            log::debug!(
                "registered {} as {:?}",
                self.describe(index),
                self.registry[index].status
            );
        }

        if !self.registry[index].opened && wants_open {
            self.try_dock_to_stored_location(index);
        }

        let (was_opened, first) = {
            let p = &mut self.registry[index];
            p.last_frame_seen = frame;
            p.missed_frames = 0;
            if p.label != label {
                p.label = label.to_string();
            }
            let state = (p.opened, p.first);
            p.first = false;
            state
        };
        if first {
            if let Some(o) = opened.as_deref_mut() {
                *o = was_opened;
            }
        }

        if !opened.as_deref().map_or(true, |o| *o) {
            if self.registry[index].status != DockStatus::Float {
                self.fill_location(index);
                self.undock(index);
                self.registry[index].status = DockStatus::Float;
            }
            self.registry[index].opened = false;
            return false;
        }
        self.registry[index].opened = true;

        self.check_liveness(frame.saturating_sub(1));

        if first || !was_opened {
            if let Some(slot) = next_slot {
                self.auto_dock(index, slot);
            }
            self.next_parent = Some(index);
        }

        self.current = Some(index);
        if self.registry[index].status == DockStatus::Dragged {
            self.handle_drag(ui, index);
        }

        if self.registry[index].status == DockStatus::Float {
            let rect = self.registry[index].rect();
            let flags = WindowFlags::NO_COLLAPSE | WindowFlags::SHOW_BORDERS | extra_flags;
            let response = ui.begin_window(label, opened, rect, flags);
            self.end_action = EndAction::End;

            let p = &mut self.registry[index];
            p.pos = response.rect.pos();
            p.size = response.rect.size();
            if response.moving {
                self.drag_offset = ui.pointer().position - p.pos;
                self.undock(index);
                self.registry[index].status = DockStatus::Dragged;
                log::trace!("started dragging {}", self.describe(index));
            }
            return response.visible;
        }

        {
            let p = &self.registry[index];
            if !p.active && p.status != DockStatus::Dragged {
                return false;
            }
        }
        self.end_action = EndAction::EndChild;

        self.update_splits(ui);

        let head = self.registry.first_tab(index);
        if self.tab_bar(ui, head, opened.is_some()) {
            self.fill_location(index);
            if let Some(o) = opened.as_deref_mut() {
                *o = false;
            }
        }

        let bar = self.tab_bar_height();
        let p = &self.registry[index];
        let content = Rect::new(
            p.pos.x,
            p.pos.y + bar,
            p.size.width,
            (p.size.height - bar).max(0.0),
        );
        let flags = WindowFlags::NO_TITLE_BAR
            | WindowFlags::NO_RESIZE
            | WindowFlags::NO_MOVE
            | WindowFlags::NO_COLLAPSE
            | WindowFlags::NO_SAVED_SETTINGS
            | WindowFlags::NO_BRING_TO_FRONT_ON_FOCUS
            | extra_flags;
        ui.begin_child(label, content, true, flags)
    }

    /// Close whatever the matching `begin_panel` opened.
    pub fn end_panel<U: Ui + ?Sized>(&mut self, ui: &mut U) {
        if !self.in_panel {
            log::warn!("end_panel called without a matching begin_panel");
            return;
        }
        self.in_panel = false;
        self.current = None;
        match std::mem::replace(&mut self.end_action, EndAction::None) {
            EndAction::End => ui.end_window(),
            EndAction::EndChild => ui.end_child(),
            EndAction::None => {}
        }
    }

    /// Make the panel being built the active tab of its group.
    pub fn set_dock_active(&mut self) {
        match self.current {
            Some(current) => self.registry.set_active(current),
            None => log::warn!("set_dock_active called outside begin_panel/end_panel"),
        }
    }

    /// Drop every record.
    pub fn shutdown(&mut self) {
        log::debug!("shutting down dock context with {} records", self.registry.len());
        self.registry.clear();
        self.current = None;
        self.next_parent = None;
        self.next_dock_slot = None;
        self.end_action = EndAction::None;
        self.in_panel = false;
    }
}

impl Default for DockContext {
    fn default() -> Self {
        Self::new()
    }
}
