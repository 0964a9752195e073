use dockspace_core::{DockStatus, Rect, Size, SplitDirection, Ui, Vec2, WindowFlags};
use serde::Serialize;

use crate::panel::PanelIndex;
use crate::DockContext;

const DEBUG_WINDOW_RECT: Rect = Rect::new(20.0, 20.0, 320.0, 400.0);

/// Serializable view of one registry record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelInfo {
    pub index: PanelIndex,
    pub label: String,
    pub status: DockStatus,
    pub pos: Vec2,
    pub size: Size,
    pub parent: Option<PanelIndex>,
    pub children: [Option<PanelIndex>; 2],
    pub is_container: bool,
    /// Axis of a split node; `None` for panels.
    pub split: Option<SplitDirection>,
    pub active: bool,
    pub location: String,
    pub missed_frames: u32,
}

impl DockContext {
    /// Every record in registry order.
    pub fn snapshot(&self) -> Vec<PanelInfo> {
        self.registry
            .iter()
            .map(|(index, p)| PanelInfo {
                index,
                label: p.display_label().to_string(),
                status: p.status,
                pos: p.pos,
                size: p.size,
                parent: p.parent,
                children: p.children,
                is_container: p.is_container(),
                split: self.registry.direction(index),
                active: p.active,
                location: p.location.to_string(),
                missed_frames: p.missed_frames,
            })
            .collect()
    }

    /// A window listing every record with its geometry and links.
    pub fn debug_view<U: Ui + ?Sized>(&self, ui: &mut U) {
        ui.begin_window("Dock Debug Info", None, DEBUG_WINDOW_RECT, WindowFlags::empty());
        for (i, info) in self.snapshot().iter().enumerate() {
            if !ui.tree_node(&format!("dock#{i}"), &format!("Dock {i} ({})", info.label)) {
                continue;
            }
            ui.text(&format!(
                "pos=({:.1} {:.1}) size=({:.1} {:.1})",
                info.pos.x, info.pos.y, info.size.width, info.size.height
            ));
            let parent = info
                .parent
                .map_or_else(|| "-1".to_string(), |p| p.index().to_string());
            ui.text(&format!("parent = {parent}"));
            ui.text(&format!("is_container = {}", info.is_container));
            ui.text(&format!("status = {:?}", info.status));
            ui.tree_pop();
        }
        ui.end_window();
    }
}
