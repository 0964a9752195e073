use dockspace_core::Size;
use serde::{Deserialize, Serialize};

/// Tunables of the docking engine. Missing fields deserialize to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Completed frames a docked leaf may go unseen before it is floated.
    pub max_missed_frames: u32,
    /// Longest location path recorded for a panel.
    pub max_location_depth: usize,
    /// Smallest leaf, before the tab bar line is added to the height.
    pub min_leaf_size: Size,
    pub splitter_thickness: f32,
    /// Half the long side of a drop slot.
    pub slot_half_extent: f32,
    /// Distance from a panel centre to the near edge of an edge slot.
    pub slot_inner_offset: f32,
    /// Distance from a panel centre to the far edge of an edge slot.
    pub slot_outer_offset: f32,
    /// Gap between the workspace border and the border slots.
    pub border_slot_margin: f32,
    pub tab_spacing: f32,
    /// Side of the tab list and close buttons.
    pub button_size: f32,
    /// Segments per bezier curve of a tab outline.
    pub bezier_segments: usize,
    /// Alpha of the ghost rect drawn under a dragged panel.
    pub ghost_alpha: f32,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            max_missed_frames: 2,
            max_location_depth: 15,
            min_leaf_size: Size::new(16.0, 16.0),
            splitter_thickness: 3.0,
            slot_half_extent: 20.0,
            slot_inner_offset: 30.0,
            slot_outer_offset: 50.0,
            border_slot_margin: 10.0,
            tab_spacing: 15.0,
            button_size: 16.0,
            bezier_segments: 10,
            ghost_alpha: 0.5,
        }
    }
}
