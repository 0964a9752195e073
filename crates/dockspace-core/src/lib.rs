// Core types shared by the dockspace crates.
// Geometry, identity, dock slots, input state, and the host traits the
// layout engine draws and hit-tests through.


use std::ops::{Add, Mul, Sub};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_pos_size(pos: Vec2, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    /// Build a rect from its top-left and bottom-right corners.
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn min(&self) -> Vec2 {
        self.pos()
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half-open on the max edges, so neighbours sharing an edge never
    /// both contain a point on it.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A polyline under construction, used for tab shapes.
///
/// Cubic bezier segments are flattened into straight segments as they are
/// appended, so the finished point list can be handed to
/// [`Painter::convex_fill`] directly.
#[derive(Debug, Clone, Default)]
pub struct Path {
    points: Vec<Vec2>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_to(&mut self, point: Vec2) {
        self.points.push(point);
    }

    /// Append a cubic bezier from the current end point. `segments` straight
    /// pieces are emitted; the last one lands exactly on `end`.
    pub fn bezier_to(&mut self, c1: Vec2, c2: Vec2, end: Vec2, segments: usize) {
        let start = match self.points.last() {
            Some(p) => *p,
            None => {
                self.points.push(end);
                return;
            }
        };
        let segments = segments.max(1);
        for step in 1..=segments {
            let t = step as f32 / segments as f32;
            let u = 1.0 - t;
            let w0 = u * u * u;
            let w1 = 3.0 * u * u * t;
            let w2 = 3.0 * u * t * t;
            let w3 = t * t * t;
            self.points.push(Vec2::new(
                w0 * start.x + w1 * c1.x + w2 * c2.x + w3 * end.x,
                w0 * start.y + w1 * c1.y + w2 * c2.y + w3 * end.y,
            ));
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
}

// ──────────────────────────────────────────────
// Colors
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Style palette entries the engine asks the host for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleColor {
    Text,
    Button,
    ButtonHovered,
    FrameBg,
    FrameBgHovered,
    FrameBgActive,
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

/// Stable 32-bit identifier derived from a panel label.
pub type PanelId = u32;

/// The part of a label that carries identity.
///
/// Follows the immediate-mode convention: if the label contains `"###"`,
/// only the text after it identifies the panel, so the visible title can
/// change without the panel being re-created.
pub fn label_id_key(label: &str) -> &str {
    match label.find("###") {
        Some(at) => &label[at + 3..],
        None => label,
    }
}

/// The part of a label that is shown on screen (everything before `"##"`).
pub fn label_display_text(label: &str) -> &str {
    match label.find("##") {
        Some(at) => &label[..at],
        None => label,
    }
}

/// Hash a label to its [`PanelId`].
pub fn panel_id(label: &str) -> PanelId {
    hash_id_key(label_id_key(label))
}

/// Hash an already-extracted identity key.
pub fn hash_id_key(key: &str) -> PanelId {
    let hash = blake3::hash(key.as_bytes());
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

// ──────────────────────────────────────────────
// Docking
// ──────────────────────────────────────────────

/// Where a panel goes relative to a destination panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DockSlot {
    Left,
    Right,
    Top,
    Bottom,
    Tab,
    Float,
    None,
}

impl DockSlot {
    /// The slots shown around a hovered panel, in hit-test order.
    pub const PANEL_SLOTS: [DockSlot; 5] = [
        DockSlot::Left,
        DockSlot::Right,
        DockSlot::Top,
        DockSlot::Bottom,
        DockSlot::Tab,
    ];

    /// The slots shown on the workspace border.
    pub const BORDER_SLOTS: [DockSlot; 4] =
        [DockSlot::Left, DockSlot::Right, DockSlot::Top, DockSlot::Bottom];

    /// True for the four slots that create a split.
    pub fn is_edge(self) -> bool {
        matches!(
            self,
            DockSlot::Left | DockSlot::Right | DockSlot::Top | DockSlot::Bottom
        )
    }

    /// The split direction an edge slot produces.
    pub fn direction(self) -> Option<SplitDirection> {
        match self {
            DockSlot::Left | DockSlot::Right => Some(SplitDirection::Horizontal),
            DockSlot::Top | DockSlot::Bottom => Some(SplitDirection::Vertical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DockStatus {
    Docked,
    Float,
    Dragged,
}

/// Horizontal splits arrange children left/right, vertical ones top/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];

    pub fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseDown { position: Vec2, button: MouseButton },
    MouseUp { position: Vec2, button: MouseButton },
    MouseMove { position: Vec2 },
    Resize { size: Size },
}

/// Pointer state for one frame, as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub position: Vec2,
    /// Movement since the previous frame.
    pub delta: Vec2,
    pub down: [bool; 3],
    /// Pressed this frame.
    pub clicked: [bool; 3],
    /// Released this frame.
    pub released: [bool; 3],
    /// Held and moved past the drag threshold since the press.
    pub dragging: [bool; 3],
}

impl PointerState {
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.down[button.index()]
    }

    pub fn is_clicked(&self, button: MouseButton) -> bool {
        self.clicked[button.index()]
    }

    pub fn is_released(&self, button: MouseButton) -> bool {
        self.released[button.index()]
    }

    pub fn is_dragging(&self, button: MouseButton) -> bool {
        self.dragging[button.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    Arrow,
    ResizeEw,
    ResizeNs,
}

// ──────────────────────────────────────────────
// Widgets
// ──────────────────────────────────────────────

bitflags! {
    /// Window and child-region flags passed through to the host.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct WindowFlags: u32 {
        const NO_TITLE_BAR = 1 << 0;
        const NO_RESIZE = 1 << 1;
        const NO_MOVE = 1 << 2;
        const NO_SCROLLBAR = 1 << 3;
        const NO_SCROLL_WITH_MOUSE = 1 << 4;
        const NO_COLLAPSE = 1 << 5;
        const ALWAYS_AUTO_RESIZE = 1 << 6;
        const SHOW_BORDERS = 1 << 7;
        const NO_SAVED_SETTINGS = 1 << 8;
        const NO_BRING_TO_FRONT_ON_FOCUS = 1 << 9;
        const TOOLTIP = 1 << 10;
    }
}

/// Style metrics the engine lays widgets out with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiMetrics {
    /// Text line height including vertical item spacing.
    pub line_height: f32,
    pub item_spacing: Vec2,
    pub window_padding: Vec2,
}

impl Default for UiMetrics {
    fn default() -> Self {
        Self {
            line_height: 17.0,
            item_spacing: Vec2::new(8.0, 4.0),
            window_padding: Vec2::new(8.0, 8.0),
        }
    }
}

/// Interaction result of an invisible button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemResponse {
    pub hovered: bool,
    /// Pressed this frame.
    pub pressed: bool,
    /// Held since a press on this item.
    pub active: bool,
    /// Released over the item after being pressed on it.
    pub clicked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowResponse {
    /// Whether the window content is visible and should be drawn.
    pub visible: bool,
    /// Window rect after the host applied user moves/resizes.
    pub rect: Rect,
    /// The title/move region is held with the primary button.
    pub moving: bool,
}

// ──────────────────────────────────────────────
// Trait: Painter
// ──────────────────────────────────────────────

/// Draw list of the window currently being built.
pub trait Painter {
    fn rect_filled(&mut self, rect: Rect, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn triangle_filled(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color);
    fn convex_fill(&mut self, points: &[Vec2], color: Color);
    fn text(&mut self, position: Vec2, color: Color, text: &str);
    fn push_clip_fullscreen(&mut self);
    fn pop_clip(&mut self);
}

// ──────────────────────────────────────────────
// Trait: Ui
// ──────────────────────────────────────────────

/// The immediate-mode host the docking engine runs inside.
///
/// Ids passed to widget calls are unique within the current frame; the host
/// uses them to track which item is active across frames.
pub trait Ui {
    /// Monotonically increasing, once per rendered frame.
    fn frame_index(&self) -> u64;
    fn pointer(&self) -> PointerState;
    fn display_size(&self) -> Size;
    /// Remaining content area of the current window.
    fn content_region(&self) -> Rect;
    fn metrics(&self) -> UiMetrics;
    fn text_width(&self, text: &str) -> f32;
    fn style_color(&self, color: StyleColor) -> Color;
    fn set_mouse_cursor(&mut self, cursor: CursorIcon);
    fn painter(&mut self) -> &mut dyn Painter;

    fn invisible_button(&mut self, id: &str, rect: Rect) -> ItemResponse;
    fn selectable(&mut self, label: &str) -> bool;
    fn text(&mut self, text: &str);
    fn open_popup(&mut self, id: &str);
    fn begin_popup(&mut self, id: &str) -> bool;
    fn end_popup(&mut self);
    fn tree_node(&mut self, id: &str, label: &str) -> bool;
    fn tree_pop(&mut self);

    fn begin_child(&mut self, id: &str, rect: Rect, border: bool, flags: WindowFlags) -> bool;
    fn end_child(&mut self);
    fn begin_window(
        &mut self,
        label: &str,
        opened: Option<&mut bool>,
        rect: Rect,
        flags: WindowFlags,
    ) -> WindowResponse;
    fn end_window(&mut self);
    /// Move the current window to the bottom of the draw order.
    fn send_to_back(&mut self);
}
