// Headless immediate-mode host.
// Implements dockspace_core::Ui entirely in memory: widgets are hit-tested
// against the frame's pointer state and every draw call is recorded.

use dockspace_core::{
    Color, CursorIcon, ItemResponse, MouseButton, Painter, PointerState, Rect, Size, StyleColor,
    Ui, UiMetrics, Vec2, WindowFlags, WindowResponse,
};

/// Width of one character of the fixed-pitch stand-in font.
const CHAR_WIDTH: f32 = 7.0;

// ──────────────────────────────────────────────
// Draw list
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RectFilled { rect: Rect, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
    Triangle { points: [Vec2; 3], color: Color },
    ConvexFill { points: Vec<Vec2>, color: Color },
    Text { position: Vec2, color: Color, text: String },
    PushClipFullscreen,
    PopClip,
}

/// Records painter calls in submission order.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    clip_depth: usize,
}

impl DrawList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Balance of push/pop clip calls. Zero after a well-formed frame.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_depth = 0;
    }

    /// All text strings drawn this frame.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Painter for DrawList {
    fn rect_filled(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::RectFilled { rect, color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn triangle_filled(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.commands.push(DrawCommand::Triangle {
            points: [a, b, c],
            color,
        });
    }

    fn convex_fill(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::ConvexFill {
            points: points.to_vec(),
            color,
        });
    }

    fn text(&mut self, position: Vec2, color: Color, text: &str) {
        self.commands.push(DrawCommand::Text {
            position,
            color,
            text: text.to_string(),
        });
    }

    fn push_clip_fullscreen(&mut self) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClipFullscreen);
    }

    fn pop_clip(&mut self) {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopClip);
    }
}

// ──────────────────────────────────────────────
// HeadlessUi
// ──────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Scope {
    name: String,
    rect: Rect,
    is_window: bool,
}

pub struct HeadlessUi {
    frame: u64,
    pointer: PointerState,
    display_size: Size,
    metrics: UiMetrics,
    cursor: CursorIcon,
    active_id: Option<String>,
    open_popup: Option<String>,
    popup_choice: Option<String>,
    scopes: Vec<Scope>,
    /// Top-level windows, back to front.
    window_order: Vec<String>,
    draw: DrawList,
    text_lines: Vec<String>,
}

impl HeadlessUi {
    pub fn new(display_size: Size) -> Self {
        Self {
            frame: 0,
            pointer: PointerState::default(),
            display_size,
            metrics: UiMetrics::default(),
            cursor: CursorIcon::Arrow,
            active_id: None,
            open_popup: None,
            popup_choice: None,
            scopes: Vec::new(),
            window_order: Vec::new(),
            draw: DrawList::default(),
            text_lines: Vec::new(),
        }
    }

    /// Start a frame with the given pointer state.
    pub fn begin_frame(&mut self, pointer: PointerState) {
        self.frame += 1;
        self.pointer = pointer;
        self.cursor = CursorIcon::Arrow;
        self.draw.clear();
        self.text_lines.clear();
        if !self.scopes.is_empty() {
            log::warn!("headless ui: {} scope(s) left open last frame", self.scopes.len());
            self.scopes.clear();
        }
        if !pointer.is_down(MouseButton::Left) && !pointer.is_released(MouseButton::Left) {
            self.active_id = None;
        }
    }

    /// Begin a frame with a stationary pointer at `position`.
    pub fn begin_frame_at(&mut self, position: Vec2) {
        self.begin_frame(PointerState {
            position,
            ..Default::default()
        });
    }

    pub fn set_display_size(&mut self, size: Size) {
        self.display_size = size;
    }

    pub fn set_metrics(&mut self, metrics: UiMetrics) {
        self.metrics = metrics;
    }

    /// The label the simulated user picks the next time a popup lists it.
    pub fn choose_in_popup(&mut self, label: &str) {
        self.popup_choice = Some(label.to_string());
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    /// Lines emitted through [`Ui::text`] and tree nodes this frame.
    pub fn text_lines(&self) -> &[String] {
        &self.text_lines
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn window_order(&self) -> &[String] {
        &self.window_order
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    fn push_scope(&mut self, name: &str, rect: Rect, is_window: bool) {
        self.scopes.push(Scope {
            name: name.to_string(),
            rect,
            is_window,
        });
    }

    fn pop_scope(&mut self, is_window: bool) {
        match self.scopes.pop() {
            Some(scope) if scope.is_window == is_window => {}
            Some(scope) => {
                log::warn!("headless ui: mismatched end for scope {}", scope.name);
            }
            None => log::warn!("headless ui: end without begin"),
        }
    }

    /// Name of the innermost top-level window.
    fn current_window(&self) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .find(|s| s.is_window)
            .map(|s| s.name.as_str())
    }
}

impl Ui for HeadlessUi {
    fn frame_index(&self) -> u64 {
        self.frame
    }

    fn pointer(&self) -> PointerState {
        self.pointer
    }

    fn display_size(&self) -> Size {
        self.display_size
    }

    fn content_region(&self) -> Rect {
        match self.scopes.last() {
            Some(scope) => scope.rect,
            None => Rect::new(0.0, 0.0, self.display_size.width, self.display_size.height),
        }
    }

    fn metrics(&self) -> UiMetrics {
        self.metrics
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * CHAR_WIDTH
    }

    fn style_color(&self, color: StyleColor) -> Color {
        match color {
            StyleColor::Text => Color::WHITE,
            StyleColor::Button => Color::new(0.26, 0.59, 0.98, 0.4),
            StyleColor::ButtonHovered => Color::new(0.26, 0.59, 0.98, 1.0),
            StyleColor::FrameBg => Color::new(0.16, 0.29, 0.48, 0.54),
            StyleColor::FrameBgHovered => Color::new(0.26, 0.59, 0.98, 0.4),
            StyleColor::FrameBgActive => Color::new(0.26, 0.59, 0.98, 0.67),
        }
    }

    fn set_mouse_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }

    fn painter(&mut self) -> &mut dyn Painter {
        &mut self.draw
    }

    fn invisible_button(&mut self, id: &str, rect: Rect) -> ItemResponse {
        let p = self.pointer;
        let is_active = self.active_id.as_deref() == Some(id);
        let hovered = rect.contains(p.position) && (self.active_id.is_none() || is_active);
        let pressed = hovered && p.is_clicked(MouseButton::Left);
        if pressed {
            self.active_id = Some(id.to_string());
        }
        let active = self.active_id.as_deref() == Some(id);
        let clicked = active && p.is_released(MouseButton::Left) && rect.contains(p.position);
        ItemResponse {
            hovered,
            pressed,
            active: active && p.is_down(MouseButton::Left),
            clicked,
        }
    }

    fn selectable(&mut self, label: &str) -> bool {
        self.text_lines.push(label.to_string());
        if self.popup_choice.as_deref() == Some(label) {
            self.popup_choice = None;
            self.open_popup = None;
            return true;
        }
        false
    }

    fn text(&mut self, text: &str) {
        self.text_lines.push(text.to_string());
    }

    fn open_popup(&mut self, id: &str) {
        self.open_popup = Some(id.to_string());
    }

    fn begin_popup(&mut self, id: &str) -> bool {
        self.open_popup.as_deref() == Some(id)
    }

    fn end_popup(&mut self) {}

    fn tree_node(&mut self, _id: &str, label: &str) -> bool {
        self.text_lines.push(label.to_string());
        true
    }

    fn tree_pop(&mut self) {}

    fn begin_child(&mut self, id: &str, rect: Rect, _border: bool, _flags: WindowFlags) -> bool {
        self.push_scope(id, rect, false);
        rect.width > 0.0 && rect.height > 0.0
    }

    fn end_child(&mut self) {
        self.pop_scope(false);
    }

    fn begin_window(
        &mut self,
        label: &str,
        opened: Option<&mut bool>,
        rect: Rect,
        flags: WindowFlags,
    ) -> WindowResponse {
        if !self.window_order.iter().any(|w| w == label) {
            self.window_order.push(label.to_string());
        }

        let move_id = format!("#move:{label}");
        let p = self.pointer;
        let mut moving = false;
        let mut rect = rect;
        if !flags.intersects(WindowFlags::NO_MOVE | WindowFlags::NO_TITLE_BAR) {
            let title = Rect::new(rect.x, rect.y, rect.width, self.metrics.line_height);
            if self.active_id.is_none() && p.is_clicked(MouseButton::Left) && title.contains(p.position)
            {
                self.active_id = Some(move_id.clone());
            }
            moving = self.active_id.as_deref() == Some(move_id.as_str())
                && p.is_down(MouseButton::Left);
            if moving {
                rect.x += p.delta.x;
                rect.y += p.delta.y;
            }
        }

        self.push_scope(label, rect, true);
        WindowResponse {
            visible: opened.map_or(true, |o| *o),
            rect,
            moving,
        }
    }

    fn end_window(&mut self) {
        self.pop_scope(true);
    }

    fn send_to_back(&mut self) {
        let name = match self.current_window() {
            Some(name) => name.to_string(),
            None => return,
        };
        if let Some(at) = self.window_order.iter().position(|w| *w == name) {
            let window = self.window_order.remove(at);
            self.window_order.insert(0, window);
        } else {
            self.window_order.insert(0, name);
        }
    }
}
