use dockspace_core::{InputEvent, MouseButton, PointerState, Size, Vec2};

/// Distance the pointer must travel while held before it counts as a drag.
const DEFAULT_DRAG_THRESHOLD: f32 = 6.0;

/// Folds raw input events into one [`PointerState`] per frame.
///
/// A press that is released again before the frame is sampled is still
/// reported as held for that frame; its release is reported on the next
/// frame, so short clicks are never lost.
pub struct PointerTracker {
    position: Vec2,
    last_frame_position: Vec2,
    down: [bool; 3],
    pressed: [bool; 3],
    released: [bool; 3],
    press_origin: [Option<Vec2>; 3],
    drag_threshold: f32,
    display_size: Size,
    frame: u64,
}

impl PointerTracker {
    pub fn new(display_size: Size) -> Self {
        Self::with_drag_threshold(display_size, DEFAULT_DRAG_THRESHOLD)
    }

    pub fn with_drag_threshold(display_size: Size, drag_threshold: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            last_frame_position: Vec2::ZERO,
            down: [false; 3],
            pressed: [false; 3],
            released: [false; 3],
            press_origin: [None; 3],
            drag_threshold,
            display_size,
            frame: 0,
        }
    }

    /// Index of the last frame produced by [`PointerTracker::new_frame`].
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn display_size(&self) -> Size {
        self.display_size
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::MouseMove { position } => {
                self.position = position;
            }
            InputEvent::MouseDown { position, button } => {
                let i = button.index();
                self.position = position;
                self.down[i] = true;
                self.pressed[i] = true;
                self.press_origin[i] = Some(position);
            }
            InputEvent::MouseUp { position, button } => {
                let i = button.index();
                self.position = position;
                if self.down[i] {
                    self.down[i] = false;
                    self.released[i] = true;
                }
            }
            InputEvent::Resize { size } => {
                self.display_size = size;
            }
        }
    }

    /// Sample the accumulated events as the state of a new frame.
    pub fn new_frame(&mut self) -> PointerState {
        self.frame += 1;

        let mut state = PointerState {
            position: self.position,
            delta: self.position - self.last_frame_position,
            ..Default::default()
        };
        self.last_frame_position = self.position;

        for button in MouseButton::ALL {
            let i = button.index();
            state.down[i] = self.down[i] || self.pressed[i];
            state.clicked[i] = self.pressed[i];

            if self.pressed[i] && self.released[i] && !self.down[i] {
                // Click shorter than a frame: hold now, release next frame.
                state.released[i] = false;
            } else {
                state.released[i] = self.released[i];
                self.released[i] = false;
            }
            self.pressed[i] = false;

            if state.down[i] {
                if let Some(origin) = self.press_origin[i] {
                    let d = self.position - origin;
                    state.dragging[i] = (d.x * d.x + d.y * d.y).sqrt() > self.drag_threshold;
                }
            } else if !self.released[i] {
                self.press_origin[i] = None;
            }
        }

        state
    }
}
