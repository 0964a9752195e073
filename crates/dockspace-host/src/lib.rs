// Reference host for the dockspace engine.
// PointerTracker turns raw input events into per-frame pointer state;
// HeadlessUi is an in-memory immediate-mode Ui used by tests and the demo.

mod headless;
mod tracker;

pub use headless::{DrawCommand, DrawList, HeadlessUi};
pub use tracker::PointerTracker;
