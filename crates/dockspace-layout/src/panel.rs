use std::fmt;
use std::str::FromStr;

use dockspace_core::{label_display_text, label_id_key, DockSlot, DockStatus, PanelId, Rect, Size, Vec2};
use serde::Serialize;

// ──────────────────────────────────────────────
// PanelIndex
// ──────────────────────────────────────────────

/// Stable handle to a record in the [`Registry`](crate::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PanelIndex(pub(crate) usize);

impl PanelIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PanelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ──────────────────────────────────────────────
// Location path
// ──────────────────────────────────────────────

/// Which side of its parent split a node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SideCode {
    /// Right child of a horizontal split (`'0'`).
    HorizontalSecond,
    /// Left child of a horizontal split (`'1'`).
    HorizontalFirst,
    /// Top child of a vertical split (`'2'`).
    VerticalFirst,
    /// Bottom child of a vertical split (`'3'`).
    VerticalSecond,
}

impl SideCode {
    pub fn as_char(self) -> char {
        match self {
            SideCode::HorizontalSecond => '0',
            SideCode::HorizontalFirst => '1',
            SideCode::VerticalFirst => '2',
            SideCode::VerticalSecond => '3',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(SideCode::HorizontalSecond),
            '1' => Some(SideCode::HorizontalFirst),
            '2' => Some(SideCode::VerticalFirst),
            '3' => Some(SideCode::VerticalSecond),
            _ => None,
        }
    }

    /// Slot that puts a panel back on this side of a leaf.
    pub fn slot(self) -> DockSlot {
        match self {
            SideCode::HorizontalFirst => DockSlot::Left,
            SideCode::VerticalFirst => DockSlot::Top,
            SideCode::VerticalSecond => DockSlot::Bottom,
            SideCode::HorizontalSecond => DockSlot::Right,
        }
    }
}

/// A panel's ancestry through split nodes, innermost ancestor first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationPath {
    codes: Vec<SideCode>,
}

impl LocationPath {
    pub fn new(codes: Vec<SideCode>) -> Self {
        Self { codes }
    }

    pub fn codes(&self) -> &[SideCode] {
        &self.codes
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }
}

impl fmt::Display for LocationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for code in &self.codes {
            write!(f, "{}", code.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for LocationPath {
    type Err = char;

    /// Parses the compact digit form; the error is the first invalid character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| SideCode::from_char(c).ok_or(c))
            .collect::<Result<Vec<_>, _>>()
            .map(LocationPath::new)
    }
}

// ──────────────────────────────────────────────
// Panel
// ──────────────────────────────────────────────

/// One registry record: either a dockable panel (leaf) or a split node.
#[derive(Debug, Clone)]
pub struct Panel {
    pub(crate) label: String,
    pub(crate) id_key: String,
    pub(crate) id: PanelId,
    pub(crate) status: DockStatus,
    pub(crate) pos: Vec2,
    pub(crate) size: Size,
    pub(crate) active: bool,
    pub(crate) prev_tab: Option<PanelIndex>,
    pub(crate) next_tab: Option<PanelIndex>,
    pub(crate) parent: Option<PanelIndex>,
    pub(crate) children: [Option<PanelIndex>; 2],
    pub(crate) location: LocationPath,
    pub(crate) last_frame_seen: u64,
    pub(crate) missed_frames: u32,
    pub(crate) opened: bool,
    /// Not begun by the host yet.
    pub(crate) first: bool,
}

impl Panel {
    pub(crate) fn new(label: &str, id: PanelId, status: DockStatus, opened: bool, rect: Rect) -> Self {
        Self {
            label: label.to_string(),
            id_key: label_id_key(label).to_string(),
            id,
            status,
            pos: rect.pos(),
            size: rect.size(),
            active: true,
            prev_tab: None,
            next_tab: None,
            parent: None,
            children: [None, None],
            location: LocationPath::default(),
            last_frame_seen: 0,
            missed_frames: 0,
            opened,
            first: true,
        }
    }

    /// An unnamed split node covering `pos`/`size`.
    pub(crate) fn split(pos: Vec2, size: Size) -> Self {
        Self {
            label: String::new(),
            id_key: String::new(),
            id: 0,
            status: DockStatus::Docked,
            pos,
            size,
            active: true,
            prev_tab: None,
            next_tab: None,
            parent: None,
            children: [None, None],
            location: LocationPath::default(),
            last_frame_seen: 0,
            missed_frames: 0,
            opened: false,
            first: false,
        }
    }

    /// Full label as last passed by the host, including any `##` suffix.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The visible part of the label.
    pub fn display_label(&self) -> &str {
        label_display_text(&self.label)
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn status(&self) -> DockStatus {
        self.status
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn prev_tab(&self) -> Option<PanelIndex> {
        self.prev_tab
    }

    pub fn next_tab(&self) -> Option<PanelIndex> {
        self.next_tab
    }

    pub fn parent(&self) -> Option<PanelIndex> {
        self.parent
    }

    pub fn children(&self) -> [Option<PanelIndex>; 2] {
        self.children
    }

    pub fn is_container(&self) -> bool {
        self.children[0].is_some()
    }

    pub fn location(&self) -> &LocationPath {
        &self.location
    }

    pub fn missed_frames(&self) -> u32 {
        self.missed_frames
    }

    pub(crate) fn matches(&self, id: PanelId, id_key: &str) -> bool {
        !self.is_container() && self.id == id && self.id_key == id_key
    }
}
