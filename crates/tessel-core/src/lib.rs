use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Snap to whole pixels by rounding the edges, not the extents, so two
    /// rects that shared an edge before rounding still share it afterwards.
    pub fn round(&self) -> Rect {
        let x = self.x.round();
        let y = self.y.round();
        Rect::new(x, y, self.right().round() - x, self.bottom().round() - y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Vec2) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The screen plus the bands reserved above and below the tiling area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub screen: Size,
    pub status_bar_height: f32,
    pub dock_height: f32,
}

impl Viewport {
    pub fn new(screen: Size, status_bar_height: f32, dock_height: f32) -> Self {
        Self {
            screen,
            status_bar_height,
            dock_height,
        }
    }

    pub fn screen_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.screen.width, self.screen.height)
    }

    /// The rect tiled windows are laid out in: the screen minus the status
    /// bar on top and the dock at the bottom.
    pub fn usable_rect(&self) -> Rect {
        let height = (self.screen.height - self.status_bar_height - self.dock_height).max(0.0);
        Rect::new(0.0, self.status_bar_height, self.screen.width, height)
    }
}

// ──────────────────────────────────────────────
// Identity
// ──────────────────────────────────────────────

pub type WindowId = String;

pub type WorkspaceId = u8;

/// Number of workspaces that exist for the lifetime of the shell.
pub const WORKSPACE_COUNT: WorkspaceId = 10;

/// Workspace for a digit key, `0` meaning workspace 10.
pub fn workspace_for_key(key: char) -> Option<WorkspaceId> {
    match key.to_digit(10)? {
        0 => Some(WORKSPACE_COUNT),
        n => Some(n as WorkspaceId),
    }
}

// ──────────────────────────────────────────────
// Directions
// ──────────────────────────────────────────────

/// Axis a split divides its rect along: `Horizontal` lays children out
/// left to right, `Vertical` top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    #[default]
    Horizontal,
    Vertical,
}

/// Cardinal direction for focus and window movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// A draggable strip sitting on the boundary between two split siblings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeHandle {
    pub direction: SplitDirection,
    pub rect: Rect,
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

/// Pointer and viewport events delivered by the host, one at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Vec2 },
    PointerMove { position: Vec2 },
    PointerUp { position: Vec2 },
    Resize { size: Size },
}

// ──────────────────────────────────────────────
// Window visibility
// ──────────────────────────────────────────────

/// Visibility bookkeeping owned by the window registry. The layout engine
/// never gates on it; renderers do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub id: WindowId,
    pub title: String,
    pub visible: bool,
    pub minimized: bool,
    pub z_index: u32,
}

impl WindowState {
    pub fn is_shown(&self) -> bool {
        self.visible && !self.minimized
    }
}

// ──────────────────────────────────────────────
// Trait: LayoutEngine
// ──────────────────────────────────────────────

/// The layout engine assigns rectangles to tiled windows.
/// It doesn't know what windows contain, just their IDs and the bounds.
pub trait LayoutEngine {
    fn compute(&self, bounds: Rect) -> Vec<(WindowId, Rect)>;
    fn tile(&mut self, window: &str, direction: SplitDirection) -> bool;
    fn untile(&mut self, window: &str) -> bool;
}
