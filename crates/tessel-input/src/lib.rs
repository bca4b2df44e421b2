// Pointer routing for the tiling shell: split-handle drags, floating frame
// move/resize/maximize, and click-to-focus. Keyboard input arrives as parsed
// `Command`s instead.

mod command;
mod floating;

use std::collections::HashMap;

use tessel_core::{InputEvent, Rect, ResizeHandle, Size, SplitDirection, Vec2, Viewport, WindowId};

pub use command::{Command, ParseCommandError};
pub use floating::{FloatingFrame, RESIZE_GRIP, TITLE_BAR_HEIGHT};

pub const DEFAULT_FRAME_SIZE: Size = Size {
    width: 400.0,
    height: 300.0,
};

pub const MIN_FRAME_SIZE: Size = Size {
    width: 220.0,
    height: 140.0,
};

// ──────────────────────────────────────────────
// Action types
// ──────────────────────────────────────────────

/// What the shell should do in response to a pointer event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Give keyboard focus to a window.
    Focus(WindowId),
    /// Run a layout command, e.g. the ratio shift of a handle drag.
    Command(Command),
    /// A floating frame moved or changed size.
    FrameChanged(WindowId),
    None,
}

/// The hit targets on screen for one event: tiles and their split handles
/// from the active layout, and floating windows from bottom to top.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scene<'a> {
    pub tiles: &'a [(WindowId, Rect)],
    pub handles: &'a [ResizeHandle],
    pub floating: &'a [WindowId],
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SplitDrag {
    direction: SplitDirection,
    /// Pointer coordinate along the split axis at the previous event.
    last: f32,
}

// ──────────────────────────────────────────────
// Router
// ──────────────────────────────────────────────

/// Turns raw pointer events into shell actions and owns the geometry of
/// floating frames.
pub struct Router {
    viewport: Viewport,
    frames: HashMap<WindowId, FloatingFrame>,
    frame_size: Size,
    min_frame_size: Size,
    split_drag: Option<SplitDrag>,
    grabbed: Option<WindowId>,
    hovered: Option<WindowId>,
}

impl Router {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_frame_sizes(viewport, DEFAULT_FRAME_SIZE, MIN_FRAME_SIZE)
    }

    /// Create a Router whose new floating frames open at `frame_size` and
    /// never shrink below `min_frame_size`.
    pub fn with_frame_sizes(viewport: Viewport, frame_size: Size, min_frame_size: Size) -> Self {
        Self {
            viewport,
            frames: HashMap::new(),
            frame_size,
            min_frame_size,
            split_drag: None,
            grabbed: None,
            hovered: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_dragging_split(&self) -> bool {
        self.split_drag.is_some()
    }

    /// End any split or frame drag (call on pointer release).
    pub fn end_drag(&mut self) {
        self.split_drag = None;
        if let Some(id) = self.grabbed.take() {
            if let Some(frame) = self.frames.get_mut(&id) {
                frame.end_grab();
            }
        }
    }

    // ── Floating frames ─────────────────────────

    pub fn frame(&self, window: &str) -> Option<&FloatingFrame> {
        self.frames.get(window)
    }

    pub fn frame_rect(&self, window: &str) -> Option<Rect> {
        self.frames.get(window).map(FloatingFrame::rect)
    }

    /// Give `window` a frame centered in the usable band unless it already
    /// has one.
    pub fn ensure_frame(&mut self, window: &str) -> &FloatingFrame {
        let (viewport, size, min_size) = (self.viewport, self.frame_size, self.min_frame_size);
        self.frames
            .entry(window.to_string())
            .or_insert_with(|| FloatingFrame::centered(&viewport, size, min_size))
    }

    pub fn remove_frame(&mut self, window: &str) -> bool {
        if self.grabbed.as_deref() == Some(window) {
            self.grabbed = None;
        }
        self.frames.remove(window).is_some()
    }

    pub fn toggle_maximize(&mut self, window: &str) -> bool {
        let viewport = self.viewport;
        match self.frames.get_mut(window) {
            Some(frame) => {
                frame.toggle_maximize(&viewport);
                if self.grabbed.as_deref() == Some(window) {
                    self.grabbed = None;
                }
                true
            }
            None => false,
        }
    }

    // ── Event processing ────────────────────────

    /// Process an input event and return what action should be taken.
    pub fn process(&mut self, event: InputEvent, scene: Scene<'_>) -> Action {
        match event {
            InputEvent::PointerDown { position } => self.process_press(position, scene),
            InputEvent::PointerMove { position } => self.process_move(position, scene),
            InputEvent::PointerUp { .. } => {
                self.end_drag();
                Action::None
            }
            InputEvent::Resize { size } => {
                self.viewport.screen = size;
                let viewport = self.viewport;
                for frame in self.frames.values_mut() {
                    frame.fit_to(&viewport);
                }
                Action::None
            }
        }
    }

    fn process_press(&mut self, position: Vec2, scene: Scene<'_>) -> Action {
        self.end_drag();

        // Floating windows sit above the tiles, topmost first.
        if let Some(id) = self.frame_at(position, scene.floating) {
            if let Some(frame) = self.frames.get_mut(&id) {
                let grabbed = if frame.resize_grip().contains(position) {
                    frame.begin_resize(position)
                } else if frame.title_bar().contains(position) {
                    frame.begin_move(position)
                } else {
                    false
                };
                if grabbed {
                    self.grabbed = Some(id.clone());
                }
            }
            return Action::Focus(id);
        }

        if let Some(handle) = scene.handles.iter().find(|h| h.rect.contains(position)) {
            self.split_drag = Some(SplitDrag {
                direction: handle.direction,
                last: along(handle.direction, position),
            });
            return Action::None;
        }

        match tile_at(position, scene.tiles) {
            Some(id) => Action::Focus(id),
            None => Action::None,
        }
    }

    fn process_move(&mut self, position: Vec2, scene: Scene<'_>) -> Action {
        if let Some(drag) = self.split_drag.as_mut() {
            let extent = match drag.direction {
                SplitDirection::Horizontal => self.viewport.screen.width,
                SplitDirection::Vertical => self.viewport.screen.height,
            };
            let current = along(drag.direction, position);
            let moved = current - drag.last;
            drag.last = current;
            if moved == 0.0 || extent <= 0.0 {
                return Action::None;
            }
            return Action::Command(Command::ResizeBy(f64::from(moved / extent)));
        }

        if let Some(id) = self.grabbed.clone() {
            let viewport = self.viewport;
            let changed = self
                .frames
                .get_mut(&id)
                .is_some_and(|frame| frame.drag_to(position, &viewport));
            return if changed {
                Action::FrameChanged(id)
            } else {
                Action::None
            };
        }

        self.hovered = self
            .frame_at(position, scene.floating)
            .or_else(|| tile_at(position, scene.tiles));
        Action::None
    }

    // ── Hit testing ─────────────────────────────

    fn frame_at(&self, position: Vec2, floating: &[WindowId]) -> Option<WindowId> {
        floating
            .iter()
            .rev()
            .find(|id| self.frames.get(*id).is_some_and(|f| f.rect().contains(position)))
            .cloned()
    }
}

/// Find which tile contains the given point. Tiles never overlap, so the
/// first match is the only one.
fn tile_at(position: Vec2, tiles: &[(WindowId, Rect)]) -> Option<WindowId> {
    tiles
        .iter()
        .find(|(_, rect)| rect.contains(position))
        .map(|(id, _)| id.clone())
}

fn along(direction: SplitDirection, position: Vec2) -> f32 {
    match direction {
        SplitDirection::Horizontal => position.x,
        SplitDirection::Vertical => position.y,
    }
}
