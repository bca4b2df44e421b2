use tessel_core::{Rect, Size, Vec2, Viewport};

/// Height of the strip at the top of a floating frame that starts a move.
pub const TITLE_BAR_HEIGHT: f32 = 36.0;

/// Side of the square grip in a frame's bottom-right corner that starts a
/// resize.
pub const RESIZE_GRIP: f32 = 16.0;

// ──────────────────────────────────────────────
// FloatingFrame
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum Grab {
    Move { offset: Vec2 },
    Resize { origin: Vec2, start: Size },
}

/// Position and size of one floating window, plus the pointer grab that is
/// currently reshaping it.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingFrame {
    position: Vec2,
    size: Size,
    min_size: Size,
    /// Geometry to return to when maximize is toggled off.
    restore: Option<(Vec2, Size)>,
    grab: Option<Grab>,
}

impl FloatingFrame {
    pub fn new(position: Vec2, size: Size, min_size: Size) -> Self {
        Self {
            position,
            size: Size::new(size.width.max(min_size.width), size.height.max(min_size.height)),
            min_size,
            restore: None,
            grab: None,
        }
    }

    /// A frame of `size` centered in the usable band of `viewport`.
    pub fn centered(viewport: &Viewport, size: Size, min_size: Size) -> Self {
        let usable = viewport.usable_rect();
        let position = Vec2::new(
            usable.x + ((usable.width - size.width) / 2.0).max(0.0),
            usable.y + ((usable.height - size.height) / 2.0).max(0.0),
        );
        Self::new(position, size, min_size)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.width, self.size.height)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_maximized(&self) -> bool {
        self.restore.is_some()
    }

    pub fn is_grabbed(&self) -> bool {
        self.grab.is_some()
    }

    pub fn title_bar(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.size.width,
            TITLE_BAR_HEIGHT.min(self.size.height),
        )
    }

    pub fn resize_grip(&self) -> Rect {
        let rect = self.rect();
        Rect::new(rect.right() - RESIZE_GRIP, rect.bottom() - RESIZE_GRIP, RESIZE_GRIP, RESIZE_GRIP)
    }

    // ── Grabs ───────────────────────────────────

    /// Start moving the frame with the pointer. Ignored while maximized.
    pub fn begin_move(&mut self, pointer: Vec2) -> bool {
        if self.is_maximized() {
            return false;
        }
        self.grab = Some(Grab::Move {
            offset: Vec2::new(pointer.x - self.position.x, pointer.y - self.position.y),
        });
        true
    }

    /// Start resizing the frame from its bottom-right corner. Ignored while
    /// maximized.
    pub fn begin_resize(&mut self, pointer: Vec2) -> bool {
        if self.is_maximized() {
            return false;
        }
        self.grab = Some(Grab::Resize {
            origin: pointer,
            start: self.size,
        });
        true
    }

    /// Follow the pointer with whichever grab is active. Returns whether the
    /// frame changed.
    pub fn drag_to(&mut self, pointer: Vec2, viewport: &Viewport) -> bool {
        let before = (self.position, self.size);
        match self.grab {
            Some(Grab::Move { offset }) => {
                self.position = clamp_position(
                    Vec2::new(pointer.x - offset.x, pointer.y - offset.y),
                    self.size,
                    viewport,
                );
            }
            Some(Grab::Resize { origin, start }) => {
                let max_width = viewport.screen.width - self.position.x;
                let max_height = viewport.screen.height - viewport.dock_height - self.position.y;
                // The minimum wins when the remaining space is smaller.
                self.size = Size::new(
                    (start.width + pointer.x - origin.x)
                        .min(max_width)
                        .max(self.min_size.width),
                    (start.height + pointer.y - origin.y)
                        .min(max_height)
                        .max(self.min_size.height),
                );
            }
            None => return false,
        }
        (self.position, self.size) != before
    }

    pub fn end_grab(&mut self) {
        self.grab = None;
    }

    /// Pull the frame back inside `viewport` after the screen changed. A
    /// maximized frame refills the usable band. Returns whether it moved.
    pub fn fit_to(&mut self, viewport: &Viewport) -> bool {
        let before = (self.position, self.size);
        let usable = viewport.usable_rect();
        if self.is_maximized() {
            self.position = Vec2::new(usable.x, usable.y);
            self.size = Size::new(usable.width, usable.height);
        } else {
            self.size = Size::new(
                self.size.width.min(usable.width).max(self.min_size.width),
                self.size.height.min(usable.height).max(self.min_size.height),
            );
            self.position = clamp_position(self.position, self.size, viewport);
        }
        (self.position, self.size) != before
    }

    // ── Maximize ────────────────────────────────

    /// Fill the usable band, remembering the current geometry; a second
    /// call puts it back.
    pub fn toggle_maximize(&mut self, viewport: &Viewport) {
        self.grab = None;
        match self.restore.take() {
            Some((position, size)) => {
                self.position = position;
                self.size = size;
            }
            None => {
                self.restore = Some((self.position, self.size));
                let usable = viewport.usable_rect();
                self.position = Vec2::new(usable.x, usable.y);
                self.size = Size::new(usable.width, usable.height);
            }
        }
    }
}

/// Keep a frame of `size` fully inside the band between the status bar and
/// the dock. A frame larger than the band pins to its top-left corner.
fn clamp_position(position: Vec2, size: Size, viewport: &Viewport) -> Vec2 {
    let top = viewport.status_bar_height;
    let max_x = (viewport.screen.width - size.width).max(0.0);
    let max_y = (viewport.screen.height - viewport.dock_height - size.height).max(top);
    Vec2::new(position.x.clamp(0.0, max_x), position.y.clamp(top, max_y))
}
