// Tiling layout engine: an n-ary split tree per workspace, plus the floating
// set and fullscreen override that sit beside it.

mod navigate;
mod node;
mod placement;
mod tests;
mod workspace;

use serde::{Deserialize, Serialize};
use tessel_core::{Direction, LayoutEngine, Rect, ResizeHandle, SplitDirection, WindowId};

pub use navigate::{nearest_in_direction, DIRECTION_DEAD_ZONE};
pub use node::{LayoutNode, HANDLE_SIZE};
pub use placement::{Placement, PlacementKind};
pub use workspace::{Workspace, WorkspaceState};

// ──────────────────────────────────────────────
// TilingLayout
// ──────────────────────────────────────────────

/// Minimum share of a split any ratio adjustment may leave a child with.
pub const MIN_RATIO: f64 = 0.1;

/// Compute pixel rects for every tiled window inside `bounds`.
/// An empty tree yields no rects.
pub fn compute_rects(root: Option<&LayoutNode>, bounds: Rect) -> Vec<(WindowId, Rect)> {
    let mut result = Vec::new();
    if let Some(root) = root {
        root.compute_rects(bounds, &mut result);
    }
    result
}

/// Collect the resize handles between split siblings inside `bounds`.
pub fn resize_handles(root: Option<&LayoutNode>, bounds: Rect) -> Vec<ResizeHandle> {
    let mut handles = Vec::new();
    if let Some(root) = root {
        root.collect_handles(bounds, &mut handles);
    }
    handles
}

/// Layout state of one workspace. A window is either a leaf of `root` or a
/// member of `floating`, never both.
///
/// Every operation returns whether it changed anything; an operation whose
/// preconditions do not hold leaves the layout untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TilingLayout {
    pub(crate) root: Option<LayoutNode>,
    pub(crate) focused: Option<WindowId>,
    pub(crate) floating: Vec<WindowId>,
    pub(crate) fullscreen: Option<WindowId>,
}

impl TilingLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&LayoutNode> {
        self.root.as_ref()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn floating(&self) -> &[WindowId] {
        &self.floating
    }

    pub fn fullscreen(&self) -> Option<&str> {
        self.fullscreen.as_deref()
    }

    pub fn is_tiled(&self, window: &str) -> bool {
        self.root.as_ref().is_some_and(|root| root.contains(window))
    }

    pub fn is_floating(&self, window: &str) -> bool {
        self.floating.iter().any(|id| id == window)
    }

    pub fn contains(&self, window: &str) -> bool {
        self.is_tiled(window) || self.is_floating(window)
    }

    /// True when nothing is tiled and nothing floats.
    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.floating.is_empty()
    }

    /// Get all tiled window IDs in tree order.
    pub fn window_ids(&self) -> Vec<WindowId> {
        let mut ids = Vec::new();
        if let Some(ref root) = self.root {
            root.window_ids(&mut ids);
        }
        ids
    }

    /// Every split's ratios, outermost first. Handy for checking that the
    /// shares of each split still sum to one.
    pub fn split_ratios(&self) -> Vec<Vec<f64>> {
        let mut out = Vec::new();
        if let Some(ref root) = self.root {
            root.for_each_ratios(&mut |ratios| out.push(ratios.to_vec()));
        }
        out
    }

    fn first_leaf(&self) -> Option<WindowId> {
        self.root.as_ref().map(|root| root.first_leaf().to_string())
    }

    /// Tile `window` next to the focused tiled window (or the first leaf),
    /// splitting that leaf in `direction`. The new window takes focus.
    pub fn tile_window(&mut self, window: &str, direction: SplitDirection) -> bool {
        if self.contains(window) {
            return false;
        }

        let focused = self.focused.clone().filter(|id| self.is_tiled(id));
        let target = match focused.or_else(|| self.first_leaf()) {
            Some(target) => target,
            None => {
                self.root = Some(LayoutNode::leaf(window));
                self.focused = Some(window.to_string());
                return true;
            }
        };

        let Some(root) = self.root.as_mut() else {
            return false;
        };
        if !root.split_leaf(&target, window, direction) {
            return false;
        }
        self.focused = Some(window.to_string());
        true
    }

    /// Remove `window` from the tree and from the floating set. If it held
    /// focus, focus falls to the first remaining leaf.
    pub fn untile_window(&mut self, window: &str) -> bool {
        if !self.contains(window) {
            return false;
        }

        if let Some(root) = self.root.take() {
            self.root = root.remove_window(window);
        }
        self.floating.retain(|id| id != window);
        self.release(window);
        true
    }

    /// Clear focus and fullscreen references to a window that left the layout.
    fn release(&mut self, window: &str) {
        if self.focused.as_deref() == Some(window) {
            self.focused = self.first_leaf();
        }
        if self.fullscreen.as_deref() == Some(window) {
            self.fullscreen = None;
        }
    }

    /// Focus a window that is tiled or floating in this layout.
    pub fn focus(&mut self, window: &str) -> bool {
        if !self.contains(window) || self.focused.as_deref() == Some(window) {
            return false;
        }
        self.focused = Some(window.to_string());
        true
    }

    /// Move focus to the nearest tiled window in `direction`.
    pub fn focus_direction(&mut self, direction: Direction, bounds: Rect) -> bool {
        match self.neighbor(direction, bounds) {
            Some(target) => {
                self.focused = Some(target);
                true
            }
            None => false,
        }
    }

    /// Swap the focused window with its nearest tiled neighbor in
    /// `direction`. Focus follows the window, not the slot.
    pub fn move_direction(&mut self, direction: Direction, bounds: Rect) -> bool {
        let Some(target) = self.neighbor(direction, bounds) else {
            return false;
        };
        let (Some(root), Some(focused)) = (self.root.as_mut(), self.focused.as_deref()) else {
            return false;
        };
        root.swap_windows(focused, &target);
        true
    }

    fn neighbor(&self, direction: Direction, bounds: Rect) -> Option<WindowId> {
        let focused = self.focused.as_deref()?;
        let rects = compute_rects(self.root.as_ref(), bounds);
        nearest_in_direction(focused, direction, &rects)
    }

    /// Change the direction of the split directly containing the focused
    /// window. Children and ratios are kept.
    pub fn set_split_direction(&mut self, direction: SplitDirection) -> bool {
        let Some(parent) = self.focused_parent() else {
            return false;
        };
        match parent {
            LayoutNode::Split { direction: dir, .. } if *dir != direction => {
                *dir = direction;
                true
            }
            _ => false,
        }
    }

    /// Grow the focused window's share of its parent split by `delta`,
    /// taken from an adjacent sibling.
    pub fn resize_slot(&mut self, delta: f64) -> bool {
        let (Some(root), Some(focused)) = (self.root.as_mut(), self.focused.as_deref()) else {
            return false;
        };
        let Some(path) = root.path_to(focused) else {
            return false;
        };
        let Some((&index, parent_path)) = path.split_last() else {
            return false;
        };
        match root.node_at_mut(parent_path) {
            Some(parent) => parent.shift_ratio(index, delta),
            None => false,
        }
    }

    fn focused_parent(&mut self) -> Option<&mut LayoutNode> {
        let root = self.root.as_mut()?;
        let path = root.path_to(self.focused.as_deref()?)?;
        let (_, parent_path) = path.split_last()?;
        root.node_at_mut(parent_path)
    }

    /// Float a tiled window, or drop a floating window from the floating
    /// set. Unfloating does not re-tile; the caller does that explicitly.
    pub fn toggle_floating(&mut self, window: &str) -> bool {
        if self.is_floating(window) {
            self.floating.retain(|id| id != window);
            self.release(window);
            return true;
        }
        if !self.is_tiled(window) {
            return false;
        }
        if let Some(root) = self.root.take() {
            self.root = root.remove_window(window);
        }
        self.floating.push(window.to_string());
        true
    }

    /// Add a window straight to the floating set.
    pub fn float_window(&mut self, window: &str) -> bool {
        if self.contains(window) {
            return false;
        }
        self.floating.push(window.to_string());
        true
    }

    /// Make `window` the fullscreen target, or clear it if it already is.
    pub fn toggle_fullscreen(&mut self, window: &str) -> bool {
        if self.fullscreen.as_deref() == Some(window) {
            self.fullscreen = None;
        } else {
            self.fullscreen = Some(window.to_string());
        }
        true
    }
}

impl LayoutEngine for TilingLayout {
    fn compute(&self, bounds: Rect) -> Vec<(WindowId, Rect)> {
        compute_rects(self.root.as_ref(), bounds)
    }

    fn tile(&mut self, window: &str, direction: SplitDirection) -> bool {
        self.tile_window(window, direction)
    }

    fn untile(&mut self, window: &str) -> bool {
        self.untile_window(window)
    }
}
