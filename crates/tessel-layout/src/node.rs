use serde::{Deserialize, Serialize};
use tessel_core::{Rect, ResizeHandle, SplitDirection, WindowId};

use crate::MIN_RATIO;

// ──────────────────────────────────────────────
// LayoutNode: n-ary split tree
// ──────────────────────────────────────────────

/// A node of the tiling tree. Splits hold at least two children and one
/// ratio per child, paired by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutNode {
    Leaf {
        #[serde(rename = "windowId")]
        window_id: WindowId,
    },
    Split {
        direction: SplitDirection,
        children: Vec<LayoutNode>,
        ratios: Vec<f64>,
    },
}

impl LayoutNode {
    pub fn leaf(window_id: impl Into<WindowId>) -> Self {
        LayoutNode::Leaf {
            window_id: window_id.into(),
        }
    }

    /// Returns true if this node (or any descendant) holds the given window.
    pub fn contains(&self, window: &str) -> bool {
        match self {
            LayoutNode::Leaf { window_id } => window_id == window,
            LayoutNode::Split { children, .. } => children.iter().any(|c| c.contains(window)),
        }
    }

    /// Collect all leaf window IDs in depth-first, left-to-right order.
    pub fn window_ids(&self, out: &mut Vec<WindowId>) {
        match self {
            LayoutNode::Leaf { window_id } => out.push(window_id.clone()),
            LayoutNode::Split { children, .. } => {
                for child in children {
                    child.window_ids(out);
                }
            }
        }
    }

    /// The first leaf in depth-first order.
    pub fn first_leaf(&self) -> &str {
        match self {
            LayoutNode::Leaf { window_id } => window_id,
            LayoutNode::Split { children, .. } => children[0].first_leaf(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            LayoutNode::Leaf { .. } => 1,
            LayoutNode::Split { children, .. } => children.iter().map(LayoutNode::leaf_count).sum(),
        }
    }

    /// Traverse the tree and compute the rect for every leaf window.
    pub(crate) fn compute_rects(&self, rect: Rect, out: &mut Vec<(WindowId, Rect)>) {
        match self {
            LayoutNode::Leaf { window_id } => out.push((window_id.clone(), rect.round())),
            LayoutNode::Split {
                direction,
                children,
                ratios,
            } => {
                for (child, child_rect) in children.iter().zip(split_rect(rect, *direction, ratios)) {
                    child.compute_rects(child_rect, out);
                }
            }
        }
    }

    /// Child-index path from this node down to the leaf holding `window`.
    /// An empty path means this node is the leaf itself.
    pub(crate) fn path_to(&self, window: &str) -> Option<Vec<usize>> {
        match self {
            LayoutNode::Leaf { window_id } if window_id == window => Some(Vec::new()),
            LayoutNode::Leaf { .. } => None,
            LayoutNode::Split { children, .. } => {
                children.iter().enumerate().find_map(|(i, child)| {
                    child.path_to(window).map(|mut path| {
                        path.insert(0, i);
                        path
                    })
                })
            }
        }
    }

    pub(crate) fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut LayoutNode> {
        match path.split_first() {
            None => Some(self),
            Some((&i, rest)) => match self {
                LayoutNode::Split { children, .. } => children.get_mut(i)?.node_at_mut(rest),
                LayoutNode::Leaf { .. } => None,
            },
        }
    }

    /// Replace the leaf holding `target` with a two-child split of
    /// `[target, new_window]` at even ratios.
    pub(crate) fn split_leaf(
        &mut self,
        target: &str,
        new_window: &str,
        direction: SplitDirection,
    ) -> bool {
        let Some(path) = self.path_to(target) else {
            return false;
        };
        let Some(node) = self.node_at_mut(&path) else {
            return false;
        };
        *node = LayoutNode::Split {
            direction,
            children: vec![LayoutNode::leaf(target), LayoutNode::leaf(new_window)],
            ratios: vec![0.5, 0.5],
        };
        true
    }

    /// Remove every leaf holding `target`. Returns the node that takes this
    /// node's place, or `None` if nothing of it survives.
    ///
    /// A split left with one child collapses into that child. A split left
    /// with several children spreads the removed share evenly across them.
    pub(crate) fn remove_window(self, target: &str) -> Option<LayoutNode> {
        match self {
            LayoutNode::Leaf { window_id } => {
                (window_id != target).then_some(LayoutNode::Leaf { window_id })
            }
            LayoutNode::Split {
                direction,
                children,
                ratios,
            } => {
                let mut kept = Vec::with_capacity(children.len());
                let mut kept_ratios = Vec::with_capacity(ratios.len());
                let mut removed = 0.0_f64;

                for (child, ratio) in children.into_iter().zip(ratios) {
                    match child.remove_window(target) {
                        Some(node) => {
                            kept.push(node);
                            kept_ratios.push(ratio);
                        }
                        None => removed += ratio,
                    }
                }

                match kept.len() {
                    0 => None,
                    1 => kept.pop(),
                    n => {
                        if removed > 0.0 {
                            let extra = removed / n as f64;
                            for ratio in &mut kept_ratios {
                                *ratio += extra;
                            }
                        }
                        Some(LayoutNode::Split {
                            direction,
                            children: kept,
                            ratios: kept_ratios,
                        })
                    }
                }
            }
        }
    }

    /// Trade the payloads of the leaves holding `a` and `b`. The tree shape
    /// and ratios are untouched.
    pub(crate) fn swap_windows(&mut self, a: &str, b: &str) {
        match self {
            LayoutNode::Leaf { window_id } => {
                if window_id.as_str() == a {
                    *window_id = b.to_string();
                } else if window_id.as_str() == b {
                    *window_id = a.to_string();
                }
            }
            LayoutNode::Split { children, .. } => {
                for child in children {
                    child.swap_windows(a, b);
                }
            }
        }
    }

    /// Shift `delta` of the parent split's extent into the child at `index`,
    /// taken from its previous sibling (or the next one at index 0).
    /// Neither ratio is allowed below `MIN_RATIO`.
    pub(crate) fn shift_ratio(&mut self, index: usize, delta: f64) -> bool {
        let LayoutNode::Split { ratios, .. } = self else {
            return false;
        };
        if index >= ratios.len() {
            return false;
        }
        let other = if index == 0 { 1 } else { index - 1 };

        let clamped = delta.min(ratios[other] - MIN_RATIO).max(MIN_RATIO - ratios[index]);
        if clamped == 0.0 {
            return false;
        }
        ratios[index] += clamped;
        ratios[other] -= clamped;
        true
    }

    /// Collect one handle per boundary between consecutive children of every
    /// split, centred on that boundary.
    pub(crate) fn collect_handles(&self, rect: Rect, out: &mut Vec<ResizeHandle>) {
        let LayoutNode::Split {
            direction,
            children,
            ratios,
        } = self
        else {
            return;
        };

        let child_rects = split_rect(rect, *direction, ratios);
        for (i, (child, child_rect)) in children.iter().zip(&child_rects).enumerate() {
            if i + 1 < children.len() {
                let half = HANDLE_SIZE / 2.0;
                let handle = match direction {
                    SplitDirection::Horizontal => Rect::new(
                        child_rect.right() - half,
                        rect.y,
                        HANDLE_SIZE,
                        rect.height,
                    ),
                    SplitDirection::Vertical => Rect::new(
                        rect.x,
                        child_rect.bottom() - half,
                        rect.width,
                        HANDLE_SIZE,
                    ),
                };
                out.push(ResizeHandle {
                    direction: *direction,
                    rect: handle,
                });
            }
            child.collect_handles(*child_rect, out);
        }
    }

    /// Visit every split's ratio list.
    pub(crate) fn for_each_ratios(&self, f: &mut impl FnMut(&[f64])) {
        if let LayoutNode::Split {
            children, ratios, ..
        } = self
        {
            f(ratios);
            for child in children {
                child.for_each_ratios(f);
            }
        }
    }
}

// ──────────────────────────────────────────────
// Resize handles
// ──────────────────────────────────────────────

/// Thickness of a split resize handle in pixels.
pub const HANDLE_SIZE: f32 = 6.0;

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

/// Partition a rect along `direction` into consecutive sub-rects sized by
/// `ratios`. The last sub-rect ends exactly on the parent's far edge so
/// accumulated ratio drift never opens a gap.
pub(crate) fn split_rect(rect: Rect, direction: SplitDirection, ratios: &[f64]) -> Vec<Rect> {
    let (start, extent) = match direction {
        SplitDirection::Horizontal => (f64::from(rect.x), f64::from(rect.width)),
        SplitDirection::Vertical => (f64::from(rect.y), f64::from(rect.height)),
    };

    let mut out = Vec::with_capacity(ratios.len());
    let mut edge = start;
    for (i, ratio) in ratios.iter().enumerate() {
        let next = if i + 1 == ratios.len() {
            start + extent
        } else {
            edge + extent * ratio
        };
        let (offset, length) = (edge as f32, (next - edge) as f32);
        out.push(match direction {
            SplitDirection::Horizontal => Rect::new(offset, rect.y, length, rect.height),
            SplitDirection::Vertical => Rect::new(rect.x, offset, rect.width, length),
        });
        edge = next;
    }
    out
}
