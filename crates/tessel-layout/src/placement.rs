use serde::Serialize;
use tessel_core::{Rect, Viewport, WindowId};

use crate::{compute_rects, TilingLayout};

/// Where a window's geometry comes from this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementKind {
    Tiled,
    Floating,
    Fullscreen,
}

/// One window's render rect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub window: WindowId,
    pub rect: Rect,
    pub kind: PlacementKind,
}

impl TilingLayout {
    /// Resolve the rect every window of this layout should be drawn at.
    ///
    /// While the fullscreen target is tiled or floating here, it is the only
    /// placement and covers the whole screen. Otherwise tiled windows come
    /// first in tree order, then floating windows in floating order with the
    /// frame `floating_rect` reports for them. Floating windows without a
    /// frame are skipped.
    pub fn placements(
        &self,
        viewport: &Viewport,
        floating_rect: impl Fn(&str) -> Option<Rect>,
    ) -> Vec<Placement> {
        if let Some(target) = self.fullscreen.as_deref().filter(|id| self.contains(id)) {
            return vec![Placement {
                window: target.to_string(),
                rect: viewport.screen_rect(),
                kind: PlacementKind::Fullscreen,
            }];
        }

        let tiled = compute_rects(self.root.as_ref(), viewport.usable_rect())
            .into_iter()
            .map(|(window, rect)| Placement {
                window,
                rect,
                kind: PlacementKind::Tiled,
            });
        let floating = self.floating.iter().filter_map(|id| {
            floating_rect(id).map(|rect| Placement {
                window: id.clone(),
                rect,
                kind: PlacementKind::Floating,
            })
        });

        tiled.chain(floating).collect()
    }
}
