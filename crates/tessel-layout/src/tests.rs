#[cfg(test)]
mod tests {
    use crate::{
        compute_rects, nearest_in_direction, resize_handles, LayoutNode, PlacementKind,
        TilingLayout, Workspace, WorkspaceState, MIN_RATIO,
    };
    use proptest::prelude::*;
    use tessel_core::{Direction, LayoutEngine, Rect, Size, SplitDirection, Viewport, WindowId};

    const BOUNDS: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    };

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    fn rect_approx_eq(a: &Rect, b: &Rect) -> bool {
        approx_eq(a.x, b.x)
            && approx_eq(a.y, b.y)
            && approx_eq(a.width, b.width)
            && approx_eq(a.height, b.height)
    }

    fn rect_of(rects: &[(WindowId, Rect)], id: &str) -> Rect {
        rects.iter().find(|(w, _)| w == id).unwrap().1
    }

    fn tiled(ids: &[&str]) -> TilingLayout {
        let mut layout = TilingLayout::new();
        for id in ids {
            layout.tile_window(id, SplitDirection::Horizontal);
        }
        layout
    }

    /// a top-left, b top-right, c bottom-left, d bottom-right.
    fn grid() -> TilingLayout {
        let mut layout = tiled(&["a", "b"]);
        layout.focus("a");
        layout.tile_window("c", SplitDirection::Vertical);
        layout.focus("b");
        layout.tile_window("d", SplitDirection::Vertical);
        layout
    }

    fn split(direction: SplitDirection, children: Vec<LayoutNode>, ratios: Vec<f64>) -> LayoutNode {
        LayoutNode::Split {
            direction,
            children,
            ratios,
        }
    }

    // ──────────────────────────────────────────
    // Geometry
    // ──────────────────────────────────────────

    #[test]
    fn test_empty_tree_has_no_rects() {
        assert!(compute_rects(None, BOUNDS).is_empty());
        assert!(TilingLayout::new().compute(BOUNDS).is_empty());
    }

    #[test]
    fn test_single_window_fills_bounds() {
        let layout = tiled(&["a"]);
        let rects = layout.compute(BOUNDS);
        assert_eq!(rects.len(), 1);
        assert!(rect_approx_eq(&rects[0].1, &BOUNDS));
    }

    #[test]
    fn test_horizontal_split_divides_width() {
        let layout = tiled(&["a", "b"]);
        let rects = layout.compute(BOUNDS);

        assert!(rect_approx_eq(&rect_of(&rects, "a"), &Rect::new(0.0, 0.0, 400.0, 600.0)));
        assert!(rect_approx_eq(&rect_of(&rects, "b"), &Rect::new(400.0, 0.0, 400.0, 600.0)));
    }

    #[test]
    fn test_vertical_split_divides_height() {
        let mut layout = tiled(&["a"]);
        layout.tile_window("b", SplitDirection::Vertical);
        let rects = layout.compute(BOUNDS);

        assert!(rect_approx_eq(&rect_of(&rects, "a"), &Rect::new(0.0, 0.0, 800.0, 300.0)));
        assert!(rect_approx_eq(&rect_of(&rects, "b"), &Rect::new(0.0, 300.0, 800.0, 300.0)));
    }

    #[test]
    fn test_nested_splits() {
        let mut layout = tiled(&["a", "b"]);
        layout.tile_window("c", SplitDirection::Vertical);
        let rects = layout.compute(BOUNDS);

        assert!(rect_approx_eq(&rect_of(&rects, "a"), &Rect::new(0.0, 0.0, 400.0, 600.0)));
        assert!(rect_approx_eq(&rect_of(&rects, "b"), &Rect::new(400.0, 0.0, 400.0, 300.0)));
        assert!(rect_approx_eq(&rect_of(&rects, "c"), &Rect::new(400.0, 300.0, 400.0, 300.0)));
    }

    #[test]
    fn test_bounds_offset_is_respected() {
        let bounds = Rect::new(0.0, 28.0, 1280.0, 744.0);
        let rects = tiled(&["a", "b"]).compute(bounds);

        assert!(rect_approx_eq(&rect_of(&rects, "a"), &Rect::new(0.0, 28.0, 640.0, 744.0)));
        assert!(rect_approx_eq(&rect_of(&rects, "b"), &Rect::new(640.0, 28.0, 640.0, 744.0)));
    }

    #[test]
    fn test_rects_are_whole_pixels_and_contiguous() {
        let third = 1.0 / 3.0;
        let root = split(
            SplitDirection::Horizontal,
            vec![LayoutNode::leaf("a"), LayoutNode::leaf("b"), LayoutNode::leaf("c")],
            vec![third, third, third],
        );
        let rects = compute_rects(Some(&root), Rect::new(0.0, 0.0, 1000.0, 500.0));

        let widths: Vec<f32> = rects.iter().map(|(_, r)| r.width).collect();
        assert_eq!(widths, vec![333.0, 334.0, 333.0]);
        for pair in rects.windows(2) {
            assert_eq!(pair[0].1.right(), pair[1].1.x);
        }
    }

    #[test]
    fn test_no_gaps_no_overlaps_grid() {
        assert_no_gaps_no_overlaps(&grid().compute(BOUNDS), BOUNDS);
    }

    #[test]
    fn test_no_gaps_no_overlaps_many_splits() {
        let mut layout = tiled(&["a", "b"]);
        layout.tile_window("c", SplitDirection::Vertical);
        layout.tile_window("d", SplitDirection::Horizontal);
        layout.focus("a");
        layout.tile_window("e", SplitDirection::Vertical);
        layout.resize_slot(0.13);

        let bounds = Rect::new(0.0, 28.0, 1366.0, 712.0);
        let rects = layout.compute(bounds);
        assert_eq!(rects.len(), 5);
        assert_no_gaps_no_overlaps(&rects, bounds);
    }

    fn assert_no_gaps_no_overlaps(rects: &[(WindowId, Rect)], bounds: Rect) {
        let total_area: f32 = rects.iter().map(|(_, r)| r.area()).sum();
        assert!(
            approx_eq(total_area, bounds.area()),
            "Total area {total_area} != bounds area {}",
            bounds.area()
        );

        for i in 0..rects.len() {
            for j in (i + 1)..rects.len() {
                let a = &rects[i].1;
                let b = &rects[j].1;
                let overlap_x = (a.x.max(b.x) - a.right().min(b.right())).min(0.0);
                let overlap_y = (a.y.max(b.y) - a.bottom().min(b.bottom())).min(0.0);
                let overlap_area = overlap_x * overlap_y;
                assert!(
                    overlap_area < 0.01,
                    "Rects {:?} and {:?} overlap with area {overlap_area}",
                    rects[i],
                    rects[j]
                );
            }
        }

        for (id, r) in rects {
            assert!(
                r.x >= bounds.x - 0.01 && r.y >= bounds.y - 0.01,
                "Window {id} starts outside bounds: {r:?}"
            );
            assert!(
                r.right() <= bounds.right() + 0.01 && r.bottom() <= bounds.bottom() + 0.01,
                "Window {id} exceeds bounds: {r:?}"
            );
        }
    }

    #[test]
    fn test_resize_handles_sit_on_boundaries() {
        let layout = tiled(&["a", "b"]);
        let handles = resize_handles(layout.root(), BOUNDS);
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].direction, SplitDirection::Horizontal);
        assert!(rect_approx_eq(&handles[0].rect, &Rect::new(397.0, 0.0, 6.0, 600.0)));

        let handles = resize_handles(grid().root(), BOUNDS);
        assert_eq!(handles.len(), 3);
        let vertical: Vec<_> = handles
            .iter()
            .filter(|h| h.direction == SplitDirection::Vertical)
            .collect();
        assert_eq!(vertical.len(), 2);
        assert!(vertical.iter().all(|h| approx_eq(h.rect.y, 297.0)));
    }

    // ──────────────────────────────────────────
    // Tiling
    // ──────────────────────────────────────────

    #[test]
    fn test_first_tile_becomes_root_and_focus() {
        let layout = tiled(&["a"]);
        assert_eq!(layout.root(), Some(&LayoutNode::leaf("a")));
        assert_eq!(layout.focused(), Some("a"));
    }

    #[test]
    fn test_tile_splits_focused_leaf() {
        let mut layout = tiled(&["a", "b"]);
        layout.tile_window("c", SplitDirection::Vertical);

        let expected = split(
            SplitDirection::Horizontal,
            vec![
                LayoutNode::leaf("a"),
                split(
                    SplitDirection::Vertical,
                    vec![LayoutNode::leaf("b"), LayoutNode::leaf("c")],
                    vec![0.5, 0.5],
                ),
            ],
            vec![0.5, 0.5],
        );
        assert_eq!(layout.root(), Some(&expected));
        assert_eq!(layout.focused(), Some("c"));
    }

    #[test]
    fn test_tile_without_tiled_focus_uses_first_leaf() {
        let mut layout = tiled(&["a", "b"]);
        layout.float_window("f");
        layout.focus("f");
        layout.tile_window("c", SplitDirection::Vertical);

        assert_eq!(layout.window_ids(), vec!["a", "c", "b"]);
        assert_eq!(layout.focused(), Some("c"));
    }

    #[test]
    fn test_tile_twice_is_noop() {
        let mut layout = tiled(&["a", "b"]);
        let before = layout.clone();
        assert!(!layout.tile_window("a", SplitDirection::Vertical));
        assert_eq!(layout, before);
    }

    #[test]
    fn test_tile_floating_window_is_noop() {
        let mut layout = tiled(&["a"]);
        layout.float_window("f");
        let before = layout.clone();
        assert!(!layout.tile_window("f", SplitDirection::Horizontal));
        assert_eq!(layout, before);
    }

    #[test]
    fn test_leaves_match_tiled_ids() {
        let ids = ["a", "b", "c", "d", "e", "f", "g"];
        let mut layout = TilingLayout::new();
        for (i, id) in ids.iter().enumerate() {
            let direction = if i % 2 == 0 {
                SplitDirection::Horizontal
            } else {
                SplitDirection::Vertical
            };
            layout.tile_window(id, direction);
        }

        let mut leaves = layout.window_ids();
        leaves.sort();
        assert_eq!(leaves, ids);
        for ratios in layout.split_ratios() {
            assert!((ratios.iter().sum::<f64>() - 1.0).abs() < 1e-6);
        }
    }

    // ──────────────────────────────────────────
    // Removal
    // ──────────────────────────────────────────

    #[test]
    fn test_untile_collapses_two_child_split() {
        let mut layout = tiled(&["a", "b"]);
        assert!(layout.untile_window("b"));
        assert_eq!(layout.root(), Some(&LayoutNode::leaf("a")));
        assert_eq!(layout.focused(), Some("a"));
    }

    #[test]
    fn test_untile_last_window_empties_layout() {
        let mut layout = tiled(&["a"]);
        assert!(layout.untile_window("a"));
        assert_eq!(layout.root(), None);
        assert_eq!(layout.focused(), None);
        assert!(layout.is_empty());
    }

    #[test]
    fn test_untile_unknown_is_noop() {
        let mut layout = tiled(&["a", "b"]);
        let before = layout.clone();
        assert!(!layout.untile_window("zzz"));
        assert_eq!(layout, before);
    }

    #[test]
    fn test_untile_redistributes_removed_ratio() {
        let mut layout = TilingLayout::new();
        layout.root = Some(split(
            SplitDirection::Horizontal,
            vec![LayoutNode::leaf("a"), LayoutNode::leaf("b"), LayoutNode::leaf("c")],
            vec![0.33, 0.33, 0.34],
        ));
        layout.focused = Some("a".to_string());

        layout.untile_window("b");

        let ratios = layout.split_ratios();
        assert_eq!(ratios.len(), 1);
        assert_eq!(ratios[0].len(), 2);
        assert!((ratios[0][0] - 0.495).abs() < 1e-9);
        assert!((ratios[0][1] - 0.505).abs() < 1e-9);
        assert!((ratios[0].iter().sum::<f64>() - 1.0).abs() < 1e-6);
        assert_eq!(layout.window_ids(), vec!["a", "c"]);
    }

    #[test]
    fn test_untile_collapse_propagates_up() {
        let mut layout = tiled(&["a", "b"]);
        layout.tile_window("c", SplitDirection::Vertical);
        layout.resize_slot(-0.2);

        layout.untile_window("c");

        let expected = split(
            SplitDirection::Horizontal,
            vec![LayoutNode::leaf("a"), LayoutNode::leaf("b")],
            vec![0.5, 0.5],
        );
        assert_eq!(layout.root(), Some(&expected));
        assert_eq!(layout.focused(), Some("a"));
    }

    #[test]
    fn test_untile_keeps_unrelated_focus() {
        let mut layout = tiled(&["a", "b", "c"]);
        layout.focus("b");
        layout.untile_window("c");
        assert_eq!(layout.focused(), Some("b"));
    }

    #[test]
    fn test_untile_removes_floating_member() {
        let mut layout = tiled(&["a"]);
        layout.float_window("f");
        assert!(layout.untile_window("f"));
        assert!(layout.floating().is_empty());
        assert_eq!(layout.window_ids(), vec!["a"]);
    }

    #[test]
    fn test_untile_clears_fullscreen_target() {
        let mut layout = tiled(&["a", "b"]);
        layout.toggle_fullscreen("b");
        layout.untile_window("b");
        assert_eq!(layout.fullscreen(), None);
    }

    // ──────────────────────────────────────────
    // Floating & fullscreen
    // ──────────────────────────────────────────

    #[test]
    fn test_toggle_floating_moves_out_of_tree() {
        let mut layout = tiled(&["a", "b"]);
        assert!(layout.toggle_floating("b"));

        assert!(layout.is_floating("b"));
        assert!(!layout.is_tiled("b"));
        assert_eq!(layout.root(), Some(&LayoutNode::leaf("a")));
        assert_eq!(layout.focused(), Some("b"));
    }

    #[test]
    fn test_toggle_floating_off_does_not_retile() {
        let mut layout = tiled(&["a", "b"]);
        layout.toggle_floating("b");
        assert!(layout.toggle_floating("b"));

        assert!(!layout.contains("b"));
        assert_eq!(layout.window_ids(), vec!["a"]);
        assert_eq!(layout.focused(), Some("a"));
    }

    #[test]
    fn test_toggle_floating_unknown_is_noop() {
        let mut layout = tiled(&["a"]);
        assert!(!layout.toggle_floating("ghost"));
        assert!(layout.floating().is_empty());
    }

    #[test]
    fn test_toggle_fullscreen_twice_clears() {
        let mut layout = tiled(&["a", "b"]);
        layout.toggle_fullscreen("a");
        assert_eq!(layout.fullscreen(), Some("a"));
        layout.toggle_fullscreen("a");
        assert_eq!(layout.fullscreen(), None);
    }

    #[test]
    fn test_toggle_fullscreen_switches_target() {
        let mut layout = tiled(&["a", "b"]);
        layout.toggle_fullscreen("a");
        layout.toggle_fullscreen("b");
        assert_eq!(layout.fullscreen(), Some("b"));
    }

    fn viewport() -> Viewport {
        Viewport::new(Size::new(800.0, 656.0), 28.0, 28.0)
    }

    #[test]
    fn test_placements_tiled_then_floating() {
        let mut layout = tiled(&["a", "b"]);
        layout.float_window("f");
        let frame = Rect::new(100.0, 100.0, 300.0, 200.0);

        let placements = layout.placements(&viewport(), |id| (id == "f").then_some(frame));

        let kinds: Vec<_> = placements.iter().map(|p| (p.window.as_str(), p.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("a", PlacementKind::Tiled),
                ("b", PlacementKind::Tiled),
                ("f", PlacementKind::Floating),
            ]
        );
        assert!(rect_approx_eq(&placements[0].rect, &Rect::new(0.0, 28.0, 400.0, 600.0)));
        assert_eq!(placements[2].rect, frame);
    }

    #[test]
    fn test_placements_fullscreen_is_exclusive() {
        let mut layout = tiled(&["a", "b"]);
        layout.toggle_fullscreen("b");

        let placements = layout.placements(&viewport(), |_| None);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].window, "b");
        assert_eq!(placements[0].kind, PlacementKind::Fullscreen);
        assert_eq!(placements[0].rect, Rect::new(0.0, 0.0, 800.0, 656.0));
    }

    #[test]
    fn test_placements_ignore_foreign_fullscreen() {
        let mut layout = tiled(&["a"]);
        layout.toggle_fullscreen("elsewhere");
        let placements = layout.placements(&viewport(), |_| None);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].kind, PlacementKind::Tiled);
    }

    // ──────────────────────────────────────────
    // Split direction & resize
    // ──────────────────────────────────────────

    #[test]
    fn test_set_split_direction_changes_parent_only() {
        let mut layout = tiled(&["a", "b"]);
        layout.resize_slot(0.1);
        assert!(layout.set_split_direction(SplitDirection::Vertical));

        match layout.root() {
            Some(LayoutNode::Split {
                direction, ratios, ..
            }) => {
                assert_eq!(*direction, SplitDirection::Vertical);
                assert!((ratios[1] - 0.6).abs() < 1e-9);
            }
            other => panic!("expected split root, got {other:?}"),
        }
    }

    #[test]
    fn test_set_split_direction_on_root_leaf_is_noop() {
        let mut layout = tiled(&["a"]);
        assert!(!layout.set_split_direction(SplitDirection::Vertical));
        assert_eq!(layout.root(), Some(&LayoutNode::leaf("a")));
    }

    #[test]
    fn test_resize_takes_from_previous_sibling() {
        let mut layout = tiled(&["a", "b"]);
        assert!(layout.resize_slot(0.1));
        let ratios = &layout.split_ratios()[0];
        assert!((ratios[0] - 0.4).abs() < 1e-9);
        assert!((ratios[1] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_resize_first_child_takes_from_next() {
        let mut layout = tiled(&["a", "b"]);
        layout.focus("a");
        layout.resize_slot(0.2);
        let ratios = &layout.split_ratios()[0];
        assert!((ratios[0] - 0.7).abs() < 1e-9);
        assert!((ratios[1] - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_resize_clamps_to_min_ratio() {
        let mut layout = tiled(&["a", "b"]);
        layout.resize_slot(10.0);
        let ratios = &layout.split_ratios()[0];
        assert!(ratios.iter().all(|r| *r >= MIN_RATIO - 1e-9), "{ratios:?}");
        assert!((ratios[1] - 0.9).abs() < 1e-9);

        layout.resize_slot(-10.0);
        let ratios = &layout.split_ratios()[0];
        assert!(ratios.iter().all(|r| *r >= MIN_RATIO - 1e-9), "{ratios:?}");
        assert!((ratios[0] - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_resize_without_parent_is_noop() {
        let mut layout = tiled(&["a"]);
        assert!(!layout.resize_slot(0.1));
        assert!(!TilingLayout::new().resize_slot(0.1));
    }

    // ──────────────────────────────────────────
    // Navigation
    // ──────────────────────────────────────────

    #[test]
    fn test_nearest_respects_dead_zone() {
        let rects = vec![
            ("a".to_string(), Rect::new(0.0, 0.0, 100.0, 100.0)),
            ("b".to_string(), Rect::new(8.0, 200.0, 100.0, 100.0)),
        ];
        assert_eq!(nearest_in_direction("a", Direction::Right, &rects), None);
        assert_eq!(
            nearest_in_direction("a", Direction::Down, &rects),
            Some("b".to_string())
        );
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let rects = vec![
            ("a".to_string(), Rect::new(100.0, 100.0, 100.0, 100.0)),
            ("b".to_string(), Rect::new(300.0, 0.0, 100.0, 100.0)),
            ("c".to_string(), Rect::new(300.0, 200.0, 100.0, 100.0)),
        ];
        assert_eq!(
            nearest_in_direction("a", Direction::Right, &rects),
            Some("b".to_string())
        );
    }

    #[test]
    fn test_nearest_unknown_source() {
        let rects = vec![("a".to_string(), BOUNDS)];
        assert_eq!(nearest_in_direction("x", Direction::Left, &rects), None);
    }

    #[test]
    fn test_focus_direction() {
        let mut layout = grid();
        layout.focus("a");
        assert!(layout.focus_direction(Direction::Down, BOUNDS));
        assert_eq!(layout.focused(), Some("c"));
        assert!(layout.focus_direction(Direction::Right, BOUNDS));
        assert_eq!(layout.focused(), Some("d"));
        assert!(!layout.focus_direction(Direction::Right, BOUNDS));
        assert_eq!(layout.focused(), Some("d"));
    }

    #[test]
    fn test_move_direction_swaps_grid_neighbors() {
        let mut layout = grid();
        layout.focus("a");
        let shape_before = layout.split_ratios();

        assert!(layout.move_direction(Direction::Right, BOUNDS));

        let rects = layout.compute(BOUNDS);
        assert!(rect_approx_eq(&rect_of(&rects, "a"), &Rect::new(400.0, 0.0, 400.0, 300.0)));
        assert!(rect_approx_eq(&rect_of(&rects, "b"), &Rect::new(0.0, 0.0, 400.0, 300.0)));
        assert!(rect_approx_eq(&rect_of(&rects, "c"), &Rect::new(0.0, 300.0, 400.0, 300.0)));
        assert!(rect_approx_eq(&rect_of(&rects, "d"), &Rect::new(400.0, 300.0, 400.0, 300.0)));
        assert_eq!(layout.focused(), Some("a"));
        assert_eq!(layout.split_ratios(), shape_before);
        assert_eq!(layout.root().map(LayoutNode::leaf_count), Some(4));
    }

    #[test]
    fn test_move_direction_without_neighbor_is_noop() {
        let mut layout = grid();
        layout.focus("a");
        let before = layout.clone();
        assert!(!layout.move_direction(Direction::Up, BOUNDS));
        assert_eq!(layout, before);
    }

    // ──────────────────────────────────────────
    // Workspaces
    // ──────────────────────────────────────────

    #[test]
    fn test_ten_workspaces_first_active() {
        let state = WorkspaceState::new();
        assert_eq!(state.workspaces().len(), 10);
        assert_eq!(state.active_id(), 1);
        assert!(state.occupied_workspaces().is_empty());
        let ids: Vec<_> = state.workspaces().iter().map(|ws| ws.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_workspace_keys() {
        let state = WorkspaceState::new();
        assert_eq!(state.workspace(1).map(Workspace::key), Some('1'));
        assert_eq!(state.workspace(10).map(Workspace::key), Some('0'));
        assert_eq!(Workspace::id_for_key('0'), Some(10));
        assert_eq!(Workspace::id_for_key('7'), Some(7));
        assert_eq!(Workspace::id_for_key('x'), None);
    }

    #[test]
    fn test_workspace_names() {
        let state = WorkspaceState::with_names(&["web".to_string(), String::new()]);
        assert_eq!(state.workspace(1).unwrap().name, "web");
        assert_eq!(state.workspace(2).unwrap().name, "2");
        assert_eq!(state.workspace(10).unwrap().name, "10");
    }

    #[test]
    fn test_switch_workspace_keeps_layouts() {
        let mut state = WorkspaceState::new();
        state.active_layout_mut().tile_window("a", SplitDirection::Horizontal);

        assert!(state.switch_workspace(4));
        assert_eq!(state.active_id(), 4);
        assert!(state.active_layout().is_empty());
        assert!(!state.switch_workspace(4));
        assert!(!state.switch_workspace(0));
        assert!(!state.switch_workspace(11));

        state.switch_workspace(1);
        assert_eq!(state.active_layout().window_ids(), vec!["a"]);
    }

    #[test]
    fn test_move_tiled_window_to_empty_workspace() {
        let mut state = WorkspaceState::new();
        let layout = state.active_layout_mut();
        layout.tile_window("a", SplitDirection::Horizontal);
        layout.tile_window("x", SplitDirection::Horizontal);

        assert!(state.move_to_workspace("x", 3));

        let source = state.active_layout();
        assert!(!source.contains("x"));
        assert_eq!(source.focused(), Some("a"));

        let target = &state.workspace(3).unwrap().layout;
        assert_eq!(target.root(), Some(&LayoutNode::leaf("x")));
        assert_eq!(target.focused(), Some("x"));
        assert_eq!(state.active_id(), 1);
        assert_eq!(state.occupied_workspaces(), vec![1, 3]);
        assert_eq!(state.workspace_of("x"), Some(3));
        assert_eq!(state.workspace_of("a"), Some(1));
        assert_eq!(state.workspace_of("missing"), None);
    }

    #[test]
    fn test_move_tiled_window_beside_target_focus() {
        let mut state = WorkspaceState::new();
        state.switch_workspace(2);
        state.active_layout_mut().tile_window("w", SplitDirection::Vertical);
        state.switch_workspace(1);
        state.active_layout_mut().tile_window("x", SplitDirection::Horizontal);

        state.move_to_workspace("x", 2);

        let target = &state.workspace(2).unwrap().layout;
        let expected = split(
            SplitDirection::Horizontal,
            vec![LayoutNode::leaf("w"), LayoutNode::leaf("x")],
            vec![0.5, 0.5],
        );
        assert_eq!(target.root(), Some(&expected));
        assert_eq!(target.focused(), Some("x"));
        assert!(state.active_layout().is_empty());
        assert_eq!(state.occupied_workspaces(), vec![2]);
    }

    #[test]
    fn test_move_floating_window_stays_floating() {
        let mut state = WorkspaceState::new();
        let layout = state.active_layout_mut();
        layout.tile_window("a", SplitDirection::Horizontal);
        layout.float_window("f");
        layout.focus("f");

        assert!(state.move_to_workspace("f", 10));

        assert!(!state.active_layout().contains("f"));
        assert_eq!(state.active_layout().focused(), Some("a"));
        let target = &state.workspace(10).unwrap().layout;
        assert_eq!(target.floating().to_vec(), vec!["f".to_string()]);
        assert_eq!(target.root(), None);
        assert_eq!(target.focused(), Some("f"));
    }

    #[test]
    fn test_move_to_workspace_noops() {
        let mut state = WorkspaceState::new();
        state.active_layout_mut().tile_window("a", SplitDirection::Horizontal);
        let before = state.clone();

        assert!(!state.move_to_workspace("a", 1));
        assert!(!state.move_to_workspace("ghost", 2));
        assert!(!state.move_to_workspace("a", 11));
        assert_eq!(state, before);
    }

    // ──────────────────────────────────────────
    // Serialization
    // ──────────────────────────────────────────

    #[test]
    fn test_leaf_serializes_tagged() {
        let json = serde_json::to_value(LayoutNode::leaf("a")).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "leaf", "windowId": "a" }));

        let node: LayoutNode = serde_json::from_value(serde_json::json!({
            "type": "split",
            "direction": "vertical",
            "children": [
                { "type": "leaf", "windowId": "a" },
                { "type": "leaf", "windowId": "b" }
            ],
            "ratios": [0.25, 0.75]
        }))
        .unwrap();
        assert_eq!(node.leaf_count(), 2);
    }

    // ──────────────────────────────────────────
    // Random operation sequences
    // ──────────────────────────────────────────

    #[derive(Debug, Clone)]
    enum Op {
        Tile(usize, SplitDirection),
        Untile(usize),
        Focus(usize),
        ToggleFloating(usize),
        Resize(f64),
        SetDirection(SplitDirection),
        Move(Direction),
        FocusDirection(Direction),
    }

    fn arbitrary_split() -> impl Strategy<Value = SplitDirection> {
        prop_oneof![Just(SplitDirection::Horizontal), Just(SplitDirection::Vertical)]
    }

    fn arbitrary_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::Up),
            Just(Direction::Down),
        ]
    }

    fn arbitrary_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0..8usize, arbitrary_split()).prop_map(|(id, dir)| Op::Tile(id, dir)),
            1 => (0..8usize).prop_map(Op::Untile),
            1 => (0..8usize).prop_map(Op::Focus),
            1 => (0..8usize).prop_map(Op::ToggleFloating),
            2 => (-0.5..0.5f64).prop_map(Op::Resize),
            1 => arbitrary_split().prop_map(Op::SetDirection),
            1 => arbitrary_direction().prop_map(Op::Move),
            1 => arbitrary_direction().prop_map(Op::FocusDirection),
        ]
    }

    fn apply(layout: &mut TilingLayout, op: &Op) {
        let name = |id: &usize| format!("w{id}");
        match op {
            Op::Tile(id, dir) => {
                layout.tile_window(&name(id), *dir);
            }
            Op::Untile(id) => {
                layout.untile_window(&name(id));
            }
            Op::Focus(id) => {
                layout.focus(&name(id));
            }
            Op::ToggleFloating(id) => {
                layout.toggle_floating(&name(id));
            }
            Op::Resize(delta) => {
                layout.resize_slot(*delta);
            }
            Op::SetDirection(dir) => {
                layout.set_split_direction(*dir);
            }
            Op::Move(dir) => {
                layout.move_direction(*dir, BOUNDS);
            }
            Op::FocusDirection(dir) => {
                layout.focus_direction(*dir, BOUNDS);
            }
        }
    }

    fn check_node(node: &LayoutNode) {
        if let LayoutNode::Split {
            children, ratios, ..
        } = node
        {
            assert!(children.len() >= 2, "split with {} children", children.len());
            assert_eq!(children.len(), ratios.len());
            let sum: f64 = ratios.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "ratios {ratios:?} sum to {sum}");
            assert!(ratios.iter().all(|r| *r >= MIN_RATIO - 1e-9), "ratios {ratios:?}");
            children.iter().for_each(check_node);
        }
    }

    fn check_invariants(layout: &TilingLayout) {
        let leaves = layout.window_ids();
        let mut unique = leaves.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), leaves.len(), "duplicate leaves {leaves:?}");

        for id in layout.floating() {
            assert!(!leaves.contains(id), "{id} both tiled and floating");
        }
        if let Some(focused) = layout.focused() {
            assert!(layout.contains(focused), "focus on absent window {focused}");
        }
        match layout.root() {
            Some(root) => {
                check_node(root);
                assert_no_gaps_no_overlaps(&layout.compute(BOUNDS), BOUNDS);
            }
            None => assert!(layout.compute(BOUNDS).is_empty()),
        }
    }

    #[test]
    fn test_invariants_hold_after_emptying_layout() {
        let mut layout = TilingLayout::new();
        check_invariants(&layout);
        apply(&mut layout, &Op::Untile(0));
        check_invariants(&layout);
        apply(&mut layout, &Op::Tile(0, SplitDirection::Vertical));
        apply(&mut layout, &Op::Untile(0));
        check_invariants(&layout);
    }

    proptest! {
        #[test]
        fn random_operations_keep_invariants(ops in prop::collection::vec(arbitrary_op(), 1..120)) {
            let mut layout = TilingLayout::new();
            for op in &ops {
                apply(&mut layout, op);
                check_invariants(&layout);
            }
        }

        #[test]
        fn tiling_distinct_ids_tiles_exactly_those(
            dirs in prop::collection::vec(arbitrary_split(), 1..30)
        ) {
            let mut layout = TilingLayout::new();
            let mut expected = Vec::new();
            for (i, dir) in dirs.iter().enumerate() {
                let id = format!("w{i}");
                layout.tile_window(&id, *dir);
                expected.push(id);
            }
            let mut leaves = layout.window_ids();
            leaves.sort();
            expected.sort();
            prop_assert_eq!(leaves, expected);
            check_invariants(&layout);
        }
    }
}
