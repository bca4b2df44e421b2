// The dispatcher: owns the workspaces, the window registry and the pointer
// router, and applies one input at a time to them.

use serde::Serialize;
use tessel_core::{InputEvent, Rect, SplitDirection, Viewport, WindowId, WindowState, WorkspaceId};
use tessel_input::{Action, Command, Router, Scene};
use tessel_layout::{
    compute_rects, resize_handles, Placement, PlacementKind, TilingLayout, WorkspaceState,
};

use crate::input::Input;
use crate::registry::Registry;
use crate::settings::TesselSettings;

/// Everything a renderer needs to draw the active workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub workspace: WorkspaceId,
    pub workspace_name: String,
    pub occupied: Vec<WorkspaceId>,
    pub focused: Option<WindowId>,
    pub next_split: SplitDirection,
    pub placements: Vec<Placement>,
    pub windows: Vec<WindowState>,
}

pub struct Shell {
    workspaces: WorkspaceState,
    registry: Registry,
    router: Router,
    next_split: SplitDirection,
    resize_step: f64,
}

impl Shell {
    pub fn new(settings: &TesselSettings) -> Self {
        Self {
            workspaces: WorkspaceState::with_names(&settings.workspace_names),
            registry: Registry::new(),
            router: Router::with_frame_sizes(
                settings.viewport(),
                settings.floating_default_size,
                settings.floating_min_size,
            ),
            next_split: settings.default_split,
            resize_step: settings.resize_step,
        }
    }

    pub fn workspaces(&self) -> &WorkspaceState {
        &self.workspaces
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn next_split(&self) -> SplitDirection {
        self.next_split
    }

    fn viewport(&self) -> Viewport {
        *self.router.viewport()
    }

    fn layout(&self) -> &TilingLayout {
        self.workspaces.active_layout()
    }

    fn layout_mut(&mut self) -> &mut TilingLayout {
        self.workspaces.active_layout_mut()
    }

    fn focused(&self) -> Option<WindowId> {
        self.layout().focused().map(str::to_string)
    }

    /// Apply one parsed line. Returns whether anything visible changed.
    pub fn handle(&mut self, input: Input) -> bool {
        match input {
            Input::Command(command) => self.execute(command),
            Input::Pointer(event) => self.pointer(event),
        }
    }

    // ── Commands ────────────────────────────────

    pub fn execute(&mut self, command: Command) -> bool {
        let usable = self.viewport().usable_rect();
        match command {
            Command::Focus(direction) => {
                let changed = self.layout_mut().focus_direction(direction, usable);
                self.raise_focused();
                changed
            }
            Command::FocusWindow(id) => {
                let changed = self.layout_mut().focus(&id);
                self.registry.raise(&id) || changed
            }
            Command::Move(direction) => self.layout_mut().move_direction(direction, usable),
            Command::Split(direction) => {
                let changed = self.next_split != direction;
                self.next_split = direction;
                changed
            }
            Command::Layout(direction) => self.layout_mut().set_split_direction(direction),
            Command::Grow(step) => {
                let step = step.unwrap_or(self.resize_step);
                self.layout_mut().resize_slot(step)
            }
            Command::Shrink(step) => {
                let step = step.unwrap_or(self.resize_step);
                self.layout_mut().resize_slot(-step)
            }
            Command::ResizeBy(delta) => self.layout_mut().resize_slot(delta),
            Command::ToggleFloating => self.toggle_floating(),
            Command::ToggleFullscreen => match self.focused() {
                Some(id) => self.layout_mut().toggle_fullscreen(&id),
                None => false,
            },
            Command::ToggleMaximize => match self.focused() {
                Some(id) if self.layout().is_floating(&id) => self.router.toggle_maximize(&id),
                _ => false,
            },
            Command::Workspace(id) => {
                self.router.end_drag();
                self.workspaces.switch_workspace(id)
            }
            Command::MoveToWorkspace(target) => match self.focused() {
                Some(id) => self.workspaces.move_to_workspace(&id, target),
                None => false,
            },
            Command::Open { id, title } => self.open(&id, title.as_deref()),
            Command::Close => match self.focused() {
                Some(id) => self.close(&id),
                None => false,
            },
            Command::Minimize => match self.focused() {
                Some(id) => self.minimize(&id),
                None => false,
            },
            Command::Restore(id) => self.restore(&id),
            Command::Tile(id) => {
                if self.workspaces.workspace_of(&id).is_some() {
                    return false;
                }
                let direction = self.next_split;
                self.layout_mut().tile_window(&id, direction)
            }
            Command::Untile(id) => self.layout_mut().untile_window(&id),
        }
    }

    fn raise_focused(&mut self) {
        if let Some(id) = self.focused() {
            self.registry.raise(&id);
        }
    }

    /// Float the focused tiled window in its frame, or put a floating one
    /// back into the tree beside the new focus.
    fn toggle_floating(&mut self) -> bool {
        let Some(id) = self.focused() else {
            return false;
        };
        if self.layout().is_floating(&id) {
            let direction = self.next_split;
            let layout = self.layout_mut();
            layout.toggle_floating(&id);
            layout.tile_window(&id, direction);
            return true;
        }
        if !self.layout_mut().toggle_floating(&id) {
            return false;
        }
        self.router.ensure_frame(&id);
        self.registry.raise(&id);
        true
    }

    // ── Window lifecycle ────────────────────────

    /// Show a window and tile it into the active workspace, unless some
    /// workspace already holds it.
    fn open(&mut self, id: &str, title: Option<&str>) -> bool {
        let shown = self.registry.open(id, title);
        if self.workspaces.workspace_of(id).is_some() {
            return shown;
        }
        let direction = self.next_split;
        self.layout_mut().tile_window(id, direction) || shown
    }

    fn close(&mut self, id: &str) -> bool {
        let removed = self.layout_mut().untile_window(id);
        self.router.remove_frame(id);
        self.registry.close(id) || removed
    }

    fn minimize(&mut self, id: &str) -> bool {
        let removed = self.layout_mut().untile_window(id);
        self.registry.minimize(id) || removed
    }

    fn restore(&mut self, id: &str) -> bool {
        if !self.registry.restore(id) {
            return false;
        }
        if self.workspaces.workspace_of(id).is_none() {
            let direction = self.next_split;
            self.layout_mut().tile_window(id, direction);
        }
        true
    }

    // ── Pointer ─────────────────────────────────

    pub fn pointer(&mut self, event: InputEvent) -> bool {
        let viewport = self.viewport();
        let layout = self.workspaces.active_layout();

        let (tiles, handles, floating) = match layout.fullscreen().filter(|id| layout.contains(id)) {
            Some(target) => (
                vec![(target.to_string(), viewport.screen_rect())],
                Vec::new(),
                Vec::new(),
            ),
            None => {
                let usable = viewport.usable_rect();
                let mut floating: Vec<WindowId> = layout
                    .floating()
                    .iter()
                    .filter(|id| self.registry.is_shown(id))
                    .cloned()
                    .collect();
                floating.sort_by_key(|id| self.registry.z_index(id));
                (
                    compute_rects(layout.root(), usable),
                    resize_handles(layout.root(), usable),
                    floating,
                )
            }
        };

        let scene = Scene {
            tiles: &tiles,
            handles: &handles,
            floating: &floating,
        };
        match self.router.process(event, scene) {
            Action::Focus(id) => {
                let focused = self.layout_mut().focus(&id);
                self.registry.raise(&id) || focused
            }
            Action::Command(command) => self.execute(command),
            Action::FrameChanged(_) => true,
            Action::None => matches!(event, InputEvent::Resize { .. }),
        }
    }

    // ── Render plan ─────────────────────────────

    pub fn render_plan(&self) -> RenderPlan {
        let layout = self.layout();
        let mut placements: Vec<Placement> = layout
            .placements(&self.viewport(), |id| self.router.frame_rect(id))
            .into_iter()
            .filter(|p| self.registry.is_shown(&p.window))
            .collect();
        // Floating windows stack by z-index above the tiles.
        placements.sort_by_key(|p| match p.kind {
            PlacementKind::Floating => self.registry.z_index(&p.window),
            _ => 0,
        });

        let workspace = self.workspaces.active_id();
        RenderPlan {
            workspace,
            workspace_name: self
                .workspaces
                .workspace(workspace)
                .map(|ws| ws.name.clone())
                .unwrap_or_default(),
            occupied: self.workspaces.occupied_workspaces(),
            focused: self.focused(),
            next_split: self.next_split,
            placements,
            windows: self.registry.windows().to_vec(),
        }
    }

    /// Current rect of a window in the render plan, if it is drawn.
    pub fn rect_of(&self, id: &str) -> Option<Rect> {
        self.render_plan()
            .placements
            .into_iter()
            .find(|p| p.window == id)
            .map(|p| p.rect)
    }
}
