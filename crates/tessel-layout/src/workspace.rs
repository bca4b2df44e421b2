use serde::{Deserialize, Serialize};
use tessel_core::{workspace_for_key, SplitDirection, WorkspaceId, WORKSPACE_COUNT};

use crate::TilingLayout;

// ──────────────────────────────────────────────
// Workspace
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub layout: TilingLayout,
}

impl Workspace {
    pub fn new(id: WorkspaceId) -> Self {
        Self {
            id,
            name: id.to_string(),
            layout: TilingLayout::new(),
        }
    }

    /// The digit key this workspace is bound to; workspace 10 sits on `0`.
    pub fn key(&self) -> char {
        match self.id {
            10 => '0',
            id => char::from(b'0' + id),
        }
    }

    pub fn id_for_key(key: char) -> Option<WorkspaceId> {
        workspace_for_key(key)
    }
}

// ──────────────────────────────────────────────
// WorkspaceState
// ──────────────────────────────────────────────

/// The ten workspaces and which of them is shown. Every layout operation
/// acts on the active workspace except `move_to_workspace`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceState {
    workspaces: Vec<Workspace>,
    active: WorkspaceId,
}

impl WorkspaceState {
    pub fn new() -> Self {
        Self {
            workspaces: (1..=WORKSPACE_COUNT).map(Workspace::new).collect(),
            active: 1,
        }
    }

    /// Create the workspaces with display names. Missing or empty names
    /// fall back to the workspace number.
    pub fn with_names(names: &[String]) -> Self {
        let mut state = Self::new();
        for (workspace, name) in state.workspaces.iter_mut().zip(names) {
            if !name.is_empty() {
                workspace.name = name.clone();
            }
        }
        state
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn active_id(&self) -> WorkspaceId {
        self.active
    }

    pub fn workspace(&self, id: WorkspaceId) -> Option<&Workspace> {
        self.workspaces.get(Self::index(id)?)
    }

    fn workspace_mut(&mut self, id: WorkspaceId) -> Option<&mut Workspace> {
        self.workspaces.get_mut(Self::index(id)?)
    }

    fn index(id: WorkspaceId) -> Option<usize> {
        (1..=WORKSPACE_COUNT)
            .contains(&id)
            .then(|| usize::from(id - 1))
    }

    pub fn active_layout(&self) -> &TilingLayout {
        &self.workspaces[usize::from(self.active - 1)].layout
    }

    pub fn active_layout_mut(&mut self) -> &mut TilingLayout {
        &mut self.workspaces[usize::from(self.active - 1)].layout
    }

    /// Show another workspace. Layouts are untouched.
    pub fn switch_workspace(&mut self, id: WorkspaceId) -> bool {
        if id == self.active || Self::index(id).is_none() {
            return false;
        }
        self.active = id;
        true
    }

    /// Move a window from the active workspace to `target`, keeping it
    /// floating if it floated and tiling it (horizontally, beside the
    /// target's focused window) otherwise. The window takes focus there.
    pub fn move_to_workspace(&mut self, window: &str, target: WorkspaceId) -> bool {
        if target == self.active || Self::index(target).is_none() {
            return false;
        }

        let source = self.active_layout();
        let was_floating = source.is_floating(window);
        if !was_floating && !source.is_tiled(window) {
            return false;
        }

        let mut source = source.clone();
        source.untile_window(window);

        let Some(destination) = self.workspace(target) else {
            return false;
        };
        let mut destination = destination.layout.clone();
        // A stale copy of the window in the target would block insertion.
        destination.untile_window(window);
        if was_floating {
            destination.float_window(window);
        } else {
            destination.tile_window(window, SplitDirection::Horizontal);
        }
        destination.focused = Some(window.to_string());

        *self.active_layout_mut() = source;
        if let Some(workspace) = self.workspace_mut(target) {
            workspace.layout = destination;
        }
        true
    }

    /// The workspace whose layout holds `window`, tiled or floating.
    pub fn workspace_of(&self, window: &str) -> Option<WorkspaceId> {
        self.workspaces
            .iter()
            .find(|ws| ws.layout.contains(window))
            .map(|ws| ws.id)
    }

    /// Workspaces with anything tiled or floating, in ID order.
    pub fn occupied_workspaces(&self) -> Vec<WorkspaceId> {
        self.workspaces
            .iter()
            .filter(|ws| !ws.layout.is_empty())
            .map(|ws| ws.id)
            .collect()
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new()
    }
}
