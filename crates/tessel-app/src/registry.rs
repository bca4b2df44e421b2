// Window visibility registry: which windows exist, whether they are shown,
// and their stacking order. The layout engine never consults it.

use tessel_core::WindowState;

#[derive(Debug, Default)]
pub struct Registry {
    windows: Vec<WindowState>,
    next_z: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&WindowState> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut WindowState> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    /// Windows in the order they were first opened.
    pub fn windows(&self) -> &[WindowState] {
        &self.windows
    }

    /// Shown unless the registry knows it as closed or minimized.
    pub fn is_shown(&self, id: &str) -> bool {
        self.get(id).map_or(true, WindowState::is_shown)
    }

    pub fn z_index(&self, id: &str) -> u32 {
        self.get(id).map_or(0, |w| w.z_index)
    }

    /// Show a window, registering it on first open, and raise it. A window
    /// that is already shown only takes the new title, if any.
    pub fn open(&mut self, id: &str, title: Option<&str>) -> bool {
        if let Some(window) = self.get_mut(id) {
            let retitled = match title {
                Some(title) if window.title != title => {
                    window.title = title.to_string();
                    true
                }
                _ => false,
            };
            if window.is_shown() {
                return retitled;
            }
            window.visible = true;
            window.minimized = false;
            self.raise(id);
            return true;
        }

        let z_index = self.bump();
        self.windows.push(WindowState {
            id: id.to_string(),
            title: title.unwrap_or(id).to_string(),
            visible: true,
            minimized: false,
            z_index,
        });
        true
    }

    pub fn close(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(window) if window.visible => {
                window.visible = false;
                window.minimized = false;
                true
            }
            _ => false,
        }
    }

    pub fn minimize(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(window) if window.is_shown() => {
                window.minimized = true;
                true
            }
            _ => false,
        }
    }

    /// Bring back a minimized window on top of the stack.
    pub fn restore(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(window) if window.visible && window.minimized => window.minimized = false,
            _ => return false,
        }
        self.raise(id);
        true
    }

    /// Put a shown window on top of the stack.
    pub fn raise(&mut self, id: &str) -> bool {
        let top = self.next_z;
        match self.get(id) {
            Some(window) if window.is_shown() && window.z_index != top => {}
            _ => return false,
        }
        let z_index = self.bump();
        if let Some(window) = self.get_mut(id) {
            window.z_index = z_index;
        }
        true
    }

    fn bump(&mut self) -> u32 {
        self.next_z += 1;
        self.next_z
    }
}
