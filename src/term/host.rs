use crate::geometry::{Geometry, Size, Viewport};
use crate::surface::{Host, Surface};
use crate::window::ClassId;

use super::apps::ToyApp;

/// A window's content area inside the terminal. Rendering reads it back
/// each frame; the window manager only tells it where it is.
#[derive(Debug)]
pub struct TermSurface {
    app: Option<ToyApp>,
    title: String,
    geometry: Geometry,
    visible: bool,
    active: bool,
    released: bool,
}

impl TermSurface {
    pub fn app(&self) -> Option<ToyApp> {
        self.app
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn is_visible(&self) -> bool {
        self.visible && !self.released
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn lines(&self) -> Vec<String> {
        match self.app {
            Some(app) => app.lines(),
            None => Vec::new(),
        }
    }
}

impl Surface for TermSurface {
    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn content_size(&self) -> Option<Size> {
        self.app.and_then(ToyApp::content_size)
    }

    fn release(&mut self) {
        self.released = true;
        self.visible = false;
    }
}

/// Terminal screen minus the taskbar row.
#[derive(Debug)]
pub struct TerminalHost {
    viewport: Viewport,
}

impl TerminalHost {
    /// Rows reserved below the desktop for the taskbar.
    pub const TASKBAR_ROWS: u16 = 1;

    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            viewport: Self::desktop_size(columns, rows),
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.viewport = Self::desktop_size(columns, rows);
    }

    fn desktop_size(columns: u16, rows: u16) -> Viewport {
        Size::new(
            i32::from(columns),
            i32::from(rows.saturating_sub(Self::TASKBAR_ROWS)),
        )
    }
}

impl Host for TerminalHost {
    type Surface = TermSurface;

    fn create_surface(&mut self, class_id: &ClassId, title: &str) -> TermSurface {
        TermSurface {
            app: ToyApp::from_class(class_id.as_str()),
            title: title.to_string(),
            geometry: Geometry::default(),
            visible: false,
            active: false,
            released: false,
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
