pub mod registry;

mod window_manager;

use std::fmt;

use crate::geometry::Geometry;
use crate::taskbar::EntryId;

pub use registry::WindowRegistry;
pub use window_manager::WindowManager;

/// Stable identifier of an application type. Many windows may share one,
/// and persisted geometry is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(String);

impl ClassId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClassId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Window instance id, `{class}-{n}`, never reused within a manager's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(String);

impl WindowId {
    pub(crate) fn allocate(class_id: &ClassId, seq: u64) -> Self {
        Self(format!("{class_id}-{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// One open window. The record owns the hosted surface; dropping the record
/// after [`crate::surface::Surface::release`] is how a window is destroyed.
#[derive(Debug)]
pub struct WindowRecord<S> {
    pub(crate) id: WindowId,
    pub(crate) class_id: ClassId,
    pub(crate) title: String,
    pub(crate) surface: S,
    pub(crate) geometry: Geometry,
    pub(crate) z_index: u64,
    pub(crate) state: WindowState,
    /// State to return to when leaving `Minimized`.
    pub(crate) resume_state: WindowState,
    pub(crate) pre_maximize: Option<Geometry>,
    pub(crate) taskbar_entry: Option<EntryId>,
}

impl<S> WindowRecord<S> {
    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.state == WindowState::Maximized
    }

    pub fn pre_maximize_geometry(&self) -> Option<Geometry> {
        self.pre_maximize
    }

    pub fn taskbar_entry(&self) -> Option<EntryId> {
        self.taskbar_entry
    }
}
