//! Seams to the host environment.
//!
//! The window manager positions and sizes surfaces but never renders into
//! them. A host supplies the surfaces and answers viewport-size queries;
//! pointer input is fed to [`crate::window::WindowManager::handle_pointer`].

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::geometry::{Geometry, Size, Viewport};
use crate::window::ClassId;

/// A hosted content area owned by one window.
pub trait Surface {
    fn set_geometry(&mut self, geometry: Geometry);
    fn set_visible(&mut self, visible: bool);

    fn set_active(&mut self, _active: bool) {}

    fn set_title(&mut self, _title: &str) {}

    /// Size the content would like, when it has an opinion.
    fn content_size(&self) -> Option<Size> {
        None
    }

    /// Called exactly once, when the owning window closes.
    fn release(&mut self);
}

pub trait Host {
    type Surface: Surface;

    fn create_surface(&mut self, class_id: &ClassId, title: &str) -> Self::Surface;
    fn viewport(&self) -> Viewport;
}

/// Surface that only remembers what it was told.
#[derive(Debug)]
pub struct HeadlessSurface {
    pub class_id: ClassId,
    pub title: String,
    pub geometry: Geometry,
    pub visible: bool,
    pub active: bool,
    content_size: Option<Size>,
    released: Rc<Cell<bool>>,
}

impl HeadlessSurface {
    pub fn is_released(&self) -> bool {
        self.released.get()
    }
}

impl Surface for HeadlessSurface {
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
        self.content_size
    }

    fn release(&mut self) {
        self.visible = false;
        self.released.set(true);
    }
}

/// In-process host with a settable viewport, used by tests and embedders
/// that drive the window manager without a display.
#[derive(Debug)]
pub struct HeadlessHost {
    viewport: Viewport,
    content_sizes: HashMap<ClassId, Size>,
    released: Vec<Rc<Cell<bool>>>,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            content_sizes: HashMap::new(),
            released: Vec::new(),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Surfaces created for `class_id` will report `size` as their content size.
    pub fn with_content_size(mut self, class_id: impl Into<ClassId>, size: Size) -> Self {
        self.content_sizes.insert(class_id.into(), size);
        self
    }

    pub fn surfaces_created(&self) -> usize {
        self.released.len()
    }

    pub fn surfaces_released(&self) -> usize {
        self.released.iter().filter(|flag| flag.get()).count()
    }
}

impl Host for HeadlessHost {
    type Surface = HeadlessSurface;

    fn create_surface(&mut self, class_id: &ClassId, title: &str) -> HeadlessSurface {
        let released = Rc::new(Cell::new(false));
        self.released.push(Rc::clone(&released));
        HeadlessSurface {
            class_id: class_id.clone(),
            title: title.to_string(),
            geometry: Geometry::default(),
            visible: false,
            active: false,
            content_size: self.content_sizes.get(class_id).copied(),
            released,
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
