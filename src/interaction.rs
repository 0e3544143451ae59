//! Pointer gestures that move and resize windows.
//!
//! A gesture lives from pointer-down to pointer-up. While it is held the
//! controller consumes move events for its window; [`InteractionController::end`]
//! is the only way a gesture is released, and every exit (up, cancel, the
//! window closing underneath it, a fresh pointer-down after a lost up) goes
//! through it.

use std::time::{Duration, Instant};

use crate::geometry::{
    Geometry, Point, ResizeEdge, Size, Viewport, apply_drag, apply_edge_resize, fit_resized,
    snap_to_edges,
};
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: PointerButton,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
    },
    /// Pointer left the viewport. A held gesture keeps going until the next
    /// up or cancel.
    Leave,
    Cancel,
}

impl PointerEvent {
    pub fn down(x: i32, y: i32) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    pub fn up(x: i32, y: i32) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(ResizeEdge),
}

/// Snapshot taken at pointer-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gesture {
    pub window: WindowId,
    pub kind: GestureKind,
    pub pointer_start: Point,
    pub start_geometry: Geometry,
}

/// Limits a gesture is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureBounds {
    pub viewport: Viewport,
    pub min_size: Size,
    pub snap_threshold: i32,
}

impl Gesture {
    /// Geometry for the pointer currently at `pointer`.
    pub fn geometry_at(&self, pointer: Point, bounds: GestureBounds) -> Geometry {
        let delta = pointer.delta_from(self.pointer_start);
        match self.kind {
            GestureKind::Drag => {
                let moved = apply_drag(self.start_geometry, delta, bounds.viewport);
                snap_to_edges(moved, bounds.viewport, bounds.snap_threshold)
            }
            GestureKind::Resize(edge) => {
                let resized = apply_edge_resize(self.start_geometry, edge, delta, bounds.min_size);
                fit_resized(resized, bounds.viewport)
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct InteractionController {
    gesture: Option<Gesture>,
    last_title_press: Option<(WindowId, Instant)>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start holding `gesture`. A gesture still held from before (its up
    /// event never arrived) is returned so the caller can finish it.
    #[must_use = "a displaced gesture still needs finishing"]
    pub fn begin(&mut self, gesture: Gesture) -> Option<Gesture> {
        tracing::debug!(window_id = %gesture.window, kind = ?gesture.kind, "gesture started");
        self.gesture.replace(gesture)
    }

    /// Release the held gesture.
    pub fn end(&mut self) -> Option<Gesture> {
        let gesture = self.gesture.take();
        if let Some(g) = &gesture {
            tracing::debug!(window_id = %g.window, kind = ?g.kind, "gesture ended");
        }
        gesture
    }

    /// Release the held gesture if it targets `id`.
    pub fn end_for(&mut self, id: &WindowId) -> Option<Gesture> {
        if self.gesture.as_ref().is_some_and(|g| &g.window == id) {
            self.end()
        } else {
            None
        }
    }

    /// Record a title-bar press and report whether it completes a double
    /// click on the same window.
    pub fn title_press(&mut self, id: &WindowId, now: Instant, window: Duration) -> bool {
        if let Some((prev_id, prev)) = &self.last_title_press
            && prev_id == id
            && now.saturating_duration_since(*prev) <= window
        {
            self.last_title_press = None;
            return true;
        }
        self.last_title_press = Some((id.clone(), now));
        false
    }

    pub fn forget_title_press(&mut self) {
        self.last_title_press = None;
    }
}
