//! Pure geometry helpers: viewport clamping, drag and resize arithmetic.
//!
//! Everything here is stateless. Coordinates are viewport-relative with the
//! origin at the top-left corner; the window manager never stores a negative
//! position or size, but intermediate values (a pointer dragged past the left
//! edge, say) may be negative before clamping.

use serde::{Deserialize, Serialize};

/// Window rectangle in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn position(self) -> Position {
        Position {
            left: self.left,
            top: self.top,
        }
    }

    pub fn with_position(self, position: Position) -> Self {
        Self {
            left: position.left,
            top: position.top,
            ..self
        }
    }

    pub fn right(self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub left: i32,
    pub top: i32,
}

/// Pointer location in viewport units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Delta travelled from `origin` to `self`.
    pub fn delta_from(self, origin: Point) -> Delta {
        Delta {
            dx: self.x.saturating_sub(origin.x),
            dy: self.y.saturating_sub(origin.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Delta {
    pub dx: i32,
    pub dy: i32,
}

impl Delta {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// The visible canvas windows live in.
pub type Viewport = Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::Left,
        ResizeEdge::Right,
        ResizeEdge::Top,
        ResizeEdge::Bottom,
        ResizeEdge::TopLeft,
        ResizeEdge::TopRight,
        ResizeEdge::BottomLeft,
        ResizeEdge::BottomRight,
    ];

    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

/// Clamp a window's top-left corner so the whole window stays inside the
/// viewport. A window larger than the viewport is pinned to `0` on that axis.
pub fn clamp_position(
    left: i32,
    top: i32,
    width: i32,
    height: i32,
    viewport: Viewport,
) -> Position {
    let max_left = viewport.width.saturating_sub(width).max(0);
    let max_top = viewport.height.saturating_sub(height).max(0);
    Position {
        left: left.clamp(0, max_left),
        top: top.clamp(0, max_top),
    }
}

/// Clamp an entire rectangle's position into the viewport, keeping its size.
pub fn clamp_geometry(geometry: Geometry, viewport: Viewport) -> Geometry {
    geometry.with_position(clamp_position(
        geometry.left,
        geometry.top,
        geometry.width,
        geometry.height,
        viewport,
    ))
}

/// Move the drag-start geometry by the pointer delta, then clamp.
pub fn apply_drag(start: Geometry, delta: Delta, viewport: Viewport) -> Geometry {
    let moved = Geometry {
        left: start.left.saturating_add(delta.dx),
        top: start.top.saturating_add(delta.dy),
        ..start
    };
    clamp_geometry(moved, viewport)
}

/// Grow or shrink from the bottom-right corner. Position is untouched and the
/// size never drops below `min`.
pub fn apply_resize(start: Geometry, delta: Delta, min: Size) -> Geometry {
    Geometry {
        width: start.width.saturating_add(delta.dx).max(min.width),
        height: start.height.saturating_add(delta.dy).max(min.height),
        ..start
    }
}

/// Resize from any edge or corner. Dragging a left or top edge moves the
/// origin so the opposite edge stays put; once the minimum is reached the
/// origin stops moving too.
pub fn apply_edge_resize(start: Geometry, edge: ResizeEdge, delta: Delta, min: Size) -> Geometry {
    if edge == ResizeEdge::BottomRight {
        return apply_resize(start, delta, min);
    }
    let mut out = start;
    if edge.moves_right() {
        out.width = start.width.saturating_add(delta.dx).max(min.width);
    }
    if edge.moves_left() {
        out.width = start.width.saturating_sub(delta.dx).max(min.width);
        out.left = start.right().saturating_sub(out.width);
    }
    if edge.moves_bottom() {
        out.height = start.height.saturating_add(delta.dy).max(min.height);
    }
    if edge.moves_top() {
        out.height = start.height.saturating_sub(delta.dy).max(min.height);
        out.top = start.bottom().saturating_sub(out.height);
    }
    out
}

/// Trim a resized rectangle to the viewport. An origin pushed past the left
/// or top edge gives up the overhang from its size, and the right and bottom
/// edges stop at the viewport. Position is never negative afterwards.
pub fn fit_resized(geometry: Geometry, viewport: Viewport) -> Geometry {
    let mut out = geometry;
    if out.left < 0 {
        out.width = out.width.saturating_add(out.left);
        out.left = 0;
    }
    if out.top < 0 {
        out.height = out.height.saturating_add(out.top);
        out.top = 0;
    }
    if out.right() > viewport.width {
        out.width = viewport.width.saturating_sub(out.left);
    }
    if out.bottom() > viewport.height {
        out.height = viewport.height.saturating_sub(out.top);
    }
    out.width = out.width.max(0);
    out.height = out.height.max(0);
    out
}

/// Pull a window flush against any viewport edge it is within `threshold` of.
/// A zero threshold disables snapping.
pub fn snap_to_edges(geometry: Geometry, viewport: Viewport, threshold: i32) -> Geometry {
    if threshold <= 0 {
        return geometry;
    }
    let mut out = geometry;
    if out.left.abs() < threshold {
        out.left = 0;
    }
    if out.top.abs() < threshold {
        out.top = 0;
    }
    if (viewport.width - out.right()).abs() < threshold {
        out.left = viewport.width - out.width;
    }
    if (viewport.height - out.bottom()).abs() < threshold {
        out.top = viewport.height - out.height;
    }
    clamp_geometry(out, viewport)
}

/// Geometry covering the full viewport.
pub fn maximized(viewport: Viewport) -> Geometry {
    Geometry::new(0, 0, viewport.width.max(0), viewport.height.max(0))
}

/// Staggered top-left corner for the `slot`-th window opened. The stagger
/// wraps after `wrap` slots so a long session does not walk off-screen.
pub fn cascade_position(slot: u32, origin: i32, step: i32, wrap: u32) -> Position {
    let index = if wrap == 0 { slot } else { slot % wrap };
    let offset = step.saturating_mul(i32::try_from(index).unwrap_or(i32::MAX));
    Position {
        left: origin.saturating_add(offset),
        top: origin.saturating_add(offset),
    }
}
