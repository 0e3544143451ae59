//! Window chrome layout: which part of a window a pointer is over.

use serde::{Deserialize, Serialize};

use crate::constants::{CONTROL_BUTTON_WIDTH, RESIZE_HANDLE_SIZE, TITLE_BAR_HEIGHT};
use crate::geometry::{Geometry, Point, ResizeEdge};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChromeMetrics {
    pub title_bar_height: i32,
    pub button_width: i32,
    /// Thickness of the resize affordance along each edge.
    pub resize_handle: i32,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            title_bar_height: TITLE_BAR_HEIGHT,
            button_width: CONTROL_BUTTON_WIDTH,
            resize_handle: RESIZE_HANDLE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlButton {
    Minimize,
    Maximize,
    Close,
}

impl ControlButton {
    /// Left to right, as laid out in the title bar.
    pub const ORDER: [ControlButton; 3] = [
        ControlButton::Minimize,
        ControlButton::Maximize,
        ControlButton::Close,
    ];

    pub fn glyph(self) -> &'static str {
        match self {
            ControlButton::Minimize => "_",
            ControlButton::Maximize => "□",
            ControlButton::Close => "×",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    TitleBar,
    Button(ControlButton),
    Resize(ResizeEdge),
    Body,
}

impl ChromeMetrics {
    pub fn title_bar(&self, window: Geometry) -> Geometry {
        Geometry::new(
            window.left,
            window.top,
            window.width,
            self.title_bar_height.min(window.height),
        )
    }

    /// Rectangle of `button` inside the title bar. Buttons sit flush right,
    /// inset by the resize handle so the corner stays grabbable.
    pub fn button_rect(&self, window: Geometry, button: ControlButton) -> Geometry {
        let slot = match button {
            ControlButton::Minimize => 3,
            ControlButton::Maximize => 2,
            ControlButton::Close => 1,
        };
        let right = window.right() - self.resize_handle;
        Geometry::new(
            right - self.button_width * slot,
            window.top,
            self.button_width,
            self.title_bar_height.min(window.height),
        )
    }

    fn edge_at(&self, window: Geometry, point: Point) -> Option<ResizeEdge> {
        let handle = self.resize_handle;
        if handle <= 0 {
            return None;
        }
        let left = point.x < window.left + handle;
        let right = point.x >= window.right() - handle;
        let top = point.y < window.top + handle;
        let bottom = point.y >= window.bottom() - handle;
        match (left, right, top, bottom) {
            (true, _, true, _) => Some(ResizeEdge::TopLeft),
            (_, true, true, _) => Some(ResizeEdge::TopRight),
            (true, _, _, true) => Some(ResizeEdge::BottomLeft),
            (_, true, _, true) => Some(ResizeEdge::BottomRight),
            (true, _, _, _) => Some(ResizeEdge::Left),
            (_, true, _, _) => Some(ResizeEdge::Right),
            (_, _, true, _) => Some(ResizeEdge::Top),
            (_, _, _, true) => Some(ResizeEdge::Bottom),
            _ => None,
        }
    }

    /// Classify `point` against a window's chrome. Returns `None` outside the
    /// window. Resize handles are skipped when `resizable` is false (a
    /// maximized window, for one).
    pub fn hit_test(&self, window: Geometry, point: Point, resizable: bool) -> Option<HitRegion> {
        if !window.contains(point) {
            return None;
        }
        let edge = if resizable {
            self.edge_at(window, point)
        } else {
            None
        };
        match edge {
            Some(
                edge @ (ResizeEdge::TopLeft
                | ResizeEdge::TopRight
                | ResizeEdge::BottomLeft
                | ResizeEdge::BottomRight),
            ) => return Some(HitRegion::Resize(edge)),
            // A title bar no taller than the handle is all title bar.
            Some(ResizeEdge::Top) if self.title_bar_height > self.resize_handle => {
                return Some(HitRegion::Resize(ResizeEdge::Top));
            }
            _ => {}
        }
        if self.title_bar(window).contains(point) {
            let button = ControlButton::ORDER
                .into_iter()
                .find(|b| self.button_rect(window, *b).contains(point));
            return Some(match button {
                Some(button) => HitRegion::Button(button),
                None => HitRegion::TitleBar,
            });
        }
        Some(match edge {
            Some(edge) => HitRegion::Resize(edge),
            None => HitRegion::Body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> ChromeMetrics {
        ChromeMetrics {
            title_bar_height: 24,
            button_width: 24,
            resize_handle: 6,
        }
    }

    const WINDOW: Geometry = Geometry::new(100, 100, 300, 200);

    #[test]
    fn title_bar_and_buttons() {
        let m = metrics();
        assert_eq!(
            m.hit_test(WINDOW, Point::new(200, 110), true),
            Some(HitRegion::TitleBar)
        );
        // Close button spans [370, 394).
        assert_eq!(
            m.hit_test(WINDOW, Point::new(380, 110), true),
            Some(HitRegion::Button(ControlButton::Close))
        );
        assert_eq!(
            m.hit_test(WINDOW, Point::new(350, 110), true),
            Some(HitRegion::Button(ControlButton::Maximize))
        );
        assert_eq!(
            m.hit_test(WINDOW, Point::new(330, 110), true),
            Some(HitRegion::Button(ControlButton::Minimize))
        );
    }

    #[test]
    fn edges_and_corners() {
        let m = metrics();
        assert_eq!(
            m.hit_test(WINDOW, Point::new(398, 298), true),
            Some(HitRegion::Resize(ResizeEdge::BottomRight))
        );
        assert_eq!(
            m.hit_test(WINDOW, Point::new(101, 101), true),
            Some(HitRegion::Resize(ResizeEdge::TopLeft))
        );
        assert_eq!(
            m.hit_test(WINDOW, Point::new(102, 200), true),
            Some(HitRegion::Resize(ResizeEdge::Left))
        );
        assert_eq!(
            m.hit_test(WINDOW, Point::new(250, 297), true),
            Some(HitRegion::Resize(ResizeEdge::Bottom))
        );
        assert_eq!(
            m.hit_test(WINDOW, Point::new(250, 200), true),
            Some(HitRegion::Body)
        );
    }

    #[test]
    fn top_edge_above_title_text() {
        assert_eq!(
            metrics().hit_test(WINDOW, Point::new(200, 102), true),
            Some(HitRegion::Resize(ResizeEdge::Top))
        );
        let cells = ChromeMetrics {
            title_bar_height: 1,
            button_width: 3,
            resize_handle: 1,
        };
        let window = Geometry::new(2, 2, 40, 12);
        assert_eq!(
            cells.hit_test(window, Point::new(10, 2), true),
            Some(HitRegion::TitleBar)
        );
        assert_eq!(
            cells.hit_test(window, Point::new(39, 2), true),
            Some(HitRegion::Button(ControlButton::Close))
        );
        assert_eq!(
            cells.hit_test(window, Point::new(41, 2), true),
            Some(HitRegion::Resize(ResizeEdge::TopRight))
        );
    }

    #[test]
    fn non_resizable_has_no_handles() {
        let m = metrics();
        assert_eq!(
            m.hit_test(WINDOW, Point::new(398, 298), false),
            Some(HitRegion::Body)
        );
        assert_eq!(
            m.hit_test(WINDOW, Point::new(101, 101), false),
            Some(HitRegion::TitleBar)
        );
    }

    #[test]
    fn outside_is_none() {
        assert_eq!(metrics().hit_test(WINDOW, Point::new(99, 150), true), None);
    }
}
