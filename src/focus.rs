//! Stacking order and the single active window.

use crate::window::WindowId;

/// Result of raising a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusChange {
    /// Previously active window, when it differs from the newly focused one.
    pub blurred: Option<WindowId>,
    pub focused: WindowId,
    pub z_index: u64,
}

/// Owns the monotonically increasing z counter and `active` id.
#[derive(Debug, Clone)]
pub struct FocusTracker {
    next_z: u64,
    active: Option<WindowId>,
}

impl FocusTracker {
    pub fn new(z_base: u64) -> Self {
        Self {
            next_z: z_base,
            active: None,
        }
    }

    /// Hand out a fresh z-index, strictly greater than every earlier one.
    pub fn next_z(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z = z.saturating_add(1);
        z
    }

    pub fn active(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }

    pub fn is_active(&self, id: &WindowId) -> bool {
        self.active.as_ref() == Some(id)
    }

    /// Raise `id` by writing a new z-index into `z_index` and make it the
    /// active window.
    pub fn bring_to_front(&mut self, id: &WindowId, z_index: &mut u64) -> FocusChange {
        *z_index = self.next_z();
        let blurred = match self.active.replace(id.clone()) {
            Some(previous) if &previous != id => Some(previous),
            _ => None,
        };
        FocusChange {
            blurred,
            focused: id.clone(),
            z_index: *z_index,
        }
    }

    /// Drop `id` as the active window. Returns it when it was active; no
    /// replacement is chosen.
    pub fn blur(&mut self, id: &WindowId) -> Option<WindowId> {
        if self.is_active(id) {
            self.active.take()
        } else {
            None
        }
    }

    /// Next window to focus when cycling through `order` (bottom to top).
    /// Without an active window the cycle starts from the bottom.
    pub fn cycle_target(&self, order: &[WindowId], forward: bool) -> Option<WindowId> {
        if order.is_empty() {
            return None;
        }
        let len = order.len() as isize;
        let next = match self
            .active
            .as_ref()
            .and_then(|active| order.iter().position(|id| id == active))
        {
            Some(idx) => {
                let step = if forward { 1isize } else { -1isize };
                (idx as isize + step).rem_euclid(len) as usize
            }
            None if forward => 0,
            None => order.len() - 1,
        };
        order.get(next).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<WindowId> {
        names.iter().map(|n| WindowId::from(*n)).collect()
    }

    #[test]
    fn z_strictly_increases() {
        let mut tracker = FocusTracker::new(100);
        let a = WindowId::from("a-1");
        let mut za = 0;
        let first = tracker.bring_to_front(&a, &mut za);
        let second = tracker.bring_to_front(&a, &mut za);
        assert_eq!(first.z_index, 100);
        assert!(second.z_index > first.z_index);
        assert_eq!(za, second.z_index);
    }

    #[test]
    fn refocusing_active_window_does_not_blur() {
        let mut tracker = FocusTracker::new(1);
        let a = WindowId::from("a-1");
        let b = WindowId::from("b-2");
        let (mut za, mut zb) = (0, 0);
        assert_eq!(tracker.bring_to_front(&a, &mut za).blurred, None);
        assert_eq!(tracker.bring_to_front(&a, &mut za).blurred, None);
        assert_eq!(tracker.bring_to_front(&b, &mut zb).blurred, Some(a.clone()));
        assert!(tracker.is_active(&b));
        assert_eq!(tracker.blur(&a), None);
        assert_eq!(tracker.blur(&b), Some(b));
        assert!(tracker.active().is_none());
    }

    #[test]
    fn cycle_wraps_and_advances() {
        let mut tracker = FocusTracker::new(1);
        let order = ids(&["a-1", "b-2", "c-3"]);
        assert_eq!(tracker.cycle_target(&order, true), Some(order[0].clone()));
        let mut z = 0;
        tracker.bring_to_front(&order[1], &mut z);
        assert_eq!(tracker.cycle_target(&order, true), Some(order[2].clone()));
        tracker.bring_to_front(&order[2], &mut z);
        assert_eq!(tracker.cycle_target(&order, true), Some(order[0].clone()));
        assert_eq!(tracker.cycle_target(&order, false), Some(order[1].clone()));
        assert_eq!(tracker.cycle_target(&[], true), None);
    }
}
