//! Canonical map of window id to record, plus the id and cascade counters.

use crate::error::WmError;
use crate::geometry::Point;

use super::{ClassId, WindowId, WindowRecord};

#[derive(Debug)]
pub struct WindowRegistry<S> {
    /// Kept in open order; lookups are linear, which is fine for the handful
    /// of windows a desktop shows.
    records: Vec<WindowRecord<S>>,
    next_seq: u64,
    cascade_slot: u32,
}

impl<S> Default for WindowRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> WindowRegistry<S> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_seq: 1,
            cascade_slot: 0,
        }
    }

    pub(crate) fn allocate_id(&mut self, class_id: &ClassId) -> WindowId {
        let seq = self.next_seq;
        self.next_seq = seq.saturating_add(1);
        WindowId::allocate(class_id, seq)
    }

    /// Cascade slot for the next window that has no persisted geometry.
    pub(crate) fn take_cascade_slot(&mut self) -> u32 {
        let slot = self.cascade_slot;
        self.cascade_slot = slot.wrapping_add(1);
        slot
    }

    pub(crate) fn insert(&mut self, record: WindowRecord<S>) {
        self.records.push(record);
    }

    pub(crate) fn remove(&mut self, id: &WindowId) -> Option<WindowRecord<S>> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: &WindowId) -> Option<&WindowRecord<S>> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord<S>> {
        self.records.iter_mut().find(|r| &r.id == id)
    }

    pub(crate) fn require(&self, id: &WindowId) -> Result<&WindowRecord<S>, WmError> {
        self.get(id)
            .ok_or_else(|| WmError::UnknownWindow(id.clone()))
    }

    pub(crate) fn require_mut(&mut self, id: &WindowId) -> Result<&mut WindowRecord<S>, WmError> {
        self.get_mut(id)
            .ok_or_else(|| WmError::UnknownWindow(id.clone()))
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in open order.
    pub fn iter(&self) -> impl Iterator<Item = &WindowRecord<S>> {
        self.records.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut WindowRecord<S>> {
        self.records.iter_mut()
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    /// Visible (non-minimized) windows from bottom to top.
    pub fn stacking_order(&self) -> Vec<WindowId> {
        let mut visible: Vec<&WindowRecord<S>> =
            self.records.iter().filter(|r| !r.is_minimized()).collect();
        visible.sort_by_key(|r| r.z_index);
        visible.into_iter().map(|r| r.id.clone()).collect()
    }

    /// Topmost visible window under `point`.
    pub fn topmost_at(&self, point: Point) -> Option<&WindowRecord<S>> {
        self.records
            .iter()
            .filter(|r| !r.is_minimized() && r.geometry.contains(point))
            .max_by_key(|r| r.z_index)
    }
}
