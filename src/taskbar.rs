//! Taskbar entries mirrored from window lifecycle notifications.
//!
//! The taskbar never reads the registry directly: every change arrives as a
//! [`WindowEvent`], delivered before any external observer sees it.

use crate::events::{WindowEvent, WindowObserver};
use crate::window::{WindowId, WindowState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    id: EntryId,
    window: WindowId,
    title: String,
    active: bool,
    minimized: bool,
}

impl TaskbarEntry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn window(&self) -> &WindowId {
        &self.window
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }
}

/// What a click on a taskbar entry does to its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarAction {
    Restore,
    Minimize,
    Focus,
}

impl TaskbarAction {
    pub fn for_window(state: WindowState, is_active: bool) -> Self {
        if state == WindowState::Minimized {
            TaskbarAction::Restore
        } else if is_active {
            TaskbarAction::Minimize
        } else {
            TaskbarAction::Focus
        }
    }
}

#[derive(Debug, Default)]
pub struct Taskbar {
    entries: Vec<TaskbarEntry>,
    next_id: u64,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in the order their windows were opened.
    pub fn entries(&self) -> &[TaskbarEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: EntryId) -> Option<&TaskbarEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entry_for(&self, window: &WindowId) -> Option<&TaskbarEntry> {
        self.entries.iter().find(|e| &e.window == window)
    }

    pub fn active_entries(&self) -> impl Iterator<Item = &TaskbarEntry> {
        self.entries.iter().filter(|e| e.active)
    }

    fn entry_mut(&mut self, window: &WindowId) -> Option<&mut TaskbarEntry> {
        self.entries.iter_mut().find(|e| &e.window == window)
    }

    fn add(&mut self, window: &WindowId, title: &str) {
        if self.entry_for(window).is_some() {
            return;
        }
        let id = EntryId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.entries.push(TaskbarEntry {
            id,
            window: window.clone(),
            title: title.to_string(),
            active: false,
            minimized: false,
        });
    }
}

impl WindowObserver for Taskbar {
    fn on_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Opened { id, title } => self.add(id, title),
            WindowEvent::Focused(id) => {
                for entry in self.entries.iter_mut() {
                    entry.active = &entry.window == id;
                }
            }
            WindowEvent::Blurred(id) => {
                if let Some(entry) = self.entry_mut(id) {
                    entry.active = false;
                }
            }
            WindowEvent::StateChanged { id, state } => {
                if let Some(entry) = self.entry_mut(id) {
                    entry.minimized = *state == WindowState::Minimized;
                }
            }
            WindowEvent::Retitled { id, title } => {
                if let Some(entry) = self.entry_mut(id) {
                    entry.title.clone_from(title);
                }
            }
            WindowEvent::Closed(id) => self.entries.retain(|e| &e.window != id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(taskbar: &mut Taskbar, id: &str) -> WindowId {
        let id = WindowId::from(id);
        taskbar.on_window_event(&WindowEvent::Opened {
            id: id.clone(),
            title: id.to_string(),
        });
        id
    }

    #[test]
    fn entries_follow_open_and_close() {
        let mut taskbar = Taskbar::new();
        let a = opened(&mut taskbar, "notepad-1");
        let b = opened(&mut taskbar, "paint-2");
        assert_eq!(taskbar.len(), 2);
        assert_ne!(
            taskbar.entry_for(&a).map(|e| e.id()),
            taskbar.entry_for(&b).map(|e| e.id())
        );
        taskbar.on_window_event(&WindowEvent::Closed(a.clone()));
        assert!(taskbar.entry_for(&a).is_none());
        assert_eq!(taskbar.len(), 1);
    }

    #[test]
    fn duplicate_open_is_ignored() {
        let mut taskbar = Taskbar::new();
        opened(&mut taskbar, "notepad-1");
        opened(&mut taskbar, "notepad-1");
        assert_eq!(taskbar.len(), 1);
    }

    #[test]
    fn highlight_mirrors_focus_and_blur() {
        let mut taskbar = Taskbar::new();
        let a = opened(&mut taskbar, "notepad-1");
        let b = opened(&mut taskbar, "paint-2");
        taskbar.on_window_event(&WindowEvent::Focused(a.clone()));
        assert!(taskbar.entry_for(&a).unwrap().is_active());

        taskbar.on_window_event(&WindowEvent::Blurred(a.clone()));
        taskbar.on_window_event(&WindowEvent::Focused(b.clone()));
        assert_eq!(taskbar.active_entries().count(), 1);
        assert!(taskbar.entry_for(&b).unwrap().is_active());
        assert!(!taskbar.entry_for(&a).unwrap().is_active());
    }

    #[test]
    fn retitle_and_minimized_marker() {
        let mut taskbar = Taskbar::new();
        let a = opened(&mut taskbar, "notepad-1");
        taskbar.on_window_event(&WindowEvent::Retitled {
            id: a.clone(),
            title: "notes.txt".to_string(),
        });
        taskbar.on_window_event(&WindowEvent::StateChanged {
            id: a.clone(),
            state: WindowState::Minimized,
        });
        let entry = taskbar.entry_for(&a).unwrap();
        assert_eq!(entry.title(), "notes.txt");
        assert!(entry.is_minimized());
    }

    #[test]
    fn click_action_table() {
        assert_eq!(
            TaskbarAction::for_window(WindowState::Minimized, false),
            TaskbarAction::Restore
        );
        assert_eq!(
            TaskbarAction::for_window(WindowState::Normal, true),
            TaskbarAction::Minimize
        );
        assert_eq!(
            TaskbarAction::for_window(WindowState::Maximized, false),
            TaskbarAction::Focus
        );
    }
}
