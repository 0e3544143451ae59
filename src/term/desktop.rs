use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::Frame;
use tracing::{debug, info};

use super::driver::{ConsoleInputDriver, ConsoleOutputDriver, pointer_event};
use super::event_loop::{ControlFlow, EventLoop};
use super::host::TerminalHost;
use super::keybindings::{Action, KeyBindings};
use super::render::{TaskbarHit, render_desktop};
use crate::interaction::PointerEvent;
use crate::window::WindowManager;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Terminal front end: routes keys to desktop actions, the mouse to the
/// window manager or taskbar, and draws the result.
pub struct Desktop {
    wm: WindowManager<TerminalHost>,
    bindings: KeyBindings,
    taskbar_hits: Vec<TaskbarHit>,
    hint: String,
}

impl Desktop {
    pub fn new(wm: WindowManager<TerminalHost>, bindings: KeyBindings) -> Self {
        let hint = [
            "1-4 open",
            "Tab cycle",
            "w close",
            "d desktop",
            "q quit",
        ]
        .join(" · ");
        Self {
            wm,
            bindings,
            taskbar_hits: Vec::new(),
            hint,
        }
    }

    pub fn window_manager(&self) -> &WindowManager<TerminalHost> {
        &self.wm
    }

    pub fn window_manager_mut(&mut self) -> &mut WindowManager<TerminalHost> {
        &mut self.wm
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.wm.host_mut().resize(columns, rows);
        self.wm.viewport_changed();
    }

    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        self.taskbar_hits = render_desktop(frame.buffer_mut(), area, &self.wm, &self.hint);
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if let Some(action) = self.bindings.action_for_key(key) {
                    return self.perform(action);
                }
            }
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind
                    && let Some(hit) = self
                        .taskbar_hits
                        .iter()
                        .find(|hit| hit.contains(mouse.column, mouse.row))
                {
                    self.wm.click_taskbar_entry(hit.entry);
                } else if let Some(pointer) = pointer_event(mouse) {
                    self.wm.handle_pointer(pointer);
                }
            }
            Event::Resize(columns, rows) => self.resize(*columns, *rows),
            // The up event of a drag in progress will never arrive.
            Event::FocusLost => {
                self.wm.handle_pointer(PointerEvent::Cancel);
            }
            _ => {}
        }
        ControlFlow::Continue
    }

    fn perform(&mut self, action: Action) -> ControlFlow {
        debug!(%action, "desktop action");
        let active = self.wm.active().cloned();
        match action {
            Action::Quit => return ControlFlow::Quit,
            Action::CycleNextWindow => self.wm.cycle_focus(true),
            Action::CyclePrevWindow => self.wm.cycle_focus(false),
            Action::CloseActive => self.wm.close_active(),
            Action::MinimizeActive => {
                if let Some(id) = active {
                    self.wm.minimize(&id);
                }
            }
            Action::MaximizeActive => {
                if let Some(id) = active {
                    self.wm.toggle_maximize(&id);
                }
            }
            Action::ShowDesktop => self.wm.toggle_show_desktop(),
            Action::Launch(app) => {
                self.wm.open(app.class_id(), app.title());
            }
        }
        ControlFlow::Continue
    }

    /// Take over the terminal until the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        let mut output = ConsoleOutputDriver::new()?;
        output.enter()?;
        let (columns, rows) = output.size()?;
        self.resize(columns, rows);
        info!(columns, rows, "desktop started");

        let mut events = EventLoop::new(ConsoleInputDriver, POLL_INTERVAL);
        let result = events.run(|event| match event {
            None => {
                output.draw(|frame| self.draw(frame))?;
                Ok(ControlFlow::Continue)
            }
            Some(event) => Ok(self.handle_event(&event)),
        });
        output.exit()?;
        info!("desktop stopped");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WmConfig;
    use crate::persistence::GeometryStore;
    use crate::geometry::Geometry;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    fn desktop() -> Desktop {
        let wm = WindowManager::new(
            TerminalHost::new(80, 24),
            WmConfig::terminal(),
            GeometryStore::in_memory(),
        );
        Desktop::new(wm, KeyBindings::default())
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn redraw(desktop: &mut Desktop) {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        desktop.taskbar_hits = render_desktop(&mut buffer, area, &desktop.wm, &desktop.hint);
    }

    #[test]
    fn keys_launch_and_quit() {
        let mut desktop = desktop();
        assert_eq!(desktop.handle_event(&key('1')), ControlFlow::Continue);
        assert_eq!(desktop.handle_event(&key('4')), ControlFlow::Continue);
        let titles: Vec<_> = desktop
            .window_manager()
            .windows()
            .map(|r| r.title().to_string())
            .collect();
        assert_eq!(titles, vec!["Notepad", "Clock"]);
        assert_eq!(desktop.handle_event(&key('q')), ControlFlow::Quit);
    }

    #[test]
    fn mouse_drags_title_bar() {
        let mut desktop = desktop();
        desktop.handle_event(&key('1'));
        // notepad opens at 2,2 40x12
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 2));
        desktop.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 20, 7));
        desktop.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 20, 7));
        let wm = desktop.window_manager();
        let id = wm.active().cloned().unwrap();
        assert_eq!(wm.window(&id).unwrap().geometry(), Geometry::new(12, 7, 40, 12));
        assert_eq!(
            wm.geometry_store().load("notepad").unwrap(),
            Some(Geometry::new(12, 7, 40, 12))
        );
    }

    #[test]
    fn focus_loss_cancels_drag() {
        let mut desktop = desktop();
        desktop.handle_event(&key('1'));
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 2));
        assert!(desktop.window_manager().gesture().is_some());
        desktop.handle_event(&Event::FocusLost);
        assert!(desktop.window_manager().gesture().is_none());
    }

    #[test]
    fn taskbar_click_minimizes_active_window() {
        let mut desktop = desktop();
        desktop.handle_event(&key('1'));
        redraw(&mut desktop);
        let hit = desktop.taskbar_hits[0];
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), hit.rect.x, 23));
        let wm = desktop.window_manager();
        assert!(wm.windows().all(|r| r.is_minimized()));
        assert!(wm.active().is_none());

        redraw(&mut desktop);
        desktop.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), hit.rect.x, 23));
        assert!(desktop.window_manager().active().is_some());
    }

    #[test]
    fn resize_refits_windows() {
        let mut desktop = desktop();
        desktop.handle_event(&key('1'));
        desktop.handle_event(&Event::Resize(30, 10));
        let wm = desktop.window_manager();
        let id = wm.active().cloned().unwrap();
        // 40x12 no longer fits a 30x9 desktop; pinned to the origin
        assert_eq!(wm.window(&id).unwrap().geometry(), Geometry::new(0, 0, 40, 12));
    }
}
