use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

use crate::interaction::{PointerButton, PointerEvent};
use crate::geometry::Point;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }
}

#[derive(Debug, Default)]
pub struct ConsoleInputDriver;

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        crossterm::event::read()
    }
}

/// Owns the alternate screen and raw mode for as long as it lives.
pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            entered: false,
        })
    }

    pub fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.entered = true;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }

    /// Terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.terminal.draw(f).map(|_| ())
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Translate a terminal mouse report into a pointer event. Scroll reports
/// carry no pointer meaning for the window manager.
pub fn pointer_event(mouse: &MouseEvent) -> Option<PointerEvent> {
    let position = Point::new(i32::from(mouse.column), i32::from(mouse.row));
    match mouse.kind {
        MouseEventKind::Down(button) => Some(PointerEvent::Down {
            position,
            button: match button {
                MouseButton::Left => PointerButton::Primary,
                MouseButton::Right => PointerButton::Secondary,
                MouseButton::Middle => PointerButton::Middle,
            },
        }),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => Some(PointerEvent::Move { position }),
        MouseEventKind::Up(_) => Some(PointerEvent::Up { position }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn mouse_reports_become_pointer_events() {
        assert_eq!(
            pointer_event(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 4)),
            Some(PointerEvent::down(3, 4))
        );
        assert_eq!(
            pointer_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 9, 1)),
            Some(PointerEvent::moved(9, 1))
        );
        assert_eq!(
            pointer_event(&mouse(MouseEventKind::Up(MouseButton::Left), 9, 1)),
            Some(PointerEvent::up(9, 1))
        );
        assert_eq!(
            pointer_event(&mouse(MouseEventKind::Down(MouseButton::Right), 0, 0)),
            Some(PointerEvent::Down {
                position: Point::new(0, 0),
                button: PointerButton::Secondary,
            })
        );
        assert_eq!(
            pointer_event(&mouse(MouseEventKind::ScrollDown, 0, 0)),
            None
        );
    }

    struct Scripted(Vec<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            if self.0.is_empty() {
                return Err(io::Error::other("no more events"));
            }
            Ok(self.0.remove(0))
        }
    }

    fn drain<D: InputDriver>(mut driver: D) -> Vec<Event> {
        let mut out = Vec::new();
        while driver.poll(Duration::ZERO).unwrap() {
            out.push(driver.read().unwrap());
        }
        out
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut driver = Scripted(vec![Event::FocusLost, Event::FocusGained]);
        assert_eq!(drain(&mut driver), vec![Event::FocusLost, Event::FocusGained]);
        assert!(driver.0.is_empty());
    }
}
