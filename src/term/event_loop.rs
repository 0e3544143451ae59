use std::io;
use std::time::Duration;

use crossterm::event::Event;

use super::driver::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded input pump for the terminal desktop.
///
/// Every window-manager mutation happens inside the handler, one event at a
/// time, so the manager needs no locking. The handler sees `None` once per
/// turn before input is polled (the place to draw) and `Some(event)` for
/// each event read.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(None)? == ControlFlow::Quit {
                return Ok(());
            }
            if !self.driver.poll(self.poll_interval)? {
                continue;
            }
            // Drain bursts (drags report every cell crossed) before the next
            // redraw so rendering does not lag the pointer.
            loop {
                let event = self.driver.read()?;
                if handler(Some(event))? == ControlFlow::Quit {
                    return Ok(());
                }
                if !self.driver.poll(Duration::ZERO)? {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    #[test]
    fn drains_burst_between_ticks_and_stops_on_quit() {
        let script = VecDeque::from(vec![
            Event::FocusGained,
            Event::FocusLost,
            Event::Resize(10, 10),
        ]);
        let mut events = EventLoop::new(Scripted(script), Duration::ZERO);
        let mut seen = Vec::new();
        events
            .run(|event| {
                let quit = matches!(event, Some(Event::Resize(..)));
                seen.push(event);
                Ok(if quit {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                })
            })
            .unwrap();
        assert_eq!(
            seen,
            vec![
                None,
                Some(Event::FocusGained),
                Some(Event::FocusLost),
                Some(Event::Resize(10, 10)),
            ]
        );
    }
}
