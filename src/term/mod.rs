//! Terminal host: windows drawn with ratatui, input read through crossterm.

pub mod apps;
pub mod desktop;
pub mod driver;
pub mod event_loop;
pub mod host;
pub mod keybindings;
pub mod render;
pub mod theme;

pub use desktop::Desktop;
pub use host::{TermSurface, TerminalHost};
