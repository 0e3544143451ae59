//! Window manager core for desktop shells.
//!
//! [`window::WindowManager`] owns the lifecycle, geometry, stacking order and
//! taskbar state of hosted windows. Hosts plug in through [`surface::Host`];
//! the [`term`] module is a terminal host built on crossterm and ratatui.

pub mod chrome;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod focus;
pub mod geometry;
pub mod interaction;
pub mod persistence;
pub mod surface;
pub mod taskbar;
pub mod term;
pub mod tracing_sub;
pub mod window;

pub use config::WmConfig;
pub use error::{ConfigError, StorageError, WmError};
pub use events::{WindowEvent, WindowObserver};
pub use geometry::{Geometry, Point, Size};
pub use interaction::PointerEvent;
pub use window::{ClassId, WindowId, WindowManager, WindowState};
