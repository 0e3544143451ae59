//! Error taxonomy for the window manager.
//!
//! None of these are fatal. The window manager recovers every [`WmError`]
//! locally (an ignored operation or a default value); they exist so the
//! internals can use `?` and so the recovery point can log what happened.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::window::{WindowId, WindowState};

#[derive(Debug, Error)]
pub enum WmError {
    #[error("unknown window {0}")]
    UnknownWindow(WindowId),

    #[error("cannot {op} window {id} while {state:?}")]
    InvalidTransition {
        id: WindowId,
        op: &'static str,
        state: WindowState,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("stored value for {key} is not usable: {reason}")]
    Corrupt { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
