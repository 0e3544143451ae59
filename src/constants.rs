//! Shared crate-wide constants.

/// Prefix for persisted geometry keys; the full key is the prefix followed
/// by the window's class id.
pub const GEOMETRY_KEY_PREFIX: &str = "win-pos-";

/// Width given to a window when nothing was persisted for its class.
pub const DEFAULT_WINDOW_WIDTH: i32 = 420;

/// Height given to a window when nothing was persisted for its class.
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;

/// Top-left corner of the first cascaded window.
pub const CASCADE_ORIGIN: i32 = 100;

/// Offset added in both axes for every further window opened.
pub const CASCADE_STEP: i32 = 20;

/// Number of cascade slots before the stagger wraps back to the origin.
pub const CASCADE_WRAP: u32 = 8;

/// Resize floor, in viewport units.
pub const MIN_WINDOW_WIDTH: i32 = 100;
pub const MIN_WINDOW_HEIGHT: i32 = 80;

/// Distance from a viewport edge within which a dragged window snaps flush.
pub const SNAP_THRESHOLD: i32 = 20;

/// Two title-bar presses closer than this toggle maximize.
pub const DOUBLE_CLICK_MS: u64 = 500;

/// First z-index handed out by the focus tracker.
pub const Z_INDEX_BASE: u64 = 100;

/// Chrome metrics used for hit testing.
pub const TITLE_BAR_HEIGHT: i32 = 24;
pub const CONTROL_BUTTON_WIDTH: i32 = 24;
pub const RESIZE_HANDLE_SIZE: i32 = 6;
