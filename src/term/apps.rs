//! Toy applications that fill terminal windows with static content.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToyApp {
    Notepad,
    Paint,
    Calculator,
    Clock,
}

impl ToyApp {
    pub const ALL: [ToyApp; 4] = [
        ToyApp::Notepad,
        ToyApp::Paint,
        ToyApp::Calculator,
        ToyApp::Clock,
    ];

    pub fn class_id(self) -> &'static str {
        match self {
            ToyApp::Notepad => "notepad",
            ToyApp::Paint => "paint",
            ToyApp::Calculator => "calculator",
            ToyApp::Clock => "clock",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ToyApp::Notepad => "Notepad",
            ToyApp::Paint => "Paint",
            ToyApp::Calculator => "Calculator",
            ToyApp::Clock => "Clock",
        }
    }

    pub fn from_class(class_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|app| app.class_id() == class_id)
    }

    /// Preferred outer size in cells, chrome included.
    pub fn content_size(self) -> Option<Size> {
        match self {
            ToyApp::Notepad => None,
            ToyApp::Paint => Some(Size::new(36, 12)),
            ToyApp::Calculator => Some(Size::new(21, 9)),
            ToyApp::Clock => Some(Size::new(20, 5)),
        }
    }

    pub fn lines(self) -> Vec<String> {
        match self {
            ToyApp::Notepad => [
                "Shopping list",
                "",
                "- coffee",
                "- more coffee",
                "- a second monitor",
                "",
                "Drag the title bar to move me.",
                "Drag an edge or corner to resize.",
                "Double-click the title to maximize.",
            ]
            .map(String::from)
            .to_vec(),
            ToyApp::Paint => [
                "  .-~~~-.     *   ",
                " /  o o  \\  *   * ",
                "|    ^    |   *   ",
                " \\  \\_/  /        ",
                "  '-...-'   ~~~~~ ",
                "",
                "[#][%][@][&][.]  ",
            ]
            .map(String::from)
            .to_vec(),
            ToyApp::Calculator => [
                "         1337",
                " 7  8  9  /",
                " 4  5  6  *",
                " 1  2  3  -",
                " 0  .  =  +",
            ]
            .map(String::from)
            .to_vec(),
            ToyApp::Clock => vec![clock_face(SystemTime::now())],
        }
    }
}

/// `HH:MM:SS UTC` for `now`.
fn clock_face(now: SystemTime) -> String {
    let secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let day = secs % 86_400;
    format!(
        "  {:02}:{:02}:{:02} UTC",
        day / 3600,
        (day % 3600) / 60,
        day % 60
    )
}
