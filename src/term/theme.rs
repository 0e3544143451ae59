use ratatui::style::{Color, Modifier, Style};

// Centralized colors for the terminal desktop.

pub fn desktop() -> Style {
    Style::default().bg(Color::Indexed(24)).fg(Color::Gray)
}

pub fn header(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

pub fn border(focused: bool) -> Style {
    let fg = if focused { Color::Blue } else { Color::DarkGray };
    Style::default().fg(fg).bg(Color::Black)
}

pub fn body() -> Style {
    Style::default().bg(Color::Black).fg(Color::White)
}

// Taskbar
pub fn taskbar() -> Style {
    Style::default().bg(Color::Gray).fg(Color::Black)
}

pub fn taskbar_entry(active: bool, minimized: bool) -> Style {
    if active {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if minimized {
        taskbar().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else {
        taskbar()
    }
}

pub fn taskbar_hint() -> Style {
    taskbar().fg(Color::DarkGray)
}
