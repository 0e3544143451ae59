//! Draws the desktop: windows bottom to top, then the taskbar row.
//!
//! Windows are painted in stacking order so a higher window simply
//! overwrites whatever it covers. All writes are clipped to the target
//! bounds; geometry may legitimately sit partly outside the buffer while the
//! viewport shrinks.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use super::host::{TermSurface, TerminalHost};
use super::theme;
use crate::chrome::{ChromeMetrics, ControlButton};
use crate::geometry::Geometry;
use crate::taskbar::{EntryId, Taskbar};
use crate::window::{WindowManager, WindowRecord};

/// Clickable taskbar entry from the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskbarHit {
    pub rect: Rect,
    pub entry: EntryId,
}

impl TaskbarHit {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.rect.x
            && column < self.rect.x.saturating_add(self.rect.width)
            && row >= self.rect.y
            && row < self.rect.y.saturating_add(self.rect.height)
    }
}

pub fn render_desktop(
    buffer: &mut Buffer,
    area: Rect,
    wm: &WindowManager<TerminalHost>,
    hint: &str,
) -> Vec<TaskbarHit> {
    let taskbar_rows = TerminalHost::TASKBAR_ROWS.min(area.height);
    let desktop = Rect {
        height: area.height - taskbar_rows,
        ..area
    };
    let taskbar_row = Rect {
        y: area.y + desktop.height,
        height: taskbar_rows,
        ..area
    };

    fill(buffer, desktop, theme::desktop());
    let chrome = wm.config().chrome;
    for id in wm.stacking_order() {
        if let Some(record) = wm.window(&id) {
            render_window(buffer, desktop, record, &chrome);
        }
    }
    render_taskbar(buffer, taskbar_row, wm.taskbar(), hint)
}

fn render_window(
    buffer: &mut Buffer,
    bounds: Rect,
    record: &WindowRecord<TermSurface>,
    chrome: &ChromeMetrics,
) {
    let surface = record.surface();
    if !surface.is_visible() {
        return;
    }
    let g = record.geometry();
    if g.width <= 0 || g.height <= 0 {
        return;
    }
    let focused = surface.is_active();
    let header = theme::header(focused);
    let border = theme::border(focused);
    let title_rows = chrome.title_bar_height.min(g.height);

    for y in g.top..g.bottom() {
        for x in g.left..g.right() {
            put(buffer, bounds, x, y, " ", theme::body());
        }
    }

    // Title bar, title text, control buttons.
    for y in g.top..g.top + title_rows {
        for x in g.left..g.right() {
            put(buffer, bounds, x, y, " ", header);
        }
    }
    let first_button = ControlButton::ORDER
        .iter()
        .map(|b| chrome.button_rect(g, *b).left)
        .min()
        .unwrap_or(g.right());
    let title_room = usize::try_from(first_button - g.left - 2).unwrap_or(0);
    put_str(buffer, bounds, g.left + 1, g.top, surface.title(), title_room, header);
    for button in ControlButton::ORDER {
        let rect = chrome.button_rect(g, button);
        if rect.left > g.left {
            put(buffer, bounds, rect.left + rect.width / 2, g.top, button.glyph(), header);
        }
    }

    // Side and bottom borders.
    let bottom = g.bottom() - 1;
    for y in g.top + title_rows..bottom {
        put(buffer, bounds, g.left, y, "│", border);
        put(buffer, bounds, g.right() - 1, y, "│", border);
    }
    if bottom >= g.top + title_rows {
        for x in g.left..g.right() {
            let symbol = if x == g.left {
                "└"
            } else if x == g.right() - 1 {
                "┘"
            } else {
                "─"
            };
            put(buffer, bounds, x, bottom, symbol, border);
        }
    }

    // Content.
    let inner = Geometry::new(
        g.left + 1,
        g.top + title_rows,
        (g.width - 2).max(0),
        (g.height - title_rows - 1).max(0),
    );
    let room = usize::try_from(inner.width).unwrap_or(0);
    for (row, line) in surface.lines().iter().enumerate() {
        let Ok(row) = i32::try_from(row) else { break };
        if row >= inner.height {
            break;
        }
        put_str(buffer, bounds, inner.left, inner.top + row, line, room, theme::body());
    }
}

fn render_taskbar(buffer: &mut Buffer, area: Rect, taskbar: &Taskbar, hint: &str) -> Vec<TaskbarHit> {
    let mut hits = Vec::new();
    if area.width == 0 || area.height == 0 {
        return hits;
    }
    fill(buffer, area, theme::taskbar());
    let right = area.x.saturating_add(area.width);
    let mut x = area.x;
    x = write_span(buffer, area, x, " desk-wm ", theme::taskbar());
    for entry in taskbar.entries() {
        if x >= right {
            break;
        }
        let label = if entry.is_minimized() {
            format!(" ({}) ", entry.title())
        } else {
            format!(" {} ", entry.title())
        };
        let style = theme::taskbar_entry(entry.is_active(), entry.is_minimized());
        let start = x;
        x = write_span(buffer, area, x, &label, style);
        hits.push(TaskbarHit {
            rect: Rect::new(start, area.y, x - start, 1),
            entry: entry.id(),
        });
        x = x.saturating_add(1).min(right);
    }
    let hint_width = u16::try_from(hint.chars().count()).unwrap_or(u16::MAX);
    if x.saturating_add(hint_width).saturating_add(1) <= right {
        write_span(buffer, area, right - hint_width - 1, hint, theme::taskbar_hint());
    }
    hits
}

fn fill(buffer: &mut Buffer, area: Rect, style: Style) {
    let area = area.intersection(buffer.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
    }
}

/// Write `text` at `(x, area.y)` clipped to `area`; returns the column after
/// the last character written.
fn write_span(buffer: &mut Buffer, area: Rect, x: u16, text: &str, style: Style) -> u16 {
    let right = area.x.saturating_add(area.width);
    let mut col = x;
    for ch in text.chars() {
        if col >= right {
            break;
        }
        if let Some(cell) = buffer.cell_mut((col, area.y)) {
            cell.set_symbol(ch.encode_utf8(&mut [0; 4]));
            cell.set_style(style);
        }
        col += 1;
    }
    col
}

fn put(buffer: &mut Buffer, bounds: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if x < bounds.x
        || y < bounds.y
        || x >= bounds.x.saturating_add(bounds.width)
        || y >= bounds.y.saturating_add(bounds.height)
    {
        return;
    }
    if let Some(cell) = buffer.cell_mut((x, y)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

fn put_str(
    buffer: &mut Buffer,
    bounds: Rect,
    x: i32,
    y: i32,
    text: &str,
    max_chars: usize,
    style: Style,
) {
    for (col, ch) in (x..).zip(text.chars().take(max_chars)) {
        put(buffer, bounds, col, y, ch.encode_utf8(&mut [0; 4]), style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WmConfig;
    use crate::persistence::GeometryStore;

    fn row(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    fn desktop() -> WindowManager<TerminalHost> {
        WindowManager::new(
            TerminalHost::new(80, 24),
            WmConfig::terminal(),
            GeometryStore::in_memory(),
        )
    }

    #[test]
    fn window_chrome_is_drawn() {
        let mut wm = desktop();
        wm.open("notepad", "Notepad");
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        render_desktop(&mut buffer, area, &wm, "");

        // 2,2 40x12: buttons centered at 33, 36, 39
        let title = row(&buffer, 2);
        assert_eq!(&title[3..10], "Notepad");
        assert_eq!(buffer.cell((33, 2)).map(|c| c.symbol()), Some("_"));
        assert_eq!(buffer.cell((36, 2)).map(|c| c.symbol()), Some("□"));
        assert_eq!(buffer.cell((39, 2)).map(|c| c.symbol()), Some("×"));
        assert_eq!(buffer.cell((2, 5)).map(|c| c.symbol()), Some("│"));
        assert_eq!(buffer.cell((2, 13)).map(|c| c.symbol()), Some("└"));
        assert!(row(&buffer, 3).contains("Shopping list"));
    }

    #[test]
    fn taskbar_hits_follow_entries() {
        let mut wm = desktop();
        let a = wm.open("notepad", "Notepad");
        wm.open("clock", "Clock");
        wm.minimize(&a);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        let hits = render_desktop(&mut buffer, area, &wm, "q quit");

        let bar = row(&buffer, 23);
        assert!(bar.starts_with(" desk-wm  (Notepad)  Clock "));
        assert!(bar.trim_end().ends_with("q quit"));
        assert_eq!(hits.len(), 2);
        let first = wm.taskbar().entries()[0].id();
        assert_eq!(hits[0].entry, first);
        assert!(hits[0].contains(12, 23));
        assert!(!hits[0].contains(12, 22));
    }

    #[test]
    fn minimized_windows_are_not_drawn() {
        let mut wm = desktop();
        let a = wm.open("notepad", "Notepad");
        wm.minimize(&a);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        render_desktop(&mut buffer, area, &wm, "");
        assert!(!row(&buffer, 2).contains("Notepad"));
    }
}
