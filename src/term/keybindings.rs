use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::apps::ToyApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    CycleNextWindow,
    CyclePrevWindow,
    CloseActive,
    MinimizeActive,
    MaximizeActive,
    ShowDesktop,
    Launch(ToyApp),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Quit => f.write_str("Quit"),
            Action::CycleNextWindow => f.write_str("Next window"),
            Action::CyclePrevWindow => f.write_str("Previous window"),
            Action::CloseActive => f.write_str("Close window"),
            Action::MinimizeActive => f.write_str("Minimize window"),
            Action::MaximizeActive => f.write_str("Maximize / restore window"),
            Action::ShowDesktop => f.write_str("Show desktop"),
            Action::Launch(app) => write!(f, "Open {}", app.title()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "BackTab".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Desktop shortcuts. Plain keys are safe to bind because toy apps take no
/// keyboard input.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::NONE));
        // Alt+Tab and Alt+F4 rarely reach a terminal, so each has a fallback.
        kb.add(CycleNextWindow, KeyCombo::new(KeyCode::Tab, KeyModifiers::ALT));
        kb.add(CycleNextWindow, KeyCombo::new(KeyCode::Tab, KeyModifiers::NONE));
        kb.add(CyclePrevWindow, KeyCombo::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        kb.add(CyclePrevWindow, KeyCombo::new(KeyCode::BackTab, KeyModifiers::NONE));
        kb.add(CloseActive, KeyCombo::new(KeyCode::F(4), KeyModifiers::ALT));
        kb.add(CloseActive, KeyCombo::new(KeyCode::Char('w'), KeyModifiers::NONE));
        kb.add(MinimizeActive, KeyCombo::new(KeyCode::Char('m'), KeyModifiers::NONE));
        kb.add(MaximizeActive, KeyCombo::new(KeyCode::Char('x'), KeyModifiers::NONE));
        kb.add(ShowDesktop, KeyCombo::new(KeyCode::Char('d'), KeyModifiers::NONE));
        for (idx, app) in ToyApp::ALL.into_iter().enumerate() {
            let digit = char::from(b'1' + idx as u8);
            kb.add(Launch(app), KeyCombo::new(KeyCode::Char(digit), KeyModifiers::NONE));
        }
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        self.map
            .iter()
            .find(|(_, list)| list.iter().any(|c| c.matches(key)))
            .map(|(action, _)| *action)
    }

    /// Return the first `KeyCombo` mapped to `action`, if any.
    pub fn first_combo(&self, action: Action) -> Option<KeyCombo> {
        self.map.get(&action).and_then(|list| list.first().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_desktop_shortcuts() {
        let kb = KeyBindings::default();
        let alt_tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::ALT);
        let alt_f4 = KeyEvent::new(KeyCode::F(4), KeyModifiers::ALT);
        assert_eq!(kb.action_for_key(&alt_tab), Some(Action::CycleNextWindow));
        assert_eq!(kb.action_for_key(&alt_f4), Some(Action::CloseActive));
        assert!(kb.matches(
            Action::Quit,
            &KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)
        ));
        assert_eq!(
            kb.action_for_key(&KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE)),
            Some(Action::Launch(ToyApp::Calculator))
        );
        assert_eq!(
            kb.action_for_key(&KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn combo_display() {
        let kb = KeyBindings::default();
        assert_eq!(
            kb.first_combo(Action::CloseActive).map(|c| c.to_string()),
            Some("Alt+F4".to_string())
        );
        assert_eq!(
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL).to_string(),
            "Ctrl+Q"
        );
    }
}
