//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::domain::Section;
use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub select: Vec<String>,
    pub back: Vec<String>,
    pub dismiss: Vec<String>,
    pub open_in_browser: Vec<String>,
    pub toggle_menu: Vec<String>,
    pub resync: Vec<String>,
    pub newsletter: Vec<String>,
    pub jump_top: Vec<String>,
    pub jump_technology: Vec<String>,
    pub jump_business: Vec<String>,
    pub jump_markets: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            select: keys(&["Enter"]),
            back: keys(&["Backspace", "h", "Left"]),
            dismiss: keys(&["Esc"]),
            open_in_browser: keys(&["o"]),
            toggle_menu: keys(&["m"]),
            resync: keys(&["R"]),
            newsletter: keys(&["n"]),
            jump_top: keys(&["g", "Home"]),
            jump_technology: keys(&["1"]),
            jump_business: keys(&["2"]),
            jump_markets: keys(&["3"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 14] = [
            (&self.quit, Action::Quit),
            (&self.move_up, Action::MoveUp),
            (&self.move_down, Action::MoveDown),
            (&self.select, Action::Select),
            (&self.back, Action::Back),
            (&self.dismiss, Action::Dismiss),
            (&self.open_in_browser, Action::OpenInBrowser),
            (&self.toggle_menu, Action::ToggleMenu),
            (&self.resync, Action::Resync),
            (&self.newsletter, Action::Newsletter),
            (&self.jump_top, Action::JumpTo(Section::Top)),
            (&self.jump_technology, Action::JumpTo(Section::Technology)),
            (&self.jump_business, Action::JumpTo(Section::Business)),
            (&self.jump_markets, Action::JumpTo(Section::Markets)),
        ];

        table
            .iter()
            .find(|(bindings, _)| matches_key(key, bindings))
            .map(|(_, action)| *action)
            .unwrap_or(Action::None)
    }

    /// Short label of the first binding of an action, for the status bar.
    pub fn hint(&self, action: Action) -> &str {
        let bindings = match action {
            Action::Quit => &self.quit,
            Action::MoveUp => &self.move_up,
            Action::MoveDown => &self.move_down,
            Action::Select => &self.select,
            Action::Back => &self.back,
            Action::Dismiss => &self.dismiss,
            Action::OpenInBrowser => &self.open_in_browser,
            Action::ToggleMenu => &self.toggle_menu,
            Action::Resync => &self.resync,
            Action::Newsletter => &self.newsletter,
            Action::JumpTo(Section::Top) => &self.jump_top,
            Action::JumpTo(Section::Technology) => &self.jump_technology,
            Action::JumpTo(Section::Business) => &self.jump_business,
            Action::JumpTo(Section::Markets) => &self.jump_markets,
            Action::None => return "",
        };
        bindings.first().map(String::as_str).unwrap_or("")
    }
}

fn matches_key(key: &KeyEvent, bindings: &[String]) -> bool {
    bindings.iter().any(|binding| {
        parse_key_string(binding)
            .map(|parsed| parsed.matches(key))
            .unwrap_or(false)
    })
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored so "R" matches both `R` and `Shift+R` events.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string such as `"j"`, `"Enter"`, `"Ctrl+c"` or `"Shift+Tab"`.
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    let (modifier_parts, key_part) = match s.rsplit_once('+') {
        // A lone "+" is the plus key itself.
        Some((mods, key)) if !mods.is_empty() && !key.is_empty() => (Some(mods), key),
        _ => (None, s),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_parts.into_iter().flat_map(|m| m.split('+')) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "shift" => KeyModifiers::SHIFT,
            "alt" => KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        };
    }

    Ok(KeyBinding {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}
