use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A named set of keys, with the text a help line would show for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        any_matches(&self.keys, event)
    }

    /// `"key desc"`, as shown in a status line.
    pub fn help_text(&self) -> String {
        format!("{} {}", self.help_key, self.help_desc)
    }
}

pub fn any_matches(patterns: &[KeyEvent], event: &KeyEvent) -> bool {
    patterns.iter().any(|p| key_event_matches(p, event))
}

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && modifiers_match(pattern.modifiers, event.modifiers)
}

// Shift is ignored for printable chars: terminals report `G` both with and without it.
fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers) -> bool {
    pattern.ctrl == event.ctrl && pattern.alt == event.alt
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_ctrl() {
        let b = Binding::new("q", "quit", vec![key_char('q')]);
        assert!(b.matches(&key_char('q')));
        assert!(!b.matches(&key_ctrl('q')));
    }

    #[test]
    fn shift_is_ignored_for_chars() {
        let shifted = key_char('G').with_modifiers(KeyModifiers {
            shift: true,
            ..KeyModifiers::none()
        });
        assert!(key_event_matches(&key_char('G'), &shifted));
    }

    #[test]
    fn help_text_joins_key_and_desc() {
        let b = Binding::new("space", "select", vec![key_char(' ')]);
        assert_eq!(b.help_text(), "space select");
    }
}
