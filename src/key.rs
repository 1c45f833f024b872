//! Type-safe key bindings.
//!
//! A [`Binding`] groups the key presses that trigger one action together with
//! the help text shown for it. Components expose their bindings through the
//! [`KeyMap`] trait so the [`help`](crate::help) view can render them.
//!
//! ```rust
//! use bubbletea_scrollable_list::key::Binding;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let refresh = Binding::new(vec![KeyCode::Char('r')]).with_help("r", "refresh");
//!
//! let msg = KeyMsg {
//!     key: KeyCode::Char('r'),
//!     modifiers: KeyModifiers::NONE,
//! };
//! assert!(refresh.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    /// Whether this press matches an incoming key message.
    ///
    /// Shift is ignored for character keys since it is already reflected in
    /// the character itself (`G` rather than `g`).
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        let mut modifiers = msg.modifiers;
        if matches!(msg.key, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        modifiers == self.modifiers
    }
}

/// Help text for a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"↑/k"`.
    pub key: String,
    /// What the key does, e.g. `"up"`.
    pub desc: String,
}

/// A set of key presses bound to one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates an enabled binding for the given keys.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help label and description.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the binding in a disabled state.
    pub fn with_disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Enables or disables the binding. Disabled bindings never match and are
    /// hidden from help.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the binding is enabled and has at least one key.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// The bound key presses.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether `msg` triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Implemented by components that expose key bindings for help rendering.
pub trait KeyMap {
    /// Bindings for the single-line help view.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings for the expanded help view, grouped into columns.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_plain_key_match() {
        let b = Binding::new(vec![KeyCode::Down, KeyCode::Char('j')]).with_help("↓/j", "down");
        assert!(b.matches(&press(KeyCode::Down, KeyModifiers::NONE)));
        assert!(b.matches(&press(KeyCode::Char('j'), KeyModifiers::NONE)));
        assert!(!b.matches(&press(KeyCode::Char('k'), KeyModifiers::NONE)));
        assert!(!b.matches(&press(KeyCode::Char('j'), KeyModifiers::CONTROL)));
        assert_eq!(b.help().key, "↓/j");
        assert_eq!(b.help().desc, "down");
    }

    #[test]
    fn test_shift_ignored_for_chars() {
        let b = Binding::new(vec![KeyCode::Char('G')]);
        assert!(b.matches(&press(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(b.matches(&press(KeyCode::Char('G'), KeyModifiers::NONE)));

        let tab = Binding::new(vec![KeyCode::Tab]);
        assert!(!tab.matches(&press(KeyCode::Tab, KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_modified_binding() {
        let b = Binding::new(vec![(KeyCode::Char('r'), KeyModifiers::CONTROL)]);
        assert!(b.matches(&press(KeyCode::Char('r'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&press(KeyCode::Char('r'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_disabled_binding() {
        let mut b = Binding::new(vec![KeyCode::Enter]).with_disabled();
        assert!(!b.enabled());
        assert!(!b.matches(&press(KeyCode::Enter, KeyModifiers::NONE)));

        b.set_enabled(true);
        assert!(b.matches(&press(KeyCode::Enter, KeyModifiers::NONE)));

        let empty = Binding::new(Vec::<KeyCode>::new());
        assert!(!empty.enabled());
    }
}
