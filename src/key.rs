//! Type-safe key bindings for pagination controls.
//!
//! Bindings are built from option functions so keymaps read declaratively:
//!
//! ```rust
//! use bubbletea_pagewindow::key::{new_binding, with_help, with_keys_str};
//!
//! let next = new_binding(vec![
//!     with_keys_str(&["right", "l"]),
//!     with_help("→/l", "next page"),
//! ]);
//! assert_eq!(next.help().key, "→/l");
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key code.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// Parses a key name such as `"left"`, `"pgdown"`, `"ctrl+n"` or `"G"`.
    ///
    /// Returns `None` for names that do not map to a key.
    pub fn parse(name: &str) -> Option<Self> {
        let (modifiers, key) = match name.rsplit_once('+') {
            Some((prefix, key)) if !key.is_empty() => (parse_modifiers(prefix)?, key),
            _ => (KeyModifiers::NONE, name),
        };

        let code = match key {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" => KeyCode::PageUp,
            "pgdown" => KeyCode::PageDown,
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };

        Some(Self { code, modifiers })
    }

    fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        // Shift is implied by upper-case characters.
        msg.modifiers.difference(KeyModifiers::SHIFT)
            == self.modifiers.difference(KeyModifiers::SHIFT)
    }
}

fn parse_modifiers(prefix: &str) -> Option<KeyModifiers> {
    prefix
        .split('+')
        .try_fold(KeyModifiers::NONE, |acc, part| match part {
            "ctrl" => Some(acc | KeyModifiers::CONTROL),
            "alt" => Some(acc | KeyModifiers::ALT),
            "shift" => Some(acc | KeyModifiers::SHIFT),
            _ => None,
        })
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"←/h"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of keys that trigger one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

/// An option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Sets the keys of a binding from key names. Unknown names are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let keys: Vec<KeyPress> = keys.iter().filter_map(|k| KeyPress::parse(k)).collect();
    Box::new(move |b: &mut Binding| b.keys = keys)
}

/// Sets the help text of a binding.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

/// Creates the binding in a disabled state.
pub fn with_disabled() -> BindingOpt {
    Box::new(|b: &mut Binding| b.disabled = true)
}

impl Binding {
    /// Whether this binding is enabled and fires for `msg`.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }

    /// The keys bound to this action.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The binding's help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// A binding is enabled when it has keys and was not disabled.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }
}

/// Keymaps that can describe themselves in help views.
pub trait KeyMap {
    /// Bindings for the compact help line.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the full help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg { key, modifiers }
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(KeyPress::parse("pgup").map(|k| k.code), Some(KeyCode::PageUp));
        assert_eq!(KeyPress::parse("home").map(|k| k.code), Some(KeyCode::Home));
        assert_eq!(KeyPress::parse("G").map(|k| k.code), Some(KeyCode::Char('G')));
        assert_eq!(KeyPress::parse("nonsense"), None);

        let ctrl_n = KeyPress::parse("ctrl+n").expect("ctrl+n parses");
        assert_eq!(ctrl_n.code, KeyCode::Char('n'));
        assert_eq!(ctrl_n.modifiers, KeyModifiers::CONTROL);
    }

    #[test]
    fn test_binding_matches() {
        let binding = new_binding(vec![
            with_keys_str(&["right", "l", "ctrl+f"]),
            with_help("→/l", "next page"),
        ]);

        assert!(binding.matches(&press(KeyCode::Right, KeyModifiers::NONE)));
        assert!(binding.matches(&press(KeyCode::Char('l'), KeyModifiers::NONE)));
        assert!(binding.matches(&press(KeyCode::Char('f'), KeyModifiers::CONTROL)));
        assert!(!binding.matches(&press(KeyCode::Char('f'), KeyModifiers::NONE)));
        assert!(!binding.matches(&press(KeyCode::Left, KeyModifiers::NONE)));
        assert_eq!(binding.help().desc, "next page");
    }

    #[test]
    fn test_shift_is_ignored_for_uppercase() {
        let binding = new_binding(vec![with_keys_str(&["G"])]);
        assert!(binding.matches(&press(KeyCode::Char('G'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut binding = new_binding(vec![with_keys_str(&["h"]), with_disabled()]);
        assert!(!binding.matches(&press(KeyCode::Char('h'), KeyModifiers::NONE)));

        binding.set_enabled(true);
        assert!(binding.matches(&press(KeyCode::Char('h'), KeyModifiers::NONE)));
    }
}
