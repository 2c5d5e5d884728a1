//! Key bindings for paginator navigation.

use crate::key::{self, KeyMap};

/// Key bindings for moving between pages.
///
/// ```rust
/// use bubbletea_pagewindow::paginator::PaginatorKeyMap;
/// use bubbletea_pagewindow::key;
///
/// let keymap = PaginatorKeyMap {
///     prev_page: key::new_binding(vec![
///         key::with_keys_str(&["a", "left"]),
///         key::with_help("a/←", "previous page"),
///     ]),
///     next_page: key::new_binding(vec![
///         key::with_keys_str(&["d", "right"]),
///         key::with_help("d/→", "next page"),
///     ]),
///     ..PaginatorKeyMap::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Previous page. Default keys: PageUp, Left Arrow, 'h'
    pub prev_page: key::Binding,
    /// Next page. Default keys: PageDown, Right Arrow, 'l'
    pub next_page: key::Binding,
    /// First page. Default keys: Home, 'g'
    pub first_page: key::Binding,
    /// Last page. Default keys: End, 'G'
    pub last_page: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["pgup", "left", "h"]),
                key::with_help("←/h", "prev page"),
            ]),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["pgdown", "right", "l"]),
                key::with_help("→/l", "next page"),
            ]),
            first_page: key::new_binding(vec![
                key::with_keys_str(&["home", "g"]),
                key::with_help("g/home", "first page"),
            ]),
            last_page: key::new_binding(vec![
                key::with_keys_str(&["end", "G"]),
                key::with_help("G/end", "last page"),
            ]),
        }
    }
}

impl KeyMap for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.prev_page, &self.next_page],
            vec![&self.first_page, &self.last_page],
        ]
    }
}
