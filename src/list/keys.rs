//! Key bindings for list navigation and refresh.
//!
//! - **Cursor movement**: `↑/k` (up), `↓/j` (down)
//! - **Page navigation**: `pgdn/f` (next page), `pgup/b` (previous page)
//! - **Jump navigation**: `g/home` (go to start), `G/end` (go to end)
//! - **Refresh**: `r` or `ctrl+r`
//! - **Help**: `?` (show/hide full help)
//!
//! ```rust
//! use bubbletea_scrollable_list::key::KeyMap;
//! use bubbletea_scrollable_list::list::ListKeyMap;
//!
//! let keymap = ListKeyMap::default();
//! assert!(!keymap.short_help().is_empty());
//! ```

use crate::key::{self, KeyMap};
use crossterm::event::{KeyCode, KeyModifiers};

/// Key bindings for list navigation, refresh and help.
#[derive(Debug, Clone)]
pub struct ListKeyMap {
    /// Move selection up one item.
    pub cursor_up: key::Binding,
    /// Move selection down one item.
    pub cursor_down: key::Binding,
    /// Move selection down one page.
    pub next_page: key::Binding,
    /// Move selection up one page.
    pub prev_page: key::Binding,
    /// Jump to the first item.
    pub go_to_start: key::Binding,
    /// Jump to the last item and reveal the end of the list.
    pub go_to_end: key::Binding,
    /// Replace the items with a fresh first page.
    pub refresh: key::Binding,
    /// Expand the help view.
    pub show_full_help: key::Binding,
    /// Collapse the help view.
    pub close_full_help: key::Binding,
}

impl Default for ListKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            next_page: key::Binding::new(vec![KeyCode::PageDown, KeyCode::Char('f')])
                .with_help("pgdn/f", "next page"),
            prev_page: key::Binding::new(vec![KeyCode::PageUp, KeyCode::Char('b')])
                .with_help("pgup/b", "prev page"),
            go_to_start: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "go to start"),
            go_to_end: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "go to end"),
            refresh: key::Binding::new(vec![
                (KeyCode::Char('r'), KeyModifiers::NONE),
                (KeyCode::Char('r'), KeyModifiers::CONTROL),
            ])
            .with_help("r", "refresh"),
            show_full_help: key::Binding::new(vec![KeyCode::Char('?')])
                .with_help("?", "more"),
            close_full_help: key::Binding::new(vec![KeyCode::Char('?')])
                .with_help("?", "close help"),
        }
    }
}

impl KeyMap for ListKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.refresh,
            &self.show_full_help,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.next_page,
                &self.prev_page,
            ],
            vec![&self.go_to_start, &self.go_to_end],
            vec![&self.refresh, &self.close_full_help],
        ]
    }
}
