//! Default delegate for items that implement [`Display`].
//!
//! [`DefaultDelegate`] renders each item on a single line using its
//! `Display` output, truncated to the list width, and uses that same text as
//! the item key.
//!
//! ```rust
//! use bubbletea_scrollable_list::list::{DefaultDelegate, ItemDelegate};
//!
//! let delegate = DefaultDelegate::new();
//! assert_eq!(ItemDelegate::<&str>::key(&delegate, &"Item 1", 0), "Item 1");
//! ```

use std::fmt::Display;

use lipgloss_extras::lipgloss::{self, style::Style, Color};
use unicode_width::UnicodeWidthChar;

use super::style::ELLIPSIS;
use super::ItemDelegate;

/// Styling for the default item in its two states.
#[derive(Debug, Clone)]
pub struct DefaultItemStyles {
    /// Unselected items.
    pub normal: Style,
    /// The item under the cursor.
    pub selected: Style,
}

impl Default for DefaultItemStyles {
    fn default() -> Self {
        let normal = Style::new()
            .foreground(Color::from("#dddddd"))
            .padding(0, 0, 0, 2);
        let selected = Style::new()
            .border_style(lipgloss::normal_border())
            .border_left(true)
            .border_left_foreground(Color::from("#AD58B4"))
            .foreground(Color::from("#EE6FF8"))
            .padding(0, 0, 0, 1);
        Self { normal, selected }
    }
}

/// Delegate rendering any `Display` item as one line.
#[derive(Debug, Clone, Default)]
pub struct DefaultDelegate {
    /// Styling used for the normal and selected states.
    pub styles: DefaultItemStyles,
}

impl DefaultDelegate {
    /// Creates a delegate with default styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the styles.
    pub fn with_styles(mut self, styles: DefaultItemStyles) -> Self {
        self.styles = styles;
        self
    }
}

impl<T: Display> ItemDelegate<T> for DefaultDelegate {
    fn render(&self, item: &T, _index: usize, selected: bool, width: usize) -> String {
        // Both styles reserve two cells on the left.
        let text = truncate(&item.to_string(), width.saturating_sub(2));
        if selected {
            self.styles.selected.render(&text)
        } else {
            self.styles.normal.render(&text)
        }
    }

    fn key(&self, item: &T, _index: usize) -> String {
        item.to_string()
    }
}

/// Truncates `s` to at most `width` terminal cells, ending with an ellipsis
/// when anything was cut. A width of 0 disables truncation.
pub(super) fn truncate(s: &str, width: usize) -> String {
    let s = s.lines().next().unwrap_or("");
    if width == 0 {
        return s.to_string();
    }
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= width {
        return s.to_string();
    }

    let budget = width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}
