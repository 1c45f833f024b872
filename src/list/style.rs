//! Styles for the list chrome: title, loading indicators, trailer and status bar.
//!
//! All default colours are `AdaptiveColor`s so the list reads well on both
//! light and dark terminals. None of the default styles add vertical padding;
//! the layout assumes the title bar, trailer and status bar are one line each.
//!
//! ```rust
//! use bubbletea_scrollable_list::list::ListStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = ListStyles::default();
//! styles.title = Style::new().bold(true);
//! ```

use lipgloss_extras::prelude::*;

/// Bullet used between status bar segments.
pub const BULLET: &str = "•";

/// Ellipsis used for truncated content.
pub const ELLIPSIS: &str = "…";

/// Styles for every part of the list other than the items themselves.
#[derive(Debug, Clone)]
pub struct ListStyles {
    /// Row holding the title and the refresh indicator.
    pub title_bar: Style,
    /// The list title.
    pub title: Style,
    /// "Refreshing…" indicator in the title bar.
    pub refreshing: Style,
    /// "Loading…" text in the trailer row.
    pub loading_more: Style,
    /// "No more data" text in the trailer row.
    pub exhausted: Style,
    /// Placeholder shown when the list holds no items.
    pub no_items: Style,
    /// Item counter below the list.
    pub status_bar: Style,
    /// Help line below the status bar.
    pub help: Style,
}

impl Default for ListStyles {
    fn default() -> Self {
        let very_subdued = AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        };
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };

        Self {
            title_bar: Style::new().padding_left(2),
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230"))
                .padding(0, 1, 0, 1),
            refreshing: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#8E8E8E",
                    Dark: "#747373",
                })
                .padding_left(1),
            loading_more: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#8E8E8E",
                    Dark: "#747373",
                })
                .padding_left(2),
            exhausted: Style::new().foreground(subdued).padding_left(2),
            no_items: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            status_bar: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#A49FA5",
                    Dark: "#777777",
                })
                .padding_left(2),
            help: Style::new().foreground(very_subdued).padding_left(2),
        }
    }
}
