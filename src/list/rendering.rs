//! View rendering for the list.
//!
//! The view is stacked top to bottom:
//! - a title bar, with a "Refreshing…" indicator while a refresh runs
//! - the visible slice of the body: item lines followed by the trailer row
//! - a footer holding the item counter and the help line

use super::style::BULLET;
use super::Model;
use crate::controller::Status;

impl<T: Send + 'static> Model<T> {
    pub(super) fn view_header(&self) -> String {
        let mut header = self.styles.title.clone().render(&self.title);
        if self.controller.is_refreshing() {
            header.push_str(&self.styles.refreshing.clone().render("Refreshing…"));
        }
        self.styles.title_bar.clone().render(&header)
    }

    /// Text of the trailer row below the last item.
    ///
    /// The row doubles as the bottom sentinel, so it is always part of the
    /// body even when blank.
    pub(super) fn view_trailer(&self) -> String {
        if self.controller.status() == Status::LoadingMore {
            self.styles.loading_more.clone().render("Loading…")
        } else if !self.controller.has_more() {
            self.styles.exhausted.clone().render("No more data")
        } else if self.is_empty() {
            self.styles.no_items.clone().render("No items.")
        } else {
            String::new()
        }
    }

    /// Renders the body lines between `offset` and `offset + body_height`.
    ///
    /// Only items overlapping the window are handed to the delegate.
    pub(super) fn view_items(&self) -> String {
        let item_height = self.item_height();
        let window_start = self.offset;
        let window_end = self.offset + self.body_height();

        let mut lines: Vec<String> = Vec::new();
        let first = window_start / item_height;
        for (index, item) in self.controller.items().iter().enumerate().skip(first) {
            let top = index * item_height;
            if top >= window_end {
                break;
            }
            let rendered = self
                .delegate
                .render(item, index, index == self.cursor, self.width);
            let mut item_lines: Vec<String> = rendered.lines().map(str::to_string).collect();
            item_lines.resize(item_height, String::new());
            for (line_no, line) in (top..).zip(item_lines) {
                if line_no >= window_start && line_no < window_end {
                    lines.push(line);
                }
            }
        }

        let trailer_line = self.trailer_line();
        if trailer_line >= window_start && trailer_line < window_end {
            lines.push(self.view_trailer());
        }

        lines.join("\n")
    }

    /// Renders the item counter and help.
    pub(super) fn view_footer(&self) -> String {
        let mut footer: Vec<String> = Vec::new();
        if self.show_status_bar {
            let mut status = if self.is_empty() {
                "0 items".to_string()
            } else {
                let noun = if self.len() == 1 { "item" } else { "items" };
                format!("{}/{} {}", self.cursor + 1, self.len(), noun)
            };
            if !self.controller.has_more() {
                status.push_str(&format!(" {} end of list", BULLET));
            }
            footer.push(self.styles.status_bar.clone().render(&status));
        }
        if self.show_help {
            let help_view = self.help.view(&self.keymap);
            if !help_view.is_empty() {
                footer.push(self.styles.help.clone().render(&help_view));
            }
        }
        footer.join("\n")
    }

    /// Renders the whole list.
    pub fn view(&self) -> String {
        let mut sections = vec![self.view_header(), self.view_items()];
        let footer = self.view_footer();
        if !footer.is_empty() {
            sections.push(footer);
        }
        sections.join("\n")
    }
}
