//! Scrollable list with pull-to-refresh and infinite scroll.
//!
//! [`Model`] draws the items of a [`Controller`](crate::Controller) and
//! turns user input into controller requests:
//!
//! - scrolling the trailer row below the last item into view loads the next
//!   page, once per time it enters the view
//! - the refresh key (`r` or `ctrl+r`) replaces the items with a fresh first
//!   page, keeping the selection on the same item when it is still present
//! - while a refresh runs the title bar shows "Refreshing…"; while a page
//!   loads the trailer shows "Loading…", and once the source is exhausted it
//!   shows "No more data"
//!
//! The model follows the usual component shape: the parent program forwards
//! every message to [`Model::update`] and returns whatever command it
//! produces, and calls [`Model::view`] from its own `view`.
//!
//! ## Example
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Msg};
//! use bubbletea_scrollable_list::list::{DefaultDelegate, Model};
//! use bubbletea_scrollable_list::{from_fns, SourceError};
//!
//! struct App {
//!     list: Model<String>,
//! }
//!
//! impl App {
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.list.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.list.view()
//!     }
//! }
//!
//! let source = from_fns(
//!     || async { Ok::<_, SourceError>(vec!["next".to_string()]) },
//!     || async { Ok::<_, SourceError>(vec!["first".to_string()]) },
//! );
//! let app = App {
//!     list: Model::new(vec![], source, DefaultDelegate::new(), 80, 24).with_title("Feed"),
//! };
//! assert!(app.view().contains("Feed"));
//! ```

pub mod defaultitem;
pub mod keys;
pub mod model;
pub mod style;
pub mod types;

mod rendering;

pub use defaultitem::{DefaultDelegate, DefaultItemStyles};
pub use keys::ListKeyMap;
pub use model::Model;
pub use style::ListStyles;
pub use types::ItemDelegate;

use bubbletea_rs::{Cmd, KeyMsg, Msg, WindowSizeMsg};
use tracing::debug;

use crate::controller::Settled;
use crate::key::{self, KeyMap};
use crate::Component;

impl<T: Send + 'static> KeyMap for Model<T> {
    fn short_help(&self) -> Vec<&key::Binding> {
        self.keymap.short_help()
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        self.keymap.full_help()
    }
}

impl<T: Send + 'static> Component for Model<T> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

impl<T: Send + 'static> Model<T> {
    /// Handles a message.
    ///
    /// Key presses move the cursor or start a refresh (only while focused),
    /// window size messages resize the list, and settlement messages from
    /// this list's controller are applied. Everything else is ignored.
    /// The returned command, if any, is a fetch the runtime must run.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            return self.set_size(size.width as usize, size.height as usize);
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focused {
                return None;
            }
            return self.handle_key(key_msg);
        }
        if self.controller.owns(&msg) {
            return self.apply_settlement(msg);
        }
        None
    }

    fn apply_settlement(&mut self, msg: Msg) -> Option<Cmd> {
        let selected = self.selected_key();
        let revision = self.controller.revision();

        let settled = self.controller.update(msg);
        if settled == Some(Settled::Refresh) && self.controller.revision() != revision {
            self.restore_selection(selected.as_deref());
        }
        // A trailer reached while refreshing was ignored by the controller,
        // and a trailer below changed items has moved; both count as newly
        // visible. Only a failed or exhausting page keeps the old reading,
        // so a failing page is not retried in a loop.
        if settled == Some(Settled::Refresh) || self.controller.revision() != revision {
            self.sentinel.reset();
        }
        self.sync_viewport();
        self.check_sentinel()
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.refresh.matches(key_msg) {
            return self.controller.request_refresh();
        }

        if self.keymap.cursor_up.matches(key_msg) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if self.keymap.cursor_down.matches(key_msg) {
            if self.cursor + 1 < self.len() {
                self.cursor += 1;
            }
        } else if self.keymap.next_page.matches(key_msg) {
            self.cursor = (self.cursor + self.per_page()).min(self.len().saturating_sub(1));
        } else if self.keymap.prev_page.matches(key_msg) {
            self.cursor = self.cursor.saturating_sub(self.per_page());
        } else if self.keymap.go_to_start.matches(key_msg) {
            self.cursor = 0;
            self.offset = 0;
        } else if self.keymap.go_to_end.matches(key_msg) {
            self.cursor = self.len().saturating_sub(1);
        } else if (self.help.show_all && self.keymap.close_full_help.matches(key_msg))
            || (!self.help.show_all && self.keymap.show_full_help.matches(key_msg))
        {
            self.help.show_all = !self.help.show_all;
            debug!(show_all = self.help.show_all, "help toggled");
        } else {
            return None;
        }

        self.sync_viewport();
        self.check_sentinel()
    }
}
