#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-scrollable-list/")]

//! # bubbletea-scrollable-list
//!
//! A paginated, scrollable list for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications. The list refreshes on demand and loads the next page when
//! its end scrolls into view, driven by two asynchronous producers the
//! application supplies.
//!
//! ## Overview
//!
//! The crate is split in two layers:
//!
//! - [`Controller`] is the data-loading state machine. It holds the items,
//!   a [`Status`] (`Idle`, `Refreshing` or `LoadingMore`) and a `has_more`
//!   flag, and guarantees that at most one fetch runs at a time. It knows
//!   nothing about terminals and can be driven from any async code.
//! - [`list::Model`] is the terminal widget. It renders a controller's items
//!   through an [`ItemDelegate`](list::ItemDelegate), handles scrolling and
//!   the refresh key, and watches a [`BottomSentinel`](sentinel::BottomSentinel)
//!   below the last item to trigger the next page.
//!
//! Producers implement [`DataSource`], or are built from two closures with
//! [`from_fns`]. A `load_more` that yields an empty page marks the list as
//! exhausted until the next successful refresh. Producer failures are logged
//! through `tracing` and never surface to the renderer; the list simply
//! returns to idle with its items untouched.
//!
//! ## Driving the controller directly
//!
//! ```rust
//! use bubbletea_scrollable_list::{from_fns, Controller, SourceError};
//!
//! # tokio_test_block(async {
//! let source = from_fns(
//!     || async { Ok::<_, SourceError>(vec![4, 5]) },
//!     || async { Ok::<_, SourceError>(vec![1, 2, 3]) },
//! );
//! let mut list = Controller::new(vec![1, 2, 3], source);
//!
//! list.load_more().await;
//! assert_eq!(list.items(), &[1, 2, 3, 4, 5]);
//!
//! list.refresh().await;
//! assert_eq!(list.items(), &[1, 2, 3]);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! Forward every message to the list and return its command; the runtime
//! runs the fetch and hands the settlement back through `update`.
//!
//! ```rust
//! use bubbletea_rs::{Cmd, KeyMsg, Model, Msg};
//! use bubbletea_scrollable_list::prelude::*;
//! use crossterm::event::KeyCode;
//!
//! struct App {
//!     list: ScrollableList<String>,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let source = from_fns(
//!             || async { Ok::<_, SourceError>(Vec::<String>::new()) },
//!             || async { Ok::<_, SourceError>(vec!["Item 1".to_string()]) },
//!         );
//!         let mut list = ScrollableList::new(vec![], source, DefaultDelegate::new(), 80, 24)
//!             .with_title("Items");
//!         let cmd = list.init();
//!         (Self { list }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(key) = msg.downcast_ref::<KeyMsg>() {
//!             if key.key == KeyCode::Char('q') {
//!                 return Some(bubbletea_rs::quit());
//!             }
//!         }
//!         self.list.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.list.view()
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and installs no subscriber. Failed
//! fetches are logged at `warn`, ignored requests and settlements at `debug`,
//! and sentinel edges at `trace`.

pub mod controller;
pub mod error;
pub mod help;
pub mod key;
pub mod list;
pub mod sentinel;
pub mod source;

use bubbletea_rs::Cmd;

/// Keyboard focus handling shared by interactive components.
///
/// A focused component reacts to key presses; a blurred one ignores them
/// but keeps processing every other message.
///
/// ```rust
/// use bubbletea_scrollable_list::prelude::*;
///
/// let source = from_fns(
///     || async { Ok::<_, SourceError>(Vec::<u32>::new()) },
///     || async { Ok::<_, SourceError>(Vec::<u32>::new()) },
/// );
/// let mut list = ScrollableList::new(vec![1, 2], source, DefaultDelegate::new(), 40, 10);
/// assert!(list.focused());
/// list.blur();
/// assert!(!list.focused());
/// ```
pub trait Component {
    /// Gives the component keyboard focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes keyboard focus.
    fn blur(&mut self);

    /// Whether the component has keyboard focus.
    fn focused(&self) -> bool;
}

pub use controller::{Controller, LoadMoreSettledMsg, RefreshSettledMsg, Settled, Snapshot, Status};
pub use error::{BoxError, ListError, SourceError};
pub use source::{from_fns, DataSource, FnSource};

/// The terminal list widget.
pub type ScrollableList<T> = list::Model<T>;

/// Common imports for applications embedding the list.
pub mod prelude {
    pub use crate::controller::{Controller, Settled, Snapshot, Status};
    pub use crate::error::{ListError, SourceError};
    pub use crate::key::{Binding, KeyMap};
    pub use crate::list::{DefaultDelegate, ItemDelegate, ListKeyMap, ListStyles};
    pub use crate::sentinel::BottomSentinel;
    pub use crate::source::{from_fns, DataSource};
    pub use crate::{Component, ScrollableList};
}
