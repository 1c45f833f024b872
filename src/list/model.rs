//! The list model: state, construction, accessors and viewport bookkeeping.

use std::sync::Arc;

use bubbletea_rs::Cmd;
use tracing::debug;

use super::keys::ListKeyMap;
use super::style::ListStyles;
use super::types::ItemDelegate;
use crate::controller::{Controller, Snapshot, Status};
use crate::help;
use crate::sentinel::{visible_fraction, BottomSentinel, Visibility};
use crate::source::DataSource;

/// A scrollable list that refreshes on demand and loads more items as its end
/// comes into view.
///
/// The model renders the items of a [`Controller`] through an
/// [`ItemDelegate`], keeps a cursor and a scroll offset, and after every
/// update checks whether the trailer row below the last item has entered the
/// viewport. When it has, the controller is asked for the next page.
///
/// The body of the list is addressed in lines: each item occupies
/// `delegate.height()` lines and the trailer occupies one more. `offset` is
/// the first body line on screen.
///
/// # Examples
///
/// ```rust
/// use bubbletea_scrollable_list::list::{DefaultDelegate, Model};
/// use bubbletea_scrollable_list::{from_fns, SourceError};
///
/// let source = from_fns(
///     || async { Ok::<_, SourceError>(Vec::<String>::new()) },
///     || async { Ok::<_, SourceError>(vec!["fresh".to_string()]) },
/// );
/// let list = Model::new(vec!["a".to_string()], source, DefaultDelegate::new(), 40, 10)
///     .with_title("Inbox");
/// assert_eq!(list.len(), 1);
/// assert_eq!(list.cursor(), 0);
/// ```
pub struct Model<T> {
    pub(super) title: String,
    pub(super) controller: Controller<T>,
    pub(super) delegate: Box<dyn ItemDelegate<T> + Send + Sync>,
    pub(super) sentinel: BottomSentinel,

    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) styles: ListStyles,
    pub(super) show_status_bar: bool,

    pub(super) help: help::Model,
    pub(super) keymap: ListKeyMap,
    pub(super) show_help: bool,
    pub(super) focused: bool,

    pub(super) cursor: usize,
    pub(super) offset: usize,
}

impl<T: Send + 'static> Model<T> {
    /// Creates a list over `initial` backed by `source`.
    pub fn new<S, D>(initial: Vec<T>, source: S, delegate: D, width: usize, height: usize) -> Self
    where
        S: DataSource<T> + 'static,
        D: ItemDelegate<T> + Send + Sync + 'static,
    {
        Self::from_controller(Controller::new(initial, source), delegate, width, height)
    }

    /// Creates a list over a source shared with other code.
    pub fn with_shared_source<D>(
        initial: Vec<T>,
        source: Arc<dyn DataSource<T>>,
        delegate: D,
        width: usize,
        height: usize,
    ) -> Self
    where
        D: ItemDelegate<T> + Send + Sync + 'static,
    {
        Self::from_controller(
            Controller::with_shared_source(initial, source),
            delegate,
            width,
            height,
        )
    }

    /// Wraps an existing controller.
    pub fn from_controller<D>(
        controller: Controller<T>,
        delegate: D,
        width: usize,
        height: usize,
    ) -> Self
    where
        D: ItemDelegate<T> + Send + Sync + 'static,
    {
        let mut help = help::Model::new();
        help.width = width;
        Self {
            title: "List".to_string(),
            controller,
            delegate: Box::new(delegate),
            sentinel: BottomSentinel::new(),
            width,
            height,
            styles: ListStyles::default(),
            show_status_bar: true,
            help,
            keymap: ListKeyMap::default(),
            show_help: true,
            focused: true,
            cursor: 0,
            offset: 0,
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Replaces the styles.
    pub fn with_styles(mut self, styles: ListStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the key bindings.
    pub fn with_keymap(mut self, keymap: ListKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Shows or hides the item counter.
    pub fn with_status_bar(mut self, show: bool) -> Self {
        self.show_status_bar = show;
        self
    }

    /// Shows or hides the help line.
    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    /// Resizes the list and rechecks the trailer.
    pub fn set_size(&mut self, width: usize, height: usize) -> Option<Cmd> {
        self.width = width;
        self.height = height;
        self.help.width = width;
        self.sync_viewport();
        self.check_sentinel()
    }

    /// Checks whether the end of the list is already on screen.
    ///
    /// Call once from the program's `init`; a short initial list then starts
    /// loading right away.
    pub fn init(&mut self) -> Option<Cmd> {
        self.check_sentinel()
    }

    /// The underlying controller.
    pub fn controller(&self) -> &Controller<T> {
        &self.controller
    }

    /// Requests a refresh, as if the refresh key was pressed.
    pub fn refresh(&mut self) -> Option<Cmd> {
        self.controller.request_refresh()
    }

    /// Requests the next page regardless of scroll position.
    pub fn load_more(&mut self) -> Option<Cmd> {
        self.controller.request_load_more()
    }

    /// Replaces the items with a new initial data set and scrolls to the top.
    ///
    /// A fetch in flight is not cancelled and settles against the new items.
    pub fn set_initial_items(&mut self, items: Vec<T>) -> Option<Cmd> {
        self.controller.notify_data_source_changed(items);
        self.cursor = 0;
        self.offset = 0;
        self.sentinel.reset();
        self.check_sentinel()
    }

    /// Current items in display order.
    pub fn items(&self) -> &[T] {
        self.controller.items()
    }

    /// Read-only view of the loading state.
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        self.controller.snapshot()
    }

    /// Current loading status.
    pub fn status(&self) -> Status {
        self.controller.status()
    }

    /// Whether more pages may exist.
    pub fn has_more(&self) -> bool {
        self.controller.has_more()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.controller.len()
    }

    /// True when the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.controller.is_empty()
    }

    /// Index of the selected item.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The selected item, if any.
    pub fn selected_item(&self) -> Option<&T> {
        self.controller.items().get(self.cursor)
    }

    /// The title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// First body line on screen.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub(super) fn item_height(&self) -> usize {
        self.delegate.height().max(1)
    }

    pub(super) fn footer_height(&self) -> usize {
        let footer = self.view_footer();
        if footer.is_empty() {
            0
        } else {
            footer.lines().count()
        }
    }

    /// Lines available for items and the trailer.
    pub(super) fn body_height(&self) -> usize {
        self.height.saturating_sub(1 + self.footer_height()).max(1)
    }

    /// Body line holding the trailer row.
    pub(super) fn trailer_line(&self) -> usize {
        self.len() * self.item_height()
    }

    fn max_offset(&self) -> usize {
        (self.trailer_line() + 1).saturating_sub(self.body_height())
    }

    pub(super) fn per_page(&self) -> usize {
        (self.body_height() / self.item_height()).max(1)
    }

    /// Scrolls so the selected item is fully on screen. Selecting the last
    /// item also reveals the trailer.
    pub(super) fn sync_viewport(&mut self) {
        if self.is_empty() {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        self.cursor = self.cursor.min(self.len() - 1);

        let item_height = self.item_height();
        let body_height = self.body_height();
        let top = self.cursor * item_height;
        let bottom = top + item_height;
        if top < self.offset {
            self.offset = top;
        } else if bottom > self.offset + body_height {
            self.offset = bottom.saturating_sub(body_height);
        }
        if self.cursor + 1 == self.len() {
            self.offset = self.offset.max(self.max_offset());
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Moves the cursor to the item whose key is `key`, or to the top when
    /// it is gone.
    pub(super) fn restore_selection(&mut self, key: Option<&str>) {
        let found = key.and_then(|key| {
            self.controller
                .items()
                .iter()
                .enumerate()
                .position(|(index, item)| self.delegate.key(item, index) == key)
        });
        match found {
            Some(index) => self.cursor = index,
            None => {
                self.cursor = 0;
                self.offset = 0;
            }
        }
        debug!(cursor = self.cursor, restored = found.is_some(), "selection restored after refresh");
    }

    pub(super) fn selected_key(&self) -> Option<String> {
        self.selected_item()
            .map(|item| self.delegate.key(item, self.cursor))
    }

    /// Feeds the trailer's current visibility to the sentinel and asks the
    /// controller for a page when it just came into view.
    pub(super) fn check_sentinel(&mut self) -> Option<Cmd> {
        let fraction = visible_fraction(self.trailer_line(), 1, self.offset, self.body_height());
        match self.sentinel.observe(fraction) {
            Visibility::Entered => self.controller.notify_bottom_visible(),
            _ => None,
        }
    }
}
