//! The list's data-loading state machine.
//!
//! [`Controller`] owns the items of a paginated list together with its
//! loading status and exhaustion flag. It reacts to two external signals,
//! "the bottom sentinel is visible" and "a refresh was requested", by
//! driving the caller's [`DataSource`].
//!
//! Like every bubbletea component, fetching is split in two halves. An
//! operation that starts a fetch flips the status and returns a [`Cmd`]; the
//! runtime awaits it and delivers a settlement message, which
//! [`Controller::update`] applies before returning the status to
//! [`Status::Idle`]. Code that is not running inside a bubbletea program can
//! use the awaited forms [`Controller::refresh`] and [`Controller::load_more`]
//! instead.
//!
//! ```text
//!            request_refresh                 request_load_more
//!   Refreshing <-------------- Idle --------------> LoadingMore
//!        |                      ^  ^                     |
//!        +----- settled --------+  +------ settled ------+
//! ```
//!
//! Any request made while a fetch is in flight is a no-op, so at most one
//! fetch runs at a time without any locking.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use bubbletea_rs::{Cmd, Msg};
use futures::FutureExt;
use tracing::{debug, trace, warn};

use crate::error::{ListError, SourceError};
use crate::source::DataSource;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Loading status of a list. Exactly one value holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// No fetch in flight.
    #[default]
    Idle,
    /// The `refresh` producer is running.
    Refreshing,
    /// The `load_more` producer is running.
    LoadingMore,
}

impl Status {
    /// Returns true when no fetch is in flight.
    pub fn is_idle(self) -> bool {
        self == Status::Idle
    }
}

/// Read-only view of the controller state handed to renderers.
#[derive(Debug, PartialEq, Eq)]
pub struct Snapshot<'a, T> {
    /// Current items in display order.
    pub items: &'a [T],
    /// Current loading status.
    pub status: Status,
    /// Whether further pages may exist.
    pub has_more: bool,
}

impl<T> Clone for Snapshot<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Snapshot<'_, T> {}

/// Message delivered when a refresh fetch settles.
#[derive(Debug)]
pub struct RefreshSettledMsg<T> {
    /// Id of the controller that issued the fetch.
    pub id: i64,
    /// Producer outcome.
    pub result: Result<Vec<T>, SourceError>,
}

/// Message delivered when a load-more fetch settles.
#[derive(Debug)]
pub struct LoadMoreSettledMsg<T> {
    /// Id of the controller that issued the fetch.
    pub id: i64,
    /// Producer outcome.
    pub result: Result<Vec<T>, SourceError>,
}

/// Which kind of fetch a settlement message completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// A refresh settled and the status is back to idle.
    Refresh,
    /// A load-more settled and the status is back to idle.
    LoadMore,
    /// The message belonged to this controller but no matching fetch was in
    /// flight, so it was dropped.
    Stale,
}

/// Paginated list state machine.
///
/// # Examples
///
/// ```rust
/// use bubbletea_scrollable_list::{from_fns, Controller, SourceError, Status};
///
/// let source = from_fns(
///     || async { Ok::<_, SourceError>(vec!['D', 'E']) },
///     || async { Ok::<_, SourceError>(vec!['A']) },
/// );
/// let mut list = Controller::new(vec!['A', 'B', 'C'], source);
///
/// let cmd = list.notify_bottom_visible();
/// assert!(cmd.is_some());
/// assert_eq!(list.status(), Status::LoadingMore);
///
/// // Repeated visibility signals while loading are ignored.
/// assert!(list.notify_bottom_visible().is_none());
/// assert!(list.request_refresh().is_none());
/// ```
pub struct Controller<T> {
    id: i64,
    items: Vec<T>,
    status: Status,
    has_more: bool,
    revision: u64,
    source: Arc<dyn DataSource<T>>,
}

impl<T: fmt::Debug> fmt::Debug for Controller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("id", &self.id)
            .field("items", &self.items)
            .field("status", &self.status)
            .field("has_more", &self.has_more)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Controller<T> {
    /// Creates a controller holding `initial`, idle, with `has_more` set.
    pub fn new<S>(initial: Vec<T>, source: S) -> Self
    where
        S: DataSource<T> + 'static,
    {
        Self::with_shared_source(initial, Arc::new(source))
    }

    /// Creates a controller over a source that is shared with other code.
    pub fn with_shared_source(initial: Vec<T>, source: Arc<dyn DataSource<T>>) -> Self {
        Self {
            id: next_id(),
            items: initial,
            status: Status::Idle,
            has_more: true,
            revision: 0,
            source,
        }
    }

    /// Unique id used to route settlement messages back to this controller.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Counter bumped every time the items change.
    ///
    /// Renderers compare it across an update to tell a settlement that
    /// changed the list from one that left it untouched.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current items in display order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Current loading status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether another `load_more` may be issued.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// True while a refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.status == Status::Refreshing
    }

    /// True while a load-more is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.status == Status::LoadingMore
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items are held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only view of the whole state.
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot {
            items: &self.items,
            status: self.status,
            has_more: self.has_more,
        }
    }

    /// Starts a refresh if the list is idle.
    ///
    /// Returns the fetch command, or `None` when another fetch is in flight.
    /// On success the items are replaced and `has_more` is reset; on failure
    /// the items are kept. The status returns to idle either way once the
    /// settlement message is applied with [`Controller::update`].
    pub fn request_refresh(&mut self) -> Option<Cmd> {
        if self.status != Status::Idle {
            debug!(id = self.id, status = ?self.status, "refresh ignored while fetching");
            return None;
        }
        self.status = Status::Refreshing;

        let source = Arc::clone(&self.source);
        let id = self.id;
        Some(Box::pin(async move {
            let result = guarded(source.refresh()).await;
            Some(Box::new(RefreshSettledMsg { id, result }) as Msg)
        }))
    }

    /// Starts fetching the next page if the list is idle and not exhausted.
    ///
    /// An empty page marks the list exhausted; a non-empty page is appended
    /// in order.
    pub fn request_load_more(&mut self) -> Option<Cmd> {
        if self.status != Status::Idle {
            debug!(id = self.id, status = ?self.status, "load more ignored while fetching");
            return None;
        }
        if !self.has_more {
            debug!(id = self.id, "load more ignored, list exhausted");
            return None;
        }
        self.status = Status::LoadingMore;

        let source = Arc::clone(&self.source);
        let id = self.id;
        Some(Box::pin(async move {
            let result = guarded(source.load_more()).await;
            Some(Box::new(LoadMoreSettledMsg { id, result }) as Msg)
        }))
    }

    /// Reacts to the bottom sentinel being visible.
    ///
    /// Safe to call on every frame the sentinel stays in view: only an idle,
    /// non-exhausted list starts a fetch.
    pub fn notify_bottom_visible(&mut self) -> Option<Cmd> {
        if !self.has_more || self.status != Status::Idle {
            trace!(id = self.id, status = ?self.status, has_more = self.has_more, "sentinel visible, nothing to do");
            return None;
        }
        self.request_load_more()
    }

    /// Replaces the items with a new initial data set.
    ///
    /// This does not touch the status or `has_more`; a fetch already in
    /// flight still settles against the new items.
    pub fn notify_data_source_changed(&mut self, initial: Vec<T>) {
        debug!(id = self.id, len = initial.len(), "initial data replaced");
        self.items = initial;
        self.revision += 1;
    }

    /// Returns true if `msg` is a settlement message addressed to this controller.
    pub fn owns(&self, msg: &Msg) -> bool {
        if let Some(settled) = msg.downcast_ref::<RefreshSettledMsg<T>>() {
            return settled.id == self.id;
        }
        if let Some(settled) = msg.downcast_ref::<LoadMoreSettledMsg<T>>() {
            return settled.id == self.id;
        }
        false
    }

    /// Applies a settlement message.
    ///
    /// Returns `None` when the message is not a settlement addressed to this
    /// controller; such messages are dropped untouched.
    pub fn update(&mut self, msg: Msg) -> Option<Settled> {
        if !self.owns(&msg) {
            return None;
        }
        match msg.downcast::<RefreshSettledMsg<T>>() {
            Ok(settled) => Some(self.apply_refresh(settled.result)),
            Err(msg) => match msg.downcast::<LoadMoreSettledMsg<T>>() {
                Ok(settled) => Some(self.apply_load_more(settled.result)),
                Err(_) => None,
            },
        }
    }

    /// Refreshes and waits for the producer to settle.
    ///
    /// A no-op when another fetch is in flight.
    pub async fn refresh(&mut self) {
        if let Some(cmd) = self.request_refresh() {
            self.settle(cmd).await;
        }
    }

    /// Loads the next page and waits for the producer to settle.
    ///
    /// A no-op when another fetch is in flight or the list is exhausted.
    pub async fn load_more(&mut self) {
        if let Some(cmd) = self.request_load_more() {
            self.settle(cmd).await;
        }
    }

    async fn settle(&mut self, cmd: Cmd) {
        if let Some(msg) = cmd.await {
            self.update(msg);
        }
    }

    fn apply_refresh(&mut self, result: Result<Vec<T>, SourceError>) -> Settled {
        if self.status != Status::Refreshing {
            debug!(id = self.id, status = ?self.status, "stale refresh settlement dropped");
            return Settled::Stale;
        }
        match result {
            Ok(items) => {
                debug!(id = self.id, len = items.len(), "refreshed");
                self.items = items;
                self.has_more = true;
                self.revision += 1;
            }
            Err(source) => {
                let err = ListError::RefreshFailure { source };
                warn!(id = self.id, error = %err, "list fetch failed");
            }
        }
        self.status = Status::Idle;
        Settled::Refresh
    }

    fn apply_load_more(&mut self, result: Result<Vec<T>, SourceError>) -> Settled {
        if self.status != Status::LoadingMore {
            debug!(id = self.id, status = ?self.status, "stale load more settlement dropped");
            return Settled::Stale;
        }
        match result {
            Ok(items) if items.is_empty() => {
                debug!(id = self.id, "list exhausted");
                self.has_more = false;
            }
            Ok(mut items) => {
                debug!(id = self.id, appended = items.len(), "page loaded");
                self.items.append(&mut items);
                self.revision += 1;
            }
            Err(source) => {
                let err = ListError::LoadMoreFailure { source };
                warn!(id = self.id, error = %err, "list fetch failed");
            }
        }
        self.status = Status::Idle;
        Settled::LoadMore
    }
}

/// Runs a producer future, turning a panic into a [`SourceError::Panicked`].
async fn guarded<T, F>(fetch: F) -> Result<Vec<T>, SourceError>
where
    F: Future<Output = Result<Vec<T>, SourceError>>,
{
    match AssertUnwindSafe(fetch).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(SourceError::from_panic(&payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::from_fns;
    use crate::source::testing::{ScriptedSource, Step};

    fn controller(
        initial: Vec<char>,
        source: ScriptedSource<char>,
    ) -> (Controller<char>, Arc<ScriptedSource<char>>) {
        let source = Arc::new(source);
        let shared: Arc<dyn DataSource<char>> = source.clone();
        (Controller::with_shared_source(initial, shared), source)
    }

    async fn settle(c: &mut Controller<char>, cmd: Option<Cmd>) -> Option<Settled> {
        let msg = cmd.expect("expected a fetch command").await;
        c.update(msg.expect("fetch commands always produce a message"))
    }

    #[tokio::test]
    async fn test_initial_state() {
        let (c, _) = controller(vec!['A', 'B'], ScriptedSource::new());
        assert_eq!(
            c.snapshot(),
            Snapshot {
                items: &['A', 'B'],
                status: Status::Idle,
                has_more: true,
            }
        );
        assert_eq!(c.len(), 2);
        assert!(!c.is_empty());
    }

    #[tokio::test]
    async fn test_pagination_scenario() {
        let (mut c, source) = controller(
            vec!['A', 'B', 'C'],
            ScriptedSource::new()
                .with_load(Step::Items(vec!['D', 'E']))
                .with_load(Step::Items(vec![])),
        );

        let cmd = c.notify_bottom_visible();
        assert_eq!(settle(&mut c, cmd).await, Some(Settled::LoadMore));
        assert_eq!(c.items(), &['A', 'B', 'C', 'D', 'E']);
        assert!(c.has_more());
        assert_eq!(c.status(), Status::Idle);

        let cmd = c.notify_bottom_visible();
        settle(&mut c, cmd).await;
        assert_eq!(c.items(), &['A', 'B', 'C', 'D', 'E']);
        assert!(!c.has_more());
        assert_eq!(c.status(), Status::Idle);
        assert_eq!(source.loads(), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_holds_until_successful_refresh() {
        let (mut c, source) = controller(
            vec!['A'],
            ScriptedSource::new()
                .with_load(Step::Items(vec![]))
                .with_load(Step::Items(vec!['Z']))
                .with_refresh(Step::Fail("offline"))
                .with_refresh(Step::Items(vec!['X', 'Y'])),
        );

        c.load_more().await;
        assert!(!c.has_more());

        assert!(c.notify_bottom_visible().is_none());
        assert!(c.request_load_more().is_none());

        c.refresh().await;
        assert!(!c.has_more(), "a failed refresh must not reset exhaustion");
        assert_eq!(c.items(), &['A']);

        c.refresh().await;
        assert!(c.has_more());
        assert_eq!(c.items(), &['X', 'Y']);

        c.load_more().await;
        assert_eq!(c.items(), &['X', 'Y', 'Z']);
        assert_eq!(source.loads(), 2);
        assert_eq!(source.refreshes(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_items() {
        let (mut c, _) = controller(
            vec!['A', 'B', 'C'],
            ScriptedSource::new().with_refresh(Step::Fail("500")),
        );
        let before = c.items().to_vec();

        let cmd = c.request_refresh();
        assert!(c.is_refreshing());
        assert_eq!(settle(&mut c, cmd).await, Some(Settled::Refresh));

        assert_eq!(c.items(), before.as_slice());
        assert_eq!(c.status(), Status::Idle);
    }

    #[tokio::test]
    async fn test_load_more_failure_keeps_state() {
        let (mut c, _) = controller(
            vec!['A'],
            ScriptedSource::new()
                .with_load(Step::Fail("timeout"))
                .with_load(Step::Items(vec!['B'])),
        );

        c.load_more().await;
        assert_eq!(c.items(), &['A']);
        assert!(c.has_more());
        assert_eq!(c.status(), Status::Idle);

        // The next trigger retries naturally.
        c.load_more().await;
        assert_eq!(c.items(), &['A', 'B']);
    }

    #[tokio::test]
    async fn test_producer_panic_returns_to_idle() {
        let (mut c, _) = controller(
            vec!['A'],
            ScriptedSource::new()
                .with_load(Step::Panic("producer bug"))
                .with_refresh(Step::Panic("producer bug")),
        );

        c.load_more().await;
        assert_eq!(c.status(), Status::Idle);
        assert_eq!(c.items(), &['A']);
        assert!(c.has_more());

        c.refresh().await;
        assert_eq!(c.status(), Status::Idle);
        assert_eq!(c.items(), &['A']);
    }

    #[tokio::test]
    async fn test_repeated_visibility_issues_one_fetch() {
        let (mut c, source) = controller(
            vec!['A'],
            ScriptedSource::new().with_load(Step::Items(vec!['B'])),
        );

        let cmd = c.notify_bottom_visible();
        assert!(cmd.is_some());
        for _ in 0..10 {
            assert!(c.notify_bottom_visible().is_none());
        }
        settle(&mut c, cmd).await;

        assert_eq!(source.loads(), 1);
        assert_eq!(c.items(), &['A', 'B']);
    }

    #[tokio::test]
    async fn test_fetches_are_mutually_exclusive() {
        let (mut c, source) = controller(
            vec!['A'],
            ScriptedSource::new()
                .with_refresh(Step::Items(vec!['R']))
                .with_load(Step::Items(vec!['L'])),
        );

        let refresh = c.request_refresh();
        assert_eq!(c.status(), Status::Refreshing);
        assert!(c.request_load_more().is_none());
        assert!(c.notify_bottom_visible().is_none());
        assert!(c.request_refresh().is_none());
        settle(&mut c, refresh).await;
        assert_eq!(c.items(), &['R']);

        let load = c.request_load_more();
        assert_eq!(c.status(), Status::LoadingMore);
        assert!(c.request_refresh().is_none());
        assert!(c.request_load_more().is_none());
        settle(&mut c, load).await;
        assert_eq!(c.items(), &['R', 'L']);

        assert_eq!(source.refreshes(), 1);
        assert_eq!(source.loads(), 1);
    }

    #[tokio::test]
    async fn test_load_more_when_exhausted_is_noop() {
        let (mut c, source) = controller(vec!['A'], ScriptedSource::new());
        c.load_more().await;
        assert!(!c.has_more());

        let before = (c.items().to_vec(), c.status(), c.has_more());
        assert!(c.request_load_more().is_none());
        assert_eq!(before, (c.items().to_vec(), c.status(), c.has_more()));
        assert_eq!(source.loads(), 1);
    }

    #[tokio::test]
    async fn test_data_source_change_during_load() {
        let (mut c, _) = controller(
            vec!['A'],
            ScriptedSource::new().with_load(Step::Items(vec!['C'])),
        );

        let cmd = c.request_load_more();
        c.notify_data_source_changed(vec!['X', 'Y']);
        assert_eq!(c.items(), &['X', 'Y']);
        assert!(c.is_loading_more());

        settle(&mut c, cmd).await;
        assert_eq!(c.items(), &['X', 'Y', 'C']);
    }

    #[tokio::test]
    async fn test_foreign_messages_are_not_applied() {
        let (mut a, _) = controller(
            vec!['A'],
            ScriptedSource::new().with_load(Step::Items(vec!['B'])),
        );
        let (mut b, _) = controller(vec!['Q'], ScriptedSource::new());

        let msg = a
            .request_load_more()
            .expect("idle list fetches")
            .await
            .expect("settlement message");
        assert!(!b.owns(&msg));
        assert!(a.owns(&msg));
        assert_eq!(b.update(msg), None);
        assert_eq!(b.items(), &['Q']);
        assert!(a.is_loading_more());

        assert_eq!(a.update(Box::new("unrelated") as Msg), None);
    }

    #[tokio::test]
    async fn test_duplicate_settlement_is_stale() {
        let (mut c, _) = controller(vec!['A'], ScriptedSource::new());
        c.refresh().await;

        let dup = Box::new(RefreshSettledMsg {
            id: c.id(),
            result: Ok(vec!['Z']),
        }) as Msg;
        assert_eq!(c.update(dup), Some(Settled::Stale));
        assert_eq!(c.items(), &[] as &[char]);
    }

    #[tokio::test]
    async fn test_controller_over_closures() {
        let mut c = Controller::new(
            vec![1, 2],
            from_fns(
                || async { Ok::<_, SourceError>(vec![3]) },
                || async { Ok::<_, SourceError>(vec![0]) },
            ),
        );
        c.load_more().await;
        assert_eq!(c.items(), &[1, 2, 3]);
        c.refresh().await;
        assert_eq!(c.items(), &[0]);
    }

    #[tokio::test]
    async fn test_revision_tracks_item_changes() {
        let (mut c, _) = controller(
            vec!['A'],
            ScriptedSource::new()
                .with_load(Step::Items(vec!['B']))
                .with_load(Step::Fail("down"))
                .with_refresh(Step::Items(vec!['C'])),
        );
        assert_eq!(c.revision(), 0);

        c.load_more().await;
        assert_eq!(c.revision(), 1);

        c.load_more().await;
        assert_eq!(c.revision(), 1, "a failed fetch leaves the items untouched");

        c.refresh().await;
        assert_eq!(c.revision(), 2);

        c.notify_data_source_changed(vec!['D']);
        assert_eq!(c.revision(), 3);
    }

    #[test]
    fn test_ids_are_unique() {
        let (a, _) = controller(vec![], ScriptedSource::new());
        let (b, _) = controller(vec![], ScriptedSource::new());
        assert_ne!(a.id(), b.id());
    }
}
