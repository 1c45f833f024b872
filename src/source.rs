//! Caller-supplied data producers.
//!
//! The list never knows where its items come from. It is handed a
//! [`DataSource`] at construction and calls exactly two producers on it:
//! `load_more` for the next page and `refresh` for a full replacement. An
//! empty `load_more` result is the "no more data" signal.
//!
//! Implement the trait directly for a stateful source, or wrap two closures
//! with [`from_fns`].

use std::future::Future;

use async_trait::async_trait;

use crate::error::SourceError;

/// The pair of asynchronous producers driving a list.
///
/// Both producers may be slow; the controller never times them out and never
/// runs them concurrently with each other.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use bubbletea_scrollable_list::{DataSource, SourceError};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct Numbers {
///     page: AtomicUsize,
/// }
///
/// #[async_trait]
/// impl DataSource<u32> for Numbers {
///     async fn load_more(&self) -> Result<Vec<u32>, SourceError> {
///         let page = self.page.fetch_add(1, Ordering::SeqCst) as u32;
///         if page >= 3 {
///             return Ok(Vec::new());
///         }
///         Ok((page * 10..page * 10 + 10).collect())
///     }
///
///     async fn refresh(&self) -> Result<Vec<u32>, SourceError> {
///         self.page.store(1, Ordering::SeqCst);
///         Ok((0..10).collect())
///     }
/// }
/// ```
#[async_trait]
pub trait DataSource<T: Send + 'static>: Send + Sync {
    /// Fetches the next page. Returning an empty vector marks the list as exhausted.
    async fn load_more(&self) -> Result<Vec<T>, SourceError>;

    /// Fetches a fresh first page that fully replaces the current items.
    async fn refresh(&self) -> Result<Vec<T>, SourceError>;
}

/// A [`DataSource`] built from two closures.
///
/// Created by [`from_fns`].
pub struct FnSource<L, R> {
    load_more: L,
    refresh: R,
}

impl<L, R> std::fmt::Debug for FnSource<L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource").finish_non_exhaustive()
    }
}

/// Builds a [`DataSource`] from a `load_more` closure and a `refresh` closure.
///
/// Each closure is called once per fetch and must return a future yielding
/// the fetched items.
///
/// # Examples
///
/// ```rust
/// use bubbletea_scrollable_list::{from_fns, SourceError};
///
/// let source = from_fns(
///     || async { Ok::<_, SourceError>(Vec::<String>::new()) },
///     || async { Ok::<_, SourceError>(vec!["Item 1".to_string(), "Item 2".to_string()]) },
/// );
/// # let _ = source;
/// ```
pub fn from_fns<T, L, LF, R, RF>(load_more: L, refresh: R) -> FnSource<L, R>
where
    T: Send + 'static,
    L: Fn() -> LF + Send + Sync,
    LF: Future<Output = Result<Vec<T>, SourceError>> + Send + 'static,
    R: Fn() -> RF + Send + Sync,
    RF: Future<Output = Result<Vec<T>, SourceError>> + Send + 'static,
{
    FnSource { load_more, refresh }
}

#[async_trait]
impl<T, L, LF, R, RF> DataSource<T> for FnSource<L, R>
where
    T: Send + 'static,
    L: Fn() -> LF + Send + Sync,
    LF: Future<Output = Result<Vec<T>, SourceError>> + Send + 'static,
    R: Fn() -> RF + Send + Sync,
    RF: Future<Output = Result<Vec<T>, SourceError>> + Send + 'static,
{
    async fn load_more(&self) -> Result<Vec<T>, SourceError> {
        (self.load_more)().await
    }

    async fn refresh(&self) -> Result<Vec<T>, SourceError> {
        (self.refresh)().await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted producers for controller and list tests.

    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// One scripted producer response.
    pub enum Step<T> {
        Items(Vec<T>),
        Fail(&'static str),
        Panic(&'static str),
    }

    /// A source that replays scripted responses and counts its calls.
    ///
    /// When a script runs dry, `load_more` yields an empty page and `refresh`
    /// yields an empty list.
    pub struct ScriptedSource<T> {
        loads: Mutex<VecDeque<Step<T>>>,
        refreshes: Mutex<VecDeque<Step<T>>>,
        pub load_calls: AtomicUsize,
        pub refresh_calls: AtomicUsize,
    }

    impl<T> ScriptedSource<T> {
        pub fn new() -> Self {
            Self {
                loads: Mutex::new(VecDeque::new()),
                refreshes: Mutex::new(VecDeque::new()),
                load_calls: AtomicUsize::new(0),
                refresh_calls: AtomicUsize::new(0),
            }
        }

        pub fn with_load(self, step: Step<T>) -> Self {
            self.loads.lock().unwrap().push_back(step);
            self
        }

        pub fn with_refresh(self, step: Step<T>) -> Self {
            self.refreshes.lock().unwrap().push_back(step);
            self
        }

        pub fn loads(&self) -> usize {
            self.load_calls.load(Ordering::SeqCst)
        }

        pub fn refreshes(&self) -> usize {
            self.refresh_calls.load(Ordering::SeqCst)
        }

        fn play(step: Option<Step<T>>) -> Result<Vec<T>, SourceError> {
            match step {
                Some(Step::Items(items)) => Ok(items),
                Some(Step::Fail(message)) => Err(SourceError::msg(message)),
                Some(Step::Panic(message)) => panic!("{}", message),
                None => Ok(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl<T: Send + 'static> DataSource<T> for ScriptedSource<T> {
        async fn load_more(&self) -> Result<Vec<T>, SourceError> {
            self.load_calls.fetch_add(1, Ordering::SeqCst);
            let step = self.loads.lock().unwrap().pop_front();
            Self::play(step)
        }

        async fn refresh(&self) -> Result<Vec<T>, SourceError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            let step = self.refreshes.lock().unwrap().pop_front();
            Self::play(step)
        }
    }
}
