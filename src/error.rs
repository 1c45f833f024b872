//! Error types for the scrollable list.
//!
//! Errors only ever come from the caller-supplied producers. A producer
//! reports a [`SourceError`]; the controller wraps it in a [`ListError`]
//! naming which fetch failed, logs it, and carries on. Neither type is ever
//! handed back to the renderer.

use std::any::Any;
use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error type accepted from producers.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure reported by a [`DataSource`](crate::source::DataSource) producer.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The producer returned an error.
    #[error("{0}")]
    Failed(#[source] BoxError),

    /// The producer panicked before settling.
    #[error("producer panicked: {0}")]
    Panicked(String),
}

impl SourceError {
    /// Wraps any error value as a producer failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_scrollable_list::SourceError;
    ///
    /// let err = SourceError::new(std::io::Error::other("offline"));
    /// assert_eq!(err.to_string(), "offline");
    /// ```
    pub fn new<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        SourceError::Failed(err.into())
    }

    /// Builds a failure from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        SourceError::Failed(message.into().into())
    }

    /// Converts a caught panic payload into a `Panicked` error.
    pub(crate) fn from_panic(payload: &Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        SourceError::Panicked(message)
    }

    /// Returns true when the producer panicked rather than returning an error.
    pub fn is_panic(&self) -> bool {
        matches!(self, SourceError::Panicked(_))
    }
}

impl From<BoxError> for SourceError {
    fn from(err: BoxError) -> Self {
        SourceError::Failed(err)
    }
}

impl From<String> for SourceError {
    fn from(message: String) -> Self {
        SourceError::msg(message)
    }
}

impl From<&str> for SourceError {
    fn from(message: &str) -> Self {
        SourceError::msg(message)
    }
}

/// A failed fetch, as recorded by the controller.
#[derive(Debug, Error)]
pub enum ListError {
    /// The `refresh` producer failed; items were left unchanged.
    #[error("refresh failed: {source}")]
    RefreshFailure {
        /// Underlying producer error.
        #[source]
        source: SourceError,
    },

    /// The `load_more` producer failed; items and `has_more` were left unchanged.
    #[error("load more failed: {source}")]
    LoadMoreFailure {
        /// Underlying producer error.
        #[source]
        source: SourceError,
    },
}

impl ListError {
    /// The producer error behind this failure.
    pub fn source_error(&self) -> &SourceError {
        match self {
            ListError::RefreshFailure { source } | ListError::LoadMoreFailure { source } => source,
        }
    }
}
