//! Visibility detection for the list's trailing sentinel.
//!
//! The sentinel is an invisible marker placed after the last item. Whenever
//! enough of it is inside the viewport the list is "near the end" and should
//! ask for the next page. [`BottomSentinel`] turns a visible fraction into a
//! boolean at a configurable threshold and remembers the previous reading so
//! callers can tell an enter-view edge from a sentinel that simply stayed
//! visible.

use tracing::trace;

/// Default fraction of the sentinel that must be visible to count as in view.
pub const DEFAULT_THRESHOLD: f32 = 0.1;

/// Result of feeding a new visible fraction to a [`BottomSentinel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// The sentinel just came into view.
    Entered,
    /// The sentinel was already in view and still is.
    Visible,
    /// The sentinel just left the view.
    Left,
    /// The sentinel was out of view and still is.
    Hidden,
}

impl Visibility {
    /// True for `Entered` and `Visible`.
    pub fn in_view(self) -> bool {
        matches!(self, Visibility::Entered | Visibility::Visible)
    }
}

/// Threshold-based visibility detector for the bottom sentinel.
///
/// # Examples
///
/// ```rust
/// use bubbletea_scrollable_list::sentinel::{BottomSentinel, Visibility};
///
/// let mut sentinel = BottomSentinel::new();
/// assert_eq!(sentinel.observe(0.0), Visibility::Hidden);
/// assert_eq!(sentinel.observe(0.5), Visibility::Entered);
/// assert_eq!(sentinel.observe(1.0), Visibility::Visible);
/// assert_eq!(sentinel.observe(0.0), Visibility::Left);
/// assert_eq!(sentinel.observe(0.2), Visibility::Entered);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BottomSentinel {
    threshold: f32,
    in_view: bool,
}

impl Default for BottomSentinel {
    fn default() -> Self {
        Self::new()
    }
}

impl BottomSentinel {
    /// Creates a detector with the default 10% threshold.
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            in_view: false,
        }
    }

    /// Sets the visible fraction needed to count as in view.
    ///
    /// Values are clamped to `(0, 1]`; a non-finite value falls back to the
    /// default.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = if threshold.is_finite() {
            threshold.clamp(f32::EPSILON, 1.0)
        } else {
            DEFAULT_THRESHOLD
        };
        self
    }

    /// The configured threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Whether the last observation was in view.
    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Records a new visible fraction and reports how visibility changed.
    pub fn observe(&mut self, visible_fraction: f32) -> Visibility {
        let now = visible_fraction >= self.threshold;
        let visibility = match (self.in_view, now) {
            (false, true) => Visibility::Entered,
            (true, true) => Visibility::Visible,
            (true, false) => Visibility::Left,
            (false, false) => Visibility::Hidden,
        };
        if visibility == Visibility::Entered || visibility == Visibility::Left {
            trace!(fraction = visible_fraction, ?visibility, "sentinel visibility changed");
        }
        self.in_view = now;
        visibility
    }

    /// Forgets the previous reading so the next in-view observation is an
    /// `Entered` edge again.
    pub fn reset(&mut self) {
        self.in_view = false;
    }
}

/// Fraction of the span `[start, start + len)` inside the view
/// `[view_start, view_start + view_len)`.
///
/// Returns 0.0 for an empty span.
///
/// # Examples
///
/// ```rust
/// use bubbletea_scrollable_list::sentinel::visible_fraction;
///
/// assert_eq!(visible_fraction(10, 1, 0, 10), 0.0);
/// assert_eq!(visible_fraction(9, 1, 0, 10), 1.0);
/// assert_eq!(visible_fraction(8, 4, 0, 10), 0.5);
/// ```
pub fn visible_fraction(start: usize, len: usize, view_start: usize, view_len: usize) -> f32 {
    if len == 0 {
        return 0.0;
    }
    let end = start.saturating_add(len);
    let view_end = view_start.saturating_add(view_len);
    let overlap = end.min(view_end).saturating_sub(start.max(view_start));
    overlap as f32 / len as f32
}
