//! Rendering contract between the list and its items.

/// Renders items and supplies their identity.
///
/// The list never inspects items itself. Every line it draws for an item
/// comes from [`render`](ItemDelegate::render), and every identity comparison
/// (keeping the selection on the same item across a refresh) goes through
/// [`key`](ItemDelegate::key).
///
/// # Examples
///
/// ```rust
/// use bubbletea_scrollable_list::list::ItemDelegate;
///
/// struct Task {
///     id: u32,
///     name: String,
/// }
///
/// struct TaskDelegate;
///
/// impl ItemDelegate<Task> for TaskDelegate {
///     fn render(&self, item: &Task, _index: usize, selected: bool, _width: usize) -> String {
///         let marker = if selected { ">" } else { " " };
///         format!("{} #{} {}", marker, item.id, item.name)
///     }
///
///     fn key(&self, item: &Task, _index: usize) -> String {
///         item.id.to_string()
///     }
/// }
/// ```
pub trait ItemDelegate<T> {
    /// Renders one item.
    ///
    /// `index` is the item's position in the full list, `selected` is true
    /// for the item under the cursor and `width` is the available width in
    /// cells. The output should span exactly [`height`](ItemDelegate::height)
    /// lines; extra lines are dropped and missing ones padded.
    fn render(&self, item: &T, index: usize, selected: bool, width: usize) -> String;

    /// Stable identity of an item.
    ///
    /// Keys are expected to be unique within the list; duplicates are the
    /// caller's responsibility.
    fn key(&self, item: &T, index: usize) -> String;

    /// Lines each rendered item occupies.
    fn height(&self) -> usize {
        1
    }
}
