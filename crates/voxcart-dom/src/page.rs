/// Opaque handle to a live element.
///
/// Handles stay valid for the page's lifetime but the element behind one may
/// be detached; interactions on a detached node are no-ops that return false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Bottom,
}

/// Narrow interface over the host page.
///
/// Selector strings use the simple grammar from [`crate::selector`]: a tag
/// name, `#id`, `.class`, `[attr]` / `[attr=value]`, compounds thereof, and
/// comma-separated lists. Queries return elements in document order.
///
/// Interaction methods return `true` when the target was attached and the
/// interaction was applied. Page-level methods (`navigate`, scrolling) are
/// fire-and-forget.
pub trait DomPage: Send + Sync {
    fn query(&self, selector: &str) -> Option<NodeId>;
    fn query_all(&self, selector: &str) -> Vec<NodeId>;

    fn text(&self, node: NodeId) -> Option<String>;
    fn attr(&self, node: NodeId, name: &str) -> Option<String>;
    fn is_attached(&self, node: NodeId) -> bool;

    fn click(&self, node: NodeId) -> bool;
    fn focus(&self, node: NodeId) -> bool;
    fn set_value(&self, node: NodeId, value: &str) -> bool;
    /// Sets the checked state and fires a change notification.
    fn set_checked(&self, node: NodeId, checked: bool) -> bool;
    /// Focuses a `<select>` and synthesizes a pointer-down so the host opens
    /// its option list.
    fn open_options(&self, node: NodeId) -> bool;
    /// Submits the form enclosing `node`, if any.
    fn submit_enclosing_form(&self, node: NodeId) -> bool;
    fn play_media(&self, node: NodeId) -> bool;
    fn pause_media(&self, node: NodeId) -> bool;

    fn navigate(&self, path: &str);
    fn history_back(&self);
    fn reload(&self);
    fn scroll_by(&self, delta_y: i32);
    fn scroll_to(&self, target: ScrollTarget);
}
