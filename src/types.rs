use serde::{Deserialize, Serialize};

/// One node of the serialized navigation tree. Everything else the catalog
/// knows about an item is discarded during flattening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavTreeNode {
    pub title: String,
    pub name: String,
    pub children: Vec<NavTreeNode>,
}

/// JSON body of the single-item endpoint: the fragments stripped out of a
/// rendered page, plus language and redirect information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFragments {
    pub lang: String,
    pub private: bool,
    pub css_classes: Vec<String>,
    pub column_right: String,
    pub nav: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub redirect_url: String,
}

/// Catalog search-result record. The tree query returns these nested; the
/// navtree builder keeps only title, id and children. A root brain without
/// an `id` means the queried path resolved to nothing.
#[derive(Debug, Clone, Default)]
pub struct Brain {
    pub id: Option<String>,
    pub title: String,
    pub content_type: String,
    pub review_state: String,
    pub position: i32,
    pub children: Vec<Brain>,
}

/// A content item as returned by traversal. `path` is relative to the
/// navigation root.
#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub path: String,
    pub absolute_url: String,
    pub kind: ItemKind,
    pub layout: Option<String>,
    pub default_layout: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Page,
    Link { remote_url: String },
}

impl ContentItem {
    /// The view used to render this item: its configured layout when set and
    /// non-empty, its type default otherwise.
    pub fn view_name(&self) -> &str {
        match self.layout.as_deref() {
            Some(layout) if !layout.is_empty() => layout,
            _ => &self.default_layout,
        }
    }
}

/// Catalog query issued by the navigation tree builder.
#[derive(Debug, Clone)]
pub struct TreeQuery {
    pub path: String,
    pub sort_on: SortOn,
    pub show_all_parents: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOn {
    PositionInParent,
}

/// Per-render request context handed to the view renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// URL the rendered view should consider its own, `<item url>/<view>`.
    pub url: String,
    /// Enables fragment/tile expansion in the rendered markup.
    pub tiles_enabled: bool,
}

/// Site-wide URLs used to resolve link placeholders.
#[derive(Debug, Clone, Default)]
pub struct PortalUrls {
    pub navigation_root_url: String,
    pub portal_url: String,
}
