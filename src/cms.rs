//! Seams to the host CMS. Content storage, traversal, templating and access
//! control live behind these traits; this crate only orchestrates them.

use crate::error::{RenderError, SiteError};
use crate::types::{Brain, ContentItem, PortalUrls, RenderOptions, TreeQuery};
use async_trait::async_trait;
use std::sync::Arc;

/// The navigation root this service is mounted on.
#[async_trait]
pub trait ContentRoot: Send + Sync {
    /// Physical path of the navigation root, e.g. `/site`.
    fn physical_path(&self) -> String;

    /// Site-wide URLs used to resolve link placeholders.
    fn portal_urls(&self) -> PortalUrls;

    /// Whether `name` is a direct child of the navigation root. Used to
    /// validate the `lang` request parameter.
    fn contains(&self, name: &str) -> bool;

    /// Traverse to the item at `path` (relative to the root), honoring the
    /// host CMS's access control.
    async fn traverse(&self, path: &str) -> Result<ContentItem, SiteError>;

    /// Traverse to a view alias at `path` (e.g. `author/<id>`) and return
    /// its rendered markup directly.
    async fn traverse_view(&self, path: &str) -> Result<String, SiteError>;

    /// The item's configured default sub-page, resolved, if any.
    async fn default_page(&self, item: &ContentItem) -> Result<Option<ContentItem>, SiteError>;
}

/// Content catalog answering sorted folder-tree queries with nested brains.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn folder_tree(&self, query: &TreeQuery) -> Result<Brain, SiteError>;
}

/// Renders a named view of an item to markup.
#[async_trait]
pub trait ViewRenderer: Send + Sync {
    async fn render(
        &self,
        item: &ContentItem,
        view_name: &str,
        options: &RenderOptions,
    ) -> Result<String, RenderError>;
}

/// Renders a tile placeholder reference to inline markup.
#[async_trait]
pub trait TileRenderer: Send + Sync {
    async fn render_tile(&self, tile_url: &str) -> Result<String, RenderError>;
}

/// Bundle of host-CMS collaborators a request handler works against.
#[derive(Clone)]
pub struct SiteContext {
    pub root: Arc<dyn ContentRoot>,
    pub catalog: Arc<dyn Catalog>,
    pub views: Arc<dyn ViewRenderer>,
    pub tiles: Arc<dyn TileRenderer>,
}
