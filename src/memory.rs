//! In-memory site backend. Stands in for the host CMS behind the collaborator
//! seams: the binary serves a serde-loaded content definition with it, and the
//! integration tests drive the full pipeline through it.

use crate::cms::{Catalog, ContentRoot, SiteContext, TileRenderer, ViewRenderer};
use crate::error::{RenderError, SiteError};
use crate::types::{
    Brain, ContentItem, ItemKind, PortalUrls, RenderOptions, TreeQuery,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Declarative site definition the backend serves.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSpec {
    #[serde(default = "default_root_path")]
    pub root_path: String,
    pub portal_url: String,
    pub navigation_root_url: String,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    /// Rendered markup for `author/<name>` view aliases, keyed by full path.
    #[serde(default)]
    pub author_views: HashMap<String, String>,
    /// Rendered markup per tile URL.
    #[serde(default)]
    pub tiles: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub title: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Present on link-type nodes; such nodes are never rendered.
    #[serde(default)]
    pub remote_url: Option<String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub default_page: Option<String>,
    /// Traversal to this node and below is denied.
    #[serde(default)]
    pub restricted: bool,
    /// Rendered page markup per view name.
    #[serde(default)]
    pub views: HashMap<String, String>,
    #[serde(default)]
    pub children: Vec<NodeSpec>,
}

fn default_root_path() -> String {
    "/site".to_string()
}

fn default_content_type() -> String {
    "Document".to_string()
}

pub struct MemorySite {
    spec: SiteSpec,
}

impl MemorySite {
    pub fn new(spec: SiteSpec) -> Self {
        Self { spec }
    }

    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let spec: SiteSpec =
            serde_json::from_str(json).map_err(|e| SiteError::BadParam(e.to_string()))?;
        Ok(Self::new(spec))
    }

    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SiteError::NotFound(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Bundle one shared instance into a collaborator context.
    pub fn into_context(self) -> SiteContext {
        let site = Arc::new(self);
        SiteContext {
            root: site.clone(),
            catalog: site.clone(),
            views: site.clone(),
            tiles: site,
        }
    }

    /// Walk the node tree along `path`, rejecting restricted nodes.
    fn node_at(&self, path: &str) -> Result<&NodeSpec, SiteError> {
        let mut nodes = &self.spec.nodes;
        let mut found: Option<&NodeSpec> = None;
        for segment in path.trim_matches('/').split('/') {
            let node = nodes
                .iter()
                .find(|node| node.id == segment)
                .ok_or_else(|| SiteError::NotFound(path.to_string()))?;
            if node.restricted {
                return Err(SiteError::Unauthorized(path.to_string()));
            }
            nodes = &node.children;
            found = Some(node);
        }
        found.ok_or_else(|| SiteError::NotFound(path.to_string()))
    }

    fn item_for(&self, node: &NodeSpec, path: &str) -> ContentItem {
        let kind = match &node.remote_url {
            Some(remote_url) => ItemKind::Link {
                remote_url: remote_url.clone(),
            },
            None => ItemKind::Page,
        };
        ContentItem {
            id: node.id.clone(),
            title: node.title.clone(),
            path: path.to_string(),
            absolute_url: format!("{}/{path}", self.spec.navigation_root_url),
            kind,
            layout: node.layout.clone(),
            default_layout: "view".to_string(),
        }
    }

    fn brain_for(&self, node: &NodeSpec, position: i32) -> Brain {
        Brain {
            id: Some(node.id.clone()),
            title: node.title.clone(),
            content_type: node.content_type.clone(),
            review_state: "published".to_string(),
            position,
            children: node
                .children
                .iter()
                .filter(|child| !child.restricted)
                .enumerate()
                .map(|(index, child)| self.brain_for(child, index as i32))
                .collect(),
        }
    }
}

#[async_trait]
impl ContentRoot for MemorySite {
    fn physical_path(&self) -> String {
        self.spec.root_path.clone()
    }

    fn portal_urls(&self) -> PortalUrls {
        PortalUrls {
            navigation_root_url: self.spec.navigation_root_url.clone(),
            portal_url: self.spec.portal_url.clone(),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.spec.nodes.iter().any(|node| node.id == name)
    }

    async fn traverse(&self, path: &str) -> Result<ContentItem, SiteError> {
        let node = self.node_at(path)?;
        Ok(self.item_for(node, path.trim_matches('/')))
    }

    async fn traverse_view(&self, path: &str) -> Result<String, SiteError> {
        self.spec
            .author_views
            .get(path)
            .cloned()
            .ok_or_else(|| SiteError::NotFound(path.to_string()))
    }

    async fn default_page(&self, item: &ContentItem) -> Result<Option<ContentItem>, SiteError> {
        let node = self.node_at(&item.path)?;
        let Some(default_page) = &node.default_page else {
            return Ok(None);
        };
        let sub_path = format!("{}/{default_page}", item.path);
        let sub_node = self.node_at(&sub_path)?;
        Ok(Some(self.item_for(sub_node, &sub_path)))
    }
}

#[async_trait]
impl Catalog for MemorySite {
    async fn folder_tree(&self, query: &TreeQuery) -> Result<Brain, SiteError> {
        let root_path = self.spec.root_path.trim_end_matches('/');
        let rel = query
            .path
            .strip_prefix(root_path)
            .unwrap_or(&query.path)
            .trim_matches('/');
        if rel.is_empty() {
            return Ok(Brain::default());
        }
        match self.node_at(rel) {
            Ok(node) => Ok(self.brain_for(node, 0)),
            // The catalog reports nothing rather than failing the query.
            Err(_) => Ok(Brain::default()),
        }
    }
}

#[async_trait]
impl ViewRenderer for MemorySite {
    async fn render(
        &self,
        item: &ContentItem,
        view_name: &str,
        _options: &RenderOptions,
    ) -> Result<String, RenderError> {
        let node = self
            .node_at(&item.path)
            .map_err(|e| RenderError::Failed(e.to_string()))?;
        node.views
            .get(view_name)
            .cloned()
            .ok_or_else(|| RenderError::ViewNotFound(view_name.to_string()))
    }
}

#[async_trait]
impl TileRenderer for MemorySite {
    async fn render_tile(&self, tile_url: &str) -> Result<String, RenderError> {
        self.spec
            .tiles
            .get(tile_url)
            .cloned()
            .ok_or_else(|| RenderError::Failed(format!("unknown tile: {tile_url}")))
    }
}
