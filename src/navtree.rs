//! Navigation tree endpoint: catalog query plus recursive flattening.

use crate::cms::SiteContext;
use crate::error::SiteError;
use crate::query::validated_tree_params;
use crate::types::{Brain, NavTreeNode, SortOn, TreeQuery};

/// Full tree pipeline for a raw request query string.
pub async fn tree_for_request(
    site: &SiteContext,
    raw_query: &str,
) -> Result<NavTreeNode, SiteError> {
    let (base, lang) = validated_tree_params(raw_query, site.root.as_ref())?;
    query_items(site, &format!("{lang}/{base}")).await
}

/// Return a navtree of catalog-queried items in their natural order.
///
/// `path` is relative to the navigation root. The catalog query sorts by
/// explicit position in parent; the nested brains it returns are flattened
/// to title/name/children records. A root brain without an id means the
/// path resolved to nothing.
pub async fn query_items(site: &SiteContext, path: &str) -> Result<NavTreeNode, SiteError> {
    let query = TreeQuery {
        path: join_physical_path(&site.root.physical_path(), path),
        sort_on: SortOn::PositionInParent,
        show_all_parents: false,
    };
    let tree = site.catalog.folder_tree(&query).await?;
    if tree.id.is_none() {
        return Err(SiteError::NotFound(path.to_string()));
    }
    Ok(flatten(tree))
}

fn join_physical_path(root_path: &str, path: &str) -> String {
    let root = root_path.trim_end_matches('/');
    let rel = path.trim_matches('/');
    if rel.is_empty() {
        root.to_string()
    } else {
        format!("{root}/{rel}")
    }
}

fn flatten(brain: Brain) -> NavTreeNode {
    NavTreeNode {
        title: brain.title,
        name: brain.id.unwrap_or_default(),
        children: brain.children.into_iter().map(flatten).collect(),
    }
}
