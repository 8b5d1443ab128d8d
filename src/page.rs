//! Single-item endpoint: resolve the target, render its default page, and
//! strip the fragments the application shell needs.

use crate::cms::SiteContext;
use crate::error::{RenderError, SiteError};
use crate::extract::extract_fragments;
use crate::query::validated_single_params;
use crate::tiles::expand_tiles;
use crate::types::{ContentItem, ItemKind, PageFragments, PortalUrls, RenderOptions};

/// Path prefix traversed as a view alias instead of a content item.
const AUTHOR_PREFIX: &str = "author/";

/// Placeholder tokens a link item's stored URL may carry.
const NAVIGATION_ROOT_TOKEN: &str = "${navigation_root_url}";
const PORTAL_TOKEN: &str = "${portal_url}";

/// Generic layout every item can fall back to.
const FALLBACK_VIEW: &str = "view";

/// Full single-item pipeline for a raw request query string.
pub async fn single_for_request(
    site: &SiteContext,
    raw_query: &str,
) -> Result<PageFragments, SiteError> {
    let (path, lang) = validated_single_params(raw_query, site.root.as_ref())?;

    let mut html = String::new();
    let mut redirect_url = String::new();

    if path.starts_with(AUTHOR_PREFIX) {
        html = site.root.traverse_view(&path).await?;
    } else {
        let item = site.root.traverse(&format!("{lang}/{path}")).await?;
        match &item.kind {
            ItemKind::Link { remote_url } => {
                redirect_url = resolve_redirect(remote_url, &site.root.portal_urls());
            }
            ItemKind::Page => {
                html = render_default_page(site, item).await?;
            }
        }
    }

    let mut fragments = extract_fragments(&html)?;
    fragments.lang = lang;
    fragments.private = false;
    fragments.redirect_url = redirect_url;
    Ok(fragments)
}

/// Substitute the known placeholder tokens in a link item's stored URL.
pub fn resolve_redirect(remote_url: &str, urls: &PortalUrls) -> String {
    if remote_url.contains(NAVIGATION_ROOT_TOKEN) {
        remote_url.replace(NAVIGATION_ROOT_TOKEN, &urls.navigation_root_url)
    } else if remote_url.contains(PORTAL_TOKEN) {
        remote_url.replace(PORTAL_TOKEN, &urls.portal_url)
    } else {
        remote_url.to_string()
    }
}

/// Render an item's default page: hop to the configured default sub-page if
/// any, render its layout (falling back to the generic view when the layout
/// is unknown), then expand tile placeholders in the result.
async fn render_default_page(site: &SiteContext, item: ContentItem) -> Result<String, SiteError> {
    let item = match site.root.default_page(&item).await? {
        Some(sub_item) => sub_item,
        None => item,
    };

    let view_name = item.view_name().to_string();
    let markup = match render_view(site, &item, &view_name).await {
        Ok(markup) => markup,
        Err(RenderError::ViewNotFound(_)) => render_view(site, &item, FALLBACK_VIEW)
            .await
            .map_err(|e| SiteError::Render(e.to_string()))?,
        Err(err) => return Err(SiteError::Render(err.to_string())),
    };

    expand_tiles(&markup, site.tiles.as_ref()).await
}

async fn render_view(
    site: &SiteContext,
    item: &ContentItem,
    view_name: &str,
) -> Result<String, RenderError> {
    let options = RenderOptions {
        url: format!("{}/{view_name}", item.absolute_url),
        tiles_enabled: true,
    };
    site.views.render(item, view_name, &options).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> PortalUrls {
        PortalUrls {
            navigation_root_url: "https://example.org/de".to_string(),
            portal_url: "https://example.org".to_string(),
        }
    }

    #[test]
    fn substitutes_navigation_root_token() {
        let resolved = resolve_redirect("${navigation_root_url}/instance", &urls());
        assert_eq!(resolved, "https://example.org/de/instance");
    }

    #[test]
    fn substitutes_portal_token_only_without_root_token() {
        let resolved = resolve_redirect("${portal_url}/login", &urls());
        assert_eq!(resolved, "https://example.org/login");
    }

    #[test]
    fn plain_urls_pass_through() {
        let resolved = resolve_redirect("https://other.example/", &urls());
        assert_eq!(resolved, "https://other.example/");
    }
}
