//! Tile expansion: placeholder elements carrying a `data-tile` attribute are
//! replaced in place by the markup the tile renderer produces for them.

use crate::cms::TileRenderer;
use crate::error::SiteError;

pub const TILE_ATTRIBUTE: &str = "data-tile";

/// Expand every tile placeholder in `html`. A tile that fails to render is
/// logged and dropped from the page rather than failing the whole request.
pub async fn expand_tiles(html: &str, tiles: &dyn TileRenderer) -> Result<String, SiteError> {
    let placeholders = collect_placeholders(html)?;
    if placeholders.is_empty() {
        return Ok(html.to_string());
    }

    let mut expanded = html.to_string();
    for placeholder in placeholders {
        let markup = match tiles.render_tile(&placeholder.tile_url).await {
            Ok(markup) => markup,
            Err(err) => {
                tracing::warn!("dropping tile {}: {err}", placeholder.tile_url);
                String::new()
            }
        };
        replace_first(&mut expanded, &placeholder.span, &markup);
    }
    Ok(expanded)
}

struct Placeholder {
    /// Source span of the placeholder element, opening tag through closing tag.
    span: String,
    tile_url: String,
}

// The DOM handle borrows the input, so placeholders are collected up front
// and the async tile renders run without it.
fn collect_placeholders(html: &str) -> Result<Vec<Placeholder>, SiteError> {
    let dom = tl::parse(html, tl::ParserOptions::default())
        .map_err(|e| SiteError::Markup(e.to_string()))?;

    let mut placeholders = Vec::new();
    for node in dom.nodes().iter() {
        let Some(tag) = node.as_tag() else {
            continue;
        };
        let Some(tile_url) = tag.attributes().get(TILE_ATTRIBUTE).flatten() else {
            continue;
        };
        placeholders.push(Placeholder {
            span: tag.raw().as_utf8_str().to_string(),
            tile_url: tile_url.as_utf8_str().to_string(),
        });
    }
    Ok(placeholders)
}

fn replace_first(haystack: &mut String, needle: &str, replacement: &str) {
    if let Some(start) = haystack.find(needle) {
        haystack.replace_range(start..start + needle.len(), replacement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapTiles {
        tiles: HashMap<String, String>,
    }

    #[async_trait]
    impl TileRenderer for MapTiles {
        async fn render_tile(&self, tile_url: &str) -> Result<String, RenderError> {
            self.tiles
                .get(tile_url)
                .cloned()
                .ok_or_else(|| RenderError::Failed(format!("unknown tile: {tile_url}")))
        }
    }

    fn tiles() -> MapTiles {
        MapTiles {
            tiles: HashMap::from([(
                "./@@news.listing/recent".to_string(),
                "<ul class=\"news\"><li>Launch</li></ul>".to_string(),
            )]),
        }
    }

    #[tokio::test]
    async fn expands_placeholders_in_place() {
        let html = "<div id=\"content\"><div data-tile=\"./@@news.listing/recent\">pending</div><p>after</p></div>";
        let expanded = expand_tiles(html, &tiles()).await.unwrap();
        assert_eq!(
            expanded,
            "<div id=\"content\"><ul class=\"news\"><li>Launch</li></ul><p>after</p></div>"
        );
    }

    #[tokio::test]
    async fn unknown_tiles_are_dropped() {
        let html = "<p>before</p><span data-tile=\"./@@missing\">x</span>";
        let expanded = expand_tiles(html, &tiles()).await.unwrap();
        assert_eq!(expanded, "<p>before</p>");
    }

    #[tokio::test]
    async fn markup_without_tiles_is_untouched() {
        let html = "<p>plain</p>";
        assert_eq!(expand_tiles(html, &tiles()).await.unwrap(), html);
    }
}
