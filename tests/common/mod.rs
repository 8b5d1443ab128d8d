#![allow(dead_code)]
use staticpages::cms::SiteContext;
use staticpages::http::AppState;
use staticpages::memory::MemorySite;
use std::path::Path;
use std::sync::Arc;

pub fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_fixture(filename: &str) -> String {
    let path = Path::new(&fixtures_dir()).join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Content definition the integration tests serve: two language folders,
/// documents, a link, a restricted node, an author view and one tile.
pub fn demo_site_json() -> String {
    let document_page = load_fixture("page_document.html");
    let tiles_page = load_fixture("page_with_tiles.html");
    let author_page = concat!(
        "<body class=\"template-author\"><div id=\"content\">",
        "<h1 class=\"documentFirstHeading\">Jane Doe</h1>",
        "<p>Author profile.</p></div></body>"
    );

    serde_json::json!({
        "root_path": "/site",
        "portal_url": "https://example.org",
        "navigation_root_url": "https://example.org/site",
        "nodes": [
            {
                "id": "de",
                "title": "Deutsch",
                "content_type": "Folder",
                "children": [
                    {
                        "id": "info",
                        "title": "Information",
                        "content_type": "Folder",
                        "default_page": "mitmachen",
                        "children": [
                            {
                                "id": "mitmachen",
                                "title": "Mitmachen",
                                "layout": "document_view",
                                "views": { "document_view": document_page }
                            },
                            {
                                "id": "regeln",
                                "title": "Regeln",
                                "layout": "rules_listing",
                                "views": { "view": document_page }
                            },
                            {
                                "id": "extern",
                                "title": "Partnerseite",
                                "content_type": "Link",
                                "remote_url": "${portal_url}/login"
                            },
                            {
                                "id": "intern",
                                "title": "Interner Bereich",
                                "restricted": true
                            }
                        ]
                    },
                    {
                        "id": "news",
                        "title": "Aktuelles",
                        "layout": "document_view",
                        "views": { "document_view": tiles_page }
                    }
                ]
            },
            {
                "id": "en",
                "title": "English",
                "content_type": "Folder",
                "children": []
            }
        ],
        "author_views": { "author/jane": author_page },
        "tiles": {
            "./@@news.listing/recent": "<ul class=\"news\"><li>Launch announced</li></ul>"
        }
    })
    .to_string()
}

pub fn demo_site() -> SiteContext {
    MemorySite::from_json(&demo_site_json())
        .expect("demo site definition should deserialize")
        .into_context()
}

pub fn demo_state() -> Arc<AppState> {
    Arc::new(AppState { site: demo_site() })
}
