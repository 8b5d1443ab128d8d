//! HTTP surface: two GET endpoints returning JSON fragments of the CMS
//! content tree, plus a liveness probe.

use crate::cms::SiteContext;
use crate::{navtree, page};
use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Observed Content-Type of the original service, double semicolon included.
pub const JSON_CONTENT_TYPE: &str = "application/json;;charset=\"utf-8\"";

pub struct AppState {
    pub site: SiteContext,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/staticpages", get(staticpages))
        .route("/staticpages/single", get(staticpages_single))
        .route("/health", get(health))
        .with_state(state)
}

/// GET /staticpages?lang=<id>&base=<path>
///
/// Navtree of all children under lang/base, or 400 with an empty error body.
pub async fn staticpages(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Response {
    let raw = query.unwrap_or_default();
    match navtree::tree_for_request(&state.site, &raw).await {
        Ok(tree) => match serde_json::to_string(&tree) {
            Ok(body) => json_response(StatusCode::OK, body),
            Err(err) => {
                tracing::error!("staticpages serialization failed: {err}");
                error_response()
            }
        },
        Err(err) => {
            tracing::debug!("staticpages request rejected: {err}");
            error_response()
        }
    }
}

/// GET /staticpages/single?lang=<id>&path=<path>
///
/// Rendered-page fragments of the item under lang/path, or 400 with an
/// empty error body.
pub async fn staticpages_single(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Response {
    let raw = query.unwrap_or_default();
    match page::single_for_request(&state.site, &raw).await {
        Ok(fragments) => match serde_json::to_string(&fragments) {
            Ok(body) => json_response(StatusCode::OK, body),
            Err(err) => {
                tracing::error!("staticpages/single serialization failed: {err}");
                error_response()
            }
        },
        Err(err) => {
            tracing::debug!("staticpages/single request rejected: {err}");
            error_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

fn json_response(status: StatusCode, body: String) -> Response {
    let mut response = (status, body).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    );
    response
}

fn error_response() -> Response {
    json_response(
        StatusCode::BAD_REQUEST,
        serde_json::json!({ "errors": [] }).to_string(),
    )
}
