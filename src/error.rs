use thiserror::Error;

/// Failures of the staticpages pipeline. The HTTP layer collapses every
/// variant to a 400 with an empty error body; the variant only matters for
/// logging and tests.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("missing required parameter: {0}")]
    MissingParam(&'static str),
    #[error("malformed parameter value: {0}")]
    BadParam(String),
    #[error("path resolved to nothing: {0}")]
    NotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("failed to parse rendered markup: {0}")]
    Markup(String),
    #[error("render failed: {0}")]
    Render(String),
}

/// Failures of the view/tile rendering seam. `ViewNotFound` is separate so
/// the caller can fall back to the generic `view` layout.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no such view: {0}")]
    ViewNotFound(String),
    #[error("{0}")]
    Failed(String),
}
