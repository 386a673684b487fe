use std::sync::Arc;

use quill_db::ArticleStore;
use quill_writer::ArticleWriter;

use crate::render::PageRenderer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Every collaborator is injected behind a trait object so tests can swap
/// in the in-memory store and a stub writer.
#[derive(Clone)]
pub struct AppState {
    /// Article persistence.
    pub store: Arc<dyn ArticleStore>,
    /// Article text generation.
    pub writer: Arc<dyn ArticleWriter>,
    /// HTML page rendering.
    pub renderer: Arc<dyn PageRenderer>,
}
