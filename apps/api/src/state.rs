use std::sync::Arc;

use crate::config::Config;
use crate::fonts::FontCache;
use crate::layout::LayoutConfig;
use crate::store::SharedStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    /// Base font for PDF export, read from disk on the first export request.
    pub font_cache: Arc<FontCache>,
    /// Page geometry for the user-list PDF. Defaults to A4.
    pub layout: LayoutConfig,
}

impl AppState {
    pub fn new(config: &Config, store: SharedStore) -> Self {
        AppState {
            store,
            font_cache: Arc::new(FontCache::new(config.font_path.clone())),
            layout: LayoutConfig::default(),
        }
    }
}
