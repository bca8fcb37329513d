use std::sync::Arc;

use foodgram_core::RecipeCatalog;
use foodgram_shortlink::ShortLinks;

#[derive(Clone)]
pub struct AppState {
    links: Arc<dyn ShortLinks>,
    catalog: Arc<dyn RecipeCatalog>,
    base_url: String,
}

impl AppState {
    pub fn new(
        links: Arc<dyn ShortLinks>,
        catalog: Arc<dyn RecipeCatalog>,
        public_base_url: impl Into<String>,
    ) -> Self {
        let base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            links,
            catalog,
            base_url,
        }
    }

    pub fn links(&self) -> &dyn ShortLinks {
        self.links.as_ref()
    }

    pub fn catalog(&self) -> &dyn RecipeCatalog {
        self.catalog.as_ref()
    }

    /// Public base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
