//! API server state

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::media::MediaStore;
use crate::query::CatalogEngine;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Filter & rank engine over the catalog store
    pub engine: Arc<CatalogEngine>,

    /// Catalog store handle, used directly by plain reads and admin CRUD
    pub store: Arc<dyn CatalogStore>,

    /// Object store backing the image proxy
    pub media: Arc<dyn MediaStore>,

    /// Shared secret for the admin surface; None disables it
    pub admin_key: Option<String>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        media: Arc<dyn MediaStore>,
        admin_key: Option<String>,
    ) -> Self {
        Self {
            engine: Arc::new(CatalogEngine::new(store.clone())),
            store,
            media,
            admin_key,
        }
    }
}
