use std::sync::{Arc, PoisonError, RwLock};

use intent_catalog::Catalog;

use crate::config::RouterConfig;
use crate::error::Result;
use crate::result::{Resolution, ToolMatch};
use crate::router::Router;

/// Router handle that supports catalog changes while queries are in flight.
///
/// Readers take a snapshot (`Arc<Router>`) and route against it without
/// holding the lock. A rebuild constructs the replacement router first and
/// then swaps the pointer, so every query sees one consistent index.
#[derive(Debug)]
pub struct SharedRouter {
    current: RwLock<Arc<Router>>,
}

impl SharedRouter {
    pub fn new(router: Router) -> Self {
        Self {
            current: RwLock::new(Arc::new(router)),
        }
    }

    pub fn build(catalog: Catalog, config: RouterConfig) -> Result<Self> {
        Ok(Self::new(Router::with_config(catalog, config)?))
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<Router> {
        // The guarded value is an immutable Arc; a poisoned lock still holds a usable router.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn resolve(&self, query: &str) -> Resolution {
        self.snapshot().resolve(query)
    }

    #[must_use]
    pub fn analyze(&self, query: &str, top_k: usize) -> Vec<ToolMatch> {
        self.snapshot().analyze(query, top_k)
    }

    /// Build a router for `catalog` and swap it in.
    ///
    /// On failure the current router stays in place.
    pub fn rebuild(&self, catalog: Catalog, config: RouterConfig) -> Result<()> {
        let router = match Router::with_config(catalog, config) {
            Ok(router) => router,
            Err(err) => {
                log::warn!("Router rebuild rejected, keeping current catalog: {err}");
                return Err(err);
            }
        };
        self.replace(router);
        Ok(())
    }

    pub fn replace(&self, router: Router) {
        let tools = router.catalog().len();
        let router = Arc::new(router);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = router;
        log::info!("Router swapped in: {tools} tools");
    }
}
