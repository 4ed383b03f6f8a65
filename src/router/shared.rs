use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

use super::core::Router;

/// Lock-free handle to the current [`Router`]
///
/// Readers take a snapshot with [`SharedRouter::load`] and keep using it for
/// the rest of their request even if a new router is published meanwhile.
/// A router is only ever published once it is completely built, so readers
/// never observe a partially constructed routing table.
#[derive(Debug, Clone)]
pub struct SharedRouter {
    inner: Arc<ArcSwap<Router>>,
}

impl SharedRouter {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(router)),
        }
    }

    /// Current router snapshot
    #[must_use]
    pub fn load(&self) -> Arc<Router> {
        self.inner.load_full()
    }

    /// Publish a new router, returning the one it replaced
    pub fn replace(&self, router: Router) -> Arc<Router> {
        let routes = router.len();
        let previous = self.inner.swap(Arc::new(router));
        info!(routes, previous_routes = previous.len(), "Router replaced");
        previous
    }
}

impl From<Router> for SharedRouter {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}
