//! Application state shared across handlers.

use std::sync::Arc;

use seko_core::Catalog;

use crate::config::StorefrontConfig;
use crate::middleware::CartLocks;
use crate::services::ContactNotifier;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, configuration and the contact notifier. Carts are not part of
/// it: each shopper's cart lives in their session, and only the per-session
/// locks that serialize cart requests are kept here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    notifier: Arc<dyn ContactNotifier>,
    cart_locks: CartLocks,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog served by the API
    /// * `notifier` - Receiver of validated contact messages
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        notifier: Arc<dyn ContactNotifier>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                notifier,
                cart_locks: CartLocks::default(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the contact notifier.
    #[must_use]
    pub fn notifier(&self) -> &dyn ContactNotifier {
        self.inner.notifier.as_ref()
    }

    /// Get the per-session cart request locks.
    #[must_use]
    pub fn cart_locks(&self) -> &CartLocks {
        &self.inner.cart_locks
    }
}
