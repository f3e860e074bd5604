//! Application state shared across handlers.

use std::sync::Arc;

use crate::advisor::{AdvisorError, AdvisorGate, AdvisorService};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the catalog, and the advisor client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    advisor: Option<AdvisorService>,
    advisor_gate: AdvisorGate,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The advisor client is built once here when an API key is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the advisor client cannot be constructed.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, AdvisorError> {
        let advisor = config
            .advisor
            .as_ref()
            .map(AdvisorService::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                advisor,
                advisor_gate: AdvisorGate::new(),
            }),
        })
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

    /// The advisor service, if an API key is configured.
    #[must_use]
    pub fn advisor(&self) -> Option<&AdvisorService> {
        self.inner.advisor.as_ref()
    }

    /// In-flight tracking for advisor requests.
    #[must_use]
    pub fn advisor_gate(&self) -> &AdvisorGate {
        &self.inner.advisor_gate
    }
}
