//! Application state management.
//!
//! This module defines the shared state passed to all Axum handlers via the
//! `State` extractor. It is cheaply cloneable: every heavy resource sits
//! behind an `Arc`.

use crate::domain::{MetricsPtr, PasteId};
use crate::service::ReferenceService;
use std::sync::Arc;

/// Shared application state passed to all Axum handlers.
///
/// This struct is the dependency injection container for the application.
/// Handlers depend on the [`ReferenceService`] (and through it, on the store
/// traits), never on a concrete backend. It is built once in
/// `create_router()` and never mutated afterwards.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Account, session, paste and bookmark operations.
    service: Arc<ReferenceService>,

    /// Either Prometheus-backed or no-op, selected at startup.
    metrics: MetricsPtr,

    /// Base URL used to build public paste links, without trailing slash.
    public_url: Arc<str>,
}

impl AppState {
    // ---

    pub fn new(service: Arc<ReferenceService>, metrics: MetricsPtr, public_url: &str) -> Self {
        // ---
        AppState {
            service,
            metrics,
            public_url: Arc::from(public_url.trim_end_matches('/')),
        }
    }

    /// Get a reference to the reference service.
    pub(crate) fn service(&self) -> &ReferenceService {
        // ---
        &self.service
    }

    /// Get a reference to the metrics implementation.
    pub(crate) fn metrics(&self) -> &MetricsPtr {
        // ---
        &self.metrics
    }

    /// Base URL the service is reachable at.
    pub(crate) fn public_url(&self) -> &str {
        // ---
        &self.public_url
    }

    /// Public retrieval URL for a paste.
    pub(crate) fn paste_url(&self, id: &PasteId) -> String {
        // ---
        format!("{}/{}", self.public_url, id)
    }
}
