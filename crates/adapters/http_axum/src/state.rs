//! Shared application state for axum handlers.

use std::sync::Arc;

use dbc_app::metrics::HandlerMetrics;
use dbc_app::ports::PersonRepository;
use dbc_app::services::person_service::PersonService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<PR> {
    /// Person persistence use-cases.
    pub person_service: Arc<PersonService<PR>>,
    /// Counters and timers recorded by the person handlers.
    pub metrics: Arc<HandlerMetrics>,
}

impl<PR> Clone for AppState<PR> {
    fn clone(&self) -> Self {
        Self {
            person_service: Arc::clone(&self.person_service),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<PR> AppState<PR>
where
    PR: PersonRepository + Send + Sync + 'static,
{
    /// Create a new application state with fresh metrics.
    pub fn new(person_service: PersonService<PR>) -> Self {
        Self::from_arcs(Arc::new(person_service), Arc::new(HandlerMetrics::new()))
    }

    /// Create a new application state from pre-wrapped `Arc`s.
    ///
    /// Use this when the service or metrics are also held elsewhere,
    /// e.g. by tests inspecting counters.
    pub fn from_arcs(
        person_service: Arc<PersonService<PR>>,
        metrics: Arc<HandlerMetrics>,
    ) -> Self {
        Self {
            person_service,
            metrics,
        }
    }
}
