//! persons-api library - CSV-backed persons service
//!
//! The HTTP layer translates requests into calls on a shared
//! [`PersonRepository`]; everything else (parsing, merging runtime
//! additions) lives behind that trait.

use axum::Router;
use std::sync::Arc;

pub mod api;
pub mod repo;

pub use repo::{CsvPersonRepository, PersonRepository};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Person repository, used as a long-lived singleton across requests
    pub repo: Arc<dyn PersonRepository>,
}

impl AppState {
    /// Create new application state
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self {
        Self { repo }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;
    use tower_http::trace::TraceLayer;

    Router::new()
        .route("/persons", get(api::list_persons).post(api::add_person))
        .route("/persons/:id", get(api::get_person))
        .route("/persons/color/:color", get(api::persons_by_color))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
