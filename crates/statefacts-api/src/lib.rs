//! JSON REST API for US state reference data and fun facts.
//!
//! Exposes an axum [`Router`] backed by a [`ReferenceDataset`] and any
//! [`statefacts_core::store::FunFactStore`]. Binding, configuration and store
//! setup are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = statefacts_api::api_router(AppState { store, dataset });
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod extract;
pub mod fallback;
pub mod funfacts;
pub mod states;

use std::sync::Arc;

use axum::{Router, routing::get};
use statefacts_core::{dataset::ReferenceDataset, store::FunFactStore};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: FunFactStore> {
  pub store:   Arc<S>,
  /// Loaded once at startup; never re-read per request.
  pub dataset: Arc<ReferenceDataset>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// Unknown paths fall through to a content-negotiated 404.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: FunFactStore + Clone + 'static,
{
  Router::new()
    .route("/states", get(states::list::<S>))
    .route("/states/{code}", get(states::get_one::<S>))
    .route(
      "/states/{code}/funfact",
      get(funfacts::random::<S>)
        .post(funfacts::create::<S>)
        .patch(funfacts::update::<S>)
        .delete(funfacts::remove::<S>),
    )
    .route("/states/{code}/capital", get(states::capital::<S>))
    .route("/states/{code}/nickname", get(states::nickname::<S>))
    .route("/states/{code}/population", get(states::population::<S>))
    .route("/states/{code}/admission", get(states::admission::<S>))
    .fallback(fallback::not_found)
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
