use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{health_with_pool, AppState};
use crate::controllers;

/// Tutto ciò che non è GET o HEAD su /health viene instradato da `controllers::dispatch`,
/// anche gli altri metodi su /health (risorsa sconosciuta). `get` di axum risponde anche a HEAD.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/health",
            get(|Extension(state): Extension<Arc<AppState>>| async move {
                health_with_pool(&state.pool).await
            })
            .fallback(controllers::dispatch),
        )
        .fallback(controllers::dispatch)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}
