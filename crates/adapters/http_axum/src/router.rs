//! Axum router assembly.

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use appliances_app::ports::ApplianceRepository;

use crate::state::AppState;

/// Normalize a configured base path into a nest prefix.
///
/// `""` and `"/"` mean "no prefix"; trailing slashes are dropped.
fn nest_prefix(base_path: &str) -> Option<String> {
    let trimmed = base_path.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with('/') {
        Some(trimmed.to_string())
    } else {
        Some(format!("/{trimmed}"))
    }
}

/// Build the top-level axum [`Router`].
///
/// API routes are served both at the root and under `base_path`, so a proxy
/// may or may not strip the prefix. Anything else answers `404 Not found`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>, base_path: &str) -> Router
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    let api = crate::api::routes::<R>();

    let mut router = Router::new()
        .route("/health", get(health_check))
        .merge(api.clone());
    if let Some(prefix) = nest_prefix(base_path) {
        router = router.nest(&prefix, api);
    }

    router
        .fallback(crate::api::not_found)
        .layer(CatchPanicLayer::custom(crate::error::panic_response))
        .layer(crate::cors::layer())
        .layer(crate::cors::allow_methods())
        .layer(crate::cors::allow_headers())
        .layer(middleware::from_fn(crate::cors::preflight_no_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
