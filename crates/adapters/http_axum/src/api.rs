//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod appliances;

use axum::Router;
use axum::routing::{MethodRouter, get};

use appliances_app::ports::ApplianceRepository;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the API sub-router: `api/appliances` and `api/appliances/{segment}`.
///
/// Both shapes are also served with a trailing slash. Any method a route
/// does not handle answers `404 Not found`, including `HEAD`, which axum
/// would otherwise route to the `GET` handler.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    let collection: MethodRouter<AppState<R>> = get(appliances::list::<R>)
        .post(appliances::create::<R>)
        .head(not_found)
        .fallback(not_found);

    let member: MethodRouter<AppState<R>> = get(appliances::get::<R>)
        .post(appliances::create_at::<R>)
        .put(appliances::update::<R>)
        .patch(appliances::update::<R>)
        .delete(appliances::delete::<R>)
        .head(not_found)
        .fallback(not_found);

    Router::new()
        .route("/api/appliances", collection.clone())
        .route("/api/appliances/", collection)
        .route("/api/appliances/{segment}", member.clone())
        .route("/api/appliances/{segment}/", member)
}

/// Fallback for unknown paths and unsupported methods.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
