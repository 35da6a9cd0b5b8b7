//! Shared application state for axum handlers.

use std::sync::Arc;

use appliances_app::ports::ApplianceRepository;
use appliances_app::services::appliance_service::ApplianceService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Appliance CRUD service.
    pub appliance_service: Arc<ApplianceService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            appliance_service: Arc::clone(&self.appliance_service),
        }
    }
}

impl<R> AppState<R>
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(appliance_service: ApplianceService<R>) -> Self {
        Self {
            appliance_service: Arc::new(appliance_service),
        }
    }
}
