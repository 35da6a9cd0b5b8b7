//! Storage port: repository trait for appliance persistence.

use std::future::Future;

use appliances_domain::appliance::{Appliance, AppliancePatch, NewAppliance};
use appliances_domain::error::ApplianceError;
use appliances_domain::id::ApplianceId;
use appliances_domain::listing::{ListQuery, Page};

/// Repository for persisting and querying [`Appliance`]s.
///
/// Implementations must enforce `sku` uniqueness atomically and report a
/// collision as [`ApplianceError::Conflict`].
pub trait ApplianceRepository {
    /// Insert a new appliance and return the stored row.
    fn create(
        &self,
        appliance: NewAppliance,
    ) -> impl Future<Output = Result<Appliance, ApplianceError>> + Send;

    /// Get an appliance by its identifier.
    fn get_by_id(
        &self,
        id: ApplianceId,
    ) -> impl Future<Output = Result<Option<Appliance>, ApplianceError>> + Send;

    /// List one page of appliances matching the query, with the filtered total.
    fn list(
        &self,
        query: ListQuery,
    ) -> impl Future<Output = Result<Page<Appliance>, ApplianceError>> + Send;

    /// Apply a non-empty patch. Returns `None` when no row has `id`.
    fn update(
        &self,
        id: ApplianceId,
        patch: AppliancePatch,
    ) -> impl Future<Output = Result<Option<Appliance>, ApplianceError>> + Send;

    /// Delete an appliance. Returns `false` when no row has `id`.
    fn delete(&self, id: ApplianceId) -> impl Future<Output = Result<bool, ApplianceError>> + Send;
}
