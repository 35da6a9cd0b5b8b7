//! Appliance service: use-cases for managing the catalogue.

use serde_json::Value;

use appliances_domain::appliance::{Appliance, AppliancePatch, NewAppliance};
use appliances_domain::error::{ApplianceError, NotFoundError};
use appliances_domain::id::ApplianceId;
use appliances_domain::listing::{ListQuery, Page};

use crate::ports::ApplianceRepository;

fn not_found(id: ApplianceId) -> ApplianceError {
    NotFoundError {
        entity: "Appliance",
        id: id.to_string(),
    }
    .into()
}

/// Application service for appliance CRUD operations.
pub struct ApplianceService<R> {
    repo: R,
}

impl<R: ApplianceRepository> ApplianceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List one page of appliances matching `query`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_appliances(&self, query: ListQuery) -> Result<Page<Appliance>, ApplianceError> {
        let page = self.repo.list(query).await?;
        tracing::debug!(returned = page.items.len(), total = page.total, "listed appliances");
        Ok(page)
    }

    /// Look up an appliance by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ApplianceError::NotFound`] when no appliance with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_appliance(&self, id: ApplianceId) -> Result<Appliance, ApplianceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Validate a create request body and insert the appliance.
    ///
    /// # Errors
    ///
    /// Returns [`ApplianceError::Validation`] for malformed input,
    /// [`ApplianceError::Conflict`] when the sku is taken, or a storage error.
    #[tracing::instrument(skip_all)]
    pub async fn create_appliance(&self, input: &Value) -> Result<Appliance, ApplianceError> {
        let appliance = NewAppliance::from_json(input)?;
        let created = self.repo.create(appliance).await?;
        tracing::info!(id = %created.id, sku = %created.sku, "appliance created");
        Ok(created)
    }

    /// Apply the fields present in `input` to an existing appliance.
    ///
    /// Existence is checked before the input is validated.
    ///
    /// # Errors
    ///
    /// Returns [`ApplianceError::NotFound`] for an unknown id,
    /// [`ApplianceError::Validation`] for malformed fields,
    /// [`ApplianceError::NoChanges`] when no recognised field is present,
    /// [`ApplianceError::Conflict`] when the new sku is taken, or a storage error.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_appliance(
        &self,
        id: ApplianceId,
        input: &Value,
    ) -> Result<Appliance, ApplianceError> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Err(not_found(id));
        }

        let patch = AppliancePatch::from_json(input)?;
        if patch.is_empty() {
            return Err(ApplianceError::NoChanges);
        }

        let updated = self
            .repo
            .update(id, patch)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(id = %updated.id, sku = %updated.sku, "appliance updated");
        Ok(updated)
    }

    /// Delete an appliance by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApplianceError::NotFound`] when no appliance with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_appliance(&self, id: ApplianceId) -> Result<(), ApplianceError> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(%id, "appliance deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appliances_domain::error::ConflictError;
    use appliances_domain::listing::{Pagination, SortOrder};
    use appliances_domain::appliance::{Field, FieldValue};
    use appliances_domain::time::Timestamp;
    use serde_json::json;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryApplianceRepo {
        store: Mutex<Vec<Appliance>>,
    }

    fn conflict() -> ApplianceError {
        ConflictError {
            entity: "Appliance",
            field: "sku",
        }
        .into()
    }

    fn apply_changes(patch: &AppliancePatch, appliance: &mut Appliance) {
        for change in patch.changes() {
            match change {
                (Field::Sku, FieldValue::Text(v)) => appliance.sku = v.to_string(),
                (Field::Name, FieldValue::Text(v)) => appliance.name = v.to_string(),
                (Field::Brand, FieldValue::Text(v)) => appliance.brand = v.to_string(),
                (Field::Category, FieldValue::Text(v)) => appliance.category = v.to_string(),
                (Field::Price, FieldValue::Real(v)) => appliance.price = v,
                (Field::Stock, FieldValue::Integer(v)) => appliance.stock = v,
                (Field::WarrantyMonths, FieldValue::Integer(v)) => appliance.warranty_months = v,
                (Field::EnergyRating, FieldValue::NullableInteger(v)) => appliance.energy_rating = v,
                other => panic!("mismatched change {other:?}"),
            }
        }
    }

    impl ApplianceRepository for InMemoryApplianceRepo {
        fn create(
            &self,
            appliance: NewAppliance,
        ) -> impl Future<Output = Result<Appliance, ApplianceError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = if store.iter().any(|a| a.sku == appliance.sku) {
                Err(conflict())
            } else {
                let next = store.iter().map(|a| a.id.as_i64()).max().unwrap_or(0) + 1;
                let created = appliance.into_appliance(ApplianceId::new(next), Timestamp::default());
                store.push(created.clone());
                Ok(created)
            };
            async { result }
        }

        fn get_by_id(
            &self,
            id: ApplianceId,
        ) -> impl Future<Output = Result<Option<Appliance>, ApplianceError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.iter().find(|a| a.id == id).cloned();
            async { Ok(result) }
        }

        fn list(
            &self,
            query: ListQuery,
        ) -> impl Future<Output = Result<Page<Appliance>, ApplianceError>> + Send {
            let store = self.store.lock().unwrap();
            let mut matching: Vec<Appliance> = store
                .iter()
                .filter(|a| {
                    query.filter.category.as_ref().is_none_or(|c| &a.category == c)
                        && query.filter.min_price.is_none_or(|min| a.price >= min)
                        && query.filter.max_price.is_none_or(|max| a.price <= max)
                })
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.id.cmp(&a.id));
            if query.sort == SortOrder::PriceAsc {
                matching.sort_by(|a, b| a.price.total_cmp(&b.price));
            }
            let total = matching.len() as u64;
            let offset = usize::try_from(query.pagination.offset()).unwrap_or(usize::MAX);
            let per_page = usize::try_from(query.pagination.per_page()).unwrap_or(usize::MAX);
            let items = matching.into_iter().skip(offset).take(per_page).collect();
            let page = Page {
                items,
                pagination: query.pagination,
                total,
            };
            async { Ok(page) }
        }

        fn update(
            &self,
            id: ApplianceId,
            patch: AppliancePatch,
        ) -> impl Future<Output = Result<Option<Appliance>, ApplianceError>> + Send {
            let mut store = self.store.lock().unwrap();
            let taken = patch
                .sku
                .as_ref()
                .is_some_and(|sku| store.iter().any(|a| &a.sku == sku && a.id != id));
            let result = if taken {
                Err(conflict())
            } else {
                Ok(store.iter_mut().find(|a| a.id == id).map(|a| {
                    apply_changes(&patch, a);
                    a.clone()
                }))
            };
            async { result }
        }

        fn delete(&self, id: ApplianceId) -> impl Future<Output = Result<bool, ApplianceError>> + Send {
            let mut store = self.store.lock().unwrap();
            let before = store.len();
            store.retain(|a| a.id != id);
            let removed = store.len() != before;
            async move { Ok(removed) }
        }
    }

    fn make_service() -> ApplianceService<InMemoryApplianceRepo> {
        ApplianceService::new(InMemoryApplianceRepo::default())
    }

    fn body(sku: &str, price: f64) -> Value {
        json!({
            "sku": sku,
            "name": "Dishwasher",
            "brand": "Acme",
            "category": "kitchen",
            "price": price
        })
    }

    #[tokio::test]
    async fn should_create_appliance_with_defaults() {
        let svc = make_service();
        let created = svc.create_appliance(&body("DW-1", 320.0)).await.unwrap();

        let fetched = svc.get_appliance(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.stock, 0);
        assert_eq!(fetched.warranty_months, 12);
        assert_eq!(fetched.energy_rating, None);
    }

    #[tokio::test]
    async fn should_reject_create_when_price_negative() {
        let svc = make_service();
        let result = svc.create_appliance(&body("DW-1", -1.0)).await;
        match result {
            Err(ApplianceError::Validation(errors)) => {
                assert_eq!(errors.get("price"), Some("must be >= 0"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_return_conflict_when_sku_reused() {
        let svc = make_service();
        svc.create_appliance(&body("DW-1", 10.0)).await.unwrap();
        let result = svc.create_appliance(&body("DW-1", 20.0)).await;
        assert!(matches!(result, Err(ApplianceError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_appliance_missing() {
        let svc = make_service();
        let result = svc.get_appliance(ApplianceId::new(99)).await;
        assert!(matches!(result, Err(ApplianceError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_update_only_present_fields() {
        let svc = make_service();
        let created = svc.create_appliance(&body("DW-1", 10.0)).await.unwrap();

        let updated = svc
            .update_appliance(created.id, &json!({ "stock": 12 }))
            .await
            .unwrap();

        assert_eq!(updated.stock, 12);
        assert_eq!(updated.sku, created.sku);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn should_check_existence_before_validating_update() {
        let svc = make_service();
        let result = svc
            .update_appliance(ApplianceId::new(5), &json!({ "price": -3 }))
            .await;
        assert!(matches!(result, Err(ApplianceError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_update_without_fields() {
        let svc = make_service();
        let created = svc.create_appliance(&body("DW-1", 10.0)).await.unwrap();
        let result = svc.update_appliance(created.id, &json!({})).await;
        assert!(matches!(result, Err(ApplianceError::NoChanges)));
    }

    #[tokio::test]
    async fn should_reject_update_when_price_negative() {
        let svc = make_service();
        let created = svc.create_appliance(&body("DW-1", 10.0)).await.unwrap();
        let result = svc
            .update_appliance(created.id, &json!({ "price": -5 }))
            .await;
        assert!(matches!(result, Err(ApplianceError::Validation(_))));
    }

    #[tokio::test]
    async fn should_return_conflict_when_update_takes_other_sku() {
        let svc = make_service();
        svc.create_appliance(&body("DW-1", 10.0)).await.unwrap();
        let second = svc.create_appliance(&body("DW-2", 10.0)).await.unwrap();

        let result = svc
            .update_appliance(second.id, &json!({ "sku": "DW-1" }))
            .await;
        assert!(matches!(result, Err(ApplianceError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_allow_update_keeping_own_sku() {
        let svc = make_service();
        let created = svc.create_appliance(&body("DW-1", 10.0)).await.unwrap();
        let updated = svc
            .update_appliance(created.id, &json!({ "sku": "DW-1", "price": 11 }))
            .await
            .unwrap();
        assert!((updated.price - 11.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn should_delete_appliance() {
        let svc = make_service();
        let created = svc.create_appliance(&body("DW-1", 10.0)).await.unwrap();

        svc.delete_appliance(created.id).await.unwrap();

        let result = svc.get_appliance(created.id).await;
        assert!(matches!(result, Err(ApplianceError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing() {
        let svc = make_service();
        let result = svc.delete_appliance(ApplianceId::new(1)).await;
        assert!(matches!(result, Err(ApplianceError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_requested_page() {
        let svc = make_service();
        for i in 0..7 {
            svc.create_appliance(&body(&format!("DW-{i}"), 10.0))
                .await
                .unwrap();
        }

        let page = svc
            .list_appliances(ListQuery {
                pagination: Pagination::clamped(Some(2), Some(5)),
                ..ListQuery::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 2);
    }
}
