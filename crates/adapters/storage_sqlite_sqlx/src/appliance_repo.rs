//! `SQLite` implementation of [`ApplianceRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use appliances_app::ports::ApplianceRepository;
use appliances_domain::appliance::{Appliance, AppliancePatch, FieldValue, NewAppliance};
use appliances_domain::error::ApplianceError;
use appliances_domain::id::ApplianceId;
use appliances_domain::listing::{ApplianceFilter, ListQuery, Page, SortOrder};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Appliance);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Appliance> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let created_at: String = row.try_get("created_at")?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Appliance {
            id: ApplianceId::new(row.try_get("id")?),
            sku: row.try_get("sku")?,
            name: row.try_get("name")?,
            brand: row.try_get("brand")?,
            category: row.try_get("category")?,
            price: row.try_get("price")?,
            stock: row.try_get("stock")?,
            warranty_months: row.try_get("warranty_months")?,
            energy_rating: row.try_get("energy_rating")?,
            created_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO appliances (sku, name, brand, category, price, stock, warranty_months, energy_rating)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
    RETURNING *
";
const SELECT_BY_ID: &str = "SELECT * FROM appliances WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM appliances WHERE id = ?";

fn order_by(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::IdDesc => " ORDER BY id DESC",
        SortOrder::PriceAsc => " ORDER BY price ASC, id DESC",
        SortOrder::PriceDesc => " ORDER BY price DESC, id DESC",
        SortOrder::CreatedDesc => " ORDER BY created_at DESC, id DESC",
    }
}

/// Append the `WHERE` clause for `filter`, binding every value.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &ApplianceFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(category) = &filter.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(min_price) = filter.min_price {
        builder.push(" AND price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        builder.push(" AND price <= ").push_bind(max_price);
    }
}

/// Saturating conversion for `LIMIT`/`OFFSET` binds.
fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// `SQLite`-backed appliance repository.
pub struct SqliteApplianceRepository {
    pool: SqlitePool,
}

impl SqliteApplianceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn count(&self, filter: &ApplianceFilter) -> Result<u64, StorageError> {
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM appliances");
        push_filter(&mut builder, filter);

        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}

impl ApplianceRepository for SqliteApplianceRepository {
    async fn create(&self, appliance: NewAppliance) -> Result<Appliance, ApplianceError> {
        let row: Wrapper = sqlx::query_as(INSERT)
            .bind(&appliance.sku)
            .bind(&appliance.name)
            .bind(&appliance.brand)
            .bind(&appliance.category)
            .bind(appliance.price)
            .bind(appliance.stock)
            .bind(appliance.warranty_months)
            .bind(appliance.energy_rating)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.0)
    }

    async fn get_by_id(&self, id: ApplianceId) -> Result<Option<Appliance>, ApplianceError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn list(&self, query: ListQuery) -> Result<Page<Appliance>, ApplianceError> {
        let total = self.count(&query.filter).await?;

        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new("SELECT * FROM appliances");
        push_filter(&mut builder, &query.filter);
        builder
            .push(order_by(query.sort))
            .push(" LIMIT ")
            .push_bind(to_sql_int(query.pagination.per_page()))
            .push(" OFFSET ")
            .push_bind(to_sql_int(query.pagination.offset()));

        let rows: Vec<Wrapper> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Page {
            items: rows.into_iter().map(|w| w.0).collect(),
            pagination: query.pagination,
            total,
        })
    }

    async fn update(
        &self,
        id: ApplianceId,
        patch: AppliancePatch,
    ) -> Result<Option<Appliance>, ApplianceError> {
        let changes = patch.changes();
        if changes.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new("UPDATE appliances SET ");
        let mut assignments = builder.separated(", ");
        for (field, value) in changes {
            assignments.push(field.as_str());
            assignments.push_unseparated(" = ");
            match value {
                FieldValue::Text(text) => assignments.push_bind_unseparated(text.to_owned()),
                FieldValue::Real(real) => assignments.push_bind_unseparated(real),
                FieldValue::Integer(integer) => assignments.push_bind_unseparated(integer),
                FieldValue::NullableInteger(integer) => {
                    assignments.push_bind_unseparated(integer)
                }
            };
        }
        builder
            .push(" WHERE id = ")
            .push_bind(id.as_i64())
            .push(" RETURNING *");

        let row: Option<Wrapper> = builder
            .build_query_as()
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn delete(&self, id: ApplianceId) -> Result<bool, ApplianceError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
