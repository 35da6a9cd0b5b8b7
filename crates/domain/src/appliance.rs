//! Appliance: the single catalogue record managed by the service.

mod input;

use serde::Serialize;

use crate::id::ApplianceId;
use crate::time::Timestamp;

/// Stock assumed when a create request omits it.
pub const DEFAULT_STOCK: i64 = 0;

/// Warranty assumed when a create request omits it.
pub const DEFAULT_WARRANTY_MONTHS: i64 = 12;

/// Accepted range for [`Appliance::energy_rating`].
pub const ENERGY_RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// A stored appliance, as returned by every read and write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appliance {
    pub id: ApplianceId,
    /// Stock keeping unit, unique across all appliances.
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub warranty_months: i64,
    /// 1 (worst) to 5 (best), `None` when unrated.
    pub energy_rating: Option<i64>,
    pub created_at: Timestamp,
}

/// Writable columns of the `appliances` table.
///
/// This is the allow-list used to build dynamic `SET` clauses: client input
/// is matched against these names and never used as a column name directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Sku,
    Name,
    Brand,
    Category,
    Price,
    Stock,
    WarrantyMonths,
    EnergyRating,
}

impl Field {
    /// Fields a create request must carry.
    pub const REQUIRED: [Self; 5] = [
        Self::Sku,
        Self::Name,
        Self::Brand,
        Self::Category,
        Self::Price,
    ];

    /// JSON key and column name for this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sku => "sku",
            Self::Name => "name",
            Self::Brand => "brand",
            Self::Category => "category",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::WarrantyMonths => "warranty_months",
            Self::EnergyRating => "energy_rating",
        }
    }
}

/// A value destined for one [`Field`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Real(f64),
    Integer(i64),
    NullableInteger(Option<i64>),
}

/// A validated create request with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppliance {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    pub warranty_months: i64,
    pub energy_rating: Option<i64>,
}

impl NewAppliance {
    /// Materialize the stored record once storage assigned `id` and `created_at`.
    #[must_use]
    pub fn into_appliance(self, id: ApplianceId, created_at: Timestamp) -> Appliance {
        Appliance {
            id,
            sku: self.sku,
            name: self.name,
            brand: self.brand,
            category: self.category,
            price: self.price,
            stock: self.stock,
            warranty_months: self.warranty_months,
            energy_rating: self.energy_rating,
            created_at,
        }
    }
}

/// A validated partial update. `None` means "leave unchanged".
///
/// `energy_rating` is doubly optional: `Some(None)` clears the rating.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliancePatch {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub warranty_months: Option<i64>,
    pub energy_rating: Option<Option<i64>>,
}

impl AppliancePatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }

    /// The fields this patch sets, in column order.
    #[must_use]
    pub fn changes(&self) -> Vec<(Field, FieldValue<'_>)> {
        let mut changes = Vec::new();
        if let Some(sku) = &self.sku {
            changes.push((Field::Sku, FieldValue::Text(sku)));
        }
        if let Some(name) = &self.name {
            changes.push((Field::Name, FieldValue::Text(name)));
        }
        if let Some(brand) = &self.brand {
            changes.push((Field::Brand, FieldValue::Text(brand)));
        }
        if let Some(category) = &self.category {
            changes.push((Field::Category, FieldValue::Text(category)));
        }
        if let Some(price) = self.price {
            changes.push((Field::Price, FieldValue::Real(price)));
        }
        if let Some(stock) = self.stock {
            changes.push((Field::Stock, FieldValue::Integer(stock)));
        }
        if let Some(warranty_months) = self.warranty_months {
            changes.push((Field::WarrantyMonths, FieldValue::Integer(warranty_months)));
        }
        if let Some(energy_rating) = self.energy_rating {
            changes.push((Field::EnergyRating, FieldValue::NullableInteger(energy_rating)));
        }
        changes
    }

}
