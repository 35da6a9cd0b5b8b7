//! Parsing and validation of untyped JSON input into create/update requests.
//!
//! Numeric fields accept JSON numbers as well as numeric strings. An explicit
//! `null` counts as absent, except for `energy_rating` where it clears the
//! rating.

use serde_json::{Map, Value};

use super::{
    AppliancePatch, DEFAULT_STOCK, DEFAULT_WARRANTY_MONTHS, ENERGY_RATING_RANGE, Field,
    NewAppliance,
};
use crate::error::ValidationErrors;

const REQUIRED: &str = "required";
const MUST_BE_STRING: &str = "must be a string";
const MUST_BE_NUMERIC: &str = "must be numeric";
const MUST_BE_NON_NEGATIVE: &str = "must be >= 0";
const MUST_BE_COUNT: &str = "must be integer >= 0";
const MUST_BE_RATING: &str = "must be 1-5 or null";

impl NewAppliance {
    /// Validate a create request body.
    ///
    /// A body that is not a JSON object is treated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns every field that is missing or malformed.
    pub fn from_json(input: &Value) -> Result<Self, ValidationErrors> {
        let empty = Map::new();
        let mut reader = Reader::new(input.as_object().unwrap_or(&empty));

        for field in Field::REQUIRED {
            reader.require(field);
        }

        let sku = reader.text(Field::Sku);
        let name = reader.text(Field::Name);
        let brand = reader.text(Field::Brand);
        let category = reader.text(Field::Category);
        let price = reader.price();
        let stock = reader.count(Field::Stock);
        let warranty_months = reader.count(Field::WarrantyMonths);
        let energy_rating = reader.energy_rating();

        let errors = reader.errors;
        match (sku, name, brand, category, price) {
            (Some(sku), Some(name), Some(brand), Some(category), Some(price))
                if errors.is_empty() =>
            {
                Ok(Self {
                    sku,
                    name,
                    brand,
                    category,
                    price,
                    stock: stock.unwrap_or(DEFAULT_STOCK),
                    warranty_months: warranty_months.unwrap_or(DEFAULT_WARRANTY_MONTHS),
                    energy_rating: energy_rating.flatten(),
                })
            }
            _ => Err(errors),
        }
    }
}

impl AppliancePatch {
    /// Validate an update request body. Only present fields are checked.
    ///
    /// # Errors
    ///
    /// Returns every present field that is malformed.
    pub fn from_json(input: &Value) -> Result<Self, ValidationErrors> {
        let empty = Map::new();
        let mut reader = Reader::new(input.as_object().unwrap_or(&empty));

        let patch = Self {
            sku: reader.text(Field::Sku),
            name: reader.text(Field::Name),
            brand: reader.text(Field::Brand),
            category: reader.text(Field::Category),
            price: reader.price(),
            stock: reader.count(Field::Stock),
            warranty_months: reader.count(Field::WarrantyMonths),
            energy_rating: reader.energy_rating(),
        };

        reader.errors.into_result()?;
        Ok(patch)
    }
}

/// Reads typed values out of a JSON object, collecting failures per field.
struct Reader<'a> {
    input: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Reader<'a> {
    fn new(input: &'a Map<String, Value>) -> Self {
        Self {
            input,
            errors: ValidationErrors::default(),
        }
    }

    /// Value for `field`, `None` when absent or `null`.
    fn value(&self, field: Field) -> Option<&'a Value> {
        self.input.get(field.as_str()).filter(|value| !value.is_null())
    }

    fn fail(&mut self, field: Field, message: &'static str) {
        self.errors.insert(field.as_str(), message);
    }

    fn require(&mut self, field: Field) {
        if self.value(field).is_none() {
            self.fail(field, REQUIRED);
        }
    }

    fn text(&mut self, field: Field) -> Option<String> {
        match self.value(field)? {
            Value::String(text) if text.is_empty() => {
                self.fail(field, REQUIRED);
                None
            }
            Value::String(text) => Some(text.clone()),
            _ => {
                self.fail(field, MUST_BE_STRING);
                None
            }
        }
    }

    fn price(&mut self) -> Option<f64> {
        let value = self.value(Field::Price)?;
        if matches!(value, Value::String(text) if text.is_empty()) {
            self.fail(Field::Price, REQUIRED);
            return None;
        }
        let Some(price) = as_number(value) else {
            self.fail(Field::Price, MUST_BE_NUMERIC);
            return None;
        };
        if price < 0.0 {
            self.fail(Field::Price, MUST_BE_NON_NEGATIVE);
            return None;
        }
        Some(price)
    }

    fn count(&mut self, field: Field) -> Option<i64> {
        let value = self.value(field)?;
        match as_integer(value) {
            Some(count) if count >= 0 => Some(count),
            _ => {
                self.fail(field, MUST_BE_COUNT);
                None
            }
        }
    }

    /// `None` when absent, `Some(None)` for an explicit `null`.
    fn energy_rating(&mut self) -> Option<Option<i64>> {
        let value = self.input.get(Field::EnergyRating.as_str())?;
        if value.is_null() {
            return Some(None);
        }
        match as_integer(value) {
            Some(rating) if ENERGY_RATING_RANGE.contains(&rating) => Some(Some(rating)),
            _ => {
                self.fail(Field::EnergyRating, MUST_BE_RATING);
                None
            }
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}
