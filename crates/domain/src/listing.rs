//! Listing queries: filters, sort order and pagination for the collection.

use serde::Serialize;

/// Page size used when the client does not ask for one.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Largest page size a client may request.
pub const MAX_PER_PAGE: u64 = 100;

/// Predicates applied to the collection, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplianceFilter {
    /// Exact category match.
    pub category: Option<String>,
    /// Inclusive lower bound on price.
    pub min_price: Option<f64>,
    /// Inclusive upper bound on price.
    pub max_price: Option<f64>,
}

/// Ordering of the collection. Ties always fall back to id descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recently inserted first.
    #[default]
    IdDesc,
    PriceAsc,
    PriceDesc,
    CreatedDesc,
}

impl SortOrder {
    /// Parse the `sort` query parameter. Unknown values fall back to the default.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("price_asc") => Self::PriceAsc,
            Some("price_desc") => Self::PriceDesc,
            Some("created_desc") => Self::CreatedDesc,
            _ => Self::IdDesc,
        }
    }
}

/// A 1-based page request with a bounded page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    per_page: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    /// Build a pagination, clamping `page` to at least 1 and `per_page`
    /// into `1..=MAX_PER_PAGE`. Missing values take the defaults.
    #[must_use]
    pub fn clamped(page: Option<i64>, per_page: Option<i64>) -> Self {
        let page = page.map_or(1, |page| u64::try_from(page).unwrap_or(0).max(1));
        let per_page = per_page.map_or(DEFAULT_PER_PAGE, |per_page| {
            u64::try_from(per_page)
                .unwrap_or(0)
                .clamp(1, MAX_PER_PAGE)
        });
        Self { page, per_page }
    }

    #[must_use]
    pub fn page(self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn per_page(self) -> u64 {
        self.per_page
    }

    /// Number of rows to skip before this page.
    #[must_use]
    pub fn offset(self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

/// Everything needed to list appliances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub filter: ApplianceFilter,
    pub sort: SortOrder,
    pub pagination: Pagination,
}

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    /// Rows matching the filter, ignoring pagination.
    pub total: u64,
}

impl<T> Page<T> {
    /// Pagination metadata for this page.
    #[must_use]
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            page: self.pagination.page(),
            per_page: self.pagination.per_page(),
            total: self.total,
        }
    }
}

/// Pagination block rendered next to list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_first_page_of_ten() {
        let pagination = Pagination::clamped(None, None);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.per_page(), 10);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn should_clamp_per_page_into_bounds() {
        assert_eq!(Pagination::clamped(None, Some(0)).per_page(), 1);
        assert_eq!(Pagination::clamped(None, Some(-5)).per_page(), 1);
        assert_eq!(Pagination::clamped(None, Some(500)).per_page(), 100);
        assert_eq!(Pagination::clamped(None, Some(25)).per_page(), 25);
    }

    #[test]
    fn should_clamp_page_to_one() {
        assert_eq!(Pagination::clamped(Some(0), None).page(), 1);
        assert_eq!(Pagination::clamped(Some(-3), None).page(), 1);
    }

    #[test]
    fn should_compute_offset_from_page_and_size() {
        let pagination = Pagination::clamped(Some(2), Some(5));
        assert_eq!(pagination.offset(), 5);
    }

    #[test]
    fn should_saturate_offset_on_huge_page() {
        let pagination = Pagination::clamped(Some(i64::MAX), Some(100));
        assert_eq!(pagination.offset(), u64::MAX);
    }

    #[test]
    fn should_parse_known_sort_orders() {
        assert_eq!(SortOrder::parse(Some("price_asc")), SortOrder::PriceAsc);
        assert_eq!(SortOrder::parse(Some("price_desc")), SortOrder::PriceDesc);
        assert_eq!(SortOrder::parse(Some("created_desc")), SortOrder::CreatedDesc);
    }

    #[test]
    fn should_fall_back_to_id_desc_for_unknown_sort() {
        assert_eq!(SortOrder::parse(None), SortOrder::IdDesc);
        assert_eq!(SortOrder::parse(Some("name")), SortOrder::IdDesc);
    }

    #[test]
    fn should_expose_meta_for_page() {
        let page = Page {
            items: vec![1, 2],
            pagination: Pagination::clamped(Some(3), Some(2)),
            total: 9,
        };
        assert_eq!(
            page.meta(),
            PageMeta {
                page: 3,
                per_page: 2,
                total: 9
            }
        );
    }
}
