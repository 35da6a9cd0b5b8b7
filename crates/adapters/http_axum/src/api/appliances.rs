//! JSON REST handlers for appliances.
//!
//! The member route captures a raw path segment. It only counts as an id when
//! it is entirely numeric; otherwise the request is served as if it targeted
//! the collection (so `GET api/appliances/abc` lists and `POST` creates),
//! while update and delete answer `404`.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};

use appliances_app::ports::ApplianceRepository;
use appliances_domain::appliance::Appliance;
use appliances_domain::id::ApplianceId;
use appliances_domain::listing::{ApplianceFilter, ListQuery, Pagination, SortOrder};

use crate::body::JsonBody;
use crate::error::ApiError;
use crate::response::{DataBody, MessageBody};
use crate::state::AppState;

/// Raw list query parameters.
///
/// Built from the decoded key/value pairs so no query string is ever
/// rejected: unknown keys are ignored and a repeated key keeps its last value.
#[derive(Debug, Default)]
pub struct ListParams {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl FromIterator<(String, String)> for ListParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut params.category,
                "min_price" => &mut params.min_price,
                "max_price" => &mut params.max_price,
                "sort" => &mut params.sort,
                "page" => &mut params.page,
                "per_page" => &mut params.per_page,
                _ => continue,
            };
            *slot = Some(value);
        }
        params
    }
}

/// Price bounds: malformed values are ignored.
fn parse_number(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Page numbers: the leading integer of the value, `0` when there is none,
/// so `per_page=abc` clamps to 1 and `page=3x` reads as 3.
fn parse_integer(value: Option<&str>) -> Option<i64> {
    let value = value?.trim_start();
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return Some(0);
    }
    Some(sign * digits[..end].parse::<i64>().unwrap_or(i64::MAX))
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        Self {
            filter: ApplianceFilter {
                category: params.category.filter(|category| !category.is_empty()),
                min_price: parse_number(params.min_price.as_deref()),
                max_price: parse_number(params.max_price.as_deref()),
            },
            sort: SortOrder::parse(params.sort.as_deref()),
            pagination: Pagination::clamped(
                parse_integer(params.page.as_deref()),
                parse_integer(params.per_page.as_deref()),
            ),
        }
    }
}

/// Possible responses from the read endpoints.
pub enum ReadResponse {
    Page(Json<DataBody<Vec<Appliance>>>),
    Item(Json<DataBody<Appliance>>),
}

impl IntoResponse for ReadResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Page(json) => json.into_response(),
            Self::Item(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create and update endpoints.
pub enum WriteResponse {
    Ok(Json<DataBody<Appliance>>),
}

impl IntoResponse for WriteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => Json(MessageBody { message: "Deleted" }).into_response(),
        }
    }
}

async fn list_page<R>(state: &AppState<R>, params: ListParams) -> Result<ReadResponse, ApiError>
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    let page = state
        .appliance_service
        .list_appliances(ListQuery::from(params))
        .await?;
    let meta = page.meta();
    Ok(ReadResponse::Page(Json(DataBody::with_meta(
        page.items, meta,
    ))))
}

async fn create_from<R>(state: &AppState<R>, body: &serde_json::Value) -> Result<WriteResponse, ApiError>
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    let created = state.appliance_service.create_appliance(body).await?;
    Ok(WriteResponse::Ok(Json(DataBody::new(created))))
}

/// `GET /api/appliances`
pub async fn list<R>(
    State(state): State<AppState<R>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ReadResponse, ApiError>
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    list_page(&state, pairs.into_iter().collect()).await
}

/// `GET /api/appliances/{segment}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(segment): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<ReadResponse, ApiError>
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    let Some(id) = ApplianceId::from_segment(&segment) else {
        return list_page(&state, pairs.into_iter().collect()).await;
    };
    let appliance = state.appliance_service.get_appliance(id).await?;
    Ok(ReadResponse::Item(Json(DataBody::new(appliance))))
}

/// `POST /api/appliances`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    JsonBody(body): JsonBody,
) -> Result<WriteResponse, ApiError>
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    create_from(&state, &body).await
}

/// `POST /api/appliances/{segment}`, only valid when the segment is not an id.
pub async fn create_at<R>(
    State(state): State<AppState<R>>,
    Path(segment): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<WriteResponse, ApiError>
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    if ApplianceId::from_segment(&segment).is_some() {
        return Err(ApiError::RouteNotFound);
    }
    create_from(&state, &body).await
}

/// `PUT /api/appliances/{id}` and `PATCH /api/appliances/{id}`
pub async fn update<R>(
    State(state): State<AppState<R>>,
    Path(segment): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<WriteResponse, ApiError>
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    let id = ApplianceId::from_segment(&segment).ok_or(ApiError::RouteNotFound)?;
    let updated = state.appliance_service.update_appliance(id, &body).await?;
    Ok(WriteResponse::Ok(Json(DataBody::new(updated))))
}

/// `DELETE /api/appliances/{id}`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Path(segment): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: ApplianceRepository + Send + Sync + 'static,
{
    let id = ApplianceId::from_segment(&segment).ok_or(ApiError::RouteNotFound)?;
    state.appliance_service.delete_appliance(id).await?;
    Ok(DeleteResponse::Deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ListParams {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn should_build_default_query_from_empty_params() {
        assert_eq!(ListQuery::from(ListParams::default()), ListQuery::default());
    }

    #[test]
    fn should_parse_all_params() {
        let query = ListQuery::from(params(&[
            ("category", "kitchen"),
            ("min_price", "10"),
            ("max_price", "99.9"),
            ("sort", "price_desc"),
            ("page", "3"),
            ("per_page", "20"),
        ]));
        assert_eq!(query.filter.category.as_deref(), Some("kitchen"));
        assert_eq!(query.filter.min_price, Some(10.0));
        assert_eq!(query.filter.max_price, Some(99.9));
        assert_eq!(query.sort, SortOrder::PriceDesc);
        assert_eq!(query.pagination, Pagination::clamped(Some(3), Some(20)));
    }

    #[test]
    fn should_ignore_empty_category_and_bad_numbers() {
        let query = ListQuery::from(params(&[
            ("category", ""),
            ("min_price", "cheap"),
            ("page", "x"),
            ("per_page", "1000"),
        ]));
        assert_eq!(query.filter, ApplianceFilter::default());
        assert_eq!(query.pagination.page(), 1);
        assert_eq!(query.pagination.per_page(), 100);
    }

    #[test]
    fn should_keep_last_value_of_repeated_key() {
        let query = ListQuery::from(params(&[
            ("page", "1"),
            ("page", "2"),
            ("sort", "price_asc"),
            ("sort", "price_desc"),
            ("color", "red"),
        ]));
        assert_eq!(query.pagination.page(), 2);
        assert_eq!(query.sort, SortOrder::PriceDesc);
    }

    #[test]
    fn should_read_unparsable_per_page_as_zero() {
        let query = ListQuery::from(params(&[("per_page", "lots")]));
        assert_eq!(query.pagination.per_page(), 1);
    }

    #[test]
    fn should_read_leading_integer_of_page_params() {
        assert_eq!(parse_integer(Some("3x")), Some(3));
        assert_eq!(parse_integer(Some(" 20")), Some(20));
        assert_eq!(parse_integer(Some("-4")), Some(-4));
        assert_eq!(parse_integer(Some("")), Some(0));
        assert_eq!(parse_integer(None), None);
    }
}
