use std::future::Future;

use axum::{
	Json, Router,
	extract::{
		Path, Query, Request, State,
		rejection::{PathRejection, QueryRejection},
	},
	http::{HeaderMap, StatusCode, header::AUTHORIZATION},
	middleware::{self, Next},
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use directory_domain::{
	ActivitySelection, Building, BuildingFilter, GeoFilter, GeoParams, NameQuery,
	OrganizationDetail, OrganizationFilter, OrganizationItem, Page, Pagination,
};
use directory_service::Error as ServiceError;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	let api = Router::new()
		.route("/directory/organization", get(list_organizations))
		.route("/directory/organization/{organization_id}", get(get_organization))
		.route("/directory/building", get(list_buildings))
		.route_layer(middleware::from_fn_with_state(state.clone(), api_auth_middleware));

	Router::new().route("/health", get(health)).nest("/api/v1", api).with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

/// Query string of the organization list. Geo parameters stay flat here and are only grouped
/// into a [`GeoFilter`] once all of them have been read.
#[derive(Debug, Default, Deserialize)]
pub struct OrganizationQuery {
	pub cursor: Option<String>,
	pub limit: Option<u32>,
	pub name: Option<String>,
	pub building_id: Option<Uuid>,
	pub activity_id: Option<Uuid>,
	#[serde(default)]
	pub include_children: bool,
	pub radius: Option<f64>,
	pub center_lat: Option<f64>,
	pub center_long: Option<f64>,
	pub min_lat: Option<f64>,
	pub max_lat: Option<f64>,
	pub min_long: Option<f64>,
	pub max_long: Option<f64>,
}
impl OrganizationQuery {
	pub fn into_filter(self) -> directory_domain::Result<OrganizationFilter> {
		let geo = GeoFilter::from_params(&GeoParams {
			radius: self.radius,
			center_lat: self.center_lat,
			center_long: self.center_long,
			min_lat: self.min_lat,
			max_lat: self.max_lat,
			min_long: self.min_long,
			max_long: self.max_long,
		})?;
		let mut filter = OrganizationFilter::new(Pagination::new(self.cursor, self.limit)?);

		if let Some(name) = self.name {
			filter = filter.with_name(NameQuery::new(name)?);
		}
		if let Some(building_id) = self.building_id {
			filter = filter.with_building(building_id);
		}
		// `include_children` without an activity has nothing to expand and is ignored.
		if let Some(activity_id) = self.activity_id {
			let selection = if self.include_children {
				ActivitySelection::with_descendants(activity_id)
			} else {
				ActivitySelection::exact(activity_id)
			};

			filter = filter.with_activity(selection);
		}
		if let Some(geo) = geo {
			filter = filter.with_geo(geo);
		}

		Ok(filter)
	}
}

#[derive(Debug, Default, Deserialize)]
pub struct BuildingQuery {
	pub cursor: Option<String>,
	pub limit: Option<u32>,
}

async fn list_organizations(
	State(state): State<AppState>,
	query: Result<Query<OrganizationQuery>, QueryRejection>,
) -> Result<Json<Page<OrganizationItem>>, ApiError> {
	let Query(query) = query.map_err(ApiError::from)?;
	let filter = query.into_filter()?;
	let page = with_deadline(&state, state.service.list_organizations(&filter)).await?;

	Ok(Json(page))
}

async fn get_organization(
	State(state): State<AppState>,
	organization_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<OrganizationDetail>, ApiError> {
	let Path(organization_id) = organization_id.map_err(ApiError::from)?;

	match with_deadline(&state, state.service.get_organization(organization_id)).await? {
		Some(detail) => Ok(Json(detail)),
		None => Err(json_error(
			StatusCode::NOT_FOUND,
			"not_found",
			format!("Organization {organization_id} was not found."),
		)),
	}
}

async fn list_buildings(
	State(state): State<AppState>,
	query: Result<Query<BuildingQuery>, QueryRejection>,
) -> Result<Json<Page<Building>>, ApiError> {
	let Query(query) = query.map_err(ApiError::from)?;
	let filter = BuildingFilter::new(Pagination::new(query.cursor, query.limit)?);
	let page = with_deadline(&state, state.service.list_buildings(&filter)).await?;

	Ok(Json(page))
}

/// Runs one service call under the configured deadline. Dropping the timed-out future cancels
/// the in-flight query.
async fn with_deadline<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
	F: Future<Output = directory_service::Result<T>>,
{
	match tokio::time::timeout(state.request_timeout, call).await {
		Ok(result) => result.map_err(ApiError::from),
		Err(_) => {
			tracing::warn!(timeout = ?state.request_timeout, "Directory query timed out.");

			Err(json_error(StatusCode::GATEWAY_TIMEOUT, "timeout", "Directory query timed out."))
		},
	}
}

async fn api_auth_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
	if let Some(expected) = state.api_auth_token.as_deref()
		&& !is_authorized(req.headers(), expected)
	{
		return json_error(
			StatusCode::UNAUTHORIZED,
			"unauthorized",
			"A valid Bearer token is required.",
		)
		.into_response();
	}

	next.run(req).await
}

fn is_authorized(headers: &HeaderMap, expected: &str) -> bool {
	read_bearer_token(headers)
		.is_some_and(|token| bool::from(token.as_bytes().ct_eq(expected.as_bytes())))
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let raw = headers.get(AUTHORIZATION)?;
	let value = raw.to_str().ok()?.trim();
	let token = value.strip_prefix("Bearer ")?.trim();

	if token.is_empty() { None } else { Some(token) }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidCursor { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_cursor", message),
			ServiceError::InvalidFilter { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_filter", message),
			ServiceError::InvalidRequest { message } =>
				json_error(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Directory storage failure.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"storage_error",
					"Directory storage is unavailable.",
				)
			},
			ServiceError::Internal { message } => {
				tracing::error!(error = %message, "Directory internal failure.");

				json_error(
					StatusCode::INTERNAL_SERVER_ERROR,
					"internal_error",
					"Directory request failed.",
				)
			},
		}
	}
}
impl From<directory_domain::Error> for ApiError {
	fn from(err: directory_domain::Error) -> Self {
		ServiceError::from(err).into()
	}
}
impl From<QueryRejection> for ApiError {
	fn from(err: QueryRejection) -> Self {
		json_error(StatusCode::BAD_REQUEST, "invalid_request", err.body_text())
	}
}
impl From<PathRejection> for ApiError {
	fn from(err: PathRejection) -> Self {
		json_error(StatusCode::BAD_REQUEST, "invalid_request", err.body_text())
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}

#[cfg(test)]
mod tests {
	use axum::http::HeaderValue;

	use super::*;

	fn headers(value: &str) -> HeaderMap {
		let mut headers = HeaderMap::new();

		headers.insert(AUTHORIZATION, HeaderValue::from_str(value).expect("header value"));

		headers
	}

	#[test]
	fn bearer_token_must_match_exactly() {
		assert!(is_authorized(&headers("Bearer secret"), "secret"));
		assert!(is_authorized(&headers("  Bearer secret  "), "secret"));
		assert!(!is_authorized(&headers("Bearer secret2"), "secret"));
		assert!(!is_authorized(&headers("Basic secret"), "secret"));
		assert!(!is_authorized(&headers("Bearer "), "secret"));
		assert!(!is_authorized(&HeaderMap::new(), "secret"));
	}

	#[test]
	fn whitespace_name_is_a_valid_substring() {
		let query =
			OrganizationQuery { name: Some("  ".to_string()), ..OrganizationQuery::default() };
		let filter = query.into_filter().expect("filter");

		assert_eq!(filter.name.map(|name| name.like_pattern()), Some("%  %".to_string()));
	}

	#[test]
	fn empty_name_is_rejected() {
		let query = OrganizationQuery { name: Some(String::new()), ..OrganizationQuery::default() };
		let err = query.into_filter().expect_err("Expected empty name to be rejected.");

		assert!(matches!(err, directory_domain::Error::InvalidRequest { .. }));
	}

	#[test]
	fn include_children_without_activity_is_ignored() {
		let filter = OrganizationQuery { include_children: true, ..OrganizationQuery::default() }
			.into_filter()
			.expect("filter");

		assert!(filter.activity.is_none());
	}

	#[test]
	fn include_children_expands_selected_activity() {
		let activity_id = Uuid::new_v4();
		let filter = OrganizationQuery {
			activity_id: Some(activity_id),
			include_children: true,
			..OrganizationQuery::default()
		}
		.into_filter()
		.expect("filter");

		assert_eq!(filter.activity, Some(ActivitySelection::with_descendants(activity_id)));
	}
}
