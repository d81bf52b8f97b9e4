use serde::Deserialize;
use sqlx::types::Json;
use time::OffsetDateTime;
use uuid::Uuid;

/// One element of the `activities` JSON array aggregated next to an organization row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActivityRow {
	pub activity_id: Uuid,
	pub name: String,
	pub parent_id: Option<Uuid>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct BuildingRow {
	pub building_id: Uuid,
	pub address: String,
	pub latitude: f64,
	pub longitude: f64,
	pub created_at: OffsetDateTime,
}

/// Organization as seen by the list view: building and activities are inner-joined, so both are
/// always present.
#[derive(Debug, sqlx::FromRow)]
pub struct OrganizationRow {
	pub organization_id: Uuid,
	pub name: String,
	pub created_at: OffsetDateTime,
	pub building_id: Uuid,
	pub address: String,
	pub latitude: f64,
	pub longitude: f64,
	pub activities: Json<Vec<ActivityRow>>,
}

/// Organization as seen by the detail view: building columns are null when the organization has
/// no location, and the activity array may be empty.
#[derive(Debug, sqlx::FromRow)]
pub struct OrganizationDetailRow {
	pub organization_id: Uuid,
	pub name: String,
	pub created_at: OffsetDateTime,
	pub building_id: Option<Uuid>,
	pub address: Option<String>,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
	pub activities: Json<Vec<ActivityRow>>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct PhoneNumberRow {
	pub phone_number_id: Uuid,
	pub organization_id: Uuid,
	pub phone_number: String,
}
