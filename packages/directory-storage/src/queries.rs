use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Error, Result,
	db::Db,
	models::{OrganizationDetailRow, PhoneNumberRow},
};

pub struct NewBuilding<'a> {
	pub building_id: Uuid,
	pub address: &'a str,
	pub latitude: f64,
	pub longitude: f64,
	pub created_at: OffsetDateTime,
}

pub struct NewOrganization<'a> {
	pub organization_id: Uuid,
	pub name: &'a str,
	pub building_id: Option<Uuid>,
	pub created_at: OffsetDateTime,
}

pub async fn insert_building(db: &Db, building: &NewBuilding<'_>) -> Result<()> {
	if !building.latitude.is_finite() || !building.longitude.is_finite() {
		return Err(Error::InvalidArgument("Building coordinates must be finite.".to_string()));
	}

	sqlx::query(
		"\
INSERT INTO buildings (building_id, address, location, created_at)
VALUES ($1, $2, ST_SetSRID(ST_MakePoint($3, $4), 4326)::geography, $5)",
	)
	.bind(building.building_id)
	.bind(building.address)
	.bind(building.longitude)
	.bind(building.latitude)
	.bind(building.created_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn insert_activity(
	db: &Db,
	activity_id: Uuid,
	name: &str,
	parent_id: Option<Uuid>,
) -> Result<()> {
	if parent_id == Some(activity_id) {
		return Err(Error::InvalidArgument("An activity cannot be its own parent.".to_string()));
	}

	sqlx::query("INSERT INTO activities (activity_id, name, parent_id) VALUES ($1, $2, $3)")
		.bind(activity_id)
		.bind(name)
		.bind(parent_id)
		.execute(&db.pool)
		.await?;

	Ok(())
}

pub async fn insert_organization(db: &Db, organization: &NewOrganization<'_>) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO organizations (organization_id, name, building_id, created_at)
VALUES ($1, $2, $3, $4)",
	)
	.bind(organization.organization_id)
	.bind(organization.name)
	.bind(organization.building_id)
	.bind(organization.created_at)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn link_organization_activity(
	db: &Db,
	organization_id: Uuid,
	activity_id: Uuid,
) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO organization_activities (organization_id, activity_id)
VALUES ($1, $2)
ON CONFLICT DO NOTHING",
	)
	.bind(organization_id)
	.bind(activity_id)
	.execute(&db.pool)
	.await?;

	Ok(())
}

pub async fn insert_phone_number(
	db: &Db,
	organization_id: Uuid,
	phone_number: &str,
) -> Result<Uuid> {
	let phone_number_id = Uuid::new_v4();

	sqlx::query(
		"\
INSERT INTO organization_phone_numbers (phone_number_id, organization_id, phone_number)
VALUES ($1, $2, $3)",
	)
	.bind(phone_number_id)
	.bind(organization_id)
	.bind(phone_number)
	.execute(&db.pool)
	.await?;

	Ok(phone_number_id)
}

/// Single organization with its optional building and all of its activities.
pub async fn fetch_organization_detail(
	db: &Db,
	organization_id: Uuid,
) -> Result<Option<OrganizationDetailRow>> {
	let row = sqlx::query_as::<_, OrganizationDetailRow>(
		"\
SELECT
	o.organization_id,
	o.name,
	o.created_at,
	b.building_id,
	b.address,
	ST_Y(b.location::geometry) AS latitude,
	ST_X(b.location::geometry) AS longitude,
	COALESCE(act.activities, '[]'::json) AS activities
FROM organizations o
LEFT JOIN buildings b ON b.building_id = o.building_id
LEFT JOIN LATERAL (
	SELECT json_agg(
		json_build_object('activity_id', a.activity_id, 'name', a.name, 'parent_id', a.parent_id)
		ORDER BY a.name, a.activity_id
	) AS activities
	FROM organization_activities oa
	JOIN activities a ON a.activity_id = oa.activity_id
	WHERE oa.organization_id = o.organization_id
) act ON TRUE
WHERE o.organization_id = $1",
	)
	.bind(organization_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(row)
}

pub async fn fetch_phone_numbers(db: &Db, organization_id: Uuid) -> Result<Vec<PhoneNumberRow>> {
	let rows = sqlx::query_as::<_, PhoneNumberRow>(
		"\
SELECT phone_number_id, organization_id, phone_number
FROM organization_phone_numbers
WHERE organization_id = $1
ORDER BY phone_number, phone_number_id",
	)
	.bind(organization_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(rows)
}
