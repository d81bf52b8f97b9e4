use uuid::Uuid;

use directory_domain::{
	Activity, Building, Cursor, OrganizationDetail, OrganizationFilter, OrganizationItem, Page,
};
use directory_storage::{
	models::{ActivityRow, OrganizationDetailRow, OrganizationRow},
	queries,
};

use crate::{DirectoryService, Result, query::QueryPlan};

impl DirectoryService {
	pub async fn list_organizations(
		&self,
		filter: &OrganizationFilter,
	) -> Result<Page<OrganizationItem>> {
		let plan = QueryPlan::organizations(filter)?;
		let mut builder = plan.to_query();
		let rows: Vec<OrganizationRow> = builder.build_query_as().fetch_all(&self.db.pool).await?;

		tracing::debug!(
			predicates = plan.predicate_count(),
			limit = filter.pagination.limit(),
			fetched = rows.len(),
			"Organizations fetched."
		);

		let page = Page::from_overfetch(rows, filter.pagination.limit(), |row| {
			Cursor::new(row.created_at, row.organization_id)
		})?;

		Ok(page.map(organization_item))
	}

	/// Looks up one organization. An unknown identifier yields `Ok(None)`.
	pub async fn get_organization(
		&self,
		organization_id: Uuid,
	) -> Result<Option<OrganizationDetail>> {
		let Some(row) = queries::fetch_organization_detail(&self.db, organization_id).await? else {
			tracing::debug!(%organization_id, "Organization not found.");

			return Ok(None);
		};
		let phone_numbers = queries::fetch_phone_numbers(&self.db, organization_id)
			.await?
			.into_iter()
			.map(|phone| phone.phone_number)
			.collect();

		Ok(Some(organization_detail(row, phone_numbers)))
	}
}

fn organization_item(row: OrganizationRow) -> OrganizationItem {
	OrganizationItem {
		organization_id: row.organization_id,
		name: row.name,
		building: Building {
			building_id: row.building_id,
			address: row.address,
			latitude: row.latitude,
			longitude: row.longitude,
		},
		activities: row.activities.0.into_iter().map(activity).collect(),
	}
}

fn organization_detail(
	row: OrganizationDetailRow,
	phone_numbers: Vec<String>,
) -> OrganizationDetail {
	let building = match (row.building_id, row.address, row.latitude, row.longitude) {
		(Some(building_id), Some(address), Some(latitude), Some(longitude)) =>
			Some(Building { building_id, address, latitude, longitude }),
		_ => None,
	};

	OrganizationDetail {
		organization_id: row.organization_id,
		name: row.name,
		building,
		activities: row.activities.0.into_iter().map(activity).collect(),
		phone_numbers,
	}
}

fn activity(row: ActivityRow) -> Activity {
	Activity { activity_id: row.activity_id, name: row.name, parent_id: row.parent_id }
}
