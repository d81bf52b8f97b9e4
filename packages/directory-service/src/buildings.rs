use directory_domain::{Building, BuildingFilter, Cursor, Page};
use directory_storage::models::BuildingRow;

use crate::{DirectoryService, Result, query::QueryPlan};

impl DirectoryService {
	pub async fn list_buildings(&self, filter: &BuildingFilter) -> Result<Page<Building>> {
		let plan = QueryPlan::buildings(filter)?;
		let mut builder = plan.to_query();
		let rows: Vec<BuildingRow> = builder.build_query_as().fetch_all(&self.db.pool).await?;

		tracing::debug!(
			limit = filter.pagination.limit(),
			fetched = rows.len(),
			"Buildings fetched."
		);

		let page = Page::from_overfetch(rows, filter.pagination.limit(), |row| {
			Cursor::new(row.created_at, row.building_id)
		})?;

		Ok(page.map(|row| Building {
			building_id: row.building_id,
			address: row.address,
			latitude: row.latitude,
			longitude: row.longitude,
		}))
	}
}
