//! Filter compiler.
//!
//! A filter value becomes a [`QueryPlan`]: the relation to scan plus a flat list of [`Predicate`]
//! descriptors that are AND-ed together. Each descriptor renders its own SQL fragment and binds, so
//! every predicate can be checked in isolation against the text `QueryBuilder` produces.

mod activity;
mod geo;

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use directory_domain::{
	ActivitySelection, BuildingFilter, Cursor, GeoFilter, NameQuery, OrganizationFilter,
	Pagination,
};

use crate::Result;

const ORGANIZATION_SELECT: &str = "\
SELECT
	o.organization_id,
	o.name,
	o.created_at,
	b.building_id,
	b.address,
	ST_Y(b.location::geometry) AS latitude,
	ST_X(b.location::geometry) AS longitude,
	act.activities
FROM organizations o
JOIN buildings b ON b.building_id = o.building_id
JOIN LATERAL (
	SELECT json_agg(
		json_build_object('activity_id', a.activity_id, 'name', a.name, 'parent_id', a.parent_id)
		ORDER BY a.name, a.activity_id
	) AS activities
	FROM organization_activities oa
	JOIN activities a ON a.activity_id = oa.activity_id
	WHERE oa.organization_id = o.organization_id
) act ON act.activities IS NOT NULL";
const BUILDING_SELECT: &str = "\
SELECT
	b.building_id,
	b.address,
	ST_Y(b.location::geometry) AS latitude,
	ST_X(b.location::geometry) AS longitude,
	b.created_at
FROM buildings b";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Relation {
	Organizations,
	Buildings,
}
impl Relation {
	fn select(self) -> &'static str {
		match self {
			Self::Organizations => ORGANIZATION_SELECT,
			Self::Buildings => BUILDING_SELECT,
		}
	}

	fn created_at_column(self) -> &'static str {
		match self {
			Self::Organizations => "o.created_at",
			Self::Buildings => "b.created_at",
		}
	}

	fn id_column(self) -> &'static str {
		match self {
			Self::Organizations => "o.organization_id",
			Self::Buildings => "b.building_id",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Predicate {
	NameContains(NameQuery),
	BuildingIs(Uuid),
	Activity(ActivitySelection),
	Geo(GeoFilter),
	After(Cursor),
}
impl Predicate {
	fn push_sql(&self, relation: Relation, builder: &mut QueryBuilder<'static, Postgres>) {
		match self {
			Self::NameContains(name) => {
				builder.push("o.name ILIKE ");
				builder.push_bind(name.like_pattern());
				builder.push(" ESCAPE '\\'");
			},
			Self::BuildingIs(building_id) => {
				builder.push("o.building_id = ");
				builder.push_bind(*building_id);
			},
			Self::Activity(selection) => activity::push_sql(selection, builder),
			Self::Geo(filter) => geo::push_sql(filter, builder),
			Self::After(cursor) => {
				let created_at = relation.created_at_column();
				let id = relation.id_column();

				builder.push(format!("({created_at} > "));
				builder.push_bind(cursor.created_at);
				builder.push(format!(" OR ({created_at} = "));
				builder.push_bind(cursor.created_at);
				builder.push(format!(" AND {id} > "));
				builder.push_bind(cursor.id);
				builder.push("))");
			},
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct QueryPlan {
	relation: Relation,
	predicates: Vec<Predicate>,
	fetch_limit: i64,
}
impl QueryPlan {
	pub(crate) fn organizations(filter: &OrganizationFilter) -> Result<Self> {
		let mut predicates = Vec::new();

		if let Some(name) = &filter.name {
			predicates.push(Predicate::NameContains(name.clone()));
		}
		if let Some(building_id) = filter.building_id {
			predicates.push(Predicate::BuildingIs(building_id));
		}
		if let Some(selection) = filter.activity {
			predicates.push(Predicate::Activity(selection));
		}
		if let Some(geo) = filter.geo {
			predicates.push(Predicate::Geo(geo));
		}

		Self::paginated(Relation::Organizations, predicates, &filter.pagination)
	}

	pub(crate) fn buildings(filter: &BuildingFilter) -> Result<Self> {
		Self::paginated(Relation::Buildings, Vec::new(), &filter.pagination)
	}

	fn paginated(
		relation: Relation,
		mut predicates: Vec<Predicate>,
		pagination: &Pagination,
	) -> Result<Self> {
		if let Some(cursor) = pagination.decode_cursor()? {
			predicates.push(Predicate::After(cursor));
		}

		Ok(Self { relation, predicates, fetch_limit: pagination.fetch_limit() })
	}

	pub(crate) fn predicate_count(&self) -> usize {
		self.predicates.len()
	}

	pub(crate) fn to_query(&self) -> QueryBuilder<'static, Postgres> {
		let mut builder = QueryBuilder::new(self.relation.select());

		for (idx, predicate) in self.predicates.iter().enumerate() {
			builder.push(if idx == 0 { "\nWHERE " } else { "\n\tAND " });

			predicate.push_sql(self.relation, &mut builder);
		}

		builder.push(format!(
			"\nORDER BY {}, {}\nLIMIT ",
			self.relation.created_at_column(),
			self.relation.id_column()
		));
		builder.push_bind(self.fetch_limit);

		builder
	}
}
