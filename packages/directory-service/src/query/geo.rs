use sqlx::{Postgres, QueryBuilder};

use directory_domain::{BoundingBox, GeoFilter, RadiusFilter, SRID_WGS84};

pub(super) fn push_sql(filter: &GeoFilter, builder: &mut QueryBuilder<'static, Postgres>) {
	match filter {
		GeoFilter::Radius(radius) => push_radius(radius, builder),
		GeoFilter::BoundingBox(bbox) => push_bounding_box(bbox, builder),
	}
}

// Geography distances are measured on the WGS 84 spheroid.
fn push_radius(radius: &RadiusFilter, builder: &mut QueryBuilder<'static, Postgres>) {
	let center = radius.center();

	builder.push("ST_DWithin(b.location, ST_SetSRID(ST_MakePoint(");
	builder.push_bind(center.longitude);
	builder.push(", ");
	builder.push_bind(center.latitude);
	builder.push(format!("), {SRID_WGS84})::geography, "));
	builder.push_bind(radius.radius_meters());
	builder.push(", true)");
}

// The envelope test is served by the `location::geometry` GiST index; the `BETWEEN` pair keeps
// both edges inclusive.
fn push_bounding_box(bbox: &BoundingBox, builder: &mut QueryBuilder<'static, Postgres>) {
	builder.push("(b.location::geometry && ST_MakeEnvelope(");
	builder.push_bind(bbox.min_long());
	builder.push(", ");
	builder.push_bind(bbox.min_lat());
	builder.push(", ");
	builder.push_bind(bbox.max_long());
	builder.push(", ");
	builder.push_bind(bbox.max_lat());
	builder.push(format!(", {SRID_WGS84}) AND ST_Y(b.location::geometry) BETWEEN "));
	builder.push_bind(bbox.min_lat());
	builder.push(" AND ");
	builder.push_bind(bbox.max_lat());
	builder.push(" AND ST_X(b.location::geometry) BETWEEN ");
	builder.push_bind(bbox.min_long());
	builder.push(" AND ");
	builder.push_bind(bbox.max_long());
	builder.push(")");
}
