//! Bundled DDL. `sql/init.sql` lists the files to apply with `\ir`, the same way `psql` would
//! read it; the includes are resolved at compile time.

const INIT: &str = include_str!("../../../sql/init.sql");
const INCLUDES: [(&str, &str); 6] = [
	("00_extensions.sql", include_str!("../../../sql/00_extensions.sql")),
	("tables/001_buildings.sql", include_str!("../../../sql/tables/001_buildings.sql")),
	("tables/002_activities.sql", include_str!("../../../sql/tables/002_activities.sql")),
	("tables/003_organizations.sql", include_str!("../../../sql/tables/003_organizations.sql")),
	(
		"tables/004_organization_activities.sql",
		include_str!("../../../sql/tables/004_organization_activities.sql"),
	),
	(
		"tables/005_organization_phone_numbers.sql",
		include_str!("../../../sql/tables/005_organization_phone_numbers.sql"),
	),
];

pub fn render_schema() -> String {
	let mut out = String::new();

	for line in INIT.lines() {
		let included = line
			.trim()
			.strip_prefix("\\ir ")
			.and_then(|path| INCLUDES.iter().find(|(name, _)| *name == path.trim()))
			.map(|(_, body)| *body);

		out.push_str(included.unwrap_or(line));
		out.push('\n');
	}

	out
}

/// Splits rendered DDL into executable statements. The bundled files never use `;` inside a
/// statement.
pub fn statements(sql: &str) -> Vec<&str> {
	sql.split(';').map(str::trim).filter(|statement| !statement.is_empty()).collect()
}
