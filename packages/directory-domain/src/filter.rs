use uuid::Uuid;

use crate::{ActivitySelection, Error, GeoFilter, Pagination, Result};

/// Case-insensitive substring to look for in organization names. Matched as given, whitespace
/// included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameQuery(String);
impl NameQuery {
	pub fn new(raw: impl Into<String>) -> Result<Self> {
		let raw = raw.into();

		if raw.is_empty() {
			return Err(Error::InvalidRequest { message: "name must not be empty.".to_string() });
		}

		Ok(Self(raw))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// `ILIKE` pattern matching the query literally anywhere in the name.
	pub fn like_pattern(&self) -> String {
		let mut pattern = String::with_capacity(self.0.len() + 2);

		pattern.push('%');

		for ch in self.0.chars() {
			if matches!(ch, '%' | '_' | '\\') {
				pattern.push('\\');
			}

			pattern.push(ch);
		}

		pattern.push('%');

		pattern
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrganizationFilter {
	pub building_id: Option<Uuid>,
	pub activity: Option<ActivitySelection>,
	pub geo: Option<GeoFilter>,
	pub name: Option<NameQuery>,
	pub pagination: Pagination,
}
impl OrganizationFilter {
	pub fn new(pagination: Pagination) -> Self {
		Self { pagination, ..Self::default() }
	}

	pub fn with_name(mut self, name: NameQuery) -> Self {
		self.name = Some(name);

		self
	}

	pub fn with_building(mut self, building_id: Uuid) -> Self {
		self.building_id = Some(building_id);

		self
	}

	pub fn with_activity(mut self, activity: ActivitySelection) -> Self {
		self.activity = Some(activity);

		self
	}

	pub fn with_geo(mut self, geo: GeoFilter) -> Self {
		self.geo = Some(geo);

		self
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildingFilter {
	pub pagination: Pagination,
}
impl BuildingFilter {
	pub fn new(pagination: Pagination) -> Self {
		Self { pagination }
	}
}
