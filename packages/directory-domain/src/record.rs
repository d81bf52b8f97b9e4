use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
	pub building_id: Uuid,
	pub address: String,
	pub latitude: f64,
	pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
	pub activity_id: Uuid,
	pub name: String,
	pub parent_id: Option<Uuid>,
}

/// Organization as listed: always located in a building and tagged with at least one activity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrganizationItem {
	pub organization_id: Uuid,
	pub name: String,
	pub building: Building,
	pub activities: Vec<Activity>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrganizationDetail {
	pub organization_id: Uuid,
	pub name: String,
	pub building: Option<Building>,
	pub activities: Vec<Activity>,
	pub phone_numbers: Vec<String>,
}
