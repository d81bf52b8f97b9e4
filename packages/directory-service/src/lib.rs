//! Directory query service.
//!
//! Validated filter values from `directory-domain` are compiled into one keyset-paginated SQL
//! statement each, executed against the pool owned by [`DirectoryService`], and assembled into
//! pages of domain records.

pub mod buildings;
pub mod organizations;

mod error;
mod query;

pub use directory_domain::{
	Activity, Building, BuildingFilter, OrganizationDetail, OrganizationFilter, OrganizationItem,
	Page,
};
pub use error::{Error, Result};

use directory_storage::db::Db;

pub struct DirectoryService {
	pub db: Db,
}
impl DirectoryService {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}
