//! Pure building blocks of the directory query engine.
//!
//! Everything in this crate is synchronous and free of I/O: filter value objects are validated
//! on construction, cursors are encoded and decoded here, and over-fetched result sets are turned
//! into pages here. The storage-facing compiler lives in `directory-service`.

pub mod activity;
pub mod cursor;
pub mod filter;
pub mod geo;
pub mod pagination;
pub mod record;
pub mod time_serde;

mod error;

pub use activity::{ActivitySelection, ActivityTree, DESCENDANT_DEPTH};
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use filter::{BuildingFilter, NameQuery, OrganizationFilter};
pub use geo::{BoundingBox, GeoFilter, GeoParams, GeoPoint, RadiusFilter, SRID_WGS84};
pub use pagination::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, Page, Pagination};
pub use record::{Activity, Building, OrganizationDetail, OrganizationItem};
