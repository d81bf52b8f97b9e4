//! Geospatial filter value objects.
//!
//! The radius and bounding-box filters are two variants of one sum type, so a filter can never
//! carry both. [`GeoFilter::from_params`] is the single place that turns the loose boundary
//! parameters into a variant and enforces the all-or-nothing rules.

use crate::{Error, Result};

/// Spatial reference of every stored building point (WGS 84, longitude first).
pub const SRID_WGS84: i32 = 4_326;
pub const MIN_RADIUS_METERS: f64 = 1.0;
pub const MAX_RADIUS_METERS: f64 = 100_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
	pub latitude: f64,
	pub longitude: f64,
}

/// Buildings whose geodesic distance from `center` is at most `radius_meters`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusFilter {
	center: GeoPoint,
	radius_meters: f64,
}
impl RadiusFilter {
	pub fn new(center_lat: f64, center_long: f64, radius_meters: f64) -> Result<Self> {
		check_latitude("center_lat", center_lat)?;
		check_longitude("center_long", center_long)?;

		if !radius_meters.is_finite() {
			return Err(Error::invalid_filter("radius must be a finite number."));
		}
		if !(MIN_RADIUS_METERS..=MAX_RADIUS_METERS).contains(&radius_meters) {
			return Err(Error::invalid_filter(format!(
				"radius must be between {MIN_RADIUS_METERS} and {MAX_RADIUS_METERS} meters."
			)));
		}

		let center = GeoPoint { latitude: center_lat, longitude: center_long };

		Ok(Self { center, radius_meters })
	}

	pub fn center(&self) -> GeoPoint {
		self.center
	}

	pub fn radius_meters(&self) -> f64 {
		self.radius_meters
	}
}

/// Inclusive latitude/longitude rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
	min_lat: f64,
	max_lat: f64,
	min_long: f64,
	max_long: f64,
}
impl BoundingBox {
	pub fn new(min_lat: f64, max_lat: f64, min_long: f64, max_long: f64) -> Result<Self> {
		check_latitude("min_lat", min_lat)?;
		check_latitude("max_lat", max_lat)?;
		check_longitude("min_long", min_long)?;
		check_longitude("max_long", max_long)?;

		if min_lat >= max_lat {
			return Err(Error::invalid_filter("min_lat must be less than max_lat."));
		}
		if min_long >= max_long {
			return Err(Error::invalid_filter("min_long must be less than max_long."));
		}

		Ok(Self { min_lat, max_lat, min_long, max_long })
	}

	pub fn min_lat(&self) -> f64 {
		self.min_lat
	}

	pub fn max_lat(&self) -> f64 {
		self.max_lat
	}

	pub fn min_long(&self) -> f64 {
		self.min_long
	}

	pub fn max_long(&self) -> f64 {
		self.max_long
	}

	/// In-memory form of the inclusive box predicate the query compiler renders. Used by tests as
	/// the reference model for expected results.
	pub fn contains(&self, point: GeoPoint) -> bool {
		(self.min_lat..=self.max_lat).contains(&point.latitude)
			&& (self.min_long..=self.max_long).contains(&point.longitude)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeoFilter {
	Radius(RadiusFilter),
	BoundingBox(BoundingBox),
}
impl GeoFilter {
	/// Builds at most one geo filter out of the optional boundary parameters.
	///
	/// Returns `Ok(None)` when no geo parameter is present at all.
	pub fn from_params(params: &GeoParams) -> Result<Option<Self>> {
		let radius = [params.radius, params.center_lat, params.center_long];
		let bbox = [params.min_lat, params.max_lat, params.min_long, params.max_long];
		let radius_given = radius.iter().filter(|value| value.is_some()).count();
		let bbox_given = bbox.iter().filter(|value| value.is_some()).count();

		if radius_given > 0 && bbox_given > 0 {
			return Err(Error::invalid_filter(
				"radius and bounding box filters are mutually exclusive.",
			));
		}

		if radius_given > 0 {
			let (Some(radius), Some(center_lat), Some(center_long)) =
				(params.radius, params.center_lat, params.center_long)
			else {
				return Err(Error::invalid_filter(
					"radius, center_lat and center_long must be provided together.",
				));
			};

			let radius = RadiusFilter::new(center_lat, center_long, radius)?;

			return Ok(Some(Self::Radius(radius)));
		}
		if bbox_given > 0 {
			let (Some(min_lat), Some(max_lat), Some(min_long), Some(max_long)) =
				(params.min_lat, params.max_lat, params.min_long, params.max_long)
			else {
				return Err(Error::invalid_filter(
					"min_lat, max_lat, min_long and max_long must be provided together.",
				));
			};

			return BoundingBox::new(min_lat, max_lat, min_long, max_long)
				.map(|f| Some(Self::BoundingBox(f)));
		}

		Ok(None)
	}
}

/// Raw, independently optional geo parameters as they arrive from the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoParams {
	pub radius: Option<f64>,
	pub center_lat: Option<f64>,
	pub center_long: Option<f64>,
	pub min_lat: Option<f64>,
	pub max_lat: Option<f64>,
	pub min_long: Option<f64>,
	pub max_long: Option<f64>,
}

fn check_latitude(field: &str, value: f64) -> Result<()> {
	if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
		return Err(Error::invalid_filter(format!("{field} must be within [-90, 90].")));
	}

	Ok(())
}

fn check_longitude(field: &str, value: f64) -> Result<()> {
	if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
		return Err(Error::invalid_filter(format!("{field} must be within [-180, 180].")));
	}

	Ok(())
}
