//! Coordinate and rectangle value types.
//!
//! # Invariants
//! - Valid coordinates are finite, latitude in `[-90, 90]`, longitude in
//!   `[-180, 180]`.
//! - `BoundingBox` bounds are inclusive on every side.

use serde::{Deserialize, Serialize};

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// WGS84-style latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns whether both components are finite and inside their ranges.
    pub fn is_valid(&self) -> bool {
        is_valid_latitude(self.latitude) && is_valid_longitude(self.longitude)
    }
}

pub(crate) fn is_valid_latitude(value: f64) -> bool {
    value.is_finite() && (MIN_LATITUDE..=MAX_LATITUDE).contains(&value)
}

pub(crate) fn is_valid_longitude(value: f64) -> bool {
    value.is_finite() && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&value)
}

/// Axis-aligned latitude/longitude rectangle.
///
/// Derived per query and never persisted. Bounds computed from a radius may
/// exceed the coordinate ranges near the poles or the antimeridian; they are
/// kept unclamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    pub const fn new(
        min_latitude: f64,
        max_latitude: f64,
        min_longitude: f64,
        max_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// Inclusive containment check.
    pub fn contains(&self, point: Coordinate) -> bool {
        point.latitude >= self.min_latitude
            && point.latitude <= self.max_latitude
            && point.longitude >= self.min_longitude
            && point.longitude <= self.max_longitude
    }
}

/// Anything the proximity filter can place on the map.
pub trait LocatedEntity {
    fn coordinate(&self) -> Coordinate;
}

impl LocatedEntity for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl<T: LocatedEntity + ?Sized> LocatedEntity for &T {
    fn coordinate(&self) -> Coordinate {
        (**self).coordinate()
    }
}
