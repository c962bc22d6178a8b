//! Radius/rectangle proximity filtering.
//!
//! # Responsibility
//! - Validate the radius-or-rectangle contract of a nearby query.
//! - Size the over-fetch requested from the candidate source.
//! - Scan candidates in supplied order, keeping those within range.
//!
//! # Invariants
//! - A query resolves to exactly one `SearchArea`; a radius wins over bounds.
//! - The filter never returns more than `limit` entities and stops scanning
//!   once `limit` matches are collected.
//! - In radius mode the haversine distance alone decides membership; the
//!   bounding box only sizes the candidate source request.

use crate::geo::distance::{bounding_box, haversine_km, EARTH_RADIUS_KM};
use crate::model::geo::{
    is_valid_latitude, is_valid_longitude, BoundingBox, Coordinate, LocatedEntity,
};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Candidates fetched per requested result in radius mode.
pub const RADIUS_OVERFETCH_MULTIPLIER: usize = 5;

/// Largest accepted result limit for one nearby query.
pub const NEARBY_LIMIT_MAX: u32 = 500;

/// Result limit applied when the caller does not pick one.
pub const NEARBY_LIMIT_DEFAULT: u32 = 100;

/// Validation failures for nearby queries.
#[derive(Debug, Clone, PartialEq)]
pub enum ProximityError {
    /// Neither a radius nor any rectangle bound was supplied.
    MissingArea,
    /// No radius, and only some of the four rectangle bounds.
    IncompleteRectangle { missing: Vec<&'static str> },
    /// Radius is not a finite positive number.
    InvalidRadius(f64),
    /// A coordinate component is not finite or outside its range.
    CoordinateOutOfRange { field: &'static str, value: f64 },
    /// A rectangle minimum is greater than its maximum.
    InvertedRectangle { axis: &'static str },
    /// Limit is outside `1..=NEARBY_LIMIT_MAX`.
    InvalidLimit(u32),
}

impl Display for ProximityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArea => write!(f, "provide either radius_km or full rectangular bounds"),
            Self::IncompleteRectangle { missing } => write!(
                f,
                "provide either radius_km or full rectangular bounds; missing {}",
                missing.join(", ")
            ),
            Self::InvalidRadius(value) => {
                write!(f, "radius_km must be a positive number, got {value}")
            }
            Self::CoordinateOutOfRange { field, value } => {
                write!(f, "{field} is out of range: {value}")
            }
            Self::InvertedRectangle { axis } => {
                write!(f, "min_{axis} must not be greater than max_{axis}")
            }
            Self::InvalidLimit(limit) => {
                write!(f, "limit must be within 1..={NEARBY_LIMIT_MAX}, got {limit}")
            }
        }
    }
}

impl Error for ProximityError {}

/// Raw nearby-search parameters, as received from the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub center: Coordinate,
    pub radius_km: Option<f64>,
    pub min_latitude: Option<f64>,
    pub max_latitude: Option<f64>,
    pub min_longitude: Option<f64>,
    pub max_longitude: Option<f64>,
    pub limit: u32,
}

impl NearbyQuery {
    /// Query with no area yet and the default limit.
    pub fn around(center: Coordinate) -> Self {
        Self {
            center,
            radius_km: None,
            min_latitude: None,
            max_latitude: None,
            min_longitude: None,
            max_longitude: None,
            limit: NEARBY_LIMIT_DEFAULT,
        }
    }

    pub fn within_radius(center: Coordinate, radius_km: f64, limit: u32) -> Self {
        Self {
            radius_km: Some(radius_km),
            limit,
            ..Self::around(center)
        }
    }

    pub fn within_rectangle(center: Coordinate, bounds: BoundingBox, limit: u32) -> Self {
        Self {
            min_latitude: Some(bounds.min_latitude),
            max_latitude: Some(bounds.max_latitude),
            min_longitude: Some(bounds.min_longitude),
            max_longitude: Some(bounds.max_longitude),
            limit,
            ..Self::around(center)
        }
    }

    /// Validates the query and picks the search mode.
    ///
    /// # Errors
    /// - `MissingArea` / `IncompleteRectangle` when no radius is given and
    ///   the rectangle is absent or partial.
    /// - `InvalidRadius`, `CoordinateOutOfRange`, `InvertedRectangle`,
    ///   `InvalidLimit` for malformed values.
    pub fn resolve(&self) -> Result<SearchArea, ProximityError> {
        if self.limit == 0 || self.limit > NEARBY_LIMIT_MAX {
            return Err(ProximityError::InvalidLimit(self.limit));
        }
        check_latitude("latitude", self.center.latitude)?;
        check_longitude("longitude", self.center.longitude)?;

        if let Some(radius_km) = self.radius_km {
            if !radius_km.is_finite() || radius_km <= 0.0 {
                return Err(ProximityError::InvalidRadius(radius_km));
            }
            return Ok(SearchArea::Radius {
                center: self.center,
                radius_km,
                bounds: bounding_box(self.center, radius_km),
            });
        }

        let (Some(min_lat), Some(max_lat), Some(min_lon), Some(max_lon)) = (
            self.min_latitude,
            self.max_latitude,
            self.min_longitude,
            self.max_longitude,
        ) else {
            return Err(self.rectangle_gap());
        };
        check_latitude("min_latitude", min_lat)?;
        check_latitude("max_latitude", max_lat)?;
        check_longitude("min_longitude", min_lon)?;
        check_longitude("max_longitude", max_lon)?;
        if min_lat > max_lat {
            return Err(ProximityError::InvertedRectangle { axis: "latitude" });
        }
        if min_lon > max_lon {
            return Err(ProximityError::InvertedRectangle { axis: "longitude" });
        }

        Ok(SearchArea::Rectangle(BoundingBox::new(min_lat, max_lat, min_lon, max_lon)))
    }

    /// Error for a query without radius whose rectangle is absent or partial.
    fn rectangle_gap(&self) -> ProximityError {
        let fields = [
            ("min_latitude", self.min_latitude),
            ("max_latitude", self.max_latitude),
            ("min_longitude", self.min_longitude),
            ("max_longitude", self.max_longitude),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| *name)
            .collect();
        if missing.len() == fields.len() {
            ProximityError::MissingArea
        } else {
            ProximityError::IncompleteRectangle { missing }
        }
    }
}

fn check_latitude(field: &'static str, value: f64) -> Result<(), ProximityError> {
    if is_valid_latitude(value) {
        Ok(())
    } else {
        Err(ProximityError::CoordinateOutOfRange { field, value })
    }
}

fn check_longitude(field: &'static str, value: f64) -> Result<(), ProximityError> {
    if is_valid_longitude(value) {
        Ok(())
    } else {
        Err(ProximityError::CoordinateOutOfRange { field, value })
    }
}

/// Validated search mode of a nearby query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchArea {
    /// Circle around `center`; `bounds` is its approximate enclosing box.
    Radius {
        center: Coordinate,
        radius_km: f64,
        bounds: BoundingBox,
    },
    /// Caller-supplied rectangle, matched without distance checks.
    Rectangle(BoundingBox),
}

impl SearchArea {
    /// Rectangle the candidate source should restrict to.
    ///
    /// In radius mode this is widened to hold the whole circle: exact
    /// longitude spread at high latitude, every longitude past a pole or the
    /// antimeridian, and latitudes clamped to `[-90, 90]`.
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Self::Radius {
                center,
                radius_km,
                bounds,
            } => source_bounds(*center, *radius_km, *bounds),
            Self::Rectangle(bounds) => *bounds,
        }
    }

    /// Number of candidates to request for `limit` results.
    pub fn fetch_limit(&self, limit: usize) -> usize {
        match self {
            Self::Radius { .. } => limit.saturating_mul(RADIUS_OVERFETCH_MULTIPLIER),
            Self::Rectangle(_) => limit,
        }
    }

    /// Short label for log events.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Radius { .. } => "radius",
            Self::Rectangle(_) => "rectangle",
        }
    }

    /// Whether `point` is inside this area.
    ///
    /// Radius mode ignores `bounds`: the box does not wrap across the poles
    /// or the antimeridian, so only the great-circle distance is exact.
    pub fn matches(&self, point: Coordinate) -> bool {
        match self {
            Self::Radius {
                center, radius_km, ..
            } => haversine_km(*center, point) <= *radius_km,
            Self::Rectangle(bounds) => bounds.contains(point),
        }
    }
}

/// Box that holds the whole circle, for pre-restricting storage reads.
///
/// Longitude spread is the exact circle extent `asin(sin d / cos lat)` when
/// that exceeds the equirectangular one. A circle reaching a pole, or a box
/// spilling past the antimeridian, covers every longitude.
fn source_bounds(center: Coordinate, radius_km: f64, bounds: BoundingBox) -> BoundingBox {
    let angular = radius_km / EARTH_RADIUS_KM;
    let min_latitude = bounds.min_latitude.max(-90.0);
    let max_latitude = bounds.max_latitude.min(90.0);
    if center.latitude.abs() + angular.to_degrees() >= 90.0 {
        return BoundingBox::new(min_latitude, max_latitude, -180.0, 180.0);
    }

    let exact = (angular.sin() / center.latitude.to_radians().cos())
        .min(1.0)
        .asin()
        .to_degrees();
    let spread = exact.max(center.longitude - bounds.min_longitude);
    let (min_longitude, max_longitude) = (center.longitude - spread, center.longitude + spread);
    if min_longitude < -180.0 || max_longitude > 180.0 {
        return BoundingBox::new(min_latitude, max_latitude, -180.0, 180.0);
    }
    BoundingBox::new(min_latitude, max_latitude, min_longitude, max_longitude)
}

/// Keeps up to `limit` candidates inside `area`, in supplied order.
///
/// Scanning stops as soon as `limit` matches are collected; remaining
/// candidates are not evaluated. An exhausted candidate list yields however
/// many matched.
pub fn filter_candidates<T, I>(candidates: I, area: &SearchArea, limit: usize) -> Vec<T>
where
    T: LocatedEntity,
    I: IntoIterator<Item = T>,
{
    let mut matched = Vec::new();
    if limit == 0 {
        return matched;
    }

    let mut scanned = 0usize;
    for candidate in candidates {
        scanned += 1;
        if area.matches(candidate.coordinate()) {
            matched.push(candidate);
            if matched.len() >= limit {
                break;
            }
        }
    }

    debug!(
        "event=proximity_filter module=geo mode={} scanned={} matched={} limit={}",
        area.mode(),
        scanned,
        matched.len(),
        limit
    );
    matched
}
