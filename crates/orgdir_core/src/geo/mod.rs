//! Geospatial proximity search.
//!
//! # Responsibility
//! - Compute exact great-circle distances.
//! - Turn a radius into a cheap rectangle pre-filter.
//! - Filter located entities by radius or rectangle.

pub mod distance;
pub mod proximity;

pub use distance::{bounding_box, haversine_km, EARTH_RADIUS_KM};
pub use proximity::{
    filter_candidates, NearbyQuery, ProximityError, SearchArea, NEARBY_LIMIT_DEFAULT,
    NEARBY_LIMIT_MAX, RADIUS_OVERFETCH_MULTIPLIER,
};
