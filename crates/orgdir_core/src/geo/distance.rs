//! Great-circle distance and radius-to-rectangle conversion.

use crate::model::geo::{BoundingBox, Coordinate};

/// Mean Earth radius used by every distance computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Smallest `cos(latitude)` divisor used when widening longitude near poles.
const MIN_LONGITUDE_SCALE: f64 = 1e-6;

/// Haversine distance between `a` and `b` in kilometers.
///
/// Symmetric, zero for identical points, never negative.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let dlat = lat_b - lat_a;
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `h` a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Converts a search radius into an axis-aligned rectangle around `center`.
///
/// Uses the equirectangular approximation: a constant number of kilometers
/// per degree of latitude, and longitude widened by `1 / cos(latitude)`. The
/// box over-covers the circle at its corners; it is a pre-filter, the exact
/// answer comes from [`haversine_km`].
///
/// `radius_km` must be positive; callers validate it.
pub fn bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    let lat_delta = (radius_km / EARTH_RADIUS_KM).to_degrees();
    let lon_scale = center.latitude.to_radians().cos().max(MIN_LONGITUDE_SCALE);
    let lon_delta = lat_delta / lon_scale;
    BoundingBox::new(
        center.latitude - lat_delta,
        center.latitude + lat_delta,
        center.longitude - lon_delta,
        center.longitude + lon_delta,
    )
}

#[cfg(test)]
mod tests {
    use super::{bounding_box, haversine_km, EARTH_RADIUS_KM};
    use crate::model::geo::Coordinate;

    #[test]
    fn same_point_is_zero_km() {
        let moscow = Coordinate::new(55.7522, 37.6156);
        assert_eq!(haversine_km(moscow, moscow), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let distance = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((distance - 111.195).abs() < 0.01, "got {distance}");
    }

    #[test]
    fn moscow_to_saint_petersburg() {
        let moscow = Coordinate::new(55.7522, 37.6156);
        let spb = Coordinate::new(59.9343, 30.3351);
        let distance = haversine_km(moscow, spb);
        assert!((distance - 634.0).abs() < 5.0, "got {distance}");
    }

    #[test]
    fn antipodes_are_half_circumference() {
        let distance = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!((distance - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn box_widens_longitude_away_from_equator() {
        let equator = bounding_box(Coordinate::new(0.0, 0.0), 100.0);
        let north = bounding_box(Coordinate::new(60.0, 0.0), 100.0);

        let equator_lat = equator.max_latitude - equator.min_latitude;
        let north_lat = north.max_latitude - north.min_latitude;
        assert!((equator_lat - north_lat).abs() < 1e-12);

        let equator_lon = equator.max_longitude - equator.min_longitude;
        let north_lon = north.max_longitude - north.min_longitude;
        assert!((north_lon - 2.0 * equator_lon).abs() < 1e-9);
    }

    #[test]
    fn box_at_pole_stays_finite() {
        let bounds = bounding_box(Coordinate::new(90.0, 0.0), 10.0);
        assert!(bounds.min_longitude.is_finite());
        assert!(bounds.max_longitude.is_finite());
    }
}
