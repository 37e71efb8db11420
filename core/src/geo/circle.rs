use crate::geo::point::GeoPoint;

/// Mean earth radius used by web map libraries for metric circles.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Closed ring of points `radius_m` away from `center` on a spherical earth.
///
/// Longitudes are left unwrapped so that a ring crossing the antimeridian
/// still projects to a continuous outline.
pub fn geodesic_ring(center: GeoPoint, radius_m: f64, segments: usize) -> Vec<GeoPoint> {
    let segments = segments.max(8);
    let angular = radius_m / EARTH_RADIUS_M;
    let lat1 = center.lat.to_radians();
    let lon1 = center.lon.to_radians();
    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_d, cos_d) = angular.sin_cos();

    (0..=segments)
        .map(|step| {
            let bearing = step as f64 / segments as f64 * std::f64::consts::TAU;
            let sin_lat2 = sin_lat1 * cos_d + cos_lat1 * sin_d * bearing.cos();
            let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
            let lon2 = lon1
                + (bearing.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * sin_lat2);
            GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
        })
        .collect()
}

/// Great-circle distance in meters (haversine).
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_points_sit_on_the_radius() {
        let center = GeoPoint::new(20.0, 78.0);
        let ring = geodesic_ring(center, 110_000.0, 64);
        assert_eq!(ring.len(), 65);
        for point in &ring {
            let distance = distance_m(center, *point);
            assert!((distance - 110_000.0).abs() < 1.0, "distance {distance}");
        }
    }

    #[test]
    fn ring_is_closed() {
        let ring = geodesic_ring(GeoPoint::new(10.0, 170.0), 5_000_000.0, 32);
        let first = ring.first().unwrap();
        let last = ring.last().unwrap();
        assert!((first.lat - last.lat).abs() < 1e-9);
        assert!((first.lon - last.lon).abs() < 1e-9);
    }

    #[test]
    fn ring_longitudes_stay_continuous_across_antimeridian() {
        let ring = geodesic_ring(GeoPoint::new(0.0, 179.0), 500_000.0, 32);
        assert!(ring.iter().any(|point| point.lon > 180.0));
        for pair in ring.windows(2) {
            assert!((pair[0].lon - pair[1].lon).abs() < 10.0);
        }
    }

    #[test]
    fn segment_count_has_a_floor() {
        assert_eq!(geodesic_ring(GeoPoint::new(0.0, 0.0), 1000.0, 2).len(), 9);
    }
}
