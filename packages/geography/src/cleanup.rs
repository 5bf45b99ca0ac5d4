//! Geometry cleanup applied to county boundaries on load.
//!
//! Upstream shapefile exports contain degenerate rings and mixed winding
//! orders. Every boundary is reduced to polygons with a real exterior
//! ring and re-oriented to the `GeoJSON` convention (exterior
//! counter-clockwise, holes clockwise) so map renderers fill them
//! consistently.

use geo::orient::{Direction, Orient};
use geo::{Area, LineString, MultiPolygon, Polygon};

/// Minimum number of positions in a closed ring (a triangle plus the
/// closing position).
const MIN_RING_POSITIONS: usize = 4;

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
///
/// Handles both `Polygon` and `MultiPolygon` geometry types; anything else
/// yields `None`.
#[must_use]
pub fn to_multipolygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geometry: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geometry {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

/// Drops degenerate rings and polygons, then orients what is left.
#[must_use]
pub fn clean_multipolygon(multi_polygon: MultiPolygon<f64>) -> MultiPolygon<f64> {
    let before = multi_polygon.0.len();
    let polygons: Vec<Polygon<f64>> = multi_polygon
        .into_iter()
        .filter_map(clean_polygon)
        .collect();

    if polygons.len() < before {
        log::debug!(
            "Dropped {} degenerate polygon(s) during cleanup",
            before - polygons.len()
        );
    }

    MultiPolygon::new(polygons).orient(Direction::Default)
}

fn clean_polygon(polygon: Polygon<f64>) -> Option<Polygon<f64>> {
    let (exterior, interiors) = polygon.into_inner();
    if !is_usable_ring(&exterior) {
        return None;
    }

    let interiors = interiors.into_iter().filter(is_usable_ring).collect();
    let polygon = Polygon::new(exterior, interiors);

    (polygon.unsigned_area() > 0.0).then_some(polygon)
}

fn is_usable_ring(ring: &LineString<f64>) -> bool {
    ring.0.len() >= MIN_RING_POSITIONS && ring.0.iter().all(|c| c.x.is_finite() && c.y.is_finite())
}
