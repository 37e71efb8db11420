use crate::geo::point::GeoPoint;
use crate::prelude::{ArsenalError, ArsenalResult};
use crate::render::palette::Rgb;
use serde_json::Value;

/// Read-only country border drawn beneath the markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryOverlay {
    pub rings: Vec<Vec<GeoPoint>>,
}

/// Fetch lifecycle of the decorative overlay. `Failed` is terminal: the
/// overlay is simply not drawn.
#[derive(Debug, Clone, Default)]
pub enum OverlayState {
    #[default]
    Pending,
    Loaded(BoundaryOverlay),
    Failed,
}

impl OverlayState {
    pub fn overlay(&self) -> Option<&BoundaryOverlay> {
        match self {
            OverlayState::Loaded(overlay) => Some(overlay),
            _ => None,
        }
    }
}

pub struct BoundaryStyle;

impl BoundaryStyle {
    pub const STROKE: Rgb = Rgb::from_hex(0x0000ff);
    pub const STROKE_WIDTH: f32 = 1.0;
    pub const FILL: Rgb = Rgb::from_hex(0xebf0ff);
    pub const FILL_OPACITY: f32 = 0.1;
}

impl BoundaryOverlay {
    /// Parses Polygon and MultiPolygon rings from a GeoJSON document.
    ///
    /// Accepts a FeatureCollection, a single Feature or a bare geometry.
    /// Other geometry types are skipped.
    pub fn from_geojson(text: &str) -> ArsenalResult<Self> {
        let document: Value =
            serde_json::from_str(text).map_err(|e| ArsenalError::OverlayParse(e.to_string()))?;

        let mut rings = Vec::new();
        match document["type"].as_str() {
            Some("FeatureCollection") => {
                let features = document["features"].as_array().ok_or_else(|| {
                    ArsenalError::OverlayParse("feature collection without features".into())
                })?;
                for feature in features {
                    collect_geometry(&feature["geometry"], &mut rings);
                }
            }
            Some("Feature") => collect_geometry(&document["geometry"], &mut rings),
            Some(_) => collect_geometry(&document, &mut rings),
            None => {
                return Err(ArsenalError::OverlayParse(
                    "document has no GeoJSON type".into(),
                ))
            }
        }

        if rings.is_empty() {
            return Err(ArsenalError::OverlayParse("no polygon rings found".into()));
        }
        Ok(Self { rings })
    }

    pub fn point_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }
}

fn collect_geometry(geometry: &Value, rings: &mut Vec<Vec<GeoPoint>>) {
    match geometry["type"].as_str() {
        Some("Polygon") => collect_polygon(&geometry["coordinates"], rings),
        Some("MultiPolygon") => {
            if let Some(polygons) = geometry["coordinates"].as_array() {
                for polygon in polygons {
                    collect_polygon(polygon, rings);
                }
            }
        }
        Some("GeometryCollection") => {
            if let Some(geometries) = geometry["geometries"].as_array() {
                for inner in geometries {
                    collect_geometry(inner, rings);
                }
            }
        }
        _ => {}
    }
}

fn collect_polygon(polygon: &Value, rings: &mut Vec<Vec<GeoPoint>>) {
    let Some(polygon_rings) = polygon.as_array() else {
        return;
    };
    for ring in polygon_rings {
        if let Some(points) = ring_points(ring) {
            rings.push(points);
        }
    }
}

fn ring_points(ring: &Value) -> Option<Vec<GeoPoint>> {
    let points: Vec<GeoPoint> = ring
        .as_array()?
        .iter()
        .filter_map(|position| {
            let pair = position.as_array()?;
            Some(GeoPoint::new(pair.get(1)?.as_f64()?, pair.first()?.as_f64()?))
        })
        .collect();
    (points.len() >= 3).then_some(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feature_collection_with_multipolygon() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"name": "India"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[68.0, 23.0], [97.0, 28.0], [77.0, 8.0], [68.0, 23.0]]],
                        [[[92.5, 12.0], [93.0, 12.5], [92.8, 11.5], [92.5, 12.0]]]
                    ]
                }
            }]
        }"#;
        let overlay = BoundaryOverlay::from_geojson(text).unwrap();
        assert_eq!(overlay.rings.len(), 2);
        assert_eq!(overlay.rings[0][0], GeoPoint::new(23.0, 68.0));
        assert_eq!(overlay.point_count(), 8);
    }

    #[test]
    fn parses_bare_polygon_with_hole() {
        let text = r#"{
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                [[2, 2], [4, 2], [4, 4], [2, 2]]
            ]
        }"#;
        let overlay = BoundaryOverlay::from_geojson(text).unwrap();
        assert_eq!(overlay.rings.len(), 2);
    }

    #[test]
    fn rejects_documents_without_polygons() {
        let text = r#"{"type": "Feature", "geometry": {"type": "Point", "coordinates": [78, 20]}}"#;
        assert!(matches!(
            BoundaryOverlay::from_geojson(text),
            Err(ArsenalError::OverlayParse(_))
        ));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(BoundaryOverlay::from_geojson("<html>404</html>").is_err());
    }

    #[test]
    fn only_loaded_state_exposes_overlay() {
        assert!(OverlayState::Pending.overlay().is_none());
        assert!(OverlayState::Failed.overlay().is_none());
        let loaded = OverlayState::Loaded(BoundaryOverlay::default());
        assert!(loaded.overlay().is_some());
    }
}
