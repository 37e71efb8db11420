use crate::geo::point::GeoPoint;
use std::f64::consts::PI;

/// Edge length of a slippy-map raster tile in pixels.
pub const TILE_SIZE: f64 = 256.0;
/// Web Mercator is undefined at the poles; latitudes clamp here.
pub const MAX_LATITUDE: f64 = 85.051_128_78;
const MAX_TILE_ZOOM: f64 = 19.0;

// Zoom-0 world coordinates: both axes span [0, TILE_SIZE).

fn lon_to_x(lon: f64) -> f64 {
    (lon + 180.0) / 360.0 * TILE_SIZE
}

fn lat_to_y(lat: f64) -> f64 {
    let lat_rad = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * TILE_SIZE
}

fn x_to_lon(x: f64) -> f64 {
    x / TILE_SIZE * 360.0 - 180.0
}

fn y_to_lat(y: f64) -> f64 {
    let n = PI - 2.0 * PI * y / TILE_SIZE;
    n.sinh().atan().to_degrees()
}

fn wrap_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Size of the drawable map area in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn half(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Pixel position relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    /// Expands a `{z}/{x}/{y}` URL template.
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

/// Web Mercator camera: a center point and a fractional zoom level.
#[derive(Debug, Clone, PartialEq)]
pub struct MapCamera {
    center: GeoPoint,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl MapCamera {
    pub fn new(center: GeoPoint, zoom: f64, min_zoom: f64, max_zoom: f64) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        Self {
            center: GeoPoint::new(
                center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
                wrap_lon(center.lon),
            ),
            zoom: zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
        }
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    fn scale(&self) -> f64 {
        2f64.powf(self.zoom)
    }

    fn center_world(&self) -> (f64, f64) {
        (lon_to_x(self.center.lon), lat_to_y(self.center.lat))
    }

    fn set_center_world(&mut self, x: f64, y: f64) {
        let y = y.clamp(lat_to_y(MAX_LATITUDE), lat_to_y(-MAX_LATITUDE));
        self.center = GeoPoint::new(y_to_lat(y), x_to_lon(x));
    }

    pub fn project(&self, point: GeoPoint, viewport: Viewport) -> ScreenPoint {
        let (cx, cy) = self.center_world();
        let (half_w, half_h) = viewport.half();
        let scale = self.scale();
        ScreenPoint::new(
            half_w + (lon_to_x(point.lon) - cx) * scale,
            half_h + (lat_to_y(point.lat) - cy) * scale,
        )
    }

    /// Inverse of [`MapCamera::project`]. Longitudes stay continuous with the
    /// camera center, so points past the antimeridian read as e.g. 190.
    pub fn unproject(&self, screen: ScreenPoint, viewport: Viewport) -> GeoPoint {
        let (wx, wy) = self.screen_to_world(screen, viewport);
        GeoPoint::new(y_to_lat(wy), x_to_lon(wx))
    }

    fn screen_to_world(&self, screen: ScreenPoint, viewport: Viewport) -> (f64, f64) {
        let (cx, cy) = self.center_world();
        let (half_w, half_h) = viewport.half();
        let scale = self.scale();
        (
            cx + (screen.x - half_w) / scale,
            cy + (screen.y - half_h) / scale,
        )
    }

    /// Moves the map content by a pixel delta (drag direction).
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let (cx, cy) = self.center_world();
        let scale = self.scale();
        self.set_center_world(cx - dx / scale, cy - dy / scale);
    }

    /// Changes zoom by `delta` levels keeping the geo point under `anchor` fixed.
    pub fn zoom_around(&mut self, delta: f64, anchor: ScreenPoint, viewport: Viewport) {
        let target = (self.zoom + delta).clamp(self.min_zoom, self.max_zoom);
        if (target - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let (ax, ay) = self.screen_to_world(anchor, viewport);
        let (half_w, half_h) = viewport.half();
        self.zoom = target;
        let scale = self.scale();
        self.set_center_world(
            ax - (anchor.x - half_w) / scale,
            ay - (anchor.y - half_h) / scale,
        );
    }

    /// Integer zoom used for raster tiles at the current fractional zoom.
    pub fn tile_zoom(&self) -> u8 {
        self.zoom.floor().clamp(0.0, MAX_TILE_ZOOM) as u8
    }

    /// Tiles intersecting the viewport at [`MapCamera::tile_zoom`], with
    /// their screen rectangles. Columns repeat across world copies, so one
    /// `coord` may appear more than once at low zoom.
    pub fn visible_tiles(&self, viewport: Viewport) -> Vec<VisibleTile> {
        let z = self.tile_zoom();
        let count = 1i64 << z;
        let tile_world = TILE_SIZE / count as f64;
        let (cx, cy) = self.center_world();
        let (half_w, half_h) = viewport.half();
        let scale = self.scale();
        let (left, top) = self.screen_to_world(ScreenPoint::new(0.0, 0.0), viewport);
        let (right, bottom) =
            self.screen_to_world(ScreenPoint::new(viewport.width, viewport.height), viewport);

        let min_tx = (left / tile_world).floor() as i64;
        let max_tx = (right / tile_world).ceil() as i64 - 1;
        let min_ty = ((top / tile_world).floor() as i64).max(0);
        let max_ty = ((bottom / tile_world).ceil() as i64 - 1).min(count - 1);

        let mut tiles = Vec::new();
        for tx in min_tx..=max_tx {
            for ty in min_ty..=max_ty {
                tiles.push(VisibleTile {
                    coord: TileCoord {
                        x: tx.rem_euclid(count) as u32,
                        y: ty as u32,
                        z,
                    },
                    origin: ScreenPoint::new(
                        half_w + (tx as f64 * tile_world - cx) * scale,
                        half_h + (ty as f64 * tile_world - cy) * scale,
                    ),
                    edge: tile_world * scale,
                });
            }
        }
        tiles
    }
}

/// A tile placed on screen: `origin` is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleTile {
    pub coord: TileCoord,
    pub origin: ScreenPoint,
    pub edge: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport::new(800.0, 600.0);

    fn india() -> MapCamera {
        MapCamera::new(GeoPoint::new(22.0, 79.0), 5.0, 2.0, 18.0)
    }

    #[test]
    fn center_projects_to_viewport_middle() {
        let camera = india();
        let screen = camera.project(camera.center(), VIEW);
        assert!((screen.x - 400.0).abs() < 1e-6);
        assert!((screen.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn unproject_inverts_project() {
        let camera = india();
        let point = GeoPoint::new(20.0, 78.0);
        let back = camera.unproject(camera.project(point, VIEW), VIEW);
        assert!((back.lat - point.lat).abs() < 1e-9);
        assert!((back.lon - point.lon).abs() < 1e-9);
    }

    #[test]
    fn pan_moves_content_with_the_drag() {
        let mut camera = india();
        let before = camera.center();
        camera.pan_by(100.0, 0.0);
        assert!(camera.center().lon < before.lon);
        assert!((camera.center().lat - before.lat).abs() < 1e-9);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut camera = india();
        let anchor = ScreenPoint::new(650.0, 120.0);
        let geo_before = camera.unproject(anchor, VIEW);
        camera.zoom_around(1.5, anchor, VIEW);
        assert!((camera.zoom() - 6.5).abs() < 1e-9);
        let geo_after = camera.unproject(anchor, VIEW);
        assert!((geo_before.lat - geo_after.lat).abs() < 1e-9);
        assert!((geo_before.lon - geo_after.lon).abs() < 1e-9);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = india();
        camera.zoom_around(40.0, ScreenPoint::new(400.0, 300.0), VIEW);
        assert_eq!(camera.zoom(), 18.0);
        camera.zoom_around(-40.0, ScreenPoint::new(400.0, 300.0), VIEW);
        assert_eq!(camera.zoom(), 2.0);
    }

    #[test]
    fn visible_tiles_cover_viewport_within_world() {
        let camera = india();
        let tiles = camera.visible_tiles(VIEW);
        assert!(!tiles.is_empty());
        assert!(tiles
            .iter()
            .all(|tile| tile.coord.z == 5 && tile.coord.x < 32 && tile.coord.y < 32));
        let covers_center = tiles.iter().any(|tile| {
            tile.origin.x <= 400.0
                && tile.origin.x + tile.edge >= 400.0
                && tile.origin.y <= 300.0
                && tile.origin.y + tile.edge >= 300.0
        });
        assert!(covers_center);
    }

    #[test]
    fn click_past_antimeridian_projects_back_onto_the_click() {
        let camera = MapCamera::new(GeoPoint::new(0.0, 179.0), 2.0, 2.0, 18.0);
        let click = ScreenPoint::new(700.0, 300.0);
        let geo = camera.unproject(click, VIEW);
        assert!(geo.lon > 180.0);
        let screen = camera.project(geo, VIEW);
        assert!(screen.distance(click) < 1e-6);
    }

    #[test]
    fn pan_across_antimeridian_does_not_jump() {
        let mut camera = MapCamera::new(GeoPoint::new(0.0, 179.0), 4.0, 2.0, 18.0);
        let marker = GeoPoint::new(0.0, 178.0);
        let before = camera.project(marker, VIEW);
        camera.pan_by(-200.0, 0.0);
        assert!(camera.center().lon > 180.0);
        let after = camera.project(marker, VIEW);
        assert!((after.x - (before.x - 200.0)).abs() < 1e-6);
    }

    #[test]
    fn tiles_wrap_east_of_the_antimeridian() {
        let camera = MapCamera::new(GeoPoint::new(0.0, 179.0), 2.0, 2.0, 18.0);
        let tiles = camera.visible_tiles(VIEW);
        let east_edge = tiles
            .iter()
            .find(|tile| tile.origin.x <= 500.0 && tile.origin.x + tile.edge > 500.0)
            .unwrap();
        assert_eq!(east_edge.coord.x, 0);
        assert!(tiles.iter().all(|tile| tile.coord.x < 4));
    }

    #[test]
    fn tile_url_expands_template() {
        let tile = TileCoord { x: 22, y: 14, z: 5 };
        assert_eq!(
            tile.url("https://tile.openstreetmap.org/{z}/{x}/{y}.png"),
            "https://tile.openstreetmap.org/5/22/14.png"
        );
    }
}
