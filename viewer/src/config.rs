use anyhow::Context;
use arsenalcore::geo::{GeoPoint, MapCamera};
use arsenalcore::LayoutConfig;
use serde::{Deserialize, Serialize};

const EMBEDDED_CONFIG: &str = include_str!("../config/viewer.yaml");

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub compact_breakpoint: f32,
    pub window: WindowConfig,
    pub map: MapConfig,
    pub tiles: TileConfig,
    pub boundary: BoundaryConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub circle_segments: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    pub url_template: String,
    pub user_agent: String,
    pub cache_capacity: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// GeoJSON border drawn under the markers; absent disables the overlay.
    pub url: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            compact_breakpoint: 768.0,
            window: WindowConfig::default(),
            map: MapConfig::default(),
            tiles: TileConfig::default(),
            boundary: BoundaryConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: 22.0,
            center_lon: 79.0,
            zoom: 5.0,
            min_zoom: 2.0,
            max_zoom: 18.0,
            circle_segments: 128,
        }
    }
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            user_agent: "arsenal-viewer/0.1".into(),
            cache_capacity: 256,
        }
    }
}

impl ViewerConfig {
    /// Configuration compiled into the binary.
    pub fn embedded() -> anyhow::Result<Self> {
        Self::parse(EMBEDDED_CONFIG).context("parsing embedded viewer config")
    }

    pub fn parse(yaml: &str) -> anyhow::Result<Self> {
        let config: ViewerConfig =
            serde_yaml::from_str(yaml).context("decoding viewer config YAML")?;
        anyhow::ensure!(
            config.compact_breakpoint >= 0.0,
            "compact_breakpoint must not be negative"
        );
        anyhow::ensure!(
            config.tiles.cache_capacity > 0,
            "tiles.cache_capacity must be positive"
        );
        Ok(config)
    }

    pub fn to_layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            compact_breakpoint: self.compact_breakpoint,
            initial_width: self.window.width,
        }
    }

    pub fn camera(&self) -> MapCamera {
        MapCamera::new(
            GeoPoint::new(self.map.center_lat, self.map.center_lon),
            self.map.zoom,
            self.map.min_zoom,
            self.map.max_zoom,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = ViewerConfig::embedded().unwrap();
        assert_eq!(config.compact_breakpoint, 768.0);
        assert!(config.boundary.url.is_some());
        assert_eq!(config.to_layout_config().initial_width, config.window.width);
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let config = ViewerConfig::parse("compact_breakpoint: 900\nmap:\n  zoom: 7\n").unwrap();
        assert_eq!(config.compact_breakpoint, 900.0);
        assert_eq!(config.map.zoom, 7.0);
        assert_eq!(config.map.center_lat, 22.0);
        assert!(config.boundary.url.is_none());
        assert_eq!(config.tiles.cache_capacity, 256);
    }

    #[test]
    fn camera_starts_at_configured_center() {
        let config = ViewerConfig::default();
        let camera = config.camera();
        assert_eq!(camera.center(), GeoPoint::new(22.0, 79.0));
        assert_eq!(camera.zoom(), 5.0);
    }

    #[test]
    fn zero_tile_cache_is_rejected() {
        assert!(ViewerConfig::parse("tiles:\n  cache_capacity: 0\n").is_err());
    }
}
