//! Geographic helpers used by the map adapter and the viewer's canvas.

pub mod boundary;
pub mod circle;
pub mod point;
pub mod projection;

pub use boundary::{BoundaryOverlay, BoundaryStyle, OverlayState};
pub use circle::geodesic_ring;
pub use point::GeoPoint;
pub use projection::{MapCamera, ScreenPoint, TileCoord, Viewport, VisibleTile, TILE_SIZE};
