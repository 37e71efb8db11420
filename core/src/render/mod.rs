pub mod adapter;
pub mod icon;
pub mod palette;

pub use adapter::{DrawCommand, MapAdapter, MapGesture, MapSurface};
pub use icon::{classify_platform, MarkerIcon};
pub use palette::{category_color, Rgb, CATEGORY_COLORS, DEFAULT_COLOR};
