//! Catalog, session state and map adapter for the missile arsenal viewer.
//!
//! Everything here is GUI-agnostic: the viewer binary owns a [`Session`],
//! feeds it typed commands and replays the draw commands produced by
//! [`render::MapAdapter`] onto its own surface.

pub mod catalog;
pub mod geo;
pub mod prelude;
pub mod render;
pub mod session;
pub mod telemetry;

pub use prelude::{ArsenalError, ArsenalResult, LayoutConfig};
pub use session::{Command, Session};
