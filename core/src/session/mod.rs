//! Session-scoped UI state: filter, selection, placements and layout flags.

pub mod layout;
pub mod placement;
pub mod state;

pub use layout::LayoutState;
pub use placement::{MarkerId, MarkerIdGenerator, PlacedMarker, Placements};
pub use state::{Command, Session, NO_MATCHES_MESSAGE};
