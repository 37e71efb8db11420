use crate::catalog::CatalogRecord;
use crate::geo::{BoundaryOverlay, GeoPoint, MapCamera, OverlayState, ScreenPoint, Viewport};
use crate::render::icon::{classify_platform, MarkerIcon};
use crate::render::palette::{category_color, Rgb};
use crate::session::{Command, MarkerId, Placements, Session};

/// Screen radius in pixels within which a click lands on a marker.
pub const MARKER_HIT_RADIUS: f64 = 18.0;

/// Visual primitive handed to a [`MapSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<'a> {
    Boundary(&'a BoundaryOverlay),
    RangeCircle {
        center: GeoPoint,
        radius_m: f64,
        color: Rgb,
    },
    Marker {
        id: &'a MarkerId,
        position: GeoPoint,
        icon: MarkerIcon,
        color: Rgb,
        record: &'a CatalogRecord,
    },
}

/// Rendering backend fed by [`MapAdapter::render`].
pub trait MapSurface {
    fn draw(&mut self, command: &DrawCommand<'_>);
}

/// Pointer gestures reported by the map backend.
#[derive(Debug, Clone, PartialEq)]
pub enum MapGesture {
    Click(GeoPoint),
    MarkerClick(MarkerId),
}

/// Bridges session state and the map backend in both directions.
pub struct MapAdapter;

impl MapAdapter {
    /// Draw order: boundary, then every range circle, then every marker.
    pub fn scene<'a>(placements: &'a Placements, overlay: &'a OverlayState) -> Vec<DrawCommand<'a>> {
        let mut commands = Vec::with_capacity(placements.len() * 2 + 1);
        if let Some(boundary) = overlay.overlay() {
            commands.push(DrawCommand::Boundary(boundary));
        }
        commands.extend(
            placements
                .iter()
                .filter(|marker| marker.record.has_coverage())
                .map(|marker| DrawCommand::RangeCircle {
                    center: marker.position,
                    radius_m: marker.record.range_meters(),
                    color: category_color(&marker.record.category),
                }),
        );
        commands.extend(placements.iter().map(|marker| DrawCommand::Marker {
            id: &marker.id,
            position: marker.position,
            icon: classify_platform(marker.record.launch_platforms.as_deref()),
            color: category_color(&marker.record.category),
            record: &marker.record,
        }));
        commands
    }

    pub fn render<S: MapSurface>(session: &Session, overlay: &OverlayState, surface: &mut S) {
        for command in Self::scene(session.placements(), overlay) {
            surface.draw(&command);
        }
    }

    pub fn translate(gesture: MapGesture) -> Command {
        match gesture {
            MapGesture::Click(position) => Command::PlaceAt(position),
            MapGesture::MarkerClick(id) => Command::Remove(id),
        }
    }

    /// Topmost marker under `screen`, if any. Later markers draw on top.
    pub fn marker_at<'a>(
        placements: &'a Placements,
        camera: &MapCamera,
        viewport: Viewport,
        screen: ScreenPoint,
    ) -> Option<&'a MarkerId> {
        placements
            .iter()
            .rev()
            .find(|marker| {
                camera.project(marker.position, viewport).distance(screen) <= MARKER_HIT_RADIUS
            })
            .map(|marker| &marker.id)
    }

    /// Resolves a click: a marker under the pointer swallows the map click.
    pub fn gesture_at(
        placements: &Placements,
        camera: &MapCamera,
        viewport: Viewport,
        screen: ScreenPoint,
    ) -> MapGesture {
        match Self::marker_at(placements, camera, viewport, screen) {
            Some(id) => MapGesture::MarkerClick(id.clone()),
            None => MapGesture::Click(camera.unproject(screen, viewport)),
        }
    }
}
