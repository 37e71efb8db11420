use crate::tiles::TileCache;
use crate::Message;
use arsenalcore::catalog::CatalogRecord;
use arsenalcore::geo::{
    geodesic_ring, BoundaryStyle, GeoPoint, MapCamera, OverlayState, ScreenPoint, Viewport,
};
use arsenalcore::render::{DrawCommand, MapAdapter, MapSurface, MarkerIcon, Rgb, CATEGORY_COLORS};
use arsenalcore::session::MarkerId;
use arsenalcore::Session;
use iced::{
    mouse,
    widget::canvas::{self, Action, Event, Frame, Geometry, Path, Stroke, Text},
    Color, Pixels, Point, Rectangle, Renderer, Size, Theme,
};

/// Pointer travel (pixels) below which a press/release pair is a click.
const DRAG_THRESHOLD: f32 = 4.0;
const ICON_RADIUS: f32 = 14.0;
const LEGEND_WIDTH: f32 = 200.0;
const LEGEND_HEADER: f32 = 26.0;
const LEGEND_ROW: f32 = 18.0;
const LEGEND_MARGIN_X: f32 = 10.0;
const LEGEND_MARGIN_BOTTOM: f32 = 30.0;
const PANEL_BG: Color = Color::from_rgba(40.0 / 255.0, 44.0 / 255.0, 52.0 / 255.0, 0.9);

pub fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.r, rgb.g, rgb.b)
}

fn with_alpha(color: Color, a: f32) -> Color {
    Color { a, ..color }
}

fn viewport_of(size: Size) -> Viewport {
    Viewport::new(size.width as f64, size.height as f64)
}

fn to_screen(point: Point) -> ScreenPoint {
    ScreenPoint::new(point.x as f64, point.y as f64)
}

fn to_point(screen: ScreenPoint) -> Point {
    Point::new(screen.x as f32, screen.y as f32)
}

/// Legend header and full panel rectangles for a map of `size`.
fn legend_rects(size: Size, compact: bool, expanded: bool) -> (Rectangle, Rectangle) {
    let body = if expanded {
        CATEGORY_COLORS.len() as f32 * LEGEND_ROW + 8.0
    } else {
        0.0
    };
    let height = LEGEND_HEADER + body;
    let x = if compact {
        LEGEND_MARGIN_X
    } else {
        size.width - LEGEND_WIDTH - LEGEND_MARGIN_X
    };
    let y = size.height - height - LEGEND_MARGIN_BOTTOM;
    let panel = Rectangle::new(Point::new(x, y), Size::new(LEGEND_WIDTH, height));
    let header = Rectangle::new(Point::new(x, y), Size::new(LEGEND_WIDTH, LEGEND_HEADER));
    (header, panel)
}

/// Map canvas over the session's placements.
pub struct MapView<'a> {
    pub session: &'a Session,
    pub camera: &'a MapCamera,
    pub tiles: &'a TileCache,
    pub overlay: &'a OverlayState,
    pub circle_segments: usize,
}

#[derive(Debug, Default)]
pub struct Interaction {
    press: Option<Point>,
    last: Option<Point>,
    dragging: bool,
    known_size: Option<Size>,
}

impl canvas::Program<Message> for MapView<'_> {
    type State = Interaction;

    fn update(
        &self,
        state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        if state.known_size != Some(bounds.size()) {
            state.known_size = Some(bounds.size());
            return Some(Action::publish(Message::MapResized(bounds.size())));
        }

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                state.press = Some(position);
                state.last = Some(position);
                state.dragging = false;
                Some(Action::capture())
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let press = state.press?;
                let position = cursor.position_from(bounds.position())?;
                if !state.dragging && position.distance(press) < DRAG_THRESHOLD {
                    return None;
                }
                state.dragging = true;
                let last = state.last.replace(position).unwrap_or(position);
                Some(Action::publish(Message::MapPanned(position - last)).and_capture())
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let press = state.press.take()?;
                state.last = None;
                if std::mem::take(&mut state.dragging) {
                    return Some(Action::capture());
                }
                let position = cursor.position_in(bounds).unwrap_or(press);
                let layout = self.session.layout();
                let (header, panel) =
                    legend_rects(bounds.size(), layout.is_compact(), layout.legend_expanded());
                if header.contains(position) {
                    return Some(Action::publish(Message::LegendToggled).and_capture());
                }
                if panel.contains(position) {
                    return Some(Action::capture());
                }
                let gesture = MapAdapter::gesture_at(
                    self.session.placements(),
                    self.camera,
                    viewport_of(bounds.size()),
                    to_screen(position),
                );
                Some(Action::publish(Message::MapGesture(gesture)).and_capture())
            }
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let position = cursor.position_in(bounds)?;
                let levels = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => *y * 0.5,
                    mouse::ScrollDelta::Pixels { y, .. } => *y / 120.0,
                };
                Some(
                    Action::publish(Message::MapZoomed {
                        delta: levels,
                        anchor: position,
                    })
                    .and_capture(),
                )
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let viewport = viewport_of(bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.08, 0.09, 0.11),
        );

        self.draw_tiles(&mut frame, viewport);

        let hovered = cursor.position_in(bounds).and_then(|position| {
            MapAdapter::marker_at(
                self.session.placements(),
                self.camera,
                viewport,
                to_screen(position),
            )
        });
        let mut surface = CanvasSurface {
            frame: &mut frame,
            camera: self.camera,
            viewport,
            circle_segments: self.circle_segments,
            hovered,
            tooltip: None,
        };
        MapAdapter::render(self.session, self.overlay, &mut surface);
        if let Some((anchor, record)) = surface.tooltip.take() {
            draw_tooltip(&mut frame, bounds.size(), anchor, &record);
        }

        self.draw_hint(&mut frame, bounds.size());
        self.draw_legend(&mut frame, bounds.size());
        draw_label(
            &mut frame,
            "© OpenStreetMap contributors",
            Point::new(bounds.width - 180.0, bounds.height - 18.0),
            11.0,
            Color::from_rgb(0.85, 0.85, 0.85),
        );

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.dragging {
            return mouse::Interaction::Grabbing;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        let over_marker = MapAdapter::marker_at(
            self.session.placements(),
            self.camera,
            viewport_of(bounds.size()),
            to_screen(position),
        )
        .is_some();
        if over_marker {
            mouse::Interaction::Pointer
        } else if self.session.selected().is_some() {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::Grab
        }
    }
}

impl MapView<'_> {
    fn draw_tiles(&self, frame: &mut Frame, viewport: Viewport) {
        for tile in self.camera.visible_tiles(viewport) {
            let edge = tile.edge as f32;
            let rect = Rectangle::new(to_point(tile.origin), Size::new(edge, edge));
            match self.tiles.get(&tile.coord) {
                Some(handle) => frame.draw_image(rect, handle),
                None => frame.fill_rectangle(
                    rect.position(),
                    rect.size(),
                    Color::from_rgb(0.12, 0.13, 0.15),
                ),
            }
        }
    }

    fn draw_hint(&self, frame: &mut Frame, size: Size) {
        let hint = match self.session.selected() {
            Some(record) => format!("Click the map to place {}", record.name),
            None => "Select a missile from the list to place it".to_string(),
        };
        let width = hint.chars().count() as f32 * 7.2 + 24.0;
        let origin = Point::new((size.width - width) / 2.0, 10.0);
        frame.fill_rectangle(origin, Size::new(width, 26.0), PANEL_BG);
        draw_label(
            frame,
            &hint,
            Point::new(origin.x + 12.0, origin.y + 6.0),
            13.0,
            Color::WHITE,
        );
    }

    fn draw_legend(&self, frame: &mut Frame, size: Size) {
        let layout = self.session.layout();
        let expanded = layout.legend_expanded();
        let (header, panel) = legend_rects(size, layout.is_compact(), expanded);
        frame.fill_rectangle(panel.position(), panel.size(), PANEL_BG);
        draw_label(
            frame,
            "Missile Types",
            Point::new(header.x + 10.0, header.y + 6.0),
            13.0,
            Color::WHITE,
        );
        draw_label(
            frame,
            if expanded { "[-]" } else { "[+]" },
            Point::new(header.x + header.width - 30.0, header.y + 6.0),
            13.0,
            Color::WHITE,
        );
        if !expanded {
            return;
        }

        for (row, (category, rgb)) in CATEGORY_COLORS.iter().enumerate() {
            let y = header.y + LEGEND_HEADER + row as f32 * LEGEND_ROW + 4.0;
            let dot = Path::circle(Point::new(header.x + 16.0, y + 7.0), 6.0);
            frame.fill(&dot, to_color(*rgb));
            draw_label(
                frame,
                category,
                Point::new(header.x + 30.0, y),
                12.0,
                Color::WHITE,
            );
        }
    }
}

struct CanvasSurface<'f> {
    frame: &'f mut Frame,
    camera: &'f MapCamera,
    viewport: Viewport,
    circle_segments: usize,
    hovered: Option<&'f MarkerId>,
    /// Filled while drawing the hovered marker; painted above everything.
    tooltip: Option<(Point, CatalogRecord)>,
}

impl CanvasSurface<'_> {
    fn ring_path(&self, ring: &[GeoPoint]) -> Path {
        Path::new(|builder| {
            for (index, point) in ring.iter().enumerate() {
                let screen = to_point(self.camera.project(*point, self.viewport));
                if index == 0 {
                    builder.move_to(screen);
                } else {
                    builder.line_to(screen);
                }
            }
            builder.close();
        })
    }
}

impl MapSurface for CanvasSurface<'_> {
    fn draw(&mut self, command: &DrawCommand<'_>) {
        match command {
            DrawCommand::Boundary(overlay) => {
                let fill = with_alpha(to_color(BoundaryStyle::FILL), BoundaryStyle::FILL_OPACITY);
                let stroke = Stroke::default()
                    .with_width(BoundaryStyle::STROKE_WIDTH)
                    .with_color(to_color(BoundaryStyle::STROKE));
                for ring in &overlay.rings {
                    let path = self.ring_path(ring);
                    self.frame.fill(&path, fill);
                    self.frame.stroke(&path, stroke);
                }
            }
            DrawCommand::RangeCircle {
                center,
                radius_m,
                color,
            } => {
                let ring = geodesic_ring(*center, *radius_m, self.circle_segments);
                let path = self.ring_path(&ring);
                let color = to_color(*color);
                self.frame.fill(&path, with_alpha(color, 0.2));
                self.frame
                    .stroke(&path, Stroke::default().with_width(2.0).with_color(color));
            }
            DrawCommand::Marker {
                id,
                position,
                icon,
                color,
                record,
            } => {
                let center = to_point(self.camera.project(*position, self.viewport));
                draw_icon(self.frame, center, *icon, to_color(*color));
                if self.hovered == Some(*id) {
                    self.tooltip = Some((center, (*record).clone()));
                }
            }
        }
    }
}

fn draw_label(frame: &mut Frame, content: &str, position: Point, size: f32, color: Color) {
    frame.fill_text(Text {
        content: content.to_string(),
        position,
        color,
        size: Pixels(size),
        ..Text::default()
    });
}

fn polygon(points: &[Point]) -> Path {
    Path::new(|builder| {
        if let Some((first, rest)) = points.split_first() {
            builder.move_to(*first);
            for point in rest {
                builder.line_to(*point);
            }
            builder.close();
        }
    })
}

fn polyline(points: &[Point]) -> Path {
    Path::new(|builder| {
        if let Some((first, rest)) = points.split_first() {
            builder.move_to(*first);
            for point in rest {
                builder.line_to(*point);
            }
        }
    })
}

/// Badge in the category color with a platform glyph on top.
fn draw_icon(frame: &mut Frame, center: Point, icon: MarkerIcon, accent: Color) {
    let badge = Path::circle(center, ICON_RADIUS);
    frame.fill(&badge, Color::from_rgba(1.0, 1.0, 1.0, 0.92));
    frame.stroke(&badge, Stroke::default().with_width(2.5).with_color(accent));

    let ink = Color::from_rgb(0.12, 0.12, 0.14);
    let line = Stroke::default().with_width(2.0).with_color(ink);
    let (x, y) = (center.x, center.y);

    match icon {
        MarkerIcon::Aircraft => {
            frame.fill(
                &polygon(&[
                    Point::new(x, y - 9.0),
                    Point::new(x + 2.0, y + 8.0),
                    Point::new(x - 2.0, y + 8.0),
                ]),
                ink,
            );
            frame.stroke(
                &polyline(&[Point::new(x - 9.0, y + 1.0), Point::new(x + 9.0, y + 1.0)]),
                line,
            );
            frame.stroke(
                &polyline(&[Point::new(x - 4.0, y + 7.0), Point::new(x + 4.0, y + 7.0)]),
                line,
            );
        }
        MarkerIcon::Submarine => {
            frame.fill_rectangle(Point::new(x - 9.0, y - 1.0), Size::new(18.0, 6.0), ink);
            frame.fill(&Path::circle(Point::new(x - 9.0, y + 2.0), 3.0), ink);
            frame.fill(&Path::circle(Point::new(x + 9.0, y + 2.0), 3.0), ink);
            frame.fill_rectangle(Point::new(x - 2.0, y - 6.0), Size::new(5.0, 5.0), ink);
        }
        MarkerIcon::Ship => {
            frame.fill(
                &polygon(&[
                    Point::new(x - 10.0, y + 1.0),
                    Point::new(x + 10.0, y + 1.0),
                    Point::new(x + 6.0, y + 7.0),
                    Point::new(x - 6.0, y + 7.0),
                ]),
                ink,
            );
            frame.stroke(
                &polyline(&[Point::new(x, y + 1.0), Point::new(x, y - 8.0)]),
                line,
            );
            frame.fill(
                &polygon(&[
                    Point::new(x + 1.0, y - 8.0),
                    Point::new(x + 7.0, y - 2.0),
                    Point::new(x + 1.0, y - 2.0),
                ]),
                ink,
            );
        }
        MarkerIcon::MobileLauncher => {
            frame.fill_rectangle(Point::new(x - 10.0, y), Size::new(20.0, 5.0), ink);
            frame.fill(&Path::circle(Point::new(x - 6.0, y + 7.0), 2.5), ink);
            frame.fill(&Path::circle(Point::new(x + 6.0, y + 7.0), 2.5), ink);
            frame.stroke(
                &polyline(&[Point::new(x - 6.0, y - 1.0), Point::new(x + 8.0, y - 9.0)]),
                Stroke::default().with_width(3.0).with_color(ink),
            );
        }
        MarkerIcon::ShoulderFired => {
            frame.fill(&Path::circle(Point::new(x - 3.0, y - 6.0), 3.0), ink);
            frame.stroke(
                &polyline(&[Point::new(x - 3.0, y - 3.0), Point::new(x - 3.0, y + 9.0)]),
                line,
            );
            frame.stroke(
                &polyline(&[Point::new(x - 9.0, y + 1.0), Point::new(x + 10.0, y - 6.0)]),
                Stroke::default().with_width(3.0).with_color(ink),
            );
        }
        MarkerIcon::GroundSystem => {
            let dish: Vec<Point> = (0..=12)
                .map(|step| {
                    let angle = std::f32::consts::PI * step as f32 / 12.0;
                    Point::new(x + 8.0 * angle.cos(), y - 1.0 + 6.0 * angle.sin())
                })
                .collect();
            frame.stroke(&polyline(&dish), line);
            frame.stroke(
                &polyline(&[Point::new(x, y + 5.0), Point::new(x, y + 9.0)]),
                line,
            );
            frame.stroke(
                &polyline(&[Point::new(x - 5.0, y + 9.0), Point::new(x + 5.0, y + 9.0)]),
                line,
            );
        }
        MarkerIcon::Default => {
            frame.fill(&Path::circle(Point::new(x, y - 3.0), 5.0), accent);
            frame.fill(
                &polygon(&[
                    Point::new(x - 4.0, y),
                    Point::new(x + 4.0, y),
                    Point::new(x, y + 9.0),
                ]),
                accent,
            );
            frame.fill(&Path::circle(Point::new(x, y - 3.0), 2.0), Color::WHITE);
        }
    }
}

fn draw_tooltip(frame: &mut Frame, size: Size, anchor: Point, record: &CatalogRecord) {
    let mut lines = vec![
        format!("Type: {}", record.category),
        format!("Range: {} km", record.range),
    ];
    if let Some(platform) = &record.launch_platforms {
        lines.push(format!("Platform: {}", platform));
    }
    lines.push("Click to remove marker".to_string());

    let widest = lines
        .iter()
        .map(|line| line.chars().count())
        .chain(std::iter::once(record.name.chars().count()))
        .max()
        .unwrap_or(0);
    let width = widest as f32 * 7.0 + 20.0;
    let height = 26.0 + lines.len() as f32 * 17.0 + 8.0;
    let x = (anchor.x + ICON_RADIUS + 6.0).min(size.width - width - 4.0).max(4.0);
    let y = (anchor.y - height / 2.0).clamp(4.0, (size.height - height - 4.0).max(4.0));

    frame.fill_rectangle(Point::new(x, y), Size::new(width, height), PANEL_BG);
    draw_label(frame, &record.name, Point::new(x + 10.0, y + 8.0), 15.0, Color::WHITE);
    for (index, line) in lines.iter().enumerate() {
        let color = if index + 1 == lines.len() {
            Color::from_rgb(0.94, 0.45, 0.45)
        } else {
            Color::from_rgb(0.9, 0.9, 0.9)
        };
        draw_label(
            frame,
            line,
            Point::new(x + 10.0, y + 30.0 + index as f32 * 17.0),
            12.0,
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_sits_bottom_right_on_wide_layouts() {
        let size = Size::new(1000.0, 700.0);
        let (header, panel) = legend_rects(size, false, true);
        assert_eq!(header.x, 1000.0 - LEGEND_WIDTH - LEGEND_MARGIN_X);
        assert_eq!(panel.y + panel.height, 700.0 - LEGEND_MARGIN_BOTTOM);
        assert!(panel.height > header.height);
    }

    #[test]
    fn collapsed_compact_legend_is_header_only_on_the_left() {
        let (header, panel) = legend_rects(Size::new(400.0, 700.0), true, false);
        assert_eq!(header.x, LEGEND_MARGIN_X);
        assert_eq!(panel.height, header.height);
    }

    #[test]
    fn palette_converts_to_iced_color() {
        let color = to_color(Rgb::from_hex(0xff0000));
        assert_eq!(color, Color::from_rgb8(255, 0, 0));
    }
}
