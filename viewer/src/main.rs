mod config;
mod map_view;
mod net;
mod sidebar;
mod tiles;

use anyhow::Context;
use arsenalcore::catalog::{Catalog, Filter, RecordKey};
use arsenalcore::geo::{BoundaryOverlay, MapCamera, OverlayState, ScreenPoint, TileCoord, Viewport};
use arsenalcore::render::{MapAdapter, MapGesture};
use arsenalcore::{Command, Session};
use config::ViewerConfig;
use iced::{
    widget::{column, row, Canvas},
    window, Element, Length, Point, Size, Subscription, Task, Theme, Vector,
};
use log::{debug, error, info};
use map_view::MapView;
use tiles::TileCache;

const SIDEBAR_WIDTH: f32 = 340.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::embedded()?;
    let catalog = Catalog::embedded().context("loading embedded missile catalog")?;
    info!(
        "loaded {} catalog records in {} categories",
        catalog.len(),
        catalog.categories().len()
    );

    let window_size = Size::new(config.window.width, config.window.height);
    iced::application(
        move || Viewer::boot(config.clone(), catalog.clone()),
        Viewer::update,
        Viewer::view,
    )
    .title(application_title)
    .subscription(application_subscription)
    .theme(application_theme)
    .window_size(window_size)
    .run()?;
    Ok(())
}

fn application_title(_: &Viewer) -> String {
    "Indian Missile Arsenal".into()
}

fn application_subscription(_: &Viewer) -> Subscription<Message> {
    window::resize_events().map(|(_, size)| Message::WindowResized(size))
}

fn application_theme(_: &Viewer) -> Theme {
    Theme::Dark
}

struct Viewer {
    config: ViewerConfig,
    session: Session,
    camera: MapCamera,
    viewport: Option<Viewport>,
    tiles: TileCache,
    overlay: OverlayState,
    client: reqwest::Client,
}

#[derive(Debug, Clone)]
pub enum Message {
    FilterChanged(Filter),
    RecordSelected(RecordKey),
    MapGesture(MapGesture),
    ClearAll,
    PanelToggled,
    InstructionsToggled,
    LegendToggled,
    WindowResized(Size),
    MapResized(Size),
    MapPanned(Vector),
    MapZoomed { delta: f32, anchor: Point },
    TileFetched(TileCoord, Result<Vec<u8>, String>),
    BoundaryFetched(Result<BoundaryOverlay, String>),
}

impl Viewer {
    fn boot(config: ViewerConfig, catalog: Catalog) -> (Self, Task<Message>) {
        let client = net::http_client(&config.tiles.user_agent);
        let session = Session::new(catalog, &config.to_layout_config());

        let (overlay, task) = match config.boundary.url.clone() {
            Some(url) => (
                OverlayState::Pending,
                Task::perform(
                    net::fetch_boundary(client.clone(), url),
                    Message::BoundaryFetched,
                ),
            ),
            None => {
                info!("boundary overlay disabled");
                (OverlayState::Failed, Task::none())
            }
        };

        (
            Viewer {
                camera: config.camera(),
                tiles: TileCache::new(config.tiles.cache_capacity),
                config,
                session,
                viewport: None,
                overlay,
                client,
            },
            task,
        )
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::FilterChanged(filter) => state.dispatch(Command::SetFilter(filter)),
            Message::RecordSelected(key) => state.dispatch(Command::Select(Some(key))),
            Message::MapGesture(gesture) => state.dispatch(MapAdapter::translate(gesture)),
            Message::ClearAll => state.dispatch(Command::ClearAll),
            Message::PanelToggled => state.dispatch(Command::TogglePanel),
            Message::InstructionsToggled => state.dispatch(Command::ToggleInstructions),
            Message::LegendToggled => state.dispatch(Command::ToggleLegend),
            Message::WindowResized(size) => state.dispatch(Command::ViewportResized(size.width)),
            Message::MapResized(size) => {
                state.viewport = Some(Viewport::new(size.width as f64, size.height as f64));
                state.request_visible_tiles()
            }
            Message::MapPanned(delta) => {
                state.camera.pan_by(delta.x as f64, delta.y as f64);
                state.request_visible_tiles()
            }
            Message::MapZoomed { delta, anchor } => {
                if let Some(viewport) = state.viewport {
                    state.camera.zoom_around(
                        delta as f64,
                        ScreenPoint::new(anchor.x as f64, anchor.y as f64),
                        viewport,
                    );
                }
                state.request_visible_tiles()
            }
            Message::TileFetched(coord, result) => {
                state.tiles.complete(coord, result);
                Task::none()
            }
            Message::BoundaryFetched(Ok(overlay)) => {
                info!(
                    "boundary overlay loaded: {} rings / {} points",
                    overlay.rings.len(),
                    overlay.point_count()
                );
                state.overlay = OverlayState::Loaded(overlay);
                Task::none()
            }
            Message::BoundaryFetched(Err(err)) => {
                error!("Error loading India boundary: {err}");
                state.overlay = OverlayState::Failed;
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let layout = state.session.layout();
        let map = Canvas::new(MapView {
            session: &state.session,
            camera: &state.camera,
            tiles: &state.tiles,
            overlay: &state.overlay,
            circle_segments: state.config.map.circle_segments,
        })
        .width(Length::Fill)
        .height(Length::Fill);

        if !layout.is_compact() {
            return row![sidebar::view(&state.session, Length::Fixed(SIDEBAR_WIDTH)), map].into();
        }
        if layout.panel_shown() {
            return sidebar::view(&state.session, Length::Fill);
        }
        column![sidebar::toggle_bar(&state.session), map].into()
    }

    fn dispatch(&mut self, command: Command) -> Task<Message> {
        self.session.dispatch(command);
        Task::none()
    }

    fn request_visible_tiles(&mut self) -> Task<Message> {
        let Some(viewport) = self.viewport else {
            return Task::none();
        };
        let wanted: Vec<TileCoord> = self
            .camera
            .visible_tiles(viewport)
            .into_iter()
            .map(|tile| tile.coord)
            .collect();
        let missing = self.tiles.claim_missing(&wanted);
        if !missing.is_empty() {
            debug!(
                "requesting {} tiles ({} cached, {} in flight)",
                missing.len(),
                self.tiles.len(),
                self.tiles.pending()
            );
        }
        Task::batch(missing.into_iter().map(|coord| {
            let url = coord.url(&self.config.tiles.url_template);
            Task::perform(net::fetch_tile(self.client.clone(), url), move |result| {
                Message::TileFetched(coord, result)
            })
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arsenalcore::geo::GeoPoint;

    fn viewer() -> Viewer {
        let mut config = ViewerConfig::default();
        config.boundary.url = None;
        let catalog = Catalog::embedded().unwrap();
        Viewer::boot(config, catalog).0
    }

    #[test]
    fn boot_without_boundary_url_skips_overlay() {
        let viewer = viewer();
        assert!(matches!(viewer.overlay, OverlayState::Failed));
        assert!(viewer.session.selected().is_none());
        assert!(viewer.viewport.is_none());
    }

    #[test]
    fn click_after_selection_places_marker() {
        let mut viewer = viewer();
        let key = viewer.session.catalog().records()[0].key();
        let _ = Viewer::update(&mut viewer, Message::RecordSelected(key));
        let _ = Viewer::update(
            &mut viewer,
            Message::MapGesture(MapGesture::Click(GeoPoint::new(20.0, 78.0))),
        );
        assert_eq!(viewer.session.placements().len(), 1);

        let id = viewer.session.placements().iter().next().unwrap().id.clone();
        let _ = Viewer::update(&mut viewer, Message::MapGesture(MapGesture::MarkerClick(id)));
        assert!(viewer.session.placements().is_empty());
    }

    #[test]
    fn narrow_window_switches_to_compact_layout() {
        let mut viewer = viewer();
        assert!(!viewer.session.layout().is_compact());
        let _ = Viewer::update(&mut viewer, Message::WindowResized(Size::new(500.0, 800.0)));
        assert!(viewer.session.layout().is_compact());
        assert!(!viewer.session.layout().legend_expanded());
    }

    #[test]
    fn failed_boundary_fetch_does_not_block_placement() {
        let mut viewer = viewer();
        let _ = Viewer::update(&mut viewer, Message::BoundaryFetched(Err("offline".into())));
        assert!(viewer.overlay.overlay().is_none());

        let key = viewer.session.catalog().records()[0].key();
        let _ = Viewer::update(&mut viewer, Message::RecordSelected(key.clone()));
        let _ = Viewer::update(
            &mut viewer,
            Message::MapGesture(MapGesture::Click(GeoPoint::new(28.6, 77.2))),
        );
        let marker = viewer.session.placements().iter().next().unwrap();
        assert_eq!(marker.position, GeoPoint::new(28.6, 77.2));
        assert!(marker.record.matches_key(&key));
    }

    #[test]
    fn map_resize_claims_visible_tiles() {
        let mut viewer = viewer();
        let _ = Viewer::update(&mut viewer, Message::MapResized(Size::new(800.0, 600.0)));
        assert!(viewer.tiles.pending() > 0);
        assert_eq!(viewer.tiles.len(), 0);
    }

    #[test]
    fn panning_moves_the_camera() {
        let mut viewer = viewer();
        let before = viewer.camera.center();
        let _ = Viewer::update(&mut viewer, Message::MapPanned(Vector::new(100.0, 0.0)));
        assert!(viewer.camera.center().lon < before.lon);
    }
}
