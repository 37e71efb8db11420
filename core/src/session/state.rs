use crate::catalog::{Catalog, CatalogRecord, Filter, RecordKey};
use crate::geo::GeoPoint;
use crate::prelude::LayoutConfig;
use crate::session::layout::LayoutState;
use crate::session::placement::{MarkerId, PlacedMarker, Placements};
use crate::telemetry::{ActivityLog, SessionMetrics};
use log::debug;

/// Shown in place of the list when the active filter matches nothing.
pub const NO_MATCHES_MESSAGE: &str = "No missiles match the current filter.";

/// Typed user intent, consumed synchronously by [`Session::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(Option<RecordKey>),
    SetFilter(Filter),
    PlaceAt(GeoPoint),
    Remove(MarkerId),
    ClearAll,
    TogglePanel,
    ToggleInstructions,
    ToggleLegend,
    ViewportResized(f32),
}

/// All state for one viewing session, owned by the top-level view.
///
/// Invariant: `selection`, when set, indexes a record that passes `filter`.
pub struct Session {
    catalog: Catalog,
    filter: Filter,
    selection: Option<usize>,
    placements: Placements,
    layout: LayoutState,
    activity: ActivityLog,
    metrics: SessionMetrics,
}

impl Session {
    pub fn new(catalog: Catalog, layout: &LayoutConfig) -> Self {
        Self::with_placements(catalog, layout, Placements::new())
    }

    pub fn with_placements(catalog: Catalog, layout: &LayoutConfig, placements: Placements) -> Self {
        Self {
            catalog,
            filter: Filter::All,
            selection: None,
            placements,
            layout: LayoutState::new(layout),
            activity: ActivityLog::default(),
            metrics: SessionMetrics::default(),
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Select(key) => self.select(key.as_ref()),
            Command::SetFilter(filter) => self.set_filter(filter),
            Command::PlaceAt(position) => {
                self.place_at(position);
            }
            Command::Remove(id) => {
                self.remove(&id);
            }
            Command::ClearAll => {
                self.clear_all();
            }
            Command::TogglePanel => self.layout.toggle_panel(),
            Command::ToggleInstructions => self.layout.toggle_instructions(),
            Command::ToggleLegend => self.layout.toggle_legend(),
            Command::ViewportResized(width) => self.layout.resize(width),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn filter_options(&self) -> Vec<Filter> {
        self.catalog.filter_options()
    }

    /// Records shown under the active filter, in catalog order.
    pub fn visible(&self) -> Vec<&CatalogRecord> {
        self.catalog.visible(&self.filter)
    }

    pub fn selected(&self) -> Option<&CatalogRecord> {
        self.selection.and_then(|index| self.catalog.get(index))
    }

    pub fn is_selected(&self, record: &CatalogRecord) -> bool {
        self.selected()
            .is_some_and(|selected| selected.matches_key(&record.key()))
    }

    pub fn placements(&self) -> &Placements {
        &self.placements
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    pub fn set_filter(&mut self, filter: Filter) {
        if filter != self.filter {
            self.activity.record(format!("Filter set to {}", filter));
        }
        self.filter = filter;
        self.revalidate_selection();
    }

    /// Arms a record for placement, or disarms with `None`.
    ///
    /// On a compact layout a successful selection hides the side panel so the
    /// map is reachable. Keys missing from the catalog are ignored.
    pub fn select(&mut self, key: Option<&RecordKey>) {
        let Some(key) = key else {
            self.selection = None;
            return;
        };
        let Some(index) = self.catalog.position(key) else {
            debug!("ignoring selection of unknown record {} ({})", key.name, key.category);
            return;
        };

        self.selection = Some(index);
        self.activity.record(format!("Selected {}", key.name));
        if self.layout.is_compact() {
            self.layout.set_panel_visible(false);
        }
        self.revalidate_selection();
    }

    /// Places the armed record at `position`. Without a selection nothing happens.
    pub fn place_at(&mut self, position: GeoPoint) -> Option<MarkerId> {
        let Some(record) = self.selection.and_then(|index| self.catalog.get(index)) else {
            debug!("map click at {} with nothing selected", position);
            return None;
        };
        let id = self.placements.place(position, record);
        self.metrics.record_placed();
        self.activity
            .record(format!("Placed {} at {}", record.name, position));
        Some(id)
    }

    pub fn remove(&mut self, id: &MarkerId) -> Option<PlacedMarker> {
        let removed = self.placements.remove(id)?;
        self.metrics.record_removed();
        self.activity.record(format!("Removed {}", removed.record.name));
        Some(removed)
    }

    pub fn clear_all(&mut self) -> usize {
        let cleared = self.placements.clear();
        self.metrics.record_cleared(cleared);
        if cleared > 0 {
            self.activity.record(format!("Cleared {} markers", cleared));
        }
        cleared
    }

    /// Keeps the selection inside the visible subset: an excluded selection
    /// advances to the first visible record, or clears when none is visible.
    fn revalidate_selection(&mut self) {
        let Some(current) = self.selection else {
            return;
        };
        let visible = self.catalog.visible_indices(&self.filter);
        if visible.contains(&current) {
            return;
        }
        self.selection = visible.first().copied();
        let moved_to = self.selected().map(|record| record.name.clone());
        match moved_to {
            Some(name) => self.activity.record(format!("Selection moved to {}", name)),
            None => self.activity.record("Selection cleared".to_string()),
        }
    }
}
