use crate::prelude::LayoutConfig;

/// View-layer flags that live alongside the data state.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    viewport_width: f32,
    compact_breakpoint: f32,
    panel_visible: bool,
    instructions_open: bool,
    legend_expanded: bool,
}

impl LayoutState {
    pub fn new(config: &LayoutConfig) -> Self {
        let compact = config.initial_width < config.compact_breakpoint;
        Self {
            viewport_width: config.initial_width,
            compact_breakpoint: config.compact_breakpoint,
            panel_visible: true,
            instructions_open: true,
            legend_expanded: !compact,
        }
    }

    pub fn is_compact(&self) -> bool {
        self.viewport_width < self.compact_breakpoint
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Wide layouts always show the panel; compact ones honor the toggle.
    pub fn panel_shown(&self) -> bool {
        !self.is_compact() || self.panel_visible
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    pub fn instructions_open(&self) -> bool {
        self.instructions_open
    }

    pub fn legend_expanded(&self) -> bool {
        self.legend_expanded
    }

    /// Clear-all is a wide-layout control.
    pub fn clear_all_offered(&self) -> bool {
        !self.is_compact()
    }

    pub(crate) fn resize(&mut self, width: f32) {
        let was_compact = self.is_compact();
        self.viewport_width = width;
        let compact = self.is_compact();
        if compact != was_compact {
            self.legend_expanded = !compact;
        }
    }

    pub(crate) fn set_panel_visible(&mut self, visible: bool) {
        self.panel_visible = visible;
    }

    pub(crate) fn toggle_panel(&mut self) {
        self.panel_visible = !self.panel_visible;
    }

    pub(crate) fn toggle_instructions(&mut self) {
        self.instructions_open = !self.instructions_open;
    }

    pub(crate) fn toggle_legend(&mut self) {
        self.legend_expanded = !self.legend_expanded;
    }
}
