use serde::{Deserialize, Serialize};

/// Layout thresholds shared between the session and the view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Viewports narrower than this (logical pixels) use the compact layout.
    pub compact_breakpoint: f32,
    /// Width assumed until the window reports its real size.
    pub initial_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            compact_breakpoint: 768.0,
            initial_width: 1280.0,
        }
    }
}

/// Common error type for catalog and overlay loading.
#[derive(thiserror::Error, Debug)]
pub enum ArsenalError {
    #[error("catalog parse failure: {0}")]
    CatalogParse(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("duplicate record {name} ({category})")]
    DuplicateRecord { category: String, name: String },
    #[error("overlay parse failure: {0}")]
    OverlayParse(String),
}

pub type ArsenalResult<T> = Result<T, ArsenalError>;
