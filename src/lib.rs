//! # citymap
//!
//! Typed map configuration and data-driven symbol styling.
//!
//! A map is assembled from plain configuration values: symbols, renderers
//! with color and size visual variables, feature layers, a view and the
//! widgets placed around it. Rendering hosts hand features to
//! [`Map::style_features`] and draw the returned symbols; legend hosts read
//! [`Map::legend`], which is derived from the same breakpoint tables.

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod presets;
pub mod rendering;
pub mod style;
pub mod ui;
pub mod visual;

// Re-export public API
pub use crate::core::{
    builder::MapBuilder,
    config::{MapConfig, MapPreset, ViewConfig},
    geo::LatLng,
    map::Map,
};

pub use data::feature::{Feature, FeatureSet};

pub use layers::{
    base::{LayerTrait, LayerType},
    feature::FeatureLayer,
    group::GroupLayer,
    manager::LayerManager,
};

pub use rendering::{
    context::{RenderContext, StyledFeature},
    renderer::{Renderer, ResolvedSymbol, SimpleRenderer},
};

pub use style::{
    color::Color,
    symbol::{ScreenLength, SimpleFillSymbol, SimpleLineSymbol, SimpleMarkerSymbol, Symbol},
};

pub use ui::{
    popup::{FieldInfo, NumberFormat, PopupTemplate},
    widgets::{Basemap, ScaleUnit, UiPosition, Widget, WidgetConfig},
};

pub use visual::{
    breakpoint::{resolve, BreakpointTable, Stop, VisualOutcome},
    legend::{LegendEntry, LegendSection},
    variable::{ColorVariable, SizeVariable, VisualVariable},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;
