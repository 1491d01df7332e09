//! Prelude module for common citymap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use citymap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{MapConfig, MapPreset, ViewConfig},
    geo::LatLng,
    map::Map,
};

pub use crate::data::{
    feature::{Attributes, Feature, FeatureSet},
    geojson::{GeoJson, GeoJsonGeometry, GeometryKind},
};

pub use crate::layers::{
    base::{LayerTrait, LayerType},
    config::{FeatureLayerConfig, GroupLayerConfig, LayerConfig},
    feature::FeatureLayer,
    group::GroupLayer,
    manager::LayerManager,
};

pub use crate::rendering::{
    context::{RenderContext, StyledFeature},
    renderer::{Renderer, ResolvedSymbol, SimpleRenderer},
};

pub use crate::style::{
    color::Color,
    symbol::{ScreenLength, SimpleFillSymbol, SimpleLineSymbol, SimpleMarkerSymbol, Symbol},
};

pub use crate::ui::{
    popup::{FieldInfo, NumberFormat, PopupTemplate},
    widgets::{Basemap, LayerListItem, ScaleUnit, UiLayout, UiPosition, Widget, WidgetConfig},
};

pub use crate::visual::{
    breakpoint::{BreakpointTable, Stop, VisualOutcome},
    legend::{LegendEntry, LegendSection, Swatch},
    variable::{ColorVariable, LegendOptions, SizeVariable, VisualEffect, VisualVariable},
};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
