//! Map builder for fluent API configuration
//!
//! Leaf objects (renderers, layers, widgets) are composed first and handed
//! to the builder; [`MapBuilder::build`] validates the whole and produces
//! the [`Map`].

use crate::{
    core::{
        config::{MapConfig, MapPreset, ViewConfig},
        geo::LatLng,
        map::Map,
    },
    layers::{base::LayerTrait, manager::LayerManager},
    rendering::renderer::Renderer,
    style::symbol::Symbol,
    ui::widgets::{validate_widgets, Basemap, UiLayout, UiPosition, Widget, WidgetConfig},
    visual::variable::VisualVariable,
    MapError, Result,
};

/// Builder for creating and configuring Map instances
#[derive(Debug)]
pub struct MapBuilder {
    basemap: Basemap,
    view: ViewConfig,
    /// Layers in draw order, bottom first
    layers: Vec<Box<dyn LayerTrait>>,
    widgets: Vec<WidgetConfig>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self {
            basemap: Basemap::Streets,
            view: ViewConfig::default(),
            layers: Vec::new(),
            widgets: Vec::new(),
        }
    }

    /// Starts from a map document, keeping its layer and widget order
    pub fn from_config(config: MapConfig) -> Self {
        Self {
            basemap: config.basemap,
            view: config.view,
            layers: config.layers.into_iter().map(|l| l.into_layer()).collect(),
            widgets: config.widgets,
        }
    }

    pub fn from_preset(preset: &MapPreset) -> Self {
        Self::from_config(preset.resolve())
    }

    pub fn with_basemap(mut self, basemap: Basemap) -> Self {
        self.basemap = basemap;
        self
    }

    pub fn with_view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64) -> Self {
        self.view.center = center;
        self.view.zoom = zoom;
        self
    }

    /// Add a layer on top of the ones added so far
    pub fn with_layer(mut self, layer: impl LayerTrait + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn with_layers(mut self, layers: Vec<Box<dyn LayerTrait>>) -> Self {
        self.layers.extend(layers);
        self
    }

    pub fn with_widget(mut self, widget: Widget, position: UiPosition) -> Self {
        self.widgets.push(WidgetConfig::new(widget, position));
        self
    }

    /// Validates the configuration and assembles the map
    pub fn build(self) -> Result<Map> {
        self.view.validate()?;
        validate_widgets(self.basemap, self.widgets.iter().map(|w| &w.widget))?;
        for layer in &self.layers {
            validate_layer(layer.as_ref());
        }

        let mut layers = LayerManager::new();
        for layer in self.layers {
            layers.add_layer(layer).map_err(|e| match e {
                MapError::Layer(msg) => MapError::InvalidConfiguration(msg),
                other => other,
            })?;
        }

        let mut ui = UiLayout::new();
        for config in self.widgets {
            ui.add(config.widget, config.position);
        }

        log::debug!(
            "Built map: basemap {}, {} layers, {} widgets",
            self.basemap,
            layers.len(),
            ui.widgets().len()
        );

        Ok(Map::from_parts(self.basemap, self.view, layers, ui))
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Size variables cannot resize fills; such a renderer still works, so
/// this only warns.
fn validate_layer(layer: &dyn LayerTrait) {
    if let Some(renderer) = layer.renderer() {
        let Renderer::Simple(simple) = renderer;
        let sized = simple
            .visual_variables
            .iter()
            .any(|v| matches!(v, VisualVariable::Size(_)));
        if sized && matches!(simple.symbol, Symbol::SimpleFill(_)) {
            log::warn!(
                "Layer '{}' sizes a fill symbol; the size variable has no effect",
                layer.id()
            );
        }
    }
    for child in layer.children() {
        validate_layer(child);
    }
}
