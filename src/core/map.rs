use crate::{
    core::config::{MapConfig, ViewConfig},
    data::feature::Feature,
    layers::{base::LayerTrait, manager::LayerManager},
    rendering::context::{RenderContext, StyledFeature},
    ui::widgets::{validate_widgets, Basemap, LayerListItem, UiLayout, UiPosition, Widget},
    visual::legend::LegendSection,
    MapError, Result,
};

/// An assembled map: basemap, view, layers bottom first, and the widgets
/// placed around the view.
#[derive(Debug)]
pub struct Map {
    basemap: Basemap,
    view: ViewConfig,
    layers: LayerManager,
    ui: UiLayout,
}

impl Map {
    /// Empty map over `basemap`. Use [`crate::MapBuilder`] to validate a
    /// full configuration.
    pub fn new(basemap: Basemap, view: ViewConfig) -> Self {
        Self::from_parts(basemap, view, LayerManager::new(), UiLayout::new())
    }

    pub(crate) fn from_parts(
        basemap: Basemap,
        view: ViewConfig,
        layers: LayerManager,
        ui: UiLayout,
    ) -> Self {
        Self {
            basemap,
            view,
            layers,
            ui,
        }
    }

    pub fn basemap(&self) -> Basemap {
        self.basemap
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerManager {
        &mut self.layers
    }

    pub fn ui(&self) -> &UiLayout {
        &self.ui
    }

    /// Adds a layer on top of the existing ones
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        log::debug!("Adding {} layer '{}'", layer.layer_type(), layer.id());
        self.layers.add_layer(layer)
    }

    /// Adds layers in order, so later layers draw on top. Stops at the
    /// first rejected layer; layers before it stay added.
    pub fn add_many(&mut self, layers: Vec<Box<dyn LayerTrait>>) -> Result<()> {
        for layer in layers {
            self.add_layer(layer)?;
        }
        Ok(())
    }

    /// Places a widget, under the same rules [`crate::MapBuilder::build`]
    /// applies.
    pub fn add_widget(&mut self, widget: Widget, position: UiPosition) -> Result<()> {
        let current = self.ui.widgets().iter().map(|w| &w.widget);
        validate_widgets(self.basemap, current.chain(std::iter::once(&widget)))?;
        self.ui.add(widget, position);
        Ok(())
    }

    pub fn widgets_at(&self, position: UiPosition) -> Vec<&Widget> {
        self.ui.at(position)
    }

    /// Legend sections of every visible layer, bottom layer first
    pub fn legend(&self) -> Vec<LegendSection> {
        self.layers
            .layers()
            .into_iter()
            .filter(|l| l.is_visible())
            .flat_map(|l| l.legend())
            .collect()
    }

    /// Layer list rows, `None` without a layer list widget
    pub fn layer_list(&self) -> Option<Vec<LayerListItem>> {
        self.ui.layer_list(&self.layers)
    }

    /// Swaps the current basemap with the toggle's, returning the basemap
    /// now shown.
    pub fn toggle_basemap(&mut self) -> Result<Basemap> {
        let next = self.ui.basemap_toggle_mut().ok_or_else(|| {
            MapError::InvalidConfiguration("map has no basemap toggle".to_string())
        })?;
        std::mem::swap(&mut self.basemap, next);
        log::debug!("Basemap toggled to {}", self.basemap);
        Ok(self.basemap)
    }

    /// Runs the render pass of one layer, group children included. Nothing
    /// is drawn while a group above the layer is hidden.
    pub fn render(&self, layer_id: &str, features: &[Feature], context: &mut RenderContext) -> Result<()> {
        let (layer, visible) = self
            .layers
            .find_with_visibility(layer_id)
            .ok_or_else(|| MapError::Layer(format!("no layer '{}'", layer_id)))?;
        if !visible {
            log::debug!("Layer '{}' is hidden, nothing drawn", layer_id);
            return Ok(());
        }
        layer.render(features, context)
    }

    /// Styles `features` with the renderer of `layer_id`
    pub fn style_features(&self, layer_id: &str, features: &[Feature]) -> Result<Vec<StyledFeature>> {
        let mut context = RenderContext::new();
        self.render(layer_id, features, &mut context)?;
        Ok(context.finish())
    }

    /// Document reproducing the map's current state
    pub fn to_config(&self) -> MapConfig {
        MapConfig {
            basemap: self.basemap,
            view: self.view.clone(),
            layers: self.layers.layers().into_iter().map(|l| l.to_config()).collect(),
            widgets: self.ui.widgets().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{builder::MapBuilder, config::MapPreset};
    use crate::data::geojson::GeoJsonGeometry;
    use crate::layers::{feature::FeatureLayer, group::GroupLayer};
    use crate::ui::widgets::ScaleUnit;
    use crate::style::color::Color;
    use crate::visual::variable::VisualEffect;
    use serde_json::json;

    fn world_cities() -> Map {
        MapBuilder::from_preset(&MapPreset::WorldCities).build().unwrap()
    }

    fn city(id: i64, pop: serde_json::Value) -> Feature {
        Feature::new(GeoJsonGeometry::Point {
            coordinates: [20.46, 44.82],
        })
        .with_id(id)
        .with_attribute("POP", pop)
    }

    #[test]
    fn test_style_cities() {
        let map = world_cities();
        let styled = map
            .style_features("cities", &[city(1, json!(75000)), city(2, json!(20_000_000))])
            .unwrap();

        assert_eq!(styled.len(), 2);
        assert_eq!(styled[0].symbol.color(), Color::rgb(0xcc, 0xec, 0xe6));
        assert_eq!(styled[0].symbol.size().unwrap().as_points(), 6.0);
        assert_eq!(styled[1].symbol.color(), Color::rgb(0x00, 0x44, 0x1b));
        assert_eq!(styled[1].feature_id, Some(json!(2)));
        match &styled[1].effects[1] {
            VisualEffect::Size(outcome) => assert_eq!(outcome.label.as_deref(), Some("> 10,000,000")),
            other => panic!("expected a size effect, got {:?}", other),
        }
    }

    #[test]
    fn test_style_unknown_layer() {
        let map = world_cities();
        assert!(matches!(map.style_features("rivers", &[]), Err(MapError::Layer(_))));
    }

    #[test]
    fn test_style_missing_population() {
        let map = world_cities();
        let result = map.style_features("cities", &[city(1, json!(null))]);
        assert!(matches!(result, Err(MapError::InvalidInput(_))));
    }

    #[test]
    fn test_legend_follows_visibility() {
        let mut map = world_cities();
        let legend = map.legend();
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].title, "Population Per City By Color Ramp");
        assert_eq!(legend[1].entries.len(), 6);

        map.layers_mut().with_layer_mut("cities", |l| l.set_visible(false));
        assert!(map.legend().is_empty());
        assert!(map.style_features("cities", &[city(1, json!(1))]).unwrap().is_empty());
    }

    #[test]
    fn test_toggle_basemap() {
        let mut map = world_cities();
        assert_eq!(map.toggle_basemap().unwrap(), Basemap::Satellite);
        assert_eq!(map.toggle_basemap().unwrap(), Basemap::DarkGray);

        let mut plain = Map::new(Basemap::Streets, ViewConfig::default());
        assert!(plain.toggle_basemap().is_err());
    }

    #[test]
    fn test_hidden_group_hides_its_layers() {
        let mut map = Map::new(Basemap::Gray, ViewConfig::default());
        map.add_layer(Box::new(
            GroupLayer::new("world", "World").with_layer(FeatureLayer::new("cities", "Cities")),
        ))
        .unwrap();
        assert_eq!(map.style_features("cities", &[city(1, json!(1))]).unwrap().len(), 1);

        map.layers_mut().with_layer_mut("world", |l| l.set_visible(false));
        assert!(map.style_features("cities", &[city(1, json!(1))]).unwrap().is_empty());
        assert!(map.legend().is_empty());
    }

    #[test]
    fn test_add_widget_keeps_widget_rules() {
        let mut map = world_cities();
        assert!(matches!(
            map.add_widget(Widget::basemap_toggle(Basemap::Osm), UiPosition::TopLeft),
            Err(MapError::InvalidConfiguration(_))
        ));
        assert!(map.add_widget(Widget::layer_list(false), UiPosition::TopLeft).is_err());
        map.add_widget(Widget::legend(), UiPosition::BottomRight).unwrap();
        assert_eq!(map.ui().widgets().len(), 4);

        let mut plain = Map::new(Basemap::Gray, ViewConfig::default());
        assert!(plain
            .add_widget(Widget::basemap_toggle(Basemap::Gray), UiPosition::BottomRight)
            .is_err());
        plain
            .add_widget(Widget::scale_bar(ScaleUnit::Metric), UiPosition::BottomLeft)
            .unwrap();
        assert!(plain.toggle_basemap().is_err());
    }

    #[test]
    fn test_layer_list_is_top_first() {
        let map = world_cities();
        let items = map.layer_list().unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.layer_id.as_str()).collect();
        assert_eq!(ids, vec!["cities", "continents"]);
        assert!(items.iter().all(|i| i.panel.is_some()));
    }

    #[test]
    fn test_add_many_appends_on_top() {
        let mut map = Map::new(Basemap::Gray, ViewConfig::default());
        map.add_many(vec![
            Box::new(FeatureLayer::new("a", "A")),
            Box::new(FeatureLayer::new("b", "B")),
        ])
        .unwrap();
        assert!(map.add_layer(Box::new(FeatureLayer::new("a", "A"))).is_err());
        assert_eq!(map.layers().list_layers(), vec!["a", "b"]);
    }

    #[test]
    fn test_to_config_reproduces_preset() {
        assert_eq!(world_cities().to_config(), MapPreset::WorldCities.resolve());
    }
}
