use crate::data::feature::Feature;
use crate::layers::{
    base::{LayerProperties, LayerTrait, LayerType},
    config::{GroupLayerConfig, LayerConfig},
    feature::FeatureLayer,
};
use crate::rendering::context::RenderContext;
use crate::{MapError, Result};

/// Feature layers listed, shown and hidden together.
#[derive(Debug, Clone)]
pub struct GroupLayer {
    properties: LayerProperties,
    layers: Vec<FeatureLayer>,
}

impl GroupLayer {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            properties: LayerProperties::new(id.into(), title.into(), LayerType::Group),
            layers: Vec::new(),
        }
    }

    pub fn from_config(config: GroupLayerConfig) -> Self {
        let title = config.title.unwrap_or_else(|| config.id.clone());
        let mut group = Self::new(config.id, title);
        group.properties.visible = config.visible;
        group.layers = config
            .layers
            .into_iter()
            .map(FeatureLayer::from_config)
            .collect();
        group
    }

    pub fn with_layer(mut self, layer: FeatureLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn layer(&self, id: &str) -> Option<&FeatureLayer> {
        self.layers.iter().find(|l| l.id() == id)
    }
}

impl LayerTrait for GroupLayer {
    crate::impl_layer_trait!(properties);

    fn children(&self) -> Vec<&dyn LayerTrait> {
        self.layers.iter().map(|l| l as &dyn LayerTrait).collect()
    }

    fn render(&self, _features: &[Feature], _context: &mut RenderContext) -> Result<()> {
        Err(MapError::Layer(format!(
            "group layer '{}' has no features of its own; render one of its layers",
            self.properties.id
        )))
    }

    fn to_config(&self) -> LayerConfig {
        LayerConfig::Group(GroupLayerConfig {
            id: self.properties.id.clone(),
            title: Some(self.properties.title.clone()),
            visible: self.properties.visible,
            layers: self.layers.iter().map(FeatureLayer::config).collect(),
        })
    }
}
