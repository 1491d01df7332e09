use crate::layers::{base::LayerTrait, feature::FeatureLayer, group::GroupLayer};
use crate::rendering::renderer::Renderer;
use crate::ui::popup::PopupTemplate;
use serde::{Deserialize, Serialize};

fn visible_by_default() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// A layer as written in a map document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LayerConfig {
    Feature(FeatureLayerConfig),
    Group(GroupLayerConfig),
}

impl LayerConfig {
    pub fn id(&self) -> &str {
        match self {
            LayerConfig::Feature(config) => &config.id,
            LayerConfig::Group(config) => &config.id,
        }
    }

    pub fn into_layer(self) -> Box<dyn LayerTrait> {
        match self {
            LayerConfig::Feature(config) => Box::new(FeatureLayer::from_config(config)),
            LayerConfig::Group(config) => Box::new(GroupLayer::from_config(config)),
        }
    }
}

/// A layer backed by a feature service endpoint.
///
/// `url` is carried for the host that queries the service; nothing in
/// this crate fetches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeatureLayerConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "visible_by_default", skip_serializing_if = "is_true")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<Renderer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup_template: Option<PopupTemplate>,
}

impl FeatureLayerConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            url: None,
            visible: true,
            renderer: None,
            popup_template: None,
        }
    }
}

/// Layers shown and hidden together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GroupLayerConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default = "visible_by_default", skip_serializing_if = "is_true")]
    pub visible: bool,
    #[serde(default)]
    pub layers: Vec<FeatureLayerConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_layer_defaults() {
        let config: LayerConfig = serde_json::from_value(json!({
            "type": "feature",
            "id": "cities",
            "url": "http://example.com/MapServer/0"
        }))
        .unwrap();

        match &config {
            LayerConfig::Feature(layer) => {
                assert!(layer.visible);
                assert!(layer.renderer.is_none());
            }
            other => panic!("unexpected config {:?}", other),
        }
        assert_eq!(config.id(), "cities");

        // defaults are left out again
        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("visible").is_none());
    }

    #[test]
    fn test_group_layer_config() {
        let config: LayerConfig = serde_json::from_value(json!({
            "type": "group",
            "id": "world",
            "visible": false,
            "layers": [{ "id": "cities" }, { "id": "continents" }]
        }))
        .unwrap();

        let layer = config.into_layer();
        assert_eq!(layer.id(), "world");
        assert!(!layer.is_visible());
        assert_eq!(layer.children().len(), 2);
    }

    #[test]
    fn test_unknown_layer_field_is_rejected() {
        let result = serde_json::from_value::<LayerConfig>(json!({
            "type": "feature",
            "id": "cities",
            "popup": {}
        }));
        assert!(result.is_err());
    }
}
