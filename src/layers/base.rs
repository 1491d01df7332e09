use crate::data::feature::Feature;
use crate::layers::config::LayerConfig;
use crate::rendering::{context::RenderContext, renderer::Renderer};
use crate::ui::popup::PopupTemplate;
use crate::visual::legend::LegendSection;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Feature,
    Group,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Feature => write!(f, "feature"),
            LayerType::Group => write!(f, "group"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerProperties {
    pub id: String,
    pub title: String,
    pub layer_type: LayerType,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: String, title: String, layer_type: LayerType) -> Self {
        Self {
            id,
            title,
            layer_type,
            visible: true,
        }
    }
}

/// Common interface of everything a map can hold as a layer.
pub trait LayerTrait: Send + Sync + std::fmt::Debug {
    fn id(&self) -> &str;

    /// Display title, shown in the layer list and legend
    fn title(&self) -> &str;

    fn layer_type(&self) -> LayerType;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    fn renderer(&self) -> Option<&Renderer> {
        None
    }

    fn popup_template(&self) -> Option<&PopupTemplate> {
        None
    }

    /// Child layers, in draw order
    fn children(&self) -> Vec<&dyn LayerTrait> {
        Vec::new()
    }

    /// Legend sections of this layer and its children
    fn legend(&self) -> Vec<LegendSection> {
        let mut sections = self
            .renderer()
            .map(|r| r.legend(self.id()))
            .unwrap_or_default();
        for child in self.children() {
            if child.is_visible() {
                sections.extend(child.legend());
            }
        }
        sections
    }

    /// Styles `features` and records the draw calls in `context`
    fn render(&self, features: &[Feature], context: &mut RenderContext) -> Result<()>;

    /// Configuration reproducing the layer's current state
    fn to_config(&self) -> LayerConfig;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new(
            "cities".to_string(),
            "World Cities".to_string(),
            LayerType::Feature,
        );

        assert_eq!(props.id, "cities");
        assert_eq!(props.title, "World Cities");
        assert_eq!(props.layer_type, LayerType::Feature);
        assert!(props.visible);
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Feature.to_string(), "feature");
        assert_eq!(LayerType::Group.to_string(), "group");
    }
}
