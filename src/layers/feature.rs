use crate::data::feature::Feature;
use crate::layers::{
    base::{LayerProperties, LayerTrait, LayerType},
    config::{FeatureLayerConfig, LayerConfig},
};
use crate::rendering::{
    context::{RenderContext, StyledFeature},
    renderer::{Renderer, SimpleRenderer},
};
use crate::ui::popup::PopupTemplate;
use crate::{MapError, Result};

/// A layer of features from one feature service endpoint.
#[derive(Debug, Clone)]
pub struct FeatureLayer {
    properties: LayerProperties,
    url: Option<String>,
    renderer: Option<Renderer>,
    popup_template: Option<PopupTemplate>,
}

impl FeatureLayer {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            properties: LayerProperties::new(id.into(), title.into(), LayerType::Feature),
            url: None,
            renderer: None,
            popup_template: None,
        }
    }

    pub fn from_config(config: FeatureLayerConfig) -> Self {
        let title = config.title.unwrap_or_else(|| config.id.clone());
        let mut properties = LayerProperties::new(config.id, title, LayerType::Feature);
        properties.visible = config.visible;

        Self {
            properties,
            url: config.url,
            renderer: config.renderer,
            popup_template: config.popup_template,
        }
    }

    pub fn config(&self) -> FeatureLayerConfig {
        FeatureLayerConfig {
            id: self.properties.id.clone(),
            title: Some(self.properties.title.clone()),
            url: self.url.clone(),
            visible: self.properties.visible,
            renderer: self.renderer.clone(),
            popup_template: self.popup_template.clone(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_renderer(mut self, renderer: impl Into<Renderer>) -> Self {
        self.renderer = Some(renderer.into());
        self
    }

    pub fn with_popup_template(mut self, template: PopupTemplate) -> Self {
        self.popup_template = Some(template);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.properties.visible = visible;
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Styles one feature with the layer renderer, or with the default
    /// symbol for its geometry when the layer has none.
    pub fn style(&self, feature: &Feature) -> Result<StyledFeature> {
        let resolved = match &self.renderer {
            Some(renderer) => renderer.resolve(feature)?,
            None => {
                let kind = feature.geometry_kind().ok_or_else(|| {
                    MapError::InvalidInput(format!(
                        "feature in layer '{}' has no geometry to pick a default symbol for",
                        self.properties.id
                    ))
                })?;
                SimpleRenderer::default_for(kind).resolve(feature)?
            }
        };

        Ok(StyledFeature::new(
            &self.properties.id,
            feature.id.clone(),
            feature.geometry.clone(),
            resolved,
        ))
    }
}

impl LayerTrait for FeatureLayer {
    crate::impl_layer_trait!(properties);

    fn renderer(&self) -> Option<&Renderer> {
        self.renderer.as_ref()
    }

    fn popup_template(&self) -> Option<&PopupTemplate> {
        self.popup_template.as_ref()
    }

    fn render(&self, features: &[Feature], context: &mut RenderContext) -> Result<()> {
        if !self.properties.visible {
            log::debug!("Layer '{}' is hidden, nothing drawn", self.properties.id);
            return Ok(());
        }

        for feature in features {
            context.draw(self.style(feature)?);
        }

        log::debug!(
            "rendered feature layer '{}': {} features",
            self.properties.id,
            features.len()
        );
        Ok(())
    }

    fn to_config(&self) -> LayerConfig {
        LayerConfig::Feature(self.config())
    }
}
