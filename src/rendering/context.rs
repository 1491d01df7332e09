use crate::data::geojson::GeoJsonGeometry;
use crate::rendering::renderer::ResolvedSymbol;
use crate::style::symbol::Symbol;
use crate::visual::variable::VisualEffect;
use serde::Serialize;

/// A feature paired with the symbol the host should draw it with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledFeature {
    pub layer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    pub symbol: Symbol,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<VisualEffect>,
}

impl StyledFeature {
    pub fn new(
        layer_id: &str,
        feature_id: Option<serde_json::Value>,
        geometry: Option<GeoJsonGeometry>,
        resolved: ResolvedSymbol,
    ) -> Self {
        Self {
            layer_id: layer_id.to_string(),
            feature_id,
            geometry,
            symbol: resolved.symbol,
            effects: resolved.effects,
        }
    }
}

/// Collects the draw calls of one render pass, in draw order.
#[derive(Debug, Default)]
pub struct RenderContext {
    drawn: Vec<StyledFeature>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw(&mut self, feature: StyledFeature) {
        self.drawn.push(feature);
    }

    pub fn drawn(&self) -> &[StyledFeature] {
        &self.drawn
    }

    pub fn len(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }

    /// Ends the pass, handing the draw calls to the caller.
    pub fn finish(self) -> Vec<StyledFeature> {
        self.drawn
    }

    pub fn clear(&mut self) {
        self.drawn.clear();
    }
}
