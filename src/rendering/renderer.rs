use crate::data::{feature::Feature, geojson::GeometryKind};
use crate::style::symbol::{SimpleFillSymbol, SimpleLineSymbol, SimpleMarkerSymbol, Symbol};
use crate::visual::{
    legend::LegendSection,
    variable::{VisualEffect, VisualVariable},
};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Styling rule for a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Renderer {
    Simple(SimpleRenderer),
}

impl Renderer {
    pub fn resolve(&self, feature: &Feature) -> Result<ResolvedSymbol> {
        match self {
            Renderer::Simple(renderer) => renderer.resolve(feature),
        }
    }

    pub fn legend(&self, layer_id: &str) -> Vec<LegendSection> {
        match self {
            Renderer::Simple(renderer) => renderer.legend(layer_id),
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        match self {
            Renderer::Simple(renderer) => renderer.fields(),
        }
    }
}

impl From<SimpleRenderer> for Renderer {
    fn from(renderer: SimpleRenderer) -> Self {
        Renderer::Simple(renderer)
    }
}

/// One base symbol for every feature, adjusted per feature by zero or more
/// visual variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SimpleRenderer {
    pub symbol: Symbol,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visual_variables: Vec<VisualVariable>,
}

/// The symbol to draw one feature with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSymbol {
    pub symbol: Symbol,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<VisualEffect>,
}

impl SimpleRenderer {
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            visual_variables: Vec::new(),
        }
    }

    /// Renderer used for layers configured without one.
    pub fn default_for(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Point => Self::new(SimpleMarkerSymbol::default()),
            GeometryKind::Polyline => Self::new(SimpleLineSymbol::default()),
            GeometryKind::Polygon => Self::new(SimpleFillSymbol::default()),
        }
    }

    pub fn with_visual_variable(mut self, variable: impl Into<VisualVariable>) -> Self {
        self.visual_variables.push(variable.into());
        self
    }

    /// Distinct attribute fields read by the visual variables.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for variable in &self.visual_variables {
            if !fields.contains(&variable.field()) {
                fields.push(variable.field());
            }
        }
        fields
    }

    /// Resolves the symbol for one feature.
    ///
    /// Variables apply in order, so a later variable of the same kind
    /// overrides an earlier one.
    pub fn resolve(&self, feature: &Feature) -> Result<ResolvedSymbol> {
        let mut symbol = self.symbol.clone();
        let mut effects = Vec::with_capacity(self.visual_variables.len());

        for variable in &self.visual_variables {
            let value = feature.numeric_attribute(variable.field())?;
            let effect = variable.resolve(value)?;

            match &effect {
                VisualEffect::Color(outcome) => symbol.set_color(outcome.value),
                VisualEffect::Size(outcome) => {
                    if !symbol.set_size(outcome.value) {
                        log::debug!(
                            "Size variable on '{}' has no effect on a {} symbol",
                            variable.field(),
                            symbol.kind()
                        );
                    }
                }
            }

            effects.push(effect);
        }

        Ok(ResolvedSymbol { symbol, effects })
    }

    pub fn legend(&self, layer_id: &str) -> Vec<LegendSection> {
        self.visual_variables
            .iter()
            .filter_map(|v| LegendSection::from_variable(layer_id, v))
            .collect()
    }
}
