use crate::data::geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry, GeometryKind};
use crate::prelude::HashMap;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub type Attributes = HashMap<String, serde_json::Value>;

/// A feature as delivered by a feature source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Feature {
    pub fn new(geometry: GeoJsonGeometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            attributes: Attributes::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<serde_json::Value>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    /// Reads `name` as a finite number.
    ///
    /// Missing, `null`, non-numeric and non-finite values are rejected
    /// rather than mapped to some default bucket.
    pub fn numeric_attribute(&self, name: &str) -> Result<f64> {
        let value = self
            .attributes
            .get(name)
            .filter(|v| !v.is_null())
            .ok_or_else(|| {
                MapError::InvalidInput(format!("feature {} has no value for '{}'", self.label(), name))
            })?;

        value
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                MapError::InvalidInput(format!(
                    "feature {} has non-numeric '{}': {}",
                    self.label(),
                    name,
                    value
                ))
            })
    }

    pub fn geometry_kind(&self) -> Option<GeometryKind> {
        self.geometry.as_ref().and_then(|g| g.kind())
    }

    fn label(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => "<no id>".to_string(),
        }
    }
}

impl From<GeoJsonFeature> for Feature {
    fn from(feature: GeoJsonFeature) -> Self {
        Self {
            id: feature.id,
            geometry: feature.geometry,
            attributes: feature.properties.unwrap_or_default(),
        }
    }
}

/// An ordered batch of features, typically one query result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureSet {
    features: Vec<Feature>,
}

impl FeatureSet {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn from_geojson_str(geojson_str: &str) -> Result<Self> {
        let geojson = GeoJson::from_str(geojson_str)?;
        Ok(Self::new(
            geojson.into_features().into_iter().map(Feature::from).collect(),
        ))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded {} bytes of GeoJSON from {}", text.len(), path.as_ref().display());
        Self::from_geojson_str(&text)
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Keeps only features with a finite numeric `field`, returning how
    /// many were dropped.
    pub fn retain_numeric(&mut self, field: &str) -> usize {
        let before = self.features.len();
        self.features.retain(|f| match f.numeric_attribute(field) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Skipping feature: {}", e);
                false
            }
        });
        before - self.features.len()
    }
}

impl IntoIterator for FeatureSet {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
