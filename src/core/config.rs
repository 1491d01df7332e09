//! Map documents and presets
//!
//! A [`MapConfig`] is the serializable description of a whole map: basemap,
//! initial view, layers and widgets. Documents are strict: unknown fields
//! are rejected, and breakpoint tables are validated while parsing, so a
//! document that loads is a document that can be rendered.

use crate::core::constants::{DEFAULT_CONTAINER, MAX_ZOOM, MIN_ZOOM};
use crate::core::geo::LatLng;
use crate::layers::config::LayerConfig;
use crate::ui::widgets::{Basemap, WidgetConfig};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

/// `[lng, lat]` ordering, as map documents write centers.
mod lng_lat {
    use crate::core::geo::LatLng;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(center: &LatLng, serializer: S) -> Result<S::Ok, S::Error> {
        center.to_lng_lat().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LatLng, D::Error> {
        <[f64; 2]>::deserialize(deserializer).map(LatLng::from_lng_lat)
    }
}

/// Initial view of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewConfig {
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(with = "lng_lat")]
    pub center: LatLng,
    pub zoom: f64,
}

impl ViewConfig {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            container: default_container(),
            center,
            zoom,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.center.is_valid() {
            return Err(MapError::InvalidConfiguration(format!(
                "view center ({}, {}) is outside lat [-90, 90] / lng [-180, 180]",
                self.center.lat, self.center.lng
            )));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.zoom) {
            return Err(MapError::InvalidConfiguration(format!(
                "view zoom {} is outside [{}, {}]",
                self.zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }
        if self.container.trim().is_empty() {
            return Err(MapError::InvalidConfiguration(
                "view container must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::new(LatLng::default(), 2.0)
    }
}

/// A whole map: basemap, view, layers (bottom first) and widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MapConfig {
    pub basemap: Basemap,
    pub view: ViewConfig,
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loading map config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Ready-made maps.
#[derive(Debug, Clone, PartialEq)]
pub enum MapPreset {
    /// World cities over continents, shaded and sized by population
    WorldCities,
    Custom(MapConfig),
}

impl MapPreset {
    pub fn resolve(&self) -> MapConfig {
        match self {
            Self::WorldCities => crate::presets::world_cities(),
            Self::Custom(config) => config.clone(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "world-cities" => Some(Self::WorldCities),
            _ => None,
        }
    }
}

impl Default for MapPreset {
    fn default() -> Self {
        Self::WorldCities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_view_center_is_lng_lat() {
        let view: ViewConfig = serde_json::from_value(json!({
            "center": [20, 45],
            "zoom": 4
        }))
        .unwrap();

        assert_eq!(view.center, LatLng::new(45.0, 20.0));
        assert_eq!(view.container, "viewDiv");
        assert!(view.validate().is_ok());
        assert_eq!(serde_json::to_value(&view).unwrap()["center"], json!([20.0, 45.0]));
    }

    #[test]
    fn test_view_validation() {
        assert!(ViewConfig::new(LatLng::new(95.0, 0.0), 4.0).validate().is_err());
        assert!(ViewConfig::new(LatLng::new(0.0, 0.0), 30.0).validate().is_err());
        assert!(ViewConfig::new(LatLng::new(0.0, 0.0), -1.0).validate().is_err());
        assert!(ViewConfig::new(LatLng::new(0.0, 0.0), f64::NAN).validate().is_err());
    }

    #[test]
    fn test_minimal_map_config() {
        let config = MapConfig::from_json_str(
            r#"{ "basemap": "dark-gray", "view": { "center": [0, 0], "zoom": 2 } }"#,
        )
        .unwrap();
        assert_eq!(config.basemap, Basemap::DarkGray);
        assert!(config.layers.is_empty());
        assert!(config.widgets.is_empty());
    }

    #[test]
    fn test_unknown_top_level_field() {
        let result = MapConfig::from_json_str(
            r#"{ "basemap": "dark-gray", "view": { "center": [0, 0], "zoom": 2 }, "theme": "x" }"#,
        );
        assert!(matches!(result, Err(MapError::Serialization(_))));
    }

    #[test]
    fn test_presets() {
        assert_eq!(MapPreset::from_name("world-cities"), Some(MapPreset::WorldCities));
        assert_eq!(MapPreset::from_name("atlantis"), None);

        let custom = MapConfig {
            basemap: Basemap::Streets,
            view: ViewConfig::default(),
            layers: Vec::new(),
            widgets: Vec::new(),
        };
        assert_eq!(MapPreset::Custom(custom.clone()).resolve(), custom);
    }
}
