use crate::style::{color::Color, symbol::ScreenLength};
use crate::visual::breakpoint::{BreakpointTable, Stop, VisualOutcome, VisualValue};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Configuration shape of a color stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorStop {
    pub value: f64,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Configuration shape of a size stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeStop {
    pub value: f64,
    pub size: ScreenLength,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl VisualValue for Color {
    type Repr = ColorStop;
}

impl VisualValue for ScreenLength {
    type Repr = SizeStop;
}

impl From<Stop<Color>> for ColorStop {
    fn from(stop: Stop<Color>) -> Self {
        Self {
            value: stop.value,
            color: stop.visual,
            label: stop.label,
        }
    }
}

impl From<ColorStop> for Stop<Color> {
    fn from(stop: ColorStop) -> Self {
        Self {
            value: stop.value,
            visual: stop.color,
            label: stop.label,
        }
    }
}

impl From<Stop<ScreenLength>> for SizeStop {
    fn from(stop: Stop<ScreenLength>) -> Self {
        Self {
            value: stop.value,
            size: stop.visual,
            label: stop.label,
        }
    }
}

impl From<SizeStop> for Stop<ScreenLength> {
    fn from(stop: SizeStop) -> Self {
        Self {
            value: stop.value,
            visual: stop.size,
            label: stop.label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LegendOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl LegendOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            hidden: false,
        }
    }
}

/// Maps a numeric field to a symbol color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColorVariable {
    pub field: String,
    #[serde(default)]
    pub legend_options: LegendOptions,
    pub stops: BreakpointTable<Color>,
}

impl ColorVariable {
    pub fn new(field: impl Into<String>, stops: BreakpointTable<Color>) -> Self {
        Self {
            field: field.into(),
            legend_options: LegendOptions::default(),
            stops,
        }
    }

    pub fn with_legend_title(mut self, title: impl Into<String>) -> Self {
        self.legend_options = LegendOptions::titled(title);
        self
    }

    pub fn resolve(&self, value: f64) -> Result<VisualOutcome<Color>> {
        self.stops.resolve(value)
    }
}

/// Maps a numeric field to a symbol size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SizeVariable {
    pub field: String,
    #[serde(default)]
    pub legend_options: LegendOptions,
    pub stops: BreakpointTable<ScreenLength>,
}

impl SizeVariable {
    pub fn new(field: impl Into<String>, stops: BreakpointTable<ScreenLength>) -> Self {
        Self {
            field: field.into(),
            legend_options: LegendOptions::default(),
            stops,
        }
    }

    pub fn with_legend_title(mut self, title: impl Into<String>) -> Self {
        self.legend_options = LegendOptions::titled(title);
        self
    }

    pub fn resolve(&self, value: f64) -> Result<VisualOutcome<ScreenLength>> {
        self.stops.resolve(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VisualVariable {
    Color(ColorVariable),
    Size(SizeVariable),
}

/// What a visual variable did to one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VisualEffect {
    Color(VisualOutcome<Color>),
    Size(VisualOutcome<ScreenLength>),
}

impl VisualVariable {
    pub fn field(&self) -> &str {
        match self {
            VisualVariable::Color(v) => &v.field,
            VisualVariable::Size(v) => &v.field,
        }
    }

    pub fn legend_options(&self) -> &LegendOptions {
        match self {
            VisualVariable::Color(v) => &v.legend_options,
            VisualVariable::Size(v) => &v.legend_options,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            VisualVariable::Color(_) => "color",
            VisualVariable::Size(_) => "size",
        }
    }

    pub fn resolve(&self, value: f64) -> Result<VisualEffect> {
        match self {
            VisualVariable::Color(v) => v.resolve(value).map(VisualEffect::Color),
            VisualVariable::Size(v) => v.resolve(value).map(VisualEffect::Size),
        }
    }
}

impl From<ColorVariable> for VisualVariable {
    fn from(variable: ColorVariable) -> Self {
        VisualVariable::Color(variable)
    }
}

impl From<SizeVariable> for VisualVariable {
    fn from(variable: SizeVariable) -> Self {
        VisualVariable::Size(variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapError;
    use serde_json::json;

    #[test]
    fn test_color_variable_from_json() {
        let variable: VisualVariable = serde_json::from_value(json!({
            "type": "color",
            "field": "POP",
            "legendOptions": { "title": "Population" },
            "stops": [
                { "value": 50000, "color": "#f7fcfd" },
                { "value": 100000, "color": "#ccece6" }
            ]
        }))
        .unwrap();

        assert_eq!(variable.field(), "POP");
        assert_eq!(variable.kind(), "color");
        assert_eq!(variable.legend_options().title.as_deref(), Some("Population"));
        match variable.resolve(75_000.0).unwrap() {
            VisualEffect::Color(outcome) => {
                assert_eq!(outcome.value, Color::from_hex("#ccece6").unwrap());
                assert_eq!(outcome.index, 1);
            }
            other => panic!("unexpected effect {:?}", other),
        }
    }

    #[test]
    fn test_size_variable_keeps_labels() {
        let variable: SizeVariable = serde_json::from_value(json!({
            "field": "POP",
            "stops": [
                { "value": 50000, "size": 3, "label": "< 50,000" },
                { "value": 100000, "size": 6, "label": "50,000 - 100,000" }
            ]
        }))
        .unwrap();

        let outcome = variable.resolve(10.0).unwrap();
        assert_eq!(outcome.value.as_points(), 3.0);
        assert_eq!(outcome.label.as_deref(), Some("< 50,000"));
    }

    #[test]
    fn test_bad_tables_fail_at_parse_time() {
        let empty = serde_json::from_value::<ColorVariable>(json!({
            "field": "POP",
            "stops": []
        }));
        assert!(empty.is_err());

        let unordered = serde_json::from_value::<SizeVariable>(json!({
            "field": "POP",
            "stops": [
                { "value": 100, "size": 6 },
                { "value": 10, "size": 3 }
            ]
        }));
        assert!(unordered.is_err());

        // a color stop cannot carry a size
        let mixed = serde_json::from_value::<ColorVariable>(json!({
            "field": "POP",
            "stops": [{ "value": 1, "size": 3 }]
        }));
        assert!(mixed.is_err());
    }

    #[test]
    fn test_serialized_stops_use_kind_key() {
        let table = BreakpointTable::new(vec![Stop::new(1.0, Color::WHITE)]).unwrap();
        let variable = VisualVariable::from(ColorVariable::new("POP", table));
        let value = serde_json::to_value(&variable).unwrap();
        assert_eq!(value["type"], "color");
        assert_eq!(value["stops"][0]["color"], "#ffffff");
        assert!(value["stops"][0].get("label").is_none());
    }

    #[test]
    fn test_nan_lookup_is_invalid_input() {
        let table = BreakpointTable::new(vec![Stop::new(1.0, Color::WHITE)]).unwrap();
        let variable = ColorVariable::new("POP", table);
        assert!(matches!(
            variable.resolve(f64::NAN),
            Err(MapError::InvalidInput(_))
        ));
    }
}
