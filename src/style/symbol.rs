//! Simple marker, fill and line symbols.
//!
//! These mirror the symbol descriptors a feature service renderer expects,
//! with every recognized field spelled out: anything else in a
//! configuration document is rejected when it is parsed.

use crate::style::color::Color;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points per CSS pixel (1pt = 4/3 px).
const POINTS_PER_PIXEL: f64 = 0.75;

/// A non-negative screen length, stored in points.
///
/// Configuration may give a bare number (points) or a string with a `px`
/// or `pt` suffix, e.g. `"0.25px"`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "LengthRepr", into = "f64")]
pub struct ScreenLength(f64);

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f64),
    Text(String),
}

impl ScreenLength {
    pub fn points(points: f64) -> Result<Self> {
        if !points.is_finite() || points < 0.0 {
            return Err(MapError::InvalidConfiguration(format!(
                "screen length must be a finite non-negative number, got {}",
                points
            )));
        }
        Ok(Self(points))
    }

    /// Length for values known at compile time to be valid.
    pub(crate) const fn from_points_const(points: f64) -> Self {
        Self(points)
    }

    pub fn pixels(pixels: f64) -> Result<Self> {
        Self::points(pixels * POINTS_PER_PIXEL)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let parse_number = |s: &str| {
            s.trim().parse::<f64>().map_err(|_| {
                MapError::ParseError(format!("Invalid screen length '{}'", text))
            })
        };

        if let Some(px) = text.strip_suffix("px") {
            Self::pixels(parse_number(px)?)
        } else if let Some(pt) = text.strip_suffix("pt") {
            Self::points(parse_number(pt)?)
        } else {
            Self::points(parse_number(text)?)
        }
    }

    pub fn as_points(&self) -> f64 {
        self.0
    }

    pub fn as_pixels(&self) -> f64 {
        self.0 / POINTS_PER_PIXEL
    }
}

impl TryFrom<LengthRepr> for ScreenLength {
    type Error = MapError;

    fn try_from(repr: LengthRepr) -> Result<Self> {
        match repr {
            LengthRepr::Number(points) => Self::points(points),
            LengthRepr::Text(text) => Self::parse(&text),
        }
    }
}

impl From<ScreenLength> for f64 {
    fn from(length: ScreenLength) -> Self {
        length.0
    }
}

impl fmt::Display for ScreenLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}pt", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerStyle {
    #[default]
    Circle,
    Square,
    Cross,
    X,
    Diamond,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    #[default]
    Solid,
    None,
    Horizontal,
    Vertical,
    Cross,
    DiagonalCross,
    ForwardDiagonal,
    BackwardDiagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    #[default]
    Solid,
    None,
    Dash,
    Dot,
    DashDot,
    ShortDash,
    LongDash,
}

fn default_marker_color() -> Color {
    Color::rgba(255, 255, 255, 64)
}

fn default_fill_color() -> Color {
    Color::rgba(0, 0, 0, 64)
}

fn default_marker_size() -> ScreenLength {
    ScreenLength::from_points_const(12.0)
}

fn default_line_color() -> Color {
    Color::BLACK
}

fn default_line_width() -> ScreenLength {
    ScreenLength::from_points_const(0.75)
}

/// Outline or line symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SimpleLineSymbol {
    #[serde(default)]
    pub style: LineStyle,
    #[serde(default = "default_line_color")]
    pub color: Color,
    #[serde(default = "default_line_width")]
    pub width: ScreenLength,
}

impl SimpleLineSymbol {
    pub fn new(color: Color, width: ScreenLength) -> Self {
        Self {
            style: LineStyle::Solid,
            color,
            width,
        }
    }
}

impl Default for SimpleLineSymbol {
    fn default() -> Self {
        Self::new(Color::BLACK, default_line_width())
    }
}

/// Point marker symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SimpleMarkerSymbol {
    #[serde(default)]
    pub style: MarkerStyle,
    #[serde(default = "default_marker_color")]
    pub color: Color,
    #[serde(default = "default_marker_size")]
    pub size: ScreenLength,
    #[serde(default)]
    pub outline: SimpleLineSymbol,
}

impl SimpleMarkerSymbol {
    pub fn with_outline(mut self, outline: SimpleLineSymbol) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: ScreenLength) -> Self {
        self.size = size;
        self
    }
}

impl Default for SimpleMarkerSymbol {
    fn default() -> Self {
        Self {
            style: MarkerStyle::Circle,
            color: default_marker_color(),
            size: default_marker_size(),
            outline: SimpleLineSymbol::default(),
        }
    }
}

/// Polygon fill symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SimpleFillSymbol {
    #[serde(default)]
    pub style: FillStyle,
    #[serde(default = "default_fill_color")]
    pub color: Color,
    #[serde(default)]
    pub outline: SimpleLineSymbol,
}

impl SimpleFillSymbol {
    pub fn with_outline(mut self, outline: SimpleLineSymbol) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for SimpleFillSymbol {
    fn default() -> Self {
        Self {
            style: FillStyle::Solid,
            color: default_fill_color(),
            outline: SimpleLineSymbol::default(),
        }
    }
}

/// Any symbol a simple renderer can draw with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Symbol {
    SimpleMarker(SimpleMarkerSymbol),
    SimpleFill(SimpleFillSymbol),
    SimpleLine(SimpleLineSymbol),
}

impl Symbol {
    pub fn kind(&self) -> &'static str {
        match self {
            Symbol::SimpleMarker(_) => "simple-marker",
            Symbol::SimpleFill(_) => "simple-fill",
            Symbol::SimpleLine(_) => "simple-line",
        }
    }

    /// Applies a color override the way a color visual variable does.
    pub fn set_color(&mut self, color: Color) {
        match self {
            Symbol::SimpleMarker(marker) => marker.color = color,
            Symbol::SimpleFill(fill) => fill.color = color,
            Symbol::SimpleLine(line) => line.color = color,
        }
    }

    /// Applies a size override. Returns `false` when the symbol has no
    /// size to set (fills).
    pub fn set_size(&mut self, size: ScreenLength) -> bool {
        match self {
            Symbol::SimpleMarker(marker) => {
                marker.size = size;
                true
            }
            Symbol::SimpleLine(line) => {
                line.width = size;
                true
            }
            Symbol::SimpleFill(_) => false,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Symbol::SimpleMarker(marker) => marker.color,
            Symbol::SimpleFill(fill) => fill.color,
            Symbol::SimpleLine(line) => line.color,
        }
    }

    pub fn size(&self) -> Option<ScreenLength> {
        match self {
            Symbol::SimpleMarker(marker) => Some(marker.size),
            Symbol::SimpleLine(line) => Some(line.width),
            Symbol::SimpleFill(_) => None,
        }
    }
}

impl From<SimpleMarkerSymbol> for Symbol {
    fn from(symbol: SimpleMarkerSymbol) -> Self {
        Symbol::SimpleMarker(symbol)
    }
}

impl From<SimpleFillSymbol> for Symbol {
    fn from(symbol: SimpleFillSymbol) -> Self {
        Symbol::SimpleFill(symbol)
    }
}

impl From<SimpleLineSymbol> for Symbol {
    fn from(symbol: SimpleLineSymbol) -> Self {
        Symbol::SimpleLine(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_screen_length_units() {
        assert_eq!(ScreenLength::parse("1").unwrap().as_points(), 1.0);
        assert_eq!(ScreenLength::parse("0.25px").unwrap().as_points(), 0.1875);
        assert_eq!(ScreenLength::parse("2pt").unwrap().as_points(), 2.0);
        assert_eq!(ScreenLength::points(3.0).unwrap().as_pixels(), 4.0);
        assert!(ScreenLength::parse("wide").is_err());
        assert!(ScreenLength::points(-1.0).is_err());
        assert!(ScreenLength::points(f64::NAN).is_err());
    }

    #[test]
    fn test_marker_with_outline_from_json() {
        let symbol: Symbol = serde_json::from_value(json!({
            "type": "simple-marker",
            "outline": { "color": "#71de6e", "width": 1 }
        }))
        .unwrap();

        match symbol {
            Symbol::SimpleMarker(marker) => {
                assert_eq!(marker.style, MarkerStyle::Circle);
                assert_eq!(marker.outline.color, Color::rgb(0x71, 0xde, 0x6e));
                assert_eq!(marker.outline.width.as_points(), 1.0);
                assert_eq!(marker.size.as_points(), 12.0);
            }
            other => panic!("unexpected symbol {:?}", other),
        }
    }

    #[test]
    fn test_fill_with_pixel_outline_from_json() {
        let symbol: Symbol = serde_json::from_value(json!({
            "type": "simple-fill",
            "outline": { "color": "#78f81f", "width": "0.25px" }
        }))
        .unwrap();

        assert_eq!(symbol.kind(), "simple-fill");
        assert_eq!(symbol.size(), None);
        if let Symbol::SimpleFill(fill) = symbol {
            assert_eq!(fill.outline.width.as_pixels(), 0.25);
        }
    }

    #[test]
    fn test_unrecognized_fields_are_rejected() {
        let result: std::result::Result<Symbol, _> = serde_json::from_value(json!({
            "type": "simple-marker",
            "outlien": { "color": "#71de6e" }
        }));
        assert!(result.is_err());

        let result: std::result::Result<Symbol, _> =
            serde_json::from_value(json!({ "type": "picture-marker" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let mut symbol = Symbol::from(SimpleMarkerSymbol::default());
        symbol.set_color(Color::rgb(0, 0x44, 0x1b));
        assert!(symbol.set_size(ScreenLength::points(20.0).unwrap()));
        assert_eq!(symbol.color(), Color::rgb(0, 0x44, 0x1b));
        assert_eq!(symbol.size().map(|s| s.as_points()), Some(20.0));

        let mut fill = Symbol::from(SimpleFillSymbol::default());
        assert!(!fill.set_size(ScreenLength::points(4.0).unwrap()));
    }
}
