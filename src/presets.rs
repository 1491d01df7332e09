//! The world-cities map: continents under city markers shaded and sized by
//! population.

use crate::core::{
    config::{MapConfig, ViewConfig},
    geo::LatLng,
};
use crate::layers::config::{FeatureLayerConfig, LayerConfig};
use crate::rendering::renderer::SimpleRenderer;
use crate::style::{
    color::Color,
    symbol::{ScreenLength, SimpleFillSymbol, SimpleLineSymbol, SimpleMarkerSymbol},
};
use crate::ui::{
    popup::{FieldInfo, NumberFormat, PopupTemplate},
    widgets::{Basemap, ScaleUnit, UiPosition, Widget, WidgetConfig},
};
use crate::visual::{
    breakpoint::{BreakpointTable, Stop},
    variable::{ColorVariable, SizeVariable},
};
use once_cell::sync::Lazy;

pub const CITIES_URL: &str =
    "http://sampleserver6.arcgisonline.com/arcgis/rest/services/SampleWorldCities/MapServer/0";
pub const CONTINENTS_URL: &str =
    "http://sampleserver6.arcgisonline.com/arcgis/rest/services/SampleWorldCities/MapServer/1";

/// Attribute holding a city's population.
pub const POPULATION_FIELD: &str = "POP";

const COLOR_RAMP: [(f64, Color); 6] = [
    (50_000.0, Color::rgb(0xf7, 0xfc, 0xfd)),
    (100_000.0, Color::rgb(0xcc, 0xec, 0xe6)),
    (500_000.0, Color::rgb(0x66, 0xc2, 0xa4)),
    (1_000_000.0, Color::rgb(0x23, 0x8b, 0x45)),
    (5_000_000.0, Color::rgb(0x00, 0x6d, 0x2c)),
    (10_000_001.0, Color::rgb(0x00, 0x44, 0x1b)),
];

const fn pt(points: f64) -> ScreenLength {
    ScreenLength::from_points_const(points)
}

const SIZE_RAMP: [(f64, ScreenLength, &str); 6] = [
    (50_000.0, pt(3.0), "< 50,000"),
    (100_000.0, pt(6.0), "50,000 - 100,000"),
    (500_000.0, pt(9.0), "250,000 - 500,000"),
    (1_000_000.0, pt(12.0), "500,000 - 1,000,000"),
    (5_000_000.0, pt(15.0), "1,000,000 - 5,000,000"),
    (10_000_001.0, pt(20.0), "> 10,000,000"),
];

/// Population color ramp, light to dark green
pub static POPULATION_COLORS: Lazy<BreakpointTable<Color>> = Lazy::new(|| {
    let stops = COLOR_RAMP
        .iter()
        .map(|&(value, color)| Stop::new(value, color))
        .collect();
    BreakpointTable::from_sorted(stops)
});

/// Population marker sizes in points, with their legend labels
pub static POPULATION_SIZES: Lazy<BreakpointTable<ScreenLength>> = Lazy::new(|| {
    let stops = SIZE_RAMP
        .iter()
        .map(|&(value, size, label)| Stop::new(value, size).with_label(label))
        .collect();
    BreakpointTable::from_sorted(stops)
});

pub fn city_renderer() -> SimpleRenderer {
    let outline = SimpleLineSymbol::new(Color::rgb(0x71, 0xde, 0x6e), pt(1.0));

    SimpleRenderer::new(SimpleMarkerSymbol::default().with_outline(outline))
        .with_visual_variable(
            ColorVariable::new(POPULATION_FIELD, POPULATION_COLORS.clone())
                .with_legend_title("Population Per City By Color Ramp"),
        )
        .with_visual_variable(
            SizeVariable::new(POPULATION_FIELD, POPULATION_SIZES.clone())
                .with_legend_title("Population Per City By Point Size"),
        )
}

pub fn continent_renderer() -> SimpleRenderer {
    let outline = SimpleLineSymbol::new(
        Color::rgb(0x78, 0xf8, 0x1f),
        // 0.25px
        pt(0.1875),
    );
    SimpleRenderer::new(SimpleFillSymbol::default().with_outline(outline))
}

fn grouped_field(name: &str) -> FieldInfo {
    FieldInfo::new(name, NumberFormat::grouped(0))
}

pub fn city_popup() -> PopupTemplate {
    PopupTemplate::new(
        "World Cities: {CITY_NAME}",
        "The population of {CITY_NAME} is {POP}.<br />",
    )
    .with_field(grouped_field("POP"))
    .with_field(FieldInfo::new(
        "CITY_NAME",
        NumberFormat {
            digit_separator: false,
            places: Some(0),
        },
    ))
}

pub fn continent_popup() -> PopupTemplate {
    PopupTemplate::new(
        "Continents of the World",
        "{CONTINENT} has a total of {SQMI} square miles.",
    )
    .with_field(grouped_field("CONTINENT"))
    .with_field(grouped_field("SQMI"))
}

/// The complete world-cities document.
pub fn world_cities() -> MapConfig {
    let continents = FeatureLayerConfig {
        title: Some("Continents".to_string()),
        url: Some(CONTINENTS_URL.to_string()),
        renderer: Some(continent_renderer().into()),
        popup_template: Some(continent_popup()),
        ..FeatureLayerConfig::new("continents")
    };

    let cities = FeatureLayerConfig {
        title: Some("World Cities".to_string()),
        url: Some(CITIES_URL.to_string()),
        renderer: Some(city_renderer().into()),
        popup_template: Some(city_popup()),
        ..FeatureLayerConfig::new("cities")
    };

    MapConfig {
        basemap: Basemap::DarkGray,
        view: ViewConfig::new(LatLng::new(45.0, 20.0), 4.0),
        layers: vec![LayerConfig::Feature(continents), LayerConfig::Feature(cities)],
        widgets: vec![
            WidgetConfig::new(Widget::layer_list(true), UiPosition::TopRight),
            WidgetConfig::new(Widget::basemap_toggle(Basemap::Satellite), UiPosition::BottomRight),
            WidgetConfig::new(Widget::scale_bar(ScaleUnit::Dual), UiPosition::BottomLeft),
        ],
    }
}
