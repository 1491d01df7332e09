use citymap::{
    presets::{POPULATION_COLORS, POPULATION_SIZES},
    resolve, BreakpointTable, Color, FeatureSet, MapBuilder, MapConfig, MapError, MapPreset,
    Stop,
};
use serde_json::json;

fn example_table() -> BreakpointTable<Color> {
    let stops = [
        (50_000.0, "#f7fcfd"),
        (100_000.0, "#ccece6"),
        (500_000.0, "#66c2a4"),
        (1_000_000.0, "#238b45"),
        (5_000_000.0, "#006d2c"),
        (10_000_001.0, "#00441b"),
    ]
    .iter()
    .map(|(value, hex)| Stop::new(*value, Color::from_hex(hex).unwrap()))
    .collect();
    BreakpointTable::new(stops).unwrap()
}

fn hex_for(value: f64) -> String {
    resolve(value, &example_table()).unwrap().value.to_hex()
}

#[test]
fn test_example_table_lookups() {
    assert_eq!(hex_for(75_000.0), "#ccece6");
    assert_eq!(hex_for(49_999.0), "#f7fcfd");
    assert_eq!(hex_for(20_000_000.0), "#00441b");
}

#[test]
fn test_bucket_edges() {
    let table = example_table();
    let first = table.stops()[0].value;
    assert_eq!(resolve(first, &table).unwrap().index, 0);
    assert_eq!(resolve(-1.0, &table).unwrap().index, 0);

    let last = table.len() - 1;
    assert_eq!(resolve(5_000_000.5, &table).unwrap().index, last);
    assert_eq!(resolve(10_000_001.0, &table).unwrap().index, last);
    assert_eq!(resolve(f64::MAX, &table).unwrap().index, last);

    // thresholds are inclusive upper bounds
    assert_eq!(hex_for(100_000.0), "#ccece6");
    assert_eq!(hex_for(100_000.1), "#66c2a4");
}

#[test]
fn test_lookup_is_monotonic_and_idempotent() {
    let table = example_table();
    let values = [0.0, 1.0, 49_999.0, 50_000.0, 50_001.0, 75_000.0, 250_000.0, 999_999.0, 4e6, 9e6, 2e7];

    let indices: Vec<usize> = values
        .iter()
        .map(|v| table.bucket_index(*v).unwrap())
        .collect();
    assert!(indices.windows(2).all(|w| w[0] <= w[1]));

    for value in values {
        assert_eq!(resolve(value, &table).unwrap(), resolve(value, &table).unwrap());
    }
}

#[test]
fn test_bad_tables_and_values() {
    assert!(matches!(
        BreakpointTable::<Color>::new(Vec::new()),
        Err(MapError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        BreakpointTable::new(vec![Stop::new(10.0, Color::BLACK), Stop::new(10.0, Color::WHITE)]),
        Err(MapError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        example_table().resolve(f64::NAN),
        Err(MapError::InvalidInput(_))
    ));
}

#[test]
fn test_preset_ramps() {
    assert_eq!(POPULATION_COLORS.len(), 6);
    let size = POPULATION_SIZES.resolve(75_000.0).unwrap();
    assert_eq!(size.value.as_points(), 6.0);
    assert_eq!(size.label.as_deref(), Some("50,000 - 100,000"));
}

#[test]
fn test_world_cities_document_round_trip() {
    let config = MapPreset::WorldCities.resolve();
    let json = config.to_json_pretty().unwrap();
    let parsed = MapConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed, config);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["basemap"], json!("dark-gray"));
    assert_eq!(value["view"]["center"], json!([20.0, 45.0]));
    assert_eq!(value["layers"][1]["renderer"]["visualVariables"][0]["type"], json!("color"));
}

#[test]
fn test_document_with_unsorted_stops_is_rejected() {
    let document = json!({
        "basemap": "gray",
        "view": { "center": [0.0, 0.0], "zoom": 3 },
        "layers": [{
            "type": "feature",
            "id": "cities",
            "renderer": {
                "type": "simple",
                "symbol": { "type": "simple-marker" },
                "visualVariables": [{
                    "type": "color",
                    "field": "POP",
                    "stops": [
                        { "value": 100, "color": "#ffffff" },
                        { "value": 50, "color": "#000000" }
                    ]
                }]
            }
        }]
    });
    assert!(MapConfig::from_json_str(&document.to_string()).is_err());
}

#[test]
fn test_document_with_unknown_fields_is_rejected() {
    let document = json!({
        "basemap": "gray",
        "view": { "center": [0.0, 0.0], "zoom": 3 },
        "autocast": true
    });
    assert!(MapConfig::from_json_str(&document.to_string()).is_err());
}

#[test]
fn test_style_geojson_cities() {
    let map = MapBuilder::from_preset(&MapPreset::WorldCities).build().unwrap();
    let mut features = FeatureSet::from_geojson_str(
        &json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": 1,
                    "properties": { "CITY_NAME": "Zagreb", "POP": 691724 },
                    "geometry": { "type": "Point", "coordinates": [15.98, 45.81] }
                },
                {
                    "type": "Feature",
                    "id": 2,
                    "properties": { "CITY_NAME": "Nowhere" },
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
                }
            ]
        })
        .to_string(),
    )
    .unwrap();

    assert!(matches!(
        map.style_features("cities", features.features()),
        Err(MapError::InvalidInput(_))
    ));

    assert_eq!(features.retain_numeric("POP"), 1);
    let styled = map.style_features("cities", features.features()).unwrap();
    assert_eq!(styled[0].symbol.color().to_hex(), "#238b45");
    assert_eq!(styled[0].symbol.size().unwrap().as_points(), 12.0);
}

#[test]
fn test_legend_labels() {
    let map = MapBuilder::from_preset(&MapPreset::WorldCities).build().unwrap();
    let legend = map.legend();

    assert_eq!(
        legend[0].labels(),
        vec![
            "≤ 50,000",
            "50,000 – 100,000",
            "100,000 – 500,000",
            "500,000 – 1,000,000",
            "1,000,000 – 5,000,000",
            "> 5,000,000",
        ]
    );
    assert_eq!(legend[1].labels()[0], "< 50,000");
    assert_eq!(legend[1].labels()[5], "> 10,000,000");
}
