use citymap::{
    data::geojson::GeoJsonGeometry, Feature, MapBuilder, MapPreset, UiPosition,
};

/// Example of styling world cities without any rendering host
fn main() -> citymap::Result<()> {
    println!("🗺️ Citymap Headless Example");
    println!("===========================");

    let mut map = MapBuilder::from_preset(&MapPreset::WorldCities).build()?;

    println!("✅ Map created:");
    println!("   Basemap: {}", map.basemap());
    println!(
        "   Center: {:.4}, {:.4} at zoom {}",
        map.view().center.lat,
        map.view().center.lng,
        map.view().zoom
    );
    println!("   Layers: {:?}", map.layers().list_layers());

    println!("\n📊 Legend:");
    for section in map.legend() {
        println!("   {} ({})", section.title, section.field);
        for label in section.labels() {
            println!("     - {}", label);
        }
    }

    let cities = [
        ("Zagreb", [15.98, 45.81], 691_724.0),
        ("Belgrade", [20.46, 44.82], 1_166_763.0),
        ("Vinkovci", [18.80, 45.29], 35_312.0),
        ("Istanbul", [28.98, 41.01], 15_462_452.0),
    ];
    let features: Vec<Feature> = cities
        .iter()
        .enumerate()
        .map(|(i, (name, coordinates, pop))| {
            Feature::new(GeoJsonGeometry::Point {
                coordinates: *coordinates,
            })
            .with_id(i as u64)
            .with_attribute("CITY_NAME", *name)
            .with_attribute("POP", *pop)
        })
        .collect();

    println!("\n🎯 Styling cities:");
    for (styled, (name, _, pop)) in map.style_features("cities", &features)?.iter().zip(cities) {
        let size = styled
            .symbol
            .size()
            .map(|s| format!("{}pt", s.as_points()))
            .unwrap_or_default();
        println!(
            "   📍 {:<10} pop {:>10} -> {} {}",
            name,
            pop,
            styled.symbol.color(),
            size
        );
    }

    println!("\n🔁 Basemap toggle:");
    let shown = map.toggle_basemap()?;
    println!("   Now showing {}", shown);

    println!("\n🧭 Widgets:");
    for position in [
        UiPosition::TopRight,
        UiPosition::BottomRight,
        UiPosition::BottomLeft,
    ] {
        for widget in map.widgets_at(position) {
            println!("   {:?}: {}", position, widget.kind());
        }
    }

    println!("\n✨ Headless example completed successfully!");
    Ok(())
}
