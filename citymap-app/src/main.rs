use anyhow::{Context, Result};
use citymap::{FeatureSet, LegendSection, MapBuilder, MapConfig, MapPreset, StyledFeature};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Styles a GeoJSON feature file with one layer of a map configuration and
/// prints the styled features and legend as JSON.
#[derive(Debug, Parser)]
#[command(name = "citymap-app", version, about)]
struct Args {
    /// Map document to load instead of the world-cities preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layer whose renderer styles the features
    #[arg(long, default_value = "cities")]
    layer: String,

    /// Print the legend only
    #[arg(long)]
    legend_only: bool,

    /// Drop features without a numeric value for the renderer fields
    /// instead of failing
    #[arg(long)]
    skip_invalid: bool,

    /// GeoJSON Feature or FeatureCollection
    features: Option<PathBuf>,
}

#[derive(Serialize)]
struct Output {
    legend: Vec<LegendSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<Vec<StyledFeature>>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MapConfig::from_path(path)
            .with_context(|| format!("failed to load map config {}", path.display()))?,
        None => MapPreset::WorldCities.resolve(),
    };
    let map = MapBuilder::from_config(config)
        .build()
        .context("invalid map configuration")?;

    let features = if args.legend_only {
        None
    } else {
        let path = args
            .features
            .as_ref()
            .context("a features file is required unless --legend-only is given")?;
        let mut set = FeatureSet::from_path(path)
            .with_context(|| format!("failed to read features from {}", path.display()))?;

        if args.skip_invalid {
            let layer = map
                .layers()
                .find(&args.layer)
                .with_context(|| format!("no layer '{}'", args.layer))?;
            if let Some(renderer) = layer.renderer() {
                for field in renderer.fields() {
                    let dropped = set.retain_numeric(field);
                    if dropped > 0 {
                        log::warn!("Dropped {} features without a numeric '{}'", dropped, field);
                    }
                }
            }
        }

        log::info!("Styling {} features with layer '{}'", set.len(), args.layer);
        let styled = map
            .style_features(&args.layer, set.features())
            .with_context(|| format!("failed to style layer '{}'", args.layer))?;
        Some(styled)
    };

    let output = Output {
        legend: map.legend(),
        features,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
