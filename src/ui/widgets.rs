//! Widgets placed around the map view.

use crate::layers::{base::LayerTrait, manager::LayerManager};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Named corner of the view UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Placed by the host outside the corner stacks
    Manual,
}

/// Basemaps a map can show under its layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Basemap {
    Streets,
    Satellite,
    Hybrid,
    Topo,
    Gray,
    DarkGray,
    Oceans,
    NationalGeographic,
    Terrain,
    Osm,
}

impl Basemap {
    pub fn id(&self) -> &'static str {
        match self {
            Basemap::Streets => "streets",
            Basemap::Satellite => "satellite",
            Basemap::Hybrid => "hybrid",
            Basemap::Topo => "topo",
            Basemap::Gray => "gray",
            Basemap::DarkGray => "dark-gray",
            Basemap::Oceans => "oceans",
            Basemap::NationalGeographic => "national-geographic",
            Basemap::Terrain => "terrain",
            Basemap::Osm => "osm",
        }
    }
}

impl std::fmt::Display for Basemap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleUnit {
    #[default]
    NonMetric,
    Metric,
    /// Both metric and non-metric bars
    Dual,
}

fn legend_in_panel_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegendWidget {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleBarWidget {
    #[serde(default)]
    pub unit: ScaleUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BasemapToggleWidget {
    pub next_basemap: Basemap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayerListWidget {
    /// Shows each non-group layer's legend in its list item panel
    #[serde(default = "legend_in_panel_by_default")]
    pub legend_in_panel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Widget {
    Legend(LegendWidget),
    ScaleBar(ScaleBarWidget),
    BasemapToggle(BasemapToggleWidget),
    LayerList(LayerListWidget),
}

impl Widget {
    pub fn legend() -> Self {
        Widget::Legend(LegendWidget {})
    }

    pub fn scale_bar(unit: ScaleUnit) -> Self {
        Widget::ScaleBar(ScaleBarWidget { unit })
    }

    pub fn basemap_toggle(next_basemap: Basemap) -> Self {
        Widget::BasemapToggle(BasemapToggleWidget { next_basemap })
    }

    pub fn layer_list(legend_in_panel: bool) -> Self {
        Widget::LayerList(LayerListWidget { legend_in_panel })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Legend(_) => "legend",
            Widget::ScaleBar(_) => "scale-bar",
            Widget::BasemapToggle(_) => "basemap-toggle",
            Widget::LayerList(_) => "layer-list",
        }
    }
}

/// Widget kinds a view holds at most one of
const SINGLE_WIDGETS: [&str; 4] = ["basemap-toggle", "layer-list", "legend", "scale-bar"];

/// Checks a widget set against the basemap it is shown over: one widget
/// per kind, and a basemap toggle that switches to a different basemap.
pub fn validate_widgets<'a>(
    basemap: Basemap,
    widgets: impl IntoIterator<Item = &'a Widget>,
) -> Result<()> {
    let widgets: Vec<&Widget> = widgets.into_iter().collect();

    for kind in SINGLE_WIDGETS {
        let count = widgets.iter().filter(|w| w.kind() == kind).count();
        if count > 1 {
            return Err(MapError::InvalidConfiguration(format!(
                "{} {} widgets configured, at most one is allowed",
                count, kind
            )));
        }
    }

    for widget in widgets {
        if let Widget::BasemapToggle(toggle) = widget {
            if toggle.next_basemap == basemap {
                return Err(MapError::InvalidConfiguration(format!(
                    "basemap toggle would switch '{}' to itself",
                    basemap
                )));
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetConfig {
    pub widget: Widget,
    pub position: UiPosition,
}

impl WidgetConfig {
    pub fn new(widget: Widget, position: UiPosition) -> Self {
        Self { widget, position }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelContent {
    Legend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListItemPanel {
    pub content: PanelContent,
    pub open: bool,
}

/// One row of the layer list. Rows run top-most layer first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerListItem {
    pub layer_id: String,
    pub title: String,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<ListItemPanel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LayerListItem>,
}

impl LayerListItem {
    fn from_layer(layer: &dyn LayerTrait, legend_in_panel: bool) -> Self {
        let is_group = layer.layer_type() == crate::layers::base::LayerType::Group;
        // group legends are already shown by their children
        let panel = (legend_in_panel && !is_group).then_some(ListItemPanel {
            content: PanelContent::Legend,
            open: true,
        });

        Self {
            layer_id: layer.id().to_string(),
            title: layer.title().to_string(),
            visible: layer.is_visible(),
            panel,
            children: layer
                .children()
                .into_iter()
                .rev()
                .map(|child| Self::from_layer(child, legend_in_panel))
                .collect(),
        }
    }
}

/// Widgets by position, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiLayout {
    widgets: Vec<WidgetConfig>,
}

impl UiLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, widget: Widget, position: UiPosition) {
        log::debug!("Adding {} widget at {:?}", widget.kind(), position);
        self.widgets.push(WidgetConfig::new(widget, position));
    }

    pub fn widgets(&self) -> &[WidgetConfig] {
        &self.widgets
    }

    pub fn at(&self, position: UiPosition) -> Vec<&Widget> {
        self.widgets
            .iter()
            .filter(|w| w.position == position)
            .map(|w| &w.widget)
            .collect()
    }

    pub fn position_of(&self, kind: &str) -> Option<UiPosition> {
        self.widgets
            .iter()
            .find(|w| w.widget.kind() == kind)
            .map(|w| w.position)
    }

    pub fn basemap_toggle_mut(&mut self) -> Option<&mut Basemap> {
        self.widgets.iter_mut().find_map(|w| match &mut w.widget {
            Widget::BasemapToggle(toggle) => Some(&mut toggle.next_basemap),
            _ => None,
        })
    }

    /// Layer list rows, `None` without a layer list widget.
    pub fn layer_list(&self, layers: &LayerManager) -> Option<Vec<LayerListItem>> {
        let legend_in_panel = self.widgets.iter().find_map(|w| match &w.widget {
            Widget::LayerList(list) => Some(list.legend_in_panel),
            _ => None,
        })?;

        Some(
            layers
                .layers()
                .into_iter()
                .rev()
                .map(|layer| LayerListItem::from_layer(layer, legend_in_panel))
                .collect(),
        )
    }
}
