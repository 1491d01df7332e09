//! Static legends derived from breakpoint tables.

use crate::style::{color::Color, symbol::ScreenLength};
use crate::ui::popup::NumberFormat;
use crate::visual::breakpoint::BreakpointTable;
use crate::visual::variable::VisualVariable;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Swatch {
    Color(Color),
    Size(ScreenLength),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub threshold: f64,
    pub label: String,
    pub swatch: Swatch,
}

/// Legend for one visual variable of one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendSection {
    pub layer_id: String,
    pub title: String,
    pub field: String,
    pub entries: Vec<LegendEntry>,
}

impl LegendSection {
    /// Builds the section for `variable`, or `None` when its legend is
    /// hidden.
    pub fn from_variable(layer_id: &str, variable: &VisualVariable) -> Option<Self> {
        let options = variable.legend_options();
        if options.hidden {
            return None;
        }

        let entries = match variable {
            VisualVariable::Color(v) => entries(&v.stops, Swatch::Color),
            VisualVariable::Size(v) => entries(&v.stops, Swatch::Size),
        };

        Some(Self {
            layer_id: layer_id.to_string(),
            title: options
                .title
                .clone()
                .unwrap_or_else(|| variable.field().to_string()),
            field: variable.field().to_string(),
            entries,
        })
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }
}

fn entries<V: Copy>(table: &BreakpointTable<V>, swatch: impl Fn(V) -> Swatch) -> Vec<LegendEntry> {
    let thresholds: Vec<f64> = table.thresholds().collect();
    table
        .stops()
        .iter()
        .enumerate()
        .map(|(i, stop)| LegendEntry {
            threshold: stop.value,
            label: stop
                .label
                .clone()
                .unwrap_or_else(|| bucket_label(&thresholds, i)),
            swatch: swatch(stop.visual),
        })
        .collect()
}

/// Label for bucket `index`: `(previous, threshold]`, the first bucket
/// unbounded below and the last unbounded above.
pub fn bucket_label(thresholds: &[f64], index: usize) -> String {
    let format = NumberFormat::grouped(0);
    let last = thresholds.len().saturating_sub(1);

    match (index, thresholds.len()) {
        (_, 0) => String::new(),
        (_, 1) => format.format(thresholds[0]),
        (0, _) => format!("≤ {}", format.format(thresholds[0])),
        (i, _) if i >= last => format!("> {}", format.format(thresholds[last - 1])),
        (i, _) => format!(
            "{} – {}",
            format.format(thresholds[i - 1]),
            format.format(thresholds[i])
        ),
    }
}
