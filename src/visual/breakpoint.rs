//! Stepped breakpoint tables.
//!
//! A table is an ordered list of stops. Each stop's threshold is the
//! inclusive upper bound of its bucket; the bucket starts just above the
//! previous threshold. Values above the last threshold fall into the last
//! bucket, so every finite number resolves to exactly one stop.

use crate::{MapError, Result};
use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A value a stop can bind: a color, a size.
///
/// `Repr` is the stop's configuration shape, which names the bound value
/// after its kind (`{ "value": 1, "color": "#fff" }` or
/// `{ "value": 1, "size": 3 }`).
pub trait VisualValue: Clone + PartialEq + Debug + Sized {
    type Repr: Serialize + DeserializeOwned + From<Stop<Self>> + Into<Stop<Self>>;
}

/// One segment of a stepped ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop<V> {
    pub value: f64,
    pub visual: V,
    pub label: Option<String>,
}

impl<V> Stop<V> {
    pub fn new(value: f64, visual: V) -> Self {
        Self {
            value,
            visual,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// The stop selected for one attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualOutcome<V> {
    /// Position of the selected stop in its table.
    pub index: usize,
    pub value: V,
    pub label: Option<String>,
}

/// Validated stop table: non-empty, finite and strictly increasing
/// thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable<V> {
    stops: Vec<Stop<V>>,
}

fn check_stops<V>(stops: &[Stop<V>]) -> Result<()> {
    if stops.is_empty() {
        return Err(MapError::InvalidConfiguration(
            "breakpoint table must contain at least one stop".to_string(),
        ));
    }

    if let Some(stop) = stops.iter().find(|s| !s.value.is_finite()) {
        return Err(MapError::InvalidConfiguration(format!(
            "breakpoint threshold must be finite, got {}",
            stop.value
        )));
    }

    if let Some(pair) = stops.windows(2).find(|w| w[0].value >= w[1].value) {
        return Err(MapError::InvalidConfiguration(format!(
            "breakpoint thresholds must be strictly increasing: {} is followed by {}",
            pair[0].value, pair[1].value
        )));
    }

    Ok(())
}

impl<V> BreakpointTable<V> {
    pub fn new(stops: Vec<Stop<V>>) -> Result<Self> {
        check_stops(&stops)?;
        Ok(Self { stops })
    }

    /// Table over built-in stops already known to be ordered
    pub(crate) fn from_sorted(stops: Vec<Stop<V>>) -> Self {
        debug_assert!(check_stops(&stops).is_ok(), "built-in stops out of order");
        Self { stops }
    }

    pub fn stops(&self) -> &[Stop<V>] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Never true for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn thresholds(&self) -> impl Iterator<Item = f64> + '_ {
        self.stops.iter().map(|s| s.value)
    }

    /// Index of the first stop whose threshold is `>= value`, or of the
    /// last stop when `value` exceeds every threshold.
    pub fn bucket_index(&self, value: f64) -> Result<usize> {
        if !value.is_finite() {
            return Err(MapError::InvalidInput(format!(
                "cannot resolve non-finite value {}",
                value
            )));
        }

        let index = self.stops.partition_point(|stop| stop.value < value);
        Ok(index.min(self.stops.len() - 1))
    }

    pub fn stop_for(&self, value: f64) -> Result<&Stop<V>> {
        let index = self.bucket_index(value)?;
        Ok(&self.stops[index])
    }
}

impl<V: Clone> BreakpointTable<V> {
    pub fn resolve(&self, value: f64) -> Result<VisualOutcome<V>> {
        let index = self.bucket_index(value)?;
        let stop = &self.stops[index];
        Ok(VisualOutcome {
            index,
            value: stop.visual.clone(),
            label: stop.label.clone(),
        })
    }
}

/// Resolves `value` against `table`.
pub fn resolve<V: Clone>(value: f64, table: &BreakpointTable<V>) -> Result<VisualOutcome<V>> {
    table.resolve(value)
}

impl<V> TryFrom<Vec<Stop<V>>> for BreakpointTable<V> {
    type Error = MapError;

    fn try_from(stops: Vec<Stop<V>>) -> Result<Self> {
        Self::new(stops)
    }
}

impl<V: VisualValue> Serialize for BreakpointTable<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.stops.iter().cloned().map(V::Repr::from))
    }
}

impl<'de, V: VisualValue> Deserialize<'de> for BreakpointTable<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let reprs = Vec::<V::Repr>::deserialize(deserializer)?;
        let stops = reprs.into_iter().map(Into::into).collect();
        Self::new(stops).map_err(serde::de::Error::custom)
    }
}
