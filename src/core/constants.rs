//! Core constants for view validation and defaults.

/// Lowest zoom level a view may start at.
pub const MIN_ZOOM: f64 = 0.0;

/// Highest zoom level a view may start at.
pub const MAX_ZOOM: f64 = 24.0;

/// Element id the view is mounted into when none is configured.
pub const DEFAULT_CONTAINER: &str = "viewDiv";
