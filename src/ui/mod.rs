//! View UI configuration: popup templates and the widgets around the map.

pub mod popup;
pub mod widgets;
