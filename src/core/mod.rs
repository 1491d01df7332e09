//! Coordinates, map documents, the builder and the assembled map.

pub mod builder;
pub mod config;
pub mod constants;
pub mod geo;
pub mod map;
