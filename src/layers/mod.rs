pub mod base;
pub mod config;
pub mod feature;
pub mod group;
pub mod macros;
pub mod manager;
