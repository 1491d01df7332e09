//! Data-driven visual encoding: breakpoint tables, the color and size
//! variables built on them, and the legends derived from both.

pub mod breakpoint;
pub mod legend;
pub mod variable;
