pub mod color;
pub mod symbol;
