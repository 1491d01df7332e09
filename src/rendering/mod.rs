//! Headless render pass
//!
//! Renderers turn features into symbols; the render context records the
//! resulting draw calls for the host that paints them.

pub mod context;
pub mod renderer;
