//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat-colored triangle list every frame from
//! read-only match state, then mapped from field space to NDC.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, field_to_ndc};
pub use scene::{FrameView, build_scene};
pub use vertex::Vertex;
