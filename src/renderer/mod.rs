//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into flat-colored triangles and drawn
//! with a single pass-through pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
