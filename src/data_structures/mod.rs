//! Viewer data structures: bounds, region geometry, instances and textures.
//!
//! - `bounds` holds the axis-aligned boxes used to frame regions
//! - `instance` holds the per-region lift and colour uploaded every frame
//! - `model` contains region geometry (CPU) and region meshes (GPU)
//! - `texture` wraps the depth and shadow-map textures

pub mod bounds;
pub mod instance;
pub mod model;
pub mod texture;
