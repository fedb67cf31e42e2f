//! region-viewer
//!
//! An interactive 3D map of named regions. Each region is a glTF model;
//! hovering its entry in a list lifts and tints it and flies the camera to
//! it, leaving the list returns to a top-down overview. Runs natively in a
//! window (arrow keys walk the list) and in the browser (a DOM list drives
//! hover).
//!
//! High-level modules
//! - `config`: every tunable of the viewer, with the defaults of the map
//! - `registry`: the region list and the per-region slot store
//! - `hover`: hover events and the hovered region
//! - `animation`: region lift/tint and the camera rig
//! - `state`: the viewer state and its per-frame update
//! - `resources`: loading region models
//! - `context`, `pipelines`, `render`: GPU setup and drawing
//! - `flow`: the event loop and [`run`]
//!

pub mod animation;
pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod hover;
pub mod pipelines;
pub mod registry;
pub mod render;
pub mod resources;
pub mod state;
pub mod stats;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::ViewerConfig;
pub use flow::run;
