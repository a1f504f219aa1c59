//! vehicle-ngin
//!
//! Model rendering, part shims and the config schema of a vehicle content
//! plugin. The crate is linked into a host game runtime that owns the graphics
//! context and the entity lifecycle; everything here talks to the host through
//! the traits in `context`.
//!
//! High-level modules
//! - `config`: plugin configuration with commented defaults, loaded from JSON
//! - `context`: host seams (renderer, animated entity, per-call frame)
//! - `data_structures`: vertices, poses, object classification, the object
//!   render graph and ground-device parts
//! - `definitions`: pack JSON definitions the model loader reads
//! - `resources`: the geometry cache and model loading
//! - `render`: render traversal over a loaded model
//! - `transforms`: render-state steps applied around an object's draw call
//!
//! The host calls [`init`] once when the plugin is loaded.

pub mod config;
pub mod context;
pub mod data_structures;
pub mod definitions;
pub mod render;
pub mod resources;
pub mod transforms;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use context::{AnimationEntity, Frame, GeometryHandle, HostRenderer, Pass};
pub use data_structures::scene_graph::{ModelError, ModelObject, ObjectGraph};

/// Sets up logging and loads (or creates) the config file at `config_path`.
pub fn init(config_path: impl AsRef<std::path::Path>) -> anyhow::Result<config::Config> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };
    let config = config::Config::load_from_disk(config_path)?;
    log::info!("Loaded config");
    Ok(config)
}
