//! Core data types of the model renderer.
//!
//! - `vertex` is the packed vertex layout shared with the host
//! - `instance` holds a pose (translation, rotation, scale) used by animations
//! - `classification` resolves an object's render traits at load time
//! - `scene_graph` holds model objects and their `apply_after` forest
//! - `part` holds ground devices and their fake counterparts

pub mod classification;
pub mod instance;
pub mod part;
pub mod scene_graph;
pub mod vertex;
