//! Model loading: turns host-parsed geometry into renderable model objects.

use log::debug;

use crate::{
    context::HostRenderer,
    data_structures::{
        scene_graph::{ModelError, ModelObject, ObjectGraph},
        vertex::ModelVertex,
    },
    definitions::EntityDefinition,
};

/**
 * This module contains the geometry handle cache shared by every loaded model.
 */
pub mod cache;

use cache::GeometryCache;

/// Geometry of one named object, as parsed by the host.
#[derive(Clone, Debug)]
pub struct ObjectGeometry {
    pub name: String,
    pub vertices: Vec<ModelVertex>,
}

impl ObjectGeometry {
    pub fn new(name: impl Into<String>, vertices: Vec<ModelVertex>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }

    /// Wraps a flat float buffer of packed vertices.
    pub fn from_floats(name: impl Into<String>, floats: &[f32]) -> Result<Self, ModelError> {
        let name = name.into();
        match ModelVertex::from_floats(floats) {
            Some(vertices) => Ok(Self::new(name, vertices.to_vec())),
            None => Err(ModelError::MalformedGeometry {
                object: name,
                len: floats.len(),
            }),
        }
    }
}

/// Builds every object of `model_name` and links them into an [`ObjectGraph`].
///
/// Objects are kept in the order of `geometry`. The animated-object
/// definitions of `definition` are matched by object name.
pub fn load_model(
    model_name: &str,
    geometry: &[ObjectGeometry],
    definition: &EntityDefinition,
    cache: &GeometryCache,
    host: &mut dyn HostRenderer,
) -> Result<ObjectGraph, ModelError> {
    let objects = geometry
        .iter()
        .map(|object| {
            ModelObject::new(
                model_name,
                &object.name,
                definition.animated_object(&object.name),
                &object.vertices,
                definition,
                cache,
                host,
            )
        })
        .collect();
    let graph = ObjectGraph::build(model_name, objects)?;
    debug!("Loaded model {} with {} objects", model_name, graph.len());
    Ok(graph)
}

/// Drops the cached geometry handles of `model_name`. Graphs built from the
/// model must not be rendered afterwards.
pub fn unload_model(model_name: &str, cache: &GeometryCache) -> usize {
    cache.unload_model(model_name)
}
