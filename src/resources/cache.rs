//! Geometry handle cache.
//!
//! Model objects are built once per model, but the same model is loaded for
//! many entities. Geometry is uploaded to the host once per
//! (model name, object name) pair and the resulting handle is shared. The host
//! owns the uploaded geometry; dropping a handle from this cache never frees
//! it on the host side.

use std::{collections::HashMap, sync::LazyLock};

use dashmap::DashMap;
use log::debug;

use crate::{
    context::{GeometryHandle, HostRenderer},
    data_structures::vertex::ModelVertex,
};

static GLOBAL: LazyLock<GeometryCache> = LazyLock::new(GeometryCache::new);

#[derive(Debug, Default)]
pub struct GeometryCache {
    models: DashMap<String, HashMap<String, GeometryHandle>>,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache. Hosts that load models from several places
    /// share handles through this instance.
    pub fn global() -> &'static GeometryCache {
        &GLOBAL
    }

    pub fn get(&self, model_name: &str, object_name: &str) -> Option<GeometryHandle> {
        self.models
            .get(model_name)
            .and_then(|objects| objects.get(object_name).copied())
    }

    /// Returns the cached handle for the pair, uploading `vertices` first if
    /// there is none.
    ///
    /// The model's entry stays locked during the upload, so concurrent callers
    /// for the same model wait and observe the first upload's handle.
    pub fn get_or_upload(
        &self,
        model_name: &str,
        object_name: &str,
        vertices: &[ModelVertex],
        host: &mut dyn HostRenderer,
    ) -> GeometryHandle {
        let mut objects = self.models.entry(model_name.to_string()).or_default();
        if let Some(handle) = objects.get(object_name) {
            return *handle;
        }
        let handle = host.cache_vertices(vertices);
        debug!(
            "Cached {} vertices of {}:{} as {:?}",
            vertices.len(),
            model_name,
            object_name,
            handle
        );
        objects.insert(object_name.to_string(), handle);
        handle
    }

    /// Forgets every handle of `model_name`, returning how many were dropped.
    pub fn unload_model(&self, model_name: &str) -> usize {
        let removed = self
            .models
            .remove(model_name)
            .map_or(0, |(_, objects)| objects.len());
        if removed > 0 {
            debug!("Unloaded {} cached objects of {}", removed, model_name);
        }
        removed
    }

    pub fn clear(&self) {
        self.models.clear();
    }

    /// Number of cached (model, object) pairs.
    pub fn len(&self) -> usize {
        self.models.iter().map(|objects| objects.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
