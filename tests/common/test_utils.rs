use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
};

use vehicle_ngin::{
    cgmath::{Matrix4, Point3},
    config::ClientRenderingConfig,
    context::{AnimationEntity, Frame, GeometryHandle, HostRenderer, Pass},
    data_structures::{scene_graph::ObjectGraph, vertex::ModelVertex},
    definitions::EntityDefinition,
    resources::{ObjectGeometry, cache::GeometryCache, load_model},
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    Cache(GeometryHandle),
    Render(GeometryHandle),
    Push,
    Pop,
    Matrix(Matrix4<f32>),
    Lighting(bool),
    FullBright(bool),
    Color([f32; 4]),
    BindTexture(String),
    BindUrl(String),
    RecallTexture,
    TextMarkings(String),
    Flare,
}

/// Records every call the renderer makes, in order.
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    next_handle: Arc<AtomicU32>,
    uploads: Arc<AtomicU32>,
    /// URLs `bind_url_texture` succeeds for.
    pub available_urls: HashSet<String>,
    /// Objects carrying text markings.
    pub markings: HashSet<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            next_handle: Arc::new(AtomicU32::new(0)),
            uploads: Arc::new(AtomicU32::new(0)),
            available_urls: HashSet::new(),
            markings: HashSet::new(),
        }
    }

    /// A host sharing handle and upload counters with `self`, as threads of one
    /// host process would.
    pub fn sharing(&self) -> Self {
        Self {
            next_handle: self.next_handle.clone(),
            uploads: self.uploads.clone(),
            ..Self::new()
        }
    }

    pub fn uploads(&self) -> u32 {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn draws(&self) -> Vec<GeometryHandle> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Render(handle) => Some(*handle),
                _ => None,
            })
            .collect()
    }

    /// `true` if every push was popped and no pop came without a push.
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0i32;
        for call in &self.calls {
            match call {
                HostCall::Push => depth += 1,
                HostCall::Pop => depth -= 1,
                _ => (),
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0
    }
}

impl HostRenderer for RecordingHost {
    fn cache_vertices(&mut self, _vertices: &[ModelVertex]) -> GeometryHandle {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        let handle = GeometryHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        self.calls.push(HostCall::Cache(handle));
        handle
    }

    fn render_vertices(&mut self, handle: GeometryHandle) {
        self.calls.push(HostCall::Render(handle));
    }

    fn push_state(&mut self) {
        self.calls.push(HostCall::Push);
    }

    fn pop_state(&mut self) {
        self.calls.push(HostCall::Pop);
    }

    fn apply_matrix(&mut self, matrix: &Matrix4<f32>) {
        self.calls.push(HostCall::Matrix(*matrix));
    }

    fn set_lighting(&mut self, enabled: bool) {
        self.calls.push(HostCall::Lighting(enabled));
    }

    fn set_full_bright(&mut self, enabled: bool) {
        self.calls.push(HostCall::FullBright(enabled));
    }

    fn set_color(&mut self, rgba: [f32; 4]) {
        self.calls.push(HostCall::Color(rgba));
    }

    fn bind_texture(&mut self, name: &str) {
        self.calls.push(HostCall::BindTexture(name.to_string()));
    }

    fn bind_url_texture(&mut self, url: &str) -> bool {
        self.calls.push(HostCall::BindUrl(url.to_string()));
        self.available_urls.contains(url)
    }

    fn recall_texture(&mut self) {
        self.calls.push(HostCall::RecallTexture);
    }

    fn render_text_markings(&mut self, _entity: &dyn AnimationEntity, object_name: &str) -> bool {
        self.calls.push(HostCall::TextMarkings(object_name.to_string()));
        self.markings.contains(object_name)
    }

    fn render_light_flare(&mut self, _center: Point3<f32>, _size: f32, _rgba: [f32; 4]) {
        self.calls.push(HostCall::Flare);
    }
}

/// An entity with scripted animation variables, lights and texture URLs.
#[derive(Default)]
pub struct TestEntity {
    pub variables: HashMap<String, f64>,
    pub lights: HashSet<String>,
    pub urls: HashMap<String, String>,
}

impl TestEntity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, name: &str, value: f64) -> Self {
        self.variables.insert(name.to_string(), value);
        self
    }

    pub fn with_light(mut self, name: &str) -> Self {
        self.lights.insert(name.to_string());
        self
    }

    pub fn with_url(mut self, object_name: &str, url: &str) -> Self {
        self.urls.insert(object_name.to_string(), url.to_string());
        self
    }
}

impl AnimationEntity for TestEntity {
    fn animation_value(&self, variable: &str, _partial_ticks: f32) -> f64 {
        self.variables.get(variable).copied().unwrap_or_default()
    }

    fn is_light_on(&self, light_name: &str) -> bool {
        self.lights.contains(light_name)
    }

    fn texture_url(&self, object_name: &str) -> Option<String> {
        self.urls.get(object_name).cloned()
    }
}

pub fn frame<'a>(
    entity: &'a TestEntity,
    pass: Pass,
    settings: &'a ClientRenderingConfig,
) -> Frame<'a> {
    Frame {
        entity,
        pass,
        partial_ticks: 0.0,
        settings,
    }
}

/// A unit quad in the x/y plane at depth `z`, two triangles.
pub fn quad(z: f32) -> Vec<ModelVertex> {
    let v = |x: f32, y: f32| ModelVertex::new([x, y, z], [x + 0.5, y + 0.5], [0.0, 0.0, 1.0]);
    vec![
        v(-0.5, -0.5),
        v(0.5, -0.5),
        v(0.5, 0.5),
        v(-0.5, -0.5),
        v(0.5, 0.5),
        v(-0.5, 0.5),
    ]
}

pub fn geometry(names: &[&str]) -> Vec<ObjectGeometry> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| ObjectGeometry::new(*name, quad(i as f32)))
        .collect()
}

/// Loads `names` into a fresh cache. Upload calls are cleared from the host so
/// tests only see render calls.
pub fn load(
    names: &[&str],
    definition: &EntityDefinition,
    host: &mut RecordingHost,
) -> ObjectGraph {
    let cache = GeometryCache::new();
    let graph = load_model("test_model", &geometry(names), definition, &cache, host)
        .expect("model should load");
    host.calls.clear();
    graph
}
