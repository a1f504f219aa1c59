//! Model objects and the object render graph.
//!
//! A model is a set of named objects. Each object carries an ordered chain of
//! [`Transform`]s built once when the model is loaded, and may declare that it
//! applies after another object. Applying after an object means rendering
//! inside that object's transforms, after its own draw call, so the
//! `apply_after` relation forms a forest over the model's objects.
//!
//! [`ObjectGraph`] resolves that relation into index-based children lists when
//! the model is loaded and rejects cycles, which would otherwise recurse
//! forever at render time.

use std::collections::{HashMap, VecDeque};

use id_arena::{Arena, Id};
use log::warn;
use thiserror::Error;

use crate::{
    context::{Frame, GeometryHandle, HostRenderer},
    data_structures::{
        classification::{DrawState, ObjectTraits, TreadRole},
        vertex::{self, ModelVertex},
    },
    definitions::{AnimatedObjectDefinition, EntityDefinition},
    resources::cache::GeometryCache,
    transforms::{
        AnimationTransform, LightTransform, OnlineTextureTransform, SolidTransform, Transform,
        TransformKind, TranslucentTransform, TreadRendererTransform, TreadRollerTransform,
        WindowTransform,
    },
};

pub type ObjectId = Id<ModelObject>;

/// Suffix of the cache key holding the reversed-winding copy of window glass.
const INNER_WINDOW_SUFFIX: &str = "#inner";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Objects whose `apply_after` chain loops back on itself.
    #[error("cyclic applyAfter in model {model}: {}", .objects.join(", "))]
    CyclicApplyAfter { model: String, objects: Vec<String> },

    #[error("object {object} appears twice in model {model}")]
    DuplicateObject { model: String, object: String },

    #[error("geometry of {object} has {len} floats, which is not a whole number of vertices")]
    MalformedGeometry { object: String, len: usize },
}

/// A named, independently transformable subset of a model's geometry.
#[derive(Debug)]
pub struct ModelObject {
    name: String,
    geometry: GeometryHandle,
    apply_after: Option<String>,
    traits: ObjectTraits,
    transforms: Vec<Box<dyn Transform>>,
    pub(crate) children: Vec<ObjectId>,
}

impl ModelObject {
    /// Builds the object and its transform chain, uploading its geometry
    /// through `cache` if this (model, object) pair was never uploaded.
    ///
    /// `owner` is the definition of the entity the model belongs to; it decides
    /// tread handling for objects without a `definition`.
    pub fn new(
        model_name: &str,
        object_name: &str,
        definition: Option<&AnimatedObjectDefinition>,
        vertices: &[ModelVertex],
        owner: &EntityDefinition,
        cache: &GeometryCache,
        host: &mut dyn HostRenderer,
    ) -> Self {
        let geometry = cache.get_or_upload(model_name, object_name, vertices, host);
        let traits = ObjectTraits::resolve(object_name, definition, owner);

        let mut transforms: Vec<Box<dyn Transform>> = Vec::new();
        if let Some(definition) = definition {
            transforms.extend(
                definition
                    .animations
                    .iter()
                    .cloned()
                    .map(|animation| Box::new(AnimationTransform::new(animation)) as Box<dyn Transform>),
            );
        }
        match traits.tread {
            Some(TreadRole::Roller) => {
                transforms.push(Box::new(TreadRollerTransform::new(vertices, &owner.parts)));
            }
            Some(TreadRole::Links) => {
                let ground = owner.ground.clone().unwrap_or_default();
                transforms.push(Box::new(TreadRendererTransform::new(geometry, &ground)));
            }
            None => (),
        }

        // The light decides whether a separate draw-state transform is needed,
        // so it is built first and appended after it.
        let light = traits
            .light
            .clone()
            .map(|spec| LightTransform::new(spec, vertices));
        if traits.needs_draw_state() {
            match traits.draw_state {
                DrawState::Solid => transforms.push(Box::new(SolidTransform)),
                DrawState::Translucent => transforms.push(Box::new(TranslucentTransform)),
            }
        }
        if let Some(light) = light {
            transforms.push(Box::new(light));
        }

        if traits.window {
            let inner_key = format!("{}{}", object_name, INNER_WINDOW_SUFFIX);
            let inner = if vertices.is_empty() {
                None
            } else {
                let reversed = vertex::reverse_winding(vertices);
                Some(cache.get_or_upload(model_name, &inner_key, &reversed, host))
            };
            transforms.push(Box::new(WindowTransform::new(inner)));
        }
        if traits.online_texture {
            transforms.push(Box::new(OnlineTextureTransform::new(object_name)));
        }

        Self {
            name: object_name.to_string(),
            geometry,
            apply_after: definition.and_then(|definition| definition.apply_after.clone()),
            traits,
            transforms,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> GeometryHandle {
        self.geometry
    }

    pub fn apply_after(&self) -> Option<&str> {
        self.apply_after.as_deref()
    }

    pub fn traits(&self) -> &ObjectTraits {
        &self.traits
    }

    pub fn transforms(&self) -> &[Box<dyn Transform>] {
        &self.transforms
    }

    pub fn transform_kinds(&self) -> Vec<TransformKind> {
        self.transforms.iter().map(|transform| transform.kind()).collect()
    }

    /// Objects rendered after this one, in declaration order.
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    /// Runs every transform's pre-render step, stopping at the first one that
    /// skips the object. The transforms that ran before it are aborted in
    /// reverse order, so a skipped object leaves no state behind.
    pub fn pre_render(&self, host: &mut dyn HostRenderer, frame: &Frame) -> bool {
        let Some(skipped) = self
            .transforms
            .iter()
            .position(|transform| !transform.pre_render(host, frame))
        else {
            return true;
        };
        for transform in self.transforms[..skipped].iter().rev() {
            transform.abort_render(host, frame);
        }
        false
    }

    pub fn should_render(&self, frame: &Frame) -> bool {
        self.transforms
            .iter()
            .all(|transform| transform.should_render(frame))
    }

    pub fn post_render(&self, host: &mut dyn HostRenderer, frame: &Frame) {
        for transform in &self.transforms {
            transform.post_render(host, frame);
        }
    }
}

/// All objects of one loaded model with their `apply_after` forest resolved.
#[derive(Debug)]
pub struct ObjectGraph {
    model_name: String,
    objects: Arena<ModelObject>,
    order: Vec<ObjectId>,
    roots: Vec<ObjectId>,
    by_name: HashMap<String, ObjectId>,
}

impl ObjectGraph {
    /// Links `objects` by their `apply_after` names.
    ///
    /// An object naming an unknown object is kept but never rendered. Cycles,
    /// including an object applying after itself, are rejected.
    pub fn build(model_name: &str, objects: Vec<ModelObject>) -> Result<Self, ModelError> {
        let mut arena = Arena::new();
        let mut order = Vec::with_capacity(objects.len());
        let mut by_name = HashMap::new();
        for object in objects {
            let name = object.name.clone();
            if by_name.contains_key(&name) {
                return Err(ModelError::DuplicateObject {
                    model: model_name.to_string(),
                    object: name,
                });
            }
            let id = arena.alloc(object);
            by_name.insert(name, id);
            order.push(id);
        }

        let mut roots = Vec::new();
        let mut in_degree: HashMap<ObjectId, usize> = HashMap::new();
        for &id in &order {
            let parent = match arena[id].apply_after.as_deref() {
                None => {
                    roots.push(id);
                    None
                }
                Some(parent_name) => match by_name.get(parent_name) {
                    Some(&parent) => Some(parent),
                    None => {
                        warn!(
                            "Object {} in model {} applies after unknown object {} and will not render.",
                            arena[id].name, model_name, parent_name
                        );
                        None
                    }
                },
            };
            if let Some(parent) = parent {
                arena[parent].children.push(id);
                in_degree.insert(id, 1);
            }
        }

        // Kahn's algorithm: whatever is never released from its parent sits on
        // or below a cycle.
        let mut queue: VecDeque<ObjectId> = order
            .iter()
            .copied()
            .filter(|id| !in_degree.contains_key(id))
            .collect();
        let mut visited = 0;
        while let Some(id) = queue.pop_front() {
            visited += 1;
            for &child in &arena[id].children {
                if let Some(degree) = in_degree.get_mut(&child) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(child);
                    }
                }
            }
        }
        if visited != order.len() {
            let objects = order
                .iter()
                .filter(|id| in_degree.get(id).is_some_and(|degree| *degree > 0))
                .map(|&id| arena[id].name.clone())
                .collect();
            return Err(ModelError::CyclicApplyAfter {
                model: model_name.to_string(),
                objects,
            });
        }

        Ok(Self {
            model_name: model_name.to_string(),
            objects: arena,
            order,
            roots,
            by_name,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn get(&self, id: ObjectId) -> Option<&ModelObject> {
        self.objects.get(id)
    }

    pub fn id_of(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    pub fn object(&self, name: &str) -> Option<&ModelObject> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// Objects without `apply_after`, in declaration order.
    pub fn roots(&self) -> &[ObjectId] {
        &self.roots
    }

    /// All objects in declaration order.
    pub fn objects(&self) -> impl Iterator<Item = &ModelObject> {
        self.order.iter().map(|&id| &self.objects[id])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
