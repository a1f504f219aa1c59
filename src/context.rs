//! Host-facing seams.
//!
//! Everything in this crate runs inside a host game runtime that owns the
//! graphics context, the entity lifecycle and the asset pipeline. This module
//! defines the two interfaces the host implements for us:
//!
//! - [`HostRenderer`] is the fixed-function style rendering interface (state
//!   stack, geometry cache, texture binding, text markings)
//! - [`AnimationEntity`] is the entity being rendered, queried for animation
//!   values and light states on every render call
//!
//! Per-call render inputs are bundled into a [`Frame`].

use std::ops::{Deref, DerefMut};

use cgmath::{Matrix4, Point3};

use crate::{config::ClientRenderingConfig, data_structures::vertex::ModelVertex};

/// Opaque handle to geometry uploaded into the host's vertex cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u32);

/// The render pass an object is being drawn in.
///
/// The host renders every model twice per frame: once with blending disabled
/// for opaque geometry and once with blending enabled for translucent geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Opaque,
    Blended,
}

impl Pass {
    pub fn is_blended(self) -> bool {
        self == Pass::Blended
    }
}

/// The host's rendering interface.
pub trait HostRenderer {
    /// Uploads vertices into the host's geometry cache.
    fn cache_vertices(&mut self, vertices: &[ModelVertex]) -> GeometryHandle;

    /// Draws previously cached geometry with the current state.
    fn render_vertices(&mut self, handle: GeometryHandle);

    fn push_state(&mut self);

    fn pop_state(&mut self);

    /// Multiplies the current model matrix by `matrix`.
    fn apply_matrix(&mut self, matrix: &Matrix4<f32>);

    fn set_lighting(&mut self, enabled: bool);

    /// Forces full brightness from the lightmap, ignoring world light.
    fn set_full_bright(&mut self, enabled: bool);

    fn set_color(&mut self, rgba: [f32; 4]);

    fn bind_texture(&mut self, name: &str);

    /// Binds a texture downloaded from `url`. Returns `false` if the texture is
    /// not (yet) available.
    fn bind_url_texture(&mut self, url: &str) -> bool;

    /// Restores the texture that was bound before the last bind.
    fn recall_texture(&mut self);

    /// Renders text markings bound to `object_name`. Returns `true` if any
    /// text was rendered and the texture binding changed.
    fn render_text_markings(&mut self, entity: &dyn AnimationEntity, object_name: &str) -> bool;

    fn render_light_flare(&mut self, center: Point3<f32>, size: f32, rgba: [f32; 4]);
}

/// The entity a model is rendered for.
///
/// Animation state lives here and not on the model objects, so one loaded model
/// can be shared by every entity using it.
pub trait AnimationEntity {
    /// Current value of an animation variable, interpolated by `partial_ticks`.
    fn animation_value(&self, variable: &str, partial_ticks: f32) -> f64;

    fn is_light_on(&self, light_name: &str) -> bool;

    /// URL of the online texture shown on `object_name`, if any.
    fn texture_url(&self, _object_name: &str) -> Option<String> {
        None
    }
}

/// Inputs shared by every object rendered in one model render call.
pub struct Frame<'a> {
    pub entity: &'a dyn AnimationEntity,
    pub pass: Pass,
    pub partial_ticks: f32,
    pub settings: &'a ClientRenderingConfig,
}

/// Pushes the host state on creation and pops it on drop.
///
/// The guard dereferences to the host so it can be used in its place while the
/// state is held.
pub struct StateGuard<'h> {
    host: &'h mut (dyn HostRenderer + 'h),
}

impl<'h> StateGuard<'h> {
    pub fn push(host: &'h mut (dyn HostRenderer + 'h)) -> Self {
        host.push_state();
        Self { host }
    }
}

impl<'h> Deref for StateGuard<'h> {
    type Target = dyn HostRenderer + 'h;

    fn deref(&self) -> &Self::Target {
        &*self.host
    }
}

impl<'h> DerefMut for StateGuard<'h> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.host
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        self.host.pop_state();
    }
}
