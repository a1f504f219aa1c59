//! Animations declared in an object's JSON definition.

use cgmath::{Deg, InnerSpace, Vector3};

use crate::{
    context::{Frame, HostRenderer},
    data_structures::instance::Instance,
    definitions::{AnimationDefinition, AnimationType},
    transforms::{Transform, TransformKind},
};

/// One declared animation step.
///
/// The animated value is the entity's variable scaled by the length of the
/// declared axis, plus the offset. It is clamped when a clamp range is declared
/// and made absolute on request.
#[derive(Debug)]
pub struct AnimationTransform {
    definition: AnimationDefinition,
}

impl AnimationTransform {
    pub fn new(definition: AnimationDefinition) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &AnimationDefinition {
        &self.definition
    }

    fn axis(&self) -> Vector3<f32> {
        Vector3::from(self.definition.axis)
    }

    fn has_clamp(&self) -> bool {
        self.definition.clamp_min != 0.0 || self.definition.clamp_max != 0.0
    }

    /// Animated value for a raw variable value.
    pub fn value(&self, variable: f64) -> f32 {
        let def = &self.definition;
        let scale = match def.animation_type {
            // Visibility compares the raw value against its bounds.
            AnimationType::Visibility => 1.0,
            _ => self.axis().magnitude(),
        };
        let mut value = variable as f32 * scale + def.offset;
        if def.animation_type != AnimationType::Visibility && self.has_clamp() {
            value = value.clamp(def.clamp_min.min(def.clamp_max), def.clamp_max.max(def.clamp_min));
        }
        if def.absolute {
            value = value.abs();
        }
        value
    }

    /// Pose for an animated value; `None` for visibility animations.
    pub fn pose(&self, value: f32) -> Option<Instance> {
        let axis = self.axis();
        let direction = if axis.magnitude2() == 0.0 {
            axis
        } else {
            axis.normalize()
        };
        match self.definition.animation_type {
            AnimationType::Translation => Some(Instance::from(direction * value)),
            AnimationType::Rotation => Some(Instance::rotation_about(
                Vector3::from(self.definition.center_point),
                direction,
                Deg(value),
            )),
            AnimationType::Scaling => {
                let one = Vector3::new(1.0, 1.0, 1.0);
                let scale = one + direction.map(f32::abs) * (value - 1.0);
                let center = Vector3::from(self.definition.center_point);
                Some(Instance::from(center) * Instance::from_scale(scale) * Instance::from(-center))
            }
            AnimationType::Visibility => None,
        }
    }

    /// `true` if a visibility animation shows the object for `value`.
    pub fn is_visible(&self, value: f32) -> bool {
        match self.definition.animation_type {
            AnimationType::Visibility => {
                value >= self.definition.clamp_min && value <= self.definition.clamp_max
            }
            _ => true,
        }
    }
}

impl Transform for AnimationTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Animation
    }

    fn pre_render(&self, host: &mut dyn HostRenderer, frame: &Frame) -> bool {
        let variable = frame
            .entity
            .animation_value(&self.definition.variable, frame.partial_ticks);
        let value = self.value(variable);
        if !self.is_visible(value) {
            return false;
        }
        if let Some(pose) = self.pose(value) {
            if !pose.is_identity() {
                host.apply_matrix(&pose.to_matrix());
            }
        }
        true
    }
}
