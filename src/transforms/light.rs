//! Light transforms.
//!
//! A light-up texture only forces full brightness on the object's own texture
//! while its light is on. Any other light is drawn as an emissive overlay in
//! the light's colour, on the blended pass unless `lightsSolid` is configured,
//! and may carry a flare rendered at the centre of the object's geometry.

use cgmath::Point3;

use crate::{
    context::{Frame, HostRenderer, Pass},
    data_structures::{
        classification::LightSpec,
        vertex::{self, ModelVertex},
    },
    transforms::{Transform, TransformKind},
};

const WHITE: [f32; 4] = [1.0; 4];

#[derive(Debug)]
pub struct LightTransform {
    pub spec: LightSpec,
    center: Point3<f32>,
    flare_size: f32,
}

impl LightTransform {
    pub fn new(spec: LightSpec, vertices: &[ModelVertex]) -> Self {
        let flare_size = vertex::bounds(vertices)
            .map(|(min, max)| {
                let extent = max - min;
                extent.x.max(extent.y).max(extent.z)
            })
            .unwrap_or_default();
        Self {
            spec,
            center: vertex::centroid(vertices),
            flare_size,
        }
    }

    pub fn is_lightup_texture(&self) -> bool {
        self.spec.is_lightup_texture()
    }

    fn rgba(&self) -> [f32; 4] {
        let [r, g, b] = self.spec.color;
        [r, g, b, 1.0]
    }

    fn in_light_pass(&self, frame: &Frame) -> bool {
        frame.pass == Pass::Blended || frame.settings.lights_solid.value
    }

    /// `true` if `pre_render` changed the host state for this frame.
    fn is_lit(&self, frame: &Frame) -> bool {
        frame.entity.is_light_on(&self.spec.name)
            && (self.is_lightup_texture() || self.in_light_pass(frame))
    }

    fn restore(&self, host: &mut dyn HostRenderer, frame: &Frame) {
        if !self.is_lit(frame) {
            return;
        }
        if self.is_lightup_texture() {
            host.set_full_bright(false);
            return;
        }
        if self.spec.color_overlay {
            host.set_color(WHITE);
        }
        host.set_lighting(true);
    }
}

impl Transform for LightTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Light
    }

    fn pre_render(&self, host: &mut dyn HostRenderer, frame: &Frame) -> bool {
        if !self.is_lit(frame) {
            return true;
        }
        if self.is_lightup_texture() {
            host.set_full_bright(true);
            return true;
        }
        host.set_lighting(false);
        if self.spec.color_overlay {
            host.set_color(self.rgba());
        }
        true
    }

    fn should_render(&self, frame: &Frame) -> bool {
        self.is_lightup_texture() || self.is_lit(frame)
    }

    fn post_render(&self, host: &mut dyn HostRenderer, frame: &Frame) {
        // Flags imply the light is not a light-up texture.
        if self.spec.flare && self.is_lit(frame) {
            let bright = frame.settings.flares_bright.value;
            if bright {
                host.set_full_bright(true);
            }
            host.render_light_flare(self.center, self.flare_size, self.rgba());
            if bright {
                host.set_full_bright(false);
            }
        }
        self.restore(host, frame);
    }

    fn abort_render(&self, host: &mut dyn HostRenderer, frame: &Frame) {
        self.restore(host, frame);
    }
}
