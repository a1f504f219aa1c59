//! Tread rendering.
//!
//! Tread-based ground devices are animated by the distance the tread has
//! travelled, read from the entity as [`TREAD_TRAVEL`]. Rollers spin by that
//! distance over their own radius and the tread links are laid out along the
//! tread path, shifted by the travelled distance modulo the link spacing.

use cgmath::{Deg, Rad, Vector3};
use log::warn;

use crate::{
    context::{Frame, GeometryHandle, HostRenderer},
    data_structures::{
        instance::Instance,
        vertex::{self, ModelVertex},
    },
    definitions::{GroundDefinition, PartPlacement},
    transforms::{Transform, TransformKind},
};

/// Animation variable holding the distance a tread has travelled, in blocks.
pub const TREAD_TRAVEL: &str = "tread_travel";

/// Upper bound on the links drawn for one tread per frame.
pub const MAX_TREAD_LINKS: usize = 1024;

#[derive(Debug)]
pub struct TreadRollerTransform {
    center: Vector3<f32>,
    radius: f32,
    driven: bool,
}

impl TreadRollerTransform {
    /// `parts` are the part slots of the entity owning the roller. A roller on
    /// an entity that has slots but none for treads is decorative and stays
    /// still.
    pub fn new(vertices: &[ModelVertex], parts: &[PartPlacement]) -> Self {
        let (center, radius) = match vertex::bounds(vertices) {
            Some((min, max)) => (
                Vector3::new(0.0, (min.y + max.y) / 2.0, (min.z + max.z) / 2.0),
                (max.y - min.y) / 2.0,
            ),
            None => (Vector3::new(0.0, 0.0, 0.0), 0.0),
        };
        Self {
            center,
            radius,
            driven: parts.is_empty() || parts.iter().any(PartPlacement::accepts_treads),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_driven(&self) -> bool {
        self.driven
    }

    /// Roller angle for the given tread travel.
    pub fn angle(&self, travel: f32) -> Deg<f32> {
        if !self.driven || self.radius <= f32::EPSILON {
            return Deg(0.0);
        }
        Rad(travel / self.radius).into()
    }
}

impl Transform for TreadRollerTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::TreadRoller
    }

    fn pre_render(&self, host: &mut dyn HostRenderer, frame: &Frame) -> bool {
        let travel = frame.entity.animation_value(TREAD_TRAVEL, frame.partial_ticks) as f32;
        let angle = self.angle(travel);
        if angle.0 != 0.0 {
            let pose = Instance::rotation_about(self.center, Vector3::unit_x(), angle);
            host.apply_matrix(&pose.to_matrix());
        }
        true
    }
}

/// Draws the tread link geometry repeated along the tread instead of drawing
/// it once.
#[derive(Debug)]
pub struct TreadRendererTransform {
    links: GeometryHandle,
    spacing: f32,
    length: f32,
}

impl TreadRendererTransform {
    pub fn new(links: GeometryHandle, ground: &GroundDefinition) -> Self {
        if ground.spacing > f32::EPSILON
            && ground.length / ground.spacing > MAX_TREAD_LINKS as f32
        {
            warn!(
                "Tread of length {} with link spacing {} needs more than {} links, extra links are not drawn.",
                ground.length, ground.spacing, MAX_TREAD_LINKS
            );
        }
        Self {
            links,
            spacing: ground.spacing,
            length: ground.length,
        }
    }

    // Links are opaque geometry.
    fn should_draw_links(&self, frame: &Frame) -> bool {
        !frame.pass.is_blended()
    }

    /// Z offsets of every link for the given tread travel.
    pub fn link_offsets(&self, travel: f32) -> Vec<f32> {
        if self.spacing <= f32::EPSILON || self.length <= 0.0 {
            return vec![0.0];
        }
        let count = ((self.length / self.spacing).floor() as usize).clamp(1, MAX_TREAD_LINKS);
        let shift = travel.rem_euclid(self.spacing);
        let start = -self.length / 2.0;
        (0..count)
            .map(|i| start + i as f32 * self.spacing + shift)
            .collect()
    }
}

impl Transform for TreadRendererTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::TreadRenderer
    }

    fn pre_render(&self, host: &mut dyn HostRenderer, frame: &Frame) -> bool {
        if !self.should_draw_links(frame) {
            return true;
        }
        let travel = frame.entity.animation_value(TREAD_TRAVEL, frame.partial_ticks) as f32;
        for offset in self.link_offsets(travel) {
            host.push_state();
            host.apply_matrix(&Instance::from(Vector3::new(0.0, 0.0, offset)).to_matrix());
            host.render_vertices(self.links);
            host.pop_state();
        }
        true
    }

    fn should_render(&self, _frame: &Frame) -> bool {
        false
    }
}
