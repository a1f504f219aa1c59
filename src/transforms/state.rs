use crate::{
    context::{Frame, Pass},
    transforms::{Transform, TransformKind},
};

/// Draws the object on the opaque pass only.
#[derive(Debug, Default)]
pub struct SolidTransform;

impl Transform for SolidTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Solid
    }

    fn should_render(&self, frame: &Frame) -> bool {
        frame.pass == Pass::Opaque
    }
}

/// Draws the object on the blended pass only.
#[derive(Debug, Default)]
pub struct TranslucentTransform;

impl Transform for TranslucentTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Translucent
    }

    fn should_render(&self, frame: &Frame) -> bool {
        frame.pass == Pass::Blended
    }
}
