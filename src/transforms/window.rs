use crate::{
    context::{Frame, GeometryHandle, HostRenderer},
    transforms::{Transform, TransformKind},
};

/// Texture bound while glass is drawn.
pub const GLASS_TEXTURE: &str = "glass";

/// Renders window objects as glass.
///
/// Windows are hidden entirely when `renderWindows` is off. With `innerWindows`
/// the reversed-winding copy of the glass is drawn as well so it can be seen
/// from inside the vehicle.
#[derive(Debug)]
pub struct WindowTransform {
    inner: Option<GeometryHandle>,
}

impl WindowTransform {
    /// `inner` is the cached reversed-winding copy of the window geometry.
    pub fn new(inner: Option<GeometryHandle>) -> Self {
        Self { inner }
    }
}

impl Transform for WindowTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::Window
    }

    fn pre_render(&self, host: &mut dyn HostRenderer, frame: &Frame) -> bool {
        if !frame.settings.render_windows.value {
            return false;
        }
        host.bind_texture(GLASS_TEXTURE);
        true
    }

    fn post_render(&self, host: &mut dyn HostRenderer, frame: &Frame) {
        if frame.settings.inner_windows.value {
            if let Some(inner) = self.inner {
                host.render_vertices(inner);
            }
        }
        host.recall_texture();
    }

    fn abort_render(&self, host: &mut dyn HostRenderer, _frame: &Frame) {
        host.recall_texture();
    }
}
