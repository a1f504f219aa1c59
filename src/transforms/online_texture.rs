use log::warn;

use crate::{
    context::{Frame, HostRenderer},
    transforms::{Transform, TransformKind},
};

/// Binds a texture downloaded from the URL the entity assigns to this object.
///
/// The URL is per entity, so the bind is decided on every render call. An
/// object whose texture cannot be bound is skipped together with its
/// dependents.
#[derive(Debug)]
pub struct OnlineTextureTransform {
    object_name: String,
}

impl OnlineTextureTransform {
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
        }
    }
}

impl Transform for OnlineTextureTransform {
    fn kind(&self) -> TransformKind {
        TransformKind::OnlineTexture
    }

    fn pre_render(&self, host: &mut dyn HostRenderer, frame: &Frame) -> bool {
        match frame.entity.texture_url(&self.object_name) {
            Some(url) if !url.is_empty() => {
                let bound = host.bind_url_texture(&url);
                if !bound {
                    warn!("Texture for {} at {} is not available.", self.object_name, url);
                }
                bound
            }
            _ => false,
        }
    }

    // Only reached when `pre_render` bound the texture.
    fn post_render(&self, host: &mut dyn HostRenderer, _frame: &Frame) {
        host.recall_texture();
    }

    fn abort_render(&self, host: &mut dyn HostRenderer, _frame: &Frame) {
        host.recall_texture();
    }
}
