//! Render-state transforms applied around a model object's draw call.
//!
//! Each model object owns an ordered chain of transforms, built once when the
//! model is loaded. At render time the chain runs in order:
//!
//! 1. `pre_render` on every transform; any `false` aborts the object, and the
//!    transforms that already ran undo their state with `abort_render`, last
//!    first
//! 2. `should_render` on every transform; the geometry is drawn only if all agree
//! 3. `post_render` on every transform
//!
//! Transforms available:
//! - `state`: solid and translucent draw-state selection
//! - `light`: light-up textures, coloured lights and flares
//! - `window`: glass rendering
//! - `online_texture`: textures downloaded from a URL
//! - `tread`: tread rollers and tread links
//! - `animation`: translation, rotation, scaling and visibility animations

use std::fmt::Debug;

use crate::context::{Frame, HostRenderer};

pub mod animation;
pub mod light;
pub mod online_texture;
pub mod state;
pub mod tread;
pub mod window;

pub use animation::AnimationTransform;
pub use light::LightTransform;
pub use online_texture::OnlineTextureTransform;
pub use state::{SolidTransform, TranslucentTransform};
pub use tread::{TreadRendererTransform, TreadRollerTransform};
pub use window::WindowTransform;

/// Discriminates transforms in a chain, mostly for inspection and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformKind {
    Animation,
    TreadRoller,
    TreadRenderer,
    Solid,
    Translucent,
    Light,
    Window,
    OnlineTexture,
}

impl TransformKind {
    pub fn is_draw_state(self) -> bool {
        matches!(self, TransformKind::Solid | TransformKind::Translucent)
    }
}

pub trait Transform: Debug + Send + Sync {
    fn kind(&self) -> TransformKind;

    /// Mutates host state before the draw. Returning `false` skips this object
    /// and everything rendered after it; a transform returning `false` must
    /// leave the host state untouched.
    fn pre_render(&self, _host: &mut dyn HostRenderer, _frame: &Frame) -> bool {
        true
    }

    /// Whether the geometry itself should be drawn in this pass.
    fn should_render(&self, _frame: &Frame) -> bool {
        true
    }

    /// Undoes or completes the state changes of `pre_render`.
    fn post_render(&self, _host: &mut dyn HostRenderer, _frame: &Frame) {}

    /// Undoes the state changes of a successful `pre_render` when a later
    /// transform skips the object. Nothing is drawn. The host's state stack
    /// only restores the model matrix.
    fn abort_render(&self, _host: &mut dyn HostRenderer, _frame: &Frame) {}
}
