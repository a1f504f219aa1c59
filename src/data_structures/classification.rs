//! Load-time classification of model objects.
//!
//! Every object is classified exactly once, when its model is loaded. Traits
//! declared in the object's definition win; anything left undeclared is
//! inferred from the object name, which is how older packs mark objects
//! (`translucent`, `window`, `url` and `&` in the name).

use log::warn;

use crate::definitions::{AnimatedObjectDefinition, DeclaredTraits, EntityDefinition};

/// Separates an object's base name from its light suffix.
pub const LIGHT_DELIMITER: char = '&';

/// Which blend pass the object's geometry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawState {
    Solid,
    Translucent,
}

/// Part an object plays in rendering a tread-based ground device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreadRole {
    /// A roller the tread wraps around.
    Roller,
    /// The tread link itself, repeated along the tread path.
    Links,
}

/// A light parsed from `<light>[_<RRGGBB>[_<flags>]]`.
///
/// Flag characters: `f` renders a flare, `c` a colour overlay and `b` a beam.
#[derive(Clone, Debug, PartialEq)]
pub struct LightSpec {
    pub name: String,
    pub color: [f32; 3],
    pub flare: bool,
    pub color_overlay: bool,
    pub beam: bool,
}

impl LightSpec {
    pub fn parse(suffix: &str) -> Self {
        let mut segments = suffix.split('_');
        let name = segments.next().unwrap_or_default().to_string();
        let color = match segments.next() {
            Some(hex) => parse_color(hex).unwrap_or_else(|| {
                warn!("Light {} has malformed colour {}, using white.", name, hex);
                [1.0; 3]
            }),
            None => [1.0; 3],
        };
        let flags = segments.next().unwrap_or_default().to_lowercase();
        Self {
            name,
            color,
            flare: flags.contains('f'),
            color_overlay: flags.contains('c'),
            beam: flags.contains('b'),
        }
    }

    /// A light-up texture only brightens the object's own texture and adds no
    /// geometry of its own.
    pub fn is_lightup_texture(&self) -> bool {
        !self.flare && !self.color_overlay && !self.beam
    }
}

fn parse_color(hex: &str) -> Option<[f32; 3]> {
    if hex.len() != 6 {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some([
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
    ])
}

/// The resolved render classification of one model object.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTraits {
    pub draw_state: DrawState,
    pub light: Option<LightSpec>,
    pub window: bool,
    pub online_texture: bool,
    pub tread: Option<TreadRole>,
}

impl ObjectTraits {
    /// Resolves the traits of `object_name` belonging to an entity defined by
    /// `owner`. `definition` is the object's animated-object definition, if
    /// the pack declares one.
    pub fn resolve(
        object_name: &str,
        definition: Option<&AnimatedObjectDefinition>,
        owner: &EntityDefinition,
    ) -> Self {
        let lower = object_name.to_lowercase();
        let declared = definition
            .and_then(|definition| definition.traits.clone())
            .unwrap_or_default();

        // Tread roles are only inferred for objects without a definition.
        let tread = match definition {
            Some(_) => None,
            None if lower.contains("roller") => Some(TreadRole::Roller),
            None if owner.is_tread() => Some(TreadRole::Links),
            None => None,
        };

        Self {
            draw_state: resolve_draw_state(&declared, &lower),
            light: resolve_light(&declared, object_name),
            window: declared.window.unwrap_or_else(|| lower.contains("window")),
            online_texture: declared
                .online_texture
                .unwrap_or_else(|| lower.starts_with("url") || lower.ends_with("url")),
            tread,
        }
    }

    /// `true` if the chain needs its own solid/translucent transform. A light
    /// that is not a light-up texture manages the draw state itself.
    pub fn needs_draw_state(&self) -> bool {
        self.light
            .as_ref()
            .is_none_or(|light| light.is_lightup_texture())
    }
}

fn resolve_draw_state(declared: &DeclaredTraits, lower_name: &str) -> DrawState {
    let translucent = declared
        .translucent
        .unwrap_or_else(|| lower_name.contains("translucent"));
    if translucent {
        DrawState::Translucent
    } else {
        DrawState::Solid
    }
}

fn resolve_light(declared: &DeclaredTraits, object_name: &str) -> Option<LightSpec> {
    if let Some(suffix) = &declared.light {
        return Some(LightSpec::parse(suffix));
    }
    object_name
        .split_once(LIGHT_DELIMITER)
        .map(|(_, suffix)| LightSpec::parse(suffix))
}
