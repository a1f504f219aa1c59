//! Pack JSON definitions consumed by the model loader.
//!
//! Only the subset of a pack definition that affects model rendering is
//! modelled here. Unknown keys are ignored so full pack files deserialize.

use serde::{Deserialize, Serialize};

/// The definition of an entity (vehicle, part, decor) as far as rendering cares.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDefinition {
    /// Part slots this entity provides to other parts.
    #[serde(default)]
    pub parts: Vec<PartPlacement>,
    /// Present when the entity itself is a ground device (wheel, tread, skid).
    #[serde(default)]
    pub ground: Option<GroundDefinition>,
    #[serde(default)]
    pub rendering: RenderingDefinition,
}

impl EntityDefinition {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// `true` if this definition is a tread-based ground device.
    pub fn is_tread(&self) -> bool {
        self.ground.as_ref().is_some_and(|ground| ground.is_tread)
    }

    pub fn animated_object(&self, object_name: &str) -> Option<&AnimatedObjectDefinition> {
        self.rendering
            .animated_objects
            .iter()
            .find(|object| object.object_name == object_name)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderingDefinition {
    #[serde(default)]
    pub animated_objects: Vec<AnimatedObjectDefinition>,
}

/// A part slot on an entity.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartPlacement {
    #[serde(default)]
    pub pos: [f32; 3],
    /// Part types accepted in this slot, for example `ground_tread`.
    #[serde(default)]
    pub types: Vec<String>,
    /// Offset of the extra ground point created for long ground devices.
    #[serde(default)]
    pub long_part_offset: Option<f32>,
}

impl PartPlacement {
    pub fn accepts_treads(&self) -> bool {
        self.types.iter().any(|ty| ty.contains("tread"))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundDefinition {
    #[serde(default)]
    pub is_tread: bool,
    #[serde(default = "default_dimension")]
    pub width: f32,
    #[serde(default = "default_dimension")]
    pub height: f32,
    /// Distance between tread links.
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    /// Total length of the tread path the links are laid along.
    #[serde(default)]
    pub length: f32,
}

impl Default for GroundDefinition {
    fn default() -> Self {
        Self {
            is_tread: false,
            width: default_dimension(),
            height: default_dimension(),
            spacing: default_spacing(),
            length: 0.0,
        }
    }
}

fn default_dimension() -> f32 {
    1.0
}

fn default_spacing() -> f32 {
    0.25
}

/// Animation and ordering information declared for one model object.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimatedObjectDefinition {
    pub object_name: String,
    #[serde(default)]
    pub animations: Vec<AnimationDefinition>,
    /// Name of the object whose transforms this object renders inside of.
    #[serde(default)]
    pub apply_after: Option<String>,
    /// Render traits declared explicitly instead of inferred from the name.
    #[serde(default)]
    pub traits: Option<DeclaredTraits>,
}

/// Explicit render classification of an object. Unset fields fall back to
/// inference from the object name.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredTraits {
    pub translucent: Option<bool>,
    pub window: Option<bool>,
    pub online_texture: Option<bool>,
    /// Light suffix in the same `<light>[_<RRGGBB>[_<flags>]]` form used in
    /// object names.
    pub light: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationType {
    Translation,
    Rotation,
    Scaling,
    Visibility,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationDefinition {
    pub animation_type: AnimationType,
    pub variable: String,
    #[serde(default)]
    pub center_point: [f32; 3],
    #[serde(default)]
    pub axis: [f32; 3],
    #[serde(default)]
    pub offset: f32,
    #[serde(default)]
    pub clamp_min: f32,
    #[serde(default)]
    pub clamp_max: f32,
    #[serde(default)]
    pub absolute: bool,
}
