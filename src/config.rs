//! Plugin configuration.
//!
//! The configuration is a JSON file meant to be edited by hand. Every option
//! is stored together with a comment describing it, and every group falls
//! back to its defaults for keys missing from the file, so a config written by
//! an older version keeps loading.
//!
//! Two tables are derived from pack data rather than fixed defaults: item
//! weight factors, matched against item registry names, and the fluids each
//! engine fuel type accepts.

use std::{collections::HashMap, fs, path::Path, str::FromStr};

use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single option: its value and the comment written next to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    pub value: T,
    #[serde(default)]
    pub comment: String,
}

impl<T> Entry<T> {
    pub fn new(value: T, comment: &str) -> Self {
        Self {
            value,
            comment: comment.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub general: GeneralConfig,
    pub damage: DamageConfig,
    pub fuel: FuelConfig,
    pub client_rendering: ClientRenderingConfig,
    pub client_controls: ClientControlsConfig,
    pub controls: ControlsConfig,
}

impl Config {
    /// Parses a config. Options whose comment was deleted get the default
    /// comment back.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut loaded: Value = serde_json::from_str(json)?;
        restore_comments(&serde_json::to_value(Self::default())?, &mut loaded);
        serde_json::from_value(loaded)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Loads the config at `path`, creating it with defaults if it does not
    /// exist. The merged result is written back so new options show up in the
    /// file with their comments.
    pub fn load_from_disk(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Could not read config file {}", path.display()))?;
            Self::from_json(&json)
                .with_context(|| format!("Config file {} is not valid", path.display()))?
        } else {
            debug!("No config at {}, writing defaults", path.display());
            Self::default()
        };
        config.save_to_disk(path)?;
        Ok(config)
    }

    pub fn save_to_disk(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create config directory {}", parent.display()))?;
        }
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Could not write config file {}", path.display()))?;
        Ok(())
    }
}

/// Copies the default comment into every loaded option that has none. Keys
/// missing from `loaded` are left to serde's defaults, so entries removed from
/// user-editable tables stay removed.
fn restore_comments(defaults: &Value, loaded: &mut Value) {
    let (Value::Object(defaults), Value::Object(loaded)) = (defaults, loaded) else {
        return;
    };
    for (key, value) in loaded.iter_mut() {
        if let Some(default) = defaults.get(key) {
            restore_comments(default, value);
        }
    }
    if loaded.contains_key("value") && !loaded.contains_key("comment") {
        if let Some(comment) = defaults.get("comment") {
            loaded.insert("comment".to_string(), comment.clone());
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneralConfig {
    pub dump_crafting_config: Entry<bool>,
    pub op_sign_editing_only: Entry<bool>,
    pub op_pickup_vehicles_only: Entry<bool>,
    pub creative_pickup_vehicles_only: Entry<bool>,
    pub block_breakage: Entry<bool>,
    pub vehicle_destruction: Entry<bool>,
    pub noclip_vehicles: Entry<bool>,
    pub creative_damage: Entry<bool>,
    pub chunkload_vehicles: Entry<bool>,
    pub speed_factor: Entry<f64>,
    pub fuel_usage_factor: Entry<f64>,
    pub engine_hours_factor: Entry<f64>,
    pub climb_speed: Entry<f64>,
    pub gravity_factor: Entry<f64>,
    pub engine_speed_temp_factor: Entry<f64>,
    pub engine_biome_temp_factor: Entry<f64>,
    pub item_weights: ItemWeights,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            dump_crafting_config: Entry::new(false, "If true, all recipes of all pack items are dumped into the config at boot. This overwrites the existing crafting overrides file."),
            op_sign_editing_only: Entry::new(false, "If true, only OPs can edit signs on servers. Does not affect client worlds."),
            op_pickup_vehicles_only: Entry::new(false, "If true, only OPs can pick up vehicles with wrenches. Does not affect client worlds."),
            creative_pickup_vehicles_only: Entry::new(false, "If true, vehicles can only be picked up in creative mode."),
            block_breakage: Entry::new(true, "Whether vehicles and guns break blocks they hit. If false, vehicles stop at blocks and explosions do not break blocks, though they still explode."),
            vehicle_destruction: Entry::new(true, "Whether vehicles are destroyed when rammed into blocks at high speed."),
            noclip_vehicles: Entry::new(false, "If true, vehicles do not collide with blocks. Vehicles without wheels then cannot move, as they would fall through the ground."),
            creative_damage: Entry::new(false, "If true, damage from vehicles and guns applies to creative players."),
            chunkload_vehicles: Entry::new(true, "If true, vehicles on roads and tracks keep their chunks loaded so they can travel into unloaded chunks."),
            speed_factor: Entry::new(0.35, "Factor applied to vehicle movement. 1 is realistic but too fast for block worlds. Adjust with caution."),
            fuel_usage_factor: Entry::new(1.0, "Factor for how fast engines use fuel."),
            engine_hours_factor: Entry::new(1.0, "Factor for how fast engine hours accumulate, and so how fast engines wear out."),
            climb_speed: Entry::new(0.125, "How far a vehicle climbs blocks every tick when its wheels sink into the ground. Higher values climb faster but move less smoothly."),
            gravity_factor: Entry::new(1.0, "Factor for gravity applied to vehicles. Does not affect aircraft."),
            engine_speed_temp_factor: Entry::new(1.0, "Factor for how RPM affects engine temperature."),
            engine_biome_temp_factor: Entry::new(1.0, "Factor for how biome temperature affects engine temperature."),
            item_weights: ItemWeights::default(),
        }
    }
}

/// Mass factors for items, keyed by a substring of the item registry name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemWeights {
    pub comments: Vec<String>,
    pub weights: HashMap<String, f64>,
}

impl Default for ItemWeights {
    fn default() -> Self {
        Self {
            comments: vec![
                "Item weights: any item whose registry name contains a key has its weight multiplied by that key's factor.".to_string(),
                "The mass counts towards vehicle performance, payloads in particular. Add or remove entries as you like.".to_string(),
                "Keys are matched against registry names as used by the /give command, not display names.".to_string(),
            ],
            weights: [
                ("diamond", 4.0),
                ("iron", 4.0),
                ("gold", 4.0),
                ("coal", 2.0),
                ("ore", 2.5),
                ("stone", 1.5),
            ]
            .into_iter()
            .map(|(key, factor)| (key.to_string(), factor))
            .collect(),
        }
    }
}

impl ItemWeights {
    /// Weight factor for `registry_name`: the largest factor among matching
    /// keys, `1.0` if none match.
    pub fn item_weight(&self, registry_name: &str) -> f64 {
        self.weights
            .iter()
            .filter(|(key, _)| registry_name.contains(key.as_str()))
            .map(|(_, factor)| *factor)
            .fold(None, |max: Option<f64>, factor| Some(max.map_or(factor, |max| max.max(factor))))
            .unwrap_or(1.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DamageConfig {
    pub explosions: Entry<bool>,
    pub wheel_breakage: Entry<bool>,
    pub wheel_damage_ignore_velocity: Entry<bool>,
    pub propeller_damage_factor: Entry<f64>,
    pub jet_damage_factor: Entry<f64>,
    pub wheel_damage_factor: Entry<f64>,
    pub crash_damage_factor: Entry<f64>,
    pub bullet_damage_factor: Entry<f64>,
    pub engine_leak_probability: Entry<f64>,
    pub crash_item_drop_percentage: Entry<f64>,
    pub wheel_damage_minimum_velocity: Entry<f64>,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            explosions: Entry::new(true, "Whether vehicles explode when crashed or shot down."),
            wheel_breakage: Entry::new(true, "Whether wheels can break (go flat)."),
            wheel_damage_ignore_velocity: Entry::new(false, "Whether velocity is ignored when calculating wheel damage."),
            propeller_damage_factor: Entry::new(1.0, "Factor for damage caused by propellers."),
            jet_damage_factor: Entry::new(1.0, "Factor for damage caused by jet engines."),
            wheel_damage_factor: Entry::new(1.0, "Factor for damage caused by vehicle wheels."),
            crash_damage_factor: Entry::new(1.0, "Factor for damage caused by crashes."),
            bullet_damage_factor: Entry::new(1.0, "Factor for damage bullets cause to vehicles."),
            engine_leak_probability: Entry::new(0.01, "Chance an engine springs a leak when hit. Explosions multiply this chance by 10."),
            crash_item_drop_percentage: Entry::new(0.75, "Fraction of crafting ingredients dropped when a vehicle crashes. Fire and explosions may still destroy dropped items."),
            wheel_damage_minimum_velocity: Entry::new(0.2, "Minimum velocity in blocks per second for wheels to damage entities."),
        }
    }
}

/// Defaults for well-known fuel types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FuelDefaults {
    Gasoline,
    Diesel,
    Avgas,
    Redstone,
}

impl FromStr for FuelDefaults {
    type Err = String;

    fn from_str(fuel_type: &str) -> Result<Self, Self::Err> {
        match fuel_type.to_lowercase().as_str() {
            "gasoline" => Ok(FuelDefaults::Gasoline),
            "diesel" => Ok(FuelDefaults::Diesel),
            "avgas" => Ok(FuelDefaults::Avgas),
            "redstone" => Ok(FuelDefaults::Redstone),
            other => Err(format!("unknown fuel type {}", other)),
        }
    }
}

impl FuelDefaults {
    /// Fluids accepted as this fuel and their potency.
    pub fn fluids(self) -> HashMap<String, f64> {
        let fluids: &[(&str, f64)] = match self {
            FuelDefaults::Gasoline => &[("lava", 1.0), ("gasoline", 1.0), ("ethanol", 0.85)],
            FuelDefaults::Diesel => &[
                ("lava", 1.0),
                ("diesel", 1.0),
                ("biodiesel", 0.8),
                ("creosote", 0.7),
                ("oil", 0.5),
            ],
            FuelDefaults::Avgas => &[("lava", 1.0), ("gasoline", 1.0)],
            FuelDefaults::Redstone => &[
                ("lava", 1.0),
                ("redstone", 1.0),
                ("moltenredstone", 1.0),
                ("molten_redstone", 1.0),
                ("redstonemolten", 1.0),
                ("redstone_fluid", 1.0),
                ("fluidredstone", 1.0),
                ("fluid_redstone", 1.0),
                ("destabilized_redstone", 1.0),
            ],
        };
        fluids
            .iter()
            .map(|(fluid, potency)| (fluid.to_string(), *potency))
            .collect()
    }
}

/// Fuel type assumed for engines that do not declare one.
pub const DEFAULT_FUEL_TYPE: &str = "diesel";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FuelConfig {
    pub comments: Vec<String>,
    /// Fuel type -> fluid name -> potency.
    pub fuels: HashMap<String, HashMap<String, f64>>,
    /// Fluids present during the last run, name -> display name.
    pub last_loaded_fluids: HashMap<String, String>,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            comments: vec![
                "Fuel configs for engines. Each entry is one fuel type engines can use.".to_string(),
                "Each entry maps the fluids counted as that fuel type to their potency.".to_string(),
                "Edit these values to make engines accept other fluids. See the in-game handbook for details.".to_string(),
                "If you cannot find a fluid's name, run the game with your mods and check lastLoadedFluids, which lists every fluid present during the last run.".to_string(),
            ],
            fuels: HashMap::new(),
            last_loaded_fluids: HashMap::new(),
        }
    }
}

impl FuelConfig {
    /// Builds the default fuel table from the fuel types of every engine in
    /// the loaded packs. Engines without a fuel type count as diesel; unknown
    /// fuel types accept lava only.
    pub fn default_fuels<'a>(
        engine_fuel_types: impl IntoIterator<Item = Option<&'a str>>,
    ) -> HashMap<String, HashMap<String, f64>> {
        let mut fuels = HashMap::new();
        for fuel_type in engine_fuel_types {
            let fuel_type = fuel_type.unwrap_or(DEFAULT_FUEL_TYPE);
            if fuels.contains_key(fuel_type) {
                continue;
            }
            let fluids = match fuel_type.parse::<FuelDefaults>() {
                Ok(defaults) => defaults.fluids(),
                Err(e) => {
                    warn!("No default fluids for {}, accepting lava only", e);
                    HashMap::from([("lava".to_string(), 1.0)])
                }
            };
            fuels.insert(fuel_type.to_string(), fluids);
        }
        fuels
    }

    /// Fills in the default table if the config has no fuels yet. Returns
    /// `true` if anything was added.
    pub fn populate_defaults<'a>(
        &mut self,
        engine_fuel_types: impl IntoIterator<Item = Option<&'a str>>,
    ) -> bool {
        if !self.fuels.is_empty() {
            return false;
        }
        self.fuels = Self::default_fuels(engine_fuel_types);
        !self.fuels.is_empty()
    }

    /// Potency of `fluid` when burnt as `fuel_type`, `None` if not accepted.
    pub fn potency(&self, fuel_type: &str, fluid: &str) -> Option<f64> {
        self.fuels.get(fuel_type)?.get(fluid).copied()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientRenderingConfig {
    #[serde(rename = "renderHUD_1P")]
    pub render_hud_1p: Entry<bool>,
    #[serde(rename = "renderHUD_3P")]
    pub render_hud_3p: Entry<bool>,
    #[serde(rename = "fullHUD_1P")]
    pub full_hud_1p: Entry<bool>,
    #[serde(rename = "fullHUD_3P")]
    pub full_hud_3p: Entry<bool>,
    #[serde(rename = "transpHUD_1P")]
    pub transp_hud_1p: Entry<bool>,
    #[serde(rename = "transpHUD_3P")]
    pub transp_hud_3p: Entry<bool>,
    pub render_windows: Entry<bool>,
    pub inner_windows: Entry<bool>,
    pub vehicle_beams: Entry<bool>,
    pub block_beams: Entry<bool>,
    pub flares_bright: Entry<bool>,
    pub beams_bright: Entry<bool>,
    pub inst_blending: Entry<bool>,
    pub lights_solid: Entry<bool>,
    pub player_tweaks: Entry<bool>,
    pub vehicle_blklt: Entry<bool>,
    pub render_reduction_height: Entry<i32>,
}

impl Default for ClientRenderingConfig {
    fn default() -> Self {
        Self {
            render_hud_1p: Entry::new(true, "If false, the vehicle HUD does not render in 1st-person mode."),
            render_hud_3p: Entry::new(true, "If false, the vehicle HUD does not render in 3rd-person mode."),
            full_hud_1p: Entry::new(false, "If true, the full-size HUD renders in 1st-person instead of the half-size HUD."),
            full_hud_3p: Entry::new(false, "If true, the full-size HUD renders in 3rd-person instead of the half-size HUD."),
            transp_hud_1p: Entry::new(false, "If true, HUD background textures are not rendered in 1st-person."),
            transp_hud_3p: Entry::new(false, "If true, HUD background textures are not rendered in 3rd-person."),
            render_windows: Entry::new(true, "Should glass on vehicle windows be rendered?"),
            inner_windows: Entry::new(false, "Should window glass also be rendered from inside the vehicle? Has no effect if renderWindows is false."),
            vehicle_beams: Entry::new(true, "If false, light beams on vehicles do not render."),
            block_beams: Entry::new(true, "If false, light beams on blocks (decor) do not render."),
            flares_bright: Entry::new(false, "If true, light flares on vehicles and lamps use brightness blending. May help with shaders."),
            beams_bright: Entry::new(true, "If false, light beams on vehicles and lamps do not use brightness blending. Useful if shaders have trouble with it."),
            inst_blending: Entry::new(true, "If false, instruments get no lighted overlay in the dark, only bright textures. Useful if shaders turn lit instruments black."),
            lights_solid: Entry::new(false, "If true, lights render on the first (solid) pass. Should normally be false, but may help with shaders."),
            player_tweaks: Entry::new(true, "If true, player hands are posed when holding guns and limbs when riding in vehicles. Disable if other mods conflict with player rendering."),
            vehicle_blklt: Entry::new(false, "If true, vehicles spawn invisible light blocks to make shaders render them brighter. Use only if the other light options fail."),
            render_reduction_height: Entry::new(250, "Above this height while riding a vehicle the render distance is reduced to 1, which speeds up worldgen and rendering. Singleplayer only."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientControlsConfig {
    pub mouse_yoke: Entry<bool>,
    pub kb_override: Entry<bool>,
    pub simple_throttle: Entry<bool>,
    pub half_throttle: Entry<bool>,
    pub autostart_eng: Entry<bool>,
    pub auto_trn_signals: Entry<bool>,
    #[serde(rename = "north360")]
    pub north_360: Entry<bool>,
    pub dev_mode: Entry<bool>,
    pub control_surface_cooldown: Entry<i32>,
    pub steering_increment: Entry<i32>,
    pub flight_increment: Entry<i32>,
    pub joystick_dead_zone: Entry<f64>,
}

impl Default for ClientControlsConfig {
    fn default() -> Self {
        Self {
            mouse_yoke: Entry::new(false, "Enable mouse yoke for vehicles? Prevents looking around unless unlocked."),
            kb_override: Entry::new(true, "Ignore keyboard controls when a joystick control is mapped? Frees up the keyboard while using a joystick."),
            simple_throttle: Entry::new(true, "If true, vehicles go into reverse after being braked to a stop instead of waiting for a shift, and shift back to forwards the same way. The parking brake is set when leaving the vehicle."),
            half_throttle: Entry::new(false, "If true, the gas key is half throttle and MOD+Throttle is full throttle. Only for car and boat types with on-off throttles, and not combined with simpleThrottle."),
            autostart_eng: Entry::new(true, "If true, engines start when a driver enters and stop when they leave, and the parking brake is applied on leaving. Fuel and electrical systems still apply."),
            auto_trn_signals: Entry::new(true, "If true, turn signals come on when a turn starts and go off when it completes. Otherwise only keybinds or the panel control them."),
            north_360: Entry::new(false, "If true, instruments show North as 360 degrees instead of 180, as real-world headings do."),
            dev_mode: Entry::new(false, "If true, the dev mode GUI is available while sitting in vehicles, allowing JSON edits in-game without restarting."),
            control_surface_cooldown: Entry::new(4, "Ticks before control surfaces return to their natural angle. Not used with a joystick."),
            steering_increment: Entry::new(20, "Units (1/10 degree) wheels turn for every tick the key is held. Not used with a joystick."),
            flight_increment: Entry::new(6, "Units (1/10 degree) elevators and ailerons move for every tick the key is held. Not used with a joystick."),
            joystick_dead_zone: Entry::new(0.03, "Dead zone for joystick axes. Applies to all joysticks."),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlsConfig {
    pub keyboard: HashMap<String, KeyboardBinding>,
    pub joystick: HashMap<String, JoystickBinding>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyboardBinding {
    pub key_code: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoystickBinding {
    pub joystick_name: String,
    pub button_index: i32,
    pub inverted_axis: bool,
    pub axis_min_travel: f64,
    pub axis_max_travel: f64,
}
