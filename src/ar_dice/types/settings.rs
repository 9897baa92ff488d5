//! Game settings and persistence
//!
//! Tuning values live in an optional JSON file. Missing fields fall back to
//! their defaults, so an old or partial file still loads.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::dice::DICE_PER_HAND;

pub const DEFAULT_SETTINGS_FILE: &str = "pokerdice_settings.json";

/// Throw geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowTuning {
    /// Impulse per meter of camera-to-reticle distance
    #[serde(default = "default_impulse_scale")]
    pub impulse_scale: f32,

    /// Subtracted from the camera's backward-axis Y before scaling
    #[serde(default = "default_vertical_bias")]
    pub vertical_bias: f32,

    /// Mass of a die body in kilograms
    #[serde(default = "default_die_mass")]
    pub die_mass: f32,
}

fn default_impulse_scale() -> f32 {
    2.5
}
fn default_vertical_bias() -> f32 {
    std::f32::consts::FRAC_PI_4
}
fn default_die_mass() -> f32 {
    1.0
}

impl Default for ThrowTuning {
    fn default() -> Self {
        Self {
            impulse_scale: default_impulse_scale(),
            vertical_bias: default_vertical_bias(),
            die_mass: default_die_mass(),
        }
    }
}

/// Plane proxy physics material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMaterialSetting {
    #[serde(default = "default_half")]
    pub restitution: f32,
    #[serde(default = "default_half")]
    pub friction: f32,
}

fn default_half() -> f32 {
    0.5
}

impl Default for SurfaceMaterialSetting {
    fn default() -> Self {
        Self {
            restitution: 0.5,
            friction: 0.5,
        }
    }
}

/// Parameters of the desktop tracking stand-in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatedTableSetting {
    /// Full table size (width, depth) in meters
    #[serde(default = "default_table_size")]
    pub size: [f32; 2],

    /// Height of the table top
    #[serde(default = "default_table_height")]
    pub height: f32,

    /// Seconds of scanning until the whole table is detected
    #[serde(default = "default_scan_seconds")]
    pub scan_seconds: f32,

    /// Seconds the session reports `Initializing` after a reset
    #[serde(default = "default_warmup_seconds")]
    pub warmup_seconds: f32,
}

fn default_table_size() -> [f32; 2] {
    [1.2, 0.8]
}
fn default_table_height() -> f32 {
    0.0
}
fn default_scan_seconds() -> f32 {
    3.0
}
fn default_warmup_seconds() -> f32 {
    1.0
}

impl Default for SimulatedTableSetting {
    fn default() -> Self {
        Self {
            size: default_table_size(),
            height: default_table_height(),
            scan_seconds: default_scan_seconds(),
            warmup_seconds: default_warmup_seconds(),
        }
    }
}

/// All persisted tuning
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    #[serde(default = "default_dice_per_hand")]
    pub dice_per_hand: usize,

    /// Dice below this height are lost
    #[serde(default = "default_floor_threshold")]
    pub floor_threshold: f32,

    /// Downward shift of the focus point as a fraction of half the view height
    #[serde(default = "default_focus_bias")]
    pub focus_bias: f32,

    #[serde(default)]
    pub throw: ThrowTuning,

    #[serde(default)]
    pub surface: SurfaceMaterialSetting,

    #[serde(default)]
    pub table: SimulatedTableSetting,

    #[serde(default = "default_physics_hz")]
    pub physics_hz: f64,

    /// Fixed seed for spawn orientations; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub debug_physics: bool,

    #[serde(default = "default_window_size")]
    pub window_size: [u32; 2],
}

fn default_dice_per_hand() -> usize {
    DICE_PER_HAND
}
fn default_floor_threshold() -> f32 {
    -2.0
}
fn default_focus_bias() -> f32 {
    0.25
}
fn default_physics_hz() -> f64 {
    60.0
}
fn default_window_size() -> [u32; 2] {
    [720, 1280]
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            dice_per_hand: default_dice_per_hand(),
            floor_threshold: default_floor_threshold(),
            focus_bias: default_focus_bias(),
            throw: ThrowTuning::default(),
            surface: SurfaceMaterialSetting::default(),
            table: SimulatedTableSetting::default(),
            physics_hz: default_physics_hz(),
            seed: None,
            debug_physics: false,
            window_size: default_window_size(),
        }
    }
}

impl GameSettings {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let mut settings: GameSettings =
            serde_json::from_str(json).map_err(|e| format!("Invalid settings JSON: {}", e))?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to encode settings: {}", e))
    }

    /// Read settings from `path`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json(&json)
    }

    /// Read settings if the file exists. A missing file is `Ok(None)`; a
    /// present but unreadable file is an error the caller reports.
    pub fn load_if_present(path: impl AsRef<Path>) -> Result<Option<Self>, String> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from_file(path).map(Some)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }

    /// Clamp values that would break the game's invariants
    fn sanitize(&mut self) {
        self.dice_per_hand = self.dice_per_hand.clamp(1, DICE_PER_HAND);
        if self.physics_hz.is_nan() || self.physics_hz <= 0.0 {
            self.physics_hz = default_physics_hz();
        }
        if self.throw.die_mass <= 0.0 {
            self.throw.die_mass = default_die_mass();
        }
        self.table.size = [self.table.size[0].max(0.0), self.table.size[1].max(0.0)];
    }
}
