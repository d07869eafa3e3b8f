use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::terrain::carver::RemnantLimits;

/// Balance constants for carving, falloff damage and spawn placement.
///
/// Every field has a default, so a JSON override only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTuning {
    /// Impacts with a smaller radius are ignored.
    pub min_carve_radius: f32,
    /// Carve remnants narrower than this half-width are never created.
    pub carve_min_half_width: f32,
    /// Carve remnants thinner than this half-height are never created.
    pub carve_min_half_height: f32,
    /// Lower bound of the damage multiplier at the edge of the radius.
    pub falloff_floor: f32,
    /// Only platforms wider than this (half-width) split when destroyed by damage.
    pub fragment_min_platform_half_width: f32,
    /// Half-width of the blast window as a fraction of the impact radius.
    pub blast_window_scale: f32,
    /// Damage fragments narrower than this half-width are never created.
    pub fragment_min_half_width: f32,
    /// Fraction of the parent's max health a damage fragment starts with.
    pub fragment_health_scale: f32,
    /// Nominal damage of a high-yield blast.
    pub nuke_damage: f32,
    /// Platforms at or below this half-width are never chosen for spawns.
    pub spawn_min_half_width: f32,
    /// Spawn x is drawn within this fraction of the half-width around the centre.
    pub spawn_spread: f32,
    /// Height above the platform top a spawned body is placed at.
    pub spawn_clearance: f32,
    /// Seed for the arena's spawn RNG.
    pub rng_seed: u64,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            min_carve_radius: 0.05,
            carve_min_half_width: 0.15,
            carve_min_half_height: 0.08,
            falloff_floor: 0.2,
            fragment_min_platform_half_width: 1.0,
            blast_window_scale: 0.5,
            fragment_min_half_width: 0.4,
            fragment_health_scale: 0.6,
            nuke_damage: 9999.0,
            spawn_min_half_width: 0.5,
            spawn_spread: 0.8,
            spawn_clearance: 0.5,
            rng_seed: 0x5EED_CAFE,
        }
    }
}

impl TerrainTuning {
    /// Parse tuning overrides from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn carve_limits(&self) -> RemnantLimits {
        RemnantLimits {
            min_half_width: self.carve_min_half_width,
            min_half_height: self.carve_min_half_height,
        }
    }
}

/// Runner configuration: simulation rate, gravity and terrain tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum fixed steps run for one rendered frame.
    pub max_steps_per_frame: u32,
    /// Gravity in world units/s². Arena space is Y-up.
    pub gravity: Vec2,
    pub tuning: TerrainTuning,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            gravity: Vec2::new(0.0, -20.0),
            tuning: TerrainTuning::default(),
        }
    }
}

impl ArenaConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
