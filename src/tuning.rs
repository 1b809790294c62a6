//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! tuning file only needs the values it wants to override.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// Runtime-tunable gameplay values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub game_width: f32,
    pub game_height: f32,

    // === Player ===
    pub player_acceleration: f32,
    pub player_speed_max: f32,
    pub player_fire_rate_ms: f64,
    pub player_bullet_speed: f32,
    pub player_bullet_amount: usize,
    pub player_bullet_lifespan_ms: f64,
    pub player_ship_diameter: f32,
    pub player_bullet_diameter: f32,

    // === Enemies ===
    pub enemy_acceleration: f32,
    pub enemy_speed_max: f32,
    pub enemy_amount_max: usize,
    pub enemy_bullet_amount: usize,
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_lifespan_ms: f64,
    pub enemy_fire_range: f32,
    pub enemy_fire_rate_ms: f64,
    pub enemy_ship_diameter: f32,
    pub enemy_bullet_diameter: f32,
    pub enemy_spawn_rate_ms: f64,
    pub enemy_spawn_distance: f32,

    // === HUD ===
    pub indicator_radius: f32,

    // === World ===
    pub world_block_width: f32,
    pub world_block_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,

            player_acceleration: PLAYER_ACCELERATION,
            player_speed_max: PLAYER_SPEED_MAX,
            player_fire_rate_ms: PLAYER_FIRE_RATE_MS,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            player_bullet_amount: PLAYER_BULLET_AMOUNT,
            player_bullet_lifespan_ms: PLAYER_BULLET_LIFESPAN_MS,
            player_ship_diameter: PLAYER_SHIP_DIAMETER,
            player_bullet_diameter: PLAYER_BULLET_DIAMETER,

            enemy_acceleration: ENEMY_ACCELERATION,
            enemy_speed_max: ENEMY_SPEED_MAX,
            enemy_amount_max: ENEMY_AMOUNT_MAX,
            enemy_bullet_amount: ENEMY_BULLET_AMOUNT,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            enemy_bullet_lifespan_ms: ENEMY_BULLET_LIFESPAN_MS,
            enemy_fire_range: ENEMY_FIRE_RANGE,
            enemy_fire_rate_ms: ENEMY_FIRE_RATE_MS,
            enemy_ship_diameter: ENEMY_SHIP_DIAMETER,
            enemy_bullet_diameter: ENEMY_BULLET_DIAMETER,
            enemy_spawn_rate_ms: ENEMY_SPAWN_RATE_MS,
            enemy_spawn_distance: ENEMY_SPAWN_DISTANCE,

            indicator_radius: INDICATOR_RADIUS,

            world_block_width: WORLD_BLOCK_WIDTH,
            world_block_height: WORLD_BLOCK_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse a JSON tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Centre of the screen in pointer coordinates
    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(self.game_width / 2.0, self.game_height / 2.0)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("game_width", self.game_width),
            ("game_height", self.game_height),
            ("player_speed_max", self.player_speed_max),
            ("player_ship_diameter", self.player_ship_diameter),
            ("player_bullet_diameter", self.player_bullet_diameter),
            ("enemy_speed_max", self.enemy_speed_max),
            ("enemy_ship_diameter", self.enemy_ship_diameter),
            ("enemy_bullet_diameter", self.enemy_bullet_diameter),
            ("world_block_width", self.world_block_width),
            ("world_block_height", self.world_block_height),
        ];
        for (field, value) in positive {
            check_positive(field, value)?;
        }

        let non_negative = [
            ("player_acceleration", self.player_acceleration),
            ("player_bullet_speed", self.player_bullet_speed),
            ("enemy_acceleration", self.enemy_acceleration),
            ("enemy_bullet_speed", self.enemy_bullet_speed),
            ("enemy_fire_range", self.enemy_fire_range),
            ("enemy_spawn_distance", self.enemy_spawn_distance),
            ("indicator_radius", self.indicator_radius),
        ];
        for (field, value) in non_negative {
            check_non_negative(field, value)?;
        }

        let durations = [
            ("player_fire_rate_ms", self.player_fire_rate_ms),
            ("player_bullet_lifespan_ms", self.player_bullet_lifespan_ms),
            ("enemy_fire_rate_ms", self.enemy_fire_rate_ms),
            ("enemy_bullet_lifespan_ms", self.enemy_bullet_lifespan_ms),
            ("enemy_spawn_rate_ms", self.enemy_spawn_rate_ms),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    value: value.to_string(),
                    reason: "must be a finite duration >= 0 ms",
                });
            }
        }

        let pools = [
            ("player_bullet_amount", self.player_bullet_amount),
            ("enemy_amount_max", self.enemy_amount_max),
            ("enemy_bullet_amount", self.enemy_bullet_amount),
        ];
        for (field, value) in pools {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    value: value.to_string(),
                    reason: "pool capacity must be at least 1",
                });
            }
        }

        Ok(())
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value: value.to_string(),
            reason: "must be finite and > 0",
        })
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            value: value.to_string(),
            reason: "must be finite and >= 0",
        })
    }
}
