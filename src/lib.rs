//! Blaster - a top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, steering, combat, spawning)
//! - `tuning`: Data-driven game balance
//! - `demo`: Autopilot input for attract mode and headless runs
//! - `error`: Configuration errors

pub mod demo;
pub mod error;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, Result};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (reference tuning)
pub mod consts {
    /// Frame length of the reference 60 Hz host loop (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Visible screen size; the pointer is reported in this space
    pub const GAME_WIDTH: f32 = 640.0;
    pub const GAME_HEIGHT: f32 = 480.0;

    /// Player ship
    pub const PLAYER_ACCELERATION: f32 = 1000.0;
    pub const PLAYER_SPEED_MAX: f32 = 500.0;
    pub const PLAYER_FIRE_RATE_MS: f64 = 80.0;
    pub const PLAYER_BULLET_SPEED: f32 = 800.0;
    pub const PLAYER_BULLET_AMOUNT: usize = 256;
    pub const PLAYER_BULLET_LIFESPAN_MS: f64 = 20_000.0;
    pub const PLAYER_SHIP_DIAMETER: f32 = 48.0;
    pub const PLAYER_BULLET_DIAMETER: f32 = 16.0;

    /// Enemy ships
    pub const ENEMY_ACCELERATION: f32 = 2000.0;
    pub const ENEMY_SPEED_MAX: f32 = 400.0;
    /// Max concurrent enemies, also the enemy pool capacity
    pub const ENEMY_AMOUNT_MAX: usize = 64;
    pub const ENEMY_BULLET_AMOUNT: usize = 1024;
    pub const ENEMY_BULLET_SPEED: f32 = 200.0;
    pub const ENEMY_BULLET_LIFESPAN_MS: f64 = 20_000.0;
    pub const ENEMY_FIRE_RANGE: f32 = 300.0;
    pub const ENEMY_FIRE_RATE_MS: f64 = 1000.0;
    pub const ENEMY_SHIP_DIAMETER: f32 = 32.0;
    pub const ENEMY_BULLET_DIAMETER: f32 = 12.0;
    pub const ENEMY_SPAWN_RATE_MS: f64 = 1000.0;
    /// Enemies appear on a circle of this radius around the player
    pub const ENEMY_SPAWN_DISTANCE: f32 = 500.0;

    /// Off-screen indicators sit this far from the player (just inside the screen edge)
    pub const INDICATOR_RADIUS: f32 = 210.0;

    /// Background decoration grid
    pub const WORLD_BLOCK_WIDTH: f32 = 1000.0;
    pub const WORLD_BLOCK_HEIGHT: f32 = 1000.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Angle of the line from `from` to `to`, measured from the +X axis
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}
