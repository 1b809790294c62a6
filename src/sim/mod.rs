//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame clock supplied by the host, no internal timers
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod action;
pub mod ai;
pub mod camera;
pub mod collision;
pub mod input;
pub mod physics;
pub mod pool;
pub mod population;
pub mod state;
pub mod tick;
pub mod world;

pub use action::{accelerate, cap_speed, fire_weapon};
pub use camera::Viewport;
pub use collision::{resolve_collisions, trigger_game_over};
pub use input::{MoveKeys, TickInput, aim_direction, aim_rotation, movement_direction};
pub use pool::{Pool, Poolable};
pub use state::{
    Bullet, Faction, GameEvent, GamePhase, GameSession, Indicator, Ship, Weapon,
};
pub use tick::{FrameClock, restart, tick};
pub use world::{BlockCoord, BlockDecoration, Decoration, WorldChart};
