//! Player input translation
//!
//! Turns logical input signals (held direction keys, pointer position,
//! fire/restart buttons) into steering, facing and fire requests.
//!
//! Aiming keeps the arcade's vertical mirror: the pointer offset from the
//! screen centre is flipped on Y before it becomes a world direction, and
//! the ship faces along that flipped direction. Bullets and the hull
//! always agree with each other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::{accelerate, cap_speed, fire_weapon};
use super::state::{Faction, GameEvent, GameSession};

/// One set of four direction keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// Combine two bindings of the same directions
    pub fn merge(self, other: MoveKeys) -> MoveKeys {
        MoveKeys {
            up: self.up || other.up,
            down: self.down || other.down,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }

    /// Raw axis values in {-1, 0, 1}, screen "up" is -Y
    pub fn axis(&self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.up {
            axis.y -= 1.0;
        }
        if self.down {
            axis.y += 1.0;
        }
        if self.left {
            axis.x -= 1.0;
        }
        if self.right {
            axis.x += 1.0;
        }
        axis
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Arrow keys
    pub arrows: MoveKeys,
    /// WASD
    pub wasd: MoveKeys,
    /// Pointer position in screen space (None when no pointer is available)
    pub pointer: Option<Vec2>,
    /// Fire button held
    pub fire: bool,
    /// Restart button held (only the press edge restarts)
    pub restart: bool,
}

impl TickInput {
    /// All bound direction keys
    pub fn move_keys(&self) -> MoveKeys {
        self.arrows.merge(self.wasd)
    }
}

/// Unit movement direction for the held keys (zero when idle or cancelled out)
#[inline]
pub fn movement_direction(keys: MoveKeys) -> Vec2 {
    keys.axis().normalize_or_zero()
}

/// World aim direction for a pointer position, with the Y mirror applied
#[inline]
pub fn aim_direction(pointer: Vec2, screen_center: Vec2) -> Vec2 {
    let offset = (pointer - screen_center).normalize_or_zero();
    Vec2::new(offset.x, -offset.y)
}

/// Facing angle for an aim direction
#[inline]
pub fn aim_rotation(aim: Vec2) -> f32 {
    aim.y.atan2(aim.x)
}

/// Steer, turn and fire the player's ship from this tick's input
pub fn apply_player_input(session: &mut GameSession, input: &TickInput, now_ms: f64) {
    if !session.player.alive {
        return;
    }

    let direction = movement_direction(input.move_keys());
    let player = &mut session.player;
    accelerate(player, direction, session.tuning.player_acceleration);
    cap_speed(player, session.tuning.player_speed_max);

    let aim = match input.pointer {
        Some(pointer) => {
            let aim = aim_direction(pointer, session.tuning.screen_center());
            player.rotation = aim_rotation(aim);
            aim
        }
        None => Vec2::from_angle(player.rotation),
    };

    if input.fire
        && fire_weapon(player, aim, &mut session.player_bullets, now_ms).is_some()
    {
        session.push_event(GameEvent::ShotFired {
            faction: Faction::Player,
        });
    }
}
