//! Enemy pilots
//!
//! Pure seek-and-shoot: every alive enemy turns to the player, thrusts
//! straight at them and fires once within range. No pathfinding.

use super::action::{accelerate, cap_speed, fire_weapon};
use super::state::{Faction, GameEvent, GameSession};
use crate::angle_between;

/// Run one tick of AI for every alive enemy
pub fn run_enemy_ai(session: &mut GameSession, now_ms: f64) {
    let target = session.player.pos;
    let tuning = &session.tuning;
    let mut shots = 0usize;

    for (_, enemy) in session.enemies.iter_alive_mut() {
        enemy.rotation = angle_between(enemy.pos, target);

        let to_player = (target - enemy.pos).normalize_or_zero();
        accelerate(enemy, to_player, tuning.enemy_acceleration);
        cap_speed(enemy, tuning.enemy_speed_max);

        if enemy.pos.distance(target) < tuning.enemy_fire_range
            && fire_weapon(enemy, to_player, &mut session.enemy_bullets, now_ms).is_some()
        {
            shots += 1;
        }
    }

    for _ in 0..shots {
        session.push_event(GameEvent::ShotFired {
            faction: Faction::Enemy,
        });
    }
}
