//! Enemy population: spawn policy and off-screen indicators

use glam::Vec2;
use rand::Rng;

use super::camera::Viewport;
use super::state::{GameEvent, GameSession};
use crate::{angle_between, polar_to_cartesian};

/// Revive one dormant enemy if the spawn timer allows it
///
/// The timer restarts whenever a spawn is attempted, even if the pool has no
/// dormant enemy left, so retries are throttled to the spawn rate. Returns
/// the enemy slot that was revived.
pub fn spawn_enemies(session: &mut GameSession, now_ms: f64) -> Option<usize> {
    let tuning = &session.tuning;
    if session.enemies.alive_count() >= tuning.enemy_amount_max
        || now_ms - session.last_enemy_spawn_at_ms <= tuning.enemy_spawn_rate_ms
    {
        return None;
    }

    let degrees: u32 = session.rng.random_range(0..360);
    let offset = polar_to_cartesian(tuning.enemy_spawn_distance, (degrees as f32).to_radians());
    let spawn_at = session.player.pos + offset;
    session.last_enemy_spawn_at_ms = now_ms;

    let (slot, enemy) = session.enemies.acquire()?;
    enemy.reset_at(spawn_at);
    enemy.weapon.last_fired_at_ms = now_ms;

    log::debug!(
        "Enemy {} spawned at ({:.0}, {:.0}), bearing {}°",
        slot,
        spawn_at.x,
        spawn_at.y,
        degrees
    );
    session.push_event(GameEvent::EnemySpawned { slot });
    Some(slot)
}

/// Show an indicator for every alive enemy outside the camera, hide the rest
pub fn update_indicators(session: &mut GameSession, camera: &Viewport) {
    let player = session.player.pos;
    let radius = session.tuning.indicator_radius;

    for enemy in session.enemies.iter() {
        let Some(indicator) = enemy
            .indicator
            .and_then(|slot| session.indicators.get_mut(slot))
        else {
            continue;
        };

        if enemy.alive && !camera.contains(enemy.pos) {
            let bearing = (enemy.pos - player).normalize_or_zero();
            indicator.show(
                player + bearing * radius,
                angle_between(Vec2::ZERO, bearing),
            );
        } else {
            indicator.hide();
        }
    }
}
