//! Actions a ship can take: thrust, speed limiting, firing
//!
//! Directions passed in here must already be unit vectors (or zero).
//! That is the caller's contract and is not checked.

use glam::Vec2;

use super::pool::Pool;
use super::state::{Bullet, Ship};

/// Set the ship's acceleration to `direction * magnitude`
#[inline]
pub fn accelerate(ship: &mut Ship, direction: Vec2, magnitude: f32) {
    ship.accel = direction * magnitude;
}

/// Clamp the ship's speed to `max_speed`, keeping its heading
#[inline]
pub fn cap_speed(ship: &mut Ship, max_speed: f32) {
    if ship.vel.length() > max_speed {
        ship.vel = ship.vel.normalize_or_zero() * max_speed;
    }
}

/// Fire one bullet from `bullets` along `direction`
///
/// Returns the bullet slot used, or `None` when the weapon is cooling down
/// or every bullet in the pool is already in flight. The bullet starts at
/// the hull edge and inherits the ship's velocity.
pub fn fire_weapon(
    ship: &mut Ship,
    direction: Vec2,
    bullets: &mut Pool<Bullet>,
    now_ms: f64,
) -> Option<usize> {
    if !ship.weapon.ready(now_ms) {
        return None;
    }

    let (slot, bullet) = bullets.acquire()?;

    let muzzle = ship.pos + direction * ship.half_extents();
    let vel = ship.vel + direction * ship.weapon.bullet_speed;
    bullet.launch(muzzle, vel, ship.weapon.bullet_lifespan_ms);

    ship.weapon.last_fired_at_ms = now_ms;
    Some(slot)
}
