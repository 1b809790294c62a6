//! Arcade physics step
//!
//! Stands in for the engine's arcade body update and broad phase: explicit
//! Euler integration of acceleration and velocity, bullet lifespans and
//! circle-overlap pair detection between pools.

use glam::Vec2;

use super::pool::{Pool, Poolable};
use super::state::{Bullet, GameSession, Ship};

/// A circular collider
pub trait Body: Poolable {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

impl Body for Ship {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.collision_radius()
    }
}

impl Body for Bullet {
    fn center(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.diameter / 2.0
    }
}

/// Whether two alive bodies overlap this frame
#[inline]
pub fn overlaps(a: &impl Body, b: &impl Body) -> bool {
    if !a.is_alive() || !b.is_alive() {
        return false;
    }
    let reach = a.radius() + b.radius();
    a.center().distance_squared(b.center()) < reach * reach
}

/// Every overlapping alive pair between two pools, each pair once
///
/// Pairs come out ordered by slot in `a`, then slot in `b`.
pub fn overlapping_pairs<A: Body, B: Body>(a: &Pool<A>, b: &Pool<B>) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (ia, body_a) in a.iter_alive() {
        for (ib, body_b) in b.iter_alive() {
            if overlaps(body_a, body_b) {
                pairs.push((ia, ib));
            }
        }
    }
    pairs
}

/// Slots in `pool` that overlap a single body
pub fn overlapping_members<A: Body, B: Body>(body: &A, pool: &Pool<B>) -> Vec<usize> {
    if !body.is_alive() {
        return Vec::new();
    }
    pool.iter_alive()
        .filter(|(_, other)| overlaps(body, *other))
        .map(|(slot, _)| slot)
        .collect()
}

#[inline]
fn integrate(pos: &mut Vec2, vel: &mut Vec2, accel: Vec2, dt: f32) {
    *vel += accel * dt;
    *pos += *vel * dt;
}

pub fn integrate_ship(ship: &mut Ship, dt: f32) {
    integrate(&mut ship.pos, &mut ship.vel, ship.accel, dt);
}

pub fn integrate_bullet(bullet: &mut Bullet, dt: f32) {
    bullet.pos += bullet.vel * dt;
}

/// Move every alive body forward by `dt` seconds
pub fn step_motion(session: &mut GameSession, dt: f32) {
    if session.player.alive {
        integrate_ship(&mut session.player, dt);
    }
    for (_, enemy) in session.enemies.iter_alive_mut() {
        integrate_ship(enemy, dt);
    }
    for (_, bullet) in session.player_bullets.iter_alive_mut() {
        integrate_bullet(bullet, dt);
    }
    for (_, bullet) in session.enemy_bullets.iter_alive_mut() {
        integrate_bullet(bullet, dt);
    }
}

/// Count bullet lifespans down by `delta_ms`; returns how many expired
pub fn advance_lifespans(bullets: &mut Pool<Bullet>, delta_ms: f64) -> usize {
    let mut expired = 0;
    for (_, bullet) in bullets.iter_alive_mut() {
        bullet.remaining_ms -= delta_ms;
        if bullet.remaining_ms <= 0.0 {
            bullet.kill();
            expired += 1;
        }
    }
    expired
}
