//! Combat resolution
//!
//! Turns overlap pairs into kills, score and game over. Pairs are resolved
//! in slot order and an entity killed by an earlier pair is skipped by later
//! ones, so every entity acts at most once per frame.

use super::physics::{overlapping_members, overlapping_pairs};
use super::pool::Poolable;
use super::state::{GameEvent, GamePhase, GameSession};

/// Resolve all combat overlaps for this frame
pub fn resolve_collisions(session: &mut GameSession) {
    player_bullets_vs_enemies(session);
    player_vs_enemies(session);
    player_vs_enemy_bullets(session);
    player_bullets_vs_enemy_bullets(session);
}

fn player_bullets_vs_enemies(session: &mut GameSession) {
    for (b, e) in overlapping_pairs(&session.player_bullets, &session.enemies) {
        let (Some(bullet), Some(enemy)) = (
            session.player_bullets.get_mut(b),
            session.enemies.get_mut(e),
        ) else {
            continue;
        };
        if !bullet.is_alive() || !enemy.is_alive() {
            continue;
        }
        bullet.kill();
        enemy.kill();
        session.score += 1;
        session.push_event(GameEvent::EnemyDestroyed { slot: e });
    }
}

fn player_vs_enemies(session: &mut GameSession) {
    for e in overlapping_members(&session.player, &session.enemies) {
        let Some(enemy) = session.enemies.get_mut(e) else {
            continue;
        };
        if !session.player.alive || !enemy.alive {
            continue;
        }
        enemy.kill();
        session.push_event(GameEvent::EnemyDestroyed { slot: e });
        destroy_player(session);
    }
}

fn player_vs_enemy_bullets(session: &mut GameSession) {
    for b in overlapping_members(&session.player, &session.enemy_bullets) {
        let Some(bullet) = session.enemy_bullets.get_mut(b) else {
            continue;
        };
        if !session.player.alive || !bullet.alive {
            continue;
        }
        bullet.kill();
        destroy_player(session);
    }
}

fn player_bullets_vs_enemy_bullets(session: &mut GameSession) {
    for (p, e) in overlapping_pairs(&session.player_bullets, &session.enemy_bullets) {
        let (Some(ours), Some(theirs)) = (
            session.player_bullets.get_mut(p),
            session.enemy_bullets.get_mut(e),
        ) else {
            continue;
        };
        if !ours.alive || !theirs.alive {
            continue;
        }
        ours.kill();
        theirs.kill();
        session.push_event(GameEvent::BulletsCancelled);
    }
}

fn destroy_player(session: &mut GameSession) {
    session.player.kill();
    session.push_event(GameEvent::PlayerDestroyed);
    trigger_game_over(session);
}

/// Enter game over; returns false if the session was already over
pub fn trigger_game_over(session: &mut GameSession) -> bool {
    if session.phase == GamePhase::GameOver {
        return false;
    }
    session.phase = GamePhase::GameOver;
    log::info!(
        "Game over after {} ticks, final score {}",
        session.time_ticks,
        session.score
    );
    session.push_event(GameEvent::GameOver {
        score: session.score,
    });
    true
}
