//! Per-frame simulation tick
//!
//! Core game loop that advances the session by one rendered frame.

use serde::{Deserialize, Serialize};

use super::ai::run_enemy_ai;
use super::camera::Viewport;
use super::collision::resolve_collisions;
use super::input::{TickInput, apply_player_input};
use super::physics::{advance_lifespans, step_motion};
use super::population::{spawn_enemies, update_indicators};
use super::state::{GameEvent, GamePhase, GameSession};
use super::world::chart_world;

/// Monotonic frame clock reading supplied by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    /// Time since the host loop started (ms)
    pub now_ms: f64,
    /// Time since the previous frame (ms)
    pub delta_ms: f64,
}

impl FrameClock {
    pub fn new(now_ms: f64, delta_ms: f64) -> Self {
        Self { now_ms, delta_ms }
    }

    /// The next frame, `delta_ms` later
    pub fn advance(self, delta_ms: f64) -> Self {
        Self {
            now_ms: self.now_ms + delta_ms,
            delta_ms,
        }
    }

    /// Frame delta in seconds, for integration
    #[inline]
    pub fn dt_secs(&self) -> f32 {
        (self.delta_ms / 1000.0) as f32
    }
}

/// Advance the game session by one frame
///
/// Events left over from the previous tick are discarded first, so the host
/// reads [`GameSession::events`] (or drains them) after every call.
pub fn tick(session: &mut GameSession, input: &TickInput, clock: FrameClock, camera: &Viewport) {
    let now = clock.now_ms;
    session.now_ms = now;
    session.time_ticks += 1;
    session.clear_events();

    let restart_pressed = input.restart && !session.restart_held;
    session.restart_held = input.restart;

    match session.phase {
        GamePhase::Running => {
            apply_player_input(session, input, now);
            chart_world(session);

            spawn_enemies(session, now);
            update_indicators(session, camera);

            run_enemy_ai(session, now);

            step_motion(session, clock.dt_secs());
            resolve_collisions(session);

            advance_lifespans(&mut session.player_bullets, clock.delta_ms);
            advance_lifespans(&mut session.enemy_bullets, clock.delta_ms);
        }

        GamePhase::GameOver => {
            // Enemies hold position until the next run
            for (_, enemy) in session.enemies.iter_alive_mut() {
                enemy.freeze();
            }

            // Enemies killed on the final frame lose their markers here
            update_indicators(session, camera);

            // Shots already in flight keep flying out
            step_motion(session, clock.dt_secs());
            advance_lifespans(&mut session.player_bullets, clock.delta_ms);
            advance_lifespans(&mut session.enemy_bullets, clock.delta_ms);

            if restart_pressed {
                restart(session, now);
            }
        }
    }
}

/// Start a new run in place
pub fn restart(session: &mut GameSession, now_ms: f64) {
    session.reset(now_ms);
    log::info!("Session restarted at {:.0} ms", now_ms);
    session.push_event(GameEvent::Restarted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_MS;
    use crate::sim::input::MoveKeys;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn frame(n: u32) -> FrameClock {
        FrameClock::new(n as f64 * FRAME_MS, FRAME_MS)
    }

    fn run(session: &mut GameSession, input: &TickInput, clock: FrameClock) {
        let camera = session.camera();
        tick(session, input, clock, &camera);
    }

    #[test]
    fn test_enemy_closes_in_on_player() {
        let mut session = GameSession::new(8);
        // Keep the spawner quiet
        session.last_enemy_spawn_at_ms = 1.0e9;
        session.enemies.get_mut(0).unwrap().reset_at(Vec2::new(500.0, 0.0));

        run(&mut session, &TickInput::default(), frame(1));

        let enemy = session.enemies.get(0).unwrap();
        assert!((enemy.accel.normalize() - Vec2::new(-1.0, 0.0)).length() < 1e-5);
        assert!(enemy.vel.x < 0.0);
        assert!(enemy.pos.x < 500.0);
        assert!(enemy.pos.distance(session.player.pos) < 500.0);
    }

    #[test]
    fn test_enemies_spawn_over_time() {
        // Parked, harmless enemies so the player survives the whole run
        let tuning = Tuning {
            enemy_acceleration: 0.0,
            enemy_fire_range: 0.0,
            ..Tuning::default()
        };
        let mut session = GameSession::with_tuning(8, tuning);
        let input = TickInput::default();
        let mut spawned = 0;
        // A little over three seconds at 60 Hz
        for n in 1..=200 {
            run(&mut session, &input, frame(n));
            spawned += session
                .events()
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
                .count();
        }
        assert_eq!(session.alive_enemy_count(), 3);
        assert_eq!(spawned, 3);
    }

    #[test]
    fn test_player_moves_with_keys() {
        let mut session = GameSession::new(8);
        session.last_enemy_spawn_at_ms = 1.0e9;
        let input = TickInput {
            wasd: MoveKeys {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for n in 1..=30 {
            run(&mut session, &input, frame(n));
        }
        assert!(session.player.pos.x > 0.0);
        assert!(session.player.pos.y.abs() < 1e-3);
        assert!(session.player.vel.length() <= session.tuning.player_speed_max + 1000.0 * 0.02);
    }

    #[test]
    fn test_bullets_expire_over_frames() {
        let mut session = GameSession::new(8);
        session.last_enemy_spawn_at_ms = 1.0e9;
        session
            .player_bullets
            .get_mut(0)
            .unwrap()
            .launch(Vec2::new(0.0, -100.0), Vec2::new(0.0, -10.0), 40.0);

        run(&mut session, &TickInput::default(), frame(1));
        run(&mut session, &TickInput::default(), frame(2));
        assert_eq!(session.player_bullets.alive_count(), 1);
        run(&mut session, &TickInput::default(), frame(3));
        assert_eq!(session.player_bullets.alive_count(), 0);
    }

    #[test]
    fn test_death_freezes_enemies_until_restart() {
        let mut session = GameSession::new(8);
        session.last_enemy_spawn_at_ms = 1.0e9;
        session.score = 4;
        // One enemy rams the player, another is still approaching
        session.enemies.get_mut(0).unwrap().reset_at(Vec2::new(20.0, 0.0));
        session.enemies.get_mut(1).unwrap().reset_at(Vec2::new(-900.0, 0.0));

        run(&mut session, &TickInput::default(), frame(1));
        assert_eq!(session.phase, GamePhase::GameOver);
        assert!(!session.player.alive);

        run(&mut session, &TickInput::default(), frame(2));
        let survivor = session.enemies.get(1).unwrap();
        assert!(survivor.alive);
        assert_eq!(survivor.vel, Vec2::ZERO);
        assert_eq!(survivor.accel, Vec2::ZERO);
        let parked = survivor.pos;

        run(&mut session, &TickInput::default(), frame(3));
        assert_eq!(session.enemies.get(1).unwrap().pos, parked);
        // Score stays on display during game over
        assert_eq!(session.score, 4);
    }

    #[test]
    fn test_restart_is_edge_triggered() {
        let mut session = GameSession::new(8);
        session.enemy_bullets.get_mut(0).unwrap().launch(Vec2::new(0.0, 10.0), Vec2::ZERO, 1000.0);
        session.score = 7;

        // Restart held at the moment of death does not count as a press
        let held = TickInput {
            restart: true,
            ..Default::default()
        };
        run(&mut session, &held, frame(1));
        assert!(session.is_game_over());
        run(&mut session, &held, frame(2));
        assert!(session.is_game_over());

        // Release, then press
        run(&mut session, &TickInput::default(), frame(3));
        session.drain_events();
        run(&mut session, &held, frame(4));

        assert_eq!(session.phase, GamePhase::Running);
        assert_eq!(session.score, 0);
        assert!(session.player.alive);
        assert_eq!(session.player.pos, Vec2::ZERO);
        assert_eq!(session.alive_enemy_count(), 0);
        assert_eq!(session.enemy_bullets.alive_count(), 0);
        assert_eq!(session.player_bullets.alive_count(), 0);
        assert_eq!(session.last_enemy_spawn_at_ms, frame(4).now_ms);
        assert_eq!(session.events(), &[GameEvent::Restarted]);

        // Holding the button afterwards changes nothing
        run(&mut session, &held, frame(5));
        assert_eq!(session.phase, GamePhase::Running);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut session = GameSession::new(8);
        session.score = 2;
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        run(&mut session, &input, frame(1));
        assert_eq!(session.score, 2);
        assert!(!session.events().contains(&GameEvent::Restarted));
    }

    #[test]
    fn test_no_spawn_flood_after_restart() {
        let mut session = GameSession::new(8);
        session.enemy_bullets.get_mut(0).unwrap().launch(Vec2::ZERO, Vec2::ZERO, 1000.0);
        run(&mut session, &TickInput::default(), frame(1));
        assert!(session.is_game_over());

        // Long wait on the game over screen
        let restart_at = 600;
        run(
            &mut session,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            frame(restart_at),
        );
        assert!(!session.is_game_over());

        // The spawn timer started over at restart
        for n in restart_at + 1..=restart_at + 50 {
            run(&mut session, &TickInput::default(), frame(n));
        }
        assert_eq!(session.alive_enemy_count(), 0);
        for n in restart_at + 51..=restart_at + 70 {
            run(&mut session, &TickInput::default(), frame(n));
        }
        assert_eq!(session.alive_enemy_count(), 1);
    }

    #[test]
    fn test_events_last_one_tick() {
        let mut session = GameSession::new(8);
        session.last_enemy_spawn_at_ms = 1.0e9;
        run(&mut session, &TickInput::default(), frame(1));
        // The first frame charts the blocks around the origin
        assert!(!session.events().is_empty());

        for n in 2..=120 {
            run(&mut session, &TickInput::default(), frame(n));
        }
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_marker_cleared_for_enemy_killed_as_player_dies() {
        let mut session = GameSession::new(8);
        session.last_enemy_spawn_at_ms = 1.0e9;
        let far = Vec2::new(2000.0, 0.0);
        session.enemies.get_mut(0).unwrap().reset_at(far);
        session
            .player_bullets
            .get_mut(0)
            .unwrap()
            .launch(far, Vec2::ZERO, 1000.0);
        session
            .enemy_bullets
            .get_mut(0)
            .unwrap()
            .launch(Vec2::ZERO, Vec2::ZERO, 1000.0);
        let marker = session.enemies.get(0).unwrap().indicator.unwrap();

        // Marker shown this frame, then the enemy and the player both die
        run(&mut session, &TickInput::default(), frame(1));
        assert!(session.is_game_over());
        assert!(!session.enemies.get(0).unwrap().alive);
        assert_eq!(session.score, 1);
        assert!(session.indicators.get(marker).unwrap().alive);

        for n in 2..=120 {
            run(&mut session, &TickInput::default(), frame(n));
        }
        assert!(session.is_game_over());
        assert!(!session.indicators.get(marker).unwrap().alive);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameSession::new(99999);
        let mut b = GameSession::new(99999);
        let input = TickInput {
            arrows: MoveKeys {
                up: true,
                ..Default::default()
            },
            pointer: Some(Vec2::new(100.0, 50.0)),
            fire: true,
            ..Default::default()
        };

        for n in 1..=400 {
            run(&mut a, &input, frame(n));
            run(&mut b, &input, frame(n));
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert!((a.player.pos - b.player.pos).length() < 1e-4);
        let ea: Vec<_> = a.enemies.iter_alive().map(|(_, e)| e.pos).collect();
        let eb: Vec<_> = b.enemies.iter_alive().map(|(_, e)| e.pos).collect();
        assert_eq!(ea, eb);
    }
}
