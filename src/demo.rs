//! Idle/demo autopilot
//!
//! Plays the game on its own for attract mode and headless runs. It only
//! produces a [`TickInput`], the same thing a human at the keyboard would.

use glam::Vec2;

use crate::sim::{GameSession, MoveKeys, TickInput};

/// How far the synthetic pointer sits from the screen centre
const POINTER_REACH: f32 = 100.0;

/// Decide this frame's input for the current session
pub fn autopilot(session: &GameSession) -> TickInput {
    if session.is_game_over() {
        // Pulse restart every other frame so the press edge is always seen
        return TickInput {
            restart: session.time_ticks % 2 == 0,
            ..Default::default()
        };
    }

    let player = session.player.pos;
    let nearest = session
        .enemies
        .iter_alive()
        .map(|(_, enemy)| enemy.pos)
        .min_by(|a, b| {
            a.distance_squared(player)
                .partial_cmp(&b.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = nearest else {
        // Nothing to shoot: drift in a slow circle so new world blocks get charted
        let time_factor = session.time_ticks as f32 * 0.01;
        return TickInput {
            arrows: keys_toward(Vec2::from_angle(time_factor)),
            ..Default::default()
        };
    };

    let to_target = (target - player).normalize_or_zero();
    // Circle-strafe: slide sideways while keeping the guns on target
    let strafe = to_target.perp();

    TickInput {
        arrows: keys_toward(strafe),
        pointer: Some(pointer_for_aim(session, to_target)),
        fire: true,
        ..Default::default()
    }
}

/// Screen pointer that makes the player aim along `aim`
///
/// Inverse of [`crate::sim::aim_direction`], including its Y mirror.
pub fn pointer_for_aim(session: &GameSession, aim: Vec2) -> Vec2 {
    let mirrored = Vec2::new(aim.x, -aim.y);
    session.tuning.screen_center() + mirrored * POINTER_REACH
}

/// Closest of the eight key directions to `direction`
fn keys_toward(direction: Vec2) -> MoveKeys {
    const DEADZONE: f32 = 0.38;
    MoveKeys {
        up: direction.y < -DEADZONE,
        down: direction.y > DEADZONE,
        left: direction.x < -DEADZONE,
        right: direction.x > DEADZONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::aim_direction;

    #[test]
    fn test_pointer_round_trips_through_aim() {
        let session = GameSession::new(1);
        let aim = Vec2::new(0.6, -0.8);
        let pointer = pointer_for_aim(&session, aim);
        let back = aim_direction(pointer, session.tuning.screen_center());
        assert!((back - aim).length() < 1e-5);
    }

    #[test]
    fn test_autopilot_shoots_nearest_enemy() {
        let mut session = GameSession::new(1);
        session.enemies.get_mut(0).unwrap().reset_at(Vec2::new(0.0, 900.0));
        session.enemies.get_mut(1).unwrap().reset_at(Vec2::new(200.0, 0.0));

        let input = autopilot(&session);
        assert!(input.fire);
        let aim = aim_direction(input.pointer.unwrap(), session.tuning.screen_center());
        assert!((aim - Vec2::X).length() < 1e-5);
        // Strafing perpendicular to the target
        assert!(input.arrows.up || input.arrows.down);
        assert!(!input.arrows.left && !input.arrows.right);
    }

    #[test]
    fn test_autopilot_drifts_without_enemies() {
        let session = GameSession::new(1);
        let input = autopilot(&session);
        assert!(!input.fire);
        assert_ne!(input.arrows, MoveKeys::default());
    }

    #[test]
    fn test_autopilot_restarts_after_game_over() {
        let mut session = GameSession::new(1);
        crate::sim::trigger_game_over(&mut session);
        let pressed = (0..2)
            .map(|t| {
                session.time_ticks = t;
                autopilot(&session).restart
            })
            .filter(|r| *r)
            .count();
        assert_eq!(pressed, 1);
    }
}
