//! Game state and core simulation types
//!
//! Everything a running session owns lives here. Entities are allocated once
//! into pools when the session is built; nothing is created or destroyed
//! while playing.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Viewport;
use super::pool::{Pool, Poolable};
use super::world::{BlockCoord, BlockDecoration, WorldChart};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player alive, simulation advancing
    Running,
    /// Player destroyed, waiting for restart
    GameOver,
}

/// Which side an entity fights for (also its colour tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    /// Fill colour used by the presentation layer
    pub fn color(&self) -> u32 {
        match self {
            Faction::Player => 0x00eeee,
            Faction::Enemy => 0xff0000,
        }
    }
}

/// A ship-mounted gun
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub bullet_speed: f32,
    pub bullet_lifespan_ms: f64,
    /// Minimum gap between shots; a gap of exactly this long still blocks
    pub fire_rate_ms: f64,
    pub last_fired_at_ms: f64,
}

impl Weapon {
    pub fn new(bullet_speed: f32, bullet_lifespan_ms: f64, fire_rate_ms: f64) -> Self {
        Self {
            bullet_speed,
            bullet_lifespan_ms,
            fire_rate_ms,
            last_fired_at_ms: 0.0,
        }
    }

    /// Whether the cooldown has fully elapsed at `now_ms`
    #[inline]
    pub fn ready(&self, now_ms: f64) -> bool {
        now_ms - self.last_fired_at_ms > self.fire_rate_ms
    }
}

/// A piloted entity, player or enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub faction: Faction,
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Facing (radians)
    pub rotation: f32,
    pub scale: Vec2,
    pub diameter: f32,
    pub alive: bool,
    pub weapon: Weapon,
    /// Slot in the indicator pool (enemies only, never owned)
    pub indicator: Option<usize>,
}

impl Ship {
    /// The player's ship, alive at the origin
    pub fn player(tuning: &Tuning) -> Self {
        Self {
            faction: Faction::Player,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            diameter: tuning.player_ship_diameter,
            alive: true,
            weapon: Weapon::new(
                tuning.player_bullet_speed,
                tuning.player_bullet_lifespan_ms,
                tuning.player_fire_rate_ms,
            ),
            indicator: None,
        }
    }

    /// A dormant enemy bound to indicator slot `indicator`
    pub fn enemy(tuning: &Tuning, indicator: usize) -> Self {
        Self {
            faction: Faction::Enemy,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
            diameter: tuning.enemy_ship_diameter,
            alive: false,
            weapon: Weapon::new(
                tuning.enemy_bullet_speed,
                tuning.enemy_bullet_lifespan_ms,
                tuning.enemy_fire_rate_ms,
            ),
            indicator: Some(indicator),
        }
    }

    /// Half extents of the hull, scaled per axis
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.scale * (self.diameter / 2.0)
    }

    /// Radius used for overlap tests
    #[inline]
    pub fn collision_radius(&self) -> f32 {
        self.half_extents().max_element()
    }

    /// Deactivate; the slot stays allocated
    pub fn kill(&mut self) {
        self.alive = false;
        self.vel = Vec2::ZERO;
        self.accel = Vec2::ZERO;
    }

    /// Reactivate at `pos` with no motion
    pub fn reset_at(&mut self, pos: Vec2) {
        self.alive = true;
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.accel = Vec2::ZERO;
    }

    /// Stop in place without dying
    pub fn freeze(&mut self) {
        self.vel = Vec2::ZERO;
        self.accel = Vec2::ZERO;
    }
}

impl Poolable for Ship {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// A projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub faction: Faction,
    pub pos: Vec2,
    pub vel: Vec2,
    pub alive: bool,
    pub remaining_ms: f64,
    pub diameter: f32,
}

impl Bullet {
    pub fn new(faction: Faction, diameter: f32) -> Self {
        Self {
            faction,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            alive: false,
            remaining_ms: 0.0,
            diameter,
        }
    }

    /// Bring a pooled bullet into flight
    pub fn launch(&mut self, pos: Vec2, vel: Vec2, lifespan_ms: f64) {
        self.alive = true;
        self.pos = pos;
        self.vel = vel;
        self.remaining_ms = lifespan_ms;
    }

    pub fn kill(&mut self) {
        self.alive = false;
        self.vel = Vec2::ZERO;
        self.remaining_ms = 0.0;
    }
}

impl Poolable for Bullet {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Edge-of-screen marker pointing at an off-screen enemy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Indicator {
    pub pos: Vec2,
    pub rotation: f32,
    pub alive: bool,
}

impl Indicator {
    pub fn show(&mut self, pos: Vec2, rotation: f32) {
        self.alive = true;
        self.pos = pos;
        self.rotation = rotation;
    }

    pub fn hide(&mut self) {
        self.alive = false;
    }
}

impl Poolable for Indicator {
    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Things that happened during a tick, for sound and HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { faction: Faction },
    EnemySpawned { slot: usize },
    EnemyDestroyed { slot: usize },
    BulletsCancelled,
    PlayerDestroyed,
    GameOver { score: u64 },
    Restarted,
    WorldBlockCharted {
        block: BlockCoord,
        decoration: BlockDecoration,
    },
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub score: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Frame clock reading of the latest tick (ms)
    pub now_ms: f64,
    pub player: Ship,
    pub enemies: Pool<Ship>,
    /// One indicator per enemy slot
    pub indicators: Pool<Indicator>,
    pub player_bullets: Pool<Bullet>,
    pub enemy_bullets: Pool<Bullet>,
    pub last_enemy_spawn_at_ms: f64,
    pub world: WorldChart,
    /// Restart input level seen on the previous tick
    pub(crate) restart_held: bool,
    #[serde(skip, default = "unseeded_rng")]
    pub(crate) rng: Pcg32,
    /// Events of the current tick, cleared when the next tick starts
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameSession {
    /// New session with the reference tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let enemy_slots = tuning.enemy_amount_max;

        let player = Ship::player(&tuning);
        let enemies = Pool::new(enemy_slots, |slot| Ship::enemy(&tuning, slot));
        let indicators = Pool::new(enemy_slots, |_| Indicator::default());
        let player_bullets = Pool::new(tuning.player_bullet_amount, |_| {
            Bullet::new(Faction::Player, tuning.player_bullet_diameter)
        });
        let enemy_bullets = Pool::new(tuning.enemy_bullet_amount, |_| {
            Bullet::new(Faction::Enemy, tuning.enemy_bullet_diameter)
        });

        log::info!(
            "New session (seed {}): {} enemy slots, {}/{} bullet slots",
            seed,
            enemy_slots,
            player_bullets.capacity(),
            enemy_bullets.capacity()
        );

        Self {
            seed,
            tuning,
            score: 0,
            phase: GamePhase::Running,
            time_ticks: 0,
            now_ms: 0.0,
            player,
            enemies,
            indicators,
            player_bullets,
            enemy_bullets,
            last_enemy_spawn_at_ms: 0.0,
            world: WorldChart::default(),
            restart_held: false,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Reseed the session RNG, e.g. after deserializing a snapshot
    ///
    /// The stream is derived from the seed and tick count, so a restored
    /// session replays the same way every time it is restored. It is not a
    /// continuation of the run the snapshot was taken from: spawn bearings
    /// after the restore differ from the uninterrupted run.
    pub fn rebuild_rng(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.time_ticks));
    }

    pub fn alive_enemy_count(&self) -> usize {
        self.enemies.alive_count()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Camera that follows the player, sized to the screen
    pub fn camera(&self) -> Viewport {
        Viewport::centered_on(
            self.player.pos,
            self.tuning.game_width,
            self.tuning.game_height,
        )
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Start a new tick's event batch, keeping the queue's allocation
    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Events recorded during the current tick (or since the last drain)
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Put the session back to its starting layout without reallocating
    pub fn reset(&mut self, now_ms: f64) {
        self.score = 0;
        self.player.reset_at(Vec2::ZERO);
        for enemy in self.enemies.iter_mut() {
            enemy.kill();
            enemy.weapon.last_fired_at_ms = now_ms;
        }
        for indicator in self.indicators.iter_mut() {
            indicator.hide();
        }
        for bullet in self.player_bullets.iter_mut() {
            bullet.kill();
        }
        for bullet in self.enemy_bullets.iter_mut() {
            bullet.kill();
        }
        self.last_enemy_spawn_at_ms = now_ms;
        self.phase = GamePhase::Running;
    }
}
