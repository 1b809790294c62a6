//! Infinite background world
//!
//! The world is divided into fixed-size blocks. As the player roams, the
//! blocks around them are charted once and given a decoration (stars and
//! planets) that the presentation layer can draw. Decorations are derived
//! from the session seed and the block coordinate only, so the same block
//! always looks the same regardless of the order it was discovered in.

use std::collections::HashSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameSession};

/// Grid coordinate of a world block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockCoord {
    pub x: i32,
    pub y: i32,
}

impl BlockCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Block that contains `pos`
    pub fn containing(pos: Vec2, block_size: Vec2) -> Self {
        Self {
            x: (pos.x / block_size.x).floor() as i32,
            y: (pos.y / block_size.y).floor() as i32,
        }
    }

    /// World position of the block's top-left corner
    pub fn origin(&self, block_size: Vec2) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32) * block_size
    }
}

/// A single painted circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub pos: Vec2,
    pub diameter: f32,
    pub color: u32,
}

/// Everything painted into one block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDecoration {
    pub stars: Vec<Decoration>,
    pub planets: Vec<Decoration>,
}

const STAR_COLOR: u32 = 0xffffff;

/// Deterministic decoration for `block`
pub fn decorate(seed: u64, block: BlockCoord, block_size: Vec2) -> BlockDecoration {
    let block_seed = seed
        .wrapping_add((block.x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add((block.y as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F));
    let mut rng = Pcg32::seed_from_u64(block_seed);
    let origin = block.origin(block_size);

    let place = |rng: &mut Pcg32| {
        origin
            + Vec2::new(
                rng.random_range(0.0..=block_size.x),
                rng.random_range(0.0..=block_size.y),
            )
    };

    let star_count = rng.random_range(5..=20u32);
    let stars = (0..star_count)
        .map(|_| {
            let pos = place(&mut rng);
            Decoration {
                pos,
                diameter: rng.random_range(2..=9u32) as f32,
                color: STAR_COLOR,
            }
        })
        .collect();

    let planet_count = rng.random_range(1..=4u32);
    let planets = (0..planet_count)
        .map(|_| {
            let pos = place(&mut rng);
            let diameter = rng.random_range(80..=320u32) as f32;
            let r: u32 = rng.random_range(100..=255);
            let g: u32 = rng.random_range(100..=255);
            let b: u32 = rng.random_range(100..=255);
            Decoration {
                pos,
                diameter,
                color: (r << 16) | (g << 8) | b,
            }
        })
        .collect();

    BlockDecoration { stars, planets }
}

/// Set of blocks that have already been decorated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldChart {
    charted: HashSet<BlockCoord>,
}

impl WorldChart {
    pub fn is_charted(&self, block: BlockCoord) -> bool {
        self.charted.contains(&block)
    }

    pub fn len(&self) -> usize {
        self.charted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charted.is_empty()
    }

    /// Mark the uncharted blocks of the 3×3 neighbourhood around `pos`
    ///
    /// Returns only the blocks that were new, column by column.
    pub fn chart_around(&mut self, pos: Vec2, block_size: Vec2) -> Vec<BlockCoord> {
        let center = BlockCoord::containing(pos, block_size);
        let mut fresh = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                let block = BlockCoord::new(center.x + dx, center.y + dy);
                if self.charted.insert(block) {
                    fresh.push(block);
                }
            }
        }
        fresh
    }
}

/// Chart the blocks around the player and announce their decorations
pub fn chart_world(session: &mut GameSession) {
    let block_size = Vec2::new(
        session.tuning.world_block_width,
        session.tuning.world_block_height,
    );
    let fresh = session.world.chart_around(session.player.pos, block_size);
    for block in fresh {
        log::debug!("Charted world block ({}, {})", block.x, block.y);
        let decoration = decorate(session.seed, block, block_size);
        session.push_event(GameEvent::WorldBlockCharted { block, decoration });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(1000.0, 1000.0);

    #[test]
    fn test_containing_floors_negative_coordinates() {
        assert_eq!(BlockCoord::containing(Vec2::new(0.0, 0.0), SIZE), BlockCoord::new(0, 0));
        assert_eq!(BlockCoord::containing(Vec2::new(-1.0, 999.0), SIZE), BlockCoord::new(-1, 0));
        assert_eq!(BlockCoord::containing(Vec2::new(2500.0, -1500.0), SIZE), BlockCoord::new(2, -2));
    }

    #[test]
    fn test_chart_around_only_reports_new_blocks() {
        let mut chart = WorldChart::default();
        assert_eq!(chart.chart_around(Vec2::new(10.0, 10.0), SIZE).len(), 9);
        assert!(chart.chart_around(Vec2::new(500.0, 500.0), SIZE).is_empty());

        // One block to the right reveals a new column of three
        let fresh = chart.chart_around(Vec2::new(1500.0, 10.0), SIZE);
        assert_eq!(
            fresh,
            vec![BlockCoord::new(2, -1), BlockCoord::new(2, 0), BlockCoord::new(2, 1)]
        );
        assert_eq!(chart.len(), 12);
    }

    #[test]
    fn test_decoration_is_deterministic_and_bounded() {
        let block = BlockCoord::new(-3, 4);
        let a = decorate(77, block, SIZE);
        let b = decorate(77, block, SIZE);
        assert_eq!(a, b);

        assert!((5..=20).contains(&a.stars.len()));
        assert!((1..=4).contains(&a.planets.len()));

        let origin = block.origin(SIZE);
        for d in a.stars.iter().chain(a.planets.iter()) {
            assert!(d.pos.x >= origin.x && d.pos.x <= origin.x + SIZE.x);
            assert!(d.pos.y >= origin.y && d.pos.y <= origin.y + SIZE.y);
        }
        for star in &a.stars {
            assert!((2.0..=9.0).contains(&star.diameter));
            assert_eq!(star.color, STAR_COLOR);
        }
        for planet in &a.planets {
            assert!((80.0..=320.0).contains(&planet.diameter));
            for shift in [16, 8, 0] {
                let channel = (planet.color >> shift) & 0xff;
                assert!(channel >= 100);
            }
        }
    }

    #[test]
    fn test_chart_world_emits_events() {
        let mut session = GameSession::new(5);
        chart_world(&mut session);
        let charted = session
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::WorldBlockCharted { .. }))
            .count();
        assert_eq!(charted, 9);
        assert_eq!(session.world.len(), 9);

        session.drain_events();
        chart_world(&mut session);
        assert!(session.events().is_empty());
    }
}
