//! Sculk patches grown in place while a world is generated.

use glam::IVec3;
use rand::{Rng, RngCore};
use sculk_core::direction::ALL_DIRECTIONS;
use sculk_core::{BlockKind, BlockPos, BlockState, Direction};
use serde::{Deserialize, Serialize};

use crate::behaviour::implements_behaviour;
use crate::config::{from_ron_str, ConfigError};
use crate::spreader::Spreader;
use crate::world::SpreadWorld;

/// Shape of one generated patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SculkPatchConfig {
    /// Cursors seeded at the origin each round.
    pub charge_count: u32,
    pub amount_per_charge: u32,
    /// Spreader ticks per round.
    pub spread_attempts: u32,
    /// Rounds run without vein spreading, after the spread rounds.
    pub growth_rounds: u32,
    /// Rounds run with vein spreading.
    pub spread_rounds: u32,
    /// Shriekers scattered around the origin once the rounds finish.
    pub extra_rare_growths: u32,
}

impl Default for SculkPatchConfig {
    fn default() -> Self {
        Self {
            charge_count: 10,
            amount_per_charge: 32,
            spread_attempts: 64,
            growth_rounds: 0,
            spread_rounds: 1,
            extra_rare_growths: 0,
        }
    }
}

/// Parse a patch config from RON. Missing fields take the defaults.
pub fn load_patch_config_from_str(ron_str: &str) -> Result<SculkPatchConfig, ConfigError> {
    from_ron_str(ron_str)
}

/// A patch can start in a cell that already spreads, or in an open cell
/// touching a full block.
pub fn can_spread_from(world: &dyn SpreadWorld, pos: BlockPos) -> bool {
    let state = world.block(pos);
    if implements_behaviour(world, &state) {
        return true;
    }
    if !(state.is_air() || state.is(BlockKind::Water)) {
        return false;
    }
    ALL_DIRECTIONS
        .iter()
        .any(|dir| is_full_block(world, pos + dir.offset()))
}

fn is_full_block(world: &dyn SpreadWorld, pos: BlockPos) -> bool {
    ALL_DIRECTIONS
        .iter()
        .all(|dir| world.is_face_sturdy(pos, *dir))
}

/// Grow a patch around `origin` with a world-generation spreader. Returns
/// false if the origin cannot host a patch.
pub fn place_patch(
    world: &mut dyn SpreadWorld,
    origin: BlockPos,
    rng: &mut dyn RngCore,
    config: &SculkPatchConfig,
) -> bool {
    if !can_spread_from(world, origin) {
        return false;
    }

    let mut spreader = Spreader::world_gen();
    let rounds = config.spread_rounds + config.growth_rounds;
    for round in 0..rounds {
        for _ in 0..config.charge_count {
            spreader.add_cursors(origin, config.amount_per_charge);
        }
        let spread_veins = round < config.spread_rounds;
        for _ in 0..config.spread_attempts {
            spreader.update_cursors(world, origin, rng, spread_veins);
        }
        spreader.clear();
    }

    for _ in 0..config.extra_rare_growths {
        let pos = origin + IVec3::new(rng.gen_range(-2..=2), 0, rng.gen_range(-2..=2));
        let state = world.block(pos);
        if (state.is_air() || state.is(BlockKind::Water))
            && world.is_face_sturdy(pos + IVec3::NEG_Y, Direction::Up)
        {
            let shrieker = BlockState::of(BlockKind::SculkShrieker).with_waterlogged(state.has_water());
            world.set_block(pos, shrieker);
        }
    }

    log::debug!("placed sculk patch at {origin} over {rounds} rounds");
    true
}
