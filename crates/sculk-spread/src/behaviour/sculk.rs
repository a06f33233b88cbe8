use glam::IVec3;
use rand::{Rng, RngCore};
use sculk_core::constants::{MAX_GROWTH_RATE_RADIUS, MAX_NEARBY_GROWTHS, SHRIEKER_PLACEMENT_RATE};
use sculk_core::math::{closer_than, dist_sq};
use sculk_core::{BlockKind, BlockPos, BlockState};

use super::SculkBehaviour;
use crate::config::SpreaderConfig;
use crate::cursor::ChargeCursor;
use crate::world::{SpreadEvent, SpreadWorld};

pub static SCULK_BLOCK: SculkBlockBehaviour = SculkBlockBehaviour;

/// Policy for full sculk blocks: charge decays with distance from the
/// origin and is occasionally spent on a sensor or shrieker growth.
#[derive(Debug, Clone, Copy, Default)]
pub struct SculkBlockBehaviour;

impl SculkBehaviour for SculkBlockBehaviour {
    fn attempt_use_charge(
        &self,
        cursor: &ChargeCursor,
        world: &mut dyn SpreadWorld,
        origin: BlockPos,
        rng: &mut dyn RngCore,
        config: &SpreaderConfig,
        _spread_veins: bool,
    ) -> u32 {
        let charge = cursor.charge();
        if charge == 0 || rng.gen_range(0..config.charge_decay_rate) != 0 {
            return charge;
        }

        let pos = cursor.pos();
        let near_origin = closer_than(pos, origin, config.no_growth_radius as f64);
        if !near_origin && can_place_growth(world, pos) {
            let cost = config.growth_spawn_cost;
            if rng.gen_range(0..cost) < charge {
                let above = pos + IVec3::Y;
                let growth = random_growth_state(world, above, rng);
                world.set_block(above, growth);
                world.emit(SpreadEvent::SpreadSound { pos: above });
            }
            return charge.saturating_sub(cost);
        }

        if rng.gen_range(0..config.additional_decay_rate) != 0 {
            charge
        } else if near_origin {
            charge - 1
        } else {
            charge.saturating_sub(decay_penalty(config, pos, origin, charge))
        }
    }
}

/// Charge lost by a cursor at `pos`, growing quadratically from nothing at
/// the no-growth radius to half its charge at the maximum growth radius.
fn decay_penalty(config: &SpreaderConfig, pos: BlockPos, origin: BlockPos, charge: u32) -> u32 {
    let radius = config.no_growth_radius as f32;
    let excess = (dist_sq(pos, origin) as f32).sqrt() - radius;
    let span = (MAX_GROWTH_RATE_RADIUS - config.no_growth_radius).pow(2) as f32;
    let factor = (excess * excess / span).min(1.0);
    ((charge as f32 * factor * 0.5) as u32).max(1)
}

/// A growth may go on top of `pos` if the space above is open and the
/// neighbourhood is not already crowded with growths.
fn can_place_growth(world: &dyn SpreadWorld, pos: BlockPos) -> bool {
    let above = world.block(pos + IVec3::Y);
    if !(above.is_air() || above.is(BlockKind::Water)) {
        return false;
    }
    let mut nearby = 0;
    for dy in 0..=2 {
        for dz in -4..=4 {
            for dx in -4..=4 {
                if world.block(pos + IVec3::new(dx, dy, dz)).kind.is_growth() {
                    nearby += 1;
                    if nearby > MAX_NEARBY_GROWTHS {
                        return false;
                    }
                }
            }
        }
    }
    true
}

fn random_growth_state(world: &dyn SpreadWorld, pos: BlockPos, rng: &mut dyn RngCore) -> BlockState {
    let kind = if rng.gen_range(0..SHRIEKER_PLACEMENT_RATE) == 0 {
        BlockKind::SculkShrieker
    } else {
        BlockKind::SculkSensor
    };
    BlockState::of(kind).with_waterlogged(world.block(pos).has_water())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_world::TestWorld;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_penalty_ramps_with_distance() {
        let config = SpreaderConfig::live();
        let origin = IVec3::ZERO;
        let near = decay_penalty(&config, IVec3::new(5, 0, 0), origin, 1000);
        let mid = decay_penalty(&config, IVec3::new(14, 0, 0), origin, 1000);
        let far = decay_penalty(&config, IVec3::new(40, 0, 0), origin, 1000);
        assert!(near >= 1);
        assert!(near < mid && mid < far, "{near} {mid} {far}");
        // Saturates at half the charge.
        assert_eq!(far, 500);
    }

    #[test]
    fn test_growth_blocked_by_crowding() {
        let mut world = TestWorld::new();
        let pos = IVec3::ZERO;
        assert!(can_place_growth(&world, pos));
        for x in 0..3 {
            world.set_block(IVec3::new(x - 2, 1, 3), BlockState::of(BlockKind::SculkSensor));
        }
        assert!(!can_place_growth(&world, pos));
    }

    #[test]
    fn test_growth_needs_open_space() {
        let mut world = TestWorld::new();
        world.set_block(IVec3::Y, BlockState::of(BlockKind::Stone));
        assert!(!can_place_growth(&world, IVec3::ZERO));
    }

    #[test]
    fn test_charge_never_increases() {
        let mut world = TestWorld::new();
        let config = SpreaderConfig::live();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for x in 0..30 {
            let cursor = ChargeCursor::new(IVec3::new(x, 0, 0), 300);
            let charge =
                SCULK_BLOCK.attempt_use_charge(&cursor, &mut world, IVec3::ZERO, &mut rng, &config, true);
            assert!(charge <= 300);
        }
    }
}
