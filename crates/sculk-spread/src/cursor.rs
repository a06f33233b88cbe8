use rand::seq::SliceRandom;
use rand::RngCore;
use sculk_core::constants::{
    MAX_CHARGE, MAX_CURSOR_DECAY_DELAY, MAX_CURSOR_DISTANCE, WORLD_GEN_HORIZONTAL_RADIUS,
};
use sculk_core::direction::{neighbour_kind, NeighbourKind, NON_CORNER_OFFSETS};
use sculk_core::math::{chebyshev, horizontal_dist_sq};
use sculk_core::{BlockPos, Direction, FaceSet};
use serde::{Deserialize, Serialize};

use crate::behaviour::{implements_behaviour, resolve_behaviour, vein};
use crate::config::SpreaderConfig;
use crate::world::{SpreadEvent, SpreadWorld};

/// One propagating front of charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CursorRecord")]
pub struct ChargeCursor {
    pos: BlockPos,
    charge: u32,
    decay_delay: u8,
    update_delay: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    facings: Option<FaceSet>,
}

/// Serialized form. Missing optional fields take the construction defaults.
#[derive(Deserialize)]
struct CursorRecord {
    pos: BlockPos,
    charge: u32,
    #[serde(default = "default_decay_delay")]
    decay_delay: u8,
    #[serde(default)]
    update_delay: u32,
    #[serde(default)]
    facings: Option<FaceSet>,
}

fn default_decay_delay() -> u8 {
    MAX_CURSOR_DECAY_DELAY
}

impl From<CursorRecord> for ChargeCursor {
    fn from(record: CursorRecord) -> Self {
        ChargeCursor::with_state(
            record.pos,
            record.charge,
            record.decay_delay,
            record.update_delay,
            record.facings,
        )
    }
}

impl ChargeCursor {
    /// A fresh cursor. Charge is clamped to `MAX_CHARGE`.
    pub fn new(pos: BlockPos, charge: u32) -> Self {
        Self::with_state(pos, charge, MAX_CURSOR_DECAY_DELAY, 0, None)
    }

    /// Rebuild a cursor from stored state, clamping out-of-range values.
    pub fn with_state(
        pos: BlockPos,
        charge: u32,
        decay_delay: u8,
        update_delay: u32,
        facings: Option<FaceSet>,
    ) -> Self {
        Self {
            pos,
            charge: charge.min(MAX_CHARGE),
            decay_delay: decay_delay.min(MAX_CURSOR_DECAY_DELAY),
            update_delay,
            facings,
        }
    }

    pub fn pos(&self) -> BlockPos {
        self.pos
    }

    pub fn charge(&self) -> u32 {
        self.charge
    }

    pub fn decay_delay(&self) -> u8 {
        self.decay_delay
    }

    pub fn update_delay(&self) -> u32 {
        self.update_delay
    }

    /// Faces of the occupied cell that already carry a vein, if the cell
    /// implements a spreading policy.
    pub fn facings(&self) -> Option<FaceSet> {
        self.facings
    }

    /// Whether the cursor has drifted too far from `origin` to keep.
    pub fn is_pos_unreasonable(&self, origin: BlockPos) -> bool {
        chebyshev(self.pos, origin) > MAX_CURSOR_DISTANCE
    }

    fn should_update(&self, world: &dyn SpreadWorld, world_generation: bool) -> bool {
        if self.charge == 0 {
            false
        } else if world_generation {
            true
        } else {
            world.is_ticking(self.pos)
        }
    }

    /// Advance this cursor by one tick.
    pub fn update(
        &mut self,
        world: &mut dyn SpreadWorld,
        origin: BlockPos,
        rng: &mut dyn RngCore,
        config: &SpreaderConfig,
        spread_veins: bool,
    ) {
        if !self.should_update(world, config.world_generation) {
            return;
        }
        if self.update_delay > 0 {
            self.update_delay -= 1;
            return;
        }

        let mut state = world.block(self.pos);
        let mut behaviour = resolve_behaviour(world, &state);

        if spread_veins
            && behaviour.attempt_spread_vein(
                world,
                self.pos,
                state,
                self.facings,
                config.world_generation,
            )
        {
            if behaviour.can_change_block_state_on_spread() {
                state = world.block(self.pos);
                behaviour = resolve_behaviour(world, &state);
            }
            world.emit(SpreadEvent::SpreadSound { pos: self.pos });
        }

        let charge = behaviour.attempt_use_charge(self, world, origin, rng, config, spread_veins);
        self.charge = charge.min(MAX_CHARGE);
        if self.charge == 0 {
            behaviour.on_discharged(world, state, self.pos, rng);
            return;
        }

        if let Some(next) = valid_movement_pos(world, self.pos, rng) {
            behaviour.on_discharged(world, state, self.pos, rng);
            self.pos = next;
            if config.world_generation
                && horizontal_dist_sq(self.pos, origin)
                    >= (WORLD_GEN_HORIZONTAL_RADIUS as i64).pow(2)
            {
                self.charge = 0;
                return;
            }
            state = world.block(next);
        }

        self.facings = if implements_behaviour(world, &state) {
            Some(state.faces)
        } else {
            None
        };
        self.decay_delay = behaviour
            .update_decay_delay(self.decay_delay)
            .min(MAX_CURSOR_DECAY_DELAY);
        self.update_delay = behaviour.sculk_spread_delay();
    }

    /// Absorb `other`'s charge; it is left empty. Keeps the shorter delay.
    pub fn merge_with(&mut self, other: &mut ChargeCursor) {
        self.charge = (self.charge + other.charge).min(MAX_CHARGE);
        other.charge = 0;
        self.update_delay = self.update_delay.min(other.update_delay);
    }
}

/// Pick a neighbour of `from` to move into: a cell implementing a spreading
/// policy that can be reached without passing through a solid face. Among
/// those, the first with substrate access wins; otherwise the first found.
fn valid_movement_pos(
    world: &dyn SpreadWorld,
    from: BlockPos,
    rng: &mut dyn RngCore,
) -> Option<BlockPos> {
    let mut offsets = NON_CORNER_OFFSETS;
    offsets.shuffle(rng);

    let mut fallback = None;
    for offset in offsets {
        let candidate = from + offset;
        let state = world.block(candidate);
        if !implements_behaviour(world, &state) || !is_movement_unobstructed(world, from, candidate)
        {
            continue;
        }
        if vein::has_substrate_access(world, &state, candidate) {
            return Some(candidate);
        }
        fallback.get_or_insert(candidate);
    }
    fallback
}

/// Face moves are always clear. An edge move is clear if either of its two
/// axis-aligned detours is.
fn is_movement_unobstructed(world: &dyn SpreadWorld, from: BlockPos, to: BlockPos) -> bool {
    let delta = to - from;
    if neighbour_kind(delta) == Some(NeighbourKind::Face) {
        return true;
    }
    let x = Direction::along_x(delta.x);
    let y = Direction::along_y(delta.y);
    let z = Direction::along_z(delta.z);
    let (first, second) = if delta.x == 0 {
        (y, z)
    } else if delta.y == 0 {
        (x, z)
    } else {
        (x, y)
    };
    is_unobstructed(world, from, first) || is_unobstructed(world, from, second)
}

fn is_unobstructed(world: &dyn SpreadWorld, pos: BlockPos, dir: Direction) -> bool {
    !world.is_face_sturdy(pos + dir.offset(), dir.opposite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_world::TestWorld;
    use glam::IVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sculk_core::{BlockKind, BlockState};

    fn sculk() -> BlockState {
        BlockState::of(BlockKind::Sculk)
    }

    #[test]
    fn test_new_clamps_charge() {
        let cursor = ChargeCursor::new(IVec3::ZERO, 5000);
        assert_eq!(cursor.charge(), 1000);
        assert_eq!(cursor.decay_delay(), 1);
        assert_eq!(cursor.update_delay(), 0);
        assert_eq!(cursor.facings(), None);
    }

    #[test]
    fn test_with_state_clamps_decay_delay() {
        let cursor = ChargeCursor::with_state(IVec3::ZERO, 10, 9, 4, Some(FaceSet::ALL));
        assert_eq!(cursor.decay_delay(), 1);
        assert_eq!(cursor.update_delay(), 4);
    }

    #[test]
    fn test_unreasonable_distance() {
        let origin = IVec3::new(0, 64, 0);
        assert!(!ChargeCursor::new(IVec3::new(1024, 64, 0), 1).is_pos_unreasonable(origin));
        assert!(ChargeCursor::new(IVec3::new(0, 64, -1025), 1).is_pos_unreasonable(origin));
    }

    #[test]
    fn test_update_delay_throttles() {
        let mut world = TestWorld::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut cursor = ChargeCursor::with_state(IVec3::ZERO, 50, 1, 2, None);
        cursor.update(&mut world, IVec3::ZERO, &mut rng, &SpreaderConfig::live(), true);
        assert_eq!(cursor.update_delay(), 1);
        assert_eq!(cursor.charge(), 50);
        assert!(world.events.is_empty());
        assert!(world.block(IVec3::ZERO).is_air());
    }

    #[test]
    fn test_frozen_outside_ticking_region() {
        let mut world = TestWorld::new();
        world.frozen = true;
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut cursor = ChargeCursor::with_state(IVec3::ZERO, 50, 0, 3, None);
        cursor.update(&mut world, IVec3::ZERO, &mut rng, &SpreaderConfig::live(), true);
        assert_eq!(cursor.update_delay(), 3);

        // World generation ignores the gate.
        cursor.update(&mut world, IVec3::ZERO, &mut rng, &SpreaderConfig::world_gen(), true);
        assert_eq!(cursor.update_delay(), 2);
    }

    #[test]
    fn test_vein_spread_rereads_occupant() {
        let mut world = TestWorld::new();
        let below = IVec3::NEG_Y;
        world.set_block(below, BlockState::of(BlockKind::Stone));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut cursor = ChargeCursor::new(IVec3::ZERO, 50);
        cursor.update(&mut world, IVec3::ZERO, &mut rng, &SpreaderConfig::live(), true);

        // The air cell became a vein, which then spent one charge on the floor.
        assert_eq!(world.events[0], SpreadEvent::SpreadSound { pos: IVec3::ZERO });
        assert!(world.events.contains(&SpreadEvent::SpreadSound { pos: below }));
        assert!(world.block(below).is(BlockKind::Sculk));
        assert_eq!(cursor.charge(), 49);
    }

    #[test]
    fn test_stays_put_without_candidates() {
        let mut world = TestWorld::new();
        world.fill(IVec3::splat(-1), IVec3::splat(1), BlockState::of(BlockKind::Stone));
        world.set_block(IVec3::ZERO, sculk());
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut cursor = ChargeCursor::new(IVec3::ZERO, 400);
        let config = SpreaderConfig::live();
        for _ in 0..20 {
            let before = cursor.charge();
            cursor.update(&mut world, IVec3::ZERO, &mut rng, &config, false);
            assert_eq!(cursor.pos(), IVec3::ZERO);
            assert!(cursor.charge() <= before);
        }
        assert_eq!(cursor.facings(), Some(FaceSet::EMPTY));
    }

    #[test]
    fn test_moves_to_sculk_neighbour() {
        let mut world = TestWorld::new();
        world.set_block(IVec3::ZERO, sculk());
        world.set_block(IVec3::X, sculk());
        // Never decays, so the move is the only effect.
        let config = SpreaderConfig {
            charge_decay_rate: 1_000_000,
            ..SpreaderConfig::live()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut cursor = ChargeCursor::new(IVec3::ZERO, 200);
        cursor.update(&mut world, IVec3::ZERO, &mut rng, &config, false);
        assert_eq!(cursor.pos(), IVec3::X);
        assert_eq!(cursor.update_delay(), 1);
        assert_eq!(cursor.facings(), Some(FaceSet::EMPTY));
    }

    #[test]
    fn test_prefers_substrate_access() {
        let mut world = TestWorld::new();
        world.set_block(IVec3::ZERO, sculk());
        world.set_block(IVec3::NEG_X, sculk());
        world.set_block(IVec3::NEG_Z, sculk());
        world.set_block(IVec3::new(0, -1, 1), BlockState::of(BlockKind::Stone));
        world.set_block(IVec3::Z, BlockState::vein(FaceSet::single(Direction::Down), false));
        let config = SpreaderConfig {
            charge_decay_rate: 1_000_000,
            ..SpreaderConfig::live()
        };
        for seed in 0..8 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut cursor = ChargeCursor::new(IVec3::ZERO, 200);
            cursor.update(&mut world, IVec3::ZERO, &mut rng, &config, false);
            assert_eq!(cursor.pos(), IVec3::Z, "seed {seed}");
        }
    }

    #[test]
    fn test_edge_move_blocked_by_both_detours() {
        let mut world = TestWorld::new();
        world.set_block(IVec3::ZERO, sculk());
        world.set_block(IVec3::new(1, 1, 0), sculk());
        world.set_block(IVec3::X, BlockState::of(BlockKind::Stone));
        assert!(is_movement_unobstructed(&world, IVec3::ZERO, IVec3::new(1, 1, 0)));
        world.set_block(IVec3::Y, BlockState::of(BlockKind::Stone));
        assert!(!is_movement_unobstructed(&world, IVec3::ZERO, IVec3::new(1, 1, 0)));
        // Face moves never check detours.
        assert!(is_movement_unobstructed(&world, IVec3::ZERO, IVec3::X));
    }

    #[test]
    fn test_world_gen_leash_kills_cursor() {
        let mut world = TestWorld::new();
        let origin = IVec3::ZERO;
        let at = IVec3::new(14, 0, 0);
        world.set_block(at, sculk());
        world.set_block(IVec3::new(15, 0, 0), sculk());
        let config = SpreaderConfig {
            charge_decay_rate: 1_000_000,
            ..SpreaderConfig::world_gen()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut cursor = ChargeCursor::new(at, 500);
        cursor.update(&mut world, origin, &mut rng, &config, false);
        assert_eq!(cursor.pos(), IVec3::new(15, 0, 0));
        assert_eq!(cursor.charge(), 0);
    }

    #[test]
    fn test_default_discharges_after_delay() {
        let mut world = TestWorld::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = SpreaderConfig::live();
        let mut cursor = ChargeCursor::new(IVec3::ZERO, 100);
        cursor.update(&mut world, IVec3::ZERO, &mut rng, &config, false);
        assert_eq!(cursor.charge(), 100);
        assert_eq!(cursor.decay_delay(), 0);
        assert_eq!(cursor.facings(), None);
        // One tick of update delay, then the charge is gone.
        cursor.update(&mut world, IVec3::ZERO, &mut rng, &config, false);
        cursor.update(&mut world, IVec3::ZERO, &mut rng, &config, false);
        assert_eq!(cursor.charge(), 0);
    }

    #[test]
    fn test_merge_keeps_shorter_delay() {
        let mut a = ChargeCursor::with_state(IVec3::ZERO, 300, 1, 5, None);
        let mut b = ChargeCursor::with_state(IVec3::ZERO, 200, 1, 2, None);
        a.merge_with(&mut b);
        assert_eq!(a.charge(), 500);
        assert_eq!(a.update_delay(), 2);
        assert_eq!(b.charge(), 0);
    }

    #[test]
    fn test_record_defaults() {
        let cursor: ChargeCursor =
            crate::config::from_ron_str("(pos: (1, 2, 3), charge: 1500)").expect("should parse");
        assert_eq!(cursor.pos(), IVec3::new(1, 2, 3));
        assert_eq!(cursor.charge(), 1000);
        assert_eq!(cursor.decay_delay(), 1);
        assert_eq!(cursor.update_delay(), 0);
        assert_eq!(cursor.facings(), None);
    }
}
