//! Veins: thin sculk layers covering one or more faces of a cell.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use sculk_core::direction::ALL_DIRECTIONS;
use sculk_core::{BlockKind, BlockPos, BlockState, Direction, FaceSet, SubstrateTag};

use super::SculkBehaviour;
use crate::config::SpreaderConfig;
use crate::cursor::ChargeCursor;
use crate::world::{SpreadEvent, SpreadWorld};

pub static SCULK_VEIN: SculkVeinBehaviour = SculkVeinBehaviour;

/// Policy for vein blocks: converts the substrate a vein rests on into sculk.
#[derive(Debug, Clone, Copy, Default)]
pub struct SculkVeinBehaviour;

impl SculkVeinBehaviour {
    /// Convert one substrate block behind a face of the vein at `pos` into
    /// sculk. Faces are tried in random order.
    fn attempt_place_sculk(
        &self,
        config: &SpreaderConfig,
        world: &mut dyn SpreadWorld,
        pos: BlockPos,
        rng: &mut dyn RngCore,
    ) -> bool {
        let state = world.block(pos);
        let mut directions = ALL_DIRECTIONS;
        directions.shuffle(rng);

        for dir in directions {
            if !state.faces.contains(dir) {
                continue;
            }
            let behind = pos + dir.offset();
            if !config.substrate.contains(world.block(behind).kind) {
                continue;
            }

            world.set_block(behind, BlockState::of(BlockKind::Sculk));
            world.emit(SpreadEvent::SpreadSound { pos: behind });
            spread_all(world, behind);

            // Veins resting on the new sculk from other sides lose those faces.
            let back = dir.opposite();
            for side in ALL_DIRECTIONS {
                if side == back {
                    continue;
                }
                let neighbour = behind + side.offset();
                let neighbour_state = world.block(neighbour);
                if neighbour_state.is(BlockKind::SculkVein) {
                    self.on_discharged(world, neighbour_state, neighbour, rng);
                }
            }
            return true;
        }
        false
    }
}

impl SculkBehaviour for SculkVeinBehaviour {
    fn attempt_use_charge(
        &self,
        cursor: &ChargeCursor,
        world: &mut dyn SpreadWorld,
        _origin: BlockPos,
        rng: &mut dyn RngCore,
        config: &SpreaderConfig,
        spread_veins: bool,
    ) -> u32 {
        let charge = cursor.charge();
        if spread_veins && self.attempt_place_sculk(config, world, cursor.pos(), rng) {
            charge.saturating_sub(1)
        } else if rng.gen_range(0..config.charge_decay_rate) == 0 {
            charge / 2
        } else {
            charge
        }
    }

    fn on_discharged(
        &self,
        world: &mut dyn SpreadWorld,
        state: BlockState,
        pos: BlockPos,
        _rng: &mut dyn RngCore,
    ) {
        if !state.is(BlockKind::SculkVein) {
            return;
        }
        let mut faces = state.faces;
        for dir in state.faces.iter() {
            if world.block(pos + dir.offset()).is(BlockKind::Sculk) {
                faces = faces.without(dir);
            }
        }
        let next = if faces.is_empty() {
            state.emptied()
        } else {
            BlockState { faces, ..state }
        };
        world.set_block(pos, next);
    }
}

/// Whether a vein may occupy a cell currently holding `state`.
fn can_hold_vein(state: &BlockState) -> bool {
    state.is_air() || state.is(BlockKind::Water) || state.is(BlockKind::SculkVein)
}

/// Whether the block next to `pos` across `face` can carry a vein on its
/// surface facing `pos`.
fn can_attach(world: &dyn SpreadWorld, pos: BlockPos, face: Direction) -> bool {
    world.is_face_sturdy(pos + face.offset(), face.opposite())
}

/// Add `faces` to whatever vein occupies `pos`, creating one if needed.
/// Returns how many faces were new.
fn add_vein_faces(world: &mut dyn SpreadWorld, pos: BlockPos, faces: FaceSet) -> u32 {
    let state = world.block(pos);
    if !can_hold_vein(&state) {
        return 0;
    }
    let existing = if state.is(BlockKind::SculkVein) {
        state.faces
    } else {
        FaceSet::EMPTY
    };
    let merged = faces.iter().fold(existing, FaceSet::with);
    let added = (merged.len() - existing.len()) as u32;
    if added > 0 {
        world.set_block(pos, BlockState::vein(merged, state.has_water()));
    }
    added
}

/// Spread veins from `pos`. An open cell is lined on every face that has a
/// sturdy surface behind it; a solid cell coats the open cells around it.
/// Returns the number of faces placed.
pub fn spread_all(world: &mut dyn SpreadWorld, pos: BlockPos) -> u32 {
    let state = world.block(pos);
    if can_hold_vein(&state) {
        let faces: FaceSet = ALL_DIRECTIONS
            .into_iter()
            .filter(|dir| can_attach(world, pos, *dir))
            .collect();
        return add_vein_faces(world, pos, faces);
    }

    let mut placed = 0;
    for dir in ALL_DIRECTIONS {
        if state.is_face_sturdy(dir) {
            placed += add_vein_faces(world, pos + dir.offset(), FaceSet::single(dir.opposite()));
        }
    }
    placed
}

/// Restore a vein covering `faces` at `pos`, keeping only faces that still
/// have something to attach to.
pub fn regrow(world: &mut dyn SpreadWorld, pos: BlockPos, state: BlockState, faces: FaceSet) -> bool {
    let supported: FaceSet = faces.iter().filter(|dir| can_attach(world, pos, *dir)).collect();
    if supported.is_empty() {
        return false;
    }
    world.set_block(pos, BlockState::vein(supported, state.has_water()));
    true
}

/// Whether the vein `state` at `pos` rests on at least one block a live
/// spreader could convert.
pub fn has_substrate_access(world: &dyn SpreadWorld, state: &BlockState, pos: BlockPos) -> bool {
    state.is(BlockKind::SculkVein)
        && state
            .faces
            .iter()
            .any(|dir| SubstrateTag::Live.contains(world.block(pos + dir.offset()).kind))
}
