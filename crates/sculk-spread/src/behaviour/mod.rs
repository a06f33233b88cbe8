//! Per-block spreading policy.
//!
//! The cursor simulation never hard-codes what a block does when charge
//! lands on it. It resolves a [`SculkBehaviour`] for the occupant of its
//! cell and calls into it; blocks without a policy get [`DefaultBehaviour`].

mod sculk;
pub mod vein;

use std::collections::HashMap;
use std::fmt;

use rand::RngCore;
use sculk_core::{BlockKind, BlockPos, BlockState, FaceSet};

use crate::config::SpreaderConfig;
use crate::cursor::ChargeCursor;
use crate::world::SpreadWorld;

pub use sculk::SculkBlockBehaviour;
pub use vein::SculkVeinBehaviour;

/// How a block type reacts to a charge cursor occupying it.
pub trait SculkBehaviour: Sync {
    /// Try to lay veins at or around `pos`. Returns true if anything was placed.
    fn attempt_spread_vein(
        &self,
        world: &mut dyn SpreadWorld,
        pos: BlockPos,
        _state: BlockState,
        _facings: Option<FaceSet>,
        _world_generation: bool,
    ) -> bool {
        vein::spread_all(world, pos) > 0
    }

    /// Whether a successful vein spread may have replaced the occupant, so
    /// that the caller must re-read it.
    fn can_change_block_state_on_spread(&self) -> bool {
        true
    }

    /// Consume charge from `cursor` and return what remains.
    fn attempt_use_charge(
        &self,
        cursor: &ChargeCursor,
        world: &mut dyn SpreadWorld,
        origin: BlockPos,
        rng: &mut dyn RngCore,
        config: &SpreaderConfig,
        spread_veins: bool,
    ) -> u32;

    /// Called when a cursor leaves `pos` or runs dry there.
    fn on_discharged(
        &self,
        _world: &mut dyn SpreadWorld,
        _state: BlockState,
        _pos: BlockPos,
        _rng: &mut dyn RngCore,
    ) {
    }

    fn update_decay_delay(&self, _current: u8) -> u8 {
        1
    }

    /// Ticks a cursor waits after acting on this block.
    fn sculk_spread_delay(&self) -> u32 {
        1
    }
}

/// Policy for blocks that implement nothing: charge survives while the
/// cursor's decay delay lasts, then drops to zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBehaviour;

pub static DEFAULT_BEHAVIOUR: DefaultBehaviour = DefaultBehaviour;

impl SculkBehaviour for DefaultBehaviour {
    fn attempt_spread_vein(
        &self,
        world: &mut dyn SpreadWorld,
        pos: BlockPos,
        state: BlockState,
        facings: Option<FaceSet>,
        _world_generation: bool,
    ) -> bool {
        match facings {
            None => vein::spread_all(world, pos) > 0,
            // A cursor remembering faces regrows the vein it came from.
            Some(faces) if !faces.is_empty() => {
                (state.is_air() || state.has_water()) && vein::regrow(world, pos, state, faces)
            }
            Some(_) => vein::spread_all(world, pos) > 0,
        }
    }

    fn attempt_use_charge(
        &self,
        cursor: &ChargeCursor,
        _world: &mut dyn SpreadWorld,
        _origin: BlockPos,
        _rng: &mut dyn RngCore,
        _config: &SpreaderConfig,
        _spread_veins: bool,
    ) -> u32 {
        if cursor.decay_delay() > 0 {
            cursor.charge()
        } else {
            0
        }
    }

    fn update_decay_delay(&self, current: u8) -> u8 {
        current.saturating_sub(1)
    }
}

/// Lookup table from block kind to spreading policy.
#[derive(Clone, Default)]
pub struct BehaviourRegistry {
    table: HashMap<BlockKind, &'static dyn SculkBehaviour>,
}

impl BehaviourRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the sculk block and sculk vein policies.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(BlockKind::Sculk, &sculk::SCULK_BLOCK);
        registry.register(BlockKind::SculkVein, &vein::SCULK_VEIN);
        registry
    }

    /// Install `behaviour` for `kind`, replacing any previous entry.
    pub fn register(&mut self, kind: BlockKind, behaviour: &'static dyn SculkBehaviour) {
        self.table.insert(kind, behaviour);
    }

    pub fn get(&self, kind: BlockKind) -> Option<&'static dyn SculkBehaviour> {
        self.table.get(&kind).copied()
    }
}

impl fmt::Debug for BehaviourRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.table.keys()).finish()
    }
}

/// Whether the occupant `state` carries a policy of its own.
pub fn implements_behaviour(world: &dyn SpreadWorld, state: &BlockState) -> bool {
    world.behaviour(state).is_some()
}

/// The policy for `state`, falling back to [`DefaultBehaviour`].
pub fn resolve_behaviour(world: &dyn SpreadWorld, state: &BlockState) -> &'static dyn SculkBehaviour {
    world.behaviour(state).unwrap_or(&DEFAULT_BEHAVIOUR)
}
