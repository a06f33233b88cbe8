//! Sparse in-memory grid for unit tests. Unset cells are air.

use std::collections::HashMap;

use sculk_core::{BlockPos, BlockState};

use crate::behaviour::{BehaviourRegistry, SculkBehaviour};
use crate::world::{SpreadEvent, SpreadWorld};

pub struct TestWorld {
    blocks: HashMap<BlockPos, BlockState>,
    registry: BehaviourRegistry,
    /// When set, no cell is ticking.
    pub frozen: bool,
    pub events: Vec<SpreadEvent>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            registry: BehaviourRegistry::standard(),
            frozen: false,
            events: Vec::new(),
        }
    }

    /// Set every cell in the inclusive box `min..=max`.
    pub fn fill(&mut self, min: BlockPos, max: BlockPos, state: BlockState) {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.set_block(BlockPos::new(x, y, z), state);
                }
            }
        }
    }

    pub fn count(&self, predicate: impl Fn(&BlockState) -> bool) -> usize {
        self.blocks.values().filter(|state| predicate(state)).count()
    }
}

impl SpreadWorld for TestWorld {
    fn block(&self, pos: BlockPos) -> BlockState {
        self.blocks.get(&pos).copied().unwrap_or(BlockState::AIR)
    }

    fn set_block(&mut self, pos: BlockPos, state: BlockState) {
        if state.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, state);
        }
    }

    fn is_ticking(&self, _pos: BlockPos) -> bool {
        !self.frozen
    }

    fn behaviour(&self, state: &BlockState) -> Option<&'static dyn SculkBehaviour> {
        self.registry.get(state.kind)
    }

    fn emit(&mut self, event: SpreadEvent) {
        self.events.push(event);
    }
}
