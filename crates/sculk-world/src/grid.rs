use std::collections::HashSet;

use glam::IVec3;
use sculk_core::math::world_to_chunk;
use sculk_core::types::ChunkCoord;
use sculk_core::{BlockPos, BlockState};
use sculk_spread::{BehaviourRegistry, SculkBehaviour, SpreadEvent, SpreadWorld};

use crate::chunk_map::ChunkMap;
use crate::state_machine;
use crate::terrain::FlatTerrain;

/// Chunked block grid that the spreading simulation runs against.
///
/// Events emitted during a tick are buffered until drained. Writes are
/// tracked per chunk so that chunk sleep state follows block activity.
#[derive(Debug)]
pub struct BlockGrid {
    chunk_map: ChunkMap,
    registry: BehaviourRegistry,
    events: Vec<SpreadEvent>,
    changed: HashSet<ChunkCoord>,
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self::new(BehaviourRegistry::standard())
    }
}

impl BlockGrid {
    pub fn new(registry: BehaviourRegistry) -> Self {
        Self {
            chunk_map: ChunkMap::new(),
            registry,
            events: Vec::new(),
            changed: HashSet::new(),
        }
    }

    /// Load every chunk in the inclusive chunk range `min..=max` from `terrain`.
    pub fn generate(&mut self, terrain: &FlatTerrain, min: ChunkCoord, max: ChunkCoord) {
        for cy in min.y..=max.y {
            for cz in min.z..=max.z {
                for cx in min.x..=max.x {
                    let coord = IVec3::new(cx, cy, cz);
                    self.chunk_map.insert_chunk(terrain.generate_chunk(coord));
                }
            }
        }
        log::info!(
            "generated {} chunks ({} loaded)",
            ((max - min + IVec3::ONE).max(IVec3::ZERO)).element_product(),
            self.chunk_map.loaded_count()
        );
    }

    /// Set every cell in the inclusive box `min..=max`.
    pub fn fill(&mut self, min: BlockPos, max: BlockPos, state: BlockState) {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.set_block(IVec3::new(x, y, z), state);
                }
            }
        }
    }

    pub fn chunk_map(&self) -> &ChunkMap {
        &self.chunk_map
    }

    pub fn chunk_map_mut(&mut self) -> &mut ChunkMap {
        &mut self.chunk_map
    }

    /// Events emitted since the last drain, in emission order.
    pub fn events(&self) -> &[SpreadEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SpreadEvent> {
        std::mem::take(&mut self.events)
    }

    /// Close out a tick: advance chunk lifecycles from the writes it made.
    pub fn end_tick(&mut self) {
        let changed = std::mem::take(&mut self.changed);
        state_machine::process_activity(&mut self.chunk_map, &changed);
    }

    /// Count blocks matching `predicate` across all loaded chunks.
    pub fn count_blocks(&self, min: BlockPos, max: BlockPos, predicate: impl Fn(&BlockState) -> bool) -> usize {
        let mut count = 0;
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    if predicate(&self.block(IVec3::new(x, y, z))) {
                        count += 1;
                    }
                }
            }
        }
        count
    }
}

impl SpreadWorld for BlockGrid {
    fn block(&self, pos: BlockPos) -> BlockState {
        self.chunk_map.block(pos)
    }

    fn set_block(&mut self, pos: BlockPos, state: BlockState) {
        match self.chunk_map.set_block(pos, state) {
            Some(coord) => {
                self.changed.insert(coord);
            }
            None => {
                if self.chunk_map.get(&world_to_chunk(pos)).is_none() {
                    log::trace!("ignoring write to unloaded block {pos}");
                }
            }
        }
    }

    fn is_ticking(&self, pos: BlockPos) -> bool {
        self.chunk_map
            .get(&world_to_chunk(pos))
            .is_some_and(|chunk| chunk.is_ticking())
    }

    fn behaviour(&self, state: &BlockState) -> Option<&'static dyn SculkBehaviour> {
        self.registry.get(state.kind)
    }

    fn emit(&mut self, event: SpreadEvent) {
        self.events.push(event);
    }
}
