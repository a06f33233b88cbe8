use crate::chunk::{Chunk, ChunkState};
use glam::IVec3;
use sculk_core::math::{world_to_chunk, world_to_local};
use sculk_core::types::ChunkCoord;
use sculk_core::{BlockPos, BlockState};
use std::collections::HashMap;

/// Spatial container for all resident chunks.
#[derive(Debug, Default)]
pub struct ChunkMap {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an empty chunk at `coord`, or wake it if already resident.
    pub fn load_chunk(&mut self, coord: ChunkCoord) -> &mut Chunk {
        let chunk = self
            .chunks
            .entry(coord)
            .or_insert_with(|| Chunk::new_active(coord));
        chunk.activate();
        chunk
    }

    /// Insert prepared chunk data, replacing whatever was resident.
    pub fn insert_chunk(&mut self, mut chunk: Chunk) {
        chunk.activate();
        self.chunks.insert(chunk.coord, chunk);
    }

    /// Remove a chunk, handing back its data.
    pub fn unload_chunk(&mut self, coord: &ChunkCoord) -> Option<Chunk> {
        self.chunks.remove(coord).map(|mut chunk| {
            chunk.state = ChunkState::Unloaded;
            chunk
        })
    }

    pub fn get(&self, coord: &ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(coord)
    }

    pub fn get_mut(&mut self, coord: &ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(coord)
    }

    /// State of the chunk containing `coord`; absent chunks are unloaded.
    pub fn state(&self, coord: &ChunkCoord) -> ChunkState {
        self.chunks
            .get(coord)
            .map_or(ChunkState::Unloaded, |chunk| chunk.state)
    }

    pub fn block(&self, pos: BlockPos) -> BlockState {
        self.chunks
            .get(&world_to_chunk(pos))
            .map_or(BlockState::AIR, |chunk| chunk.block(world_to_local(pos)))
    }

    /// Write a block. Returns the coordinate of the chunk that changed, or
    /// None if nothing changed or the chunk is not resident.
    pub fn set_block(&mut self, pos: BlockPos, state: BlockState) -> Option<ChunkCoord> {
        let coord = world_to_chunk(pos);
        let chunk = self.chunks.get_mut(&coord)?;
        chunk.set_block(world_to_local(pos), state).then_some(coord)
    }

    /// The 6 face-adjacent neighbour coordinates of a chunk.
    pub fn face_neighbors(coord: &ChunkCoord) -> [ChunkCoord; 6] {
        [
            *coord + IVec3::new(-1, 0, 0),
            *coord + IVec3::new(1, 0, 0),
            *coord + IVec3::new(0, -1, 0),
            *coord + IVec3::new(0, 1, 0),
            *coord + IVec3::new(0, 0, -1),
            *coord + IVec3::new(0, 0, 1),
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &Chunk)> {
        self.chunks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ChunkCoord, &mut Chunk)> {
        self.chunks.iter_mut()
    }

    pub fn loaded_count(&self) -> u32 {
        self.chunks.len() as u32
    }

    /// Get counts: (total_loaded, active, static_count)
    pub fn chunk_counts(&self) -> (u32, u32, u32) {
        let mut active = 0u32;
        let mut static_count = 0u32;
        for chunk in self.chunks.values() {
            match chunk.state {
                ChunkState::Active => active += 1,
                ChunkState::Static => static_count += 1,
                ChunkState::Unloaded => {}
            }
        }
        (self.chunks.len() as u32, active, static_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sculk_core::BlockKind;

    #[test]
    fn test_block_access_across_chunks() {
        let mut map = ChunkMap::new();
        map.load_chunk(IVec3::new(-1, 0, 0));
        let pos = IVec3::new(-1, 5, 2);
        let stone = BlockState::of(BlockKind::Stone);
        assert_eq!(map.set_block(pos, stone), Some(IVec3::new(-1, 0, 0)));
        assert_eq!(map.block(pos), stone);
        // Same value again is not a change.
        assert_eq!(map.set_block(pos, stone), None);
        // Missing chunk: reads air, ignores writes.
        assert!(map.block(IVec3::new(20, 0, 0)).is_air());
        assert_eq!(map.set_block(IVec3::new(20, 0, 0), stone), None);
    }

    #[test]
    fn test_load_chunk_idempotent() {
        let mut map = ChunkMap::new();
        let coord = IVec3::new(2, 1, 3);
        map.load_chunk(coord)
            .set_block(IVec3::ZERO, BlockState::of(BlockKind::Sculk));
        map.load_chunk(coord);
        assert_eq!(map.loaded_count(), 1);
        assert!(map.get(&coord).expect("loaded").has_non_air());
    }

    #[test]
    fn test_unload_hands_back_data() {
        let mut map = ChunkMap::new();
        let coord = IVec3::new(0, 0, 0);
        map.load_chunk(coord);
        let chunk = map.unload_chunk(&coord).expect("was loaded");
        assert_eq!(chunk.state, ChunkState::Unloaded);
        assert_eq!(map.state(&coord), ChunkState::Unloaded);
        map.insert_chunk(chunk);
        assert_eq!(map.state(&coord), ChunkState::Active);
    }

    #[test]
    fn test_chunk_counts_reflect_state() {
        let mut map = ChunkMap::new();
        let c0 = IVec3::new(0, 0, 0);
        let c1 = IVec3::new(1, 0, 0);
        map.load_chunk(c0);
        map.load_chunk(c1);
        assert_eq!(map.chunk_counts(), (2, 2, 0));

        if let Some(chunk) = map.get_mut(&c1) {
            chunk.sleep();
        }
        assert_eq!(map.chunk_counts(), (2, 1, 1));
    }
}
